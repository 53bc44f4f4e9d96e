use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::favorites::FavoriteSet;
use super::CatalogResult;
use crate::store::{Record, StoreError};

/// Store properties this crate does not interpret, kept verbatim.
pub type Properties = serde_json::Map<String, Value>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Movie {
    pub tmdb_id: String,
    #[serde(default)]
    pub favorite: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actors: Option<Vec<CastMember>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub directors: Option<Vec<Properties>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genres: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating_count: Option<u64>,
    #[serde(flatten)]
    pub properties: Properties,
}

impl Movie {
    pub fn title(&self) -> Option<&str> {
        self.properties.get("title").and_then(Value::as_str)
    }

    pub fn imdb_rating(&self) -> Option<f64> {
        self.properties.get("imdbRating").and_then(Value::as_f64)
    }
}

/// An actor credit: the person's properties plus the role played.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CastMember {
    #[serde(default)]
    pub role: Option<String>,
    #[serde(flatten)]
    pub person: Properties,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    pub tmdb_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub acted_count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub directed_count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub in_common: Option<Vec<SharedCredit>>,
    #[serde(flatten)]
    pub properties: Properties,
}

impl Person {
    pub fn name(&self) -> Option<&str> {
        self.properties.get("name").and_then(Value::as_str)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CreditType {
    ActedIn,
    Directed,
}

/// A title two people both have a credit on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SharedCredit {
    #[serde(rename = "tmdbId")]
    pub tmdb_id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(rename = "type")]
    pub relation: CreditType,
}

pub fn annotate_movie(mut record: Record, favorites: &FavoriteSet) -> CatalogResult<Movie> {
    let mut movie: Movie = decode(take_column(&mut record, "movie")?, "movie")?;
    movie.favorite = favorites.contains(&movie.tmdb_id);
    Ok(movie)
}

pub fn annotate_person(mut record: Record) -> CatalogResult<Person> {
    decode(take_column(&mut record, "person")?, "person")
}

pub(crate) fn take_column(record: &mut Record, column: &str) -> CatalogResult<Value> {
    record
        .take(column)
        .ok_or_else(|| StoreError::Decode(format!("record has no {} column", column)).into())
}

fn decode<T: DeserializeOwned>(value: Value, what: &str) -> CatalogResult<T> {
    serde_json::from_value(value)
        .map_err(|e| StoreError::Decode(format!("malformed {}: {}", what, e)).into())
}
