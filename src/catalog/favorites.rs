use std::collections::HashSet;

use tracing::debug;

use super::CatalogResult;
use crate::store::{GraphQuery, ReadTransaction};

const FAVORITES_QUERY: &str = "
    MATCH (:User {userId: $userId})-[:HAS_FAVORITE]->(m:Movie)
    RETURN m.tmdbId AS id";

/// Identifiers of the movies one user has marked as favorite.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FavoriteSet {
    ids: HashSet<String>,
}

impl FavoriteSet {
    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for FavoriteSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            ids: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// Reads the favorites of `user_id` inside `tx`. Anonymous callers get an
/// empty set and the store is not queried.
pub async fn resolve(
    tx: &mut dyn ReadTransaction,
    user_id: Option<&str>,
) -> CatalogResult<FavoriteSet> {
    let user_id = match user_id.map(str::trim) {
        Some(id) if !id.is_empty() => id,
        _ => return Ok(FavoriteSet::default()),
    };

    let query = GraphQuery::new(FAVORITES_QUERY, &["id"]).param("userId", user_id);
    let records = tx.run(&query).await?;

    let favorites: FavoriteSet = records
        .iter()
        .filter_map(|record| record.get_str("id"))
        .collect();

    debug!(user_id, count = favorites.len(), "Resolved favorites");
    Ok(favorites)
}
