//! Similarity rankings for movies and people.
//!
//! The store does the ranking so that SKIP/LIMIT land on the right rows, but
//! the formulas live here: the query templates and the comparators below
//! must agree. Results are re-sorted with the comparator after they come
//! back, which is a no-op when the store honoured the query's ORDER BY.

use std::cmp::Ordering;

use tracing::warn;

use super::annotate::{self, take_column, Movie, Person};
use super::favorites::FavoriteSet;
use super::paging::{PagingSpec, SortKey};
use super::query::{bind_page, PERSON_COLUMNS};
use super::CatalogResult;
use crate::store::{GraphQuery, Record, StoreError};

const SIMILAR_MOVIE_COLUMNS: &[&str] = &["movie", "inCommon"];

/// Movies sharing a genre, an actor or a director with the source movie.
/// `inCommon` counts the shared paths; unrated movies are never candidates.
pub fn similar_movies_query<S: SortKey>(id: &str, paging: &PagingSpec<S>) -> GraphQuery {
    let query = GraphQuery::new(
        "
    MATCH (source:Movie {tmdbId: $id})-[:IN_GENRE|ACTED_IN|DIRECTED]-(shared)-[:IN_GENRE|ACTED_IN|DIRECTED]-(m:Movie)
    WHERE m <> source AND m.imdbRating IS NOT NULL
    WITH m, count(*) AS inCommon
    RETURN m { .* } AS movie, inCommon
    ORDER BY m.imdbRating * inCommon DESC, m.tmdbId ASC
    SKIP $skip
    LIMIT $limit",
        SIMILAR_MOVIE_COLUMNS,
    )
    .param("id", id);

    bind_page(query, paging)
}

/// People credited (acting or directing) on a title the source person is
/// also credited on, with the shared titles collected into `inCommon`.
pub fn similar_people_query<S: SortKey>(id: &str, paging: &PagingSpec<S>) -> GraphQuery {
    let query = GraphQuery::new(
        "
    MATCH (source:Person {tmdbId: $id})-[:ACTED_IN|DIRECTED]->(m:Movie)<-[r:ACTED_IN|DIRECTED]-(p:Person)
    WHERE p <> source
    WITH p, collect(m { .tmdbId, .title, type: type(r) }) AS inCommon
    RETURN p {
        .*,
        actedCount: count { (p)-[:ACTED_IN]->() },
        directedCount: count { (p)-[:DIRECTED]->() },
        inCommon: inCommon
    } AS person
    ORDER BY size(inCommon) DESC, p.tmdbId ASC
    SKIP $skip
    LIMIT $limit",
        PERSON_COLUMNS,
    )
    .param("id", id);

    bind_page(query, paging)
}

pub fn movie_score(rating: f64, in_common: u64) -> f64 {
    rating * in_common as f64
}

/// Higher score first, then lower identifier.
pub fn compare_movies(a: &Movie, b: &Movie) -> Ordering {
    let a_score = a.score.unwrap_or(f64::NEG_INFINITY);
    let b_score = b.score.unwrap_or(f64::NEG_INFINITY);
    b_score
        .partial_cmp(&a_score)
        .unwrap_or(Ordering::Equal)
        .then_with(|| a.tmdb_id.cmp(&b.tmdb_id))
}

/// More shared credits first, then lower identifier.
pub fn compare_people(a: &Person, b: &Person) -> Ordering {
    let a_len = a.in_common.as_ref().map_or(0, Vec::len);
    let b_len = b.in_common.as_ref().map_or(0, Vec::len);
    b_len.cmp(&a_len).then_with(|| a.tmdb_id.cmp(&b.tmdb_id))
}

/// Turns similar-movie rows into scored movies, best first. A row whose
/// movie has no rating is dropped rather than scored as zero.
pub fn rank_movies(records: Vec<Record>, favorites: &FavoriteSet) -> CatalogResult<Vec<Movie>> {
    let mut movies = Vec::with_capacity(records.len());

    for mut record in records {
        let in_common = take_column(&mut record, "inCommon")?;
        let in_common = in_common.as_u64().ok_or_else(|| {
            StoreError::Decode(format!("inCommon is not a count: {}", in_common))
        })?;

        let mut movie = annotate::annotate_movie(record, favorites)?;
        let Some(rating) = movie.imdb_rating() else {
            warn!(tmdb_id = %movie.tmdb_id, "Skipping similar movie without a rating");
            continue;
        };
        movie.score = Some(movie_score(rating, in_common));
        movies.push(movie);
    }

    movies.sort_by(compare_movies);
    Ok(movies)
}

pub fn rank_people(records: Vec<Record>) -> CatalogResult<Vec<Person>> {
    let mut people = records
        .into_iter()
        .map(annotate::annotate_person)
        .collect::<CatalogResult<Vec<_>>>()?;

    people.sort_by(compare_people);
    Ok(people)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::paging::MovieSort;
    use crate::catalog::CatalogError;
    use crate::store::Param;
    use serde_json::{json, Value};

    fn similar(id: &str, rating: Value, in_common: u64) -> Record {
        Record::new()
            .with("movie", json!({"tmdbId": id, "imdbRating": rating}))
            .with("inCommon", in_common)
    }

    fn person(id: &str, shared: usize) -> Record {
        let in_common: Vec<Value> = (0..shared)
            .map(|i| json!({"tmdbId": format!("m{}", i), "title": "T", "type": "ACTED_IN"}))
            .collect();
        Record::new().with("person", json!({"tmdbId": id, "inCommon": in_common}))
    }

    #[test]
    fn test_score_is_rating_times_shared_connections() {
        assert_eq!(movie_score(7.5, 4), 30.0);
        assert_eq!(movie_score(8.0, 0), 0.0);
    }

    #[test]
    fn test_rank_movies_orders_by_score_then_id() {
        let records = vec![
            similar("3", json!(6.0), 2),  // 12
            similar("1", json!(4.0), 5),  // 20
            similar("2", json!(8.0), 3),  // 24
            similar("0", json!(10.0), 2), // 20, ties with "1"
        ];

        let movies = rank_movies(records, &FavoriteSet::default()).unwrap();
        let ids: Vec<&str> = movies.iter().map(|m| m.tmdb_id.as_str()).collect();
        assert_eq!(ids, ["2", "0", "1", "3"]);

        let scores: Vec<f64> = movies.iter().map(|m| m.score.unwrap()).collect();
        assert!(scores.windows(2).all(|w| w[0] >= w[1]));
        assert_eq!(scores[0], 24.0);
    }

    #[test]
    fn test_rank_movies_drops_unrated() {
        let records = vec![similar("1", Value::Null, 9), similar("2", json!(5.0), 1)];
        let movies = rank_movies(records, &FavoriteSet::default()).unwrap();
        assert_eq!(movies.len(), 1);
        assert_eq!(movies[0].tmdb_id, "2");
        assert!(movies.iter().all(|m| m.imdb_rating().is_some()));
    }

    #[test]
    fn test_rank_movies_flags_favorites() {
        let favorites: FavoriteSet = ["2"].into_iter().collect();
        let movies =
            rank_movies(vec![similar("1", json!(5.0), 1), similar("2", json!(5.0), 1)], &favorites)
                .unwrap();
        assert!(!movies[0].favorite);
        assert!(movies[1].favorite);
    }

    #[test]
    fn test_rank_movies_rejects_bad_count() {
        let record = Record::new()
            .with("movie", json!({"tmdbId": "1", "imdbRating": 5.0}))
            .with("inCommon", "many");
        assert!(matches!(
            rank_movies(vec![record], &FavoriteSet::default()),
            Err(CatalogError::QueryFailure(_))
        ));
    }

    #[test]
    fn test_rank_people_by_shared_count_then_id() {
        let records = vec![person("b", 2), person("c", 5), person("a", 2), person("d", 1)];

        let people = rank_people(records.clone()).unwrap();
        let ids: Vec<&str> = people.iter().map(|p| p.tmdb_id.as_str()).collect();
        assert_eq!(ids, ["c", "a", "b", "d"]);

        // repeated calls give the same order
        let again = rank_people(records).unwrap();
        assert_eq!(people, again);
    }

    #[test]
    fn test_similar_movies_pattern_excludes_source() {
        let movies = similar_movies_query("603", &PagingSpec::<MovieSort>::default());

        // undirected hops: a person credited on both movies in any role counts
        assert!(movies.text.contains(
            "(source:Movie {tmdbId: $id})-[:IN_GENRE|ACTED_IN|DIRECTED]-(shared)-[:IN_GENRE|ACTED_IN|DIRECTED]-(m:Movie)"
        ));
        assert!(movies.text.contains("WHERE m <> source AND"));
        assert!(movies.text.contains("count(*) AS inCommon"));
        assert_eq!(movies.columns, &["movie", "inCommon"]);
    }

    #[test]
    fn test_similar_people_pattern_excludes_source() {
        let people = similar_people_query("6384", &PagingSpec::<MovieSort>::default());

        assert!(people.text.contains(
            "(source:Person {tmdbId: $id})-[:ACTED_IN|DIRECTED]->(m:Movie)<-[r:ACTED_IN|DIRECTED]-(p:Person)"
        ));
        assert!(people.text.contains("WHERE p <> source"));
        assert!(people.text.contains("type: type(r)"));
        assert_eq!(people.get_param("id"), Some(&Param::Text("6384".to_string())));
    }

    #[test]
    fn test_similarity_queries_ignore_sort() {
        let paging = PagingSpec::new(MovieSort::Released, crate::catalog::SortOrder::Asc, 6, 3);

        let movies = similar_movies_query("603", &paging);
        assert!(!movies.text.contains("released"));
        assert!(movies.text.contains("ORDER BY m.imdbRating * inCommon DESC, m.tmdbId ASC"));
        assert!(movies.text.contains("m.imdbRating IS NOT NULL"));
        assert_eq!(movies.get_param("id"), Some(&Param::Text("603".to_string())));
        assert_eq!(movies.get_param("skip"), Some(&Param::Integer(6)));
        assert_eq!(movies.get_param("limit"), Some(&Param::Integer(3)));

        let people = similar_people_query("6384", &paging);
        assert!(people.text.contains("ORDER BY size(inCommon) DESC, p.tmdbId ASC"));
        assert_eq!(people.columns, &["person"]);
    }
}
