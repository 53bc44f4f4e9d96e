use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, instrument};

use super::annotate::{annotate_movie, Movie};
use super::paging::{MovieSort, PagingSpec};
use super::query::{self, MovieFilter};
use super::reader::CatalogReader;
use super::similarity;
use super::{CatalogError, CatalogResult};
use crate::store::GraphStore;

/// Movie lookups, each served from a single read transaction. A `user_id`
/// of `None` is an anonymous caller: every movie comes back with
/// `favorite = false`.
#[derive(Clone)]
pub struct MovieService {
    reader: CatalogReader,
}

impl MovieService {
    pub fn new(store: Arc<dyn GraphStore>, timeout: Duration) -> Self {
        Self {
            reader: CatalogReader::new(store, timeout),
        }
    }

    #[instrument(skip(self, paging), fields(sort = ?paging.sort, skip = paging.skip, limit = paging.limit))]
    pub async fn find_all(
        &self,
        user_id: Option<&str>,
        paging: &PagingSpec<MovieSort>,
    ) -> CatalogResult<Vec<Movie>> {
        self.list(&MovieFilter::All, user_id, paging).await
    }

    #[instrument(skip(self, paging))]
    pub async fn find_all_by_genre(
        &self,
        genre: &str,
        user_id: Option<&str>,
        paging: &PagingSpec<MovieSort>,
    ) -> CatalogResult<Vec<Movie>> {
        self.list(&MovieFilter::Genre(genre.to_string()), user_id, paging)
            .await
    }

    #[instrument(skip(self, paging))]
    pub async fn find_all_by_actor_id(
        &self,
        actor_id: &str,
        user_id: Option<&str>,
        paging: &PagingSpec<MovieSort>,
    ) -> CatalogResult<Vec<Movie>> {
        self.list(&MovieFilter::Actor(actor_id.to_string()), user_id, paging)
            .await
    }

    #[instrument(skip(self, paging))]
    pub async fn find_all_by_director_id(
        &self,
        director_id: &str,
        user_id: Option<&str>,
        paging: &PagingSpec<MovieSort>,
    ) -> CatalogResult<Vec<Movie>> {
        self.list(&MovieFilter::Director(director_id.to_string()), user_id, paging)
            .await
    }

    /// The movie with its actors, directors, genres and rating count.
    #[instrument(skip(self))]
    pub async fn find_one_by_id(&self, id: &str, user_id: Option<&str>) -> CatalogResult<Movie> {
        let fetched = self.reader.fetch(user_id, &query::movie_detail(id)).await?;

        let record = fetched
            .records
            .into_iter()
            .next()
            .ok_or_else(|| CatalogError::NotFound(format!("Movie not found: {}", id)))?;

        annotate_movie(record, &fetched.favorites)
    }

    /// Movies ranked by `imdbRating × shared connections`, best first.
    /// Only `skip` and `limit` of `paging` apply.
    #[instrument(skip(self, paging), fields(skip = paging.skip, limit = paging.limit))]
    pub async fn find_all_by_similarity(
        &self,
        id: &str,
        user_id: Option<&str>,
        paging: &PagingSpec<MovieSort>,
    ) -> CatalogResult<Vec<Movie>> {
        let fetched = self
            .reader
            .fetch(user_id, &similarity::similar_movies_query(id, paging))
            .await?;

        similarity::rank_movies(fetched.records, &fetched.favorites)
    }

    // SKIP/LIMIT are applied by the store; the rows are not windowed again here.
    async fn list(
        &self,
        filter: &MovieFilter,
        user_id: Option<&str>,
        paging: &PagingSpec<MovieSort>,
    ) -> CatalogResult<Vec<Movie>> {
        let fetched = self
            .reader
            .fetch(user_id, &query::movie_list(filter, paging))
            .await?;

        let movies = fetched
            .records
            .into_iter()
            .map(|record| annotate_movie(record, &fetched.favorites))
            .collect::<CatalogResult<Vec<_>>>()?;

        debug!(count = movies.len(), favorites = fetched.favorites.len(), "Listed movies");
        Ok(movies)
    }
}
