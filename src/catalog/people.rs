use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, instrument};

use super::annotate::{annotate_person, Person};
use super::paging::{PagingSpec, PersonSort};
use super::query;
use super::reader::CatalogReader;
use super::similarity;
use super::{CatalogError, CatalogResult};
use crate::store::GraphStore;

/// Person lookups. People carry no per-user state, so no favorites are read.
#[derive(Clone)]
pub struct PeopleService {
    reader: CatalogReader,
}

impl PeopleService {
    pub fn new(store: Arc<dyn GraphStore>, timeout: Duration) -> Self {
        Self {
            reader: CatalogReader::new(store, timeout),
        }
    }

    /// People ordered by `paging`, narrowed by its free-text query when set.
    #[instrument(skip(self, paging), fields(sort = ?paging.sort, q = ?paging.query))]
    pub async fn find_all(&self, paging: &PagingSpec<PersonSort>) -> CatalogResult<Vec<Person>> {
        let fetched = self.reader.fetch(None, &query::person_list(paging)).await?;

        let people = fetched
            .records
            .into_iter()
            .map(annotate_person)
            .collect::<CatalogResult<Vec<_>>>()?;

        debug!(count = people.len(), "Listed people");
        Ok(people)
    }

    #[instrument(skip(self))]
    pub async fn find_one_by_id(&self, id: &str) -> CatalogResult<Person> {
        let fetched = self.reader.fetch(None, &query::person_detail(id)).await?;

        let record = fetched
            .records
            .into_iter()
            .next()
            .ok_or_else(|| CatalogError::NotFound(format!("Person not found: {}", id)))?;

        annotate_person(record)
    }

    /// People sharing the most credits with `id`, each with the shared
    /// titles in `inCommon`. Only `skip` and `limit` of `paging` apply.
    #[instrument(skip(self, paging), fields(skip = paging.skip, limit = paging.limit))]
    pub async fn find_all_by_similarity(
        &self,
        id: &str,
        paging: &PagingSpec<PersonSort>,
    ) -> CatalogResult<Vec<Person>> {
        let fetched = self
            .reader
            .fetch(None, &similarity::similar_people_query(id, paging))
            .await?;

        similarity::rank_people(fetched.records)
    }
}
