pub mod annotate;
pub mod favorites;
pub mod movies;
pub mod paging;
pub mod people;
pub mod query;
pub mod reader;
pub mod similarity;

pub use annotate::{CastMember, CreditType, Movie, Person, Properties, SharedCredit};
pub use favorites::FavoriteSet;
pub use movies::MovieService;
pub use paging::{MovieSort, PagingParams, PagingSpec, PersonSort, SortKey, SortOrder};
pub use people::PeopleService;
pub use query::MovieFilter;

use crate::store::StoreError;

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Query failed: {0}")]
    QueryFailure(#[from] StoreError),
    #[error("Query cancelled after {0:?}")]
    Cancelled(std::time::Duration),
}

pub type CatalogResult<T> = Result<T, CatalogError>;
