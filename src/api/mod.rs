pub mod error;
pub mod movies;
pub mod people;

pub use error::{ApiError, ApiResult};

use axum::extract::rejection::QueryRejection;
use axum::extract::Query;
use axum::Extension;

use crate::catalog::{PagingParams, PagingSpec, SortKey};
use crate::middleware::CallerId;
use crate::server::AppState;

pub async fn health_check() -> &'static str {
    "OK"
}

fn user_id(caller: &Option<Extension<CallerId>>) -> Option<&str> {
    caller.as_ref().map(|Extension(caller)| caller.0.as_str())
}

/// Validates the paging part of the query string. A query string that does
/// not even deserialize is reported like any other bad parameter.
fn paging<S: SortKey>(
    state: &AppState,
    params: Result<Query<PagingParams>, QueryRejection>,
) -> ApiResult<PagingSpec<S>> {
    let Query(params) = params?;
    Ok(PagingSpec::from_params(&params, &state.config.paging)?)
}
