use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    Json,
};

use super::{paging, ApiResult};
use crate::catalog::{PagingParams, Person, PersonSort};
use crate::server::AppState;

pub async fn get_people(
    State(state): State<AppState>,
    params: Result<Query<PagingParams>, QueryRejection>,
) -> ApiResult<Json<Vec<Person>>> {
    let paging = paging::<PersonSort>(&state, params)?;
    let people = state.people.find_all(&paging).await?;
    Ok(Json(people))
}

pub async fn get_person(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Person>> {
    let person = state.people.find_one_by_id(&id).await?;
    Ok(Json(person))
}

pub async fn get_similar_people(
    State(state): State<AppState>,
    Path(id): Path<String>,
    params: Result<Query<PagingParams>, QueryRejection>,
) -> ApiResult<Json<Vec<Person>>> {
    let paging = paging::<PersonSort>(&state, params)?;
    let people = state.people.find_all_by_similarity(&id, &paging).await?;
    Ok(Json(people))
}
