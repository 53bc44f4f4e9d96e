use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    Extension, Json,
};

use super::{paging, user_id, ApiResult};
use crate::catalog::{Movie, MovieSort, PagingParams};
use crate::middleware::CallerId;
use crate::server::AppState;

pub async fn get_movies(
    State(state): State<AppState>,
    caller: Option<Extension<CallerId>>,
    params: Result<Query<PagingParams>, QueryRejection>,
) -> ApiResult<Json<Vec<Movie>>> {
    let paging = paging::<MovieSort>(&state, params)?;
    let movies = state.movies.find_all(user_id(&caller), &paging).await?;
    Ok(Json(movies))
}

pub async fn get_movie(
    State(state): State<AppState>,
    caller: Option<Extension<CallerId>>,
    Path(id): Path<String>,
) -> ApiResult<Json<Movie>> {
    let movie = state.movies.find_one_by_id(&id, user_id(&caller)).await?;
    Ok(Json(movie))
}

pub async fn get_similar_movies(
    State(state): State<AppState>,
    caller: Option<Extension<CallerId>>,
    Path(id): Path<String>,
    params: Result<Query<PagingParams>, QueryRejection>,
) -> ApiResult<Json<Vec<Movie>>> {
    let paging = paging::<MovieSort>(&state, params)?;
    let movies = state
        .movies
        .find_all_by_similarity(&id, user_id(&caller), &paging)
        .await?;
    Ok(Json(movies))
}

pub async fn get_genre_movies(
    State(state): State<AppState>,
    caller: Option<Extension<CallerId>>,
    Path(name): Path<String>,
    params: Result<Query<PagingParams>, QueryRejection>,
) -> ApiResult<Json<Vec<Movie>>> {
    let paging = paging::<MovieSort>(&state, params)?;
    let movies = state
        .movies
        .find_all_by_genre(&name, user_id(&caller), &paging)
        .await?;
    Ok(Json(movies))
}

pub async fn get_person_acted(
    State(state): State<AppState>,
    caller: Option<Extension<CallerId>>,
    Path(id): Path<String>,
    params: Result<Query<PagingParams>, QueryRejection>,
) -> ApiResult<Json<Vec<Movie>>> {
    let paging = paging::<MovieSort>(&state, params)?;
    let movies = state
        .movies
        .find_all_by_actor_id(&id, user_id(&caller), &paging)
        .await?;
    Ok(Json(movies))
}

pub async fn get_person_directed(
    State(state): State<AppState>,
    caller: Option<Extension<CallerId>>,
    Path(id): Path<String>,
    params: Result<Query<PagingParams>, QueryRejection>,
) -> ApiResult<Json<Vec<Movie>>> {
    let paging = paging::<MovieSort>(&state, params)?;
    let movies = state
        .movies
        .find_all_by_director_id(&id, user_id(&caller), &paging)
        .await?;
    Ok(Json(movies))
}
