use axum::{http::StatusCode, response::IntoResponse, routing::get, Router};
use std::sync::Arc;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::api;
use crate::catalog::{MovieService, PeopleService};
use crate::config::Config;
use crate::store::GraphStore;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub movies: MovieService,
    pub people: PeopleService,
}

impl AppState {
    pub fn new(config: Config, store: Arc<dyn GraphStore>) -> Self {
        let timeout = config.query_timeout();
        Self {
            movies: MovieService::new(Arc::clone(&store), timeout),
            people: PeopleService::new(store, timeout),
            config: Arc::new(config),
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    let movie_routes = Router::new()
        .route("/api/movies", get(api::movies::get_movies))
        .route("/api/movies/:id", get(api::movies::get_movie))
        .route("/api/movies/:id/similar", get(api::movies::get_similar_movies))
        .route("/api/genres/:name/movies", get(api::movies::get_genre_movies))
        .route("/api/people/:id/acted", get(api::movies::get_person_acted))
        .route("/api/people/:id/directed", get(api::movies::get_person_directed));

    let people_routes = Router::new()
        .route("/api/people", get(api::people::get_people))
        .route("/api/people/:id", get(api::people::get_person))
        .route("/api/people/:id/similar", get(api::people::get_similar_people));

    Router::new()
        .route("/health", get(api::health_check))
        .merge(movie_routes)
        .merge(people_routes)
        .fallback(fallback_handler)
        .layer(axum::middleware::from_fn(crate::middleware::log_request))
        .layer(axum::middleware::from_fn(crate::middleware::caller_identity))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn fallback_handler() -> impl IntoResponse {
    StatusCode::NOT_FOUND
}
