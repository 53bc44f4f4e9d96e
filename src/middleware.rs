use axum::{extract::Request, middleware::Next, response::Response};
use tracing::info;

pub const USER_ID_HEADER: &str = "x-user-id";

/// The caller's user id, as forwarded by the gateway in front of us.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallerId(pub String);

pub async fn caller_identity(mut req: Request, next: Next) -> Response {
    let caller = req
        .headers()
        .get(USER_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(|id| CallerId(id.to_string()));

    if let Some(caller) = caller {
        req.extensions_mut().insert(caller);
    }

    next.run(req).await
}

pub async fn log_request(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let uri = req.uri().clone();
    let user = req
        .extensions()
        .get::<CallerId>()
        .map(|c| c.0.clone())
        .unwrap_or_else(|| "-".to_string());

    let response = next.run(req).await;

    let status = response.status().as_u16();
    let content_length = response
        .headers()
        .get(axum::http::header::CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(0);

    info!(
        method = %method,
        url = %uri,
        user = %user,
        status = status,
        length = content_length,
        "HTTP request"
    );

    response
}
