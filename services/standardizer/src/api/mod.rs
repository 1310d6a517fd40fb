use std::time::Duration;

use axum::{
    body::Body,
    extract::DefaultBodyLimit,
    http::{HeaderName, HeaderValue, Request},
    middleware::{self, Next},
    response::Response,
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};
use tracing::Instrument;
use uuid::Uuid;

use crate::config::StandardizerConfig;

mod error;
mod handlers;
mod types;

pub use error::{ApiError, ApiResult};
pub use handlers::{health_check, standardize, standardize_names_only, standardize_phones_only};
pub use types::{
    ErrorResponse, HealthResponse, StandardizeNamesRequest, StandardizePhonesRequest,
    StandardizeRequest,
};

pub const REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-request-id");

pub fn create_router(config: &StandardizerConfig) -> Router {
    let middleware = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.request_timeout_secs,
        )))
        .layer(CorsLayer::permissive());

    Router::new()
        .route("/", get(health_check))
        .route("/standardize", post(standardize))
        .route("/standardize_names", post(standardize_names_only))
        .route("/standardize_phones", post(standardize_phones_only))
        .layer(DefaultBodyLimit::max(config.max_body_size_bytes))
        .layer(middleware::from_fn(set_request_id))
        .layer(middleware)
}

/// Propagates the caller's `x-request-id`, or assigns a fresh one, and echoes
/// it on the response.
async fn set_request_id(mut request: Request<Body>, next: Next) -> Response {
    let request_id = request
        .headers()
        .get(&REQUEST_ID_HEADER)
        .cloned()
        .or_else(|| HeaderValue::from_str(&Uuid::new_v4().to_string()).ok());

    let Some(request_id) = request_id else {
        return next.run(request).await;
    };

    request
        .headers_mut()
        .insert(REQUEST_ID_HEADER, request_id.clone());
    let span = tracing::info_span!("request", request_id = ?request_id);
    let mut response = next.run(request).instrument(span).await;
    response
        .headers_mut()
        .entry(REQUEST_ID_HEADER)
        .or_insert(request_id);
    response
}
