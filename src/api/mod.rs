mod handlers;
mod models;

use axum::{extract::DefaultBodyLimit, http::Method, routing::post, Router};
use tower_http::cors::{AllowHeaders, Any, CorsLayer};

use crate::AppState;

pub use handlers::{not_found, relay};
pub use models::{
    ErrorResponse, InboundQuestion, OutboundQuestion, MALFORMED_BODY_MESSAGE, NOT_FOUND_MESSAGE,
    UPSTREAM_FAILURE_MESSAGE,
};

/// Inbound bodies above this size are answered with 413.
pub const BODY_LIMIT_BYTES: usize = 100 * 1024;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", post(relay))
        .route("/proxy", post(relay))
        .fallback(not_found)
        .layer(DefaultBodyLimit::max(BODY_LIMIT_BYTES))
        .layer(cors_layer())
        .with_state(state)
}

/// Any origin may call the relay.
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::HEAD,
            Method::PUT,
            Method::PATCH,
            Method::POST,
            Method::DELETE,
        ])
        .allow_headers(AllowHeaders::mirror_request())
}
