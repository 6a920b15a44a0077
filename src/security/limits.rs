//! Request body limits.
//!
//! # Design Decisions
//! - Axum's default extractor limit is replaced by one configurable limit
//! - Oversized bodies are rejected with 413 Payload Too Large

use axum::extract::DefaultBodyLimit;
use axum::Router;
use tower_http::limit::RequestBodyLimitLayer;

/// Apply a `max_bytes` request body limit to every route of `router`.
pub fn with_body_limit(router: Router, max_bytes: usize) -> Router {
    router
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(max_bytes))
}
