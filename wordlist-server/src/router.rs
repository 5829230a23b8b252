//! Router construction for the word list server.

use std::time::Duration;

use axum::http::HeaderName;
use axum::{routing::get, Extension, Router};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::handlers::words::HAS_MORE_HEADER;
use crate::Services;

/// Build the full axum router with all routes and middleware.
pub fn build_router(services: Services, request_timeout: Duration) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
        .expose_headers([HeaderName::from_static(HAS_MORE_HEADER)]);

    Router::new()
        .route("/health", get(handlers::health::health))
        .route("/api/words", get(handlers::words::find_words))
        .route("/api/attributes", get(handlers::attributes::list_attributes))
        .layer(Extension(services.engine))
        .layer(Extension(services.resolver))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(TimeoutLayer::new(request_timeout))
                .layer(cors),
        )
}
