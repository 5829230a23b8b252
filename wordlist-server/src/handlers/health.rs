//! GET /health: liveness plus the size of the loaded attribute catalog.

use std::sync::Arc;

use axum::{Extension, Json};
use wordlist_core::QueryParameterResolver;

pub async fn health(
    Extension(resolver): Extension<Arc<QueryParameterResolver>>,
) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "attributes": resolver.catalog().len(),
    }))
}
