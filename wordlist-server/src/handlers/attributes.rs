//! GET /api/attributes: the attribute catalog, ordered by name.

use std::sync::Arc;

use axum::{Extension, Json};
use wordlist_core::{Attribute, QueryParameterResolver};

pub async fn list_attributes(
    Extension(resolver): Extension<Arc<QueryParameterResolver>>,
) -> Json<Vec<Attribute>> {
    Json(resolver.catalog().all_attributes().to_vec())
}
