//! HTTP mapping for [`WordListError`].

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use wordlist_core::WordListError;

/// Handler error. Status comes from [`WordListError::http_status`], body is
/// `{"error": "<message>"}`.
#[derive(Debug)]
pub struct AppError(pub WordListError);

impl From<WordListError> for AppError {
    fn from(err: WordListError) -> Self {
        Self(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.http_status())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if self.0.is_transient() {
            tracing::warn!("request failed ({status}): {}", self.0);
        } else {
            tracing::error!("request failed ({status}): {:#}", self.0);
        }

        let body = serde_json::json!({ "error": self.0.to_string() });
        (status, Json(body)).into_response()
    }
}
