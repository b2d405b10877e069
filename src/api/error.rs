//! Mapping from store errors to HTTP responses.

use crate::error::StoreError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tracing::error;

/// A store error on its way out as an HTTP response.
///
/// Validation failures surface as 400 with the accumulated per-field message
/// list; a missing record is 404. Anything else is a persistence-level fault
/// and maps to 500 without leaking detail to the client.
#[derive(Debug)]
pub struct ApiError(pub StoreError);

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        ApiError(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self.0 {
            StoreError::Validation(errors) => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": errors.messages() })),
            )
                .into_response(),
            StoreError::ProductNotFound(_) => (
                StatusCode::NOT_FOUND,
                Json(json!("Produto não encontrado")),
            )
                .into_response(),
            other => {
                error!(error = %other, "operation failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "internal server error" })),
                )
                    .into_response()
            }
        }
    }
}
