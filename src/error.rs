//! Unified request error type.
//!
//! Handlers return `Result<T, ApiError>`; the `IntoResponse` impl converts
//! each variant to a JSON `{ "error": ... }` body with the matching status
//! code. Upstream completion failures are logged with full detail but only
//! a generic message is returned, so provider diagnostics never reach the
//! client.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::openai::CompletionError;

#[derive(Debug, Error)]
pub enum ApiError {
    /// The caller sent an invalid or malformed request body.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// The caller exhausted its daily message quota.
    #[error("daily message limit reached")]
    RateLimited,

    /// The completion endpoint failed; not recoverable locally.
    #[error(transparent)]
    Completion(#[from] CompletionError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::BadRequest(m) => (StatusCode::BAD_REQUEST, m.clone()),
            ApiError::RateLimited => (
                StatusCode::TOO_MANY_REQUESTS,
                "Daily message limit reached. Please try again tomorrow.".to_string(),
            ),
            ApiError::Completion(e) => {
                error!(error = %e, "completion call failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error".to_string(),
                )
            }
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}
