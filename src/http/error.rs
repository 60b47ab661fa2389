//! HTTP error handling and response types.
//!
//! Every error body is a JSON object with an `error` key. Storage failures
//! are logged server-side and surfaced as a generic 500; no internal detail
//! reaches the client.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::db::repository::RepositoryError;

/// API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Human-readable error message
    pub error: String,
}

impl ApiError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}

/// Application error type for HTTP handlers.
#[derive(Debug)]
pub enum AppError {
    /// Invalid request (unparseable id, malformed body)
    BadRequest(String),
    /// Repository error (not found, validation, storage)
    Repository(RepositoryError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, ApiError::new(msg)),
            AppError::Repository(e) if e.is_not_found() => {
                (StatusCode::NOT_FOUND, ApiError::new("Post not found"))
            }
            AppError::Repository(RepositoryError::ValidationError { message }) => {
                (StatusCode::BAD_REQUEST, ApiError::new(message))
            }
            AppError::Repository(e) => {
                tracing::error!(error = %e, "repository operation failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ApiError::new("Internal server error"),
                )
            }
        };

        (status, Json(error)).into_response()
    }
}

impl From<RepositoryError> for AppError {
    fn from(err: RepositoryError) -> Self {
        AppError::Repository(err)
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(format!("Invalid request payload: {}", rejection.body_text()))
    }
}
