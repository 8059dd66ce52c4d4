//! Unified error handling.
//!
//! Provides a unified `AppError` type mapped onto HTTP statuses with
//! field-tagged JSON bodies. All route handlers return `Result<T, AppError>`.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::store::StoreError;

/// Application-level error type for the HTTP surface.
#[derive(Debug, Error)]
pub enum AppError {
    /// Write-path validation or lookup failure.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

/// JSON error body: the field the error belongs to plus a message, matching
/// the mutation error shape the API exposes for partial bulk failures.
#[derive(Debug, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: FieldError,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, field, message) = match &self {
            Self::Store(err) => {
                let status = match err {
                    StoreError::DuplicateEmail => StatusCode::CONFLICT,
                    StoreError::NotFound => StatusCode::NOT_FOUND,
                    _ => StatusCode::BAD_REQUEST,
                };
                (status, err.field().to_owned(), err.to_string())
            }
            Self::NotFound(what) => (
                StatusCode::NOT_FOUND,
                "id".to_owned(),
                format!("Not found: {what}"),
            ),
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, "general".to_owned(), msg.clone()),
        };

        if status.is_server_error() {
            tracing::error!(error = %self, "Request error");
        } else {
            tracing::debug!(error = %self, "Request rejected");
        }

        (
            status,
            Json(ErrorBody {
                error: FieldError { field, message },
            }),
        )
            .into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
