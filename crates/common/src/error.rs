use std::collections::BTreeMap;

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

/// Field name → human-readable message, rendered as `extras` in 400 responses.
pub type FieldErrors = BTreeMap<String, String>;

/// Top-level message for every validation failure.
pub const VALIDATION_ERROR_MESSAGE: &str = "Validation error.";

/// Message for request bodies that cannot be decoded.
pub const INVALID_BODY_MESSAGE: &str = "Invalid request body given.";

/// Message returned for infrastructure failures; the cause is only logged.
pub const INTERNAL_ERROR_MESSAGE: &str = "An error occurred while processing this request.";

/// Common error types used across the application.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Validation error: {0:?}")]
    Validation(FieldErrors),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Validation failure for a single field.
    pub fn field(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut extras = FieldErrors::new();
        extras.insert(field.into(), message.into());
        AppError::Validation(extras)
    }

    /// `true` for failures caused by storage or other infrastructure.
    pub fn is_infrastructure(&self) -> bool {
        matches!(self, AppError::Database(_) | AppError::Internal(_))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            AppError::Validation(extras) => (
                StatusCode::BAD_REQUEST,
                json!({ "error": VALIDATION_ERROR_MESSAGE, "extras": extras }),
            ),
            AppError::BadRequest(detail) => {
                tracing::debug!(detail = %detail, "Rejected request body");
                (
                    StatusCode::BAD_REQUEST,
                    json!({ "error": INVALID_BODY_MESSAGE }),
                )
            }
            AppError::Database(_) | AppError::Internal(_) => {
                tracing::error!(error = %self, "Request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": INTERNAL_ERROR_MESSAGE }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}
