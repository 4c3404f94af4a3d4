//! Request extractors.

use axum::body::Bytes;
use axum::extract::{FromRequest, Request};
use serde::de::DeserializeOwned;

use watchlist_common::error::AppError;

/// JSON object request body that ignores `Content-Type`.
///
/// Clients of the payments endpoints post bare JSON without headers, so this
/// reads the raw bytes and decodes them directly. Anything other than a JSON
/// object (arrays included, even though serde maps them onto structs) becomes
/// `AppError::BadRequest`, rendered in the service's JSON error shape.
#[derive(Debug, Clone)]
pub struct JsonBody<T>(pub T);

impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| AppError::BadRequest(format!("Failed to read body: {}", e)))?;

        let value: serde_json::Value = serde_json::from_slice(&bytes)
            .map_err(|e| AppError::BadRequest(format!("Invalid JSON: {}", e)))?;
        if !value.is_object() {
            return Err(AppError::BadRequest(
                "Request body must be a JSON object".to_string(),
            ));
        }

        let body = serde_json::from_value(value)
            .map_err(|e| AppError::BadRequest(format!("Invalid request fields: {}", e)))?;

        Ok(JsonBody(body))
    }
}
