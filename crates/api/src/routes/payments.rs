//! Payment address subscription routes.

use axum::Router;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use serde::Deserialize;

use watchlist_common::error::AppError;
use watchlist_engine::address::AccountAddress;

use crate::extract::JsonBody;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/payments/subscribe", post(subscribe_address))
        .route("/payments/unsubscribe", post(unsubscribe_address))
}

/// Request body shared by both endpoints.
#[derive(Debug, Deserialize)]
pub struct AddressRequest {
    /// Missing and `null` are both treated as an empty, and therefore
    /// invalid, address.
    #[serde(default)]
    pub address: Option<String>,
}

impl AddressRequest {
    fn address(&self) -> Result<AccountAddress, AppError> {
        AccountAddress::parse(self.address.as_deref().unwrap_or_default())
    }
}

/// POST /payments/subscribe — Start watching an address for incoming payments.
///
/// Already-subscribed addresses succeed unchanged.
async fn subscribe_address(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<AddressRequest>,
) -> Result<StatusCode, AppError> {
    let address = req.address()?;
    state.subscriptions.subscribe(&address).await?;
    Ok(StatusCode::OK)
}

/// POST /payments/unsubscribe — Stop watching an address.
///
/// Addresses that were never subscribed succeed as well.
async fn unsubscribe_address(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<AddressRequest>,
) -> Result<StatusCode, AppError> {
    let address = req.address()?;
    state.subscriptions.unsubscribe(&address).await?;
    Ok(StatusCode::OK)
}
