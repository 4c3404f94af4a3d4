//! Subscription manager — idempotent subscribe/unsubscribe of payment addresses.
//!
//! Per address there are two states, absent and subscribed. Subscribe moves
//! to subscribed from either state, unsubscribe moves to absent from either
//! state. Neither operation reports whether anything changed.

use std::sync::Arc;

use watchlist_common::error::AppError;

use crate::address::AccountAddress;
use crate::store::AccountStore;

/// Service layer over an injected [`AccountStore`].
#[derive(Clone)]
pub struct SubscriptionManager {
    store: Arc<dyn AccountStore>,
}

impl SubscriptionManager {
    pub fn new(store: Arc<dyn AccountStore>) -> Self {
        Self { store }
    }

    /// Ensure `address` is watched for incoming payments.
    pub async fn subscribe(&self, address: &AccountAddress) -> Result<(), AppError> {
        self.store.ensure_address_present(address).await?;

        tracing::info!(address = %address, "Address subscribed");
        Ok(())
    }

    /// Ensure `address` is no longer watched.
    pub async fn unsubscribe(&self, address: &AccountAddress) -> Result<(), AppError> {
        self.store.ensure_address_removed(address).await?;

        tracing::info!(address = %address, "Address unsubscribed");
        Ok(())
    }

    pub async fn is_subscribed(&self, address: &AccountAddress) -> Result<bool, AppError> {
        self.store.contains(address).await
    }

    /// Current watch list, ordered by address.
    pub async fn subscribed_addresses(&self) -> Result<Vec<AccountAddress>, AppError> {
        self.store.list().await
    }

    /// Whether the backing store answers; used by the health check.
    pub async fn check_storage(&self) -> Result<(), AppError> {
        self.store.ping().await
    }
}
