//! Shared application state for the Axum API server.

use std::sync::Arc;

use watchlist_engine::store::AccountStore;
use watchlist_engine::subscription::SubscriptionManager;

/// Application state shared across all route handlers via Axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub subscriptions: SubscriptionManager,
}

impl AppState {
    pub fn new(store: Arc<dyn AccountStore>) -> Self {
        Self {
            subscriptions: SubscriptionManager::new(store),
        }
    }
}
