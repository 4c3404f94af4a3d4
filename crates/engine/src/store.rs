//! Account store — persistence port for the set of subscribed addresses.
//!
//! Both write operations are idempotent single-statement primitives:
//! - `ensure_address_present` is `INSERT ... ON CONFLICT DO NOTHING`
//! - `ensure_address_removed` is a plain `DELETE` that may match zero rows
//!
//! There is no check-then-act anywhere; the `accounts` primary key is the
//! only serialization point for concurrent requests.

use std::collections::BTreeSet;

use async_trait::async_trait;
use sqlx::PgPool;
use tokio::sync::Mutex;

use watchlist_common::error::AppError;
use watchlist_common::types::Account;

use crate::address::AccountAddress;

/// Storage collaborator consumed by [`crate::subscription::SubscriptionManager`].
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Insert `address` if absent. Succeeds whether or not it already existed.
    async fn ensure_address_present(&self, address: &AccountAddress) -> Result<(), AppError>;

    /// Delete `address` if present. Succeeds whether or not it existed.
    async fn ensure_address_removed(&self, address: &AccountAddress) -> Result<(), AppError>;

    /// Whether `address` is currently stored.
    async fn contains(&self, address: &AccountAddress) -> Result<bool, AppError>;

    /// All stored addresses, ordered by address.
    async fn list(&self) -> Result<Vec<AccountAddress>, AppError>;

    /// Round-trip to the backing storage without touching any rows.
    async fn ping(&self) -> Result<(), AppError>;
}

/// PostgreSQL-backed store over the `accounts` table.
#[derive(Clone)]
pub struct PgAccountStore {
    pool: PgPool,
}

impl PgAccountStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Fetch full rows, including insertion time.
    pub async fn accounts(&self) -> Result<Vec<Account>, AppError> {
        let accounts: Vec<Account> = sqlx::query_as(
            "SELECT stellar_address, created_at FROM accounts ORDER BY stellar_address",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(accounts)
    }
}

#[async_trait]
impl AccountStore for PgAccountStore {
    async fn ensure_address_present(&self, address: &AccountAddress) -> Result<(), AppError> {
        let result = sqlx::query(
            r#"
            INSERT INTO accounts (stellar_address)
            VALUES ($1)
            ON CONFLICT (stellar_address) DO NOTHING
            "#,
        )
        .bind(address.as_str())
        .execute(&self.pool)
        .await?;

        tracing::debug!(
            address = %address,
            inserted = result.rows_affected() > 0,
            "ensure_address_present"
        );
        Ok(())
    }

    async fn ensure_address_removed(&self, address: &AccountAddress) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM accounts WHERE stellar_address = $1")
            .bind(address.as_str())
            .execute(&self.pool)
            .await?;

        tracing::debug!(
            address = %address,
            deleted = result.rows_affected() > 0,
            "ensure_address_removed"
        );
        Ok(())
    }

    async fn contains(&self, address: &AccountAddress) -> Result<bool, AppError> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM accounts WHERE stellar_address = $1)")
                .bind(address.as_str())
                .fetch_one(&self.pool)
                .await?;

        Ok(exists)
    }

    async fn list(&self) -> Result<Vec<AccountAddress>, AppError> {
        let rows: Vec<String> =
            sqlx::query_scalar("SELECT stellar_address FROM accounts ORDER BY stellar_address")
                .fetch_all(&self.pool)
                .await?;

        // Rows only ever enter the table through validated addresses.
        rows.into_iter()
            .map(|raw| {
                AccountAddress::parse(&raw).map_err(|_| {
                    AppError::Internal(format!("accounts table holds invalid address '{}'", raw))
                })
            })
            .collect()
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

/// In-process store with the same semantics as [`PgAccountStore`].
///
/// Used by tests.
#[derive(Default)]
pub struct InMemoryAccountStore {
    addresses: Mutex<BTreeSet<AccountAddress>>,
}

impl InMemoryAccountStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored addresses.
    pub async fn len(&self) -> usize {
        self.addresses.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.addresses.lock().await.is_empty()
    }
}

#[async_trait]
impl AccountStore for InMemoryAccountStore {
    async fn ensure_address_present(&self, address: &AccountAddress) -> Result<(), AppError> {
        self.addresses.lock().await.insert(address.clone());
        Ok(())
    }

    async fn ensure_address_removed(&self, address: &AccountAddress) -> Result<(), AppError> {
        self.addresses.lock().await.remove(address);
        Ok(())
    }

    async fn contains(&self, address: &AccountAddress) -> Result<bool, AppError> {
        Ok(self.addresses.lock().await.contains(address))
    }

    async fn list(&self) -> Result<Vec<AccountAddress>, AppError> {
        Ok(self.addresses.lock().await.iter().cloned().collect())
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}
