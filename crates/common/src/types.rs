use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A row of the `accounts` table: an address watched for incoming payments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Account {
    pub stellar_address: String,
    pub created_at: DateTime<Utc>,
}
