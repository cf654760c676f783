//! User and pool-registration rows. Read-only to the pipeline.

use serde::Serialize;
use sqlx::FromRow;

use penca_core::types::{DbId, Timestamp};

/// A row from the `users` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct User {
    pub id: DbId,
    pub email: String,
    pub display_name: String,
    pub created_at: Timestamp,
}

/// A row from the `registrations` table. `display_name`, when set,
/// overrides the account name on leaderboards.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Registration {
    pub id: DbId,
    pub pool_id: DbId,
    pub user_id: DbId,
    pub display_name: Option<String>,
    pub created_at: Timestamp,
}
