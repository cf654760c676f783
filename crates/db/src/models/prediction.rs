//! Prediction rows.

use serde::Serialize;
use sqlx::FromRow;

use penca_core::types::{DbId, Timestamp};

/// A row from the `predictions` table.
///
/// `scored_at` is NULL until the scorer processes the prediction; a
/// legitimately awarded zero therefore stays distinguishable from
/// "not yet scored".
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Prediction {
    pub id: DbId,
    pub pool_id: DbId,
    pub match_id: DbId,
    pub user_id: DbId,
    pub home_score: i32,
    pub away_score: i32,
    pub awarded_points: i32,
    pub is_exact: bool,
    pub scored_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
