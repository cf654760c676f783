//! Leaderboard snapshot rows and the aggregation input row.

use serde::Serialize;
use sqlx::FromRow;

use penca_core::types::{DbId, Timestamp};

/// A row from `leaderboard_snapshots`. Append-only; the latest row by
/// `snapshot_at` is the pool's current leaderboard.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct LeaderboardSnapshot {
    pub id: DbId,
    pub pool_id: DbId,
    /// Ranked `PlayerStanding` list serialized as JSONB.
    pub entries: serde_json::Value,
    pub total_players: i32,
    pub pending_matches: i32,
    pub snapshot_at: Timestamp,
}

/// One prediction row as loaded for aggregation, with the resolved
/// display name (registration override first, account name otherwise).
#[derive(Debug, Clone, FromRow)]
pub struct StandingSourceRow {
    pub user_id: DbId,
    pub display_name: String,
    pub awarded_points: i32,
    pub is_exact: bool,
    pub scored_at: Option<Timestamp>,
}
