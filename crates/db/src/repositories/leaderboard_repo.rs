//! Repository for the `leaderboard_snapshots` table and the aggregation
//! source query.

use sqlx::PgPool;

use penca_core::ranking::PlayerStanding;
use penca_core::types::{DbId, Timestamp};

use crate::models::leaderboard::{LeaderboardSnapshot, StandingSourceRow};

/// Column list for `leaderboard_snapshots` queries.
const COLUMNS: &str = "id, pool_id, entries, total_players, pending_matches, snapshot_at";

/// Snapshot persistence for the leaderboard builder.
pub struct LeaderboardRepo;

impl LeaderboardRepo {
    /// Load every prediction of a pool with the resolved display name.
    ///
    /// The registration display name takes precedence over the account
    /// name; the COALESCE happens in SQL so aggregation sees one name.
    pub async fn load_standing_rows(
        pool: &PgPool,
        pool_id: DbId,
    ) -> Result<Vec<StandingSourceRow>, sqlx::Error> {
        sqlx::query_as::<_, StandingSourceRow>(
            "SELECT p.user_id, \
                    COALESCE(r.display_name, u.display_name) AS display_name, \
                    p.awarded_points, p.is_exact, p.scored_at \
             FROM predictions p \
             JOIN users u ON u.id = p.user_id \
             LEFT JOIN registrations r \
                    ON r.pool_id = p.pool_id AND r.user_id = p.user_id \
             WHERE p.pool_id = $1 \
             ORDER BY p.id",
        )
        .bind(pool_id)
        .fetch_all(pool)
        .await
    }

    /// Persist one immutable snapshot with its ranked entries.
    pub async fn insert_snapshot(
        pool: &PgPool,
        pool_id: DbId,
        standings: &[PlayerStanding],
        pending_matches: i32,
        snapshot_at: Timestamp,
    ) -> Result<LeaderboardSnapshot, sqlx::Error> {
        let entries = serde_json::to_value(standings)
            .map_err(|e| sqlx::Error::Encode(Box::new(e)))?;
        let query = format!(
            "INSERT INTO leaderboard_snapshots \
                 (pool_id, entries, total_players, pending_matches, snapshot_at) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, LeaderboardSnapshot>(&query)
            .bind(pool_id)
            .bind(entries)
            .bind(standings.len() as i32)
            .bind(pending_matches)
            .bind(snapshot_at)
            .fetch_one(pool)
            .await
    }

    /// Latest snapshot for a pool, if any. Used by admin tooling.
    pub async fn find_latest(
        pool: &PgPool,
        pool_id: DbId,
    ) -> Result<Option<LeaderboardSnapshot>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM leaderboard_snapshots \
             WHERE pool_id = $1 \
             ORDER BY snapshot_at DESC \
             LIMIT 1"
        );
        sqlx::query_as::<_, LeaderboardSnapshot>(&query)
            .bind(pool_id)
            .fetch_optional(pool)
            .await
    }
}
