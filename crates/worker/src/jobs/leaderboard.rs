//! Leaderboard snapshot builder.
//!
//! Aggregates each pool's predictions into ranked standings (the
//! deterministic tie-break lives in `penca_core::ranking`) and persists
//! one immutable snapshot per pool. A failure on one pool is logged and
//! the remaining pools still process.

use serde::Serialize;
use sqlx::PgPool;

use penca_core::ranking::{aggregate_standings, PredictionEntry};
use penca_core::types::{DbId, Timestamp};
use penca_db::models::pool::Pool;
use penca_db::repositories::{LeaderboardRepo, MatchRepo, PoolRepo};

use crate::error::JobError;

/// Result of one snapshot run.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct LeaderboardReport {
    pub snapshots_created: u32,
}

/// Build snapshots for all active pools, or one pool when specified.
///
/// A named pool that does not exist is a run-level error; per-pool
/// failures inside the all-pools sweep are not.
pub async fn run(
    pool: &PgPool,
    pool_id: Option<DbId>,
    now: Timestamp,
) -> Result<LeaderboardReport, JobError> {
    let pools = match pool_id {
        Some(id) => vec![PoolRepo::find_by_id(pool, id)
            .await?
            .ok_or(JobError::NotFound {
                entity: "pool",
                id,
            })?],
        None => PoolRepo::find_active(pool).await?,
    };

    let mut snapshots_created = 0u32;
    for p in &pools {
        match snapshot_pool(pool, p, now).await {
            Ok(()) => snapshots_created += 1,
            Err(e) => {
                tracing::error!(pool_id = p.id, error = %e, "Failed to build leaderboard snapshot");
            }
        }
    }

    tracing::info!(snapshots_created, "Leaderboard run complete");
    Ok(LeaderboardReport { snapshots_created })
}

/// Build and persist one pool's snapshot.
async fn snapshot_pool(pool: &PgPool, p: &Pool, now: Timestamp) -> Result<(), sqlx::Error> {
    let rows = LeaderboardRepo::load_standing_rows(pool, p.id).await?;

    let entries: Vec<PredictionEntry> = rows
        .iter()
        .map(|row| PredictionEntry {
            user_id: row.user_id,
            display_name: row.display_name.clone(),
            awarded_points: row.awarded_points,
            is_exact: row.is_exact,
            scored: row.scored_at.is_some(),
        })
        .collect();

    let standings = aggregate_standings(&entries);
    let pending = MatchRepo::count_pending(pool, p.season_id).await?;

    LeaderboardRepo::insert_snapshot(pool, p.id, &standings, pending as i32, now).await?;
    tracing::debug!(
        pool_id = p.id,
        players = standings.len(),
        pending_matches = pending,
        "Snapshot written",
    );
    Ok(())
}
