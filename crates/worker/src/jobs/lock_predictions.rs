//! Prediction locking at kickoff.
//!
//! State machine on the match row: `SCHEDULED --(now >= kickoff)-->
//! LIVE, locked = true`. The job polls on a short interval, so a match
//! can stay editable for up to one interval past kickoff -- an accepted
//! staleness window inherent to polling, bounded by the scheduler's
//! one-minute cadence.

use serde::Serialize;
use sqlx::PgPool;

use penca_core::types::Timestamp;
use penca_db::repositories::MatchRepo;

use crate::error::JobError;

/// Result of one locking run.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct LockReport {
    pub locked_count: u64,
}

/// Lock every scheduled match whose kickoff has passed.
///
/// Idempotent: already-locked matches never match the selection, and the
/// per-match update is guarded, so repeated or overlapping runs are safe.
pub async fn run(pool: &PgPool, now: Timestamp) -> Result<LockReport, JobError> {
    let lockable = MatchRepo::find_lockable(pool, now).await?;
    let mut locked_count = 0u64;

    for m in &lockable {
        match MatchRepo::lock_at_kickoff(pool, m.id).await {
            Ok(true) => {
                locked_count += 1;
                tracing::debug!(match_id = m.id, kickoff_at = %m.kickoff_at, "Match locked");
            }
            // Another run (or a sync) already moved this match.
            Ok(false) => {}
            Err(e) => {
                tracing::error!(match_id = m.id, error = %e, "Failed to lock match");
            }
        }
    }

    if locked_count > 0 {
        tracing::info!(locked_count, "Prediction lock run complete");
    }
    Ok(LockReport { locked_count })
}
