//! Scoring audit rows -- append-only, one per pool per scoring run.

use serde::Serialize;
use sqlx::FromRow;

use penca_core::types::{DbId, Timestamp};

/// A row from `score_audits`. Never mutated after creation.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ScoreAudit {
    pub id: DbId,
    pub pool_id: DbId,
    /// Snapshot of the rule set the run used.
    pub rule_set: serde_json::Value,
    pub matches_scored: i32,
    pub predictions_scored: i32,
    pub run_at: Timestamp,
}
