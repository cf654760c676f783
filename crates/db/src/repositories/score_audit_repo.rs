//! Repository for the `score_audits` table. Insert-only.

use sqlx::PgPool;

use penca_core::scoring::RuleSet;
use penca_core::types::{DbId, Timestamp};

use crate::models::audit::ScoreAudit;

/// Column list for `score_audits` queries.
const COLUMNS: &str = "id, pool_id, rule_set, matches_scored, predictions_scored, run_at";

/// Append-only audit records, one per pool per scoring run.
pub struct ScoreAuditRepo;

impl ScoreAuditRepo {
    /// Record one pool's scoring run.
    pub async fn insert(
        pool: &PgPool,
        pool_id: DbId,
        rules: &RuleSet,
        matches_scored: i32,
        predictions_scored: i32,
        run_at: Timestamp,
    ) -> Result<ScoreAudit, sqlx::Error> {
        let rule_json = serde_json::to_value(rules)
            .map_err(|e| sqlx::Error::Encode(Box::new(e)))?;
        let query = format!(
            "INSERT INTO score_audits \
                 (pool_id, rule_set, matches_scored, predictions_scored, run_at) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ScoreAudit>(&query)
            .bind(pool_id)
            .bind(rule_json)
            .bind(matches_scored)
            .bind(predictions_scored)
            .bind(run_at)
            .fetch_one(pool)
            .await
    }
}
