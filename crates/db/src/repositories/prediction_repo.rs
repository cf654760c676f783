//! Repository for the `predictions` table.

use sqlx::PgPool;

use penca_core::types::{DbId, Timestamp};

use crate::models::prediction::Prediction;

/// Column list for `predictions` queries.
const COLUMNS: &str = "\
    id, pool_id, match_id, user_id, home_score, away_score, \
    awarded_points, is_exact, scored_at, created_at, updated_at";

/// Provides scoring operations on predictions.
pub struct PredictionRepo;

impl PredictionRepo {
    /// All unscored predictions of one match, across every pool.
    pub async fn find_unscored_by_match(
        pool: &PgPool,
        match_id: DbId,
    ) -> Result<Vec<Prediction>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM predictions \
             WHERE match_id = $1 AND scored_at IS NULL \
             ORDER BY id"
        );
        sqlx::query_as::<_, Prediction>(&query)
            .bind(match_id)
            .fetch_all(pool)
            .await
    }

    /// Write one prediction's score.
    ///
    /// Guarded on `scored_at IS NULL` so a prediction is scored exactly
    /// once; returns `false` when another run got there first.
    pub async fn apply_score(
        pool: &PgPool,
        id: DbId,
        points: i32,
        is_exact: bool,
        scored_at: Timestamp,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE predictions \
             SET awarded_points = $2, is_exact = $3, scored_at = $4, \
                 updated_at = NOW() \
             WHERE id = $1 AND scored_at IS NULL",
        )
        .bind(id)
        .bind(points)
        .bind(is_exact)
        .bind(scored_at)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
