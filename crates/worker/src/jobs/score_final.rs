//! Final-match scoring.
//!
//! Scores every unscored prediction of finished matches inside a
//! trailing kickoff window, against the owning pool's rule set. The
//! short window bounds query cost; the scheduler additionally runs a
//! daily wide-window pass so matches that slip past the short window
//! still get scored. One audit row is written per pool per run.

use std::collections::HashMap;

use serde::Serialize;
use sqlx::PgPool;

use penca_core::scoring::{score_prediction, RuleSet, Scoreline};
use penca_core::types::{DbId, Timestamp};
use penca_db::repositories::{MatchRepo, PoolRepo, PredictionRepo, ScoreAuditRepo};

use crate::error::JobError;

/// Trailing kickoff window for the frequent scoring pass, in days.
pub const DEFAULT_WINDOW_DAYS: i64 = 7;

/// Window for the daily reconciliation pass, in days.
pub const RECONCILE_WINDOW_DAYS: i64 = 90;

/// Result of one scoring run.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ScoreReport {
    /// Matches with at least one prediction scored this run.
    pub matches_scored: u32,
    pub predictions_scored: u32,
}

/// Per-pool counters for the audit rows.
#[derive(Default)]
struct PoolRunStats {
    matches: u32,
    predictions: u32,
}

/// Score all eligible predictions of finished matches.
pub async fn run(pool: &PgPool, now: Timestamp, window_days: i64) -> Result<ScoreReport, JobError> {
    let matches = MatchRepo::find_scorable(pool, now, window_days).await?;

    let mut rule_sets: HashMap<DbId, RuleSet> = HashMap::new();
    let mut pool_stats: HashMap<DbId, PoolRunStats> = HashMap::new();
    let mut matches_scored = 0u32;
    let mut predictions_scored = 0u32;

    for m in &matches {
        let actual = Scoreline::new(m.home_score, m.away_score);
        let predictions = match PredictionRepo::find_unscored_by_match(pool, m.id).await {
            Ok(rows) => rows,
            Err(e) => {
                tracing::error!(match_id = m.id, error = %e, "Failed to load predictions");
                continue;
            }
        };

        let mut scored_here = 0u32;
        let mut pools_touched_here: Vec<DbId> = Vec::new();

        for prediction in &predictions {
            let rules = match lookup_rules(pool, &mut rule_sets, prediction.pool_id).await {
                Some(rules) => rules,
                None => continue,
            };

            let outcome = score_prediction(
                Scoreline::new(prediction.home_score, prediction.away_score),
                actual,
                &rules,
            );

            match PredictionRepo::apply_score(
                pool,
                prediction.id,
                outcome.points,
                outcome.is_exact,
                now,
            )
            .await
            {
                Ok(true) => {
                    scored_here += 1;
                    let stats = pool_stats.entry(prediction.pool_id).or_default();
                    stats.predictions += 1;
                    if !pools_touched_here.contains(&prediction.pool_id) {
                        pools_touched_here.push(prediction.pool_id);
                    }
                }
                // Guarded update lost the race; another run scored it.
                Ok(false) => {}
                Err(e) => {
                    tracing::error!(
                        prediction_id = prediction.id,
                        match_id = m.id,
                        error = %e,
                        "Failed to apply score",
                    );
                }
            }
        }

        for pool_id in pools_touched_here {
            if let Some(stats) = pool_stats.get_mut(&pool_id) {
                stats.matches += 1;
            }
        }
        if scored_here > 0 {
            matches_scored += 1;
            predictions_scored += scored_here;
        }
    }

    // One audit row per pool touched; audit failures are independent of
    // scoring failures.
    for (pool_id, stats) in &pool_stats {
        let rules = rule_sets.get(pool_id).copied().unwrap_or_default();
        if let Err(e) = ScoreAuditRepo::insert(
            pool,
            *pool_id,
            &rules,
            stats.matches as i32,
            stats.predictions as i32,
            now,
        )
        .await
        {
            tracing::error!(pool_id, error = %e, "Failed to write score audit");
        }
    }

    let report = ScoreReport {
        matches_scored,
        predictions_scored,
    };
    if report.predictions_scored > 0 {
        tracing::info!(
            matches = report.matches_scored,
            predictions = report.predictions_scored,
            window_days,
            "Scoring run complete",
        );
    }
    Ok(report)
}

/// Fetch (and memoize) a pool's effective rule set. Returns `None` when
/// the pool row is missing or unreadable; the prediction is skipped.
async fn lookup_rules(
    pool: &PgPool,
    cache: &mut HashMap<DbId, RuleSet>,
    pool_id: DbId,
) -> Option<RuleSet> {
    if let Some(rules) = cache.get(&pool_id) {
        return Some(*rules);
    }
    match PoolRepo::find_by_id(pool, pool_id).await {
        Ok(Some(row)) => {
            let rules = row.effective_rule_set();
            cache.insert(pool_id, rules);
            Some(rules)
        }
        Ok(None) => {
            tracing::warn!(pool_id, "Prediction references a missing pool, skipping");
            None
        }
        Err(e) => {
            tracing::error!(pool_id, error = %e, "Failed to load pool");
            None
        }
    }
}
