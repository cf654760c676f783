//! Repository for the `matches` table.
//!
//! All pipeline mutations are either an upsert on the natural key or a
//! guarded conditional update, so repeated job runs are safe.

use sqlx::PgPool;

use penca_core::status::{
    STATUS_CANCELLED, STATUS_FINISHED, STATUS_LIVE, STATUS_POSTPONED, STATUS_SCHEDULED,
};
use penca_core::types::{DbId, Timestamp};

use crate::models::matches::{LockableMatch, Match, MatchUpsert, ScorableMatch};

/// Column list for `matches` queries.
const COLUMNS: &str = "\
    id, season_id, round, matchday, home_team_id, away_team_id, \
    kickoff_at, venue, status, home_score, away_score, locked, \
    finished_at, created_at, updated_at";

/// Provides CRUD operations for matches.
pub struct MatchRepo;

impl MatchRepo {
    /// Upsert a match by its `(season, round, home, away)` natural key.
    ///
    /// On conflict the identity columns stay put and the volatile fields
    /// (kickoff, venue, status, scores, locked, finished_at) are
    /// refreshed, with one-directional guards:
    /// - `status` never leaves a terminal state and never regresses from
    ///   LIVE to SCHEDULED, so a provider hiccup (or an unknown upstream
    ///   code defaulting to SCHEDULED) cannot reopen a finished match
    /// - `home_score`/`away_score` keep the stored values when the
    ///   incoming row carries NULLs
    /// - `locked` only ever moves from false to true
    pub async fn upsert(pool: &PgPool, input: &MatchUpsert) -> Result<Match, sqlx::Error> {
        let query = Self::upsert_sql();
        sqlx::query_as::<_, Match>(&query)
            .bind(input.season_id)
            .bind(input.round)
            .bind(input.matchday)
            .bind(input.home_team_id)
            .bind(input.away_team_id)
            .bind(input.kickoff_at)
            .bind(&input.venue)
            .bind(&input.status)
            .bind(input.home_score)
            .bind(input.away_score)
            .bind(input.locked)
            .bind(input.finished_at)
            .fetch_one(pool)
            .await
    }

    /// Assembled separately so the conflict-branch guards are testable.
    fn upsert_sql() -> String {
        format!(
            "INSERT INTO matches \
                 (season_id, round, matchday, home_team_id, away_team_id, \
                  kickoff_at, venue, status, home_score, away_score, locked, finished_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12) \
             ON CONFLICT (season_id, round, home_team_id, away_team_id) DO UPDATE \
             SET matchday = EXCLUDED.matchday, \
                 kickoff_at = EXCLUDED.kickoff_at, \
                 venue = EXCLUDED.venue, \
                 status = CASE \
                     WHEN matches.status IN \
                         ('{STATUS_FINISHED}', '{STATUS_POSTPONED}', '{STATUS_CANCELLED}') \
                         THEN matches.status \
                     WHEN matches.status = '{STATUS_LIVE}' \
                         AND EXCLUDED.status = '{STATUS_SCHEDULED}' \
                         THEN matches.status \
                     ELSE EXCLUDED.status \
                 END, \
                 home_score = COALESCE(EXCLUDED.home_score, matches.home_score), \
                 away_score = COALESCE(EXCLUDED.away_score, matches.away_score), \
                 locked = matches.locked OR EXCLUDED.locked, \
                 finished_at = COALESCE(matches.finished_at, EXCLUDED.finished_at), \
                 updated_at = NOW() \
             RETURNING {COLUMNS}"
        )
    }

    /// Scheduled, unlocked matches whose kickoff time has passed.
    pub async fn find_lockable(
        pool: &PgPool,
        now: Timestamp,
    ) -> Result<Vec<LockableMatch>, sqlx::Error> {
        sqlx::query_as::<_, LockableMatch>(
            "SELECT id, kickoff_at FROM matches \
             WHERE status = $1 AND locked = FALSE AND kickoff_at <= $2 \
             ORDER BY kickoff_at ASC",
        )
        .bind(STATUS_SCHEDULED)
        .bind(now)
        .fetch_all(pool)
        .await
    }

    /// Lock one match at kickoff: `SCHEDULED -> LIVE, locked = true`.
    ///
    /// Guarded so a concurrent run (or a sync that already moved the
    /// match) makes this a no-op. Returns `true` if the row changed.
    pub async fn lock_at_kickoff(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE matches \
             SET locked = TRUE, status = $2, updated_at = NOW() \
             WHERE id = $1 AND locked = FALSE AND status = $3",
        )
        .bind(id)
        .bind(STATUS_LIVE)
        .bind(STATUS_SCHEDULED)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Finished matches inside the trailing window that still have at
    /// least one unscored prediction.
    ///
    /// The window bounds query cost; matches that slip past it are picked
    /// up by the wide-window reconciliation pass.
    pub async fn find_scorable(
        pool: &PgPool,
        now: Timestamp,
        window_days: i64,
    ) -> Result<Vec<ScorableMatch>, sqlx::Error> {
        let cutoff = now - chrono::Duration::days(window_days);
        sqlx::query_as::<_, ScorableMatch>(
            "SELECT m.id, m.home_score, m.away_score \
             FROM matches m \
             WHERE m.status = $1 \
               AND m.home_score IS NOT NULL \
               AND m.away_score IS NOT NULL \
               AND m.kickoff_at >= $2 \
               AND EXISTS ( \
                   SELECT 1 FROM predictions p \
                   WHERE p.match_id = m.id AND p.scored_at IS NULL \
               ) \
             ORDER BY m.kickoff_at ASC",
        )
        .bind(STATUS_FINISHED)
        .bind(cutoff)
        .fetch_all(pool)
        .await
    }

    /// Count a season's pending matches (scheduled or live).
    pub async fn count_pending(pool: &PgPool, season_id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM matches \
             WHERE season_id = $1 AND status IN ($2, $3)",
        )
        .bind(season_id)
        .bind(STATUS_SCHEDULED)
        .bind(STATUS_LIVE)
        .fetch_one(pool)
        .await
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // -- upsert conflict guards -----------------------------------------------

    #[test]
    fn upsert_never_regresses_a_terminal_status() {
        // A re-sync reporting SCHEDULED (e.g. an unknown upstream short
        // code mapped to the default) must not reopen a settled match.
        let sql = MatchRepo::upsert_sql();
        let guard = format!(
            "WHEN matches.status IN \
                         ('{STATUS_FINISHED}', '{STATUS_POSTPONED}', '{STATUS_CANCELLED}') \
                         THEN matches.status"
        );
        assert!(sql.contains(&guard), "terminal statuses must keep the stored status");
        assert!(!sql.contains("status = EXCLUDED.status,"));
    }

    #[test]
    fn upsert_never_regresses_live_to_scheduled() {
        let sql = MatchRepo::upsert_sql();
        let guard = format!(
            "WHEN matches.status = '{STATUS_LIVE}' \
                         AND EXCLUDED.status = '{STATUS_SCHEDULED}' \
                         THEN matches.status"
        );
        assert!(sql.contains(&guard));
    }

    #[test]
    fn upsert_keeps_stored_scores_when_incoming_is_null() {
        // Non-finished wire payloads carry NULL goals; those must not
        // wipe a recorded final score.
        let sql = MatchRepo::upsert_sql();
        assert!(sql.contains("home_score = COALESCE(EXCLUDED.home_score, matches.home_score)"));
        assert!(sql.contains("away_score = COALESCE(EXCLUDED.away_score, matches.away_score)"));
    }

    #[test]
    fn upsert_only_ever_locks() {
        let sql = MatchRepo::upsert_sql();
        assert!(sql.contains("locked = matches.locked OR EXCLUDED.locked"));
    }
}
