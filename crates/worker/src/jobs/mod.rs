//! The pipeline's jobs.
//!
//! Every job takes its dependencies and an explicit `now` timestamp and
//! returns a serializable report. Per-item failures are logged and
//! counted; only run-level failures (missing season, exhausted provider,
//! batch query errors) abort an invocation.

pub mod leaderboard;
pub mod lock_predictions;
pub mod purge;
pub mod score_final;
pub mod sync_fixtures;
