//! Fixed-interval job scheduler.
//!
//! One loop per job, each on its own cadence, all driven by
//! `tokio::time::interval` and a shared `CancellationToken`. A failing
//! tick is logged and absorbed; the process only stops on cancellation.
//! There is no cross-job coordination and no exactly-once guarantee
//! across multiple worker instances -- every write underneath is an
//! idempotent upsert or guarded update, which is what makes overlapping
//! ticks safe.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use sqlx::PgPool;
use tokio_util::sync::CancellationToken;

use penca_provider::cache::ResponseCache;
use penca_provider::SportsProvider;

use crate::config::{SyncTarget, WorkerConfig};
use crate::jobs::sync_fixtures::SyncArgs;
use crate::jobs::{leaderboard, lock_predictions, purge, score_final, sync_fixtures};

/// Prediction locker cadence. Bounds the post-kickoff editability window.
const LOCK_INTERVAL: Duration = Duration::from_secs(60);

/// Scorer cadence (short window).
const SCORE_INTERVAL: Duration = Duration::from_secs(5 * 60);

/// Leaderboard snapshot cadence.
const LEADERBOARD_INTERVAL: Duration = Duration::from_secs(10 * 60);

/// Fixture sync cadence, when a sync target is configured.
const SYNC_INTERVAL: Duration = Duration::from_secs(15 * 60);

/// Wide-window scoring reconciliation and retention purge cadence.
const DAILY_INTERVAL: Duration = Duration::from_secs(24 * 60 * 60);

/// Provider cache sweep cadence.
const CACHE_SWEEP_INTERVAL: Duration = Duration::from_secs(10 * 60);

/// Everything the scheduler's loops need.
pub struct SchedulerDeps {
    pub pool: PgPool,
    pub provider: Arc<dyn SportsProvider>,
    pub cache: Arc<ResponseCache>,
    pub config: WorkerConfig,
}

/// Run all job loops until the cancellation token is triggered.
pub async fn run(deps: SchedulerDeps, cancel: CancellationToken) {
    tracing::info!(
        provider = deps.provider.name(),
        sync_configured = deps.config.sync_target.is_some(),
        "Scheduler starting",
    );

    let mut handles = Vec::new();

    handles.push(tokio::spawn(lock_loop(deps.pool.clone(), cancel.clone())));
    handles.push(tokio::spawn(score_loop(deps.pool.clone(), cancel.clone())));
    handles.push(tokio::spawn(reconcile_loop(
        deps.pool.clone(),
        cancel.clone(),
    )));
    handles.push(tokio::spawn(leaderboard_loop(
        deps.pool.clone(),
        cancel.clone(),
    )));
    handles.push(tokio::spawn(purge_loop(
        deps.pool.clone(),
        deps.config.clone(),
        cancel.clone(),
    )));
    handles.push(tokio::spawn(sweep_loop(deps.cache.clone(), cancel.clone())));

    match deps.config.sync_target.clone() {
        Some(target) => {
            handles.push(tokio::spawn(sync_loop(
                deps.pool.clone(),
                deps.provider.clone(),
                target,
                cancel.clone(),
            )));
        }
        None => {
            tracing::info!(
                "No SYNC_SEASON_ID/SYNC_COMPETITION_EXTERNAL_ID/SYNC_YEAR configured; \
                 scheduled fixture sync disabled (use `run sync-fixtures` manually)"
            );
        }
    }

    for handle in handles {
        let _ = handle.await;
    }
    tracing::info!("Scheduler stopped");
}

async fn lock_loop(pool: PgPool, cancel: CancellationToken) {
    let mut ticker = tokio::time::interval(LOCK_INTERVAL);
    loop {
        tokio::select! {
            _ = cancel.cancelled() => break,
            _ = ticker.tick() => {
                if let Err(e) = lock_predictions::run(&pool, Utc::now()).await {
                    tracing::error!(error = %e, "Prediction lock tick failed");
                }
            }
        }
    }
}

async fn score_loop(pool: PgPool, cancel: CancellationToken) {
    let mut ticker = tokio::time::interval(SCORE_INTERVAL);
    loop {
        tokio::select! {
            _ = cancel.cancelled() => break,
            _ = ticker.tick() => {
                if let Err(e) =
                    score_final::run(&pool, Utc::now(), score_final::DEFAULT_WINDOW_DAYS).await
                {
                    tracing::error!(error = %e, "Scoring tick failed");
                }
            }
        }
    }
}

/// Daily wide-window pass: matches that slipped past the short scoring
/// window are not silently lost.
async fn reconcile_loop(pool: PgPool, cancel: CancellationToken) {
    let mut ticker = tokio::time::interval(DAILY_INTERVAL);
    loop {
        tokio::select! {
            _ = cancel.cancelled() => break,
            _ = ticker.tick() => {
                if let Err(e) =
                    score_final::run(&pool, Utc::now(), score_final::RECONCILE_WINDOW_DAYS).await
                {
                    tracing::error!(error = %e, "Scoring reconciliation tick failed");
                }
            }
        }
    }
}

async fn leaderboard_loop(pool: PgPool, cancel: CancellationToken) {
    let mut ticker = tokio::time::interval(LEADERBOARD_INTERVAL);
    loop {
        tokio::select! {
            _ = cancel.cancelled() => break,
            _ = ticker.tick() => {
                if let Err(e) = leaderboard::run(&pool, None, Utc::now()).await {
                    tracing::error!(error = %e, "Leaderboard tick failed");
                }
            }
        }
    }
}

async fn purge_loop(pool: PgPool, config: WorkerConfig, cancel: CancellationToken) {
    let mut ticker = tokio::time::interval(DAILY_INTERVAL);
    loop {
        tokio::select! {
            _ = cancel.cancelled() => break,
            _ = ticker.tick() => {
                let now = Utc::now();
                if let Err(e) = purge::run_invitations(&pool, now, &config.retention).await {
                    tracing::error!(error = %e, "Invitation purge tick failed");
                }
                if let Err(e) = purge::run_audit_logs(&pool, now, &config.retention).await {
                    tracing::error!(error = %e, "Audit log purge tick failed");
                }
                if let Err(e) = purge::run_tokens(&pool, now, &config.retention).await {
                    tracing::error!(error = %e, "Token purge tick failed");
                }
            }
        }
    }
}

async fn sync_loop(
    pool: PgPool,
    provider: Arc<dyn SportsProvider>,
    target: SyncTarget,
    cancel: CancellationToken,
) {
    let args = SyncArgs {
        season_id: target.season_id,
        competition_external_id: target.competition_external_id,
        year: target.year,
    };
    let mut ticker = tokio::time::interval(SYNC_INTERVAL);
    loop {
        tokio::select! {
            _ = cancel.cancelled() => break,
            _ = ticker.tick() => {
                if let Err(e) =
                    sync_fixtures::run(&pool, provider.as_ref(), &args, Utc::now()).await
                {
                    tracing::error!(error = %e, "Fixture sync tick failed");
                }
            }
        }
    }
}

async fn sweep_loop(cache: Arc<ResponseCache>, cancel: CancellationToken) {
    let mut ticker = tokio::time::interval(CACHE_SWEEP_INTERVAL);
    loop {
        tokio::select! {
            _ = cancel.cancelled() => break,
            _ = ticker.tick() => {
                let removed = cache.sweep();
                if removed > 0 {
                    tracing::debug!(removed, "Provider cache sweep");
                }
            }
        }
    }
}
