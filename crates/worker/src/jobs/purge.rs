//! Retention purges for invitations, audit logs, and tokens.
//!
//! Each purge is one tenant-aware DELETE; per-tenant `retention_policies`
//! rows override the configured default window inside the statement.

use serde::Serialize;
use sqlx::PgPool;

use penca_core::types::Timestamp;
use penca_db::repositories::MaintenanceRepo;

use crate::config::RetentionConfig;
use crate::error::JobError;

/// Result of one purge run.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct PurgeReport {
    pub purged_count: u64,
}

/// Delete expired pool invitations.
pub async fn run_invitations(
    pool: &PgPool,
    now: Timestamp,
    retention: &RetentionConfig,
) -> Result<PurgeReport, JobError> {
    let purged_count =
        MaintenanceRepo::purge_invitations(pool, now, retention.invitation_days).await?;
    log_result("invitations", purged_count);
    Ok(PurgeReport { purged_count })
}

/// Delete expired admin audit log rows.
pub async fn run_audit_logs(
    pool: &PgPool,
    now: Timestamp,
    retention: &RetentionConfig,
) -> Result<PurgeReport, JobError> {
    let purged_count =
        MaintenanceRepo::purge_audit_logs(pool, now, retention.audit_log_days).await?;
    log_result("audit_logs", purged_count);
    Ok(PurgeReport { purged_count })
}

/// Delete long-expired tokens.
pub async fn run_tokens(
    pool: &PgPool,
    now: Timestamp,
    retention: &RetentionConfig,
) -> Result<PurgeReport, JobError> {
    let purged_count = MaintenanceRepo::purge_tokens(pool, now, retention.token_days).await?;
    log_result("tokens", purged_count);
    Ok(PurgeReport { purged_count })
}

fn log_result(target: &str, purged: u64) {
    if purged > 0 {
        tracing::info!(target, purged, "Retention purge complete");
    } else {
        tracing::debug!(target, "Retention purge: nothing to remove");
    }
}
