//! Retention purges for invitations, audit logs, and tokens.
//!
//! Each purge is a single DELETE. Per-tenant `retention_policies` rows
//! override the default window via `COALESCE` inside the statement, so a
//! tenant without a policy row falls back to the configured default.

use sqlx::PgPool;

use penca_core::types::Timestamp;

/// Bulk deletion of expired auxiliary rows.
pub struct MaintenanceRepo;

impl MaintenanceRepo {
    /// Delete invitations older than the tenant's window (or the default).
    /// Returns the number of rows removed.
    pub async fn purge_invitations(
        pool: &PgPool,
        now: Timestamp,
        default_days: i64,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "DELETE FROM invitations i \
             WHERE i.created_at < $1 - make_interval(days => COALESCE( \
                 (SELECT rp.invitation_days FROM retention_policies rp \
                  WHERE rp.tenant_id = i.tenant_id), $2))",
        )
        .bind(now)
        .bind(default_days as i32)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }

    /// Delete audit log rows older than the tenant's window (or the default).
    pub async fn purge_audit_logs(
        pool: &PgPool,
        now: Timestamp,
        default_days: i64,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "DELETE FROM audit_logs a \
             WHERE a.created_at < $1 - make_interval(days => COALESCE( \
                 (SELECT rp.audit_log_days FROM retention_policies rp \
                  WHERE rp.tenant_id = a.tenant_id), $2))",
        )
        .bind(now)
        .bind(default_days as i32)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }

    /// Delete tokens whose expiry fell outside the tenant's window (or
    /// the default). Keyed on `expires_at`, not `created_at`: a token is
    /// only purgeable once it has actually expired.
    pub async fn purge_tokens(
        pool: &PgPool,
        now: Timestamp,
        default_days: i64,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "DELETE FROM tokens t \
             WHERE t.expires_at < $1 - make_interval(days => COALESCE( \
                 (SELECT rp.token_days FROM retention_policies rp \
                  WHERE rp.tenant_id = t.tenant_id), $2))",
        )
        .bind(now)
        .bind(default_days as i32)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }
}
