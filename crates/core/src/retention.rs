//! Retention windows for the auxiliary purge jobs.
//!
//! Each purge target has a fixed default window; tenants may override it
//! with a `retention_policies` row, applied in SQL via `COALESCE`.

use crate::types::Timestamp;

/// Default retention for pending pool invitations, in days.
pub const DEFAULT_INVITATION_RETENTION_DAYS: i64 = 30;

/// Default retention for admin audit log rows, in days.
pub const DEFAULT_AUDIT_LOG_RETENTION_DAYS: i64 = 90;

/// Default retention for expired auth/verification tokens, in days.
pub const DEFAULT_TOKEN_RETENTION_DAYS: i64 = 7;

/// Compute the purge cutoff: rows older than this are deleted.
pub fn cutoff(now: Timestamp, days: i64) -> Timestamp {
    now - chrono::Duration::days(days)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn cutoff_subtracts_days() {
        let now = Utc.with_ymd_and_hms(2026, 3, 31, 12, 0, 0).unwrap();
        let cut = cutoff(now, 30);
        assert_eq!(cut, Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap());
    }

    #[test]
    fn zero_days_is_now() {
        let now = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(cutoff(now, 0), now);
    }

    #[test]
    fn defaults_are_positive() {
        assert!(DEFAULT_INVITATION_RETENTION_DAYS > 0);
        assert!(DEFAULT_AUDIT_LOG_RETENTION_DAYS > 0);
        assert!(DEFAULT_TOKEN_RETENTION_DAYS > 0);
    }
}
