//! Worker configuration from environment variables.
//!
//! Parsing is split into pure helpers taking the raw values so the
//! fallback logic is testable without touching the process environment.

use penca_core::retention::{
    DEFAULT_AUDIT_LOG_RETENTION_DAYS, DEFAULT_INVITATION_RETENTION_DAYS,
    DEFAULT_TOKEN_RETENTION_DAYS,
};
use penca_core::types::DbId;
use penca_provider::ProviderKind;

use crate::error::JobError;

/// A season the scheduler keeps in sync automatically. Absent unless all
/// three `SYNC_*` variables are configured.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncTarget {
    pub season_id: DbId,
    pub competition_external_id: String,
    pub year: i32,
}

/// Retention defaults, overridable per tenant via `retention_policies`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetentionConfig {
    pub invitation_days: i64,
    pub audit_log_days: i64,
    pub token_days: i64,
}

/// Everything the worker reads from the environment besides
/// `DATABASE_URL`.
#[derive(Debug, Clone)]
pub struct WorkerConfig {
    pub provider_kind: ProviderKind,
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub sync_target: Option<SyncTarget>,
    pub retention: RetentionConfig,
}

impl WorkerConfig {
    /// Read configuration from the process environment.
    ///
    /// An unknown `SPORTS_PROVIDER` value fails here, at startup.
    pub fn from_env() -> Result<Self, JobError> {
        let provider_name = std::env::var("SPORTS_PROVIDER").unwrap_or_else(|_| "mock".into());
        let provider_kind = parse_provider(&provider_name)?;

        Ok(Self {
            provider_kind,
            api_key: std::env::var("SPORTS_API_KEY").ok(),
            base_url: std::env::var("SPORTS_API_BASE_URL").ok(),
            sync_target: parse_sync_target(
                std::env::var("SYNC_SEASON_ID").ok().as_deref(),
                std::env::var("SYNC_COMPETITION_EXTERNAL_ID").ok().as_deref(),
                std::env::var("SYNC_YEAR").ok().as_deref(),
            ),
            retention: RetentionConfig {
                invitation_days: parse_days(
                    std::env::var("INVITATION_RETENTION_DAYS").ok().as_deref(),
                    DEFAULT_INVITATION_RETENTION_DAYS,
                ),
                audit_log_days: parse_days(
                    std::env::var("AUDIT_LOG_RETENTION_DAYS").ok().as_deref(),
                    DEFAULT_AUDIT_LOG_RETENTION_DAYS,
                ),
                token_days: parse_days(
                    std::env::var("TOKEN_RETENTION_DAYS").ok().as_deref(),
                    DEFAULT_TOKEN_RETENTION_DAYS,
                ),
            },
        })
    }
}

/// Parse a provider name, mapping unknown names to a config error.
pub fn parse_provider(name: &str) -> Result<ProviderKind, JobError> {
    ProviderKind::from_str(name).map_err(|e| JobError::Config(e.to_string()))
}

/// Parse a retention override, falling back to the default on absence or
/// a non-numeric value.
pub fn parse_days(raw: Option<&str>, default: i64) -> i64 {
    raw.and_then(|v| v.parse().ok()).unwrap_or(default)
}

/// Assemble the scheduler's sync target. All three values must be
/// present and well-formed; otherwise the scheduled sync is disabled.
pub fn parse_sync_target(
    season_id: Option<&str>,
    competition_external_id: Option<&str>,
    year: Option<&str>,
) -> Option<SyncTarget> {
    let season_id: DbId = season_id?.parse().ok()?;
    let competition_external_id = competition_external_id?.to_string();
    let year: i32 = year?.parse().ok()?;
    Some(SyncTarget {
        season_id,
        competition_external_id,
        year,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    // -- parse_provider -------------------------------------------------------

    #[test]
    fn known_providers_parse() {
        assert_eq!(parse_provider("mock").unwrap(), ProviderKind::Mock);
        assert_eq!(
            parse_provider("api-football").unwrap(),
            ProviderKind::ApiFootball
        );
    }

    #[test]
    fn unknown_provider_is_a_config_error() {
        assert_matches!(parse_provider("sportmonks"), Err(JobError::Config(_)));
    }

    // -- parse_days -----------------------------------------------------------

    #[test]
    fn days_override_parses() {
        assert_eq!(parse_days(Some("14"), 30), 14);
    }

    #[test]
    fn days_absent_uses_default() {
        assert_eq!(parse_days(None, 30), 30);
    }

    #[test]
    fn days_garbage_uses_default() {
        assert_eq!(parse_days(Some("soon"), 30), 30);
        assert_eq!(parse_days(Some(""), 7), 7);
    }

    // -- parse_sync_target ----------------------------------------------------

    #[test]
    fn complete_sync_target_parses() {
        let target = parse_sync_target(Some("3"), Some("liga-mx"), Some("2026")).unwrap();
        assert_eq!(target.season_id, 3);
        assert_eq!(target.competition_external_id, "liga-mx");
        assert_eq!(target.year, 2026);
    }

    #[test]
    fn partial_sync_target_disables_sync() {
        assert_eq!(parse_sync_target(Some("3"), None, Some("2026")), None);
        assert_eq!(parse_sync_target(None, None, None), None);
    }

    #[test]
    fn malformed_sync_target_disables_sync() {
        assert_eq!(parse_sync_target(Some("x"), Some("l"), Some("2026")), None);
        assert_eq!(parse_sync_target(Some("3"), Some("l"), Some("soon")), None);
    }
}
