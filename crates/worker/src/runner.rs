//! One-shot job execution for `penca-worker run <job> [args]`.
//!
//! Maps a job name to its implementation, parses the positional
//! arguments, and returns the job's report as JSON for the binary to
//! print. One-shot runs build their own provider and use a disabled
//! response cache; nothing is shared with a scheduler instance.

use std::sync::Arc;

use chrono::Utc;
use sqlx::PgPool;

use penca_provider::cache::ResponseCache;
use penca_provider::{build_provider, ProviderConfig};

use crate::config::{parse_provider, WorkerConfig};
use crate::error::JobError;
use crate::jobs::sync_fixtures::SyncArgs;
use crate::jobs::{leaderboard, lock_predictions, purge, score_final, sync_fixtures};

/// Closed set of jobs runnable from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobName {
    LockPredictions,
    SyncFixtures,
    ScoreFinal,
    LeaderboardSnapshot,
    PurgeInvitations,
    PurgeAuditLogs,
    PurgeTokens,
}

impl JobName {
    pub const ALL: [JobName; 7] = [
        JobName::LockPredictions,
        JobName::SyncFixtures,
        JobName::ScoreFinal,
        JobName::LeaderboardSnapshot,
        JobName::PurgeInvitations,
        JobName::PurgeAuditLogs,
        JobName::PurgeTokens,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LockPredictions => "lock-predictions",
            Self::SyncFixtures => "sync-fixtures",
            Self::ScoreFinal => "score-final",
            Self::LeaderboardSnapshot => "leaderboard-snapshot",
            Self::PurgeInvitations => "purge-invitations",
            Self::PurgeAuditLogs => "purge-audit-logs",
            Self::PurgeTokens => "purge-tokens",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|job| job.as_str() == s)
    }
}

/// Run one job to completion and return its report as JSON.
///
/// Argument shapes:
/// - `sync-fixtures <season-id> <competition-external-id> <year> [provider]`
/// - `score-final [window-days]`
/// - `leaderboard-snapshot [pool-id]`
/// - everything else takes no arguments
pub async fn run_job(
    pool: &PgPool,
    config: &WorkerConfig,
    name: JobName,
    args: &[String],
) -> Result<serde_json::Value, JobError> {
    let now = Utc::now();
    match name {
        JobName::LockPredictions => to_report(&lock_predictions::run(pool, now).await?),
        JobName::SyncFixtures => {
            let sync_args = parse_sync_args(args)?;
            let kind = match args.get(3) {
                Some(name) => parse_provider(name)?,
                None => config.provider_kind,
            };
            let provider = build_provider(
                kind,
                &ProviderConfig {
                    api_key: config.api_key.clone(),
                    base_url: config.base_url.clone(),
                    retry: Default::default(),
                },
                Arc::new(ResponseCache::disabled()),
            )?;
            to_report(&sync_fixtures::run(pool, provider.as_ref(), &sync_args, now).await?)
        }
        JobName::ScoreFinal => {
            let window_days = match args.first() {
                Some(raw) => parse_int(raw, "window-days")?,
                None => score_final::DEFAULT_WINDOW_DAYS,
            };
            to_report(&score_final::run(pool, now, window_days).await?)
        }
        JobName::LeaderboardSnapshot => {
            let pool_id = match args.first() {
                Some(raw) => Some(parse_int(raw, "pool-id")?),
                None => None,
            };
            to_report(&leaderboard::run(pool, pool_id, now).await?)
        }
        JobName::PurgeInvitations => {
            to_report(&purge::run_invitations(pool, now, &config.retention).await?)
        }
        JobName::PurgeAuditLogs => {
            to_report(&purge::run_audit_logs(pool, now, &config.retention).await?)
        }
        JobName::PurgeTokens => to_report(&purge::run_tokens(pool, now, &config.retention).await?),
    }
}

/// Parse `sync-fixtures` positionals. The optional trailing provider
/// name is handled by the caller.
pub fn parse_sync_args(args: &[String]) -> Result<SyncArgs, JobError> {
    let season_id = parse_int(require_arg(args, 0, "season-id")?, "season-id")?;
    let competition_external_id = require_arg(args, 1, "competition-external-id")?.to_string();
    let year = parse_int::<i32>(require_arg(args, 2, "year")?, "year")?;
    Ok(SyncArgs {
        season_id,
        competition_external_id,
        year,
    })
}

fn require_arg<'a>(args: &'a [String], idx: usize, name: &str) -> Result<&'a str, JobError> {
    args.get(idx)
        .map(String::as_str)
        .ok_or_else(|| JobError::Config(format!("Missing argument <{name}>")))
}

fn parse_int<T: std::str::FromStr>(raw: &str, name: &str) -> Result<T, JobError> {
    raw.parse()
        .map_err(|_| JobError::Config(format!("Invalid <{name}>: {raw}")))
}

fn to_report<T: serde::Serialize>(report: &T) -> Result<serde_json::Value, JobError> {
    serde_json::to_value(report).map_err(|e| JobError::Config(format!("Report encoding: {e}")))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn strings(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    // -- JobName --------------------------------------------------------------

    #[test]
    fn every_job_name_round_trips() {
        for job in JobName::ALL {
            assert_eq!(JobName::parse(job.as_str()), Some(job));
        }
    }

    #[test]
    fn unknown_job_name_is_rejected() {
        assert_eq!(JobName::parse("resync-everything"), None);
        assert_eq!(JobName::parse(""), None);
    }

    // -- parse_sync_args ------------------------------------------------------

    #[test]
    fn sync_args_parse() {
        let args = parse_sync_args(&strings(&["7", "liga-mx", "2026"])).unwrap();
        assert_eq!(args.season_id, 7);
        assert_eq!(args.competition_external_id, "liga-mx");
        assert_eq!(args.year, 2026);
    }

    #[test]
    fn sync_args_missing_positional_fails() {
        assert_matches!(
            parse_sync_args(&strings(&["7", "liga-mx"])),
            Err(JobError::Config(msg)) if msg.contains("year")
        );
        assert_matches!(parse_sync_args(&[]), Err(JobError::Config(_)));
    }

    #[test]
    fn sync_args_non_numeric_season_fails() {
        assert_matches!(
            parse_sync_args(&strings(&["apertura", "liga-mx", "2026"])),
            Err(JobError::Config(msg)) if msg.contains("season-id")
        );
    }

    // -- parse_int ------------------------------------------------------------

    #[test]
    fn int_parse_reports_the_argument_name() {
        assert_matches!(
            parse_int::<i64>("ten", "window-days"),
            Err(JobError::Config(msg)) if msg.contains("window-days")
        );
        assert_eq!(parse_int::<i64>("10", "window-days").unwrap(), 10);
    }
}
