//! Fixture synchronization.
//!
//! Pulls one season from the sports provider and upserts teams, matches,
//! season links, and external mappings. Team resolution is dual-path:
//! the external mapping first, the `(sport, slug)` natural key second,
//! creation last -- so repeated syncs never duplicate rows. Per-item
//! failures are counted and skipped; only a missing season or a provider
//! failure aborts the run.

use std::collections::HashMap;

use serde::Serialize;
use sqlx::PgPool;

use penca_core::status::MatchStatus;
use penca_core::types::{DbId, Timestamp};
use penca_db::models::external::{ENTITY_TYPE_MATCH, ENTITY_TYPE_SEASON, ENTITY_TYPE_TEAM};
use penca_db::models::matches::MatchUpsert;
use penca_db::models::team::TeamUpsert;
use penca_db::repositories::{ExternalRepo, MatchRepo, SeasonRepo, TeamRepo};
use penca_provider::dto::{FetchSeasonRequest, TeamDto};
use penca_provider::SportsProvider;

use crate::error::JobError;

/// Parameters for one sync run.
#[derive(Debug, Clone)]
pub struct SyncArgs {
    pub season_id: DbId,
    pub competition_external_id: String,
    pub year: i32,
}

/// Result of one sync run. `error_count` holds per-item failures
/// (unresolvable teams, failed match upserts); the run itself still
/// succeeds.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct SyncReport {
    pub season_id: DbId,
    pub synced_count: u32,
    pub error_count: u32,
    pub total_fixtures: u32,
    pub total_teams: u32,
}

/// Synchronize one season's teams and fixtures from the provider.
pub async fn run(
    pool: &PgPool,
    provider: &dyn SportsProvider,
    args: &SyncArgs,
    now: Timestamp,
) -> Result<SyncReport, JobError> {
    let season = SeasonRepo::find_with_competition(pool, args.season_id)
        .await?
        .ok_or(JobError::NotFound {
            entity: "season",
            id: args.season_id,
        })?;

    let source = ExternalRepo::upsert_source(pool, provider.name(), provider.name()).await?;

    let season_dto = provider
        .fetch_season(&FetchSeasonRequest {
            competition_external_id: args.competition_external_id.clone(),
            year: args.year,
        })
        .await?;

    ExternalRepo::upsert_mapping(
        pool,
        source.id,
        ENTITY_TYPE_SEASON,
        &season_dto.external_id,
        season.id,
    )
    .await?;

    // Teams: resolve-or-create, refresh display fields, link to season.
    let mut team_ids: HashMap<String, DbId> = HashMap::new();
    for team_dto in &season_dto.teams {
        match resolve_team(pool, source.id, &season.sport, team_dto).await {
            Ok(team_id) => {
                if let Err(e) = TeamRepo::ensure_season_link(pool, season.id, team_id).await {
                    tracing::error!(
                        team_id,
                        season_id = season.id,
                        error = %e,
                        "Failed to link team to season",
                    );
                }
                team_ids.insert(team_dto.external_id.clone(), team_id);
            }
            Err(e) => {
                tracing::error!(
                    external_id = %team_dto.external_id,
                    team = %team_dto.name,
                    error = %e,
                    "Failed to resolve team",
                );
            }
        }
    }

    let mut synced_count = 0u32;
    let mut error_count = 0u32;

    for match_dto in &season_dto.matches {
        let (home_id, away_id) = match (
            team_ids.get(&match_dto.home_team_external_id),
            team_ids.get(&match_dto.away_team_external_id),
        ) {
            (Some(h), Some(a)) => (*h, *a),
            _ => {
                tracing::warn!(
                    external_id = %match_dto.external_id,
                    home = %match_dto.home_team_external_id,
                    away = %match_dto.away_team_external_id,
                    "Skipping match with unresolvable team mapping",
                );
                error_count += 1;
                continue;
            }
        };

        let status = match_dto.status.0;
        let upsert = MatchUpsert {
            season_id: season.id,
            round: match_dto.round,
            matchday: match_dto.matchday,
            home_team_id: home_id,
            away_team_id: away_id,
            kickoff_at: match_dto.kickoff_at,
            venue: match_dto.venue.clone(),
            status: status.as_str().to_string(),
            home_score: match_dto.home_score,
            away_score: match_dto.away_score,
            // A match imported already live/finished must never be
            // editable by players.
            locked: status.requires_lock(),
            finished_at: (status == MatchStatus::Finished).then_some(now),
        };

        match MatchRepo::upsert(pool, &upsert).await {
            Ok(row) => {
                if let Err(e) = ExternalRepo::upsert_mapping(
                    pool,
                    source.id,
                    ENTITY_TYPE_MATCH,
                    &match_dto.external_id,
                    row.id,
                )
                .await
                {
                    tracing::error!(
                        match_id = row.id,
                        external_id = %match_dto.external_id,
                        error = %e,
                        "Failed to upsert match mapping",
                    );
                }
                synced_count += 1;
            }
            Err(e) => {
                tracing::error!(
                    external_id = %match_dto.external_id,
                    error = %e,
                    "Failed to upsert match",
                );
                error_count += 1;
            }
        }
    }

    let report = SyncReport {
        season_id: season.id,
        synced_count,
        error_count,
        total_fixtures: season_dto.matches.len() as u32,
        total_teams: season_dto.teams.len() as u32,
    };
    tracing::info!(
        season_id = report.season_id,
        synced = report.synced_count,
        errors = report.error_count,
        fixtures = report.total_fixtures,
        teams = report.total_teams,
        provider = provider.name(),
        "Fixture sync complete",
    );
    Ok(report)
}

/// Resolve a team to an internal id.
///
/// Resolution order: external mapping, then `(sport, slug)` natural key,
/// then creation. Display fields are refreshed on every path and the
/// mapping is (re-)registered, making the whole unit idempotent.
async fn resolve_team(
    pool: &PgPool,
    source_id: DbId,
    sport: &str,
    dto: &TeamDto,
) -> Result<DbId, sqlx::Error> {
    let upsert = TeamUpsert {
        sport: sport.to_string(),
        slug: dto.slug.clone(),
        name: dto.name.clone(),
        short_name: dto.short_name.clone(),
        logo_url: dto.logo_url.clone(),
        country: dto.country.clone(),
    };

    if let Some(team_id) =
        ExternalRepo::find_entity_id(pool, source_id, ENTITY_TYPE_TEAM, &dto.external_id).await?
    {
        TeamRepo::update_display(pool, team_id, &upsert).await?;
        return Ok(team_id);
    }

    let team_id = match TeamRepo::find_by_natural_key(pool, sport, &dto.slug).await? {
        Some(existing) => {
            TeamRepo::update_display(pool, existing.id, &upsert).await?;
            existing.id
        }
        None => TeamRepo::create(pool, &upsert).await?.id,
    };

    ExternalRepo::upsert_mapping(pool, source_id, ENTITY_TYPE_TEAM, &dto.external_id, team_id)
        .await?;
    Ok(team_id)
}
