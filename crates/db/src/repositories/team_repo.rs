//! Repository for the `teams` and `season_teams` tables.
//!
//! Teams are resolved by the external mapper first and by the
//! `(sport, slug)` natural key second; both paths end up here.

use sqlx::PgPool;

use penca_core::types::DbId;

use crate::models::team::{Team, TeamUpsert};

/// Column list for `teams` queries.
const COLUMNS: &str = "\
    id, sport, slug, name, short_name, logo_url, country, \
    created_at, updated_at";

/// Provides CRUD operations for teams.
pub struct TeamRepo;

impl TeamRepo {
    /// Find a team by its id.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Team>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM teams WHERE id = $1");
        sqlx::query_as::<_, Team>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a team by its `(sport, slug)` natural key.
    pub async fn find_by_natural_key(
        pool: &PgPool,
        sport: &str,
        slug: &str,
    ) -> Result<Option<Team>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM teams WHERE sport = $1 AND slug = $2");
        sqlx::query_as::<_, Team>(&query)
            .bind(sport)
            .bind(slug)
            .fetch_optional(pool)
            .await
    }

    /// Create a new team.
    pub async fn create(pool: &PgPool, input: &TeamUpsert) -> Result<Team, sqlx::Error> {
        let query = format!(
            "INSERT INTO teams (sport, slug, name, short_name, logo_url, country) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Team>(&query)
            .bind(&input.sport)
            .bind(&input.slug)
            .bind(&input.name)
            .bind(&input.short_name)
            .bind(&input.logo_url)
            .bind(&input.country)
            .fetch_one(pool)
            .await
    }

    /// Refresh display fields on an existing team. Runs on every sync so
    /// upstream renames and logo changes propagate.
    pub async fn update_display(
        pool: &PgPool,
        id: DbId,
        input: &TeamUpsert,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE teams \
             SET name = $2, short_name = $3, logo_url = $4, country = $5, \
                 updated_at = NOW() \
             WHERE id = $1",
        )
        .bind(id)
        .bind(&input.name)
        .bind(&input.short_name)
        .bind(&input.logo_url)
        .bind(&input.country)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Ensure a team is linked to a season. Idempotent: the link is
    /// created if missing and left alone otherwise.
    pub async fn ensure_season_link(
        pool: &PgPool,
        season_id: DbId,
        team_id: DbId,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO season_teams (season_id, team_id) \
             VALUES ($1, $2) \
             ON CONFLICT (season_id, team_id) DO NOTHING",
        )
        .bind(season_id)
        .bind(team_id)
        .execute(pool)
        .await?;
        Ok(())
    }
}
