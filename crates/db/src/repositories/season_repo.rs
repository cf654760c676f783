//! Repository for the `seasons` table.

use sqlx::PgPool;

use penca_core::types::DbId;

use crate::models::season::SeasonWithCompetition;

/// Read-only season access for the sync jobs.
pub struct SeasonRepo;

impl SeasonRepo {
    /// Find a season by id, joined with its competition for sport context.
    pub async fn find_with_competition(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<SeasonWithCompetition>, sqlx::Error> {
        sqlx::query_as::<_, SeasonWithCompetition>(
            "SELECT s.id, s.competition_id, s.name, s.year, s.starts_at, s.ends_at, \
                    c.sport, c.name AS competition_name \
             FROM seasons s \
             JOIN competitions c ON c.id = s.competition_id \
             WHERE s.id = $1",
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }
}
