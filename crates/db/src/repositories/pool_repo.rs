//! Repository for the `pools` table. Read-only to the pipeline.

use sqlx::PgPool;

use penca_core::types::DbId;

use crate::models::pool::Pool;

/// Column list for `pools` queries.
const COLUMNS: &str = "id, tenant_id, season_id, name, rule_set, is_active, created_at";

/// Read access to prediction pools.
pub struct PoolRepo;

impl PoolRepo {
    /// Find a pool by its id.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Pool>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM pools WHERE id = $1");
        sqlx::query_as::<_, Pool>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// All active pools, in id order.
    pub async fn find_active(pool: &PgPool) -> Result<Vec<Pool>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM pools WHERE is_active ORDER BY id");
        sqlx::query_as::<_, Pool>(&query).fetch_all(pool).await
    }

    /// Load the pools (by id) that have predictions on a given match.
    pub async fn find_by_match(pool: &PgPool, match_id: DbId) -> Result<Vec<Pool>, sqlx::Error> {
        let query = format!(
            "SELECT DISTINCT p.id, p.tenant_id, p.season_id, p.name, p.rule_set, \
                    p.is_active, p.created_at \
             FROM pools p \
             JOIN predictions pr ON pr.pool_id = p.id \
             WHERE pr.match_id = $1 \
             ORDER BY p.id"
        );
        sqlx::query_as::<_, Pool>(&query)
            .bind(match_id)
            .fetch_all(pool)
            .await
    }
}
