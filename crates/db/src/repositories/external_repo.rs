//! Repository for `external_sources` and `external_maps`.
//!
//! The mapping table is the idempotency key for repeated syncs: a mapping
//! row is created once per external entity and its `entity_id` reference
//! is refreshed on every re-sync.

use sqlx::PgPool;

use penca_core::types::DbId;

use crate::models::external::{ExternalMap, ExternalSource};

/// Column list for `external_sources` queries.
const SOURCE_COLUMNS: &str = "id, slug, name, created_at";

/// Column list for `external_maps` queries.
const MAP_COLUMNS: &str = "\
    id, source_id, entity_type, external_id, entity_id, created_at, updated_at";

/// Provides operations on the external identity bridge.
pub struct ExternalRepo;

impl ExternalRepo {
    /// Upsert a source row by slug. The display name is refreshed.
    pub async fn upsert_source(
        pool: &PgPool,
        slug: &str,
        name: &str,
    ) -> Result<ExternalSource, sqlx::Error> {
        let query = format!(
            "INSERT INTO external_sources (slug, name) \
             VALUES ($1, $2) \
             ON CONFLICT (slug) DO UPDATE SET name = EXCLUDED.name \
             RETURNING {SOURCE_COLUMNS}"
        );
        sqlx::query_as::<_, ExternalSource>(&query)
            .bind(slug)
            .bind(name)
            .fetch_one(pool)
            .await
    }

    /// Look up the internal entity id for an external identifier.
    pub async fn find_entity_id(
        pool: &PgPool,
        source_id: DbId,
        entity_type: &str,
        external_id: &str,
    ) -> Result<Option<DbId>, sqlx::Error> {
        sqlx::query_scalar::<_, DbId>(
            "SELECT entity_id FROM external_maps \
             WHERE source_id = $1 AND entity_type = $2 AND external_id = $3",
        )
        .bind(source_id)
        .bind(entity_type)
        .bind(external_id)
        .fetch_optional(pool)
        .await
    }

    /// Upsert a mapping row. On conflict the `entity_id` reference is
    /// refreshed, never duplicated.
    pub async fn upsert_mapping(
        pool: &PgPool,
        source_id: DbId,
        entity_type: &str,
        external_id: &str,
        entity_id: DbId,
    ) -> Result<ExternalMap, sqlx::Error> {
        let query = format!(
            "INSERT INTO external_maps (source_id, entity_type, external_id, entity_id) \
             VALUES ($1, $2, $3, $4) \
             ON CONFLICT (source_id, entity_type, external_id) DO UPDATE \
             SET entity_id = EXCLUDED.entity_id, \
                 updated_at = NOW() \
             RETURNING {MAP_COLUMNS}"
        );
        sqlx::query_as::<_, ExternalMap>(&query)
            .bind(source_id)
            .bind(entity_type)
            .bind(external_id)
            .bind(entity_id)
            .fetch_one(pool)
            .await
    }
}
