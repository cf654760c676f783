//! External source and mapping rows -- the idempotency bridge between a
//! third-party sports API's identifiers and internal entity ids.

use serde::Serialize;
use sqlx::FromRow;

use penca_core::types::{DbId, Timestamp};

/// Entity type discriminator for `external_maps.entity_type`.
pub const ENTITY_TYPE_TEAM: &str = "team";
/// Entity type discriminator for match mappings.
pub const ENTITY_TYPE_MATCH: &str = "match";
/// Entity type discriminator for season mappings.
pub const ENTITY_TYPE_SEASON: &str = "season";

/// A row from `external_sources`. One per upstream provider, by slug.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ExternalSource {
    pub id: DbId,
    pub slug: String,
    pub name: String,
    pub created_at: Timestamp,
}

/// A row from `external_maps`.
///
/// Unique per `(source_id, entity_type, external_id)`; `entity_id` is
/// refreshed on every re-sync.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ExternalMap {
    pub id: DbId,
    pub source_id: DbId,
    pub entity_type: String,
    pub external_id: String,
    pub entity_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
