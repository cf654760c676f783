//! Team rows and the sync upsert DTO.

use serde::Serialize;
use sqlx::FromRow;

use penca_core::types::{DbId, Timestamp};

/// A row from the `teams` table. Natural key is `(sport, slug)`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Team {
    pub id: DbId,
    pub sport: String,
    pub slug: String,
    pub name: String,
    pub short_name: Option<String>,
    pub logo_url: Option<String>,
    pub country: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Display fields written by the fixture synchronizer on every sync.
#[derive(Debug, Clone)]
pub struct TeamUpsert {
    pub sport: String,
    pub slug: String,
    pub name: String,
    pub short_name: Option<String>,
    pub logo_url: Option<String>,
    pub country: Option<String>,
}
