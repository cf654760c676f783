//! Season and competition rows.

use serde::Serialize;
use sqlx::FromRow;

use penca_core::types::{DbId, Timestamp};

/// A row from `seasons`, joined with its competition for sport context.
///
/// The fixture synchronizer needs the sport to resolve teams by natural
/// key, so the two tables are always loaded together.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SeasonWithCompetition {
    pub id: DbId,
    pub competition_id: DbId,
    pub name: String,
    pub year: i32,
    pub starts_at: Option<Timestamp>,
    pub ends_at: Option<Timestamp>,
    pub sport: String,
    pub competition_name: String,
}
