//! Match rows and the sync upsert DTO.

use serde::Serialize;
use sqlx::FromRow;

use penca_core::types::{DbId, Timestamp};

/// A row from the `matches` table.
///
/// Natural key is `(season_id, round, home_team_id, away_team_id)`.
/// `status` holds one of the canonical strings from
/// [`penca_core::status::MatchStatus`].
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Match {
    pub id: DbId,
    pub season_id: DbId,
    pub round: i32,
    pub matchday: Option<i32>,
    pub home_team_id: DbId,
    pub away_team_id: DbId,
    pub kickoff_at: Timestamp,
    pub venue: Option<String>,
    pub status: String,
    pub home_score: Option<i32>,
    pub away_score: Option<i32>,
    pub locked: bool,
    pub finished_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Fields written by the fixture synchronizer on create and update.
#[derive(Debug, Clone)]
pub struct MatchUpsert {
    pub season_id: DbId,
    pub round: i32,
    pub matchday: Option<i32>,
    pub home_team_id: DbId,
    pub away_team_id: DbId,
    pub kickoff_at: Timestamp,
    pub venue: Option<String>,
    pub status: String,
    pub home_score: Option<i32>,
    pub away_score: Option<i32>,
    /// `true` whenever the imported status is anything but SCHEDULED, so a
    /// match that arrives already live or finished is never editable.
    pub locked: bool,
    pub finished_at: Option<Timestamp>,
}

/// A finished match eligible for scoring, with its final scoreline.
#[derive(Debug, Clone, FromRow)]
pub struct ScorableMatch {
    pub id: DbId,
    pub home_score: i32,
    pub away_score: i32,
}

/// A scheduled match whose kickoff has passed, pending a lock.
#[derive(Debug, Clone, FromRow)]
pub struct LockableMatch {
    pub id: DbId,
    pub kickoff_at: Timestamp,
}
