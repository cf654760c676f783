//! Provider-neutral DTOs crossing the adapter boundary.
//!
//! Callers (the fixture synchronizer) only ever see these shapes;
//! provider-specific wire formats are mapped inside each adapter.

use serde::{Deserialize, Serialize};

use penca_core::status::MatchStatus;
use penca_core::types::Timestamp;

/// Parameters for a season fetch.
#[derive(Debug, Clone)]
pub struct FetchSeasonRequest {
    /// The competition's identifier in the provider's namespace.
    pub competition_external_id: String,
    pub year: i32,
}

/// One season as reported by the provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeasonDto {
    pub external_id: String,
    pub name: String,
    pub year: i32,
    pub starts_at: Option<Timestamp>,
    pub ends_at: Option<Timestamp>,
    pub teams: Vec<TeamDto>,
    pub matches: Vec<MatchDto>,
}

/// One team as reported by the provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamDto {
    pub external_id: String,
    pub name: String,
    pub short_name: Option<String>,
    /// URL-safe identifier derived from the upstream name.
    pub slug: String,
    pub logo_url: Option<String>,
    pub country: Option<String>,
}

/// One fixture as reported by the provider, statuses already canonical.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchDto {
    pub external_id: String,
    pub home_team_external_id: String,
    pub away_team_external_id: String,
    pub kickoff_at: Timestamp,
    pub venue: Option<String>,
    pub status: MatchStatusDto,
    /// Parsed from the free-text round label; defaults to 1 when no
    /// number could be extracted (documented lossy transform).
    pub round: i32,
    pub matchday: Option<i32>,
    pub home_score: Option<i32>,
    pub away_score: Option<i32>,
}

/// One result row from a results poll.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultDto {
    pub match_external_id: String,
    pub status: MatchStatusDto,
    pub home_score: Option<i32>,
    pub away_score: Option<i32>,
    pub finished_at: Option<Timestamp>,
}

/// Serializable wrapper around the canonical status enum.
///
/// Serialized as the canonical status string so DTOs round-trip through
/// JSON fixtures in tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchStatusDto(pub MatchStatus);

impl Serialize for MatchStatusDto {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.0.as_str())
    }
}

impl<'de> Deserialize<'de> for MatchStatusDto {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        MatchStatus::from_str(&s)
            .map(MatchStatusDto)
            .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_dto_serializes_canonical_string() {
        let json = serde_json::to_string(&MatchStatusDto(MatchStatus::Finished)).unwrap();
        assert_eq!(json, "\"FINISHED\"");
    }

    #[test]
    fn status_dto_rejects_unknown_string() {
        let parsed: Result<MatchStatusDto, _> = serde_json::from_str("\"HALFTIME\"");
        assert!(parsed.is_err());
    }
}
