//! Live adapter for the API-Football v3 HTTP API.
//!
//! Wraps the `teams` and `fixtures` endpoints, translating the wire
//! format into the provider-neutral DTOs. Requests carry the API key
//! header, go through exponential-backoff retry on 429/transport
//! failures, and successful responses land in the injected TTL cache.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Deserialize;

use async_trait::async_trait;

use crate::cache::ResponseCache;
use crate::dto::{FetchSeasonRequest, MatchDto, MatchStatusDto, ResultDto, SeasonDto, TeamDto};
use crate::error::ProviderError;
use crate::retry::{with_retry, RetryConfig, Transient};
use crate::rounds::parse_round;
use crate::status_map::map_status;
use crate::SportsProvider;

/// Hosted API-Football v3 endpoint.
const DEFAULT_BASE_URL: &str = "https://v3.football.api-sports.io";

/// API key request header.
const API_KEY_HEADER: &str = "x-apisports-key";

/// HTTP client for API-Football.
pub struct ApiFootballProvider {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    retry: RetryConfig,
    cache: Arc<ResponseCache>,
}

// ---------------------------------------------------------------------------
// Wire format (internal only)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct ApiEnvelope<T> {
    response: Vec<T>,
}

#[derive(Debug, Deserialize)]
struct TeamEntry {
    team: TeamInfo,
}

#[derive(Debug, Deserialize)]
struct TeamInfo {
    id: i64,
    name: String,
    code: Option<String>,
    country: Option<String>,
    logo: Option<String>,
}

#[derive(Debug, Deserialize)]
struct FixtureEntry {
    fixture: FixtureInfo,
    league: LeagueInfo,
    teams: FixtureTeams,
    goals: Goals,
}

#[derive(Debug, Deserialize)]
struct FixtureInfo {
    id: i64,
    date: DateTime<Utc>,
    venue: Venue,
    status: WireStatus,
}

#[derive(Debug, Deserialize)]
struct Venue {
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WireStatus {
    short: String,
}

#[derive(Debug, Deserialize)]
struct LeagueInfo {
    name: Option<String>,
    round: Option<String>,
}

#[derive(Debug, Deserialize)]
struct FixtureTeams {
    home: TeamRef,
    away: TeamRef,
}

#[derive(Debug, Deserialize)]
struct TeamRef {
    id: i64,
}

#[derive(Debug, Deserialize)]
struct Goals {
    home: Option<i32>,
    away: Option<i32>,
}

// ---------------------------------------------------------------------------
// Mapping helpers
// ---------------------------------------------------------------------------

/// Derive a URL-safe slug from an upstream team name.
fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut last_dash = true;
    for c in name.chars() {
        if c.is_alphanumeric() {
            slug.extend(c.to_lowercase());
            last_dash = false;
        } else if !last_dash {
            slug.push('-');
            last_dash = true;
        }
    }
    slug.trim_end_matches('-').to_string()
}

fn map_team(entry: &TeamEntry) -> TeamDto {
    TeamDto {
        external_id: entry.team.id.to_string(),
        slug: slugify(&entry.team.name),
        name: entry.team.name.clone(),
        short_name: entry.team.code.clone(),
        logo_url: entry.team.logo.clone(),
        country: entry.team.country.clone(),
    }
}

fn map_fixture(entry: &FixtureEntry) -> MatchDto {
    let parsed = parse_round(entry.league.round.as_deref().unwrap_or(""));
    MatchDto {
        external_id: entry.fixture.id.to_string(),
        home_team_external_id: entry.teams.home.id.to_string(),
        away_team_external_id: entry.teams.away.id.to_string(),
        kickoff_at: entry.fixture.date,
        venue: entry.fixture.venue.name.clone(),
        status: MatchStatusDto(map_status(&entry.fixture.status.short)),
        round: parsed.round,
        matchday: parsed.matchday,
        home_score: entry.goals.home,
        away_score: entry.goals.away,
    }
}

fn map_result(entry: &FixtureEntry) -> ResultDto {
    let status = map_status(&entry.fixture.status.short);
    ResultDto {
        match_external_id: entry.fixture.id.to_string(),
        status: MatchStatusDto(status),
        home_score: entry.goals.home,
        away_score: entry.goals.away,
        finished_at: None,
    }
}

impl ApiFootballProvider {
    pub fn new(
        api_key: String,
        base_url: Option<String>,
        retry: RetryConfig,
        cache: Arc<ResponseCache>,
    ) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            api_key,
            retry,
            cache,
        }
    }

    /// GET an endpoint with query params, via cache and retry.
    async fn get_json(
        &self,
        endpoint: &str,
        params: &[(&str, String)],
    ) -> Result<serde_json::Value, ProviderError> {
        let cache_key = ResponseCache::make_key(self.name(), endpoint, params);
        if let Some(hit) = self.cache.get(&cache_key) {
            tracing::debug!(endpoint, "Provider cache hit");
            return Ok(hit);
        }

        let url = format!("{}/{}", self.base_url, endpoint);
        let body = with_retry(&self.retry, || {
            let client = self.client.clone();
            let url = url.clone();
            let api_key = self.api_key.clone();
            let params = params.to_vec();
            async move {
                let response = client
                    .get(&url)
                    .header(API_KEY_HEADER, &api_key)
                    .query(&params)
                    .send()
                    .await
                    .map_err(|e| Ok(Transient::Network(e)))?;

                let status = response.status();
                if status.as_u16() == 429 {
                    return Err(Ok(Transient::RateLimited));
                }
                if !status.is_success() {
                    let body = response
                        .text()
                        .await
                        .unwrap_or_else(|_| "<unreadable body>".to_string());
                    return Err(Err(ProviderError::Api {
                        status: status.as_u16(),
                        body,
                    }));
                }

                response
                    .json::<serde_json::Value>()
                    .await
                    .map_err(|e| Err(ProviderError::Decode(e.to_string())))
            }
        })
        .await?;

        self.cache.put(cache_key, body.clone());
        Ok(body)
    }
}

#[async_trait]
impl SportsProvider for ApiFootballProvider {
    fn name(&self) -> &'static str {
        "api-football"
    }

    async fn fetch_season(&self, req: &FetchSeasonRequest) -> Result<SeasonDto, ProviderError> {
        let params = [
            ("league", req.competition_external_id.clone()),
            ("season", req.year.to_string()),
        ];

        let teams_body = self.get_json("teams", &params).await?;
        let teams: ApiEnvelope<TeamEntry> = serde_json::from_value(teams_body)
            .map_err(|e| ProviderError::Decode(format!("teams: {e}")))?;

        let fixtures_body = self.get_json("fixtures", &params).await?;
        let fixtures: ApiEnvelope<FixtureEntry> = serde_json::from_value(fixtures_body)
            .map_err(|e| ProviderError::Decode(format!("fixtures: {e}")))?;

        let name = fixtures
            .response
            .first()
            .and_then(|f| f.league.name.clone())
            .map(|league| format!("{league} {}", req.year))
            .unwrap_or_else(|| format!("Season {}", req.year));

        let matches: Vec<MatchDto> = fixtures.response.iter().map(map_fixture).collect();
        let starts_at = matches.iter().map(|m| m.kickoff_at).min();
        let ends_at = matches.iter().map(|m| m.kickoff_at).max();

        Ok(SeasonDto {
            external_id: format!("{}-{}", req.competition_external_id, req.year),
            name,
            year: req.year,
            starts_at,
            ends_at,
            teams: teams.response.iter().map(map_team).collect(),
            matches,
        })
    }

    async fn fetch_results(
        &self,
        match_external_ids: &[String],
    ) -> Result<Vec<ResultDto>, ProviderError> {
        if match_external_ids.is_empty() {
            return Ok(Vec::new());
        }
        // API-Football batches fixture lookups as dash-separated ids.
        let params = [("ids", match_external_ids.join("-"))];
        let body = self.get_json("fixtures", &params).await?;
        let fixtures: ApiEnvelope<FixtureEntry> = serde_json::from_value(body)
            .map_err(|e| ProviderError::Decode(format!("fixtures: {e}")))?;
        Ok(fixtures.response.iter().map(map_result).collect())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use penca_core::status::MatchStatus;

    // -- slugify --------------------------------------------------------------

    #[test]
    fn slugify_lowercases_and_dashes() {
        assert_eq!(slugify("River Plate"), "river-plate");
        assert_eq!(slugify("Atlético Mineiro"), "atlético-mineiro");
    }

    #[test]
    fn slugify_collapses_separator_runs() {
        assert_eq!(slugify("A.F.C.  Bournemouth"), "a-f-c-bournemouth");
        assert_eq!(slugify("--Team--"), "team");
    }

    // -- wire mapping ---------------------------------------------------------

    fn fixture_json() -> serde_json::Value {
        serde_json::json!({
            "fixture": {
                "id": 9001,
                "date": "2026-06-14T18:00:00Z",
                "venue": { "name": "Estadio Azteca" },
                "status": { "short": "FT" }
            },
            "league": { "name": "Liga MX", "round": "Regular Season - 4" },
            "teams": { "home": { "id": 11 }, "away": { "id": 22 } },
            "goals": { "home": 2, "away": 1 }
        })
    }

    #[test]
    fn fixture_maps_to_canonical_dto() {
        let entry: FixtureEntry = serde_json::from_value(fixture_json()).unwrap();
        let dto = map_fixture(&entry);
        assert_eq!(dto.external_id, "9001");
        assert_eq!(dto.home_team_external_id, "11");
        assert_eq!(dto.away_team_external_id, "22");
        assert_eq!(dto.status.0, MatchStatus::Finished);
        assert_eq!(dto.round, 4);
        assert_eq!(dto.matchday, Some(4));
        assert_eq!(dto.home_score, Some(2));
        assert_eq!(dto.venue.as_deref(), Some("Estadio Azteca"));
    }

    #[test]
    fn fixture_with_unknown_status_defaults_scheduled() {
        let mut json = fixture_json();
        json["fixture"]["status"]["short"] = serde_json::json!("XYZ");
        json["goals"] = serde_json::json!({ "home": null, "away": null });
        let entry: FixtureEntry = serde_json::from_value(json).unwrap();
        let dto = map_fixture(&entry);
        assert_eq!(dto.status.0, MatchStatus::Scheduled);
        assert_eq!(dto.home_score, None);
    }

    #[test]
    fn fixture_with_knockout_round_falls_back_to_round_one() {
        let mut json = fixture_json();
        json["league"]["round"] = serde_json::json!("Final");
        let entry: FixtureEntry = serde_json::from_value(json).unwrap();
        let dto = map_fixture(&entry);
        assert_eq!(dto.round, 1);
        assert_eq!(dto.matchday, None);
    }

    #[test]
    fn team_entry_maps_with_slug() {
        let entry: TeamEntry = serde_json::from_value(serde_json::json!({
            "team": {
                "id": 541,
                "name": "Real Madrid",
                "code": "RMA",
                "country": "Spain",
                "logo": "https://example.test/rma.png"
            }
        }))
        .unwrap();
        let dto = map_team(&entry);
        assert_eq!(dto.external_id, "541");
        assert_eq!(dto.slug, "real-madrid");
        assert_eq!(dto.short_name.as_deref(), Some("RMA"));
    }
}
