//! Football data REST API client.
//!
//! Talks to a football-data.org style v4 API:
//! - `teams/{id}` for team identity
//! - `teams/{id}/matches?status=FINISHED&season=YYYY` for results
//! - `competitions/{code}/standings?season=YYYY` for league positions

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, warn};
use url::Url;

use super::{MatchDataProvider, ProviderError};
use crate::config::ProviderConfig;
use crate::models::{MatchRecord, Score, Season, TeamId, TeamRef};

const AUTH_HEADER: &str = "X-Auth-Token";

/// Standings table type holding the full-season positions.
const TOTAL_STANDINGS: &str = "TOTAL";

#[derive(Debug, Deserialize)]
struct ApiTeam {
    id: Option<TeamId>,
    name: Option<String>,
}

impl ApiTeam {
    fn into_team_ref(self) -> Option<TeamRef> {
        Some(TeamRef::new(self.id?, self.name?))
    }
}

#[derive(Debug, Deserialize)]
struct ApiCompetition {
    name: String,
}

#[derive(Debug, Default, Deserialize)]
struct ApiGoals {
    home: Option<u32>,
    away: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiScore {
    #[serde(default)]
    full_time: ApiGoals,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiMatch {
    utc_date: DateTime<Utc>,
    #[serde(default)]
    competition: Option<ApiCompetition>,
    home_team: ApiTeam,
    away_team: ApiTeam,
    #[serde(default)]
    score: ApiScore,
}

impl ApiMatch {
    /// Convert to a match record; fixtures without a full-time score are dropped.
    fn into_record(self) -> Option<MatchRecord> {
        let score = match (self.score.full_time.home, self.score.full_time.away) {
            (Some(home), Some(away)) => Score { home, away },
            _ => return None,
        };

        Some(MatchRecord {
            competition: self
                .competition
                .map(|c| c.name)
                .unwrap_or_default(),
            home_team: self.home_team.into_team_ref()?,
            away_team: self.away_team.into_team_ref()?,
            utc_date: self.utc_date,
            score: Some(score),
        })
    }
}

#[derive(Debug, Deserialize)]
struct MatchesResponse {
    #[serde(default)]
    matches: Vec<ApiMatch>,
}

#[derive(Debug, Deserialize)]
struct ApiTableRow {
    position: u32,
    team: ApiTeam,
}

#[derive(Debug, Deserialize)]
struct ApiStanding {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    table: Vec<ApiTableRow>,
}

#[derive(Debug, Deserialize)]
struct StandingsResponse {
    #[serde(default)]
    standings: Vec<ApiStanding>,
}

impl StandingsResponse {
    fn position_of(&self, team_id: TeamId) -> Option<u32> {
        self.standings
            .iter()
            .filter(|s| s.kind == TOTAL_STANDINGS)
            .flat_map(|s| s.table.iter())
            .find(|row| row.team.id == Some(team_id))
            .map(|row| row.position)
    }
}

/// HTTP client for the football data API.
pub struct FootballDataClient {
    client: Client,
    base_url: Url,
    competition: String,
}

impl FootballDataClient {
    /// Create a client with an optional API token.
    pub fn new(
        base_url: &str,
        competition: impl Into<String>,
        api_token: Option<&str>,
        timeout: Duration,
    ) -> Result<Self, ProviderError> {
        let mut base = base_url.trim().to_string();
        if !base.ends_with('/') {
            base.push('/');
        }
        let base_url = Url::parse(&base).map_err(|e| ProviderError::InvalidUrl(e.to_string()))?;

        let mut headers = HeaderMap::new();
        if let Some(token) = api_token {
            match HeaderValue::from_str(token) {
                Ok(value) => {
                    headers.insert(AUTH_HEADER, value);
                }
                Err(_) => warn!("Ignoring API token with invalid header characters"),
            }
        }

        let client = Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            base_url,
            competition: competition.into(),
        })
    }

    /// Build a client from configuration, reading the token from the environment.
    pub fn from_config(config: &ProviderConfig) -> Result<Self, ProviderError> {
        let token = std::env::var(&config.api_key_env).ok();
        if token.is_none() {
            warn!(
                "{} is not set; requests will be sent without an API token",
                config.api_key_env
            );
        }

        Self::new(
            &config.base_url,
            config.competition.clone(),
            token.as_deref(),
            Duration::from_secs(config.timeout_seconds),
        )
    }

    fn endpoint(&self, path: &str) -> Result<Url, ProviderError> {
        self.base_url
            .join(path)
            .map_err(|e| ProviderError::InvalidUrl(e.to_string()))
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url, what: &str) -> Result<T, ProviderError> {
        debug!("GET {}", url);

        let response = self.client.get(url).send().await?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Err(ProviderError::NotFound(what.to_string()));
        }
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ProviderError::HttpStatus {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl MatchDataProvider for FootballDataClient {
    fn name(&self) -> &'static str {
        "football-data"
    }

    async fn team(&self, team_id: TeamId) -> Result<TeamRef, ProviderError> {
        let url = self.endpoint(&format!("teams/{}", team_id))?;
        let team: ApiTeam = self.get_json(url, &format!("team {}", team_id)).await?;
        team.into_team_ref()
            .ok_or_else(|| ProviderError::NotFound(format!("team {}", team_id)))
    }

    async fn finished_matches(
        &self,
        team_id: TeamId,
        season: Season,
    ) -> Result<Vec<MatchRecord>, ProviderError> {
        let mut url = self.endpoint(&format!("teams/{}/matches", team_id))?;
        url.query_pairs_mut()
            .append_pair("status", "FINISHED")
            .append_pair("season", &season.start_year.to_string());

        let response: MatchesResponse = self
            .get_json(url, &format!("matches for team {}", team_id))
            .await?;
        let total = response.matches.len();
        let records: Vec<MatchRecord> = response
            .matches
            .into_iter()
            .filter_map(ApiMatch::into_record)
            .collect();

        debug!(
            "Team {}: {} finished matches ({} dropped)",
            team_id,
            records.len(),
            total - records.len()
        );
        Ok(records)
    }

    async fn league_position(
        &self,
        team_id: TeamId,
        season: Season,
    ) -> Result<Option<u32>, ProviderError> {
        let mut url = self.endpoint(&format!("competitions/{}/standings", self.competition))?;
        url.query_pairs_mut()
            .append_pair("season", &season.start_year.to_string());

        let response: StandingsResponse = self
            .get_json(url, &format!("standings for {}", self.competition))
            .await?;
        Ok(response.position_of(team_id))
    }
}
