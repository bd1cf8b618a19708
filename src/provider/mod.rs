//! Data collaborators.
//!
//! Raw match, roster and player statistics come from outside the engine:
//! - Match data: football data REST API (`football_data`)
//! - Rosters and parsed player statistics: JSONL data lake (`jsonl`)
//!
//! All providers implement the async traits below so the engine can be wired
//! to any source.

pub mod football_data;
pub mod jsonl;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{MatchRecord, PlayerStatistics, Season, SquadPlayer, TeamId, TeamRef};
use crate::storage::StorageError;

pub use football_data::FootballDataClient;
pub use jsonl::{JsonlPlayerStatsProvider, JsonlSquadProvider};

/// Errors returned by data providers.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status}: {message}")]
    HttpStatus { status: u16, message: String },

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Source of fixtures, team identities and standings.
#[async_trait]
pub trait MatchDataProvider: Send + Sync {
    /// Provider name for logging.
    fn name(&self) -> &'static str;

    /// Resolve a team's identity.
    async fn team(&self, team_id: TeamId) -> Result<TeamRef, ProviderError>;

    /// Finished matches of a team in the given season.
    async fn finished_matches(
        &self,
        team_id: TeamId,
        season: Season,
    ) -> Result<Vec<MatchRecord>, ProviderError>;

    /// 1-based league position, `None` when the team is not in the table.
    async fn league_position(
        &self,
        team_id: TeamId,
        season: Season,
    ) -> Result<Option<u32>, ProviderError>;
}

/// Source of current rosters.
#[async_trait]
pub trait SquadProvider: Send + Sync {
    fn name(&self) -> &'static str;

    /// Rostered players, looked up by id and falling back to the team name.
    async fn squad(
        &self,
        team_id: TeamId,
        team_name: &str,
    ) -> Result<Vec<SquadPlayer>, ProviderError>;
}

/// Source of parsed per-player statistics.
#[async_trait]
pub trait PlayerStatsProvider: Send + Sync {
    fn name(&self) -> &'static str;

    async fn player_statistics(
        &self,
        player_id: &str,
        player_name: &str,
    ) -> Result<PlayerStatistics, ProviderError>;
}

/// In-memory provider for tests.
#[cfg(test)]
#[derive(Default)]
pub struct StaticProvider {
    pub teams: Vec<TeamRef>,
    pub matches: std::collections::HashMap<TeamId, Vec<MatchRecord>>,
    pub positions: std::collections::HashMap<TeamId, u32>,
    pub squads: Vec<SquadPlayer>,
    pub players: Vec<PlayerStatistics>,
    /// When set, every call fails with an upstream error
    pub failing: bool,
    pub calls: std::sync::atomic::AtomicUsize,
}

#[cfg(test)]
impl StaticProvider {
    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Default::default()
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(std::sync::atomic::Ordering::SeqCst)
    }

    fn check(&self) -> Result<(), ProviderError> {
        self.calls.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        if self.failing {
            Err(ProviderError::HttpStatus {
                status: 503,
                message: "upstream unavailable".to_string(),
            })
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
#[async_trait]
impl MatchDataProvider for StaticProvider {
    fn name(&self) -> &'static str {
        "static"
    }

    async fn team(&self, team_id: TeamId) -> Result<TeamRef, ProviderError> {
        self.check()?;
        self.teams
            .iter()
            .find(|t| t.id == team_id)
            .cloned()
            .ok_or_else(|| ProviderError::NotFound(format!("team {}", team_id)))
    }

    async fn finished_matches(
        &self,
        team_id: TeamId,
        _season: Season,
    ) -> Result<Vec<MatchRecord>, ProviderError> {
        self.check()?;
        Ok(self.matches.get(&team_id).cloned().unwrap_or_default())
    }

    async fn league_position(
        &self,
        team_id: TeamId,
        _season: Season,
    ) -> Result<Option<u32>, ProviderError> {
        self.check()?;
        Ok(self.positions.get(&team_id).copied())
    }
}

#[cfg(test)]
#[async_trait]
impl SquadProvider for StaticProvider {
    fn name(&self) -> &'static str {
        "static"
    }

    async fn squad(
        &self,
        team_id: TeamId,
        _team_name: &str,
    ) -> Result<Vec<SquadPlayer>, ProviderError> {
        self.check()?;
        Ok(self
            .squads
            .iter()
            .filter(|p| p.team_id == team_id)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
#[async_trait]
impl PlayerStatsProvider for StaticProvider {
    fn name(&self) -> &'static str {
        "static"
    }

    async fn player_statistics(
        &self,
        player_id: &str,
        _player_name: &str,
    ) -> Result<PlayerStatistics, ProviderError> {
        self.check()?;
        self.players
            .iter()
            .find(|p| p.player_id == player_id)
            .cloned()
            .ok_or_else(|| ProviderError::NotFound(format!("player {}", player_id)))
    }
}
