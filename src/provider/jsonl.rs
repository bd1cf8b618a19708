//! File-backed roster and player statistics providers.

use async_trait::async_trait;
use tracing::debug;

use super::{PlayerStatsProvider, ProviderError, SquadProvider};
use crate::models::{PlayerStatistics, SquadPlayer, TeamId};
use crate::storage::{EntityType, JsonlReader, StorageConfig};

/// Rosters from `normalized/squads.jsonl`.
pub struct JsonlSquadProvider {
    storage: StorageConfig,
}

impl JsonlSquadProvider {
    pub fn new(storage: StorageConfig) -> Self {
        Self { storage }
    }
}

#[async_trait]
impl SquadProvider for JsonlSquadProvider {
    fn name(&self) -> &'static str {
        "jsonl"
    }

    async fn squad(
        &self,
        team_id: TeamId,
        team_name: &str,
    ) -> Result<Vec<SquadPlayer>, ProviderError> {
        let reader: JsonlReader<SquadPlayer> =
            JsonlReader::for_entity(&self.storage, EntityType::SquadPlayer);
        let players = reader.read_all()?;

        let by_id: Vec<SquadPlayer> = players
            .iter()
            .filter(|p| p.team_id == team_id)
            .cloned()
            .collect();
        if !by_id.is_empty() {
            return Ok(by_id);
        }

        let wanted = team_name.trim();
        let by_name: Vec<SquadPlayer> = players
            .into_iter()
            .filter(|p| !wanted.is_empty() && p.team_name.trim().eq_ignore_ascii_case(wanted))
            .collect();
        debug!(
            "Squad for team {} matched by name {:?}: {} players",
            team_id,
            wanted,
            by_name.len()
        );
        Ok(by_name)
    }
}

/// Parsed player statistics from `normalized/player_stats.jsonl`.
pub struct JsonlPlayerStatsProvider {
    storage: StorageConfig,
}

impl JsonlPlayerStatsProvider {
    pub fn new(storage: StorageConfig) -> Self {
        Self { storage }
    }
}

#[async_trait]
impl PlayerStatsProvider for JsonlPlayerStatsProvider {
    fn name(&self) -> &'static str {
        "jsonl"
    }

    async fn player_statistics(
        &self,
        player_id: &str,
        player_name: &str,
    ) -> Result<PlayerStatistics, ProviderError> {
        let reader: JsonlReader<PlayerStatistics> =
            JsonlReader::for_entity(&self.storage, EntityType::PlayerStatistics);
        let mut candidates = reader.read_where(|s| s.player_id == player_id)?;

        // Several scrapes may share an id; prefer the one matching the display name.
        let idx = candidates
            .iter()
            .position(|s| s.player_name.trim().eq_ignore_ascii_case(player_name.trim()))
            .unwrap_or(0);

        if candidates.is_empty() {
            return Err(ProviderError::NotFound(format!(
                "player {} ({})",
                player_id, player_name
            )));
        }
        Ok(candidates.swap_remove(idx))
    }
}
