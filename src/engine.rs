//! Analytics service.
//!
//! Wires the data providers to the pure calculators in [`crate::calculate`]
//! and decides which provider failures are fatal and which degrade to empty
//! data.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::calculate::comparison::{comparison_data, head_to_head, team_name_from_matches};
use crate::calculate::player::aggregate_player_season;
use crate::calculate::prediction::{
    predict_probabilities, prediction_form, squad_stats, trend_analysis,
};
use crate::calculate::team::aggregate_team_season;
use crate::models::{
    MatchPredictionResponse, MatchRecord, PlayerAdvancedMetrics, PredictionSide, Season,
    SquadPlayer, TeamAdvancedMetrics, TeamComparisonResponse, TeamId,
};
use crate::provider::{MatchDataProvider, PlayerStatsProvider, ProviderError, SquadProvider};

/// Errors surfaced by the analytics entry points.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Upstream unavailable: {0}")]
    UpstreamUnavailable(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl From<ProviderError> for EngineError {
    fn from(err: ProviderError) -> Self {
        match err {
            ProviderError::NotFound(what) => EngineError::NotFound(what),
            other => EngineError::UpstreamUnavailable(other.to_string()),
        }
    }
}

/// Entry points for team, player, comparison and prediction analytics.
pub struct AnalyticsEngine {
    matches: Arc<dyn MatchDataProvider>,
    squads: Arc<dyn SquadProvider>,
    players: Arc<dyn PlayerStatsProvider>,
    reference_date: Option<NaiveDate>,
}

impl AnalyticsEngine {
    pub fn new(
        matches: Arc<dyn MatchDataProvider>,
        squads: Arc<dyn SquadProvider>,
        players: Arc<dyn PlayerStatsProvider>,
    ) -> Self {
        Self {
            matches,
            squads,
            players,
            reference_date: None,
        }
    }

    /// Pin the date the current season is derived from.
    pub fn with_reference_date(mut self, date: NaiveDate) -> Self {
        self.reference_date = Some(date);
        self
    }

    fn today(&self) -> NaiveDate {
        self.reference_date
            .unwrap_or_else(|| Utc::now().date_naive())
    }

    /// Season the engine currently reports on.
    pub fn season(&self) -> Season {
        Season::from_date(self.today())
    }

    /// Full-season metrics for one team.
    ///
    /// Fails when the team cannot be resolved or its matches cannot be
    /// fetched. A team without finished matches gets all-zero metrics.
    pub async fn compute_team_advanced_metrics(
        &self,
        team_id: TeamId,
    ) -> Result<TeamAdvancedMetrics, EngineError> {
        let season = self.season();
        info!("Computing team metrics for {} ({})", team_id, season);

        let team = self.matches.team(team_id).await?;
        let matches = self.matches.finished_matches(team_id, season).await?;
        debug!(
            "{} returned {} matches for team {}",
            self.matches.name(),
            matches.len(),
            team_id
        );

        Ok(aggregate_team_season(
            team_id,
            &team.name,
            &season.label(),
            &matches,
        ))
    }

    /// Season metrics for one player from the aggregated statistics row.
    pub async fn compute_player_advanced_metrics(
        &self,
        player_id: &str,
        player_name: &str,
    ) -> Result<PlayerAdvancedMetrics, EngineError> {
        let season = self.season();
        info!(
            "Computing player metrics for {} ({}) in {}",
            player_id, player_name, season
        );

        let stats = self
            .players
            .player_statistics(player_id, player_name)
            .await?;
        if stats.total_average.is_none() {
            warn!("No summary row for player {}; reporting zeros", player_id);
        }

        let name = if stats.player_name.trim().is_empty() {
            player_name
        } else {
            stats.player_name.as_str()
        };
        Ok(aggregate_player_season(
            player_id,
            name,
            &season.label(),
            &stats.rows,
            stats.total_average.as_ref(),
        ))
    }

    /// Side-by-side comparison with head-to-head history.
    ///
    /// Provider failures never fail the comparison; the affected side is
    /// reported with empty data.
    pub async fn compare_teams(
        &self,
        team1: TeamId,
        team2: TeamId,
    ) -> Result<TeamComparisonResponse, EngineError> {
        if team1 == team2 {
            return Err(EngineError::InvalidRequest(format!(
                "cannot compare team {} with itself",
                team1
            )));
        }

        let season = self.season();
        info!("Comparing teams {} and {} ({})", team1, team2, season);

        let (matches1, matches2) = tokio::join!(
            self.matches_or_empty(team1, season),
            self.matches_or_empty(team2, season)
        );
        let (name1, name2) = tokio::join!(
            self.team_name(team1, &matches1),
            self.team_name(team2, &matches2)
        );
        let (position1, position2) = tokio::join!(
            self.position_or_none(team1, season),
            self.position_or_none(team2, season)
        );

        Ok(TeamComparisonResponse {
            team1: comparison_data(team1, &name1, &matches1, position1),
            team2: comparison_data(team2, &name2, &matches2, position2),
            head_to_head: head_to_head(team1, team2, &matches1),
        })
    }

    /// Outcome probabilities for a fixture.
    ///
    /// Missing rosters or match histories count as empty squads and a zero
    /// form score.
    pub async fn predict_match(
        &self,
        home_team: &str,
        away_team: &str,
        home_team_id: TeamId,
        away_team_id: TeamId,
    ) -> Result<MatchPredictionResponse, EngineError> {
        if home_team_id == away_team_id {
            return Err(EngineError::InvalidRequest(format!(
                "home and away team are both {}",
                home_team_id
            )));
        }

        let season = self.season();
        info!(
            "Predicting {} ({}) vs {} ({})",
            home_team, home_team_id, away_team, away_team_id
        );

        let (home_squad, away_squad, home_matches, away_matches) = tokio::join!(
            self.squad_or_empty(home_team_id, home_team),
            self.squad_or_empty(away_team_id, away_team),
            self.matches_or_empty(home_team_id, season),
            self.matches_or_empty(away_team_id, season)
        );

        let home = PredictionSide {
            team_id: home_team_id,
            team_name: home_team.to_string(),
            squad: squad_stats(&home_squad),
            recent_form: prediction_form(home_team_id, &home_matches),
        };
        let away = PredictionSide {
            team_id: away_team_id,
            team_name: away_team.to_string(),
            squad: squad_stats(&away_squad),
            recent_form: prediction_form(away_team_id, &away_matches),
        };

        let trend = trend_analysis(&home.squad, &away.squad, &home.recent_form, &away.recent_form);
        let probabilities =
            predict_probabilities(&home.squad, &away.squad, &home.recent_form, &away.recent_form);
        debug!(
            "Prediction {} vs {}: {:.2}/{:.2}/{:.2}",
            home_team_id,
            away_team_id,
            probabilities.home_win,
            probabilities.draw,
            probabilities.away_win
        );

        Ok(MatchPredictionResponse {
            home,
            away,
            trend_analysis: trend,
            probabilities,
        })
    }

    async fn matches_or_empty(&self, team_id: TeamId, season: Season) -> Vec<MatchRecord> {
        match self.matches.finished_matches(team_id, season).await {
            Ok(matches) => matches,
            Err(e) => {
                warn!("Matches for team {} unavailable: {}", team_id, e);
                Vec::new()
            }
        }
    }

    async fn position_or_none(&self, team_id: TeamId, season: Season) -> Option<u32> {
        match self.matches.league_position(team_id, season).await {
            Ok(position) => position,
            Err(e) => {
                warn!("League position for team {} unavailable: {}", team_id, e);
                None
            }
        }
    }

    async fn squad_or_empty(&self, team_id: TeamId, team_name: &str) -> Vec<SquadPlayer> {
        match self.squads.squad(team_id, team_name).await {
            Ok(players) => players,
            Err(e) => {
                warn!(
                    "{} squad for team {} unavailable: {}",
                    self.squads.name(),
                    team_id,
                    e
                );
                Vec::new()
            }
        }
    }

    /// Provider name first, then the latest fixture, then a placeholder.
    async fn team_name(&self, team_id: TeamId, matches: &[MatchRecord]) -> String {
        match self.matches.team(team_id).await {
            Ok(team) => team.name,
            Err(e) => {
                debug!("Team {} lookup failed: {}", team_id, e);
                team_name_from_matches(team_id, matches)
                    .unwrap_or_else(|| format!("Team {}", team_id))
            }
        }
    }
}
