//! Match prediction models.

use serde::{Deserialize, Serialize};

use super::{RecentFormWindow, TeamId};

/// A currently rostered player as reported by the squad provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SquadPlayer {
    pub team_id: TeamId,
    pub team_name: String,
    pub player_name: String,
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub goals: u32,
    #[serde(default)]
    pub assists: u32,
}

/// Aggregate squad figures used by the prediction model.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SquadStats {
    pub player_count: u32,
    pub average_rating: f64,
    pub total_goals: u32,
    pub total_assists: u32,
}

/// Element-wise averages across both teams.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendAnalysis {
    pub average_rating: f64,
    pub average_goals: f64,
    pub average_assists: f64,
    pub average_form_score: f64,
}

/// Outcome percentages, summing to exactly 100.00.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WinProbabilities {
    pub home_win: f64,
    pub draw: f64,
    pub away_win: f64,
}

impl WinProbabilities {
    pub fn total(&self) -> f64 {
        self.home_win + self.draw + self.away_win
    }
}

/// Prediction inputs and result for one side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionSide {
    pub team_id: TeamId,
    pub team_name: String,
    pub squad: SquadStats,
    pub recent_form: RecentFormWindow,
}

/// Full prediction for a fixture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchPredictionResponse {
    pub home: PredictionSide,
    pub away: PredictionSide,
    pub trend_analysis: TrendAnalysis,
    pub probabilities: WinProbabilities,
}
