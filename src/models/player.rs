//! Player statistics and derived metrics models.

use serde::{Deserialize, Serialize};

use super::PlayerId;

/// One parsed statistics row, cells kept as scraped text.
///
/// Cells may hold placeholder tokens such as "-", and appearances may carry a
/// substitute annotation like "10(2)".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlayerStatRow {
    pub competition: String,
    pub appearances: String,
    pub minutes: String,
    pub goals: String,
    pub assists: String,
    pub yellow_cards: String,
    pub red_cards: String,
    pub shots_per_game: String,
    pub key_passes_per90: String,
    pub dribbles_per90: String,
    pub rating: String,
}

/// Statistics for one player: per-competition rows plus the overall summary.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerStatistics {
    pub player_id: PlayerId,
    pub player_name: String,
    #[serde(default)]
    pub rows: Vec<PlayerStatRow>,
    #[serde(default)]
    pub total_average: Option<PlayerStatRow>,
}

/// Efficiency block of the player metrics.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EfficiencyMetrics {
    pub shot_accuracy: f64,
    pub creative_efficiency: f64,
    /// Clamped to 0..=100
    pub dribble_success_rate: f64,
    pub playing_time_percentage: f64,
}

/// Derived season metrics for a single player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerAdvancedMetrics {
    pub player_id: PlayerId,
    pub player_name: String,
    pub season: String,

    /// Competitions the per-competition rows cover
    pub competitions: Vec<String>,

    pub total_matches: u32,
    pub total_minutes: u32,
    pub goals: u32,
    pub assists: u32,

    pub goals_per_match: f64,
    pub assists_per_match: f64,
    pub goals_per90: f64,
    pub assists_per90: f64,

    pub goal_contributions: u32,
    pub goal_contributions_per90: f64,

    /// Only present when the player has scored
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minutes_per_goal: Option<f64>,

    /// Only present when the player has assisted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minutes_per_assist: Option<f64>,

    pub yellow_cards: u32,
    pub red_cards: u32,
    pub yellow_cards_per_match: f64,
    pub red_cards_per_match: f64,

    pub efficiency: EfficiencyMetrics,
    pub impact_score: f64,

    /// Balance across scoring, creating and dribbling (0 to 100)
    pub versatility_index: f64,
}

impl PlayerAdvancedMetrics {
    /// All-zero metrics for a player without a summary row.
    pub fn empty(
        player_id: impl Into<PlayerId>,
        player_name: impl Into<String>,
        season: impl Into<String>,
    ) -> Self {
        Self {
            player_id: player_id.into(),
            player_name: player_name.into(),
            season: season.into(),
            competitions: Vec::new(),
            total_matches: 0,
            total_minutes: 0,
            goals: 0,
            assists: 0,
            goals_per_match: 0.0,
            assists_per_match: 0.0,
            goals_per90: 0.0,
            assists_per90: 0.0,
            goal_contributions: 0,
            goal_contributions_per90: 0.0,
            minutes_per_goal: None,
            minutes_per_assist: None,
            yellow_cards: 0,
            red_cards: 0,
            yellow_cards_per_match: 0.0,
            red_cards_per_match: 0.0,
            efficiency: EfficiencyMetrics::default(),
            impact_score: 0.0,
            versatility_index: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stat_row_missing_cells_default() {
        let row: PlayerStatRow =
            serde_json::from_str(r#"{"competition":"Premier League","appearances":"10(2)"}"#)
                .unwrap();
        assert_eq!(row.appearances, "10(2)");
        assert_eq!(row.goals, "");
    }

    #[test]
    fn test_statistics_total_average_key() {
        let stats: PlayerStatistics = serde_json::from_str(
            r#"{"playerId":"42","playerName":"Bukayo Saka","totalAverage":{"goals":"9"}}"#,
        )
        .unwrap();
        assert!(stats.rows.is_empty());
        assert_eq!(stats.total_average.unwrap().goals, "9");
    }

    #[test]
    fn test_absent_rates_are_omitted() {
        let metrics = PlayerAdvancedMetrics::empty("42", "Bukayo Saka", "2025/2026");
        let json = serde_json::to_value(&metrics).unwrap();
        assert!(json.get("minutesPerGoal").is_none());
        assert!(json.get("minutesPerAssist").is_none());
        assert_eq!(json["versatilityIndex"], 0.0);
    }
}
