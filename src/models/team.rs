//! Team season metrics models.

use serde::{Deserialize, Serialize};

use super::{MatchOutcome, TeamId};

/// Record for one venue context (home, away) or overall.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceSplit {
    pub played: u32,
    pub wins: u32,
    pub draws: u32,
    pub losses: u32,
    pub goals_for: u32,
    pub goals_against: u32,
    pub points: u32,

    /// Win percentage (0 to 100)
    pub win_rate: f64,
}

impl PerformanceSplit {
    /// Goals scored minus goals conceded.
    pub fn goal_difference(&self) -> i64 {
        self.goals_for as i64 - self.goals_against as i64
    }

    /// Check the played/points bookkeeping holds.
    pub fn is_consistent(&self) -> bool {
        self.played == self.wins + self.draws + self.losses
            && self.points == self.wins * 3 + self.draws
    }
}

/// Up to five most recent results, latest first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentFormWindow {
    pub results: Vec<MatchOutcome>,
    pub goals_for: u32,
    pub goals_against: u32,
    pub points: u32,
    pub form_score: f64,
}

impl RecentFormWindow {
    /// Results as a compact string, e.g. "WWDLW".
    pub fn form_string(&self) -> String {
        self.results.iter().map(|r| r.letter()).collect()
    }

    pub fn goal_difference(&self) -> i64 {
        self.goals_for as i64 - self.goals_against as i64
    }
}

/// Derived season metrics for a single team.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamAdvancedMetrics {
    pub team_id: TeamId,
    pub team_name: String,

    /// Season label (e.g., "2025/2026")
    pub season: String,

    pub matches_played: u32,
    pub avg_goals_scored: f64,
    pub avg_goals_conceded: f64,
    pub clean_sheets: u32,

    /// Percentages (0 to 100)
    pub win_rate: f64,
    pub draw_rate: f64,
    pub loss_rate: f64,

    pub goal_difference: i64,

    pub overall: PerformanceSplit,
    pub home_performance: PerformanceSplit,
    pub away_performance: PerformanceSplit,
    pub recent_form: RecentFormWindow,

    /// Strength indices (0 to 100)
    pub attack_strength: f64,
    pub defense_strength: f64,
}

impl TeamAdvancedMetrics {
    /// All-zero metrics for a team with no finished matches.
    pub fn empty(team_id: TeamId, team_name: impl Into<String>, season: impl Into<String>) -> Self {
        Self {
            team_id,
            team_name: team_name.into(),
            season: season.into(),
            matches_played: 0,
            avg_goals_scored: 0.0,
            avg_goals_conceded: 0.0,
            clean_sheets: 0,
            win_rate: 0.0,
            draw_rate: 0.0,
            loss_rate: 0.0,
            goal_difference: 0,
            overall: PerformanceSplit::default(),
            home_performance: PerformanceSplit::default(),
            away_performance: PerformanceSplit::default(),
            recent_form: RecentFormWindow::default(),
            attack_strength: 0.0,
            defense_strength: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_consistency() {
        let split = PerformanceSplit {
            played: 4,
            wins: 2,
            draws: 1,
            losses: 1,
            goals_for: 6,
            goals_against: 4,
            points: 7,
            win_rate: 50.0,
        };
        assert!(split.is_consistent());
        assert_eq!(split.goal_difference(), 2);

        let broken = PerformanceSplit {
            points: 8,
            ..split
        };
        assert!(!broken.is_consistent());
    }

    #[test]
    fn test_form_string() {
        let form = RecentFormWindow {
            results: vec![MatchOutcome::Win, MatchOutcome::Draw, MatchOutcome::Loss],
            ..Default::default()
        };
        assert_eq!(form.form_string(), "WDL");
        assert_eq!(RecentFormWindow::default().form_string(), "");
    }

    #[test]
    fn test_empty_metrics() {
        let metrics = TeamAdvancedMetrics::empty(57, "Arsenal FC", "2025/2026");
        assert_eq!(metrics.matches_played, 0);
        assert_eq!(metrics.win_rate, 0.0);
        assert!(metrics.recent_form.results.is_empty());
        assert!(metrics.home_performance.is_consistent());
    }

    #[test]
    fn test_metrics_serialization() {
        let metrics = TeamAdvancedMetrics::empty(57, "Arsenal FC", "2025/2026");
        let json = serde_json::to_value(&metrics).unwrap();
        assert_eq!(json["homePerformance"]["winRate"], 0.0);
        assert_eq!(json["recentForm"]["formScore"], 0.0);

        let parsed: TeamAdvancedMetrics = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, metrics);
    }
}
