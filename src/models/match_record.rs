//! Match record model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::TeamId;

/// Team identity as it appears on a fixture.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamRef {
    pub id: TeamId,
    pub name: String,
}

impl TeamRef {
    pub fn new(id: TeamId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// Full-time score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub home: u32,
    pub away: u32,
}

/// Result of a match from one team's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchOutcome {
    #[serde(rename = "W")]
    Win,
    #[serde(rename = "D")]
    Draw,
    #[serde(rename = "L")]
    Loss,
}

impl MatchOutcome {
    /// Classify from goals scored and conceded.
    pub fn from_goals(goals_for: u32, goals_against: u32) -> Self {
        if goals_for > goals_against {
            MatchOutcome::Win
        } else if goals_for == goals_against {
            MatchOutcome::Draw
        } else {
            MatchOutcome::Loss
        }
    }

    /// League points: 3 for a win, 1 for a draw.
    pub fn points(&self) -> u32 {
        match self {
            MatchOutcome::Win => 3,
            MatchOutcome::Draw => 1,
            MatchOutcome::Loss => 0,
        }
    }

    pub fn letter(&self) -> char {
        match self {
            MatchOutcome::Win => 'W',
            MatchOutcome::Draw => 'D',
            MatchOutcome::Loss => 'L',
        }
    }
}

impl std::fmt::Display for MatchOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// A single fixture between two teams.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchRecord {
    /// Competition name (e.g., "Premier League")
    pub competition: String,

    pub home_team: TeamRef,

    pub away_team: TeamRef,

    /// Kick-off time
    pub utc_date: DateTime<Utc>,

    /// Full-time score, absent for unplayed fixtures
    pub score: Option<Score>,
}

impl MatchRecord {
    /// Whether the match has a full-time score.
    pub fn is_finished(&self) -> bool {
        self.score.is_some()
    }

    /// Whether the given team played at home.
    pub fn is_home(&self, team_id: TeamId) -> bool {
        self.home_team.id == team_id
    }

    /// Whether the given team took part in this match.
    pub fn involves(&self, team_id: TeamId) -> bool {
        self.home_team.id == team_id || self.away_team.id == team_id
    }

    /// Goals (for, against) from the given team's perspective.
    ///
    /// Any team id that is not the home side is treated as the away side.
    pub fn goals_for_against(&self, team_id: TeamId) -> Option<(u32, u32)> {
        let score = self.score?;
        if self.is_home(team_id) {
            Some((score.home, score.away))
        } else {
            Some((score.away, score.home))
        }
    }

    /// Outcome from the given team's perspective.
    pub fn outcome_for(&self, team_id: TeamId) -> Option<MatchOutcome> {
        self.goals_for_against(team_id)
            .map(|(gf, ga)| MatchOutcome::from_goals(gf, ga))
    }

    /// The team on the other side of the fixture.
    pub fn opponent_of(&self, team_id: TeamId) -> &TeamRef {
        if self.is_home(team_id) {
            &self.away_team
        } else {
            &self.home_team
        }
    }

    /// The given team's own identity on this fixture.
    pub fn side_of(&self, team_id: TeamId) -> &TeamRef {
        if self.is_home(team_id) {
            &self.home_team
        } else {
            &self.away_team
        }
    }
}

/// Most recent `n` matches, latest first.
///
/// The sort is stable, so matches sharing a kick-off time keep their input order.
pub fn most_recent(matches: &[MatchRecord], n: usize) -> Vec<&MatchRecord> {
    let mut sorted: Vec<&MatchRecord> = matches.iter().collect();
    sorted.sort_by(|a, b| b.utc_date.cmp(&a.utc_date));
    sorted.truncate(n);
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn record(day: u32, home: TeamId, away: TeamId, score: Option<(u32, u32)>) -> MatchRecord {
        MatchRecord {
            competition: "Premier League".to_string(),
            home_team: TeamRef::new(home, format!("Team {}", home)),
            away_team: TeamRef::new(away, format!("Team {}", away)),
            utc_date: Utc.with_ymd_and_hms(2025, 9, day, 15, 0, 0).unwrap(),
            score: score.map(|(home, away)| Score { home, away }),
        }
    }

    #[test]
    fn test_outcome_from_goals() {
        assert_eq!(MatchOutcome::from_goals(2, 1), MatchOutcome::Win);
        assert_eq!(MatchOutcome::from_goals(1, 1), MatchOutcome::Draw);
        assert_eq!(MatchOutcome::from_goals(0, 3), MatchOutcome::Loss);
    }

    #[test]
    fn test_outcome_points() {
        assert_eq!(MatchOutcome::Win.points(), 3);
        assert_eq!(MatchOutcome::Draw.points(), 1);
        assert_eq!(MatchOutcome::Loss.points(), 0);
    }

    #[test]
    fn test_outcome_serialization() {
        let json = serde_json::to_string(&MatchOutcome::Draw).unwrap();
        assert_eq!(json, "\"D\"");
        assert_eq!(format!("{}", MatchOutcome::Loss), "L");
    }

    #[test]
    fn test_goals_for_against_perspective() {
        let m = record(1, 10, 20, Some((3, 1)));
        assert_eq!(m.goals_for_against(10), Some((3, 1)));
        assert_eq!(m.goals_for_against(20), Some((1, 3)));
        assert_eq!(m.outcome_for(20), Some(MatchOutcome::Loss));
        assert_eq!(m.opponent_of(10).id, 20);
        assert_eq!(m.side_of(20).name, "Team 20");
    }

    #[test]
    fn test_unplayed_fixture() {
        let m = record(1, 10, 20, None);
        assert!(!m.is_finished());
        assert_eq!(m.outcome_for(10), None);
    }

    #[test]
    fn test_most_recent_is_stable() {
        let a = record(5, 1, 2, Some((0, 0)));
        let b = record(5, 1, 3, Some((1, 0)));
        let c = record(9, 1, 4, Some((2, 0)));
        let matches = vec![a, b, c];

        let recent = most_recent(&matches, 2);
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].away_team.id, 4);
        // Same kick-off: input order wins
        assert_eq!(recent[1].away_team.id, 2);
    }

    #[test]
    fn test_match_record_camel_case() {
        let m = record(1, 10, 20, Some((1, 0)));
        let json = serde_json::to_value(&m).unwrap();
        assert!(json.get("homeTeam").is_some());
        assert!(json.get("utcDate").is_some());
    }
}
