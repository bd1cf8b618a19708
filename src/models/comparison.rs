//! Team comparison and head-to-head models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::TeamId;

/// Winner label used when a meeting ended level.
pub const DRAW_LABEL: &str = "Draw";

/// Short-term record of one team for a side-by-side comparison.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamComparisonData {
    pub team_id: TeamId,
    pub team_name: String,
    pub matches_played: u32,
    pub wins: u32,
    pub draws: u32,
    pub losses: u32,
    pub goals_for: u32,
    pub goals_against: u32,
    pub points: u32,

    /// Up to five W/D/L letters, latest first
    pub form: String,

    /// 1-based league position, absent when the lookup failed
    pub league_position: Option<u32>,
}

/// Summary of a single past meeting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeetingSummary {
    pub date: DateTime<Utc>,
    pub competition: String,
    pub home_team: String,
    pub away_team: String,
    pub home_goals: u32,
    pub away_goals: u32,

    /// Winning team name, or "Draw"
    pub winner: String,
}

/// Head-to-head record between two teams.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeadToHeadData {
    pub team1_wins: u32,
    pub team2_wins: u32,
    pub draws: u32,
    pub total_matches: u32,
    pub last_meetings: Vec<MeetingSummary>,
}

/// Full comparison between two teams.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamComparisonResponse {
    pub team1: TeamComparisonData,
    pub team2: TeamComparisonData,
    pub head_to_head: HeadToHeadData,
}
