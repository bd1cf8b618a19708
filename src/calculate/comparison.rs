//! Side-by-side team comparison and head-to-head history.

use crate::models::{
    most_recent, HeadToHeadData, MatchOutcome, MatchRecord, MeetingSummary, TeamComparisonData,
    TeamId, DRAW_LABEL,
};

use super::team::tally_recent;

/// Number of past meetings kept in a head-to-head summary.
pub const HEAD_TO_HEAD_MATCHES: usize = 5;

/// Short-term record over the team's latest five finished matches.
pub fn comparison_data(
    team_id: TeamId,
    team_name: &str,
    matches: &[MatchRecord],
    league_position: Option<u32>,
) -> TeamComparisonData {
    let window = tally_recent(team_id, matches);

    let mut data = TeamComparisonData {
        team_id,
        team_name: team_name.to_string(),
        matches_played: window.results.len() as u32,
        goals_for: window.goals_for,
        goals_against: window.goals_against,
        points: window.points,
        form: window.form_string(),
        league_position,
        ..Default::default()
    };
    for result in &window.results {
        match result {
            MatchOutcome::Win => data.wins += 1,
            MatchOutcome::Draw => data.draws += 1,
            MatchOutcome::Loss => data.losses += 1,
        }
    }

    data
}

/// Team name as it appears on the team's most recent fixture.
pub fn team_name_from_matches(team_id: TeamId, matches: &[MatchRecord]) -> Option<String> {
    let involved: Vec<MatchRecord> = matches
        .iter()
        .filter(|m| m.involves(team_id))
        .cloned()
        .collect();
    most_recent(&involved, 1)
        .first()
        .map(|m| m.side_of(team_id).name.clone())
}

fn meeting_summary(m: &MatchRecord) -> Option<MeetingSummary> {
    let score = m.score?;
    let winner = match MatchOutcome::from_goals(score.home, score.away) {
        MatchOutcome::Win => m.home_team.name.clone(),
        MatchOutcome::Loss => m.away_team.name.clone(),
        MatchOutcome::Draw => DRAW_LABEL.to_string(),
    };

    Some(MeetingSummary {
        date: m.utc_date,
        competition: m.competition.clone(),
        home_team: m.home_team.name.clone(),
        away_team: m.away_team.name.clone(),
        home_goals: score.home,
        away_goals: score.away,
        winner,
    })
}

/// Head-to-head record from `team1`'s match list.
///
/// Only finished fixtures between the two teams count, latest five first.
pub fn head_to_head(team1: TeamId, team2: TeamId, team1_matches: &[MatchRecord]) -> HeadToHeadData {
    let meetings: Vec<MatchRecord> = team1_matches
        .iter()
        .filter(|m| m.is_finished() && m.involves(team1) && m.opponent_of(team1).id == team2)
        .cloned()
        .collect();

    let mut h2h = HeadToHeadData::default();
    for m in most_recent(&meetings, HEAD_TO_HEAD_MATCHES) {
        let Some(outcome) = m.outcome_for(team1) else {
            continue;
        };
        match outcome {
            MatchOutcome::Win => h2h.team1_wins += 1,
            MatchOutcome::Loss => h2h.team2_wins += 1,
            MatchOutcome::Draw => h2h.draws += 1,
        }
        h2h.total_matches += 1;
        h2h.last_meetings.extend(meeting_summary(m));
    }

    h2h
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculate::team::tests::{fixture, scenario_a, TEAM};

    const RIVAL: TeamId = 61;

    #[test]
    fn test_comparison_data_recent_five() {
        let mut matches = scenario_a();
        matches.push(fixture(-14, TEAM, 8, 4, 0));

        let data = comparison_data(TEAM, "Arsenal FC", &matches, Some(2));
        assert_eq!(data.matches_played, 5);
        assert_eq!(data.wins, 3);
        assert_eq!(data.draws, 0);
        assert_eq!(data.losses, 2);
        assert_eq!(data.goals_for, 8);
        assert_eq!(data.goals_against, 5);
        assert_eq!(data.points, 9);
        assert_eq!(data.form, "LLWWW");
        assert_eq!(data.league_position, Some(2));
    }

    #[test]
    fn test_comparison_data_no_matches() {
        let data = comparison_data(TEAM, "Arsenal FC", &[], None);
        assert_eq!(data.matches_played, 0);
        assert_eq!(data.form, "");
        assert_eq!(data.league_position, None);
    }

    #[test]
    fn test_team_name_from_matches() {
        let matches = scenario_a();
        assert_eq!(
            team_name_from_matches(TEAM, &matches),
            Some(format!("Team {}", TEAM))
        );
        assert_eq!(team_name_from_matches(999, &matches), None);
    }

    #[test]
    fn test_head_to_head_tallies_and_labels() {
        let matches = vec![
            fixture(0, TEAM, RIVAL, 2, 1),
            fixture(10, RIVAL, TEAM, 0, 0),
            fixture(20, RIVAL, TEAM, 3, 1),
            fixture(30, TEAM, 5, 4, 0),
        ];

        let h2h = head_to_head(TEAM, RIVAL, &matches);
        assert_eq!(h2h.total_matches, 3);
        assert_eq!(h2h.team1_wins, 1);
        assert_eq!(h2h.team2_wins, 1);
        assert_eq!(h2h.draws, 1);

        let winners: Vec<&str> = h2h.last_meetings.iter().map(|m| m.winner.as_str()).collect();
        assert_eq!(winners, vec!["Team 61", DRAW_LABEL, "Team 57"]);
    }

    #[test]
    fn test_head_to_head_caps_at_five() {
        let matches: Vec<MatchRecord> = (0..8)
            .map(|i| fixture(i * 7, TEAM, RIVAL, 1, 0))
            .collect();

        let h2h = head_to_head(TEAM, RIVAL, &matches);
        assert_eq!(h2h.total_matches, 5);
        assert_eq!(h2h.team1_wins, 5);
        assert_eq!(h2h.last_meetings.len(), 5);
        assert!(h2h.last_meetings[0].date > h2h.last_meetings[4].date);
    }

    #[test]
    fn test_scenario_d_empty_head_to_head() {
        let h2h = head_to_head(TEAM, RIVAL, &[]);
        assert_eq!(h2h, HeadToHeadData::default());
        assert_eq!(h2h.total_matches, 0);
        assert!(h2h.last_meetings.is_empty());
    }
}
