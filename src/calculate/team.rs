//! Team season aggregation and strength indices.

use crate::models::{
    most_recent, MatchOutcome, MatchRecord, PerformanceSplit, RecentFormWindow,
    TeamAdvancedMetrics, TeamId,
};

use super::{clamp_percentage, percentage, round2, safe_div};

/// Number of matches in a recent form window.
pub const RECENT_FORM_MATCHES: usize = 5;

/// Goals per match treated as maximal attacking strength (or defensive weakness).
pub const STRENGTH_REFERENCE_GOALS: f64 = 3.0;

/// Maximum points obtainable over a full form window.
const MAX_FORM_POINTS: f64 = (RECENT_FORM_MATCHES as u32 * 3) as f64;

/// Add one finished match to a split. `win_rate` is settled by [`finish_split`].
fn record_result(split: &mut PerformanceSplit, goals_for: u32, goals_against: u32) {
    split.played += 1;
    split.goals_for += goals_for;
    split.goals_against += goals_against;

    let outcome = MatchOutcome::from_goals(goals_for, goals_against);
    match outcome {
        MatchOutcome::Win => split.wins += 1,
        MatchOutcome::Draw => split.draws += 1,
        MatchOutcome::Loss => split.losses += 1,
    }
    split.points += outcome.points();
}

fn finish_split(mut split: PerformanceSplit) -> PerformanceSplit {
    split.win_rate = percentage(split.wins as f64, split.played as f64);
    split
}

/// Overall, home and away splits plus clean sheets.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SeasonTally {
    pub overall: PerformanceSplit,
    pub home: PerformanceSplit,
    pub away: PerformanceSplit,
    pub clean_sheets: u32,
}

/// Fold finished matches into overall/home/away splits.
///
/// Home or away is decided by comparing `team_id` with the home side's id.
/// Fixtures without a score are skipped.
pub fn tally_season(team_id: TeamId, matches: &[MatchRecord]) -> SeasonTally {
    let mut tally = SeasonTally::default();

    for m in matches {
        let Some((goals_for, goals_against)) = m.goals_for_against(team_id) else {
            continue;
        };

        record_result(&mut tally.overall, goals_for, goals_against);
        if m.is_home(team_id) {
            record_result(&mut tally.home, goals_for, goals_against);
        } else {
            record_result(&mut tally.away, goals_for, goals_against);
        }

        if goals_against == 0 {
            tally.clean_sheets += 1;
        }
    }

    SeasonTally {
        overall: finish_split(tally.overall),
        home: finish_split(tally.home),
        away: finish_split(tally.away),
        clean_sheets: tally.clean_sheets,
    }
}

/// Results, goals and points over the latest five finished matches.
///
/// Leaves `form_score` at zero; callers apply their own scoring formula.
pub(crate) fn tally_recent(team_id: TeamId, matches: &[MatchRecord]) -> RecentFormWindow {
    let finished: Vec<MatchRecord> = matches.iter().filter(|m| m.is_finished()).cloned().collect();
    let mut window = RecentFormWindow::default();

    for m in most_recent(&finished, RECENT_FORM_MATCHES) {
        let Some((goals_for, goals_against)) = m.goals_for_against(team_id) else {
            continue;
        };
        let outcome = MatchOutcome::from_goals(goals_for, goals_against);
        window.results.push(outcome);
        window.goals_for += goals_for;
        window.goals_against += goals_against;
        window.points += outcome.points();
    }

    window
}

/// Recent form as used by team metrics: share of the 15 available points.
pub fn team_metrics_form(team_id: TeamId, matches: &[MatchRecord]) -> RecentFormWindow {
    let mut window = tally_recent(team_id, matches);
    window.form_score = round2(window.points as f64 / MAX_FORM_POINTS * 100.0);
    window
}

/// Attacking strength on a 0..=100 scale.
pub fn attack_strength(avg_goals_scored: f64) -> f64 {
    round2(clamp_percentage(
        avg_goals_scored / STRENGTH_REFERENCE_GOALS * 100.0,
    ))
}

/// Defensive strength on a 0..=100 scale.
pub fn defense_strength(avg_goals_conceded: f64) -> f64 {
    round2(clamp_percentage(
        100.0 - avg_goals_conceded / STRENGTH_REFERENCE_GOALS * 100.0,
    ))
}

/// Compute the full set of season metrics for one team.
pub fn aggregate_team_season(
    team_id: TeamId,
    team_name: &str,
    season: &str,
    matches: &[MatchRecord],
) -> TeamAdvancedMetrics {
    let tally = tally_season(team_id, matches);
    let overall = &tally.overall;

    if overall.played == 0 {
        return TeamAdvancedMetrics::empty(team_id, team_name, season);
    }

    let played = overall.played as f64;
    let goal_difference = overall.goal_difference();
    let avg_goals_scored = round2(safe_div(overall.goals_for as f64, played));
    let avg_goals_conceded = round2(safe_div(overall.goals_against as f64, played));

    TeamAdvancedMetrics {
        team_id,
        team_name: team_name.to_string(),
        season: season.to_string(),
        matches_played: overall.played,
        avg_goals_scored,
        avg_goals_conceded,
        clean_sheets: tally.clean_sheets,
        win_rate: percentage(tally.overall.wins as f64, played),
        draw_rate: percentage(tally.overall.draws as f64, played),
        loss_rate: percentage(tally.overall.losses as f64, played),
        goal_difference,
        recent_form: team_metrics_form(team_id, matches),
        attack_strength: attack_strength(avg_goals_scored),
        defense_strength: defense_strength(avg_goals_conceded),
        overall: tally.overall,
        home_performance: tally.home,
        away_performance: tally.away,
    }
}
