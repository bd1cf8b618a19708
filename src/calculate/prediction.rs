//! Match outcome prediction.
//!
//! Squad aggregates and recent form for both sides feed three raw signals
//! (home, draw, away) which are then normalised into percentages that sum to
//! exactly 100.00.

use crate::models::{
    MatchRecord, RecentFormWindow, SquadPlayer, SquadStats, TeamId, TrendAnalysis,
    WinProbabilities,
};

use super::round2;
use super::team::tally_recent;

/// Prediction form weighting of points against goal difference.
const FORM_POINTS_WEIGHT: f64 = 0.7;
const FORM_GOAL_DIFF_WEIGHT: f64 = 0.3;

/// Baseline share for each decisive outcome.
const BASE_WIN_SIGNAL: f64 = 0.33;
/// Fixed draw baseline, not adjusted by the differentials.
const DRAW_SIGNAL: f64 = 0.34;

const RATING_WEIGHT: f64 = 0.03;
const GOALS_WEIGHT: f64 = 0.02;
const FORM_WEIGHT: f64 = 0.04;

/// Aggregate rating, goals and assists over a roster.
///
/// The average rating only counts players that have a rating.
pub fn squad_stats(players: &[SquadPlayer]) -> SquadStats {
    let rated: Vec<f64> = players
        .iter()
        .map(|p| p.rating)
        .filter(|r| *r > 0.0)
        .collect();
    let average_rating = if rated.is_empty() {
        0.0
    } else {
        round2(rated.iter().sum::<f64>() / rated.len() as f64)
    };

    SquadStats {
        player_count: players.len() as u32,
        average_rating,
        total_goals: players.iter().map(|p| p.goals).sum(),
        total_assists: players.iter().map(|p| p.assists).sum(),
    }
}

/// Recent form as used by the prediction model: `points*0.7 + goalDiff*0.3`.
///
/// Not the same scale as the team metrics form score.
pub fn prediction_form(team_id: TeamId, matches: &[MatchRecord]) -> RecentFormWindow {
    let mut window = tally_recent(team_id, matches);
    window.form_score = round2(
        window.points as f64 * FORM_POINTS_WEIGHT
            + window.goal_difference() as f64 * FORM_GOAL_DIFF_WEIGHT,
    );
    window
}

/// Element-wise averages of both sides.
pub fn trend_analysis(
    home: &SquadStats,
    away: &SquadStats,
    home_form: &RecentFormWindow,
    away_form: &RecentFormWindow,
) -> TrendAnalysis {
    let avg = |a: f64, b: f64| round2((a + b) / 2.0);
    TrendAnalysis {
        average_rating: avg(home.average_rating, away.average_rating),
        average_goals: avg(home.total_goals as f64, away.total_goals as f64),
        average_assists: avg(home.total_assists as f64, away.total_assists as f64),
        average_form_score: avg(home_form.form_score, away_form.form_score),
    }
}

/// Raw weighted signals in `[home, draw, away]` order, possibly negative.
pub fn raw_outcome_signals(rating_diff: f64, goals_diff: f64, form_diff: f64) -> [f64; 3] {
    let swing = RATING_WEIGHT * rating_diff + GOALS_WEIGHT * goals_diff + FORM_WEIGHT * form_diff;
    [BASE_WIN_SIGNAL + swing, DRAW_SIGNAL, BASE_WIN_SIGNAL - swing]
}

/// Index of the largest value; the first one wins ties.
fn largest_index(values: &[f64; 3]) -> usize {
    let mut best = 0;
    for (i, v) in values.iter().enumerate().skip(1) {
        if *v > values[best] {
            best = i;
        }
    }
    best
}

/// Turn `[home, draw, away]` signals into percentages summing to exactly 100.00.
///
/// Negative signals are floored at 0. If nothing positive remains, all three
/// outcomes get equal weight. Each share is rounded to 2 decimals and the
/// rounding remainder (positive or negative) goes entirely to the largest
/// share.
pub fn normalize_probabilities(raw: [f64; 3]) -> WinProbabilities {
    let mut weights = raw.map(|v| v.max(0.0));
    let mut total: f64 = weights.iter().sum();
    if total <= 0.0 {
        weights = [1.0; 3];
        total = 3.0;
    }

    let mut shares = weights.map(|w| round2(w / total * 100.0));
    let remainder = round2(100.0 - shares.iter().sum::<f64>());
    if remainder != 0.0 {
        let idx = largest_index(&shares);
        shares[idx] = round2(shares[idx] + remainder);
    }

    WinProbabilities {
        home_win: shares[0],
        draw: shares[1],
        away_win: shares[2],
    }
}

/// Outcome probabilities from both sides' squad aggregates and form.
pub fn predict_probabilities(
    home: &SquadStats,
    away: &SquadStats,
    home_form: &RecentFormWindow,
    away_form: &RecentFormWindow,
) -> WinProbabilities {
    let rating_diff = home.average_rating - away.average_rating;
    let goals_diff = home.total_goals as f64 - away.total_goals as f64;
    let form_diff = home_form.form_score - away_form.form_score;
    normalize_probabilities(raw_outcome_signals(rating_diff, goals_diff, form_diff))
}
