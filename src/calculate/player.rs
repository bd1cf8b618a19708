//! Player season rates, efficiency, impact and versatility.

use tracing::debug;

use crate::models::{EfficiencyMetrics, PlayerAdvancedMetrics, PlayerStatRow};

use super::{clamp_percentage, round2, safe_div};

/// Dribbles per 90 minutes treated as a perfect dribbling profile.
pub const DRIBBLE_REFERENCE_PER90: f64 = 5.0;

/// Impact weights: goals > assists > key passes = dribbles.
const GOAL_WEIGHT: f64 = 3.0;
const ASSIST_WEIGHT: f64 = 2.0;
const KEY_PASS_WEIGHT: f64 = 1.0;
const DRIBBLE_WEIGHT: f64 = 1.0;

const MINUTES_PER_MATCH: f64 = 90.0;

/// Parse a numeric cell, treating placeholders ("-", "") and junk as 0.
pub fn parse_number(cell: &str) -> f64 {
    let cleaned = cell.trim().trim_end_matches('%').replace(',', "");
    if cleaned.is_empty() || cleaned == "-" {
        return 0.0;
    }

    match cleaned.parse::<f64>() {
        Ok(value) if value.is_finite() => value,
        _ => {
            debug!("Unparseable stat cell {:?}, defaulting to 0", cell);
            0.0
        }
    }
}

/// Parse a whole-number cell. Negative or fractional values are floored at 0.
pub fn parse_count(cell: &str) -> u32 {
    let value = parse_number(cell);
    if value <= 0.0 {
        0
    } else {
        value.round() as u32
    }
}

/// Parse a rate cell (per game, per 90, rating). These are never negative, so
/// a negative value is treated as malformed and floored at 0.
pub fn parse_rate(cell: &str) -> f64 {
    let value = parse_number(cell);
    if value < 0.0 {
        debug!("Negative rate cell {:?}, defaulting to 0", cell);
        return 0.0;
    }
    value
}

/// Parse an appearances cell such as "10(2)", keeping only the leading count.
pub fn parse_appearances(cell: &str) -> u32 {
    let starts = match cell.split_once('(') {
        Some((starts, _)) => starts,
        None => cell,
    };
    parse_count(starts)
}

/// Numeric view of a statistics row.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PlayerTotals {
    pub matches: u32,
    pub minutes: u32,
    pub goals: u32,
    pub assists: u32,
    pub yellow_cards: u32,
    pub red_cards: u32,
    pub shots_per_game: f64,
    pub key_passes_per90: f64,
    pub dribbles_per90: f64,
    pub rating: f64,
}

impl PlayerTotals {
    pub fn from_row(row: &PlayerStatRow) -> Self {
        Self {
            matches: parse_appearances(&row.appearances),
            minutes: parse_count(&row.minutes),
            goals: parse_count(&row.goals),
            assists: parse_count(&row.assists),
            yellow_cards: parse_count(&row.yellow_cards),
            red_cards: parse_count(&row.red_cards),
            shots_per_game: parse_rate(&row.shots_per_game),
            key_passes_per90: parse_rate(&row.key_passes_per90),
            dribbles_per90: parse_rate(&row.dribbles_per90),
            rating: parse_rate(&row.rating),
        }
    }

    /// Minutes expressed as full 90-minute matches.
    fn nineties(&self) -> f64 {
        self.minutes as f64 / MINUTES_PER_MATCH
    }

    pub fn total_key_passes(&self) -> f64 {
        self.key_passes_per90 * self.nineties()
    }

    pub fn total_dribbles(&self) -> f64 {
        self.dribbles_per90 * self.nineties()
    }
}

/// `total / matches`, 0 when no matches.
pub fn per_match(total: f64, matches: u32) -> f64 {
    round2(safe_div(total, matches as f64))
}

/// `total / (minutes / 90)`, 0 when no minutes.
pub fn per90(total: f64, minutes: u32) -> f64 {
    round2(safe_div(total, minutes as f64 / MINUTES_PER_MATCH))
}

/// Minutes needed per event, absent when there were no events.
pub fn minutes_per(count: u32, minutes: u32) -> Option<f64> {
    (count > 0).then(|| round2(minutes as f64 / count as f64))
}

/// Shooting, creativity, dribbling and availability ratios.
pub fn efficiency(totals: &PlayerTotals) -> EfficiencyMetrics {
    let shots = totals.shots_per_game * totals.matches as f64;
    let key_passes = totals.total_key_passes();

    EfficiencyMetrics {
        shot_accuracy: round2(safe_div(totals.goals as f64, shots) * 100.0),
        creative_efficiency: round2(safe_div(totals.assists as f64, key_passes) * 100.0),
        dribble_success_rate: round2(clamp_percentage(
            totals.dribbles_per90 / DRIBBLE_REFERENCE_PER90 * 100.0,
        )),
        playing_time_percentage: round2(
            safe_div(
                totals.minutes as f64,
                totals.matches as f64 * MINUTES_PER_MATCH,
            ) * 100.0,
        ),
    }
}

/// Weighted contribution per match, scaled by the player's rating out of 10.
pub fn impact_score(totals: &PlayerTotals) -> f64 {
    let weighted = totals.goals as f64 * GOAL_WEIGHT
        + totals.assists as f64 * ASSIST_WEIGHT
        + totals.total_key_passes() * KEY_PASS_WEIGHT
        + totals.total_dribbles() * DRIBBLE_WEIGHT;
    let raw_impact = safe_div(weighted, totals.matches as f64);
    let rating_factor = totals.rating / 10.0;
    round2(raw_impact * rating_factor)
}

/// Balance across per-90 signals: 100 when all equal, lower as they spread apart.
///
/// Computed as `(1 - cv) * 100` where `cv` is the coefficient of variation
/// (population standard deviation over mean), clamped to 0..=1.
pub fn versatility_index(rates: &[f64]) -> f64 {
    if rates.is_empty() {
        return 0.0;
    }

    let n = rates.len() as f64;
    let mean = rates.iter().sum::<f64>() / n;
    if mean <= 0.0 {
        return 0.0;
    }

    let variance = rates.iter().map(|r| (r - mean).powi(2)).sum::<f64>() / n;
    let cv = (variance.sqrt() / mean).clamp(0.0, 1.0);
    round2((1.0 - cv) * 100.0)
}

/// Build player metrics from the aggregated "totalAverage" row.
///
/// `total_average` is the cross-competition summary; per-competition rows are
/// only used for the competition list, never summed. Without a summary row the
/// result is all zero.
pub fn aggregate_player_season(
    player_id: &str,
    player_name: &str,
    season: &str,
    rows: &[PlayerStatRow],
    total_average: Option<&PlayerStatRow>,
) -> PlayerAdvancedMetrics {
    let mut metrics = PlayerAdvancedMetrics::empty(player_id, player_name, season);
    metrics.competitions = rows
        .iter()
        .map(|r| r.competition.trim().to_string())
        .filter(|c| !c.is_empty())
        .collect();

    let Some(row) = total_average else {
        return metrics;
    };
    let totals = PlayerTotals::from_row(row);

    let goals_per90 = per90(totals.goals as f64, totals.minutes);
    let assists_per90 = per90(totals.assists as f64, totals.minutes);
    let contributions = totals.goals + totals.assists;

    PlayerAdvancedMetrics {
        total_matches: totals.matches,
        total_minutes: totals.minutes,
        goals: totals.goals,
        assists: totals.assists,
        goals_per_match: per_match(totals.goals as f64, totals.matches),
        assists_per_match: per_match(totals.assists as f64, totals.matches),
        goals_per90,
        assists_per90,
        goal_contributions: contributions,
        goal_contributions_per90: per90(contributions as f64, totals.minutes),
        minutes_per_goal: minutes_per(totals.goals, totals.minutes),
        minutes_per_assist: minutes_per(totals.assists, totals.minutes),
        yellow_cards: totals.yellow_cards,
        red_cards: totals.red_cards,
        yellow_cards_per_match: per_match(totals.yellow_cards as f64, totals.matches),
        red_cards_per_match: per_match(totals.red_cards as f64, totals.matches),
        efficiency: efficiency(&totals),
        impact_score: impact_score(&totals),
        versatility_index: versatility_index(&[
            goals_per90,
            assists_per90,
            totals.key_passes_per90,
            totals.dribbles_per90,
        ]),
        ..metrics
    }
}
