//! Metrics and prediction computation engine.
//!
//! Pure, deterministic transformations from match records and player totals
//! into derived metrics:
//! - Team season aggregation and strength indices
//! - Player per-match/per-90 rates, efficiency, impact and versatility
//! - Team comparison and head-to-head history
//! - Match outcome probabilities
//!
//! Nothing in here performs I/O or reads the clock.

pub mod comparison;
pub mod player;
pub mod prediction;
pub mod team;

/// Round to 2 decimal places, half away from zero.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Divide, yielding 0.0 when the denominator is not positive.
pub fn safe_div(numerator: f64, denominator: f64) -> f64 {
    if denominator <= 0.0 {
        0.0
    } else {
        numerator / denominator
    }
}

/// Clamp a value into the 0..=100 percentage range.
pub fn clamp_percentage(value: f64) -> f64 {
    value.clamp(0.0, 100.0)
}

/// `part / whole` as a percentage rounded to 2 decimals (0.0 for an empty whole).
pub fn percentage(part: f64, whole: f64) -> f64 {
    round2(safe_div(part, whole) * 100.0)
}
