//! Score normalization.
//!
//! Rounding is half away from zero at two decimal places (`f64::round`).
//! Out-of-range fractions are propagated unchanged; nothing is clamped.

use crate::model::RawScoreItem;

/// Scaled fields for one raw score item.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaledScores {
    pub semantic_pct: f64,
    pub keyword_pct: f64,
    pub grammar_pct: f64,
    pub final_score: f64,
}

/// Round to two decimal places, half away from zero.
pub fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

/// Convert a fraction to a percentage rounded to two decimals.
pub fn percentage(fraction: f64) -> f64 {
    round2(fraction * 100.0)
}

/// Scale the predicted fraction to marks, rounded to two decimals.
pub fn final_score(predicted: f64, marks_out_of: u32) -> f64 {
    round2(predicted * f64::from(marks_out_of))
}

/// Scale one raw item.
pub fn normalize(item: &RawScoreItem, marks_out_of: u32) -> ScaledScores {
    ScaledScores {
        semantic_pct: percentage(item.semantic),
        keyword_pct: percentage(item.keyword),
        grammar_pct: percentage(item.grammar),
        final_score: final_score(item.predicted, marks_out_of),
    }
}
