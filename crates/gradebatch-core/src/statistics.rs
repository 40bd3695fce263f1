//! Result aggregation and cohort statistics.

use serde::{Deserialize, Serialize};

use crate::model::{AnswerRecord, NormalizedResult, RawScoreItem};
use crate::normalize::normalize;

/// Share of `marks_out_of`, in percent, needed to count as passing.
pub const PASS_PERCENT: u32 = 70;

/// Zip records with their raw scores into report rows, preserving order.
///
/// The two slices must be the same length; [`crate::traits::score_batch`]
/// guarantees this for anything returned by a scoring service.
///
/// # Panics
///
/// Panics if the lengths differ, rather than silently dropping rows.
pub fn aggregate(
    records: &[AnswerRecord],
    items: &[RawScoreItem],
    marks_out_of: u32,
) -> Vec<NormalizedResult> {
    assert_eq!(
        records.len(),
        items.len(),
        "aggregate needs exactly one score per record"
    );

    records
        .iter()
        .zip(items)
        .map(|(record, item)| {
            let scaled = normalize(item, marks_out_of);
            NormalizedResult {
                identifier: record.identifier.clone(),
                answer_text: record.answer_text.clone(),
                semantic_pct: scaled.semantic_pct,
                keyword_pct: scaled.keyword_pct,
                grammar_pct: scaled.grammar_pct,
                final_score: scaled.final_score,
            }
        })
        .collect()
}

/// Minimum final score that counts as a pass.
pub fn pass_threshold(marks_out_of: u32) -> f64 {
    f64::from(marks_out_of) * f64::from(PASS_PERCENT) / 100.0
}

/// Summary statistics over one cohort's final scores.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CohortStatistics {
    /// Number of results the statistics cover.
    pub count: usize,
    pub average: f64,
    pub max: f64,
    pub min: f64,
    /// Results with `final_score >= pass_threshold(marks_out_of)`.
    pub pass_count: usize,
}

impl CohortStatistics {
    /// Compute statistics from scratch. Returns `None` for an empty cohort.
    pub fn compute(results: &[NormalizedResult], marks_out_of: u32) -> Option<Self> {
        if results.is_empty() {
            return None;
        }

        let threshold = pass_threshold(marks_out_of);
        let mut sum = 0.0;
        let mut max = f64::NEG_INFINITY;
        let mut min = f64::INFINITY;
        let mut pass_count = 0;

        for r in results {
            sum += r.final_score;
            max = max.max(r.final_score);
            min = min.min(r.final_score);
            if r.final_score >= threshold {
                pass_count += 1;
            }
        }

        Some(Self {
            count: results.len(),
            average: sum / results.len() as f64,
            max,
            min,
            pass_count,
        })
    }
}
