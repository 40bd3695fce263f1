//! Core data model types for gradebatch.
//!
//! Every sequence in this module is positional: the i-th response, the i-th
//! raw score, and the i-th normalized result all belong to the i-th record.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Default `marks_out_of` when the operator does not supply one.
pub const DEFAULT_MARKS_OUT_OF: u32 = 10;

/// One ingested student answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerRecord {
    /// Raw first-column value. Not required to be numeric or unique.
    pub identifier: String,
    /// Second-column value, trimmed.
    pub answer_text: String,
}

impl AnswerRecord {
    pub fn new(identifier: impl Into<String>, answer_text: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            answer_text: answer_text.into(),
        }
    }
}

/// A single batched request to the scoring service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationRequest {
    /// The reference answer every response is scored against.
    pub reference_answer: String,
    /// Response texts in input order.
    pub responses: Vec<String>,
}

impl EvaluationRequest {
    /// Number of responses in the batch.
    pub fn len(&self) -> usize {
        self.responses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.responses.is_empty()
    }
}

/// Raw fractional scores for one response, as returned by the scoring service.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RawScoreItem {
    pub semantic: f64,
    pub keyword: f64,
    pub grammar: f64,
    /// Combined predicted fraction.
    pub predicted: f64,
}

/// One row of the final report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedResult {
    pub identifier: String,
    pub answer_text: String,
    /// Semantic similarity percentage, rounded to 2 decimals.
    pub semantic_pct: f64,
    /// Keyword overlap percentage, rounded to 2 decimals.
    pub keyword_pct: f64,
    /// Grammar quality percentage, rounded to 2 decimals.
    pub grammar_pct: f64,
    /// Marks awarded out of `marks_out_of`, rounded to 2 decimals.
    pub final_score: f64,
}

impl NormalizedResult {
    /// Final score as a percentage of `marks_out_of`.
    pub fn final_pct(&self, marks_out_of: u32) -> f64 {
        self.final_score / f64::from(marks_out_of) * 100.0
    }

    /// Display band for this result's final score.
    pub fn band(&self, marks_out_of: u32) -> ScoreBand {
        ScoreBand::for_percentage(self.final_pct(marks_out_of))
    }
}

/// Coarse display band for a percentage score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreBand {
    Excellent,
    Good,
    Fair,
    NeedsWork,
}

impl ScoreBand {
    /// Band a percentage: 85+ excellent, 70+ good, 60+ fair.
    pub fn for_percentage(pct: f64) -> Self {
        if pct >= 85.0 {
            ScoreBand::Excellent
        } else if pct >= 70.0 {
            ScoreBand::Good
        } else if pct >= 60.0 {
            ScoreBand::Fair
        } else {
            ScoreBand::NeedsWork
        }
    }

    /// CSS class name used by the HTML report.
    pub fn css_class(&self) -> &'static str {
        match self {
            ScoreBand::Excellent => "excellent",
            ScoreBand::Good => "good",
            ScoreBand::Fair => "fair",
            ScoreBand::NeedsWork => "needs-work",
        }
    }
}

impl fmt::Display for ScoreBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScoreBand::Excellent => write!(f, "excellent"),
            ScoreBand::Good => write!(f, "good"),
            ScoreBand::Fair => write!(f, "fair"),
            ScoreBand::NeedsWork => write!(f, "needs work"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn band_thresholds() {
        assert_eq!(ScoreBand::for_percentage(100.0), ScoreBand::Excellent);
        assert_eq!(ScoreBand::for_percentage(85.0), ScoreBand::Excellent);
        assert_eq!(ScoreBand::for_percentage(84.99), ScoreBand::Good);
        assert_eq!(ScoreBand::for_percentage(70.0), ScoreBand::Good);
        assert_eq!(ScoreBand::for_percentage(60.0), ScoreBand::Fair);
        assert_eq!(ScoreBand::for_percentage(59.9), ScoreBand::NeedsWork);
        assert_eq!(ScoreBand::NeedsWork.to_string(), "needs work");
    }

    #[test]
    fn result_band_uses_marks() {
        let r = NormalizedResult {
            identifier: "S1".into(),
            answer_text: "x".into(),
            semantic_pct: 0.0,
            keyword_pct: 0.0,
            grammar_pct: 0.0,
            final_score: 4.5,
        };
        assert_eq!(r.band(5), ScoreBand::Excellent);
        assert_eq!(r.band(10), ScoreBand::NeedsWork);
    }

    #[test]
    fn normalized_result_serde_roundtrip() {
        let r = NormalizedResult {
            identifier: "S1".into(),
            answer_text: "Paris, France".into(),
            semantic_pct: 67.89,
            keyword_pct: 50.0,
            grammar_pct: 80.0,
            final_score: 8.42,
        };
        let json = serde_json::to_string(&r).unwrap();
        let back: NormalizedResult = serde_json::from_str(&json).unwrap();
        assert_eq!(back, r);
    }
}
