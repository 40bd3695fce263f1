//! Evaluation report types with JSON persistence.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::NormalizedResult;
use crate::statistics::CohortStatistics;

/// The outcome of one successful submission.
///
/// Cohort statistics are deliberately not stored; call
/// [`EvaluationReport::statistics`] to derive them from `results`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationReport {
    /// Unique report identifier.
    pub id: Uuid,
    /// When the report was created.
    pub created_at: DateTime<Utc>,
    /// Descriptive question text, if the operator supplied one.
    #[serde(default)]
    pub question: Option<String>,
    /// Reference answer the cohort was scored against.
    pub reference_answer: String,
    /// Maximum marks per student.
    pub marks_out_of: u32,
    /// One row per retained student, in input order.
    pub results: Vec<NormalizedResult>,
    /// Wall-clock duration of the submission in milliseconds.
    pub duration_ms: u64,
}

impl EvaluationReport {
    /// Cohort statistics over the current results, or `None` if there are none.
    pub fn statistics(&self) -> Option<CohortStatistics> {
        CohortStatistics::compute(&self.results, self.marks_out_of)
    }

    /// Save the report as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize report")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        Ok(())
    }

    /// Load a report from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read report from {}", path.display()))?;
        let report: EvaluationReport =
            serde_json::from_str(&content).context("failed to parse report JSON")?;
        Ok(report)
    }
}
