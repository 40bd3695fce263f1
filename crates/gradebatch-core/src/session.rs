//! Submission gating and ownership of the latest report.
//!
//! A session is either `Idle` or `Submitting`. Only an idle session may start
//! a submission. Finishing always returns to `Idle`; a successful outcome
//! replaces the current report wholesale, a failed one leaves it untouched.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::engine::{evaluate, Submission};
use crate::error::PipelineError;
use crate::report::EvaluationReport;
use crate::statistics::CohortStatistics;
use crate::traits::ScoringService;

/// In-flight state of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionState {
    #[default]
    Idle,
    Submitting,
}

/// Holds the in-flight gate and the most recent successful report.
#[derive(Debug, Default)]
pub struct BulkEvaluationSession {
    state: SessionState,
    report: Option<EvaluationReport>,
}

impl BulkEvaluationSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_submitting(&self) -> bool {
        self.state == SessionState::Submitting
    }

    /// The most recent successful report, if any.
    pub fn report(&self) -> Option<&EvaluationReport> {
        self.report.as_ref()
    }

    /// Statistics over the current report, recomputed on every call.
    pub fn statistics(&self) -> Option<CohortStatistics> {
        self.report.as_ref().and_then(EvaluationReport::statistics)
    }

    /// Move from `Idle` to `Submitting`.
    pub fn try_begin(&mut self) -> Result<(), PipelineError> {
        if self.is_submitting() {
            return Err(PipelineError::Busy);
        }
        self.state = SessionState::Submitting;
        Ok(())
    }

    /// Return to `Idle`, keeping the report on success.
    pub fn finish(
        &mut self,
        outcome: Result<EvaluationReport, PipelineError>,
    ) -> Result<&EvaluationReport, PipelineError> {
        self.state = SessionState::Idle;
        match outcome {
            Ok(report) => {
                info!(report_id = %report.id, students = report.results.len(), "report replaced");
                let report = self.report.insert(report);
                Ok(&*report)
            }
            Err(e) => {
                warn!("submission failed, keeping previous results: {e}");
                Err(e)
            }
        }
    }

    /// Run one submission through the pipeline.
    pub async fn submit(
        &mut self,
        service: &dyn ScoringService,
        submission: &Submission,
    ) -> Result<&EvaluationReport, PipelineError> {
        self.try_begin()?;
        let in_flight = InFlight(&mut self.state);
        let outcome = evaluate(service, submission).await;
        drop(in_flight);
        self.finish(outcome)
    }
}

/// Returns the session to `Idle` even if the submit future is dropped mid-call.
struct InFlight<'a>(&'a mut SessionState);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        *self.0 = SessionState::Idle;
    }
}
