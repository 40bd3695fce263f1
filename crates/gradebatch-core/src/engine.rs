//! The bulk evaluation pipeline.
//!
//! Ingestion, request building, and aggregation run synchronously. The only
//! suspension point is the single call to the scoring service.

use std::time::Instant;

use tracing::{info, warn};
use uuid::Uuid;

use crate::error::{InputError, PipelineError};
use crate::ingest::scan_answers;
use crate::model::{AnswerRecord, DEFAULT_MARKS_OUT_OF};
use crate::report::EvaluationReport;
use crate::request::build_request;
use crate::statistics::aggregate;
use crate::traits::{score_batch, ScoringService};

/// Identifier given to the answer of a single-answer submission.
pub const SINGLE_IDENTIFIER: &str = "answer";

/// Where a submission's answers come from.
#[derive(Debug, Clone)]
pub enum SubmissionInput {
    /// Decoded CSV text with an identifier and an answer column.
    Csv(String),
    /// One free-text answer, scored as a batch of size one.
    Single(String),
}

/// Everything the operator supplies for one evaluation run.
#[derive(Debug, Clone)]
pub struct Submission {
    pub reference_answer: String,
    pub marks_out_of: u32,
    /// Descriptive only; never sent to the scoring service.
    pub question: Option<String>,
    pub input: SubmissionInput,
}

impl Submission {
    /// A bulk submission from CSV text.
    pub fn bulk(reference_answer: impl Into<String>, csv_text: impl Into<String>) -> Self {
        Self {
            reference_answer: reference_answer.into(),
            marks_out_of: DEFAULT_MARKS_OUT_OF,
            question: None,
            input: SubmissionInput::Csv(csv_text.into()),
        }
    }

    /// A single-answer submission.
    pub fn single(reference_answer: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            reference_answer: reference_answer.into(),
            marks_out_of: DEFAULT_MARKS_OUT_OF,
            question: None,
            input: SubmissionInput::Single(answer.into()),
        }
    }

    pub fn with_marks_out_of(mut self, marks_out_of: u32) -> Self {
        self.marks_out_of = marks_out_of;
        self
    }

    pub fn with_question(mut self, question: impl Into<String>) -> Self {
        let question = question.into();
        self.question = (!question.trim().is_empty()).then_some(question);
        self
    }

    /// Check operator parameters and ingest the answers, without any network IO.
    pub fn prepare(&self) -> Result<Vec<AnswerRecord>, InputError> {
        if self.marks_out_of == 0 {
            return Err(InputError::InvalidMarks(self.marks_out_of));
        }
        if self.reference_answer.trim().is_empty() {
            return Err(InputError::MissingReference);
        }

        match &self.input {
            SubmissionInput::Csv(text) => {
                let scan = scan_answers(text)?;
                if scan.skipped_rows > 0 {
                    warn!(skipped = scan.skipped_rows, "dropped rows with blank fields");
                }
                if scan.records.is_empty() {
                    return Err(InputError::EmptyDataset);
                }
                Ok(scan.records)
            }
            SubmissionInput::Single(answer) => {
                let answer = answer.trim();
                if answer.is_empty() {
                    return Err(InputError::MissingAnswer);
                }
                Ok(vec![AnswerRecord::new(SINGLE_IDENTIFIER, answer)])
            }
        }
    }
}

/// Run one submission end to end.
///
/// Any error aborts the whole submission; no partial results are produced.
pub async fn evaluate(
    service: &dyn ScoringService,
    submission: &Submission,
) -> Result<EvaluationReport, PipelineError> {
    let start = Instant::now();

    let records = submission.prepare()?;
    let request = build_request(&records, &submission.reference_answer)?;
    info!(students = records.len(), "evaluation request built");

    let items = score_batch(service, &request).await?;
    let results = aggregate(&records, &items, submission.marks_out_of);

    let elapsed = start.elapsed();
    info!(
        students = results.len(),
        elapsed_ms = elapsed.as_millis() as u64,
        "evaluation complete"
    );

    Ok(EvaluationReport {
        id: Uuid::new_v4(),
        created_at: chrono::Utc::now(),
        question: submission.question.clone(),
        reference_answer: submission.reference_answer.clone(),
        marks_out_of: submission.marks_out_of,
        results,
        duration_ms: elapsed.as_millis() as u64,
    })
}
