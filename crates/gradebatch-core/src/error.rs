//! Error types for the bulk evaluation pipeline.
//!
//! Input errors are raised before any network call. Scoring service errors
//! are raised at the adapter boundary and abort the whole submission.

use std::path::PathBuf;

use thiserror::Error;

/// Operator input that cannot start a submission.
#[derive(Debug, Error)]
pub enum InputError {
    /// The reference answer was blank or whitespace-only.
    #[error("reference answer is required")]
    MissingReference,

    /// A single-answer submission had a blank answer.
    #[error("student answer is required")]
    MissingAnswer,

    /// A request was built from an empty record sequence.
    #[error("cannot build an evaluation request from an empty batch")]
    EmptyBatch,

    /// No usable rows remained after ingestion.
    #[error("CSV file must contain at least two columns (student ID and answer) and one data row")]
    EmptyDataset,

    /// The answers file does not exist.
    #[error("answers file not found: {}", .0.display())]
    MissingFile(PathBuf),

    /// `marks_out_of` must be a positive integer.
    #[error("marks out of must be positive, got {0}")]
    InvalidMarks(u32),

    /// The CSV text could not be tokenized.
    #[error("malformed CSV: {0}")]
    MalformedCsv(String),
}

/// Failures talking to the scoring service.
#[derive(Debug, Error)]
pub enum ScoringServiceError {
    /// The request timed out.
    #[error("scoring service timed out after {0}s")]
    Timeout(u64),

    /// A transport-level failure.
    #[error("network error: {0}")]
    Network(String),

    /// The service answered with a non-success status.
    #[error("scoring service error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    /// The response body did not match the expected shape.
    #[error("malformed scoring response: {0}")]
    MalformedPayload(String),

    /// The service returned a different number of items than were sent.
    #[error("scoring service returned {actual} results for {expected} responses")]
    LengthMismatch { expected: usize, actual: usize },
}

impl ScoringServiceError {
    /// Returns `true` for protocol violations, as opposed to transport failures.
    pub fn is_protocol_violation(&self) -> bool {
        matches!(
            self,
            ScoringServiceError::MalformedPayload(_) | ScoringServiceError::LengthMismatch { .. }
        )
    }
}

/// Any failure that terminates a submission.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Input(#[from] InputError),

    #[error(transparent)]
    Scoring(#[from] ScoringServiceError),

    /// Another submission is still in flight.
    #[error("a submission is already in progress")]
    Busy,
}
