//! gradebatch-core: Bulk evaluation pipeline, scoring traits, and statistics.
//!
//! This crate defines the data model, the scoring service seam, and the
//! pipeline that turns a CSV of student answers into a scored cohort report.

pub mod engine;
pub mod error;
pub mod ingest;
pub mod model;
pub mod normalize;
pub mod report;
pub mod request;
pub mod session;
pub mod statistics;
pub mod traits;

pub use engine::{evaluate, Submission, SubmissionInput};
pub use error::{InputError, PipelineError, ScoringServiceError};
pub use session::{BulkEvaluationSession, SessionState};
