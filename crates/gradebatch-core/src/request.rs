//! Evaluation request building.

use crate::error::InputError;
use crate::model::{AnswerRecord, EvaluationRequest};

/// Build the single batched request for a submission.
///
/// `responses` is exactly the answer texts of `records`, in order.
pub fn build_request(
    records: &[AnswerRecord],
    reference_answer: &str,
) -> Result<EvaluationRequest, InputError> {
    if reference_answer.trim().is_empty() {
        return Err(InputError::MissingReference);
    }
    if records.is_empty() {
        return Err(InputError::EmptyBatch);
    }

    Ok(EvaluationRequest {
        reference_answer: reference_answer.to_string(),
        responses: records.iter().map(|r| r.answer_text.clone()).collect(),
    })
}
