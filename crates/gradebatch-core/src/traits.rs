//! Scoring service trait and the adapter contract around it.
//!
//! Implementations live in the `gradebatch-scoring` crate. Callers in the
//! pipeline never invoke `ScoringService::score` directly; they go through
//! [`score_batch`], which enforces the one-item-per-response contract.

use async_trait::async_trait;
use tracing::{info, warn};

use crate::error::ScoringServiceError;
use crate::model::{EvaluationRequest, RawScoreItem};

/// A remote capability that scores a batch of responses against a reference.
#[async_trait]
pub trait ScoringService: Send + Sync {
    /// Human-readable service name (e.g. "http").
    fn name(&self) -> &str;

    /// Score every response in `request`, returning one item per response
    /// in request order.
    async fn score(
        &self,
        request: &EvaluationRequest,
    ) -> Result<Vec<RawScoreItem>, ScoringServiceError>;
}

/// Send one request and validate the shape of the reply.
///
/// There is no retry and no splitting: the batch goes out as a single call.
/// A reply whose length differs from the number of responses sent is a
/// protocol violation and is never truncated or padded.
pub async fn score_batch(
    service: &dyn ScoringService,
    request: &EvaluationRequest,
) -> Result<Vec<RawScoreItem>, ScoringServiceError> {
    let expected = request.len();
    info!(service = service.name(), batch = expected, "scoring batch");

    let items = service.score(request).await.inspect_err(|e| {
        warn!(service = service.name(), "scoring failed: {e}");
    })?;

    if items.len() != expected {
        warn!(
            service = service.name(),
            expected,
            actual = items.len(),
            "scoring service returned wrong number of results"
        );
        return Err(ScoringServiceError::LengthMismatch {
            expected,
            actual: items.len(),
        });
    }

    Ok(items)
}
