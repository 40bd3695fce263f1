//! Mock scoring service for testing and offline dry runs.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use gradebatch_core::error::ScoringServiceError;
use gradebatch_core::model::{EvaluationRequest, RawScoreItem};
use gradebatch_core::traits::ScoringService;

/// A scoring service that never leaves the process.
///
/// Responses are matched by substring, the first configured key that matches
/// wins. Unmatched responses get a score derived from word overlap with the
/// reference answer.
pub struct MockScoringService {
    /// Response substring → fixed score, in lookup order.
    scores: Vec<(String, RawScoreItem)>,
    /// Forces the reply length, to exercise protocol violations.
    reply_len: Option<usize>,
    call_count: AtomicU32,
    last_request: Mutex<Option<EvaluationRequest>>,
}

impl MockScoringService {
    pub fn new<K: Into<String>>(scores: impl IntoIterator<Item = (K, RawScoreItem)>) -> Self {
        Self {
            scores: scores.into_iter().map(|(k, v)| (k.into(), v)).collect(),
            reply_len: None,
            call_count: AtomicU32::new(0),
            last_request: Mutex::new(None),
        }
    }

    /// A mock that scores purely by word overlap.
    pub fn overlap() -> Self {
        Self::new(Vec::<(String, RawScoreItem)>::new())
    }

    /// Truncate or pad the reply to `len` items.
    pub fn with_reply_len(mut self, len: usize) -> Self {
        self.reply_len = Some(len);
        self
    }

    pub fn call_count(&self) -> u32 {
        self.call_count.load(Ordering::Relaxed)
    }

    pub fn last_request(&self) -> Option<EvaluationRequest> {
        self.last_request.lock().unwrap().clone()
    }

    fn score_one(&self, reference: &str, response: &str) -> RawScoreItem {
        if let Some((_, item)) = self
            .scores
            .iter()
            .find(|(key, _)| response.contains(key.as_str()))
        {
            return *item;
        }

        let overlap = word_overlap(reference, response);
        let grammar = if response.trim_end().ends_with(['.', '?', '!']) {
            1.0
        } else {
            0.5
        };
        RawScoreItem {
            semantic: overlap,
            keyword: overlap,
            grammar,
            predicted: (overlap * 0.8 + grammar * 0.2).min(1.0),
        }
    }
}

/// Jaccard similarity of lowercase word sets, rounded to 3 decimals.
fn word_overlap(a: &str, b: &str) -> f64 {
    use std::collections::HashSet;

    let words = |s: &str| -> HashSet<String> {
        s.split(|c: char| !c.is_alphanumeric())
            .filter(|w| !w.is_empty())
            .map(str::to_lowercase)
            .collect()
    };
    let (a, b) = (words(a), words(b));
    let union = a.union(&b).count();
    if union == 0 {
        return 0.0;
    }
    let score = a.intersection(&b).count() as f64 / union as f64;
    (score * 1000.0).round() / 1000.0
}

#[async_trait]
impl ScoringService for MockScoringService {
    fn name(&self) -> &str {
        "mock"
    }

    async fn score(
        &self,
        request: &EvaluationRequest,
    ) -> Result<Vec<RawScoreItem>, ScoringServiceError> {
        self.call_count.fetch_add(1, Ordering::Relaxed);
        *self.last_request.lock().unwrap() = Some(request.clone());

        let mut items: Vec<RawScoreItem> = request
            .responses
            .iter()
            .map(|r| self.score_one(&request.reference_answer, r))
            .collect();

        if let Some(len) = self.reply_len {
            let filler = items.last().copied().unwrap_or(RawScoreItem {
                semantic: 0.0,
                keyword: 0.0,
                grammar: 0.0,
                predicted: 0.0,
            });
            items.resize(len, filler);
        }

        Ok(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(responses: &[&str]) -> EvaluationRequest {
        EvaluationRequest {
            reference_answer: "Paris is the capital of France".into(),
            responses: responses.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[tokio::test]
    async fn substring_matching() {
        let service = MockScoringService::new([(
            "Paris",
            RawScoreItem {
                semantic: 0.9,
                keyword: 0.8,
                grammar: 1.0,
                predicted: 0.842,
            },
        )]);

        let items = service
            .score(&request(&["It is Paris.", "no idea"]))
            .await
            .unwrap();
        assert_eq!(items[0].predicted, 0.842);
        assert_eq!(items[1].semantic, 0.0);
        assert_eq!(service.call_count(), 1);
        assert_eq!(service.last_request().unwrap().responses.len(), 2);
    }

    #[tokio::test]
    async fn overlapping_keys_use_first_configured() {
        let fixed = |p| RawScoreItem {
            semantic: p,
            keyword: p,
            grammar: p,
            predicted: p,
        };
        let service = MockScoringService::new([
            ("capital of France", fixed(0.9)),
            ("capital", fixed(0.4)),
            ("France", fixed(0.1)),
        ]);

        for _ in 0..20 {
            let items = service
                .score(&request(&["Paris is the capital of France", "a capital city"]))
                .await
                .unwrap();
            assert_eq!(items[0].predicted, 0.9);
            assert_eq!(items[1].predicted, 0.4);
        }
    }

    #[tokio::test]
    async fn overlap_scoring() {
        let service = MockScoringService::overlap();
        let items = service
            .score(&request(&["Paris is the capital of France."]))
            .await
            .unwrap();
        assert_eq!(items[0].semantic, 1.0);
        assert_eq!(items[0].grammar, 1.0);
        assert_eq!(items[0].predicted, 1.0);
    }

    #[tokio::test]
    async fn forced_reply_length() {
        let service = MockScoringService::overlap().with_reply_len(1);
        let items = service.score(&request(&["a", "b", "c"])).await.unwrap();
        assert_eq!(items.len(), 1);
    }

    #[test]
    fn overlap_is_case_insensitive() {
        assert_eq!(word_overlap("Paris France", "paris FRANCE"), 1.0);
        assert_eq!(word_overlap("", ""), 0.0);
        assert_eq!(word_overlap("a b", "b c"), 0.333);
    }
}
