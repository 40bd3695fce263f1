//! HTTP scoring service client.
//!
//! Speaks the batch shape of the evaluation endpoint:
//! `{"answer", "responses": [...]}` in, `{"results": [...]}` out.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use gradebatch_core::error::ScoringServiceError;
use gradebatch_core::model::{EvaluationRequest, RawScoreItem};
use gradebatch_core::traits::ScoringService;

pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";
pub const DEFAULT_ENDPOINT: &str = "/evaluate";
pub const DEFAULT_TIMEOUT_SECS: u64 = 120; // Sentence embedding a whole class is slow

/// Client for a remote scoring service reachable over HTTP.
pub struct HttpScoringService {
    url: String,
    api_key: Option<String>,
    timeout_secs: u64,
    client: reqwest::Client,
}

impl HttpScoringService {
    pub fn new(base_url: &str, endpoint: &str, timeout_secs: u64, api_key: Option<String>) -> Self {
        let base = if base_url.is_empty() {
            DEFAULT_BASE_URL
        } else {
            base_url
        };
        let endpoint = if endpoint.is_empty() {
            DEFAULT_ENDPOINT
        } else {
            endpoint
        };

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .expect("failed to build HTTP client");

        Self {
            url: join_url(base, endpoint),
            api_key: api_key.filter(|k| !k.is_empty()),
            timeout_secs,
            client,
        }
    }

    /// Full URL requests are posted to.
    pub fn url(&self) -> &str {
        &self.url
    }
}

fn join_url(base: &str, endpoint: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        endpoint.trim_start_matches('/')
    )
}

#[derive(Serialize)]
struct BatchRequest<'a> {
    answer: &'a str,
    responses: &'a [String],
}

#[derive(Deserialize)]
struct BatchResponse {
    results: Vec<WireScore>,
}

#[derive(Deserialize)]
struct WireScore {
    semantic_score: f64,
    keyword_score: f64,
    grammar_score: f64,
    predicted_score: f64,
}

impl From<WireScore> for RawScoreItem {
    fn from(w: WireScore) -> Self {
        RawScoreItem {
            semantic: w.semantic_score,
            keyword: w.keyword_score,
            grammar: w.grammar_score,
            predicted: w.predicted_score,
        }
    }
}

#[async_trait]
impl ScoringService for HttpScoringService {
    fn name(&self) -> &str {
        "http"
    }

    #[instrument(skip(self, request), fields(batch = request.len()))]
    async fn score(
        &self,
        request: &EvaluationRequest,
    ) -> Result<Vec<RawScoreItem>, ScoringServiceError> {
        let start = Instant::now();

        let body = BatchRequest {
            answer: &request.reference_answer,
            responses: &request.responses,
        };

        let mut builder = self.client.post(&self.url).json(&body);
        if let Some(key) = &self.api_key {
            builder = builder.bearer_auth(key);
        }

        let response = builder.send().await.map_err(|e| {
            if e.is_timeout() {
                ScoringServiceError::Timeout(self.timeout_secs)
            } else if e.is_connect() {
                ScoringServiceError::Network(format!(
                    "scoring service not reachable at {}",
                    self.url
                ))
            } else {
                ScoringServiceError::Network(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ScoringServiceError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let parsed: BatchResponse = response
            .json()
            .await
            .map_err(|e| ScoringServiceError::MalformedPayload(e.to_string()))?;

        debug!(
            results = parsed.results.len(),
            latency_ms = start.elapsed().as_millis() as u64,
            "scoring response received"
        );

        Ok(parsed.results.into_iter().map(RawScoreItem::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gradebatch_core::traits::score_batch;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn request(responses: &[&str]) -> EvaluationRequest {
        EvaluationRequest {
            reference_answer: "Paris is the capital of France".into(),
            responses: responses.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn service(server: &MockServer) -> HttpScoringService {
        HttpScoringService::new(&server.uri(), DEFAULT_ENDPOINT, 5, None)
    }

    #[tokio::test]
    async fn successful_batch() {
        let server = MockServer::start().await;

        let response_body = serde_json::json!({
            "results": [
                {"response": "Paris", "semantic_score": 0.912, "keyword_score": 0.5,
                 "grammar_score": 0.2, "predicted_score": 0.84},
                {"response": "Lyon", "semantic_score": 0.301, "keyword_score": 0.0,
                 "grammar_score": 0.2, "predicted_score": 0.12}
            ]
        });

        Mock::given(method("POST"))
            .and(path("/evaluate"))
            .and(body_json(serde_json::json!({
                "answer": "Paris is the capital of France",
                "responses": ["Paris", "Lyon"]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(&response_body))
            .expect(1)
            .mount(&server)
            .await;

        let items = service(&server)
            .score(&request(&["Paris", "Lyon"]))
            .await
            .unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].semantic, 0.912);
        assert_eq!(items[0].predicted, 0.84);
        assert_eq!(items[1].keyword, 0.0);
    }

    #[tokio::test]
    async fn sends_bearer_token_when_configured() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/evaluate"))
            .and(header("authorization", "Bearer sk-grade"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"results": []})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client =
            HttpScoringService::new(&server.uri(), "evaluate", 5, Some("sk-grade".into()));
        let items = client.score(&request(&[])).await.unwrap();
        assert!(items.is_empty());
    }

    #[tokio::test]
    async fn server_error_maps_to_api_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/evaluate"))
            .respond_with(ResponseTemplate::new(500).set_body_string("model crashed"))
            .mount(&server)
            .await;

        let err = service(&server)
            .score(&request(&["x"]))
            .await
            .unwrap_err();
        match err {
            ScoringServiceError::Api { status, message } => {
                assert_eq!(status, 500);
                assert!(message.contains("model crashed"));
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn single_item_shape_is_malformed() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/evaluate"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "semantic_score": 0.9, "keyword_score": 0.5,
                "grammar_score": 0.2, "predicted_score": 0.8
            })))
            .mount(&server)
            .await;

        let err = service(&server)
            .score(&request(&["x"]))
            .await
            .unwrap_err();
        assert!(matches!(err, ScoringServiceError::MalformedPayload(_)));
    }

    #[tokio::test]
    async fn short_reply_fails_adapter_validation() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/evaluate"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "results": [{"semantic_score": 0.9, "keyword_score": 0.5,
                             "grammar_score": 0.2, "predicted_score": 0.8}]
            })))
            .mount(&server)
            .await;

        let client = service(&server);
        let err = score_batch(&client, &request(&["a", "b"]))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ScoringServiceError::LengthMismatch {
                expected: 2,
                actual: 1
            }
        ));
    }

    #[tokio::test]
    async fn unreachable_service_is_network_error() {
        let client = HttpScoringService::new("http://127.0.0.1:9", DEFAULT_ENDPOINT, 5, None);
        let err = client.score(&request(&["x"])).await.unwrap_err();
        assert!(matches!(
            err,
            ScoringServiceError::Network(_) | ScoringServiceError::Timeout(_)
        ));
    }

    #[test]
    fn url_joining() {
        assert_eq!(
            join_url("http://host:5000/", "/evaluate"),
            "http://host:5000/evaluate"
        );
        assert_eq!(join_url("http://host", "api/score"), "http://host/api/score");
        let client = HttpScoringService::new("", "", 5, None);
        assert_eq!(client.url(), "http://localhost:5000/evaluate");
    }
}
