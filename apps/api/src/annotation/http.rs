//! HTTP annotation backend.
//!
//! Talks to a spaCy-style annotation server:
//! `POST {base_url}/annotate` with `{"text": ...}` returns
//! `{"tokens": [{"text", "idx", "pos", "lemma", "dep", "head"}]}` where `head`
//! indexes into the same `tokens` array.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::annotation::{AnnotationError, Annotator};
use crate::extraction::tokens::{AnnotatedToken, Dependency, PartOfSpeech};

const ANNOTATE_PATH: &str = "/annotate";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const MAX_ATTEMPTS: u32 = 3;
const RETRY_BASE_DELAY: Duration = Duration::from_secs(1);

#[derive(Debug, Serialize)]
struct AnnotateRequest<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct AnnotateResponse {
    tokens: Vec<WireToken>,
}

#[derive(Debug, Deserialize)]
struct WireToken {
    text: String,
    idx: usize,
    pos: String,
    #[serde(default)]
    lemma: String,
    #[serde(default)]
    dep: String,
    head: usize,
}

impl From<WireToken> for AnnotatedToken {
    fn from(wire: WireToken) -> Self {
        let lemma = if wire.lemma.is_empty() {
            wire.text.clone()
        } else {
            wire.lemma
        };
        AnnotatedToken {
            text: wire.text,
            idx: wire.idx,
            pos: PartOfSpeech::from_tag(&wire.pos),
            lemma,
            dep: Dependency::from_label(&wire.dep),
            head: wire.head,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

#[derive(Clone)]
pub struct HttpAnnotator {
    client: Client,
    endpoint: String,
    retry_base_delay: Duration,
}

impl HttpAnnotator {
    pub fn new(base_url: &str) -> Result<Self, AnnotationError> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            client,
            endpoint: format!("{}{}", base_url.trim_end_matches('/'), ANNOTATE_PATH),
            retry_base_delay: RETRY_BASE_DELAY,
        })
    }

    /// Delay before the first retry; doubles on each further attempt.
    pub fn with_retry_base_delay(mut self, delay: Duration) -> Self {
        self.retry_base_delay = delay;
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl Annotator for HttpAnnotator {
    /// Retries on 429, 5xx and transport errors with exponential backoff.
    async fn annotate(&self, text: &str) -> Result<Vec<AnnotatedToken>, AnnotationError> {
        if text.trim().is_empty() {
            return Ok(Vec::new());
        }

        let request_body = AnnotateRequest { text };
        let mut last_error: Option<AnnotationError> = None;

        for attempt in 0..MAX_ATTEMPTS {
            if attempt > 0 {
                let delay = self.retry_base_delay * (1 << (attempt - 1));
                warn!(
                    "Annotation attempt {} failed, retrying after {}ms...",
                    attempt,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }

            let response = match self.client.post(&self.endpoint).json(&request_body).send().await {
                Ok(r) => r,
                Err(e) => {
                    last_error = Some(AnnotationError::Http(e));
                    continue;
                }
            };

            let status = response.status();

            if status.as_u16() == 429 || status.is_server_error() {
                let body = response.text().await.unwrap_or_default();
                warn!("Annotation service returned {}: {}", status, body);
                last_error = Some(AnnotationError::Api {
                    status: status.as_u16(),
                    message: body,
                });
                continue;
            }

            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                let message = serde_json::from_str::<ErrorBody>(&body)
                    .map(|e| e.error)
                    .unwrap_or(body);
                return Err(AnnotationError::Api {
                    status: status.as_u16(),
                    message,
                });
            }

            let annotated: AnnotateResponse = response.json().await?;
            debug!(tokens = annotated.tokens.len(), "Annotation succeeded");

            return Ok(annotated.tokens.into_iter().map(AnnotatedToken::from).collect());
        }

        Err(last_error.unwrap_or(AnnotationError::Unavailable {
            attempts: MAX_ATTEMPTS,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
    use serde_json::{json, Value};

    /// Serves `router` on an ephemeral port and returns its base URL.
    async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}")
    }

    async fn annotate_google_cloud(Json(body): Json<Value>) -> Json<Value> {
        assert_eq!(body["text"], "Google Cloud");
        Json(json!({
            "tokens": [
                {"text": "Google", "idx": 0, "pos": "PROPN", "lemma": "Google", "dep": "compound", "head": 1},
                {"text": "Cloud", "idx": 7, "pos": "PROPN", "lemma": "Cloud", "dep": "ROOT", "head": 1}
            ]
        }))
    }

    #[test]
    fn test_wire_token_maps_tags_and_labels() {
        let wire: WireToken = serde_json::from_value(json!({
            "text": "services", "idx": 12, "pos": "NOUN", "lemma": "service", "dep": "pobj", "head": 0
        }))
        .unwrap();
        let token = AnnotatedToken::from(wire);
        assert_eq!(token.pos, PartOfSpeech::Noun);
        assert_eq!(token.lemma, "service");
        assert_eq!(token.dep, Dependency::Other);
        assert_eq!(token.idx, 12);
    }

    #[test]
    fn test_wire_token_without_lemma_uses_text() {
        let wire: WireToken = serde_json::from_value(json!({
            "text": ",", "idx": 2, "pos": "PUNCT", "head": 0
        }))
        .unwrap();
        let token = AnnotatedToken::from(wire);
        assert_eq!(token.lemma, ",");
        assert!(token.is_symbol());
    }

    #[test]
    fn test_endpoint_joins_base_url() {
        let annotator = HttpAnnotator::new("http://localhost:5000/").unwrap();
        assert_eq!(annotator.endpoint(), "http://localhost:5000/annotate");
    }

    #[tokio::test]
    async fn test_annotate_decodes_server_tokens() {
        let base = serve(Router::new().route("/annotate", post(annotate_google_cloud))).await;
        let annotator = HttpAnnotator::new(&base).unwrap();

        let tokens = annotator.annotate("Google Cloud").await.unwrap();
        assert_eq!(tokens.len(), 2);
        assert!(tokens[0].is_compound_modifier());
        assert_eq!(tokens[0].head, 1);
        assert!(tokens[1].is_proper_noun());
    }

    /// Answers 503 for the first `failures` calls, then a single token.
    fn flaky_router(failures: usize, calls: Arc<AtomicUsize>) -> Router {
        Router::new()
            .route(
                "/annotate",
                post(move |State(calls): State<Arc<AtomicUsize>>| async move {
                    if calls.fetch_add(1, Ordering::SeqCst) < failures {
                        (
                            StatusCode::SERVICE_UNAVAILABLE,
                            Json(json!({"error": "model loading"})),
                        )
                    } else {
                        (
                            StatusCode::OK,
                            Json(json!({
                                "tokens": [{"text": "Redis", "idx": 0, "pos": "PROPN", "dep": "ROOT", "head": 0}]
                            })),
                        )
                    }
                }),
            )
            .with_state(calls)
    }

    #[tokio::test]
    async fn test_server_errors_are_retried_until_success() {
        let calls = Arc::new(AtomicUsize::new(0));
        let base = serve(flaky_router(2, calls.clone())).await;
        let annotator = HttpAnnotator::new(&base)
            .unwrap()
            .with_retry_base_delay(Duration::from_millis(1));

        let tokens = annotator.annotate("Redis").await.unwrap();
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].text, "Redis");
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_retries_exhausted_surface_last_error() {
        let calls = Arc::new(AtomicUsize::new(0));
        let base = serve(flaky_router(usize::MAX, calls.clone())).await;
        let annotator = HttpAnnotator::new(&base)
            .unwrap()
            .with_retry_base_delay(Duration::from_millis(1));

        let err = annotator.annotate("Redis").await.unwrap_err();
        assert!(matches!(err, AnnotationError::Api { status: 503, .. }));
        assert_eq!(calls.load(Ordering::SeqCst), MAX_ATTEMPTS as usize);
    }

    #[tokio::test]
    async fn test_transport_errors_are_retried() {
        // Nothing listens here, so every attempt fails to connect.
        let annotator = HttpAnnotator::new("http://127.0.0.1:9")
            .unwrap()
            .with_retry_base_delay(Duration::from_millis(1));

        let err = annotator.annotate("Redis").await.unwrap_err();
        assert!(matches!(err, AnnotationError::Http(_)));
    }

    #[tokio::test]
    async fn test_client_error_is_not_retried() {
        let router = Router::new().route(
            "/annotate",
            post(|| async {
                (
                    StatusCode::BAD_REQUEST,
                    Json(json!({"error": "text too long"})),
                )
            }),
        );
        let base = serve(router).await;
        let annotator = HttpAnnotator::new(&base).unwrap();

        match annotator.annotate("anything").await {
            Err(AnnotationError::Api { status, message }) => {
                assert_eq!(status, 400);
                assert_eq!(message, "text too long");
            }
            other => panic!("expected API error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_blank_text_skips_the_request() {
        // Nothing listens here; a request would fail.
        let annotator = HttpAnnotator::new("http://127.0.0.1:9").unwrap();
        assert!(annotator.annotate("  \n").await.unwrap().is_empty());
    }
}
