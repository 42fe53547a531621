//! Chat Completions Client
//!
//! HTTP client for OpenAI-compatible `chat/completions` endpoints (Groq by
//! default). Handlers depend on the [`CompletionProvider`] trait so tests can
//! swap the network out.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default endpoint root (Groq's OpenAI-compatible API)
pub const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai/v1";

/// Configuration for the completions client
#[derive(Debug, Clone)]
pub struct LlmConfig {
    /// Endpoint root, `/chat/completions` is appended
    pub base_url: String,
    /// Bearer token. Requests fail fast with `NotConfigured` when absent.
    pub api_key: Option<String>,
    /// Request timeout in milliseconds
    pub request_timeout_ms: u64,
    /// Maximum attempts per completion
    pub max_retries: u32,
    /// Backoff unit in milliseconds; attempt `n` waits `n² × backoff_ms`
    pub backoff_ms: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: None,
            request_timeout_ms: 30_000,
            max_retries: 3,
            backoff_ms: 1_000,
        }
    }
}

/// One chat message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// Anything that can turn a conversation into a completion
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Content of the first choice, or `None` when the model returned no choice
    async fn complete(
        &self,
        model: &str,
        messages: &[ChatMessage],
    ) -> Result<Option<String>, LlmError>;
}

/// Chat completions REST client
pub struct LlmClient {
    client: Client,
    config: LlmConfig,
}

impl LlmClient {
    pub fn new(config: LlmConfig) -> Result<Self, LlmError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_millis(config.request_timeout_ms))
            .build()?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &LlmConfig {
        &self.config
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/chat/completions",
            self.config.base_url.trim_end_matches('/')
        )
    }

    /// Send a completion request with retry logic
    async fn send_completion(
        &self,
        api_key: &str,
        body: &CompletionRequest<'_>,
    ) -> Result<CompletionResponse, LlmError> {
        let url = self.endpoint();
        let mut last_error = LlmError::Unavailable;
        let mut retry_after = None;

        for attempt in 0..self.config.max_retries.max(1) {
            if attempt > 0 {
                let delay = retry_delay(attempt, self.config.backoff_ms, retry_after.take());
                tokio::time::sleep(delay).await;
            }

            let sent = self
                .client
                .post(&url)
                .bearer_auth(api_key)
                .json(body)
                .send()
                .await;

            match sent {
                Ok(response) => {
                    if response.status().is_success() {
                        return response
                            .json::<CompletionResponse>()
                            .await
                            .map_err(|e| LlmError::InvalidResponse(e.to_string()));
                    } else if response.status().as_u16() == 429 {
                        // Honoured before the next attempt, if there is one
                        retry_after = response
                            .headers()
                            .get("Retry-After")
                            .and_then(|v| v.to_str().ok())
                            .and_then(|v| v.trim().parse::<u64>().ok());
                        tracing::warn!(attempt, ?retry_after, "completion rate limited");
                        last_error = LlmError::RateLimited;
                        continue;
                    } else {
                        let status = response.status();
                        let text = response.text().await.unwrap_or_default();
                        return Err(LlmError::ApiError {
                            status: status.as_u16(),
                            message: text,
                        });
                    }
                }
                Err(e) => {
                    tracing::warn!(attempt, error = %e, "completion request failed");
                    last_error = if e.is_timeout() {
                        LlmError::Timeout
                    } else if e.is_connect() {
                        LlmError::Unavailable
                    } else {
                        LlmError::Request(e)
                    };
                    continue;
                }
            }
        }

        Err(last_error)
    }
}

/// Longest wait a Retry-After header can impose
pub const MAX_RETRY_AFTER_SECS: u64 = 30;

/// Wait before `attempt`: quadratic backoff (1, 4, 9... units), or the
/// server's Retry-After capped at [`MAX_RETRY_AFTER_SECS`], whichever is longer.
fn retry_delay(attempt: u32, backoff_ms: u64, retry_after_secs: Option<u64>) -> std::time::Duration {
    let backoff = std::time::Duration::from_millis(
        u64::from(attempt).pow(2).saturating_mul(backoff_ms),
    );
    let requested = std::time::Duration::from_secs(
        retry_after_secs.unwrap_or(0).min(MAX_RETRY_AFTER_SECS),
    );
    backoff.max(requested)
}

#[async_trait]
impl CompletionProvider for LlmClient {
    async fn complete(
        &self,
        model: &str,
        messages: &[ChatMessage],
    ) -> Result<Option<String>, LlmError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .filter(|k| !k.is_empty())
            .ok_or(LlmError::NotConfigured)?;

        let body = CompletionRequest { model, messages };
        tracing::debug!(model, messages = messages.len(), "sending completion");

        let response = self.send_completion(api_key, &body).await?;
        Ok(response.first_content())
    }
}

// ============================================
// Request/Response DTOs
// ============================================

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<CompletionChoice>,
}

#[derive(Debug, Deserialize)]
struct CompletionChoice {
    message: Option<ChoiceMessage>,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

impl CompletionResponse {
    fn first_content(self) -> Option<String> {
        self.choices
            .into_iter()
            .next()
            .and_then(|c| c.message)
            .and_then(|m| m.content)
    }
}

// ============================================
// Errors
// ============================================

/// Errors that can occur when talking to the completions endpoint
#[derive(Error, Debug)]
pub enum LlmError {
    #[error("LLM API key is not configured")]
    NotConfigured,

    #[error("LLM endpoint unavailable")]
    Unavailable,

    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API error {status}: {message}")]
    ApiError { status: u16, message: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Request timeout")]
    Timeout,

    #[error("Rate limited")]
    RateLimited,
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{http::StatusCode, routing::post, Json, Router};
    use serde_json::{json, Value};
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    /// Serve `router` on an ephemeral port and return its base URL
    async fn spawn_mock(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn client_for(base_url: String) -> LlmClient {
        LlmClient::new(LlmConfig {
            base_url,
            api_key: Some("test-key".to_string()),
            request_timeout_ms: 2_000,
            max_retries: 3,
            backoff_ms: 0,
        })
        .unwrap()
    }

    #[test]
    fn test_default_config() {
        let config = LlmConfig::default();
        assert_eq!(config.base_url, "https://api.groq.com/openai/v1");
        assert!(config.api_key.is_none());
        assert_eq!(config.max_retries, 3);
    }

    #[test]
    fn test_request_shape() {
        let messages = [ChatMessage::system("be kind"), ChatMessage::user("hi")];
        let body = CompletionRequest {
            model: "llama-3.1-8b-instant",
            messages: &messages,
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({
                "model": "llama-3.1-8b-instant",
                "messages": [
                    {"role": "system", "content": "be kind"},
                    {"role": "user", "content": "hi"}
                ]
            })
        );
    }

    #[test]
    fn test_first_content() {
        let response: CompletionResponse = serde_json::from_value(json!({
            "choices": [{"message": {"role": "assistant", "content": "hello"}}]
        }))
        .unwrap();
        assert_eq!(response.first_content().as_deref(), Some("hello"));

        let empty: CompletionResponse = serde_json::from_value(json!({})).unwrap();
        assert_eq!(empty.first_content(), None);
    }

    #[tokio::test]
    async fn test_missing_api_key() {
        let client = LlmClient::new(LlmConfig::default()).unwrap();
        let err = client
            .complete("m", &[ChatMessage::user("hi")])
            .await
            .unwrap_err();
        assert!(matches!(err, LlmError::NotConfigured));
    }

    #[tokio::test]
    async fn test_complete_against_mock() {
        let router = Router::new().route(
            "/chat/completions",
            post(|headers: axum::http::HeaderMap, Json(body): Json<Value>| async move {
                assert_eq!(headers["authorization"], "Bearer test-key");
                let echo = body["messages"][1]["content"].as_str().unwrap_or("").to_string();
                Json(json!({"choices": [{"message": {"content": echo}}]}))
            }),
        );
        let client = client_for(spawn_mock(router).await);

        let content = client
            .complete("m", &[ChatMessage::system("s"), ChatMessage::user("ping")])
            .await
            .unwrap();
        assert_eq!(content.as_deref(), Some("ping"));
    }

    #[tokio::test]
    async fn test_rate_limit_is_retried() {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = calls.clone();
        let router = Router::new().route(
            "/chat/completions",
            post(move || {
                let counter = counter.clone();
                async move {
                    if counter.fetch_add(1, Ordering::SeqCst) == 0 {
                        (StatusCode::TOO_MANY_REQUESTS, Json(json!({})))
                    } else {
                        (StatusCode::OK, Json(json!({"choices": []})))
                    }
                }
            }),
        );
        let client = client_for(spawn_mock(router).await);

        let content = client.complete("m", &[ChatMessage::user("x")]).await.unwrap();
        assert_eq!(content, None);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_retry_delay() {
        use std::time::Duration;

        assert_eq!(retry_delay(1, 100, None), Duration::from_millis(100));
        assert_eq!(retry_delay(3, 100, None), Duration::from_millis(900));
        assert_eq!(retry_delay(1, 100, Some(2)), Duration::from_secs(2));
        assert_eq!(
            retry_delay(1, 0, Some(u64::MAX)),
            Duration::from_secs(MAX_RETRY_AFTER_SECS)
        );
        assert_eq!(retry_delay(u32::MAX, u64::MAX, None), Duration::from_millis(u64::MAX));
    }

    #[tokio::test]
    async fn test_last_rate_limit_does_not_wait() {
        let router = Router::new().route(
            "/chat/completions",
            post(|| async {
                (
                    StatusCode::TOO_MANY_REQUESTS,
                    [("Retry-After", "86400")],
                    Json(json!({})),
                )
            }),
        );
        let mut client = client_for(spawn_mock(router).await);
        client.config.max_retries = 1;

        let started = std::time::Instant::now();
        let err = client.complete("m", &[ChatMessage::user("x")]).await.unwrap_err();

        assert!(matches!(err, LlmError::RateLimited));
        assert!(started.elapsed() < std::time::Duration::from_secs(5));
    }

    #[tokio::test]
    async fn test_server_error_is_not_retried() {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = calls.clone();
        let router = Router::new().route(
            "/chat/completions",
            post(move || {
                counter.fetch_add(1, Ordering::SeqCst);
                async { (StatusCode::BAD_REQUEST, "model not found") }
            }),
        );
        let client = client_for(spawn_mock(router).await);

        let err = client.complete("m", &[ChatMessage::user("x")]).await.unwrap_err();
        match err {
            LlmError::ApiError { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message, "model not found");
            }
            other => panic!("unexpected error: {:?}", other),
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
