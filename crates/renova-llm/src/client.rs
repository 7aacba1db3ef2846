use std::time::Duration;

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use tracing::instrument;

const API_URL: &str = "https://api.anthropic.com/v1/messages";
const CONNECT_TIMEOUT: Duration = Duration::from_secs(30);
const REQUEST_TIMEOUT: Duration = Duration::from_secs(300);
const MAX_TOKENS: u32 = 16_384;

pub const DEFAULT_MODEL: &str = "claude-sonnet-4-5-20250929";

/// Typed errors for the generation call. All of these are fatal for the job;
/// the split exists so the orchestrator can report what went wrong, and so a
/// future retry layer can tell transient from permanent.
#[derive(Clone, Debug, thiserror::Error)]
pub enum GenerationError {
    #[error("authentication failed: {0}")]
    AuthenticationFailed(String),
    #[error("invalid request: {0}")]
    InvalidRequest(String),
    #[error("rate limited")]
    RateLimited,
    #[error("server error {status}: {body}")]
    ServerError { status: u16, body: String },
    #[error("network error: {0}")]
    NetworkError(String),
    #[error("timeout after {0:?}")]
    Timeout(Duration),
    #[error("empty response from generation service")]
    EmptyResponse,
}

impl GenerationError {
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::RateLimited | Self::ServerError { .. } | Self::NetworkError(_) | Self::Timeout(_)
        )
    }

    /// Classify an HTTP status code.
    pub fn from_status(status: u16, body: String) -> Self {
        match status {
            401 | 403 => Self::AuthenticationFailed(body),
            400 => Self::InvalidRequest(body),
            429 => Self::RateLimited,
            500..=599 => Self::ServerError { status, body },
            _ => Self::InvalidRequest(format!("unexpected status {status}: {body}")),
        }
    }
}

/// Seam for the external generation service, so the pipeline can run against
/// a mock in tests.
#[async_trait]
pub trait Generator: Send + Sync {
    async fn generate(&self, system: &str, prompt: &str) -> Result<String, GenerationError>;
}

/// Anthropic messages-API client. Plain request/response, no streaming; the
/// request timeout is the only bound on worst-case latency.
pub struct AnthropicGenerator {
    client: reqwest::Client,
    api_key: SecretString,
    model: String,
}

impl AnthropicGenerator {
    pub fn new(api_key: SecretString, model: Option<&str>) -> Self {
        Self {
            client: reqwest::Client::builder()
                .connect_timeout(CONNECT_TIMEOUT)
                .timeout(REQUEST_TIMEOUT)
                .build()
                .expect("failed to build HTTP client"),
            api_key,
            model: model.unwrap_or(DEFAULT_MODEL).to_string(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl Generator for AnthropicGenerator {
    #[instrument(skip(self, system, prompt), fields(model = %self.model))]
    async fn generate(&self, system: &str, prompt: &str) -> Result<String, GenerationError> {
        let body = serde_json::json!({
            "model": self.model,
            "max_tokens": MAX_TOKENS,
            "system": system,
            "messages": [{"role": "user", "content": prompt}],
        });

        let resp = self
            .client
            .post(API_URL)
            .header("x-api-key", self.api_key.expose_secret())
            .header("anthropic-version", "2023-06-01")
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    GenerationError::Timeout(REQUEST_TIMEOUT)
                } else {
                    GenerationError::NetworkError(e.to_string())
                }
            })?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(GenerationError::from_status(status, body));
        }

        let value: serde_json::Value = resp
            .json()
            .await
            .map_err(|e| GenerationError::NetworkError(e.to_string()))?;

        let text: String = value["content"]
            .as_array()
            .map(|blocks| {
                blocks
                    .iter()
                    .filter_map(|b| b["text"].as_str())
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();

        if text.is_empty() {
            return Err(GenerationError::EmptyResponse);
        }
        Ok(text)
    }
}
