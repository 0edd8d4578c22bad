//! Inference client — the trait seam and the Hugging Face implementation.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;
use tracing::{debug, warn};

use crate::error::LlmError;
use crate::types::{ChatCompletion, ChatRequest, CompletionRequest, GeneratedText};

/// Default Hugging Face Inference API base URL.
pub const DEFAULT_BASE_URL: &str = "https://router.huggingface.co";

/// Environment variable carrying the provider API key.
pub const API_KEY_ENV: &str = "HF_API_KEY";

const DEFAULT_TIMEOUT_MS: u64 = 30_000;

/// The provider seam the gateway calls through.
///
/// Both methods are single outbound network calls with no internal retry;
/// retry and fallback policy live in the gateway, not here.
#[async_trait]
pub trait InferenceClient: Send + Sync {
    /// Structured chat-completion call (role-tagged messages).
    async fn chat_completion(&self, request: &ChatRequest) -> Result<ChatCompletion, LlmError>;

    /// Raw text-generation call (plain prompt, continuation only).
    async fn text_generation(&self, request: &CompletionRequest) -> Result<String, LlmError>;

    /// Whether the client has credentials configured.
    fn is_available(&self) -> bool;
}

/// Hugging Face Inference API client.
///
/// The structured tier goes through the OpenAI-shaped
/// `/v1/chat/completions` endpoint; the raw tier through the per-model
/// `/models/{model}` text-generation endpoint with `return_full_text`
/// disabled so only the continuation comes back.
pub struct HfClient {
    http: Client,
    base_url: String,
    api_key: String,
    timeout: Duration,
}

impl HfClient {
    /// Create a client for the default endpoint.
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    /// Create a client against a custom endpoint (tests, proxies).
    #[must_use]
    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
        }
    }

    /// Create a client from the `HF_API_KEY` environment variable.
    ///
    /// # Errors
    ///
    /// Returns [`LlmError::MissingApiKey`] if the variable is unset or empty.
    pub fn from_env() -> Result<Self, LlmError> {
        let api_key = std::env::var(API_KEY_ENV).unwrap_or_default();
        if api_key.trim().is_empty() {
            return Err(LlmError::MissingApiKey {
                env_var: API_KEY_ENV.to_string(),
            });
        }
        Ok(Self::new(api_key))
    }

    /// Override the per-request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    async fn read_error_body(response: reqwest::Response) -> LlmError {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        LlmError::Http { status, body }
    }
}

#[async_trait]
impl InferenceClient for HfClient {
    async fn chat_completion(&self, request: &ChatRequest) -> Result<ChatCompletion, LlmError> {
        let url = format!("{}/v1/chat/completions", self.base_url);
        debug!(model = %request.model, "chat completion request");

        let response = self
            .http
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(request)
            .timeout(self.timeout)
            .send()
            .await?;

        if !response.status().is_success() {
            let err = Self::read_error_body(response).await;
            warn!(model = %request.model, %err, "chat completion failed");
            return Err(err);
        }

        response
            .json::<ChatCompletion>()
            .await
            .map_err(|e| LlmError::ParseError(e.to_string()))
    }

    async fn text_generation(&self, request: &CompletionRequest) -> Result<String, LlmError> {
        let url = format!("{}/models/{}", self.base_url, request.model);
        debug!(model = %request.model, "text generation request");

        let body = json!({
            "inputs": request.prompt,
            "parameters": {
                "max_new_tokens": request.max_new_tokens,
                "temperature": request.temperature,
                "return_full_text": false,
            }
        });

        let response = self
            .http
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&body)
            .timeout(self.timeout)
            .send()
            .await?;

        if !response.status().is_success() {
            let err = Self::read_error_body(response).await;
            warn!(model = %request.model, %err, "text generation failed");
            return Err(err);
        }

        // The endpoint answers with an array of generations; only the first
        // matters for a single-input request.
        let generations: Vec<GeneratedText> = response
            .json()
            .await
            .map_err(|e| LlmError::ParseError(e.to_string()))?;

        Ok(generations
            .into_iter()
            .next()
            .map(|g| g.generated_text)
            .unwrap_or_default())
    }

    fn is_available(&self) -> bool {
        !self.api_key.trim().is_empty()
    }
}
