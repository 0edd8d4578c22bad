//! Generation gateway — ordered candidate fallback over the provider client.
//!
//! Each request walks the configured model list in order. A candidate gets
//! two tiers: the structured chat call, then — if that produced no usable
//! text, including when the call itself errored — a raw completion fallback
//! with the same prompt and bounds. The first non-empty trimmed text ends
//! the walk immediately; later candidates are never touched.
//!
//! Per-candidate failures are recovered locally into an [`Attempt`] record.
//! Only total exhaustion propagates, carrying the last attempt's detail.

use std::sync::Arc;

use tracing::{debug, warn};

use quill_llm::client::InferenceClient;
use quill_llm::types::{ChatRequest, CompletionRequest};

use crate::config::GatewayConfig;
use crate::error::{GatewayError, Result};
use crate::prompt::{self, Mode};

/// Character cap on the provider error detail carried in the aggregated
/// failure message.
const ERROR_DETAIL_MAX_CHARS: usize = 320;

/// Outcome of one candidate's two-tier attempt.
#[derive(Debug, Clone)]
pub enum AttemptOutcome {
    /// A tier produced non-empty trimmed text.
    Success(String),
    /// Both tiers completed but neither produced usable text.
    Empty,
    /// At least one tier errored and neither produced usable text.
    Failed(String),
}

/// Transient per-candidate record, kept only to build the aggregated
/// failure message and the log trail.
#[derive(Debug, Clone)]
pub struct Attempt {
    /// Candidate model identifier.
    pub model: String,
    /// What happened.
    pub outcome: AttemptOutcome,
}

impl Attempt {
    /// One-line diagnostic for this attempt.
    #[must_use]
    pub fn describe(&self) -> String {
        match &self.outcome {
            AttemptOutcome::Success(_) => format!("model={} succeeded", self.model),
            AttemptOutcome::Empty => format!("model={} returned empty text", self.model),
            AttemptOutcome::Failed(message) => format!(
                "model={} error={}",
                self.model,
                truncate_chars(message, ERROR_DETAIL_MAX_CHARS)
            ),
        }
    }
}

/// The generation gateway.
///
/// Holds the provider client and the immutable configuration; safe to share
/// across concurrent request tasks, no state mutates per call.
pub struct Gateway {
    client: Arc<dyn InferenceClient>,
    config: GatewayConfig,
}

impl Gateway {
    /// Create a gateway over a provider client and configuration.
    #[must_use]
    pub fn new(client: Arc<dyn InferenceClient>, config: GatewayConfig) -> Self {
        Self { client, config }
    }

    /// The active configuration.
    #[must_use]
    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    /// Resolve a generation request to final text.
    ///
    /// `text` is trusted to be non-empty; the caller validates it before
    /// invoking the gateway.
    ///
    /// # Errors
    ///
    /// - [`GatewayError::MissingCredentials`] if the client has no API key
    ///   (checked before any network call).
    /// - [`GatewayError::NoModelsConfigured`] if the candidate list is empty
    ///   (checked before any network call).
    /// - [`GatewayError::ModelsExhausted`] if every candidate failed or
    ///   returned empty text from both tiers.
    pub async fn generate(&self, mode: Mode, text: &str) -> Result<String> {
        if !self.client.is_available() {
            return Err(GatewayError::MissingCredentials);
        }
        if self.config.models.is_empty() {
            return Err(GatewayError::NoModelsConfigured);
        }

        let prompt = prompt::build_prompt(mode, text);
        let mut last_attempt: Option<Attempt> = None;

        for model in &self.config.models {
            let attempt = self.try_candidate(model, &prompt).await;
            match attempt.outcome {
                AttemptOutcome::Success(output) => {
                    debug!(%mode, %model, chars = output.chars().count(), "generation resolved");
                    return Ok(output);
                }
                _ => {
                    warn!(%mode, detail = %attempt.describe(), "candidate exhausted, advancing");
                    last_attempt = Some(attempt);
                }
            }
        }

        let detail = last_attempt
            .map(|attempt| attempt.describe())
            .unwrap_or_else(|| "no successful model response".to_string());
        Err(GatewayError::ModelsExhausted { detail })
    }

    /// Run one candidate's two tiers. Never fails — the result is an
    /// [`Attempt`] record either way.
    async fn try_candidate(&self, model: &str, prompt: &str) -> Attempt {
        let mut tier_error: Option<String> = None;

        // Tier 1: structured chat call. A transport error here does not end
        // the candidate; the raw tier still runs.
        let chat = ChatRequest::single_user(
            model,
            prompt,
            self.config.max_tokens,
            self.config.temperature,
        );
        let chat_text = match self.client.chat_completion(&chat).await {
            Ok(response) => response
                .first_text()
                .map(|t| t.trim().to_string())
                .unwrap_or_default(),
            Err(err) => {
                warn!(%model, %err, "structured call failed, trying raw tier");
                tier_error = Some(err.to_string());
                String::new()
            }
        };
        if !chat_text.is_empty() {
            return Attempt {
                model: model.to_string(),
                outcome: AttemptOutcome::Success(chat_text),
            };
        }

        // Tier 2: raw completion fallback, same prompt and bounds.
        let completion = CompletionRequest {
            model: model.to_string(),
            prompt: prompt.to_string(),
            max_new_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
        };
        let raw_text = match self.client.text_generation(&completion).await {
            Ok(text) => text.trim().to_string(),
            Err(err) => {
                warn!(%model, %err, "raw completion failed");
                tier_error = Some(err.to_string());
                String::new()
            }
        };
        if !raw_text.is_empty() {
            return Attempt {
                model: model.to_string(),
                outcome: AttemptOutcome::Success(raw_text),
            };
        }

        let outcome = match tier_error {
            Some(message) => AttemptOutcome::Failed(message),
            None => AttemptOutcome::Empty,
        };
        Attempt {
            model: model.to_string(),
            outcome,
        }
    }
}

/// Truncate to a character count, never splitting a scalar value.
fn truncate_chars(message: &str, max_chars: usize) -> String {
    message.chars().take(max_chars).collect()
}
