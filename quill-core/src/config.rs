//! Configuration for the quill gateway.
//!
//! Loadable from TOML or from the `HF_MODELS` / `HF_MODEL` environment
//! variables. Read once at startup and shared read-only across requests —
//! nothing here mutates after construction.

use serde::{Deserialize, Serialize};

use crate::error::{GatewayError, Result};

/// Built-in candidate model list, used when nothing else is configured.
pub const DEFAULT_MODELS: [&str; 3] = [
    "google/flan-t5-base",
    "google/flan-t5-small",
    "Qwen/Qwen2.5-0.5B-Instruct",
];

/// Gateway configuration, loadable from TOML.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// Ordered candidate model identifiers, consulted first to last.
    #[serde(default = "default_models")]
    pub models: Vec<String>,
    /// Maximum output tokens per provider call.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    /// Sampling temperature. Low: this is correction work, not creative
    /// writing.
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    /// Stream frame width, in characters.
    #[serde(default = "default_chunk_chars")]
    pub chunk_chars: usize,
    /// Pacing delay between stream frames, in milliseconds.
    #[serde(default = "default_frame_delay_ms")]
    pub frame_delay_ms: u64,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            models: default_models(),
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
            chunk_chars: default_chunk_chars(),
            frame_delay_ms: default_frame_delay_ms(),
        }
    }
}

impl GatewayConfig {
    /// Load configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Config`] if the TOML is invalid.
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        toml::from_str(toml_str).map_err(|e| GatewayError::Config(e.to_string()))
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Build configuration from environment variables.
    ///
    /// `HF_MODELS` is a comma-separated candidate list (entries trimmed,
    /// empties dropped) and wins outright when it yields any entry. If it
    /// is unset or blank, `HF_MODEL` replaces only the head of the built-in
    /// [`DEFAULT_MODELS`] chain — the fallback tail is kept, so a custom
    /// primary model still degrades to the stock candidates. With neither
    /// variable set, the chain is [`DEFAULT_MODELS`] verbatim.
    #[must_use]
    pub fn from_env() -> Self {
        let models = match std::env::var("HF_MODELS") {
            Ok(raw) => parse_model_list(&raw),
            Err(_) => Vec::new(),
        };

        let models = if models.is_empty() {
            let head = std::env::var("HF_MODEL")
                .ok()
                .map(|model| model.trim().to_string())
                .filter(|model| !model.is_empty())
                .unwrap_or_else(|| DEFAULT_MODELS[0].to_string());
            let mut chain = vec![head];
            chain.extend(DEFAULT_MODELS[1..].iter().map(ToString::to_string));
            chain
        } else {
            models
        };

        Self {
            models,
            ..Self::default()
        }
    }
}

/// Parse a comma-separated model list: trim entries, drop empties.
#[must_use]
pub fn parse_model_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(ToString::to_string)
        .collect()
}

fn default_models() -> Vec<String> {
    DEFAULT_MODELS.iter().map(ToString::to_string).collect()
}

fn default_max_tokens() -> u32 {
    220
}

fn default_temperature() -> f32 {
    0.2
}

fn default_chunk_chars() -> usize {
    18
}

fn default_frame_delay_ms() -> u64 {
    50
}
