//! Error types for the quill gateway.

use thiserror::Error;

/// Top-level error type for gateway operations.
///
/// Individual candidate failures never appear here — they are recovered
/// locally inside the candidate loop. Only configuration problems and total
/// candidate exhaustion propagate to the caller.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// The candidate model list is empty; no call was attempted.
    #[error("no candidate models configured")]
    NoModelsConfigured,

    /// Provider credentials are absent; no call was attempted.
    ///
    /// The caller should map this to a "service unavailable" response,
    /// distinct from an upstream failure.
    #[error("provider credentials missing: configure the AI provider API key")]
    MissingCredentials,

    /// Configuration could not be loaded or parsed.
    #[error("configuration error: {0}")]
    Config(String),

    /// Every candidate model failed or returned empty text.
    ///
    /// `detail` describes only the most recent attempt; the full trail is
    /// logged, not carried.
    #[error("AI provider error: {detail}")]
    ModelsExhausted {
        /// Diagnostic from the last attempt (model id + classification).
        detail: String,
    },

    /// Generic I/O error (config file loading).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience Result type alias.
pub type Result<T> = std::result::Result<T, GatewayError>;
