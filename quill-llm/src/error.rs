//! Provider-layer error types.

use thiserror::Error;

/// Errors that can occur while talking to an inference provider.
#[derive(Debug, Error)]
pub enum LlmError {
    /// HTTP request failed before a response was received.
    #[error("provider request failed: {0}")]
    RequestFailed(String),

    /// Provider answered with a non-success status.
    #[error("provider returned HTTP {status}: {body}")]
    Http {
        /// HTTP status code.
        status: u16,
        /// Response body (possibly empty).
        body: String,
    },

    /// Provider response body could not be decoded.
    #[error("failed to parse provider response: {0}")]
    ParseError(String),

    /// Request timed out.
    #[error("provider request timed out after {0}ms")]
    Timeout(u64),

    /// Provider endpoint is unreachable.
    #[error("provider unavailable: {0}")]
    Unavailable(String),

    /// No API key configured for the provider.
    #[error("provider API key missing: set {env_var}")]
    MissingApiKey {
        /// Environment variable that should carry the key.
        env_var: String,
    },
}

impl From<reqwest::Error> for LlmError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            LlmError::Timeout(0)
        } else if err.is_connect() {
            LlmError::Unavailable(err.to_string())
        } else {
            LlmError::RequestFailed(err.to_string())
        }
    }
}

/// Convenience Result type alias.
pub type Result<T> = std::result::Result<T, LlmError>;
