//! Request and response types for the two provider call tiers.
//!
//! The chat response mirrors the provider's wire shape, where every nested
//! field may be absent: a response with no choices, a choice with no message,
//! or a message with no content all extract to "no text" via
//! [`ChatCompletion::first_text`].

use serde::{Deserialize, Serialize};

/// A role-tagged message in a structured chat request.
#[derive(Debug, Clone, Serialize)]
pub struct ChatMessage {
    /// Message role ("user", "assistant", ...).
    pub role: String,
    /// Message text.
    pub content: String,
}

impl ChatMessage {
    /// Create a user-role message.
    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// A structured chat-completion request.
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    /// Candidate model identifier.
    pub model: String,
    /// Conversation messages (the gateway sends a single user message).
    pub messages: Vec<ChatMessage>,
    /// Maximum tokens to generate.
    pub max_tokens: u32,
    /// Sampling temperature (low = deterministic).
    pub temperature: f32,
}

impl ChatRequest {
    /// Build a single-user-message request, the only shape the gateway uses.
    #[must_use]
    pub fn single_user(
        model: impl Into<String>,
        prompt: impl Into<String>,
        max_tokens: u32,
        temperature: f32,
    ) -> Self {
        Self {
            model: model.into(),
            messages: vec![ChatMessage::user(prompt)],
            max_tokens,
            temperature,
        }
    }
}

/// A raw text-generation request (no message structure, no prompt echo).
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    /// Candidate model identifier.
    pub model: String,
    /// Full prompt string.
    pub prompt: String,
    /// Maximum new tokens to generate.
    pub max_new_tokens: u32,
    /// Sampling temperature.
    pub temperature: f32,
}

/// The assistant message inside a chat choice. Content may be absent.
#[derive(Debug, Clone, Deserialize)]
pub struct AssistantMessage {
    /// Generated text, if the provider produced any.
    #[serde(default)]
    pub content: Option<String>,
}

/// One completion choice. The message itself may be absent.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatChoice {
    /// The generated message, if present.
    #[serde(default)]
    pub message: Option<AssistantMessage>,
}

/// A chat-completion response: zero or more choices.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatCompletion {
    /// Completion choices, possibly empty.
    #[serde(default)]
    pub choices: Vec<ChatChoice>,
}

impl ChatCompletion {
    /// Extract the first choice's message content.
    ///
    /// Any absent field along the way yields `None`. Whitespace trimming and
    /// emptiness policy belong to the caller.
    #[must_use]
    pub fn first_text(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|choice| choice.message.as_ref())
            .and_then(|message| message.content.as_deref())
    }
}

/// One element of the raw text-generation response array.
#[derive(Debug, Clone, Deserialize)]
pub struct GeneratedText {
    /// The continuation text.
    #[serde(default)]
    pub generated_text: String,
}
