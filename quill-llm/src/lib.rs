//! # quill-llm — Provider Client Layer for quill
//!
//! Typed client for the Hugging Face Inference API, exposing the two call
//! tiers the gateway relies on:
//!   - **Chat completion** (structured, role-tagged messages)
//!   - **Text generation** (raw prompt → continuation text)
//!
//! All provider access goes through the [`InferenceClient`] trait so the
//! gateway can be exercised against scripted fakes in tests. Response shapes
//! model every potentially-absent field as `Option` — a missing choice,
//! message, or content is "no text", never a panic or a parse error.

pub mod client;
pub mod error;
pub mod types;

pub use client::{HfClient, InferenceClient};
pub use error::LlmError;
pub use types::{ChatCompletion, ChatMessage, ChatRequest, CompletionRequest};
