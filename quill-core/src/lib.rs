//! # quill Core Library
//!
//! The text-generation gateway behind quill's writing assistant: given a
//! request mode (summarize or fix-grammar) and raw text, produce a cleaned
//! or summarized result by walking an ordered list of candidate models, then
//! deliver it to the client as a paced sequence of framed chunks.
//!
//! Two components, composed linearly:
//!
//! - [`Gateway`] — tries each candidate model in configured order, with a
//!   two-tier attempt per candidate (structured chat call, then raw
//!   completion fallback), short-circuiting on the first non-empty result.
//! - [`StreamEmitter`] — re-packages the resolved text as fixed-width frames
//!   emitted with a pacing delay, terminated by one sentinel frame.
//!
//! Streaming never starts before a result is fully resolved; total failure
//! surfaces as a single [`GatewayError`] and no frame is ever emitted.

#![deny(clippy::unwrap_used)]
#![deny(missing_docs)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod gateway;
pub mod prompt;
pub mod stream;

pub use config::GatewayConfig;
pub use error::{GatewayError, Result};
pub use gateway::Gateway;
pub use prompt::Mode;
pub use stream::{StreamEmitter, StreamFrame};
