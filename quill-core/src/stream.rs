//! Stream emitter — framed, paced delivery of a resolved text.
//!
//! The gateway resolves the whole text before any frame exists; this module
//! only re-packages it as a lazy sequence of fixed-width slices with a short
//! pacing delay between them, so clients can render progressively. The
//! sequence always ends with exactly one terminal sentinel frame.
//!
//! The stream is pull-based: nothing past the frame being awaited is
//! produced, and dropping the stream stops production.

use std::time::Duration;

use async_stream::stream;
use futures_core::stream::Stream;

use crate::config::GatewayConfig;

/// One unit of streamed output: a content slice or the terminal sentinel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamFrame {
    /// Slice of the result text. Empty for the terminal frame.
    pub payload: String,
    /// Whether this is the end-of-stream sentinel.
    pub is_terminal: bool,
}

impl StreamFrame {
    /// A content frame carrying one slice of the result text.
    #[must_use]
    pub fn data(payload: impl Into<String>) -> Self {
        Self {
            payload: payload.into(),
            is_terminal: false,
        }
    }

    /// The end-of-stream sentinel. Carries no text.
    #[must_use]
    pub fn terminal() -> Self {
        Self {
            payload: String::new(),
            is_terminal: true,
        }
    }

    /// Render the frame in server-sent-event wire form:
    /// `data: {payload}\n\n` for content, `data: [DONE]\n\n` for the
    /// sentinel.
    #[must_use]
    pub fn to_sse(&self) -> String {
        if self.is_terminal {
            "data: [DONE]\n\n".to_string()
        } else {
            format!("data: {}\n\n", self.payload)
        }
    }
}

/// Partition text into consecutive slices of `width` characters, the final
/// slice possibly shorter. Counts Unicode scalar values, so multi-byte text
/// never splits inside a character.
#[must_use]
pub fn chunk_text(text: &str, width: usize) -> Vec<String> {
    debug_assert!(width > 0, "chunk width is a configuration-time invariant");
    let chars: Vec<char> = text.chars().collect();
    chars
        .chunks(width)
        .map(|slice| slice.iter().collect())
        .collect()
}

/// Emits a resolved text as a paced frame stream.
///
/// Immutable after construction; each [`stream`](Self::stream) call produces
/// a fresh, independent sequence.
#[derive(Debug, Clone)]
pub struct StreamEmitter {
    chunk_chars: usize,
    frame_delay: Duration,
}

impl StreamEmitter {
    /// Create an emitter with an explicit frame width and pacing delay.
    #[must_use]
    pub fn new(chunk_chars: usize, frame_delay: Duration) -> Self {
        Self {
            chunk_chars,
            frame_delay,
        }
    }

    /// Create an emitter from gateway configuration.
    #[must_use]
    pub fn from_config(config: &GatewayConfig) -> Self {
        Self::new(
            config.chunk_chars,
            Duration::from_millis(config.frame_delay_ms),
        )
    }

    /// Stream `text` as content frames in textual order, a pacing delay
    /// after each, then exactly one terminal frame.
    ///
    /// Empty text yields only the terminal frame, without delay.
    pub fn stream(&self, text: String) -> impl Stream<Item = StreamFrame> + Send + use<> {
        let chunks = chunk_text(&text, self.chunk_chars);
        let delay = self.frame_delay;

        stream! {
            for chunk in chunks {
                yield StreamFrame::data(chunk);
                tokio::time::sleep(delay).await;
            }
            yield StreamFrame::terminal();
        }
    }
}
