//! Prompt templates for the two gateway modes.
//!
//! Each prompt is a fixed instruction followed by the client text verbatim,
//! closed by a shared output-discipline line so models answer with the final
//! text only.

use std::fmt;
use std::str::FromStr;

/// Instruction for summary mode.
pub const SUMMARY_INSTRUCTION: &str = "Summarize this blog content in 4-6 lines:";

/// Instruction for grammar mode.
pub const GRAMMAR_INSTRUCTION: &str =
    "Fix grammar and improve readability without changing meaning:";

/// Output-discipline line appended to every prompt regardless of mode.
pub const OUTPUT_FORMAT: &str = "Return only the final text. No explanations.";

/// Generation mode. Selects the instruction template; nothing else varies
/// the prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Condense the text into a short summary.
    Summary,
    /// Correct grammar and readability, preserving meaning.
    Grammar,
}

impl Mode {
    /// The instruction template for this mode.
    #[must_use]
    pub fn instruction(self) -> &'static str {
        match self {
            Self::Summary => SUMMARY_INSTRUCTION,
            Self::Grammar => GRAMMAR_INSTRUCTION,
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Summary => "summary",
            Self::Grammar => "grammar",
        };
        write!(f, "{name}")
    }
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "summary" => Ok(Self::Summary),
            "grammar" => Ok(Self::Grammar),
            _ => Err(format!("unknown generation mode: '{s}'")),
        }
    }
}

/// Build the full prompt for one generation request.
///
/// The client text is embedded verbatim between the mode instruction and the
/// output-discipline line.
#[must_use]
pub fn build_prompt(mode: Mode, text: &str) -> String {
    format!("{}\n\n{text}\n\n{OUTPUT_FORMAT}", mode.instruction())
}
