//! Prompt builder — processing mode + source text → instruction string.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The closed set of processing modes offered by the mode selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProcessingMode {
    #[default]
    Explain,
    Summarize,
    Shorten,
}

impl ProcessingMode {
    pub const ALL: [Self; 3] = [Self::Explain, Self::Summarize, Self::Shorten];

    /// Wire/CLI name (`explain`, `summarize`, `shorten`).
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Explain => "explain",
            Self::Summarize => "summarize",
            Self::Shorten => "shorten",
        }
    }

    /// Button label in the mode selector.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Explain => "What Does This Mean?",
            Self::Summarize => "Summarize",
            Self::Shorten => "Make This Shorter",
        }
    }

    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            Self::Explain => "Explain like I'm 5",
            Self::Summarize => "2-3 paragraphs max",
            Self::Shorten => "Compact version",
        }
    }
}

impl fmt::Display for ProcessingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown processing mode '{0}' (expected explain, summarize or shorten)")]
pub struct UnknownMode(pub String);

impl FromStr for ProcessingMode {
    type Err = UnknownMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|mode| mode.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownMode(s.to_string()))
    }
}

/// Build the instruction sent to the model for `text` under `mode`.
#[must_use]
pub fn build_prompt(mode: ProcessingMode, text: &str) -> String {
    let instruction = match mode {
        ProcessingMode::Explain => {
            "Please explain the following text in simple terms, as if explaining to a 5-year-old. \
             Make it clear and easy to understand:"
        }
        ProcessingMode::Summarize => {
            "Please provide a concise summary of the following text in 2-3 paragraphs maximum:"
        }
        ProcessingMode::Shorten => {
            "Please make the following text more compact and shorter while preserving the key information:"
        }
    };
    format!("{instruction}\n\n{text}")
}

#[cfg(test)]
#[path = "prompt_test.rs"]
mod tests;
