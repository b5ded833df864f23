//! LLM types — the generation trait and its error taxonomy.

use crate::notice::ErrorCode;

// =============================================================================
// ERROR
// =============================================================================

/// Errors produced by the generation client.
///
/// `Display` text is what the user sees in the error notice.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    /// No API key is stored. Checked before any network activity.
    #[error("Please enter your Gemini API key first")]
    MissingCredential,

    /// Connecting to or reading from the endpoint failed.
    #[error("network error: {0}")]
    Transport(String),

    /// The endpoint returned a non-success HTTP status.
    #[error("{message}")]
    Api { status: u16, message: String },

    /// Success status, but no candidate text in the body.
    #[error("Invalid response from Gemini API")]
    MalformedResponse,

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),

    /// A configuration value could not be parsed.
    #[error("config parse failed: {0}")]
    ConfigParse(String),
}

impl ErrorCode for LlmError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::MissingCredential => "E_MISSING_CREDENTIAL",
            Self::Transport(_) => "E_TRANSPORT",
            Self::Api { .. } => "E_API_RESPONSE",
            Self::MalformedResponse => "E_MALFORMED_RESPONSE",
            Self::HttpClientBuild(_) => "E_HTTP_CLIENT_BUILD",
            Self::ConfigParse(_) => "E_CONFIG_PARSE",
        }
    }

    // Informational only: the user resubmits manually, nothing retries.
    fn retryable(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::Api { status: 429 | 500..=599, .. })
    }
}

// =============================================================================
// GENERATION TRAIT
// =============================================================================

/// One prompt in, one generated text out. Enables mocking in tests.
#[async_trait::async_trait]
pub trait LlmGenerate: Send + Sync {
    /// Run a single request/response exchange with the model.
    ///
    /// # Errors
    ///
    /// Returns [`LlmError::MissingCredential`] for a blank credential, and
    /// the other [`LlmError`] variants for transport, status and body
    /// failures.
    async fn generate(&self, credential: &str, prompt: &str) -> Result<String, LlmError>;
}

#[cfg(test)]
#[path = "types_test.rs"]
mod tests;
