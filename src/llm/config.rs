//! LLM configuration parsed from environment variables.
//!
//! The API key is not read here; it lives in the persistent store.

use super::types::LlmError;

pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-flash";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LlmConfig {
    pub base_url: String,
    pub model: String,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self { base_url: DEFAULT_GEMINI_BASE_URL.to_string(), model: DEFAULT_GEMINI_MODEL.to_string() }
    }
}

impl LlmConfig {
    /// Build typed config from environment variables.
    ///
    /// Optional:
    /// - `GEMINI_BASE_URL`: API root, default `https://generativelanguage.googleapis.com/v1beta`
    /// - `GEMINI_MODEL`: model name, default `gemini-1.5-flash`
    ///
    /// # Errors
    ///
    /// Returns [`LlmError::ConfigParse`] if a variable is set but blank.
    pub fn from_env() -> Result<Self, LlmError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build config from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Returns [`LlmError::ConfigParse`] if a variable is set but blank.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, LlmError> {
        let base_url = non_blank("GEMINI_BASE_URL", lookup("GEMINI_BASE_URL"))?
            .unwrap_or_else(|| DEFAULT_GEMINI_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();
        let model = non_blank("GEMINI_MODEL", lookup("GEMINI_MODEL"))?
            .unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string());

        Ok(Self { base_url, model })
    }

    /// Full `generateContent` URL for the configured model.
    #[must_use]
    pub fn generate_url(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }
}

fn non_blank(key: &str, value: Option<String>) -> Result<Option<String>, LlmError> {
    match value {
        Some(v) if v.trim().is_empty() => Err(LlmError::ConfigParse(format!("{key} is set but empty"))),
        Some(v) => Ok(Some(v.trim().to_string())),
        None => Ok(None),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
