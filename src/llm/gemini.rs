//! Gemini `generateContent` client.
//!
//! Thin HTTP wrapper around `POST /models/{model}:generateContent`. The key
//! travels as the `key` query parameter. Status/body classification lives
//! in `parse_response` so it can be tested without a network.

use std::error::Error as _;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::config::LlmConfig;
use super::types::{LlmError, LlmGenerate};

const TEMPERATURE: f64 = 0.7;
const TOP_K: u32 = 40;
const TOP_P: f64 = 0.8;
const MAX_OUTPUT_TOKENS: u32 = 1024;

// =============================================================================
// CLIENT
// =============================================================================

pub struct GeminiClient {
    http: reqwest::Client,
    config: LlmConfig,
}

impl GeminiClient {
    /// Build a client from environment configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the config is invalid or the HTTP client fails.
    pub fn from_env() -> Result<Self, LlmError> {
        Self::from_config(LlmConfig::from_env()?)
    }

    /// Build a client from a parsed config.
    ///
    /// # Errors
    ///
    /// Returns [`LlmError::HttpClientBuild`] if the HTTP client fails to build.
    pub fn from_config(config: LlmConfig) -> Result<Self, LlmError> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| LlmError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, config })
    }

    /// Return the configured model name (e.g. `"gemini-1.5-flash"`).
    #[must_use]
    pub fn model(&self) -> &str {
        &self.config.model
    }

    async fn generate_inner(&self, credential: &str, prompt: &str) -> Result<String, LlmError> {
        let credential = credential.trim();
        if credential.is_empty() {
            return Err(LlmError::MissingCredential);
        }

        let body = GenerateRequest::new(prompt);
        let response = self
            .http
            .post(self.config.generate_url())
            .query(&[("key", credential)])
            .json(&body)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status().as_u16();
        let text = response.text().await.map_err(transport_error)?;
        debug!(status, bytes = text.len(), model = %self.config.model, "gemini: response received");

        parse_response(status, &text).inspect_err(|e| debug!(status, error = %e, "gemini: request failed"))
    }
}

#[async_trait::async_trait]
impl LlmGenerate for GeminiClient {
    async fn generate(&self, credential: &str, prompt: &str) -> Result<String, LlmError> {
        self.generate_inner(credential, prompt).await
    }
}

/// Flatten a reqwest error and its source chain into one line. The URL is
/// stripped first because it carries the API key.
fn transport_error(err: reqwest::Error) -> LlmError {
    let err = err.without_url();
    let mut message = err.to_string();
    let mut source = std::error::Error::source(&err);
    while let Some(cause) = source {
        let text = cause.to_string();
        if !message.ends_with(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    LlmError::Transport(message)
}

// =============================================================================
// WIRE TYPES
// =============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    contents: [RequestContent<'a>; 1],
    generation_config: GenerationConfig,
}

impl<'a> GenerateRequest<'a> {
    fn new(prompt: &'a str) -> Self {
        Self {
            contents: [RequestContent { parts: [RequestPart { text: prompt }] }],
            generation_config: GenerationConfig {
                temperature: TEMPERATURE,
                top_k: TOP_K,
                top_p: TOP_P,
                max_output_tokens: MAX_OUTPUT_TOKENS,
            },
        }
    }
}

#[derive(Debug, Serialize)]
struct RequestContent<'a> {
    parts: [RequestPart<'a>; 1],
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f64,
    top_k: u32,
    top_p: f64,
    max_output_tokens: u32,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: Option<ErrorBody>,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

// =============================================================================
// PARSING
// =============================================================================

/// Classify a raw HTTP exchange into generated text or an [`LlmError`].
fn parse_response(status: u16, body: &str) -> Result<String, LlmError> {
    if !(200..300).contains(&status) {
        return Err(LlmError::Api { status, message: api_error_message(status, body) });
    }

    let parsed: GenerateResponse = serde_json::from_str(body).map_err(|_| LlmError::MalformedResponse)?;
    parsed
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .and_then(|c| c.parts.into_iter().next())
        .and_then(|p| p.text)
        .ok_or(LlmError::MalformedResponse)
}

/// The API's own `error.message` when the body carries one, else a generic
/// status line.
fn api_error_message(status: u16, body: &str) -> String {
    serde_json::from_str::<ErrorEnvelope>(body)
        .ok()
        .and_then(|env| env.error)
        .and_then(|err| err.message)
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| format!("API Error: {status}"))
}

#[cfg(test)]
#[path = "gemini_test.rs"]
mod tests;
