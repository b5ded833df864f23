//! LLM — Gemini generation client.
//!
//! DESIGN
//! ======
//! `LlmGenerate` is the seam the assistant talks to; `GeminiClient` is the
//! only production implementation. Endpoint settings come from environment
//! variables (`config`), the API key comes from the caller on every call.

pub mod config;
pub mod gemini;
pub mod types;

pub use config::LlmConfig;
pub use gemini::GeminiClient;
pub use types::{LlmError, LlmGenerate};
