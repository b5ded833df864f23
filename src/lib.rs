//! Gemini Assistant — explain, summarize or shorten pasted text with Gemini.
//!
//! DESIGN
//! ======
//! Leaf-first: `store` (key-value slots) → `state` (conversations, active
//! selection, API key) → `prompt` (mode templates) → `llm` (one Gemini
//! exchange) → `services::assistant` (submission flow). `repl` is the
//! terminal front end used by the binary.

pub mod llm;
pub mod notice;
pub mod prompt;
pub mod repl;
pub mod services;
pub mod state;
pub mod store;
