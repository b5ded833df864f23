//! Assistant service — user submission → prompt → Gemini → conversation.
//!
//! DESIGN
//! ======
//! `Assistant` owns the conversation store, the input buffer, the selected
//! processing mode and the generation client. A submission appends the
//! user's message first, then awaits a single generation call and appends
//! the reply. Failures never roll back the user's message; they come back
//! as a `Notice` for the front end to display.
//!
//! STATE
//! =====
//! `Idle -> Submitting -> Idle`, published on a `watch` channel so a front
//! end can render a busy indicator while the request is outstanding.
//! `submit` takes `&mut self`, so one assistant never has two requests in
//! flight. A guard restores `Idle` even when the submission future is
//! dropped mid-request.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{info, warn};

use crate::llm::LlmGenerate;
use crate::notice::{ErrorCode, Notice};
use crate::prompt::{ProcessingMode, build_prompt};
use crate::state::{Conversation, ConversationStore, Message};

/// Shown while a generation request is outstanding.
pub const BUSY_TEXT: &str = "Processing your request...";

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Idle,
    Submitting,
}

/// What happened to a submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Empty input, no active conversation, or a request already in flight.
    Ignored,
    /// The assistant's reply, already appended to the conversation.
    Replied(Message),
    /// Generation failed; the user's message stays in the conversation.
    Failed(Notice),
}

// =============================================================================
// ASSISTANT
// =============================================================================

pub struct Assistant {
    store: ConversationStore,
    llm: Arc<dyn LlmGenerate>,
    mode: ProcessingMode,
    input: String,
    status: watch::Sender<Status>,
}

impl Assistant {
    #[must_use]
    pub fn new(store: ConversationStore, llm: Arc<dyn LlmGenerate>) -> Self {
        Self {
            store,
            llm,
            mode: ProcessingMode::default(),
            input: String::new(),
            status: watch::Sender::new(Status::Idle),
        }
    }

    #[must_use]
    pub fn store(&self) -> &ConversationStore {
        &self.store
    }

    #[must_use]
    pub fn active(&self) -> Option<&Conversation> {
        self.store.active()
    }

    // -------------------------------------------------------------------------
    // Status
    // -------------------------------------------------------------------------

    #[must_use]
    pub fn status(&self) -> Status {
        *self.status.borrow()
    }

    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.status() == Status::Submitting
    }

    /// Watch status transitions (for a loading indicator).
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Status> {
        self.status.subscribe()
    }

    // -------------------------------------------------------------------------
    // Input buffer and mode
    // -------------------------------------------------------------------------

    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn set_input(&mut self, input: impl Into<String>) {
        self.input = input.into();
    }

    #[must_use]
    pub fn mode(&self) -> ProcessingMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: ProcessingMode) {
        self.mode = mode;
    }

    // -------------------------------------------------------------------------
    // Conversation actions
    // -------------------------------------------------------------------------

    pub fn new_conversation(&mut self) -> String {
        self.store.create_conversation()
    }

    pub fn select_conversation(&mut self, id: &str) {
        self.store.select_conversation(id);
    }

    pub fn delete_conversation(&mut self, id: &str) {
        self.store.delete_conversation(id);
    }

    pub fn set_credential(&mut self, credential: impl Into<String>) {
        self.store.set_credential(credential);
    }

    // -------------------------------------------------------------------------
    // Submission
    // -------------------------------------------------------------------------

    /// Submit the input buffer to the active conversation.
    pub async fn submit(&mut self) -> SubmitOutcome {
        let text = self.input.trim().to_string();
        if text.is_empty() || self.is_busy() {
            return SubmitOutcome::Ignored;
        }
        let Some(conversation_id) = self.store.active().map(|c| c.id.clone()) else {
            return SubmitOutcome::Ignored;
        };

        self.store.append_message(&conversation_id, Message::user(text.as_str()));
        self.input.clear();
        let _busy = BusyGuard::enter(&self.status);
        info!(%conversation_id, mode = %self.mode, input_len = text.len(), "assistant: submission accepted");

        let prompt = build_prompt(self.mode, &text);
        let result = self.llm.generate(self.store.credential(), &prompt).await;

        match result {
            Ok(reply) => {
                info!(%conversation_id, reply_len = reply.len(), "assistant: reply appended");
                let message = Message::assistant(reply);
                self.store.append_message(&conversation_id, message.clone());
                SubmitOutcome::Replied(message)
            }
            Err(e) => {
                warn!(%conversation_id, code = e.error_code(), error = %e, "assistant: generation failed");
                SubmitOutcome::Failed(Notice::from_error(&e))
            }
        }
    }

    /// Replace the input buffer with `text` and submit it.
    pub async fn submit_text(&mut self, text: impl Into<String>) -> SubmitOutcome {
        self.set_input(text);
        self.submit().await
    }
}

/// Holds `Submitting` for its lifetime. Dropping it, including when the
/// submission future is cancelled, publishes `Idle`.
struct BusyGuard<'a> {
    status: &'a watch::Sender<Status>,
}

impl<'a> BusyGuard<'a> {
    fn enter(status: &'a watch::Sender<Status>) -> Self {
        status.send_replace(Status::Submitting);
        Self { status }
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.status.send_replace(Status::Idle);
    }
}

#[cfg(test)]
#[path = "assistant_test.rs"]
mod tests;
