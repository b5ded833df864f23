//! Conversation state — the owned, persisted chat list.
//!
//! DESIGN
//! ======
//! `ConversationStore` is the only mutator of the conversation list, the
//! active-selection pointer and the API key. It is built once at startup by
//! `load` and mirrors itself to the `KvStore` after every mutation.
//!
//! PERSISTENCE
//! ===========
//! Each write is a full-document overwrite of one slot. Write failures are
//! logged and swallowed; in-memory state stays authoritative. Load is
//! strict: an undecodable payload is `MalformedState`, never an empty list.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{error, info};
use uuid::Uuid;

use crate::notice::ErrorCode;
use crate::store::{API_KEY_KEY, CHATS_KEY, KvStore, StoreError};

/// Characters of the first message kept in a derived title.
pub const TITLE_PREFIX_CHARS: usize = 30;
const TITLE_ELLIPSIS: &str = "...";

// =============================================================================
// ERROR
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum StateError {
    /// The stored conversation list could not be decoded.
    #[error("stored conversations are malformed: {0}")]
    MalformedState(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ErrorCode for StateError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::MalformedState(_) => "E_MALFORMED_STATE",
            Self::Store(e) => e.error_code(),
        }
    }
}

// =============================================================================
// MESSAGE
// =============================================================================

/// Author of a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// A single turn in a conversation. Immutable once appended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    #[serde(rename = "type")]
    pub role: Role,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

impl Message {
    #[must_use]
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self { id: Uuid::new_v4().to_string(), role, content: content.into(), timestamp: Utc::now() }
    }

    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    #[must_use]
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }
}

// =============================================================================
// CONVERSATION
// =============================================================================

/// A titled, ordered thread of messages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Conversation {
    pub id: String,
    pub title: String,
    pub messages: Vec<Message>,
    pub created_at: DateTime<Utc>,
}

impl Conversation {
    fn new(ordinal: usize) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: format!("Chat {ordinal}"),
            messages: Vec::new(),
            created_at: Utc::now(),
        }
    }
}

/// Title derived from a conversation's first message.
#[must_use]
pub fn derive_title(content: &str) -> String {
    let prefix: String = content.chars().take(TITLE_PREFIX_CHARS).collect();
    format!("{prefix}{TITLE_ELLIPSIS}")
}

// =============================================================================
// STORE
// =============================================================================

pub struct ConversationStore {
    backend: Arc<dyn KvStore>,
    /// Most recently created first.
    conversations: Vec<Conversation>,
    active: Option<String>,
    credential: String,
}

impl ConversationStore {
    /// Load both slots from `backend`. Missing slots load as empty.
    ///
    /// # Errors
    ///
    /// Returns [`StateError::MalformedState`] if the conversation slot does
    /// not decode, and [`StateError::Store`] if a slot cannot be read.
    pub fn load(backend: Arc<dyn KvStore>) -> Result<Self, StateError> {
        let conversations = match backend.get(CHATS_KEY)? {
            Some(raw) => decode_conversations(&raw)?,
            None => Vec::new(),
        };
        let credential = backend.get(API_KEY_KEY)?.unwrap_or_default();
        info!(conversations = conversations.len(), has_credential = !credential.is_empty(), "state: loaded");
        Ok(Self { backend, conversations, active: None, credential })
    }

    // -------------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------------

    /// All conversations, most recently created first.
    #[must_use]
    pub fn conversations(&self) -> &[Conversation] {
        &self.conversations
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Conversation> {
        self.conversations.iter().find(|c| c.id == id)
    }

    #[must_use]
    pub fn active_id(&self) -> Option<&str> {
        self.active.as_deref()
    }

    /// The selected conversation, if the selection names one that exists.
    #[must_use]
    pub fn active(&self) -> Option<&Conversation> {
        self.active.as_deref().and_then(|id| self.get(id))
    }

    #[must_use]
    pub fn credential(&self) -> &str {
        &self.credential
    }

    #[must_use]
    pub fn has_credential(&self) -> bool {
        !self.credential.trim().is_empty()
    }

    // -------------------------------------------------------------------------
    // Mutations
    // -------------------------------------------------------------------------

    /// Insert an empty conversation at the front and select it.
    pub fn create_conversation(&mut self) -> String {
        let conversation = Conversation::new(self.conversations.len() + 1);
        let id = conversation.id.clone();
        info!(conversation_id = %id, title = %conversation.title, "state: conversation created");
        self.conversations.insert(0, conversation);
        self.active = Some(id.clone());
        self.persist_conversations();
        id
    }

    /// Remove a conversation. Clears the selection if it was active.
    /// Unknown ids are ignored.
    pub fn delete_conversation(&mut self, id: &str) {
        let before = self.conversations.len();
        self.conversations.retain(|c| c.id != id);
        if self.active.as_deref() == Some(id) {
            self.active = None;
        }
        if self.conversations.len() != before {
            info!(conversation_id = %id, "state: conversation deleted");
        }
        self.persist_conversations();
    }

    /// Point the selection at `id` without checking that it exists.
    pub fn select_conversation(&mut self, id: &str) {
        self.active = Some(id.to_string());
    }

    /// Append to a conversation, deriving its title from the first message.
    /// Unknown ids are ignored.
    pub fn append_message(&mut self, id: &str, message: Message) {
        if let Some(conversation) = self.conversations.iter_mut().find(|c| c.id == id) {
            if conversation.messages.is_empty() {
                conversation.title = derive_title(&message.content);
            }
            conversation.messages.push(message);
        }
        self.persist_conversations();
    }

    pub fn set_credential(&mut self, credential: impl Into<String>) {
        self.credential = credential.into();
        if let Err(e) = self.backend.set(API_KEY_KEY, &self.credential) {
            error!(error = %e, "state: failed to persist credential");
        }
    }

    fn persist_conversations(&self) {
        let json = match serde_json::to_string(&self.conversations) {
            Ok(json) => json,
            Err(e) => {
                error!(error = %e, "state: failed to serialize conversations");
                return;
            }
        };
        if let Err(e) = self.backend.set(CHATS_KEY, &json) {
            error!(error = %e, count = self.conversations.len(), "state: failed to persist conversations");
        }
    }
}

/// Decode the conversation slot, validating timestamps, roles and id
/// uniqueness.
///
/// # Errors
///
/// Returns [`StateError::MalformedState`] describing the first failure.
pub fn decode_conversations(raw: &str) -> Result<Vec<Conversation>, StateError> {
    let conversations: Vec<Conversation> =
        serde_json::from_str(raw).map_err(|e| StateError::MalformedState(e.to_string()))?;

    let mut seen = HashSet::new();
    for conversation in &conversations {
        if !seen.insert(conversation.id.as_str()) {
            return Err(StateError::MalformedState(format!("duplicate conversation id {}", conversation.id)));
        }
        let mut message_ids = HashSet::new();
        for message in &conversation.messages {
            if !message_ids.insert(message.id.as_str()) {
                return Err(StateError::MalformedState(format!(
                    "duplicate message id {} in conversation {}",
                    message.id, conversation.id
                )));
            }
        }
    }
    Ok(conversations)
}

#[cfg(test)]
#[path = "state_test.rs"]
mod tests;
