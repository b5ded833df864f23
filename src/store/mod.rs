//! Persistent store adapter: string-keyed blob slots.
//!
//! DESIGN
//! ======
//! The chat state and the API key each live in one slot, written in full on
//! every change. The trait is synchronous and object-safe so the
//! conversation store can hold an `Arc<dyn KvStore>` and tests can swap in
//! `MemoryStore`.

pub mod file;

use std::collections::HashMap;
use std::sync::Mutex;

pub use file::FileStore;

use crate::notice::ErrorCode;

/// Slot holding the serialized conversation list.
pub const CHATS_KEY: &str = "gemini-chats";
/// Slot holding the raw API key.
pub const API_KEY_KEY: &str = "gemini-api-key";

// =============================================================================
// ERROR
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Slot keys are restricted to a filename-safe alphabet.
    #[error("invalid store key: {0:?}")]
    InvalidKey(String),

    #[error("store I/O failed for {key}: {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },
}

impl ErrorCode for StoreError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidKey(_) => "E_STORE_INVALID_KEY",
            Self::Io { .. } => "E_STORE_IO",
        }
    }
}

// =============================================================================
// TRAIT
// =============================================================================

/// A key-value blob store with whole-value reads and writes.
pub trait KvStore: Send + Sync {
    /// Read a slot. Returns `Ok(None)` if the slot has never been written.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the key is invalid or the read fails.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Replace a slot's contents.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the key is invalid or the write fails.
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// Reject keys that could escape a directory or collide with hidden files.
pub(crate) fn validate_key(key: &str) -> Result<(), StoreError> {
    let valid = !key.is_empty()
        && !key.starts_with('.')
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));
    if valid { Ok(()) } else { Err(StoreError::InvalidKey(key.to_string())) }
}

// =============================================================================
// MEMORY STORE
// =============================================================================

/// In-process store. Nothing survives the process; used by tests and as a
/// fallback when no data directory is wanted.
#[derive(Default)]
pub struct MemoryStore {
    slots: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl KvStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        validate_key(key)?;
        let slots = self.slots.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        Ok(slots.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        validate_key(key)?;
        let mut slots = self.slots.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        slots.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
