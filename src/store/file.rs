//! File-backed store: one file per slot under a data directory.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::{KvStore, StoreError, validate_key};

/// Directory name used under the platform data dir.
pub const APP_DIR_NAME: &str = "gemini-assistant";

pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Open (creating if needed) a store rooted at `root`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] if the directory cannot be created.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let root = root.into();
        fs::create_dir_all(&root)
            .map_err(|source| StoreError::Io { key: root.display().to_string(), source })?;
        Ok(Self { root })
    }

    /// Default location: `<platform data dir>/gemini-assistant`, falling back
    /// to the working directory when the platform reports none.
    #[must_use]
    pub fn default_root() -> PathBuf {
        dirs::data_dir().unwrap_or_else(|| PathBuf::from(".")).join(APP_DIR_NAME)
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn slot_path(&self, key: &str) -> PathBuf {
        self.root.join(key)
    }
}

impl KvStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        validate_key(key)?;
        match fs::read_to_string(self.slot_path(key)) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StoreError::Io { key: key.to_string(), source }),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        validate_key(key)?;
        // Temp file + rename: readers see either the old or the new document.
        let path = self.slot_path(key);
        let tmp = self.root.join(format!("{key}.tmp"));
        fs::write(&tmp, value).map_err(|source| StoreError::Io { key: key.to_string(), source })?;
        fs::rename(&tmp, &path).map_err(|source| StoreError::Io { key: key.to_string(), source })?;
        debug!(key, bytes = value.len(), "store: slot written");
        Ok(())
    }
}

#[cfg(test)]
#[path = "file_test.rs"]
mod tests;
