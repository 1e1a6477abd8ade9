//! Settings system for typed key-value storage.
//!
//! Table settings survive reloads by living in a [`SettingsBackend`]: a
//! shared string-keyed store. The [`SettingsProvider`] adds JSON
//! serialization on top, and [`Persisted`] is a typed cell that reads its
//! value once and writes every change back.

mod backend;
mod memory;
mod persisted;
mod sqlite;

pub use backend::SettingsBackend;
pub use memory::MemoryBackend;
pub use persisted::Persisted;
pub use sqlite::SqliteBackend;

use std::sync::Arc;

use log::warn;
use serde::{Serialize, de::DeserializeOwned};
use thiserror::Error;

/// Settings error type.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Serialization(serde_json::Error),
    #[error("deserialization error: {0}")]
    Deserialization(serde_json::Error),
}

/// Typed settings provider.
///
/// Wraps a `SettingsBackend` with typed serialization via serde_json.
/// Cloning is cheap and every clone talks to the same backend.
#[derive(Clone)]
pub struct SettingsProvider {
    backend: Arc<dyn SettingsBackend>,
}

impl SettingsProvider {
    /// Create a new settings provider with the given backend.
    pub fn new(backend: impl SettingsBackend + 'static) -> Self {
        Self {
            backend: Arc::new(backend),
        }
    }

    /// Create a provider over an already shared backend.
    pub fn from_shared(backend: Arc<dyn SettingsBackend>) -> Self {
        Self { backend }
    }

    /// Create a provider backed by a fresh [`MemoryBackend`].
    pub fn in_memory() -> Self {
        Self::new(MemoryBackend::new())
    }

    /// The underlying backend.
    pub fn backend(&self) -> &Arc<dyn SettingsBackend> {
        &self.backend
    }

    /// Get a typed value for a key.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, SettingsError> {
        match self.backend.get(key)? {
            Some(raw) => Ok(Some(
                serde_json::from_str(&raw).map_err(SettingsError::Deserialization)?,
            )),
            None => Ok(None),
        }
    }

    /// Get a typed value for a key, returning a default if not found.
    pub fn get_or<T: DeserializeOwned>(&self, key: &str, default: T) -> Result<T, SettingsError> {
        Ok(self.get(key)?.unwrap_or(default))
    }

    /// Read a typed value, recovering from every failure with `default`.
    ///
    /// An entry that cannot be parsed is removed from the backend so the
    /// next raw read of `key` sees nothing. Empty strings count as absent.
    pub fn load_or_discard<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        let raw = match self.backend.get(key) {
            Ok(Some(raw)) if !raw.is_empty() => raw,
            Ok(_) => return default,
            Err(err) => {
                warn!("settings: failed to read {key}: {err}");
                return default;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(err) => {
                warn!("settings: discarding corrupt entry {key}: {err}");
                if let Err(err) = self.backend.remove(key) {
                    warn!("settings: failed to remove {key}: {err}");
                }
                default
            }
        }
    }

    /// Set a typed value for a key.
    pub fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), SettingsError> {
        let raw = serde_json::to_string(value).map_err(SettingsError::Serialization)?;
        self.backend.set(key, &raw)
    }

    /// Delete a key.
    pub fn delete(&self, key: &str) -> Result<(), SettingsError> {
        self.backend.remove(key)
    }

    /// Get all keys matching a prefix.
    pub fn keys_with_prefix(&self, prefix: &str) -> Result<Vec<String>, SettingsError> {
        self.backend.keys_with_prefix(prefix)
    }
}

impl Default for SettingsProvider {
    fn default() -> Self {
        Self::in_memory()
    }
}

impl std::fmt::Debug for SettingsProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SettingsProvider").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_missing_is_none() {
        let provider = SettingsProvider::in_memory();
        assert_eq!(provider.get::<u32>("missing").unwrap(), None);
        assert_eq!(provider.get_or("missing", 5u32).unwrap(), 5);
    }

    #[test]
    fn test_get_reports_corrupt_data() {
        let provider = SettingsProvider::in_memory();
        provider.backend().set("k", "{not json").unwrap();
        assert!(matches!(
            provider.get::<u32>("k"),
            Err(SettingsError::Deserialization(_))
        ));
    }

    #[test]
    fn test_load_or_discard_removes_corrupt_entry() {
        let provider = SettingsProvider::in_memory();
        provider.backend().set("k", "{not json").unwrap();

        assert_eq!(provider.load_or_discard("k", 3u32), 3);
        assert_eq!(provider.backend().get("k").unwrap(), None);
    }

    #[test]
    fn test_load_or_discard_keeps_wrong_type_out() {
        let provider = SettingsProvider::in_memory();
        provider.set("k", "text").unwrap();

        assert!(!provider.load_or_discard("k", false));
        assert_eq!(provider.backend().get("k").unwrap(), None);
    }

    #[test]
    fn test_empty_string_is_treated_as_absent() {
        let provider = SettingsProvider::in_memory();
        provider.backend().set("k", "").unwrap();

        assert_eq!(provider.load_or_discard("k", 9u8), 9);
        assert_eq!(provider.backend().get("k").unwrap().as_deref(), Some(""));
    }
}
