//! Settings backend trait.

use super::SettingsError;

/// Durable string-keyed storage for serialized settings.
///
/// Implementations store raw strings; the [`SettingsProvider`](super::SettingsProvider)
/// wraps them with typed serialization. Looking up an absent key is not an
/// error and yields `Ok(None)`.
pub trait SettingsBackend: Send + Sync {
    /// Get the raw value stored under a key.
    fn get(&self, key: &str) -> Result<Option<String>, SettingsError>;

    /// Store a raw value under a key, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<(), SettingsError>;

    /// Remove a key. Removing an absent key succeeds.
    fn remove(&self, key: &str) -> Result<(), SettingsError>;

    /// Get all keys starting with a prefix.
    fn keys_with_prefix(&self, prefix: &str) -> Result<Vec<String>, SettingsError>;
}
