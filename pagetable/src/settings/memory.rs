//! In-memory settings backend using DashMap

use dashmap::DashMap;

use super::{SettingsBackend, SettingsError};

/// Settings storage backed by a concurrent hash map.
///
/// Data is lost when the process exits. Share one instance through an
/// `Arc` to let several tables observe each other's writes.
///
/// # Example
///
/// ```
/// use pagetable::settings::{MemoryBackend, SettingsBackend};
///
/// let backend = MemoryBackend::new();
/// backend.set("orders-table-sort", "{}").unwrap();
/// assert_eq!(backend.get("orders-table-sort").unwrap().as_deref(), Some("{}"));
/// ```
#[derive(Debug, Default)]
pub struct MemoryBackend {
    store: DashMap<String, String>,
}

impl MemoryBackend {
    /// Creates a new empty backend.
    pub fn new() -> Self {
        Self {
            store: DashMap::new(),
        }
    }

    /// Returns the number of stored keys.
    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// Returns `true` if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Removes every stored key.
    pub fn clear(&self) {
        self.store.clear();
    }
}

impl SettingsBackend for MemoryBackend {
    fn get(&self, key: &str) -> Result<Option<String>, SettingsError> {
        Ok(self.store.get(key).map(|entry| entry.value().clone()))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), SettingsError> {
        self.store.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), SettingsError> {
        self.store.remove(key);
        Ok(())
    }

    fn keys_with_prefix(&self, prefix: &str) -> Result<Vec<String>, SettingsError> {
        let mut keys: Vec<String> = self
            .store
            .iter()
            .filter(|entry| entry.key().starts_with(prefix))
            .map(|entry| entry.key().clone())
            .collect();
        keys.sort();
        Ok(keys)
    }
}
