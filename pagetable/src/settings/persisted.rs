//! Typed value cell mirrored into a settings backend.

use log::{debug, warn};
use serde::{Serialize, de::DeserializeOwned};

use super::SettingsProvider;

/// A value persisted under a key.
///
/// The value is read once when the cell is created (falling back to the
/// default when the entry is absent or corrupt) and written back on every
/// change, including once on creation.
#[derive(Debug, Clone)]
pub struct Persisted<T> {
    provider: SettingsProvider,
    key: String,
    default: T,
    value: T,
}

impl<T> Persisted<T>
where
    T: Serialize + DeserializeOwned + Clone,
{
    /// Load the value stored under `key` and write it back.
    pub fn load(provider: &SettingsProvider, key: impl Into<String>, default: T) -> Self {
        let key = key.into();
        let value = provider.load_or_discard(&key, default.clone());
        let cell = Self {
            provider: provider.clone(),
            key,
            default,
            value,
        };
        cell.write();
        cell
    }

    /// The current value.
    pub fn get(&self) -> &T {
        &self.value
    }

    /// The key this cell persists under.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Replace the value and persist it.
    pub fn set(&mut self, value: T) {
        self.value = value;
        self.write();
    }

    /// Replace the value with a function of the previous value and persist it.
    pub fn update<F>(&mut self, f: F)
    where
        F: FnOnce(&T) -> T,
    {
        let value = f(&self.value);
        self.set(value);
    }

    /// Switch to a different key, reading the value stored there.
    ///
    /// Nothing is copied from the old key.
    pub fn set_key(&mut self, key: impl Into<String>) {
        let key = key.into();
        if key == self.key {
            return;
        }
        debug!("settings: rekey {} -> {}", self.key, key);
        self.value = self.provider.load_or_discard(&key, self.default.clone());
        self.key = key;
        self.write();
    }

    fn write(&self) {
        if let Err(err) = self.provider.set(&self.key, &self.value) {
            warn!("settings: failed to persist {}: {err}", self.key);
        }
    }
}
