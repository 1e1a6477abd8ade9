//! SQLite settings backend with in-memory cache.

use std::path::Path;
use std::sync::Mutex;

use dashmap::DashMap;
use rusqlite::{Connection, OptionalExtension, params};

use super::{SettingsBackend, SettingsError};

/// SQLite-backed settings storage with DashMap cache.
pub struct SqliteBackend {
    conn: Mutex<Connection>,
    cache: DashMap<String, String>,
}

impl SqliteBackend {
    /// Open (or create) a settings database at the given path.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        Self::with_connection(Connection::open(path)?)
    }

    /// Create a database that lives only as long as this backend.
    pub fn in_memory() -> Result<Self, SettingsError> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self, SettingsError> {
        conn.execute(
            "CREATE TABLE IF NOT EXISTS settings (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            )",
            [],
        )?;

        Ok(Self {
            conn: Mutex::new(conn),
            cache: DashMap::new(),
        })
    }

    fn with_conn<R>(
        &self,
        f: impl FnOnce(&Connection) -> rusqlite::Result<R>,
    ) -> Result<R, SettingsError> {
        let conn = self
            .conn
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        Ok(f(&conn)?)
    }
}

impl SettingsBackend for SqliteBackend {
    fn get(&self, key: &str) -> Result<Option<String>, SettingsError> {
        // Check cache first
        if let Some(value) = self.cache.get(key) {
            return Ok(Some(value.clone()));
        }

        let result = self.with_conn(|conn| {
            conn.query_row(
                "SELECT value FROM settings WHERE key = ?",
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional()
        })?;

        if let Some(ref value) = result {
            self.cache.insert(key.to_string(), value.clone());
        }

        Ok(result)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), SettingsError> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO settings (key, value) VALUES (?, ?)
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value",
                params![key, value],
            )
        })?;

        self.cache.insert(key.to_string(), value.to_string());

        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), SettingsError> {
        self.with_conn(|conn| conn.execute("DELETE FROM settings WHERE key = ?", [key]))?;

        self.cache.remove(key);

        Ok(())
    }

    fn keys_with_prefix(&self, prefix: &str) -> Result<Vec<String>, SettingsError> {
        // substr() instead of LIKE so '%' and '_' in table namespaces match literally
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT key FROM settings WHERE substr(key, 1, length(?1)) = ?1 ORDER BY key",
            )?;
            let rows = stmt.query_map([prefix], |row| row.get(0))?;
            rows.collect::<Result<Vec<String>, _>>()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip_in_memory() {
        let backend = SqliteBackend::in_memory().unwrap();
        assert_eq!(backend.get("k").unwrap(), None);

        backend.set("k", "{\"a\":1}").unwrap();
        assert_eq!(backend.get("k").unwrap().as_deref(), Some("{\"a\":1}"));

        backend.set("k", "2").unwrap();
        assert_eq!(backend.get("k").unwrap().as_deref(), Some("2"));

        backend.remove("k").unwrap();
        assert_eq!(backend.get("k").unwrap(), None);
    }

    #[test]
    fn test_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.db");

        {
            let backend = SqliteBackend::open(&path).unwrap();
            backend.set("users-table-sort", "true").unwrap();
        }

        let backend = SqliteBackend::open(&path).unwrap();
        assert_eq!(
            backend.get("users-table-sort").unwrap().as_deref(),
            Some("true")
        );
    }

    #[test]
    fn test_keys_with_prefix_is_literal() {
        let backend = SqliteBackend::in_memory().unwrap();
        backend.set("a_b-table-sort", "1").unwrap();
        backend.set("axb-table-sort", "2").unwrap();

        assert_eq!(
            backend.keys_with_prefix("a_b-").unwrap(),
            vec!["a_b-table-sort".to_string()]
        );
    }
}
