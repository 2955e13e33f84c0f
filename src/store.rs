use std::path::Path;

use rusqlite::{params, Connection, OptionalExtension};
use tracing::{debug, warn};

use crate::error::StoreError;

/// Key the word list is stored under.
pub const WORDS_KEY: &str = "vocabularyWords";

pub trait WordStore {
    /// Saved words, or an empty list when nothing usable is stored.
    fn load(&self) -> Vec<String>;
    fn save(&self, words: &[String]) -> Result<(), StoreError>;
    fn clear(&self) -> Result<(), StoreError>;
}

/// Small key-value table in SQLite holding JSON values.
#[derive(Debug)]
pub struct SqliteWordStore {
    conn: Connection,
}

impl SqliteWordStore {
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        Self::init(Connection::open(path)?)
    }

    pub fn in_memory() -> Result<Self, StoreError> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self, StoreError> {
        conn.execute(
            r#"
            CREATE TABLE IF NOT EXISTS kv (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL,
                updated_at DATETIME DEFAULT CURRENT_TIMESTAMP
            )
            "#,
            [],
        )?;
        Ok(Self { conn })
    }

    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let value = self
            .conn
            .query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| {
                row.get(0)
            })
            .optional()?;
        Ok(value)
    }

    fn put(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.conn.execute(
            r#"
            INSERT INTO kv (key, value) VALUES (?1, ?2)
            ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = CURRENT_TIMESTAMP
            "#,
            params![key, value],
        )?;
        Ok(())
    }

    fn decode(raw: &str) -> Result<Vec<String>, StoreError> {
        Ok(serde_json::from_str(raw)?)
    }
}

impl WordStore for SqliteWordStore {
    fn load(&self) -> Vec<String> {
        let raw = match self.get(WORDS_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                warn!("could not read saved words: {e}");
                return Vec::new();
            }
        };

        match Self::decode(&raw) {
            Ok(words) => {
                debug!("loaded {} saved words", words.len());
                words
            }
            Err(e) => {
                warn!("ignoring corrupt saved word list: {e}");
                Vec::new()
            }
        }
    }

    fn save(&self, words: &[String]) -> Result<(), StoreError> {
        let value = serde_json::to_string(words)?;
        self.put(WORDS_KEY, &value)
    }

    fn clear(&self) -> Result<(), StoreError> {
        self.conn
            .execute("DELETE FROM kv WHERE key = ?1", params![WORDS_KEY])?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn words(list: &[&str]) -> Vec<String> {
        list.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_empty_store_loads_nothing() {
        let store = SqliteWordStore::in_memory().unwrap();
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_save_then_load() {
        let store = SqliteWordStore::in_memory().unwrap();
        store.save(&words(&["cat", "dog"])).unwrap();
        store.save(&words(&["cat", "dog", "bird"])).unwrap();
        assert_eq!(store.load(), words(&["cat", "dog", "bird"]));
    }

    #[test]
    fn test_stored_as_json_array() {
        let store = SqliteWordStore::in_memory().unwrap();
        store.save(&words(&["a", "b"])).unwrap();
        assert_eq!(store.get(WORDS_KEY).unwrap().as_deref(), Some(r#"["a","b"]"#));
    }

    #[test]
    fn test_corrupt_value_loads_empty() {
        let store = SqliteWordStore::in_memory().unwrap();
        store.put(WORDS_KEY, "{not json").unwrap();
        assert!(store.load().is_empty());

        store.put(WORDS_KEY, r#"{"words":["a"]}"#).unwrap();
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_clear_removes_words() {
        let store = SqliteWordStore::in_memory().unwrap();
        store.save(&words(&["a"])).unwrap();
        store.clear().unwrap();
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_file_store_persists() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("words.db");
        {
            let store = SqliteWordStore::open(&path).unwrap();
            store.save(&words(&["persist"])).unwrap();
        }
        let store = SqliteWordStore::open(&path).unwrap();
        assert_eq!(store.load(), words(&["persist"]));
    }
}
