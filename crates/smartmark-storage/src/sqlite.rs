use crate::{KvStore, Result};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;

/// Key-value slots backed by a single SQLite table
///
/// SQLite was chosen because:
/// - Zero-config embedded database
/// - Atomic single-row upserts, so a crash mid-write never leaves half a slot
/// - Doesn't require a separate process
pub struct SqliteKvStore {
    conn: Connection,
}

impl SqliteKvStore {
    /// Open (or create) the database file at `db_path`
    pub fn new<P: AsRef<Path>>(db_path: P) -> Result<Self> {
        let db_path = db_path.as_ref();

        if let Some(parent) = db_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(db_path)?;
        tracing::debug!("Opened key-value store at {}", db_path.display());

        // Initialize schema on first run
        Self::init_schema(&conn)?;

        Ok(Self { conn })
    }

    /// Throwaway store that lives only as long as the value
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Self::init_schema(&conn)?;
        Ok(Self { conn })
    }

    fn init_schema(conn: &Connection) -> rusqlite::Result<()> {
        conn.execute(
            "CREATE TABLE IF NOT EXISTS kv_store (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL,
                updated_at INTEGER NOT NULL
            )",
            [],
        )?;

        Ok(())
    }
}

impl KvStore for SqliteKvStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_store WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let now = chrono::Utc::now().timestamp_millis();
        self.conn.execute(
            "INSERT INTO kv_store (key, value, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            params![key, value, now],
        )?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.conn
            .execute("DELETE FROM kv_store WHERE key = ?1", params![key])?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_key_is_none() {
        let store = SqliteKvStore::in_memory().unwrap();
        assert_eq!(store.get("nope").unwrap(), None);
    }

    #[test]
    fn test_set_overwrites_slot() {
        let store = SqliteKvStore::in_memory().unwrap();

        store.set("smart-bookmarks", "[]").unwrap();
        store.set("smart-bookmarks", "[1]").unwrap();

        assert_eq!(store.get("smart-bookmarks").unwrap().as_deref(), Some("[1]"));
    }

    #[test]
    fn test_remove_slot() {
        let store = SqliteKvStore::in_memory().unwrap();

        store.set("a", "1").unwrap();
        store.remove("a").unwrap();
        // Removing twice is fine
        store.remove("a").unwrap();

        assert_eq!(store.get("a").unwrap(), None);
    }

    #[test]
    fn test_persists_across_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("smartmark.db");

        {
            let store = SqliteKvStore::new(&path).unwrap();
            store.set("smart-bookmarks", "[{\"id\":1}]").unwrap();
        }

        let reopened = SqliteKvStore::new(&path).unwrap();
        assert_eq!(
            reopened.get("smart-bookmarks").unwrap().as_deref(),
            Some("[{\"id\":1}]")
        );
    }
}
