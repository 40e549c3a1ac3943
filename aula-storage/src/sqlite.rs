//! A single `kv_store` table behind a mutex-guarded connection.

use std::path::Path;
use std::sync::Mutex;

use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};

use aula_core::errors::AulaResult;
use aula_core::IDurableStore;

use crate::to_storage_err;

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS kv_store (
        key        TEXT PRIMARY KEY NOT NULL,
        value      TEXT NOT NULL,
        updated_at TEXT NOT NULL
    );
";

pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Open (or create) a store backed by a file on disk.
    pub fn open(path: &Path) -> AulaResult<Self> {
        let conn = Connection::open(path).map_err(|e| to_storage_err(e.to_string()))?;
        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            PRAGMA busy_timeout = 5000;
            ",
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
        Self::initialize(conn)
    }

    /// Open an in-memory store (for testing).
    pub fn open_in_memory() -> AulaResult<Self> {
        let conn = Connection::open_in_memory().map_err(|e| to_storage_err(e.to_string()))?;
        Self::initialize(conn)
    }

    fn initialize(conn: Connection) -> AulaResult<Self> {
        conn.execute_batch(SCHEMA)
            .map_err(|e| to_storage_err(e.to_string()))?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn with_conn<F, T>(&self, f: F) -> AulaResult<T>
    where
        F: FnOnce(&Connection) -> rusqlite::Result<T>,
    {
        let conn = self
            .conn
            .lock()
            .map_err(|e| to_storage_err(e.to_string()))?;
        f(&conn).map_err(|e| to_storage_err(e.to_string()))
    }

    /// Number of stored keys.
    pub fn count(&self) -> AulaResult<usize> {
        self.with_conn(|conn| {
            conn.query_row("SELECT COUNT(*) FROM kv_store", [], |row| {
                row.get::<_, i64>(0)
            })
        })
        .map(|n| n as usize)
    }
}

impl IDurableStore for SqliteStore {
    fn read(&self, key: &str) -> AulaResult<Option<String>> {
        self.with_conn(|conn| {
            conn.query_row(
                "SELECT value FROM kv_store WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()
        })
    }

    fn write(&self, key: &str, value: &str) -> AulaResult<()> {
        let now = Utc::now().to_rfc3339();
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO kv_store (key, value, updated_at) VALUES (?1, ?2, ?3)
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value,
                                                updated_at = excluded.updated_at",
                params![key, value, now],
            )
        })?;
        tracing::trace!(key = %key, bytes = value.len(), "kv_store write");
        Ok(())
    }

    fn remove(&self, key: &str) -> AulaResult<()> {
        self.with_conn(|conn| conn.execute("DELETE FROM kv_store WHERE key = ?1", params![key]))?;
        Ok(())
    }
}
