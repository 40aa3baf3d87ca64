// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::StorageError;
use rusqlite::{Connection, OptionalExtension, params};
use std::collections::HashMap;
use tracing::trace;

/// Durable key-value namespace holding one opaque blob per key.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// SQLite-backed namespace: a single `kv` table.
pub struct SqliteStorage {
    conn: Connection,
}

impl SqliteStorage {
    pub fn new(conn: Connection) -> Result<Self, StorageError> {
        crate::db::init_schema(&conn)?;
        Ok(Self { conn })
    }

    pub fn in_memory() -> Result<Self, StorageError> {
        Self::new(Connection::open_in_memory()?)
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

impl KeyValueStore for SqliteStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let v: Option<String> = self
            .conn
            .query_row("SELECT value FROM kv WHERE key=?1", params![key], |r| {
                r.get(0)
            })
            .optional()?;
        Ok(v)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        trace!(key, bytes = value.len(), "writing blob");
        self.conn.execute(
            "INSERT INTO kv(key, value) VALUES(?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value=excluded.value, updated_at=datetime('now')",
            params![key, value],
        )?;
        Ok(())
    }
}

/// In-process namespace for tests and throwaway sessions.
#[derive(Debug, Default, Clone)]
pub struct MemoryStorage {
    entries: HashMap<String, String>,
    fail_reads: bool,
    fail_writes: bool,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(mut self, key: &str, value: &str) -> Self {
        self.entries.insert(key.to_string(), value.to_string());
        self
    }

    /// Make every subsequent `get` fail, as an unreadable backend would.
    pub fn fail_reads(&mut self, fail: bool) {
        self.fail_reads = fail;
    }

    /// Make every subsequent `set` fail, as a full or unavailable store would.
    pub fn fail_writes(&mut self, fail: bool) {
        self.fail_writes = fail;
    }
}

impl KeyValueStore for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        if self.fail_reads {
            return Err(StorageError::Unavailable(format!(
                "read of '{}' rejected",
                key
            )));
        }
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.fail_writes {
            return Err(StorageError::Unavailable(format!(
                "write to '{}' rejected",
                key
            )));
        }
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn sqlite_set_overwrites_previous_value() {
        let mut s = SqliteStorage::in_memory().unwrap();
        assert_eq!(s.get("k").unwrap(), None);
        s.set("k", "[1]").unwrap();
        s.set("k", "[2]").unwrap();
        assert_eq!(s.get("k").unwrap().as_deref(), Some("[2]"));
    }

    #[test]
    fn sqlite_values_survive_reopen() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("data.sqlite");
        {
            let mut s = SqliteStorage::new(Connection::open(&path).unwrap()).unwrap();
            s.set("finance_savings", "[]").unwrap();
        }
        let s = SqliteStorage::new(Connection::open(&path).unwrap()).unwrap();
        assert_eq!(s.get("finance_savings").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn memory_storage_can_reject_writes() {
        let mut s = MemoryStorage::new();
        s.fail_writes(true);
        assert!(s.set("k", "v").is_err());
        assert_eq!(s.get("k").unwrap(), None);
    }

    #[test]
    fn memory_storage_can_reject_reads() {
        let mut s = MemoryStorage::new().with_entry("k", "v");
        s.fail_reads(true);
        assert!(matches!(s.get("k"), Err(StorageError::Unavailable(_))));
        s.fail_reads(false);
        assert_eq!(s.get("k").unwrap().as_deref(), Some("v"));
    }
}
