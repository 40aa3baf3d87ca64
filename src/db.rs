// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::storage::SqliteStorage;
use anyhow::{Context, Result};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use rusqlite::Connection;
use std::fs;
use std::path::{Path, PathBuf};

static APP: Lazy<(&str, &str, &str)> =
    Lazy::new(|| ("com.alphavelocity", "Stashbook", "stashbook"));

/// Location of the database file: the explicit override if given, otherwise
/// the platform data dir.
pub fn db_path(explicit: Option<&Path>) -> Result<PathBuf> {
    if let Some(p) = explicit {
        if let Some(parent) = p.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        return Ok(p.to_path_buf());
    }
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific data dir")?;
    let data_dir = proj.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data dir")?;
    Ok(data_dir.join("stashbook.sqlite"))
}

/// Open the database file, creating the `kv` table if it is missing.
pub fn open_or_init(path: &Path) -> Result<SqliteStorage> {
    let conn =
        Connection::open(path).with_context(|| format!("Open DB at {}", path.display()))?;
    SqliteStorage::new(conn).with_context(|| format!("Init schema at {}", path.display()))
}

pub(crate) fn init_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        r#"
    CREATE TABLE IF NOT EXISTS kv(
        key TEXT PRIMARY KEY,
        value TEXT NOT NULL,
        updated_at TEXT NOT NULL DEFAULT (datetime('now'))
    );
    "#,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::KeyValueStore;
    use tempfile::tempdir;

    #[test]
    fn open_or_init_creates_kv_table_once() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("stash.sqlite");
        let path = db_path(Some(path.as_path())).unwrap();
        let mut storage = open_or_init(&path).unwrap();
        storage.set("finance_settings", "{}").unwrap();
        let tables: i64 = storage
            .connection()
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name='kv'",
                [],
                |r| r.get(0),
            )
            .unwrap();
        assert_eq!(tables, 1);
        drop(storage);

        let storage = open_or_init(&path).unwrap();
        assert_eq!(storage.get("finance_settings").unwrap().as_deref(), Some("{}"));
    }
}
