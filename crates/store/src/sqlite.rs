// SQLite single-row settings table

use std::path::{Path, PathBuf};

use rusqlite::{params, Connection, OptionalExtension};
use serde_json::Value;

use crate::{raw_to_text, SettingsStore, StoreError};

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS site_settings (
    id INTEGER PRIMARY KEY,
    value TEXT,                  -- serialized {theme, blog} payload
    updated_at TEXT NOT NULL     -- RFC 3339, UTC
);
"#;

/// Settings kept in one row of a local SQLite table.
pub struct SqliteStore {
    conn: Connection,
    path: PathBuf,
    row_id: i64,
}

impl SqliteStore {
    /// Open (or create) the database and make sure the table exists.
    pub fn open(path: impl AsRef<Path>, row_id: i64) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let conn = Connection::open(&path)?;
        conn.execute_batch(SCHEMA)?;
        Ok(Self { conn, path, row_id })
    }
}

impl SettingsStore for SqliteStore {
    fn read(&self) -> Result<Option<Value>, StoreError> {
        let value: Option<Option<String>> = self
            .conn
            .query_row(
                "SELECT value FROM site_settings WHERE id = ?1",
                params![self.row_id],
                |row| row.get(0),
            )
            .optional()?;
        log::debug!("read settings row {} from {}", self.row_id, self.path.display());
        Ok(value.flatten().map(Value::String))
    }

    fn write(&self, raw: &Value) -> Result<(), StoreError> {
        self.conn.execute(
            "INSERT INTO site_settings (id, value, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(id) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            params![self.row_id, raw_to_text(raw), chrono::Utc::now().to_rfc3339()],
        )?;
        log::info!("settings row {} written to {}", self.row_id, self.path.display());
        Ok(())
    }

    fn describe(&self) -> String {
        format!("sqlite:{}#{}", self.path.display(), self.row_id)
    }

    fn updated_at(&self) -> Result<Option<String>, StoreError> {
        let updated = self
            .conn
            .query_row(
                "SELECT updated_at FROM site_settings WHERE id = ?1",
                params![self.row_id],
                |row| row.get(0),
            )
            .optional()?;
        Ok(updated)
    }
}
