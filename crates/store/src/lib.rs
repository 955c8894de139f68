//! Settings persistence behind the settings codec.
//!
//! A store only moves the raw persisted value around: `read()` returns
//! whatever is stored (or `None`), `write()` replaces it. Turning that value
//! into typed settings is `folio_config`'s job; the [`service`] module wires
//! the two together.
//!
//! Backends are blocking (no async runtime required).

mod config;
mod error;
mod file;
mod rest;
pub mod service;
mod sqlite;

pub use config::{config_file_path, Backend, StoreConfig};
pub use error::StoreError;
pub use file::FileStore;
pub use rest::RestStore;
pub use service::{load_settings, save_settings};
pub use sqlite::SqliteStore;

use serde_json::Value;

/// Single-record settings storage.
pub trait SettingsStore {
    /// Current raw value, `None` when nothing has been stored yet.
    fn read(&self) -> Result<Option<Value>, StoreError>;

    /// Replace the stored value.
    fn write(&self, raw: &Value) -> Result<(), StoreError>;

    /// Human-readable location, for logs and CLI output.
    fn describe(&self) -> String;

    /// RFC 3339 time of the last write, for backends that track it.
    fn updated_at(&self) -> Result<Option<String>, StoreError> {
        Ok(None)
    }
}

/// Stored text for a raw value: strings are stored as-is, anything else
/// as its JSON encoding.
pub(crate) fn raw_to_text(raw: &Value) -> String {
    match raw {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
