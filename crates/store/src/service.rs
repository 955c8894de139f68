//! Read-on-load / write-on-save lifecycle for the site settings record.
//!
//! Store failures propagate to the caller. Stored content that cannot be
//! understood does not: it loads as defaults.

use serde_json::Value;

use folio_config::{parse_settings_payload, SettingsPayload};

use crate::{SettingsStore, StoreError};

/// Read and decode the current settings.
pub fn load_settings(store: &dyn SettingsStore) -> Result<SettingsPayload, StoreError> {
    let raw = store.read()?;
    if raw.is_none() {
        log::info!("no settings stored at {}, using defaults", store.describe());
    }
    Ok(parse_settings_payload(&raw.unwrap_or(Value::Null)))
}

/// Normalize, encode and store `{theme, blog}`.
///
/// Returns what a subsequent [`load_settings`] will produce.
pub fn save_settings(
    store: &dyn SettingsStore,
    theme: &Value,
    blog: &Value,
) -> Result<SettingsPayload, StoreError> {
    let text = folio_config::serialize_settings_payload(theme, blog);
    let payload = folio_config::parse_settings_str(&text);
    store.write(&Value::String(text))?;
    Ok(payload)
}
