// Store configuration
// Loaded from ~/.config/folio/store.toml

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{FileStore, RestStore, SettingsStore, SqliteStore, StoreError};

/// Which backend holds the settings record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// Local JSON file (default)
    #[default]
    File,
    /// Local SQLite database, one row
    Sqlite,
    /// Hosted backend REST table
    Rest,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub backend: Backend,

    /// File or database path; defaults under the user data directory
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,

    /// Project URL of the hosted backend (rest only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Table name (sqlite uses a fixed table; rest uses this one)
    pub table: String,

    /// Id of the settings row
    pub row_id: i64,

    /// API key for the hosted backend. Prefer FOLIO_API_KEY over storing it here.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: Backend::File,
            path: None,
            url: None,
            table: "site_settings".into(),
            row_id: 1,
            api_key: None,
        }
    }
}

/// Returns the path to the store config file.
pub fn config_file_path() -> Option<PathBuf> {
    dirs::config_dir().map(|c| c.join("folio").join("store.toml"))
}

fn data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("folio")
}

impl StoreConfig {
    /// Load from the default location. A missing file means defaults.
    pub fn load() -> Result<Self, StoreError> {
        match config_file_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load from an explicit path. A missing file means defaults;
    /// an unreadable or invalid one is an error.
    pub fn load_from(path: &Path) -> Result<Self, StoreError> {
        if !path.exists() {
            log::debug!("no store config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let contents = fs::read_to_string(path)?;
        toml::from_str(&contents)
            .map_err(|e| StoreError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Write this config as TOML, creating the parent directory.
    pub fn save_to(&self, path: &Path) -> Result<(), StoreError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let contents = toml::to_string_pretty(self)
            .map_err(|e| StoreError::Config(e.to_string()))?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Effective path for the local backends
    pub fn resolved_path(&self) -> PathBuf {
        if let Some(path) = &self.path {
            return path.clone();
        }
        match self.backend {
            Backend::Sqlite => data_dir().join("site.db"),
            Backend::File | Backend::Rest => data_dir().join("settings.json"),
        }
    }

    /// Build the configured store.
    pub fn open(&self) -> Result<Box<dyn SettingsStore>, StoreError> {
        match self.backend {
            Backend::File => Ok(Box::new(FileStore::new(self.resolved_path()))),
            Backend::Sqlite => Ok(Box::new(SqliteStore::open(self.resolved_path(), self.row_id)?)),
            Backend::Rest => {
                let url = self
                    .url
                    .as_deref()
                    .filter(|u| !u.trim().is_empty())
                    .ok_or_else(|| StoreError::Config("rest backend requires `url`".into()))?;
                let api_key = self
                    .api_key
                    .as_deref()
                    .filter(|k| !k.trim().is_empty())
                    .ok_or_else(|| {
                        StoreError::Config("rest backend requires an API key (FOLIO_API_KEY)".into())
                    })?;
                Ok(Box::new(RestStore::new(url, &self.table, self.row_id, api_key)?))
            }
        }
    }
}
