// Local JSON file backend

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::{raw_to_text, SettingsStore, StoreError};

/// Settings stored as the contents of one file.
///
/// The file holds the serialized payload text. A missing file reads as
/// `None`; contents are handed to the codec unparsed.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SettingsStore for FileStore {
    fn read(&self) -> Result<Option<Value>, StoreError> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => {
                log::debug!("read {} bytes from {}", contents.len(), self.path.display());
                Ok(Some(Value::String(contents)))
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::debug!("no settings file at {}", self.path.display());
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Atomic write: temp file in the same directory, then rename.
    fn write(&self, raw: &Value) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let mut temp = self.path.as_os_str().to_owned();
        temp.push(".tmp");
        let temp = PathBuf::from(temp);

        fs::write(&temp, raw_to_text(raw))?;
        if let Err(e) = fs::rename(&temp, &self.path) {
            let _ = fs::remove_file(&temp);
            return Err(e.into());
        }

        log::info!("settings written to {}", self.path.display());
        Ok(())
    }

    fn describe(&self) -> String {
        format!("file:{}", self.path.display())
    }
}
