use thiserror::Error;

/// Error type for store operations.
///
/// Only the persistence collaborator produces errors. Malformed stored
/// content is not an error; the codec degrades it to defaults.
#[derive(Debug, Error)]
pub enum StoreError {
    /// File I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// SQLite error
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    /// Network error
    #[error("Network error: {0}")]
    Network(String),
    /// HTTP error with status code
    #[error("HTTP {0}: {1}")]
    Http(u16, String),
    /// 401/403 from the hosted backend
    #[error("Not authorized (check the API key): {0}")]
    Unauthorized(String),
    /// Response body was not what the backend contract promises
    #[error("Parse error: {0}")]
    Parse(String),
    /// Missing or invalid store configuration
    #[error("Config error: {0}")]
    Config(String),
}
