//! CLI Exit Code Registry
//!
//! Single source of truth for `folio` exit codes. Scripts rely on them.
//!
//! | Range | Domain    | Description                              |
//! |-------|-----------|------------------------------------------|
//! | 0     | Universal | Success                                  |
//! | 1     | Universal | General error (unspecified)              |
//! | 2     | Universal | Usage error (bad args, invalid JSON)     |
//! | 10-19 | store     | Settings store failures                  |

use folio_store::StoreError;

// =============================================================================
// Universal (0-2)
// =============================================================================

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// General error - unspecified failure.
pub const EXIT_ERROR: u8 = 1;

/// Usage error - bad arguments, unreadable or invalid JSON input.
pub const EXIT_USAGE: u8 = 2;

// =============================================================================
// Store (10-19)
// =============================================================================

/// Local file or database could not be read/written.
pub const EXIT_STORE_IO: u8 = 10;

/// Hosted backend unreachable.
pub const EXIT_STORE_NETWORK: u8 = 11;

/// Hosted backend rejected the API key (401/403).
pub const EXIT_STORE_AUTH: u8 = 12;

/// Hosted backend returned another non-success status, or a body that
/// breaks the table contract.
pub const EXIT_STORE_HTTP: u8 = 13;

/// Store configuration missing or invalid.
pub const EXIT_STORE_CONFIG: u8 = 14;

/// Map a store error to its exit code.
pub fn store_exit_code(err: &StoreError) -> u8 {
    match err {
        StoreError::Io(_) | StoreError::Sqlite(_) => EXIT_STORE_IO,
        StoreError::Network(_) => EXIT_STORE_NETWORK,
        StoreError::Unauthorized(_) => EXIT_STORE_AUTH,
        StoreError::Http(..) | StoreError::Parse(_) => EXIT_STORE_HTTP,
        StoreError::Config(_) => EXIT_STORE_CONFIG,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_codes_in_range() {
        let errors = [
            StoreError::Io(std::io::Error::new(std::io::ErrorKind::Other, "x")),
            StoreError::Sqlite(rusqlite::Error::QueryReturnedNoRows),
            StoreError::Network("x".into()),
            StoreError::Unauthorized("x".into()),
            StoreError::Http(500, "x".into()),
            StoreError::Parse("x".into()),
            StoreError::Config("x".into()),
        ];
        for err in &errors {
            let code = store_exit_code(err);
            assert!((10..20).contains(&code), "{} -> {}", err, code);
        }
    }

    #[test]
    fn test_sqlite_is_store_io() {
        let err = StoreError::from(rusqlite::Error::InvalidQuery);
        assert_eq!(store_exit_code(&err), EXIT_STORE_IO);
    }

    #[test]
    fn test_universal_codes_distinct() {
        assert_ne!(EXIT_SUCCESS, EXIT_ERROR);
        assert_ne!(EXIT_ERROR, EXIT_USAGE);
    }
}
