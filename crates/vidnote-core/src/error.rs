//! Error types for VidNote Vault.

use thiserror::Error;

use crate::schema::SchemaError;

/// Result type alias using vidnote's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for vidnote operations.
///
/// Write-path failures are typed so the UI can render an actionable
/// message: quota exhaustion is distinguishable from a generic medium
/// failure, and a rejected import carries the violating paths. Read-path
/// failures never reach this type; `LibraryStore::load` recovers them to
/// an empty library.
#[derive(Error, Debug)]
pub enum Error {
    /// Payload failed schema validation during import/replace.
    #[error("Invalid library format: {0}")]
    InvalidFormat(#[from] SchemaError),

    /// The medium rejected a write for size reasons. Requires user
    /// action (deleting items), not a retry.
    #[error("Storage quota exceeded. Please delete some videos or notes to free up space.")]
    QuotaExceeded,

    /// The medium is inaccessible or failed for another reason.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// HTTP/network request failed (title lookup).
    #[error("Request error: {0}")]
    Request(String),

    /// File I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_quota_exceeded() {
        let err = Error::QuotaExceeded;
        assert!(err.to_string().contains("quota exceeded"));
        assert!(err.to_string().contains("delete some videos"));
    }

    #[test]
    fn test_error_display_storage() {
        let err = Error::Storage("medium unavailable".to_string());
        assert_eq!(err.to_string(), "Storage error: medium unavailable");
    }

    #[test]
    fn test_error_display_request() {
        let err = Error::Request("connection refused".to_string());
        assert_eq!(err.to_string(), "Request error: connection refused");
    }

    #[test]
    fn test_from_serde_json_error() {
        let json_err = serde_json::from_str::<i32>("not a number").unwrap_err();
        let err: Error = json_err.into();
        match err {
            Error::Serialization(msg) => assert!(!msg.is_empty()),
            _ => panic!("Expected Serialization error"),
        }
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let err: Error = io_err.into();
        match err {
            Error::Io(_) => {}
            _ => panic!("Expected Io error"),
        }
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send<T: Send>() {}
        fn assert_sync<T: Sync>() {}

        assert_send::<Error>();
        assert_sync::<Error>();
    }
}
