//! Error types for the storage layer.

use thiserror::Error;

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Errors that can occur in storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Database error from SQLite.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// A `UNIQUE` constraint rejected the write.
    #[error("unique constraint violated on {field}: {value}")]
    UniqueViolation { field: &'static str, value: String },

    /// A `CHECK` or foreign-key constraint rejected the write.
    #[error("constraint violated: {0}")]
    ConstraintViolation(String),

    /// Record not found.
    #[error("record not found: {0}")]
    NotFound(String),

    /// IO error (file system).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A stored value could not be decoded.
    #[error("invalid data: {0}")]
    InvalidData(String),
}

impl StorageError {
    /// Returns true when the error is a unique-key rejection, which callers
    /// report as a validation error rather than an infrastructure failure.
    pub fn is_unique_violation(&self) -> bool {
        matches!(self, StorageError::UniqueViolation { .. })
    }
}

/// Classifies a raw SQLite error, turning constraint failures into the
/// dedicated variants.
pub(crate) fn classify(err: rusqlite::Error, field: &'static str, value: &str) -> StorageError {
    use rusqlite::ffi;

    match &err {
        rusqlite::Error::SqliteFailure(e, msg) if e.code == rusqlite::ErrorCode::ConstraintViolation => {
            match e.extended_code {
                ffi::SQLITE_CONSTRAINT_UNIQUE | ffi::SQLITE_CONSTRAINT_PRIMARYKEY => {
                    StorageError::UniqueViolation {
                        field,
                        value: value.to_string(),
                    }
                }
                _ => StorageError::ConstraintViolation(
                    msg.clone().unwrap_or_else(|| e.to_string()),
                ),
            }
        }
        _ => StorageError::Database(err),
    }
}
