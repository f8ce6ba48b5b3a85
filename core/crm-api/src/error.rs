//! Error types for the handler layer.

use crm_model::FieldError;
use crm_storage::StorageError;
use thiserror::Error;

/// Result type for handler operations.
pub type CrmResult<T> = Result<T, CrmError>;

/// Failures that abort a handler call.
///
/// Rejected inputs are not errors; they are reported inside the mutation
/// payloads.
#[derive(Debug, Error)]
pub enum CrmError {
    /// The entity store failed.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// A single-record lookup did not resolve.
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// Configuration could not be loaded.
    #[error("configuration error: {0}")]
    Config(String),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl CrmError {
    pub(crate) fn not_found(entity: &'static str, id: impl ToString) -> Self {
        CrmError::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    /// The caller-facing form of a lookup miss, `None` for genuine failures.
    pub fn as_field_error(&self) -> Option<FieldError> {
        match self {
            CrmError::NotFound { .. } => Some(FieldError::not_found(self.to_string())),
            _ => None,
        }
    }
}
