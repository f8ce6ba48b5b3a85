use serde::{Deserialize, Serialize};
use std::fmt;

/// Category of a rejected mutation input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// A field value breaks a rule the caller can correct (format, range,
    /// uniqueness, empty required list).
    Validation,
    /// A referenced record does not exist.
    Reference,
    /// A looked-up record does not exist.
    NotFound,
}

/// A single business-rule violation reported back to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub kind: ErrorKind,
    /// Input field the error refers to, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    pub message: String,
    /// Position of the offending item in a batch request.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<usize>,
}

impl FieldError {
    fn new(kind: ErrorKind, field: Option<&str>, message: impl Into<String>) -> Self {
        Self {
            kind,
            field: field.map(str::to_owned),
            message: message.into(),
            index: None,
        }
    }

    pub fn validation(field: &str, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, Some(field), message)
    }

    pub fn reference(field: &str, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Reference, Some(field), message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, None, message)
    }

    /// Tags the error with a batch position.
    #[must_use]
    pub fn at(mut self, index: usize) -> Self {
        self.index = Some(index);
        self
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.index {
            Some(index) => write!(f, "[{index}] {}", self.message),
            None => f.write_str(&self.message),
        }
    }
}
