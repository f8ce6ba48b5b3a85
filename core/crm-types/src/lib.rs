//! Core type definitions for the CRM.
//!
//! Every persisted record is addressed by a typed identifier so a product id
//! can never be passed where a customer id is expected:
//! - [`CustomerId`], [`ProductId`], [`OrderId`] (UUID v7, time-ordered)
//!
//! Record shapes, request inputs and response payloads live in `crm-model`.

mod ids;

pub use ids::{CustomerId, OrderId, ProductId};

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in type operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid UUID: {0}")]
    InvalidUuid(#[from] uuid::Error),
}
