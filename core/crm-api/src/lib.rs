//! Mutation validation and transactional write pipeline for the CRM core.
//!
//! This crate handles:
//! - Field-level validation of customer, product and order inputs
//! - Creating customers one at a time or in batches with per-item isolation
//! - Creating products and orders, including the order total snapshot
//! - Read-only listings and lookups over the entity store
//!
//! # Design Principles
//!
//! - **Errors are data**: rejected inputs come back as [`FieldError`]s inside
//!   the payload. Only storage failures are returned as [`CrmError`].
//! - **Store is authoritative**: validators give friendly messages, but the
//!   schema's `UNIQUE` and `CHECK` constraints are what keep rows valid.
//! - **One composition root**: [`CrmSchema`] is built once and owns the query
//!   and mutation handler sets.
//!
//! [`FieldError`]: crm_model::FieldError

mod config;
mod error;
mod mutations;
mod queries;
mod schema;
pub mod validators;

pub use config::{BatchEmailVisibility, CrmConfig};
pub use error::{CrmError, CrmResult};
pub use mutations::{order_total, CrmMutation};
pub use queries::CrmQuery;
pub use schema::CrmSchema;
