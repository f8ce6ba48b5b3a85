//! SQLite entity store for the CRM core.
//!
//! Provides durable storage for customers, products and orders.
//!
//! # Architecture
//!
//! - One connection behind `Arc<Mutex<_>>`; [`EntityStore`] is cheap to clone
//!   and safe to share between request threads
//! - Every access runs inside a scope: [`EntityStore::with_transaction`] commits
//!   when the closure returns `Ok` and rolls back otherwise
//! - [`StoreTx`] exposes the create/get/filter/list operations inside a scope
//! - Uniqueness of customer emails and the price/stock ranges are enforced by
//!   the schema, independently of any validation done by callers

mod entity_store;
mod error;
mod rows;
mod schema;

pub use entity_store::{EntityStore, StoreTx};
pub use error::{StorageError, StorageResult};
