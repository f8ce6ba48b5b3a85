//! Mutation handlers.
//!
//! Each handler validates its input, writes through the entity store and
//! returns a payload. Handlers hold no state between calls beyond the store
//! handle and the configured batch policy.

mod customer;
mod order;
mod product;

use crm_storage::EntityStore;

use crate::BatchEmailVisibility;

pub use order::order_total;

/// The mutation half of the schema.
#[derive(Clone)]
pub struct CrmMutation {
    store: EntityStore,
    batch_visibility: BatchEmailVisibility,
}

impl CrmMutation {
    pub fn new(store: EntityStore, batch_visibility: BatchEmailVisibility) -> Self {
        Self {
            store,
            batch_visibility,
        }
    }
}
