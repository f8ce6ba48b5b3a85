//! Composition root.

use crm_storage::EntityStore;

use crate::{CrmConfig, CrmMutation, CrmQuery, CrmResult};

/// The complete query and mutation surface, assembled once at start-up.
///
/// Both halves share one [`EntityStore`]; cloning the schema clones the
/// store handle, not the data.
#[derive(Clone)]
pub struct CrmSchema {
    pub query: CrmQuery,
    pub mutation: CrmMutation,
}

impl CrmSchema {
    pub fn new(store: EntityStore, config: &CrmConfig) -> Self {
        Self {
            query: CrmQuery::new(store.clone()),
            mutation: CrmMutation::new(store, config.batch_email_visibility),
        }
    }

    /// Opens the store named by `config` and builds the schema over it.
    pub fn open(config: &CrmConfig) -> CrmResult<Self> {
        Ok(Self::new(config.open_store()?, config))
    }
}
