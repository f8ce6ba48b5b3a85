//! Shared test helpers for handler tests.

#![allow(dead_code)]

use crm_api::{BatchEmailVisibility, CrmConfig, CrmSchema};
use crm_model::{Customer, CustomerInput, Product, ProductInput};
use crm_storage::EntityStore;

/// A schema over a fresh in-memory store, plus a handle on that store so
/// tests can inspect rows directly.
pub fn setup() -> (CrmSchema, EntityStore) {
    setup_with(BatchEmailVisibility::default())
}

pub fn setup_with(visibility: BatchEmailVisibility) -> (CrmSchema, EntityStore) {
    let store = EntityStore::open_in_memory().unwrap();
    let config = CrmConfig {
        database_path: None,
        batch_email_visibility: visibility,
    };
    (CrmSchema::new(store.clone(), &config), store)
}

pub fn customer(schema: &CrmSchema, name: &str, email: &str) -> Customer {
    schema
        .mutation
        .create_customer(CustomerInput::new(name, email))
        .unwrap()
        .into_result()
        .unwrap()
}

pub fn product(schema: &CrmSchema, name: &str, price: f64) -> Product {
    schema
        .mutation
        .create_product(ProductInput::new(name, price).with_stock(10))
        .unwrap()
        .into_result()
        .unwrap()
}
