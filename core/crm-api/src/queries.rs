//! Query handlers: read-only projections over the entity store.

use crm_model::{Customer, Order, Product};
use crm_storage::EntityStore;
use crm_types::{CustomerId, OrderId, ProductId};
use tracing::debug;

use crate::{CrmError, CrmResult};

/// The query half of the schema.
#[derive(Clone)]
pub struct CrmQuery {
    store: EntityStore,
}

impl CrmQuery {
    pub fn new(store: EntityStore) -> Self {
        Self { store }
    }

    pub fn customers(&self) -> CrmResult<Vec<Customer>> {
        let customers = self.store.list_customers()?;
        debug!(count = customers.len(), "listed customers");
        Ok(customers)
    }

    pub fn products(&self) -> CrmResult<Vec<Product>> {
        let products = self.store.list_products()?;
        debug!(count = products.len(), "listed products");
        Ok(products)
    }

    /// Every order with its customer and products already resolved, loaded
    /// in one store scope.
    pub fn orders(&self) -> CrmResult<Vec<Order>> {
        let orders = self.store.list_orders()?;
        debug!(count = orders.len(), "listed orders");
        Ok(orders)
    }

    pub fn customer(&self, id: &CustomerId) -> CrmResult<Customer> {
        self.store
            .get_customer(id)?
            .ok_or_else(|| CrmError::not_found("customer", id))
    }

    pub fn product(&self, id: &ProductId) -> CrmResult<Product> {
        self.store
            .get_product(id)?
            .ok_or_else(|| CrmError::not_found("product", id))
    }

    pub fn order(&self, id: &OrderId) -> CrmResult<Order> {
        self.store
            .get_order(id)?
            .ok_or_else(|| CrmError::not_found("order", id))
    }
}
