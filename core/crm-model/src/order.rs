use chrono::{DateTime, Utc};
use crm_types::{CustomerId, OrderId, ProductId};
use serde::{Deserialize, Serialize};

use crate::{Customer, Product};

/// A persisted order with its references resolved.
///
/// `total_amount` is the sum of the product prices at the moment the order
/// was created. It is stored with the order and never recomputed, so later
/// price changes do not affect it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub customer: Customer,
    pub products: Vec<Product>,
    pub total_amount: f64,
    pub order_date: DateTime<Utc>,
}

impl Order {
    /// Ids of the products this order references.
    pub fn product_ids(&self) -> Vec<ProductId> {
        self.products.iter().map(|p| p.id).collect()
    }
}

/// Input for creating an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderInput {
    pub customer_id: CustomerId,
    pub product_ids: Vec<ProductId>,
    /// Defaults to the creation instant when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_date: Option<DateTime<Utc>>,
}

impl OrderInput {
    pub fn new(customer_id: CustomerId, product_ids: impl IntoIterator<Item = ProductId>) -> Self {
        Self {
            customer_id,
            product_ids: product_ids.into_iter().collect(),
            order_date: None,
        }
    }

    #[must_use]
    pub fn with_order_date(mut self, order_date: DateTime<Utc>) -> Self {
        self.order_date = Some(order_date);
        self
    }
}
