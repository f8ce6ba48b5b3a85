use chrono::Utc;
use crm_model::{CreateOrderPayload, OrderInput, Product};
use std::collections::HashSet;
use tracing::{debug, info, warn};

use super::CrmMutation;
use crate::validators;
use crate::CrmResult;

/// Sum of the given products' prices.
pub fn order_total(products: &[Product]) -> f64 {
    products.iter().map(|p| p.price).sum()
}

impl CrmMutation {
    /// Creates an order for an existing customer.
    ///
    /// Product ids are matched leniently: ids that do not resolve are dropped
    /// and the order is created from the rest, failing only when none
    /// resolve. The total is computed from the resolved prices inside the same
    /// transaction as the insert and stored with the order.
    pub fn create_order(&self, input: OrderInput) -> CrmResult<CreateOrderPayload> {
        self.store.with_transaction(|tx| -> CrmResult<_> {
            let found = tx.get_customer(&input.customer_id)?;
            let customer = match validators::check_customer_resolved(found) {
                Ok(customer) => customer,
                Err(e) => {
                    warn!(customer_id = %input.customer_id, "order rejected: unknown customer");
                    return Ok(CreateOrderPayload::rejected(vec![e]));
                }
            };

            if let Err(e) = validators::check_product_ids_present(&input.product_ids) {
                warn!(customer_id = %customer.id, "order rejected: no products");
                return Ok(CreateOrderPayload::rejected(vec![e]));
            }

            let products = tx.find_products(&input.product_ids)?;
            if let Err(e) = validators::check_products_resolved(&products) {
                warn!(requested = input.product_ids.len(), "order rejected: no product resolved");
                return Ok(CreateOrderPayload::rejected(vec![e]));
            }

            let requested: HashSet<_> = input.product_ids.iter().collect();
            if requested.len() > products.len() {
                debug!(
                    dropped = requested.len() - products.len(),
                    "ignoring unresolved product ids"
                );
            }

            let total = order_total(&products);
            let order_date = input.order_date.unwrap_or_else(Utc::now);
            let order = tx.create_order(&customer, &products, total, order_date)?;
            info!(
                order_id = %order.id,
                customer_id = %customer.id,
                products = products.len(),
                total_amount = total,
                "order created"
            );
            Ok(CreateOrderPayload::created(order))
        })
    }
}
