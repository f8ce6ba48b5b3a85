use crm_model::{CreateProductPayload, ProductInput};
use tracing::{info, warn};

use super::CrmMutation;
use crate::validators;
use crate::CrmResult;

impl CrmMutation {
    /// Creates a product when its name, price and stock are valid.
    ///
    /// Validation needs no store access, so a rejected input never opens a
    /// transaction.
    pub fn create_product(&self, input: ProductInput) -> CrmResult<CreateProductPayload> {
        let errors = validators::validate_product(&input);
        if !errors.is_empty() {
            warn!(name = %input.name, errors = errors.len(), "product rejected");
            return Ok(CreateProductPayload::rejected(errors));
        }

        let product = self.store.with_transaction(|tx| tx.create_product(&input))?;
        info!(
            product_id = %product.id,
            price = product.price,
            stock = product.stock,
            "product created"
        );
        Ok(CreateProductPayload::created(product))
    }
}
