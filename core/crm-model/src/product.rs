use crm_types::ProductId;
use serde::{Deserialize, Serialize};

/// Stock assigned when a product input omits it.
pub const DEFAULT_STOCK: i64 = 0;

/// A persisted product. `price > 0` and `stock >= 0` hold for every row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: f64,
    pub stock: i64,
}

/// Input for creating a product.
///
/// `stock` is signed so a negative request can be reported as a
/// validation error instead of failing to deserialize.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductInput {
    pub name: String,
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stock: Option<i64>,
}

impl ProductInput {
    pub fn new(name: impl Into<String>, price: f64) -> Self {
        Self {
            name: name.into(),
            price,
            stock: None,
        }
    }

    #[must_use]
    pub fn with_stock(mut self, stock: i64) -> Self {
        self.stock = Some(stock);
        self
    }

    /// Requested stock, falling back to [`DEFAULT_STOCK`].
    pub fn stock(&self) -> i64 {
        self.stock.unwrap_or(DEFAULT_STOCK)
    }
}
