//! Record model for the CRM core.
//!
//! Defines the types every layer above the store agrees on:
//! - [`Customer`], [`Product`], [`Order`]: persisted records as returned to callers
//! - [`CustomerInput`], [`ProductInput`], [`OrderInput`]: mutation requests
//! - payloads: mutation responses carrying either a record or a list of [`FieldError`]s
//!
//! Business-rule violations are data, not failures: they travel inside the
//! payloads as [`FieldError`] values. Only storage failures surface as `Err`.

mod customer;
mod error;
mod order;
mod payload;
mod product;

pub use customer::{Customer, CustomerInput};
pub use error::{ErrorKind, FieldError};
pub use order::{Order, OrderInput};
pub use payload::{
    BulkCreateCustomersPayload, CreateCustomerPayload, CreateOrderPayload, CreateProductPayload,
    CUSTOMER_CREATED_MESSAGE,
};
pub use product::{Product, ProductInput, DEFAULT_STOCK};
