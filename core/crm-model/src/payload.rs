//! Mutation responses.
//!
//! Single-entity payloads hold either the created record or a non-empty
//! error list, never both. The constructors are the only way to build
//! them, so that holds by construction.

use serde::Serialize;

use crate::{Customer, FieldError, Order, Product};

pub const CUSTOMER_CREATED_MESSAGE: &str = "Customer created successfully!";

/// Response of `create_customer`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateCustomerPayload {
    customer: Option<Customer>,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
    errors: Vec<FieldError>,
}

impl CreateCustomerPayload {
    pub fn created(customer: Customer) -> Self {
        Self {
            customer: Some(customer),
            message: Some(CUSTOMER_CREATED_MESSAGE.to_string()),
            errors: Vec::new(),
        }
    }

    pub fn rejected(errors: Vec<FieldError>) -> Self {
        debug_assert!(!errors.is_empty());
        Self {
            customer: None,
            message: None,
            errors,
        }
    }

    pub fn customer(&self) -> Option<&Customer> {
        self.customer.as_ref()
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    pub fn is_success(&self) -> bool {
        self.customer.is_some()
    }

    pub fn into_result(self) -> Result<Customer, Vec<FieldError>> {
        self.customer.ok_or(self.errors)
    }
}

/// Response of `bulk_create_customers`: created records in input order plus
/// the errors of every skipped item.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BulkCreateCustomersPayload {
    pub customers: Vec<Customer>,
    pub errors: Vec<FieldError>,
}

impl BulkCreateCustomersPayload {
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Response of `create_product`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateProductPayload {
    product: Option<Product>,
    errors: Vec<FieldError>,
}

impl CreateProductPayload {
    pub fn created(product: Product) -> Self {
        Self {
            product: Some(product),
            errors: Vec::new(),
        }
    }

    pub fn rejected(errors: Vec<FieldError>) -> Self {
        debug_assert!(!errors.is_empty());
        Self {
            product: None,
            errors,
        }
    }

    pub fn product(&self) -> Option<&Product> {
        self.product.as_ref()
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    pub fn is_success(&self) -> bool {
        self.product.is_some()
    }

    pub fn into_result(self) -> Result<Product, Vec<FieldError>> {
        self.product.ok_or(self.errors)
    }
}

/// Response of `create_order`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateOrderPayload {
    order: Option<Order>,
    errors: Vec<FieldError>,
}

impl CreateOrderPayload {
    pub fn created(order: Order) -> Self {
        Self {
            order: Some(order),
            errors: Vec::new(),
        }
    }

    pub fn rejected(errors: Vec<FieldError>) -> Self {
        debug_assert!(!errors.is_empty());
        Self { order: None, errors }
    }

    pub fn order(&self) -> Option<&Order> {
        self.order.as_ref()
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    pub fn is_success(&self) -> bool {
        self.order.is_some()
    }

    pub fn into_result(self) -> Result<Order, Vec<FieldError>> {
        self.order.ok_or(self.errors)
    }
}
