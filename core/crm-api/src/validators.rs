//! Field-level checks for mutation inputs.
//!
//! Every check here is pure: facts that need the store (whether an email is
//! taken, which ids resolved) are looked up by the caller and passed in.

use std::sync::LazyLock;

use crm_model::{Customer, CustomerInput, FieldError, Product, ProductInput};
use crm_types::ProductId;
use regex_lite::Regex;

pub const PHONE_FORMAT_MESSAGE: &str =
    "Invalid phone format. Expected '+<7-15 digits>' or 'XXX-XXX-XXXX'.";
pub const PRICE_MESSAGE: &str = "Price must be positive.";
pub const STOCK_MESSAGE: &str = "Stock cannot be negative.";
pub const INVALID_CUSTOMER_MESSAGE: &str = "Invalid customer ID";
pub const NO_PRODUCTS_MESSAGE: &str = "At least one product must be selected.";
pub const INVALID_PRODUCTS_MESSAGE: &str = "Invalid product IDs.";
pub const EMPTY_BATCH_MESSAGE: &str = "At least one customer must be provided.";

/// `+` and 7-15 digits, or `DDD-DDD-DDDD`.
static PHONE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:\+\d{7,15}|\d{3}-\d{3}-\d{4})$").expect("phone pattern compiles")
});

pub fn check_required(field: &str, label: &str, value: &str) -> Result<(), FieldError> {
    if value.trim().is_empty() {
        return Err(FieldError::validation(field, format!("{label} cannot be empty.")));
    }
    Ok(())
}

/// `taken` is whether the email is already in use where the caller looked.
pub fn check_email_available(email: &str, taken: bool) -> Result<(), FieldError> {
    if taken {
        return Err(email_taken(email));
    }
    Ok(())
}

/// The error reported for an email that is already in use, whether the
/// pre-check or the store's unique constraint caught it.
pub fn email_taken(email: &str) -> FieldError {
    FieldError::validation("email", format!("Email '{email}' already exists."))
}

pub fn check_phone(phone: Option<&str>) -> Result<(), FieldError> {
    match phone {
        Some(phone) if !is_valid_phone(phone) => {
            Err(FieldError::validation("phone", PHONE_FORMAT_MESSAGE))
        }
        _ => Ok(()),
    }
}

pub fn is_valid_phone(phone: &str) -> bool {
    PHONE_PATTERN.is_match(phone)
}

/// NaN and infinities are rejected along with zero and negatives.
pub fn check_price(price: f64) -> Result<(), FieldError> {
    if !(price.is_finite() && price > 0.0) {
        return Err(FieldError::validation("price", PRICE_MESSAGE));
    }
    Ok(())
}

pub fn check_stock(stock: i64) -> Result<(), FieldError> {
    if stock < 0 {
        return Err(FieldError::validation("stock", STOCK_MESSAGE));
    }
    Ok(())
}

pub fn check_customer_resolved(customer: Option<Customer>) -> Result<Customer, FieldError> {
    customer.ok_or_else(|| FieldError::reference("customer_id", INVALID_CUSTOMER_MESSAGE))
}

pub fn check_product_ids_present(ids: &[ProductId]) -> Result<(), FieldError> {
    if ids.is_empty() {
        return Err(FieldError::validation("product_ids", NO_PRODUCTS_MESSAGE));
    }
    Ok(())
}

/// Unresolved ids are tolerated as long as at least one resolved.
pub fn check_products_resolved(resolved: &[Product]) -> Result<(), FieldError> {
    if resolved.is_empty() {
        return Err(FieldError::reference("product_ids", INVALID_PRODUCTS_MESSAGE));
    }
    Ok(())
}

/// Runs every customer check and collects all failures.
pub fn validate_customer(input: &CustomerInput, email_taken: bool) -> Vec<FieldError> {
    let mut errors = Vec::new();
    errors.extend(check_required("name", "Name", &input.name).err());
    match check_required("email", "Email", &input.email) {
        Ok(()) => errors.extend(check_email_available(&input.email, email_taken).err()),
        Err(e) => errors.push(e),
    }
    errors.extend(check_phone(input.phone.as_deref()).err());
    errors
}

/// Runs every product check and collects all failures.
pub fn validate_product(input: &ProductInput) -> Vec<FieldError> {
    let mut errors = Vec::new();
    errors.extend(check_required("name", "Name", &input.name).err());
    errors.extend(check_price(input.price).err());
    errors.extend(check_stock(input.stock()).err());
    errors
}
