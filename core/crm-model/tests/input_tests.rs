use crm_model::{CustomerInput, OrderInput, ProductInput, DEFAULT_STOCK};
use crm_types::{CustomerId, ProductId};
use pretty_assertions::assert_eq;
use serde_json::json;

// ── CustomerInput ────────────────────────────────────────────────

#[test]
fn customer_input_builder_sets_phone() {
    let input = CustomerInput::new("Alice", "alice@example.com").with_phone("+14155552671");
    assert_eq!(input.name, "Alice");
    assert_eq!(input.email, "alice@example.com");
    assert_eq!(input.phone.as_deref(), Some("+14155552671"));
}

#[test]
fn customer_input_phone_is_optional_in_json() {
    let input: CustomerInput =
        serde_json::from_value(json!({"name": "Bob", "email": "bob@example.com"})).unwrap();
    assert_eq!(input, CustomerInput::new("Bob", "bob@example.com"));
}

#[test]
fn customer_input_requires_email() {
    let result: Result<CustomerInput, _> = serde_json::from_value(json!({"name": "Bob"}));
    assert!(result.is_err());
}

// ── ProductInput ─────────────────────────────────────────────────

#[test]
fn product_input_stock_defaults_to_zero() {
    let input: ProductInput =
        serde_json::from_value(json!({"name": "Laptop", "price": 999.99})).unwrap();
    assert_eq!(input.stock, None);
    assert_eq!(input.stock(), DEFAULT_STOCK);
}

#[test]
fn product_input_keeps_negative_stock_for_validation() {
    let input: ProductInput =
        serde_json::from_value(json!({"name": "Laptop", "price": 1.0, "stock": -3})).unwrap();
    assert_eq!(input.stock(), -3);
}

// ── OrderInput ───────────────────────────────────────────────────

#[test]
fn order_input_date_is_optional() {
    let customer = CustomerId::new();
    let product = ProductId::new();
    let input: OrderInput = serde_json::from_value(json!({
        "customer_id": customer.to_string(),
        "product_ids": [product.to_string()],
    }))
    .unwrap();
    assert_eq!(input, OrderInput::new(customer, [product]));
    assert!(input.order_date.is_none());
}

#[test]
fn order_input_parses_rfc3339_date() {
    let input: OrderInput = serde_json::from_value(json!({
        "customer_id": CustomerId::new().to_string(),
        "product_ids": [],
        "order_date": "2024-03-01T12:00:00Z",
    }))
    .unwrap();
    assert_eq!(
        input.order_date.map(|d| d.to_rfc3339()),
        Some("2024-03-01T12:00:00+00:00".to_string())
    );
}
