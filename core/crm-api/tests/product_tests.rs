mod common;

use common::setup;
use crm_api::validators::{PRICE_MESSAGE, STOCK_MESSAGE};
use crm_model::{ProductInput, DEFAULT_STOCK};

#[test]
fn zero_and_negative_price_rejected() {
    let (schema, store) = setup();
    for price in [0.0, -5.0] {
        let payload = schema
            .mutation
            .create_product(ProductInput::new("Widget", price))
            .unwrap();
        assert!(payload.product().is_none());
        assert_eq!(payload.errors().len(), 1);
        assert_eq!(payload.errors()[0].message, PRICE_MESSAGE);
    }
    assert!(store.list_products().unwrap().is_empty());
}

#[test]
fn negative_stock_rejected() {
    let (schema, store) = setup();
    let payload = schema
        .mutation
        .create_product(ProductInput::new("Widget", 10.0).with_stock(-1))
        .unwrap();
    assert_eq!(payload.errors()[0].message, STOCK_MESSAGE);
    assert_eq!(payload.errors()[0].field.as_deref(), Some("stock"));
    assert!(store.list_products().unwrap().is_empty());
}

#[test]
fn price_and_stock_errors_reported_together() {
    let (schema, _) = setup();
    let payload = schema
        .mutation
        .create_product(ProductInput::new("Widget", -1.0).with_stock(-1))
        .unwrap();
    let messages: Vec<_> = payload.errors().iter().map(|e| e.message.as_str()).collect();
    assert_eq!(messages, vec![PRICE_MESSAGE, STOCK_MESSAGE]);
}

#[test]
fn price_ten_stock_zero_succeeds() {
    let (schema, store) = setup();
    let product = schema
        .mutation
        .create_product(ProductInput::new("Widget", 10.0).with_stock(0))
        .unwrap()
        .into_result()
        .unwrap();
    assert_eq!(product.price, 10.0);
    assert_eq!(product.stock, 0);
    assert_eq!(store.get_product(&product.id).unwrap(), Some(product));
}

#[test]
fn omitted_stock_defaults() {
    let (schema, _) = setup();
    let product = schema
        .mutation
        .create_product(ProductInput::new("Widget", 2.5))
        .unwrap()
        .into_result()
        .unwrap();
    assert_eq!(product.stock, DEFAULT_STOCK);
}

#[test]
fn nan_price_rejected() {
    let (schema, _) = setup();
    let payload = schema
        .mutation
        .create_product(ProductInput::new("Widget", f64::NAN))
        .unwrap();
    assert!(!payload.is_success());
}
