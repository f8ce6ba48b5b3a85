use clap::Parser;
use crm_api::{CrmConfig, CrmSchema};
use crm_cli::{execute, seed, Command, EntityKind};
use serde_json::Value;

#[derive(Parser)]
struct TestCli {
    #[command(subcommand)]
    command: Command,
}

fn parse(args: &[&str]) -> Command {
    TestCli::try_parse_from(std::iter::once("crm").chain(args.iter().copied()))
        .unwrap()
        .command
}

fn schema() -> CrmSchema {
    CrmSchema::open(&CrmConfig::default()).unwrap()
}

fn run(schema: &CrmSchema, args: &[&str]) -> (Value, bool) {
    let outcome = execute(schema, parse(args)).unwrap();
    (outcome.body, outcome.success)
}

// ── Argument parsing ─────────────────────────────────────────────

#[test]
fn parses_repeated_product_flags() {
    let customer = crm_types::CustomerId::new();
    let a = crm_types::ProductId::new();
    let b = crm_types::ProductId::new();
    let command = parse(&[
        "create-order",
        "--customer",
        &customer.to_string(),
        "--product",
        &a.to_string(),
        "--product",
        &b.to_string(),
    ]);
    match command {
        Command::CreateOrder {
            customer: c,
            products,
            date,
        } => {
            assert_eq!(c, customer);
            assert_eq!(products, vec![a, b]);
            assert!(date.is_none());
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn negative_price_reaches_the_validator() {
    let command = parse(&["create-product", "--name", "Bad", "--price", "-5"]);
    assert!(matches!(command, Command::CreateProduct { price, .. } if price == -5.0));
}

#[test]
fn malformed_ids_fail_to_parse() {
    let parsed = TestCli::try_parse_from(["crm", "create-order", "--customer", "not-a-uuid"]);
    assert!(parsed.is_err());
}

// ── Mutations ────────────────────────────────────────────────────

#[test]
fn create_customer_prints_payload() {
    let schema = schema();
    let (body, success) = run(
        &schema,
        &["create-customer", "--name", "Alice", "--email", "alice@example.com"],
    );
    assert!(success);
    assert_eq!(body["customer"]["email"], "alice@example.com");
    assert_eq!(body["message"], "Customer created successfully!");
}

#[test]
fn rejected_customer_is_unsuccessful() {
    let schema = schema();
    let (body, success) = run(
        &schema,
        &["create-customer", "--name", "A", "--email", "a@x.com", "--phone", "abc123"],
    );
    assert!(!success);
    assert_eq!(body["errors"][0]["field"], "phone");
}

#[test]
fn bulk_create_reads_json_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("customers.json");
    std::fs::write(
        &path,
        r#"[{"name": "Alice", "email": "alice@example.com"},
            {"name": "Bob", "email": "bob@example.com", "phone": "12-34"}]"#,
    )
    .unwrap();

    let schema = schema();
    let (body, success) = run(
        &schema,
        &["bulk-create-customers", "--file", path.to_str().unwrap()],
    );
    assert!(!success);
    assert_eq!(body["customers"].as_array().unwrap().len(), 1);
    assert_eq!(body["errors"][0]["index"], 1);
}

#[test]
fn bulk_create_with_bad_file_is_an_error() {
    let schema = schema();
    let command = Command::BulkCreateCustomers {
        file: "/nonexistent/customers.json".into(),
    };
    assert!(execute(&schema, command).is_err());
}

#[test]
fn order_flow_end_to_end() {
    let schema = schema();
    seed(&schema).unwrap();
    let customers = schema.query.customers().unwrap();
    let products = schema.query.products().unwrap();

    let (body, success) = run(
        &schema,
        &[
            "create-order",
            "--customer",
            &customers[0].id.to_string(),
            "--product",
            &products[0].id.to_string(),
            "--product",
            &products[1].id.to_string(),
            "--date",
            "2024-05-01T09:30:00Z",
        ],
    );
    assert!(success, "{body}");
    assert_eq!(body["order"]["total_amount"].as_f64(), Some(999.99 + 499.99));
    assert_eq!(body["order"]["customer"]["name"], "Alice");

    let (orders, _) = run(&schema, &["list", "orders"]);
    assert_eq!(orders.as_array().unwrap().len(), 1);
}

// ── Queries ──────────────────────────────────────────────────────

#[test]
fn show_existing_order_prints_resolved_record() {
    let schema = schema();
    seed(&schema).unwrap();
    let alice = schema.query.customers().unwrap().remove(0);
    let laptop = schema.query.products().unwrap().remove(0);
    let (created, _) = run(
        &schema,
        &[
            "create-order",
            "--customer",
            &alice.id.to_string(),
            "--product",
            &laptop.id.to_string(),
        ],
    );
    let order_id = created["order"]["id"].as_str().unwrap().to_string();

    let (body, success) = run(&schema, &["show", "orders", &order_id]);
    assert!(success);
    assert_eq!(body["id"], order_id.as_str());
    assert_eq!(body["customer"]["email"], "alice@example.com");
    assert_eq!(body["products"][0]["name"], "Laptop");
}

#[test]
fn show_missing_record_reports_not_found() {
    let schema = schema();
    let command = Command::Show {
        entity: EntityKind::Customers,
        id: crm_types::CustomerId::new().to_string(),
    };
    let outcome = execute(&schema, command).unwrap();
    assert!(!outcome.success);
    assert_eq!(outcome.body["errors"][0]["kind"], "not_found");
}

#[test]
fn show_with_malformed_id_is_an_error() {
    let schema = schema();
    let command = Command::Show {
        entity: EntityKind::Products,
        id: "nope".into(),
    };
    assert!(execute(&schema, command).is_err());
}

// ── Seed ─────────────────────────────────────────────────────────

#[test]
fn seed_loads_demo_data() {
    let schema = schema();
    let report = seed(&schema).unwrap();
    assert!(report.customers.is_clean());
    assert_eq!(report.products_created, 2);

    let names: Vec<_> = schema
        .query
        .customers()
        .unwrap()
        .into_iter()
        .map(|c| c.name)
        .collect();
    assert_eq!(names, vec!["Alice", "Bob"]);
}

#[test]
fn reseeding_adds_nothing() {
    let schema = schema();
    seed(&schema).unwrap();
    let report = seed(&schema).unwrap();

    assert!(report.customers.customers.is_empty());
    assert_eq!(report.customers.errors.len(), 2);
    assert_eq!(report.products_created, 0);
    assert_eq!(report.products_skipped, 2);
    assert_eq!(schema.query.products().unwrap().len(), 2);
}
