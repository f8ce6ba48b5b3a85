//! Commands and seed data for the `crm` binary.
//!
//! Each command runs one query or mutation against a [`CrmSchema`] and
//! yields the JSON the binary prints.

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{Subcommand, ValueEnum};
use crm_api::{CrmError, CrmResult, CrmSchema};
use crm_model::{CustomerInput, FieldError, OrderInput, ProductInput};
use crm_types::{CustomerId, OrderId, ProductId};
use serde::Serialize;
use serde_json::Value;
use tracing::info;

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Create a single customer
    CreateCustomer {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        /// "+<7-15 digits>" or "XXX-XXX-XXXX"
        #[arg(long)]
        phone: Option<String>,
    },

    /// Create customers from a JSON array of {name, email, phone?} ("-" reads stdin)
    BulkCreateCustomers {
        #[arg(long)]
        file: PathBuf,
    },

    /// Create a product
    CreateProduct {
        #[arg(long)]
        name: String,
        #[arg(long, allow_negative_numbers = true)]
        price: f64,
        #[arg(long, allow_negative_numbers = true)]
        stock: Option<i64>,
    },

    /// Create an order for a customer
    CreateOrder {
        #[arg(long)]
        customer: CustomerId,
        /// Repeat for each product
        #[arg(long = "product")]
        products: Vec<ProductId>,
        /// RFC 3339 timestamp, defaults to now
        #[arg(long)]
        date: Option<DateTime<Utc>>,
    },

    /// List every record of one kind
    List {
        #[arg(value_enum)]
        entity: EntityKind,
    },

    /// Show one record by id
    Show {
        #[arg(value_enum)]
        entity: EntityKind,
        id: String,
    },

    /// Load the demo customers and products
    Seed,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Customers,
    Products,
    Orders,
}

/// What a command produced: the JSON body and whether the request was
/// accepted in full.
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    pub body: Value,
    pub success: bool,
}

impl Outcome {
    fn new(body: impl Serialize, success: bool) -> Result<Self> {
        Ok(Self {
            body: serde_json::to_value(body)?,
            success,
        })
    }
}

/// Runs one command against the schema.
pub fn execute(schema: &CrmSchema, command: Command) -> Result<Outcome> {
    match command {
        Command::CreateCustomer { name, email, phone } => {
            let input = CustomerInput { name, email, phone };
            let payload = schema.mutation.create_customer(input)?;
            let success = payload.is_success();
            Outcome::new(payload, success)
        }
        Command::BulkCreateCustomers { file } => {
            let inputs = read_customer_inputs(&file)?;
            let payload = schema.mutation.bulk_create_customers(inputs)?;
            let success = payload.is_clean();
            Outcome::new(payload, success)
        }
        Command::CreateProduct { name, price, stock } => {
            let payload = schema
                .mutation
                .create_product(ProductInput { name, price, stock })?;
            let success = payload.is_success();
            Outcome::new(payload, success)
        }
        Command::CreateOrder {
            customer,
            products,
            date,
        } => {
            let input = OrderInput {
                customer_id: customer,
                product_ids: products,
                order_date: date,
            };
            let payload = schema.mutation.create_order(input)?;
            let success = payload.is_success();
            Outcome::new(payload, success)
        }
        Command::List { entity } => match entity {
            EntityKind::Customers => Outcome::new(schema.query.customers()?, true),
            EntityKind::Products => Outcome::new(schema.query.products()?, true),
            EntityKind::Orders => Outcome::new(schema.query.orders()?, true),
        },
        Command::Show { entity, id } => show(schema, entity, &id),
        Command::Seed => Outcome::new(seed(schema)?, true),
    }
}

fn show(schema: &CrmSchema, entity: EntityKind, id: &str) -> Result<Outcome> {
    let found = match entity {
        EntityKind::Customers => {
            let id: CustomerId = id.parse().context("invalid customer id")?;
            schema.query.customer(&id).and_then(to_json)
        }
        EntityKind::Products => {
            let id: ProductId = id.parse().context("invalid product id")?;
            schema.query.product(&id).and_then(to_json)
        }
        EntityKind::Orders => {
            let id: OrderId = id.parse().context("invalid order id")?;
            schema.query.order(&id).and_then(to_json)
        }
    };
    match found {
        Ok(body) => Outcome::new(body, true),
        Err(err) => match err.as_field_error() {
            Some(field_error) => Outcome::new(
                LookupErrors {
                    errors: vec![field_error],
                },
                false,
            ),
            None => Err(err.into()),
        },
    }
}

/// Body printed when a lookup does not resolve.
#[derive(Serialize)]
struct LookupErrors {
    errors: Vec<FieldError>,
}

fn to_json(value: impl Serialize) -> CrmResult<Value> {
    Ok(serde_json::to_value(value)?)
}

fn read_customer_inputs(file: &Path) -> Result<Vec<CustomerInput>> {
    let raw = if file == Path::new("-") {
        let mut raw = String::new();
        std::io::stdin()
            .read_to_string(&mut raw)
            .context("Failed to read customers from stdin")?;
        raw
    } else {
        std::fs::read_to_string(file)
            .with_context(|| format!("Failed to read {}", file.display()))?
    };
    serde_json::from_str(&raw).context("Customers file must be a JSON array of {name, email, phone?}")
}

// ── Seed data ────────────────────────────────────────────────────

/// Result of [`seed`].
#[derive(Debug, Serialize)]
pub struct SeedReport {
    pub customers: crm_model::BulkCreateCustomersPayload,
    pub products_created: usize,
    pub products_skipped: usize,
}

/// Creates the demo customers and products through the regular mutation
/// handlers. Safe to rerun: existing emails come back as errors and
/// products whose name already exists are skipped.
pub fn seed(schema: &CrmSchema) -> Result<SeedReport, CrmError> {
    let customers = schema.mutation.bulk_create_customers(vec![
        CustomerInput::new("Alice", "alice@example.com").with_phone("+123456789"),
        CustomerInput::new("Bob", "bob@example.com").with_phone("987-654-3210"),
    ])?;

    let existing: Vec<String> = schema
        .query
        .products()?
        .into_iter()
        .map(|p| p.name)
        .collect();
    let mut products_created = 0;
    let mut products_skipped = 0;
    for input in [
        ProductInput::new("Laptop", 999.99).with_stock(10),
        ProductInput::new("Phone", 499.99).with_stock(15),
    ] {
        if existing.contains(&input.name) {
            products_skipped += 1;
            continue;
        }
        if schema.mutation.create_product(input)?.is_success() {
            products_created += 1;
        }
    }

    info!(
        customers = customers.customers.len(),
        products = products_created,
        "database seeded"
    );
    Ok(SeedReport {
        customers,
        products_created,
        products_skipped,
    })
}
