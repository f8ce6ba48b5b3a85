//! Entity store: customers, products and orders over one SQLite connection.

use chrono::{DateTime, Utc};
use crm_model::{Customer, CustomerInput, Order, Product, ProductInput};
use crm_types::{CustomerId, OrderId, ProductId};
use rusqlite::{params, params_from_iter, Connection, OptionalExtension};
use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, info, warn};

use crate::error::classify;
use crate::rows::{
    customer_columns, from_millis, product_columns, to_millis, truncate_to_millis, CustomerRow,
    OrderRow, ProductRow,
};
use crate::{schema, StorageError, StorageResult};

/// Ids bound per `IN (...)` lookup, well under SQLite's variable limit.
const MAX_IDS_PER_QUERY: usize = 500;

/// Durable, transactional storage for CRM records.
///
/// Clones share the same connection.
#[derive(Clone)]
pub struct EntityStore {
    conn: Arc<Mutex<Connection>>,
}

impl EntityStore {
    /// Opens (or creates) a store at the given path.
    pub fn open(path: &Path) -> StorageResult<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(path)?;
        conn.pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get::<_, String>(0))?;
        info!(path = %path.display(), "opened entity store");
        Self::from_connection(conn)
    }

    /// Opens an in-memory store (for testing and ephemeral runs).
    pub fn open_in_memory() -> StorageResult<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> StorageResult<Self> {
        schema::init(&conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// A scope that panicked has already rolled back when its transaction
    /// guard dropped, so a poisoned lock still guards a consistent connection.
    fn lock(&self) -> MutexGuard<'_, Connection> {
        self.conn.lock().unwrap_or_else(|poisoned| {
            warn!("store scope panicked earlier, recovering connection lock");
            self.conn.clear_poison();
            poisoned.into_inner()
        })
    }

    /// Runs `f` inside one transaction.
    ///
    /// Commits when `f` returns `Ok`. When `f` returns `Err` (or panics) the
    /// transaction is dropped uncommitted and every write made through the
    /// scope is rolled back.
    pub fn with_transaction<T, E, F>(&self, f: F) -> Result<T, E>
    where
        F: FnOnce(&StoreTx<'_>) -> Result<T, E>,
        E: From<StorageError>,
    {
        let mut conn = self.lock();
        let tx = conn.transaction().map_err(StorageError::from)?;
        let value = f(&StoreTx { conn: &tx })?;
        tx.commit().map_err(StorageError::from)?;
        Ok(value)
    }

    /// Runs read-only work inside one transaction so every query in `f`
    /// sees the same snapshot.
    pub fn read<T, F>(&self, f: F) -> StorageResult<T>
    where
        F: FnOnce(&StoreTx<'_>) -> StorageResult<T>,
    {
        self.with_transaction(f)
    }

    // ── Single-statement shorthands ──────────────────────────────

    pub fn get_customer(&self, id: &CustomerId) -> StorageResult<Option<Customer>> {
        self.read(|tx| tx.get_customer(id))
    }

    pub fn get_product(&self, id: &ProductId) -> StorageResult<Option<Product>> {
        self.read(|tx| tx.get_product(id))
    }

    pub fn get_order(&self, id: &OrderId) -> StorageResult<Option<Order>> {
        self.read(|tx| tx.get_order(id))
    }

    pub fn list_customers(&self) -> StorageResult<Vec<Customer>> {
        self.read(|tx| tx.list_customers())
    }

    pub fn list_products(&self) -> StorageResult<Vec<Product>> {
        self.read(|tx| tx.list_products())
    }

    pub fn list_orders(&self) -> StorageResult<Vec<Order>> {
        self.read(|tx| tx.list_orders())
    }

    pub fn customer_email_exists(&self, email: &str) -> StorageResult<bool> {
        self.read(|tx| tx.customer_email_exists(email))
    }

    /// Overwrites a product's price. Existing orders keep their stored totals.
    pub fn update_product_price(&self, id: &ProductId, price: f64) -> StorageResult<Product> {
        self.with_transaction(|tx| tx.update_product_price(id, price))
    }
}

/// Operations available inside a store scope.
///
/// Obtained from [`EntityStore::with_transaction`] or [`EntityStore::read`].
pub struct StoreTx<'a> {
    conn: &'a Connection,
}

impl StoreTx<'_> {
    // ── Customers ────────────────────────────────────────────────

    /// Inserts a customer. The store assigns the id and `created_at`.
    ///
    /// Returns [`StorageError::UniqueViolation`] when the email is taken.
    pub fn create_customer(&self, input: &CustomerInput) -> StorageResult<Customer> {
        let customer = Customer {
            id: CustomerId::new(),
            name: input.name.clone(),
            email: input.email.clone(),
            phone: input.phone.clone(),
            created_at: truncate_to_millis(Utc::now()),
        };
        self.conn
            .execute(
                "INSERT INTO customers (id, name, email, phone, created_at) VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    customer.id.to_string(),
                    customer.name,
                    customer.email,
                    customer.phone,
                    to_millis(customer.created_at),
                ],
            )
            .map_err(|e| classify(e, "email", &customer.email))?;
        debug!(customer_id = %customer.id, "inserted customer");
        Ok(customer)
    }

    pub fn get_customer(&self, id: &CustomerId) -> StorageResult<Option<Customer>> {
        let sql = format!("SELECT {} FROM customers c WHERE c.id = ?1", customer_columns("c"));
        self.conn
            .query_row(&sql, params![id.to_string()], |row| CustomerRow::read(row, 0))
            .optional()?
            .map(CustomerRow::decode)
            .transpose()
    }

    /// True when any customer already uses `email`.
    pub fn customer_email_exists(&self, email: &str) -> StorageResult<bool> {
        let exists: bool = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM customers WHERE email = ?1)",
            params![email],
            |row| row.get(0),
        )?;
        Ok(exists)
    }

    /// All customers in insertion order.
    pub fn list_customers(&self) -> StorageResult<Vec<Customer>> {
        let sql = format!("SELECT {} FROM customers c ORDER BY c.rowid", customer_columns("c"));
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map([], |row| CustomerRow::read(row, 0))?;
        rows.map(|row| row?.decode()).collect()
    }

    // ── Products ─────────────────────────────────────────────────

    /// Inserts a product. `CHECK` constraints reject a non-positive price
    /// or negative stock even when the caller skipped validation.
    pub fn create_product(&self, input: &ProductInput) -> StorageResult<Product> {
        let product = Product {
            id: ProductId::new(),
            name: input.name.clone(),
            price: input.price,
            stock: input.stock(),
        };
        self.conn
            .execute(
                "INSERT INTO products (id, name, price, stock) VALUES (?1, ?2, ?3, ?4)",
                params![product.id.to_string(), product.name, product.price, product.stock],
            )
            .map_err(|e| classify(e, "id", &product.id.to_string()))?;
        debug!(product_id = %product.id, "inserted product");
        Ok(product)
    }

    pub fn get_product(&self, id: &ProductId) -> StorageResult<Option<Product>> {
        let sql = format!("SELECT {} FROM products p WHERE p.id = ?1", product_columns("p"));
        self.conn
            .query_row(&sql, params![id.to_string()], |row| ProductRow::read(row, 0))
            .optional()?
            .map(ProductRow::decode)
            .transpose()
    }

    /// Products whose id is in `ids`, in insertion order. Unknown ids are
    /// ignored and repeated ids yield one product.
    pub fn find_products(&self, ids: &[ProductId]) -> StorageResult<Vec<Product>> {
        let mut seen = HashSet::new();
        let unique: Vec<String> = ids
            .iter()
            .filter(|id| seen.insert(**id))
            .map(ProductId::to_string)
            .collect();

        let mut found = Vec::with_capacity(unique.len());
        for chunk in unique.chunks(MAX_IDS_PER_QUERY) {
            let placeholders = vec!["?"; chunk.len()].join(", ");
            let sql = format!(
                "SELECT p.rowid, {} FROM products p WHERE p.id IN ({placeholders})",
                product_columns("p")
            );
            let mut stmt = self.conn.prepare(&sql)?;
            let rows = stmt.query_map(params_from_iter(chunk), |row| {
                Ok((row.get::<_, i64>(0)?, ProductRow::read(row, 1)?))
            })?;
            for row in rows {
                found.push(row?);
            }
        }
        if unique.len() < ids.len() {
            debug!(requested = ids.len(), unique = unique.len(), "collapsed repeated product ids");
        }

        found.sort_by_key(|(rowid, _)| *rowid);
        found.into_iter().map(|(_, row)| row.decode()).collect()
    }

    /// All products in insertion order.
    pub fn list_products(&self) -> StorageResult<Vec<Product>> {
        let sql = format!("SELECT {} FROM products p ORDER BY p.rowid", product_columns("p"));
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map([], |row| ProductRow::read(row, 0))?;
        rows.map(|row| row?.decode()).collect()
    }

    pub fn update_product_price(&self, id: &ProductId, price: f64) -> StorageResult<Product> {
        let changed = self
            .conn
            .execute(
                "UPDATE products SET price = ?1 WHERE id = ?2",
                params![price, id.to_string()],
            )
            .map_err(|e| classify(e, "id", &id.to_string()))?;
        if changed == 0 {
            return Err(StorageError::NotFound(format!("product {id}")));
        }
        self.get_product(id)?
            .ok_or_else(|| StorageError::NotFound(format!("product {id}")))
    }

    // ── Orders ───────────────────────────────────────────────────

    /// Inserts an order row and one link per product.
    ///
    /// `total_amount` is stored as given; the caller computes it from the
    /// product prices it resolved in the same scope.
    pub fn create_order(
        &self,
        customer: &Customer,
        products: &[Product],
        total_amount: f64,
        order_date: DateTime<Utc>,
    ) -> StorageResult<Order> {
        let order = Order {
            id: OrderId::new(),
            customer: customer.clone(),
            products: products.to_vec(),
            total_amount,
            order_date: truncate_to_millis(order_date),
        };
        let order_id = order.id.to_string();
        self.conn
            .execute(
                "INSERT INTO orders (id, customer_id, total_amount, order_date) VALUES (?1, ?2, ?3, ?4)",
                params![
                    order_id,
                    customer.id.to_string(),
                    total_amount,
                    to_millis(order.order_date),
                ],
            )
            .map_err(|e| classify(e, "id", &order_id))?;

        let mut link = self.conn.prepare(
            "INSERT INTO order_products (order_id, product_id, position) VALUES (?1, ?2, ?3)",
        )?;
        for (position, product) in products.iter().enumerate() {
            link.execute(params![order_id, product.id.to_string(), position as i64])
                .map_err(|e| classify(e, "product_id", &product.id.to_string()))?;
        }
        debug!(order_id = %order.id, products = products.len(), "inserted order");
        Ok(order)
    }

    pub fn get_order(&self, id: &OrderId) -> StorageResult<Option<Order>> {
        let order_id = id.to_string();
        let mut orders = self.load_orders(Some(order_id.as_str()))?;
        Ok(orders.pop())
    }

    /// All orders in insertion order with customer and products resolved.
    pub fn list_orders(&self) -> StorageResult<Vec<Order>> {
        self.load_orders(None)
    }

    /// Loads orders with two set-based queries: order rows joined with
    /// their customers, then every product link joined with its product.
    /// Cost does not grow with one lookup per order.
    fn load_orders(&self, only: Option<&str>) -> StorageResult<Vec<Order>> {
        let filter = if only.is_some() { "WHERE o.id = ?1" } else { "" };

        let sql = format!(
            "SELECT o.id, o.total_amount, o.order_date, {}
             FROM orders o JOIN customers c ON c.id = o.customer_id
             {filter} ORDER BY o.rowid",
            customer_columns("c")
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let order_rows = stmt
            .query_map(params_from_iter(only.iter()), OrderRow::read)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        if order_rows.is_empty() {
            return Ok(Vec::new());
        }

        let sql = format!(
            "SELECT op.order_id, {}
             FROM order_products op JOIN products p ON p.id = op.product_id
             {} ORDER BY op.order_id, op.position",
            product_columns("p"),
            if only.is_some() { "WHERE op.order_id = ?1" } else { "" },
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let links = stmt.query_map(params_from_iter(only.iter()), |row| {
            Ok((row.get::<_, String>(0)?, ProductRow::read(row, 1)?))
        })?;

        let mut products_by_order: HashMap<String, Vec<Product>> = HashMap::new();
        for link in links {
            let (order_id, product) = link?;
            products_by_order
                .entry(order_id)
                .or_default()
                .push(product.decode()?);
        }

        order_rows
            .into_iter()
            .map(|row| {
                let id = row.order_id()?;
                let products = products_by_order.remove(&row.id).unwrap_or_default();
                Ok(Order {
                    id,
                    customer: row.customer.decode()?,
                    products,
                    total_amount: row.total_amount,
                    order_date: from_millis(row.order_date)?,
                })
            })
            .collect()
    }
}
