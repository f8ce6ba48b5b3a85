//! Raw row shapes and their conversion into model records.
//!
//! Rows are read as plain SQLite values inside `query_map` closures and
//! decoded afterwards, so a malformed id or timestamp becomes
//! [`StorageError::InvalidData`] instead of a rusqlite conversion error.

use chrono::{DateTime, Utc};
use crm_model::{Customer, Product};
use crm_types::{CustomerId, OrderId, ProductId};
use rusqlite::Row;
use std::fmt;
use std::str::FromStr;

use crate::{StorageError, StorageResult};

/// Columns selected for a customer, in order. `prefix` is the table alias.
pub(crate) fn customer_columns(prefix: &str) -> String {
    format!("{prefix}.id, {prefix}.name, {prefix}.email, {prefix}.phone, {prefix}.created_at")
}

pub(crate) fn product_columns(prefix: &str) -> String {
    format!("{prefix}.id, {prefix}.name, {prefix}.price, {prefix}.stock")
}

pub(crate) struct CustomerRow {
    id: String,
    name: String,
    email: String,
    phone: Option<String>,
    created_at: i64,
}

impl CustomerRow {
    /// Reads the five customer columns starting at `offset`.
    pub(crate) fn read(row: &Row<'_>, offset: usize) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(offset)?,
            name: row.get(offset + 1)?,
            email: row.get(offset + 2)?,
            phone: row.get(offset + 3)?,
            created_at: row.get(offset + 4)?,
        })
    }

    pub(crate) fn decode(self) -> StorageResult<Customer> {
        Ok(Customer {
            id: parse_id::<CustomerId>(&self.id)?,
            name: self.name,
            email: self.email,
            phone: self.phone,
            created_at: from_millis(self.created_at)?,
        })
    }
}

pub(crate) struct ProductRow {
    id: String,
    name: String,
    price: f64,
    stock: i64,
}

impl ProductRow {
    pub(crate) fn read(row: &Row<'_>, offset: usize) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(offset)?,
            name: row.get(offset + 1)?,
            price: row.get(offset + 2)?,
            stock: row.get(offset + 3)?,
        })
    }

    pub(crate) fn decode(self) -> StorageResult<Product> {
        Ok(Product {
            id: parse_id::<ProductId>(&self.id)?,
            name: self.name,
            price: self.price,
            stock: self.stock,
        })
    }
}

/// An order row joined with its customer; products are attached separately.
pub(crate) struct OrderRow {
    pub(crate) id: String,
    pub(crate) total_amount: f64,
    pub(crate) order_date: i64,
    pub(crate) customer: CustomerRow,
}

impl OrderRow {
    pub(crate) fn read(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            total_amount: row.get(1)?,
            order_date: row.get(2)?,
            customer: CustomerRow::read(row, 3)?,
        })
    }

    pub(crate) fn order_id(&self) -> StorageResult<OrderId> {
        parse_id::<OrderId>(&self.id)
    }
}

pub(crate) fn parse_id<T>(raw: &str) -> StorageResult<T>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    raw.parse()
        .map_err(|e| StorageError::InvalidData(format!("invalid id {raw:?}: {e}")))
}

/// Milliseconds since the Unix epoch; the storage precision for timestamps.
pub(crate) fn to_millis(ts: DateTime<Utc>) -> i64 {
    ts.timestamp_millis()
}

pub(crate) fn from_millis(millis: i64) -> StorageResult<DateTime<Utc>> {
    DateTime::from_timestamp_millis(millis)
        .ok_or_else(|| StorageError::InvalidData(format!("timestamp out of range: {millis}")))
}

/// Drops sub-millisecond precision so a value survives a store round trip unchanged.
pub(crate) fn truncate_to_millis(ts: DateTime<Utc>) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(ts.timestamp_millis()).unwrap_or(ts)
}
