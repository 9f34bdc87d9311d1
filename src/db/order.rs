//! Kitchen order repository
//!
//! Orders are append-only: the assistant inserts one row per confirmed dish
//! and never updates or deletes it.

use std::fmt;
use std::str::FromStr;

use chrono::Local;
use serde::Serialize;

use super::DbPool;
use crate::{Error, Result};

/// Modifications recorded when the customer asked for none
pub const NO_MODIFICATIONS: &str = "No modifications";

/// Format of `order_time`, local wall-clock time
pub const ORDER_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Kitchen status of an order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum OrderStatus {
    Pending,
    Preparing,
    Ready,
    Served,
}

impl OrderStatus {
    /// Stored representation
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Preparing => "Preparing",
            Self::Ready => "Ready",
            Self::Served => "Served",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "Pending" => Ok(Self::Pending),
            "Preparing" => Ok(Self::Preparing),
            "Ready" => Ok(Self::Ready),
            "Served" => Ok(Self::Served),
            other => Err(Error::Database(format!("unknown order status: {other}"))),
        }
    }
}

/// An order as stored in `kitchen_orders`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KitchenOrder {
    pub id: i64,
    pub item_name: String,
    pub modifications: String,
    pub order_time: String,
    pub status: OrderStatus,
}

/// Repository for the kitchen order queue
#[derive(Clone)]
pub struct KitchenOrderRepo {
    pool: DbPool,
}

impl KitchenOrderRepo {
    /// Create a new kitchen order repository
    #[must_use]
    pub const fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Send an order to the kitchen
    ///
    /// The row is written as `Pending` with the current local time and is
    /// committed before this returns.
    ///
    /// # Errors
    ///
    /// Returns error if database operation fails
    pub fn insert(&self, item_name: &str, modifications: &str) -> Result<KitchenOrder> {
        let conn = self.pool.get().map_err(|e| Error::Database(e.to_string()))?;

        let order_time = Local::now().format(ORDER_TIME_FORMAT).to_string();
        let status = OrderStatus::Pending;

        conn.execute(
            r"
            INSERT INTO kitchen_orders (item_name, modifications, order_time, status)
            VALUES (?1, ?2, ?3, ?4)
            ",
            rusqlite::params![item_name, modifications, order_time, status.as_str()],
        )?;
        let id = conn.last_insert_rowid();

        tracing::info!(id, item = %item_name, modifications = %modifications, "order queued for kitchen");

        Ok(KitchenOrder {
            id,
            item_name: item_name.to_string(),
            modifications: modifications.to_string(),
            order_time,
            status,
        })
    }

    /// Get an order by id
    ///
    /// # Errors
    ///
    /// Returns error if database operation fails
    pub fn get(&self, id: i64) -> Result<Option<KitchenOrder>> {
        let conn = self.pool.get().map_err(|e| Error::Database(e.to_string()))?;

        let result = conn.query_row(
            r"
            SELECT id, item_name, modifications, order_time, status
            FROM kitchen_orders
            WHERE id = ?1
            ",
            rusqlite::params![id],
            Self::row_to_order,
        );

        match result {
            Ok(order) => Ok(Some(order)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// List the most recent orders, newest first
    ///
    /// # Errors
    ///
    /// Returns error if database operation fails
    pub fn list_recent(&self, limit: usize) -> Result<Vec<KitchenOrder>> {
        let conn = self.pool.get().map_err(|e| Error::Database(e.to_string()))?;

        let mut stmt = conn.prepare(
            r"
            SELECT id, item_name, modifications, order_time, status
            FROM kitchen_orders
            ORDER BY id DESC
            LIMIT ?1
            ",
        )?;

        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let rows = stmt.query_map(rusqlite::params![limit], Self::row_to_order)?;

        let mut orders = Vec::new();
        for row in rows {
            orders.push(row?);
        }

        Ok(orders)
    }

    /// Number of orders ever sent to the kitchen
    ///
    /// # Errors
    ///
    /// Returns error if database operation fails
    pub fn count(&self) -> Result<u64> {
        let conn = self.pool.get().map_err(|e| Error::Database(e.to_string()))?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM kitchen_orders", [], |row| {
            row.get(0)
        })?;
        Ok(u64::try_from(count).unwrap_or_default())
    }

    /// Convert a database row to a `KitchenOrder`
    fn row_to_order(row: &rusqlite::Row<'_>) -> rusqlite::Result<KitchenOrder> {
        let id: i64 = row.get(0)?;
        let item_name: Option<String> = row.get(1)?;
        let modifications: Option<String> = row.get(2)?;
        let order_time: Option<String> = row.get(3)?;
        let status: Option<String> = row.get(4)?;

        // Rows without a status predate any status other than Pending
        let status = status.map_or(Ok(OrderStatus::Pending), |s| {
            s.parse().map_err(|e: Error| {
                rusqlite::Error::FromSqlConversionFailure(4, rusqlite::types::Type::Text, Box::new(e))
            })
        })?;

        Ok(KitchenOrder {
            id,
            item_name: item_name.unwrap_or_default(),
            modifications: modifications.unwrap_or_else(|| NO_MODIFICATIONS.to_string()),
            order_time: order_time.unwrap_or_default(),
            status,
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDateTime;

    use super::*;
    use crate::db;

    fn repo() -> KitchenOrderRepo {
        KitchenOrderRepo::new(db::init_memory().unwrap())
    }

    #[test]
    fn test_insert_is_pending_with_timestamp() {
        let repo = repo();
        let order = repo.insert("Chicken Biryani", "less spice").unwrap();

        assert_eq!(order.status, OrderStatus::Pending);
        assert!(!order.order_time.is_empty());
        assert!(NaiveDateTime::parse_from_str(&order.order_time, ORDER_TIME_FORMAT).is_ok());

        let stored = repo.get(order.id).unwrap().unwrap();
        assert_eq!(stored, order);
    }

    #[test]
    fn test_status_stored_as_text() {
        let pool = db::init_memory().unwrap();
        KitchenOrderRepo::new(pool.clone())
            .insert("Kheer", NO_MODIFICATIONS)
            .unwrap();

        let conn = pool.get().unwrap();
        let status: String = conn
            .query_row("SELECT status FROM kitchen_orders", [], |row| row.get(0))
            .unwrap();
        assert_eq!(status, "Pending");
    }

    #[test]
    fn test_list_recent_newest_first() {
        let repo = repo();
        repo.insert("Lassi", NO_MODIFICATIONS).unwrap();
        repo.insert("Kheer", NO_MODIFICATIONS).unwrap();
        repo.insert("Fish Fry", "extra lemon").unwrap();

        let names: Vec<String> = repo
            .list_recent(2)
            .unwrap()
            .into_iter()
            .map(|o| o.item_name)
            .collect();
        assert_eq!(names, vec!["Fish Fry", "Kheer"]);
        assert_eq!(repo.count().unwrap(), 3);
    }

    #[test]
    fn test_order_time_non_decreasing() {
        let repo = repo();
        let first = repo.insert("Lassi", NO_MODIFICATIONS).unwrap();
        let second = repo.insert("Kheer", NO_MODIFICATIONS).unwrap();
        assert!(second.order_time >= first.order_time);
        assert!(second.id > first.id);
    }

    #[test]
    fn test_get_missing() {
        assert!(repo().get(42).unwrap().is_none());
    }

    #[test]
    fn test_status_parse() {
        assert_eq!("Ready".parse::<OrderStatus>().unwrap(), OrderStatus::Ready);
        assert!("Cooking".parse::<OrderStatus>().is_err());
    }
}
