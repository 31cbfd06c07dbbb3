//! Store seam for order placement
//!
//! The handler only ever talks to the store through an explicit transaction
//! handle, so the same protocol runs against PostgreSQL in production and an
//! in-memory store in tests.

use async_trait::async_trait;
use shared::models::Order;
use thiserror::Error;

/// Failure reported by the store itself
///
/// The message is the store's own text, unmodified.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    /// Connection, TLS, or pool failure. Retrying later may succeed.
    #[error("{0}")]
    Unavailable(String),
    /// The store rejected a statement (constraint, syntax, serialization, ...)
    #[error("{0}")]
    Query(String),
}

impl StoreError {
    pub fn is_transient(&self) -> bool {
        matches!(self, StoreError::Unavailable(_))
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        match &e {
            sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::WorkerCrashed => StoreError::Unavailable(e.to_string()),
            sqlx::Error::Database(db) => StoreError::Query(db.message().to_string()),
            _ => StoreError::Query(e.to_string()),
        }
    }
}

/// Opens order transactions
#[async_trait]
pub trait OrderStore: Send + Sync {
    async fn begin(&self) -> Result<Box<dyn OrderTx>, StoreError>;
}

/// One open transaction
///
/// Dropping the handle without calling [`OrderTx::commit`] discards every
/// change made through it.
#[async_trait]
pub trait OrderTx: Send {
    /// Take `quantity` units from the product if at least that many remain.
    ///
    /// Returns the remaining stock, or `None` when the product is missing or
    /// short. The decremented row stays locked until commit or rollback.
    async fn decrement_stock(
        &mut self,
        product_id: i64,
        quantity: i32,
    ) -> Result<Option<i32>, StoreError>;

    /// Current stock of the product, `None` when it does not exist
    async fn stock_of(&mut self, product_id: i64) -> Result<Option<i32>, StoreError>;

    /// Insert the order row; `order_date` is assigned by the store
    async fn insert_order(&mut self, product_id: i64, quantity: i32) -> Result<Order, StoreError>;

    async fn commit(self: Box<Self>) -> Result<(), StoreError>;

    async fn rollback(self: Box<Self>) -> Result<(), StoreError>;
}
