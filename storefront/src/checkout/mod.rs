//! Order placement
//!
//! The one operation with transactional invariants: take stock from a product
//! and record the order, both or neither. Everything runs on a transaction
//! opened through [`OrderStore`], so callers pass the store in explicitly.
//!
//! Concurrency relies on the conditional decrement. PostgreSQL holds the row
//! lock it takes until the transaction ends, and a second order for the same
//! product re-checks `stock >= quantity` after the first commits. Stock can
//! therefore never go negative, and the losing order fails with
//! [`OrderError::InsufficientStock`] instead of overselling.

#[cfg(test)]
pub mod memory;
pub mod postgres;
pub mod store;

use shared::error::{AppError, ErrorCode};
use shared::models::{Order, OrderRequest};
use thiserror::Error;

#[cfg(test)]
pub use memory::MemoryOrderStore;
pub use postgres::PgOrderStore;
pub use store::{OrderStore, OrderTx, StoreError};

/// Why an order was not placed
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum OrderError {
    #[error("Quantity must be a positive integer, got {0}")]
    InvalidQuantity(i32),

    #[error("Product {0} not found")]
    ProductNotFound(i64),

    #[error("Insufficient stock for product {product_id}: requested {requested}, available {available}")]
    InsufficientStock {
        product_id: i64,
        requested: i32,
        available: i32,
    },

    /// Store failure, message verbatim
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl OrderError {
    /// Whether retrying the same request later could succeed
    pub fn is_transient(&self) -> bool {
        matches!(self, OrderError::Store(e) if e.is_transient())
    }
}

impl From<OrderError> for AppError {
    fn from(e: OrderError) -> Self {
        let message = e.to_string();
        match e {
            OrderError::InvalidQuantity(quantity) => {
                AppError::with_message(ErrorCode::OrderInvalidQuantity, message)
                    .with_detail("quantity", quantity)
            }
            OrderError::ProductNotFound(product_id) => {
                AppError::with_message(ErrorCode::ProductNotFound, message)
                    .with_detail("product_id", product_id)
            }
            OrderError::InsufficientStock {
                product_id,
                requested,
                available,
            } => AppError::with_message(ErrorCode::ProductOutOfStock, message)
                .with_detail("product_id", product_id)
                .with_detail("requested", requested)
                .with_detail("available", available),
            OrderError::Store(StoreError::Unavailable(_)) => {
                AppError::with_message(ErrorCode::NetworkError, message)
            }
            OrderError::Store(StoreError::Query(_)) => {
                AppError::with_message(ErrorCode::DatabaseError, message)
            }
        }
    }
}

/// Place one order: decrement stock and insert the order row in a single
/// transaction.
///
/// Quantity is checked before the store is touched. Any failure after
/// `begin` rolls the transaction back, so stock is left exactly as it was.
pub async fn place_order(store: &dyn OrderStore, request: OrderRequest) -> Result<Order, OrderError> {
    let OrderRequest {
        product_id,
        quantity,
    } = request;

    if quantity <= 0 {
        tracing::info!(product_id, quantity, "Order rejected: invalid quantity");
        return Err(OrderError::InvalidQuantity(quantity));
    }

    let mut tx = store.begin().await?;

    match fulfil(tx.as_mut(), product_id, quantity).await {
        Ok((order, remaining)) => match tx.commit().await {
            Ok(()) => {
                tracing::info!(
                    order_id = order.id,
                    product_id,
                    quantity,
                    remaining_stock = remaining,
                    "Order placed"
                );
                Ok(order)
            }
            Err(commit_err) => {
                let e = OrderError::from(commit_err);
                log_failure(&e, product_id, quantity);
                Err(e)
            }
        },
        Err(e) => {
            if let Err(rollback_err) = tx.rollback().await {
                tracing::warn!(error = %rollback_err, product_id, "Order rollback failed");
            }
            log_failure(&e, product_id, quantity);
            Err(e)
        }
    }
}

fn log_failure(e: &OrderError, product_id: i64, quantity: i32) {
    if matches!(e, OrderError::Store(_)) {
        tracing::error!(
            error = %e,
            transient = e.is_transient(),
            product_id,
            quantity,
            "Order failed"
        );
    } else {
        tracing::info!(reason = %e, product_id, quantity, "Order rejected");
    }
}

/// Both statements of the order, on an open transaction
async fn fulfil(
    tx: &mut dyn OrderTx,
    product_id: i64,
    quantity: i32,
) -> Result<(Order, i32), OrderError> {
    let remaining = match tx.decrement_stock(product_id, quantity).await? {
        Some(remaining) => remaining,
        None => {
            return Err(match tx.stock_of(product_id).await? {
                None => OrderError::ProductNotFound(product_id),
                Some(available) => OrderError::InsufficientStock {
                    product_id,
                    requested: quantity,
                    available,
                },
            });
        }
    };

    let order = tx.insert_order(product_id, quantity).await?;
    Ok((order, remaining))
}
