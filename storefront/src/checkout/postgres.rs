//! PostgreSQL-backed order store

use async_trait::async_trait;
use shared::models::Order;
use sqlx::{PgPool, Postgres, Transaction};

use super::store::{OrderStore, OrderTx, StoreError};
use crate::db::order as order_db;

/// Opens transactions on the shared pool at the server's default isolation
/// (READ COMMITTED). The conditional decrement's row lock is what serializes
/// concurrent orders for the same product.
#[derive(Clone)]
pub struct PgOrderStore {
    pool: PgPool,
}

impl PgOrderStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl OrderStore for PgOrderStore {
    async fn begin(&self) -> Result<Box<dyn OrderTx>, StoreError> {
        let tx = self.pool.begin().await?;
        Ok(Box::new(PgOrderTx { tx }))
    }
}

struct PgOrderTx {
    tx: Transaction<'static, Postgres>,
}

#[async_trait]
impl OrderTx for PgOrderTx {
    async fn decrement_stock(
        &mut self,
        product_id: i64,
        quantity: i32,
    ) -> Result<Option<i32>, StoreError> {
        Ok(order_db::decrement_stock(&mut self.tx, product_id, quantity).await?)
    }

    async fn stock_of(&mut self, product_id: i64) -> Result<Option<i32>, StoreError> {
        Ok(order_db::stock_of(&mut self.tx, product_id).await?)
    }

    async fn insert_order(&mut self, product_id: i64, quantity: i32) -> Result<Order, StoreError> {
        Ok(order_db::insert_order(&mut self.tx, product_id, quantity).await?)
    }

    async fn commit(self: Box<Self>) -> Result<(), StoreError> {
        self.tx.commit().await?;
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> Result<(), StoreError> {
        self.tx.rollback().await?;
        Ok(())
    }
}
