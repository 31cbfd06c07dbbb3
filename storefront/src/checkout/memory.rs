//! In-memory order store, compiled for unit and router tests only
//!
//! Transactions work on a private copy of the tables and hold the store lock
//! until commit or rollback, so they are fully serialized. Every statement
//! yields to the scheduler first, which lets concurrent orders interleave.
//! Faults can be injected to exercise rollback and commit paths.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex as StdMutex};

use async_trait::async_trait;
use chrono::Utc;
use shared::models::{Order, Product};
use tokio::sync::{Mutex, OwnedMutexGuard};

use super::store::{OrderStore, OrderTx, StoreError};

#[derive(Debug, Clone, Default)]
struct Tables {
    products: BTreeMap<i64, Product>,
    orders: Vec<Order>,
    last_order_id: i64,
}

#[derive(Debug, Default)]
struct Faults {
    unavailable: Option<String>,
    insert_failure: Option<String>,
    commit_failure: Option<String>,
}

#[derive(Clone, Default)]
pub struct MemoryOrderStore {
    tables: Arc<Mutex<Tables>>,
    faults: Arc<StdMutex<Faults>>,
}

impl MemoryOrderStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a product with the given stock
    pub async fn insert_product(&self, id: i64, name: &str, stock: i32) {
        let product = Product {
            id,
            name: name.to_string(),
            price: None,
            image_url: None,
            stock,
            description: None,
        };
        self.tables.lock().await.products.insert(id, product);
    }

    pub async fn product(&self, id: i64) -> Option<Product> {
        self.tables.lock().await.products.get(&id).cloned()
    }

    /// Committed orders, oldest first
    pub async fn orders(&self) -> Vec<Order> {
        self.tables.lock().await.orders.clone()
    }

    /// Make every subsequent `begin` fail as if the store were unreachable
    pub fn set_unavailable(&self, message: Option<&str>) {
        if let Ok(mut faults) = self.faults.lock() {
            faults.unavailable = message.map(str::to_string);
        }
    }

    /// Fail the next order insert with `message`, after the decrement has run
    pub fn fail_next_insert(&self, message: &str) {
        if let Ok(mut faults) = self.faults.lock() {
            faults.insert_failure = Some(message.to_string());
        }
    }

    /// Fail the next commit with `message`; the transaction's changes are lost
    pub fn fail_next_commit(&self, message: &str) {
        if let Ok(mut faults) = self.faults.lock() {
            faults.commit_failure = Some(message.to_string());
        }
    }
}

#[async_trait]
impl OrderStore for MemoryOrderStore {
    async fn begin(&self) -> Result<Box<dyn OrderTx>, StoreError> {
        let unavailable = self.faults.lock().ok().and_then(|f| f.unavailable.clone());
        if let Some(message) = unavailable {
            return Err(StoreError::Unavailable(message));
        }

        let guard = self.tables.clone().lock_owned().await;
        let working = guard.clone();
        Ok(Box::new(MemoryTx {
            guard,
            working,
            faults: self.faults.clone(),
        }))
    }
}

struct MemoryTx {
    guard: OwnedMutexGuard<Tables>,
    working: Tables,
    faults: Arc<StdMutex<Faults>>,
}

#[async_trait]
impl OrderTx for MemoryTx {
    async fn decrement_stock(
        &mut self,
        product_id: i64,
        quantity: i32,
    ) -> Result<Option<i32>, StoreError> {
        tokio::task::yield_now().await;
        match self.working.products.get_mut(&product_id) {
            Some(product) if product.stock >= quantity => {
                product.stock -= quantity;
                Ok(Some(product.stock))
            }
            _ => Ok(None),
        }
    }

    async fn stock_of(&mut self, product_id: i64) -> Result<Option<i32>, StoreError> {
        tokio::task::yield_now().await;
        Ok(self.working.products.get(&product_id).map(|p| p.stock))
    }

    async fn insert_order(&mut self, product_id: i64, quantity: i32) -> Result<Order, StoreError> {
        tokio::task::yield_now().await;
        let injected = self
            .faults
            .lock()
            .ok()
            .and_then(|mut f| f.insert_failure.take());
        if let Some(message) = injected {
            return Err(StoreError::Query(message));
        }

        if !self.working.products.contains_key(&product_id) {
            return Err(StoreError::Query(
                "insert or update on table \"orders\" violates foreign key constraint \"orders_product_id_fkey\"".to_string(),
            ));
        }
        if quantity <= 0 {
            return Err(StoreError::Query(
                "new row for relation \"orders\" violates check constraint \"orders_quantity_check\"".to_string(),
            ));
        }

        self.working.last_order_id += 1;
        let order = Order {
            id: self.working.last_order_id,
            product_id,
            quantity,
            order_date: Utc::now(),
        };
        self.working.orders.push(order.clone());
        Ok(order)
    }

    async fn commit(self: Box<Self>) -> Result<(), StoreError> {
        let MemoryTx {
            mut guard,
            working,
            faults,
        } = *self;
        let injected = faults.lock().ok().and_then(|mut f| f.commit_failure.take());
        if let Some(message) = injected {
            return Err(StoreError::Query(message));
        }
        *guard = working;
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> Result<(), StoreError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_uncommitted_changes_are_discarded() {
        let store = MemoryOrderStore::new();
        store.insert_product(1, "Mug", 3).await;

        let mut tx = store.begin().await.unwrap();
        assert_eq!(tx.decrement_stock(1, 2).await.unwrap(), Some(1));
        tx.insert_order(1, 2).await.unwrap();
        drop(tx);

        assert_eq!(store.product(1).await.unwrap().stock, 3);
        assert!(store.orders().await.is_empty());
    }

    #[tokio::test]
    async fn test_commit_publishes_changes() {
        let store = MemoryOrderStore::new();
        store.insert_product(1, "Mug", 3).await;

        let mut tx = store.begin().await.unwrap();
        tx.decrement_stock(1, 1).await.unwrap();
        let order = tx.insert_order(1, 1).await.unwrap();
        tx.commit().await.unwrap();

        assert_eq!(store.product(1).await.unwrap().stock, 2);
        assert_eq!(store.orders().await, vec![order]);
    }

    #[tokio::test]
    async fn test_decrement_refuses_to_go_negative() {
        let store = MemoryOrderStore::new();
        store.insert_product(1, "Mug", 1).await;

        let mut tx = store.begin().await.unwrap();
        assert_eq!(tx.decrement_stock(1, 2).await.unwrap(), None);
        assert_eq!(tx.stock_of(1).await.unwrap(), Some(1));
        assert_eq!(tx.stock_of(2).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_injected_insert_failure_fires_once() {
        let store = MemoryOrderStore::new();
        store.insert_product(1, "Mug", 5).await;
        store.fail_next_insert("disk full");

        let mut tx = store.begin().await.unwrap();
        let err = tx.insert_order(1, 1).await.unwrap_err();
        assert_eq!(err, StoreError::Query("disk full".to_string()));
        assert!(tx.insert_order(1, 1).await.is_ok());
    }

    #[tokio::test]
    async fn test_failed_commit_discards_changes() {
        let store = MemoryOrderStore::new();
        store.insert_product(1, "Mug", 3).await;
        store.fail_next_commit("server closed the connection unexpectedly");

        let mut tx = store.begin().await.unwrap();
        tx.decrement_stock(1, 1).await.unwrap();
        tx.insert_order(1, 1).await.unwrap();
        let err = tx.commit().await.unwrap_err();

        assert_eq!(
            err,
            StoreError::Query("server closed the connection unexpectedly".to_string())
        );
        assert_eq!(store.product(1).await.unwrap().stock, 3);
        assert!(store.orders().await.is_empty());
    }

    #[tokio::test]
    async fn test_insert_for_missing_product_violates_fk() {
        let store = MemoryOrderStore::new();
        let mut tx = store.begin().await.unwrap();
        let err = tx.insert_order(42, 1).await.unwrap_err();
        assert!(err.to_string().contains("foreign key"));
    }
}
