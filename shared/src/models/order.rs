//! Order Model

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Order row, created only by order placement and never modified afterwards
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Order {
    pub id: i64,
    pub product_id: i64,
    pub quantity: i32,
    /// Assigned by the store at insert time
    pub order_date: DateTime<Utc>,
}

/// Place-order request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRequest {
    pub product_id: i64,
    #[serde(default = "default_quantity")]
    pub quantity: i32,
}

fn default_quantity() -> i32 {
    1
}

impl OrderRequest {
    /// Storefront flow: one unit per submit
    pub fn single(product_id: i64) -> Self {
        Self {
            product_id,
            quantity: 1,
        }
    }
}

/// Order joined with its product, for the back-office listing
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct OrderSummary {
    pub id: i64,
    pub product_id: i64,
    pub quantity: i32,
    pub order_date: DateTime<Utc>,
    pub product_name: String,
    pub price: Option<Decimal>,
    pub image_url: Option<String>,
}

impl OrderSummary {
    /// Line total, when the product has a price
    pub fn total(&self) -> Option<Decimal> {
        self.price.map(|p| p * Decimal::from(self.quantity))
    }
}
