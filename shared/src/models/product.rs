//! Product Model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Product entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Product {
    pub id: i64,
    pub name: String,
    /// Unit price, tax included
    pub price: Option<Decimal>,
    pub image_url: Option<String>,
    /// Units on hand, never negative
    pub stock: i32,
    pub description: Option<String>,
}

/// Create / update product payload
///
/// Updates replace every column, so both admin forms submit the same shape.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductInput {
    pub name: String,
    pub price: Option<Decimal>,
    pub image_url: Option<String>,
    /// `None` stores 0
    pub stock: Option<i32>,
    pub description: Option<String>,
}

impl Product {
    pub fn in_stock(&self) -> bool {
        self.stock > 0
    }
}
