//! Data models
//!
//! Shared between the storefront server and its JSON API.
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! All IDs are `i64` (PostgreSQL BIGSERIAL).

pub mod order;
pub mod product;

// Re-exports
pub use order::*;
pub use product::*;
