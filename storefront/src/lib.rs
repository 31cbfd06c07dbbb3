//! Storefront - product catalog, order placement and a small back-office
//!
//! # Module layout
//!
//! ```text
//! storefront/src/
//! ├── api/          # axum routes (shop, order, catalog JSON, admin, health)
//! ├── checkout/     # order placement transaction and its store seam
//! ├── db/           # parameterized SQL over PgPool
//! ├── views/        # server-rendered HTML
//! ├── config.rs     # environment configuration
//! ├── error.rs      # service-layer error bridge
//! ├── logger.rs     # tracing subscriber setup
//! ├── middleware.rs # request logging
//! ├── state.rs      # shared application state
//! └── validation.rs # form parsing and limits
//! ```

pub mod api;
pub mod checkout;
pub mod config;
pub mod db;
pub mod error;
pub mod logger;
pub mod middleware;
pub mod state;
pub mod validation;
pub mod views;

pub use checkout::{OrderError, OrderStore, place_order};
pub use config::Config;
pub use state::AppState;
