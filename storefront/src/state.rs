//! Application state for the storefront

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use crate::checkout::{OrderStore, PgOrderStore};
use crate::config::Config;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// PostgreSQL connection pool (catalog reads, admin CRUD)
    pub pool: PgPool,
    /// Transaction source for order placement
    pub orders: Arc<dyn OrderStore>,
    /// Directory served under `/static`
    pub public_dir: PathBuf,
    /// Whole-request deadline
    pub request_timeout: Duration,
}

impl AppState {
    /// Connect, run migrations, and wire the PostgreSQL order store
    pub async fn new(config: &Config) -> Result<Self, BoxError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.db_max_connections)
            .acquire_timeout(config.db_acquire_timeout)
            .connect(&config.database_url)
            .await?;

        sqlx::migrate!("./migrations").run(&pool).await?;
        tracing::info!("Database migrations applied");

        Ok(Self {
            orders: Arc::new(PgOrderStore::new(pool.clone())),
            pool,
            public_dir: PathBuf::from(&config.public_dir),
            request_timeout: config.request_timeout,
        })
    }

    /// State over an existing pool with a caller-chosen order store
    pub fn with_store(pool: PgPool, orders: Arc<dyn OrderStore>) -> Self {
        Self {
            pool,
            orders,
            public_dir: PathBuf::from("public"),
            request_timeout: Duration::from_secs(30),
        }
    }
}
