//! Database access layer
//!
//! Plain async functions over `PgPool` (or a borrowed connection when the
//! caller owns the transaction). Every statement is parameterized.

pub mod order;
pub mod product;

use sqlx::PgPool;

/// PostgreSQL SQLSTATE for foreign_key_violation
const FOREIGN_KEY_VIOLATION: &str = "23503";

/// Round-trip to the store, used by the health check
pub async fn ping(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Whether the store refused the statement because another row references it
pub fn is_foreign_key_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db) => db.code().as_deref() == Some(FOREIGN_KEY_VIOLATION),
        _ => false,
    }
}
