//! Order database operations
//!
//! The write path runs on a caller-owned connection so that the stock
//! decrement and the order insert share one transaction.

use shared::models::{Order, OrderSummary};
use sqlx::{PgConnection, PgPool};

/// Conditional decrement. Zero rows means the product is missing or short.
pub async fn decrement_stock(
    conn: &mut PgConnection,
    product_id: i64,
    quantity: i32,
) -> Result<Option<i32>, sqlx::Error> {
    sqlx::query_scalar::<_, i32>(
        r#"
        UPDATE products
        SET stock = stock - $2
        WHERE id = $1 AND stock >= $2
        RETURNING stock
        "#,
    )
    .bind(product_id)
    .bind(quantity)
    .fetch_optional(conn)
    .await
}

pub async fn stock_of(conn: &mut PgConnection, product_id: i64) -> Result<Option<i32>, sqlx::Error> {
    sqlx::query_scalar::<_, i32>("SELECT stock FROM products WHERE id = $1")
        .bind(product_id)
        .fetch_optional(conn)
        .await
}

pub async fn insert_order(
    conn: &mut PgConnection,
    product_id: i64,
    quantity: i32,
) -> Result<Order, sqlx::Error> {
    sqlx::query_as::<_, Order>(
        r#"
        INSERT INTO orders (product_id, quantity, order_date)
        VALUES ($1, $2, NOW())
        RETURNING id, product_id, quantity, order_date
        "#,
    )
    .bind(product_id)
    .bind(quantity)
    .fetch_one(conn)
    .await
}

/// Back-office listing, newest order first
pub async fn list_orders(pool: &PgPool) -> Result<Vec<OrderSummary>, sqlx::Error> {
    sqlx::query_as::<_, OrderSummary>(
        r#"
        SELECT o.id, o.product_id, o.quantity, o.order_date,
               p.name AS product_name, p.price, p.image_url
        FROM orders o
        JOIN products p ON o.product_id = p.id
        ORDER BY o.id DESC
        "#,
    )
    .fetch_all(pool)
    .await
}
