//! Product database operations

use shared::models::{Product, ProductInput};
use sqlx::PgPool;

/// Newest first, matching both the storefront grid and the admin table
pub async fn list_products(pool: &PgPool) -> Result<Vec<Product>, sqlx::Error> {
    sqlx::query_as::<_, Product>(
        r#"
        SELECT id, name, price, image_url, stock, description
        FROM products
        ORDER BY id DESC
        "#,
    )
    .fetch_all(pool)
    .await
}

pub async fn find_product(pool: &PgPool, id: i64) -> Result<Option<Product>, sqlx::Error> {
    sqlx::query_as::<_, Product>(
        "SELECT id, name, price, image_url, stock, description FROM products WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

/// Insert a product, returning its new id
pub async fn create_product(pool: &PgPool, data: &ProductInput) -> Result<i64, sqlx::Error> {
    let (id,): (i64,) = sqlx::query_as(
        r#"
        INSERT INTO products (name, price, image_url, stock, description)
        VALUES ($1, $2, $3, COALESCE($4, 0), $5)
        RETURNING id
        "#,
    )
    .bind(&data.name)
    .bind(data.price)
    .bind(&data.image_url)
    .bind(data.stock)
    .bind(&data.description)
    .fetch_one(pool)
    .await?;
    Ok(id)
}

/// Replace every column of a product. Returns `false` when no row matched.
pub async fn update_product(
    pool: &PgPool,
    id: i64,
    data: &ProductInput,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"
        UPDATE products
        SET name = $2, price = $3, image_url = $4, stock = COALESCE($5, 0), description = $6
        WHERE id = $1
        "#,
    )
    .bind(id)
    .bind(&data.name)
    .bind(data.price)
    .bind(&data.image_url)
    .bind(data.stock)
    .bind(&data.description)
    .execute(pool)
    .await?;
    Ok(result.rows_affected() > 0)
}

/// Delete a product. Fails with a foreign-key violation while orders reference it.
pub async fn delete_product(pool: &PgPool, id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM products WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
