//! Storefront pages: product grid and product detail

use axum::{
    Router,
    extract::{Path, Query, State},
    response::Html,
    routing::get,
};
use http::StatusCode;
use serde::Deserialize;

use super::{page_error, parse_id};
use crate::db::product as product_db;
use crate::state::AppState;
use crate::views::shop as view;

pub const PRODUCT_NOT_FOUND: &str = "Product not found";

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .route("/details", get(details))
        .route("/{id}", get(show))
}

/// GET / - product grid, newest first
async fn index(State(state): State<AppState>) -> (StatusCode, Html<String>) {
    match product_db::list_products(&state.pool).await {
        Ok(products) => (StatusCode::OK, view::index(&products, None)),
        Err(e) => {
            let (status, message) = page_error(e.into());
            (status, view::index(&[], Some(&message)))
        }
    }
}

/// GET /{id}
async fn show(State(state): State<AppState>, Path(id): Path<String>) -> (StatusCode, Html<String>) {
    render_detail(&state, &id).await
}

#[derive(Debug, Deserialize)]
struct DetailsQuery {
    #[serde(default)]
    id: String,
}

/// GET /details?id= - same page, linked from the client-side grid
async fn details(
    State(state): State<AppState>,
    Query(query): Query<DetailsQuery>,
) -> (StatusCode, Html<String>) {
    render_detail(&state, &query.id).await
}

async fn render_detail(state: &AppState, raw_id: &str) -> (StatusCode, Html<String>) {
    let Some(id) = parse_id(raw_id) else {
        return (StatusCode::NOT_FOUND, view::detail(None, Some(PRODUCT_NOT_FOUND)));
    };

    match product_db::find_product(&state.pool, id).await {
        Ok(Some(product)) => (StatusCode::OK, view::detail(Some(&product), None)),
        Ok(None) => (StatusCode::NOT_FOUND, view::detail(None, Some(PRODUCT_NOT_FOUND))),
        Err(e) => {
            let (status, message) = page_error(e.into());
            (status, view::detail(None, Some(&message)))
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::api::test_support::*;
    use crate::checkout::MemoryOrderStore;
    use http::StatusCode;

    #[tokio::test]
    async fn test_non_numeric_id_is_not_found_without_store() {
        let response = send(app_with(MemoryOrderStore::new()), get("/favicon.ico")).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(body_text(response).await.contains("Product not found"));
    }

    #[tokio::test]
    async fn test_details_without_id_is_not_found() {
        let response = send(app_with(MemoryOrderStore::new()), get("/details")).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
