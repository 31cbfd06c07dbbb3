//! Product list as JSON, consumed by `public/index.js`

use axum::{
    Json, Router,
    extract::State,
    response::{IntoResponse, Response},
    routing::get,
};
use serde_json::json;
use shared::error::AppError;

use crate::db::product as product_db;
use crate::error::ServiceError;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/api/products/list", get(list))
}

/// GET /api/products/list - `{"products": {"rows": [...]}}` or `{"error": "...", "code": n}`
async fn list(State(state): State<AppState>) -> Response {
    match product_db::list_products(&state.pool).await {
        Ok(rows) => Json(json!({ "products": { "rows": rows } })).into_response(),
        Err(e) => AppError::from(ServiceError::from(e)).into_response(),
    }
}
