use axum::{Router, extract::State, response::Html, routing::get};
use http::StatusCode;

use crate::api::page_error;
use crate::db::order as order_db;
use crate::state::AppState;
use crate::views::admin as view;

pub fn router() -> Router<AppState> {
    Router::new().route("/admin/orders", get(list))
}

/// GET /admin/orders - every order with its product, newest first
async fn list(State(state): State<AppState>) -> (StatusCode, Html<String>) {
    match order_db::list_orders(&state.pool).await {
        Ok(orders) => (StatusCode::OK, view::order_list(&orders, None)),
        Err(e) => {
            let (status, message) = page_error(e.into());
            (status, view::order_list(&[], Some(&message)))
        }
    }
}
