//! Back-office routes (no authentication)

mod orders;
mod products;

use axum::Router;

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().merge(products::router()).merge(orders::router())
}
