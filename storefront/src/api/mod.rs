//! HTTP routes
//!
//! Each module exposes a `router()`; [`build_router`] merges them and
//! [`build_app`] adds the middleware stack and state.

pub mod admin;
pub mod catalog;
pub mod health;
pub mod order;
pub mod shop;

use axum::Router;
use axum::middleware as axum_middleware;
use http::{HeaderName, HeaderValue, StatusCode};
use tower_http::compression::CompressionLayer;
use tower_http::request_id::{MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer};
use tower_http::services::ServeDir;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::error::ServiceError;
use crate::middleware;
use crate::state::AppState;

const REQUEST_ID_HEADER: &str = "x-request-id";

#[derive(Clone)]
struct XRequestId;

impl MakeRequestId for XRequestId {
    fn make_request_id<B>(&mut self, _request: &http::Request<B>) -> Option<RequestId> {
        HeaderValue::from_str(&Uuid::new_v4().to_string())
            .ok()
            .map(RequestId::new)
    }
}

/// Every route, without middleware or state
pub fn build_router() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .merge(catalog::router())
        .merge(order::router())
        .merge(admin::router())
        // `/{id}` catches any single segment, so it goes last
        .merge(shop::router())
}

/// Fully configured application: routes, static files, middleware, state
pub fn build_app(state: AppState) -> Router {
    let request_id = HeaderName::from_static(REQUEST_ID_HEADER);

    build_router()
        .nest_service("/static", ServeDir::new(&state.public_dir))
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(state.request_timeout))
        // Request logging sees the id set below
        .layer(axum_middleware::from_fn(middleware::logging_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::new(request_id.clone()))
        .layer(SetRequestIdLayer::new(request_id, XRequestId))
        .with_state(state)
}

/// Ids arrive as raw path or query text; anything that is not an integer
/// cannot name a row.
pub(crate) fn parse_id(raw: &str) -> Option<i64> {
    raw.trim().parse().ok()
}

/// Status and message for a failure rendered into an HTML page
pub(crate) fn page_error(err: ServiceError) -> (StatusCode, String) {
    let app: shared::error::AppError = err.into();
    (app.http_status(), app.message)
}
