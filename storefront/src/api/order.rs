//! Order placement routes
//!
//! - POST /order: browser form, one unit by default, POST-redirect-GET
//! - GET /order/complete: confirmation page
//! - POST /api/orders: JSON variant returning the created order

use axum::{
    Form, Json, Router,
    extract::{Query, State, rejection::JsonRejection},
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
};
use http::StatusCode;
use serde::Deserialize;
use serde_json::json;
use shared::error::{AppError, ErrorCode};
use shared::models::OrderRequest;

use super::parse_id;
use crate::checkout;
use crate::state::AppState;
use crate::views;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/order", post(place_order_form))
        .route("/order/complete", get(order_complete))
        .route("/api/orders", post(place_order_json))
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct OrderForm {
    product_id: String,
    quantity: String,
}

/// POST /order
async fn place_order_form(State(state): State<AppState>, Form(form): Form<OrderForm>) -> Response {
    let Some(product_id) = parse_id(&form.product_id) else {
        let err = AppError::new(ErrorCode::ProductNotFound);
        return order_failed(err, "/");
    };
    let back = format!("/{product_id}");

    let quantity = match form.quantity.trim() {
        "" => 1,
        raw => match raw.parse::<i32>() {
            Ok(q) => q,
            Err(_) => {
                let err = AppError::with_message(
                    ErrorCode::OrderInvalidQuantity,
                    format!("Quantity must be a positive integer, got {raw:?}"),
                );
                return order_failed(err, &back);
            }
        },
    };

    let request = OrderRequest {
        product_id,
        quantity,
    };
    match checkout::place_order(state.orders.as_ref(), request).await {
        Ok(order) => Redirect::to(&format!("/order/complete?order_id={}", order.id)).into_response(),
        Err(e) => order_failed(e.into(), &back),
    }
}

fn order_failed(err: AppError, back: &str) -> Response {
    let status = err.http_status();
    (status, views::error_page("Order failed", &err.message, back)).into_response()
}

#[derive(Debug, Deserialize)]
struct CompleteQuery {
    order_id: Option<i64>,
}

/// GET /order/complete
async fn order_complete(Query(query): Query<CompleteQuery>) -> Html<String> {
    views::shop::order_complete(query.order_id)
}

/// POST /api/orders
///
/// `201 {"order": {...}}` on success, `{"error": "...", "code": n}` otherwise.
async fn place_order_json(
    State(state): State<AppState>,
    payload: Result<Json<OrderRequest>, JsonRejection>,
) -> Response {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            return AppError::invalid_request(rejection.body_text()).into_response();
        }
    };

    match checkout::place_order(state.orders.as_ref(), request).await {
        Ok(order) => (StatusCode::CREATED, Json(json!({ "order": order }))).into_response(),
        Err(e) => AppError::from(e).into_response(),
    }
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use http::{Request, StatusCode, header};
    use serde_json::Value;

    use crate::api::test_support::*;
    use crate::checkout::MemoryOrderStore;

    fn json_post(body: &str) -> Request<Body> {
        Request::post("/api/orders")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_form_order_redirects_to_confirmation() {
        let store = MemoryOrderStore::new();
        store.insert_product(7, "Tea", 5).await;

        let response = send(app_with(store.clone()), form("/order", "product_id=7")).await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            response.headers()[header::LOCATION],
            "/order/complete?order_id=1"
        );
        assert_eq!(store.product(7).await.unwrap().stock, 4);
        assert_eq!(store.orders().await.len(), 1);
    }

    #[tokio::test]
    async fn test_form_order_for_missing_product_shows_back_link() {
        let store = MemoryOrderStore::new();

        let response = send(app_with(store.clone()), form("/order", "product_id=99&quantity=1")).await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let page = body_text(response).await;
        assert!(page.contains("Product 99 not found"));
        assert!(page.contains(r#"href="/99""#));
        assert!(store.orders().await.is_empty());
    }

    #[tokio::test]
    async fn test_form_order_with_bad_quantity() {
        let store = MemoryOrderStore::new();
        store.insert_product(7, "Tea", 5).await;

        let response = send(app_with(store.clone()), form("/order", "product_id=7&quantity=0")).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(store.product(7).await.unwrap().stock, 5);
    }

    #[tokio::test]
    async fn test_json_order_created() {
        let store = MemoryOrderStore::new();
        store.insert_product(7, "Tea", 5).await;

        let response = send(
            app_with(store.clone()),
            json_post(r#"{"product_id":7,"quantity":2}"#),
        )
        .await;

        assert_eq!(response.status(), StatusCode::CREATED);
        let body: Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(body["order"]["product_id"], 7);
        assert_eq!(body["order"]["quantity"], 2);
        assert_eq!(store.product(7).await.unwrap().stock, 3);
    }

    #[tokio::test]
    async fn test_json_order_out_of_stock() {
        let store = MemoryOrderStore::new();
        store.insert_product(7, "Tea", 1).await;

        let response = send(
            app_with(store.clone()),
            json_post(r#"{"product_id":7,"quantity":2}"#),
        )
        .await;

        assert_eq!(response.status(), StatusCode::CONFLICT);
        let body: Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(body["code"], 6003);
        assert!(body["error"].as_str().unwrap().contains("Insufficient stock"));
    }

    #[tokio::test]
    async fn test_json_order_store_failure_is_verbatim() {
        let store = MemoryOrderStore::new();
        store.insert_product(7, "Tea", 5).await;
        store.fail_next_insert("canceling statement due to lock timeout");

        let response = send(app_with(store.clone()), json_post(r#"{"product_id":7}"#)).await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body: Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(body["error"], "canceling statement due to lock timeout");
        assert_eq!(body["code"], 9002);
        assert_eq!(store.product(7).await.unwrap().stock, 5);
    }

    #[tokio::test]
    async fn test_json_order_malformed_body() {
        let response = send(app_with(MemoryOrderStore::new()), json_post("{")).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(body["code"], 5);
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn test_confirmation_page() {
        let response = send(
            app_with(MemoryOrderStore::new()),
            get("/order/complete?order_id=12"),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_text(response).await.contains("#12"));
    }
}
