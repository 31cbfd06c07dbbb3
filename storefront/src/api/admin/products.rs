//! Product CRUD pages
//!
//! Failures are rendered inline on the page the admin was on; successful
//! writes redirect back to the product table.

use axum::{
    Form, Router,
    extract::{Path, State},
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
};
use http::StatusCode;
use shared::error::{AppError, ErrorCode};

use crate::api::shop::PRODUCT_NOT_FOUND;
use crate::api::{page_error, parse_id};
use crate::db;
use crate::db::product as product_db;
use crate::error::{ServiceError, ServiceResult};
use crate::state::AppState;
use crate::views::admin::{self as view, ProductForm};

const PRODUCTS_PATH: &str = "/admin/products";

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/admin/products", get(list))
        .route("/admin/products/new", get(new_form))
        .route("/admin/products/create", post(create))
        .route("/admin/products/edit/{id}", get(edit_form))
        .route("/admin/products/update/{id}", post(update))
        .route("/admin/products/delete/{id}", post(delete))
}

/// GET /admin/products
async fn list(State(state): State<AppState>) -> (StatusCode, Html<String>) {
    render_list(&state, StatusCode::OK, None).await
}

/// Product table with an optional banner. A failing reload replaces the banner.
async fn render_list(
    state: &AppState,
    status: StatusCode,
    error: Option<&str>,
) -> (StatusCode, Html<String>) {
    match product_db::list_products(&state.pool).await {
        Ok(products) => (status, view::product_list(&products, error)),
        Err(e) => {
            let (status, message) = page_error(e.into());
            (status, view::product_list(&[], Some(&message)))
        }
    }
}

/// GET /admin/products/new
async fn new_form() -> Html<String> {
    view::product_form(None, &ProductForm::default(), None)
}

/// POST /admin/products/create
async fn create(State(state): State<AppState>, Form(form): Form<ProductForm>) -> Response {
    match insert(&state, &form).await {
        Ok(id) => {
            tracing::info!(product_id = id, name = %form.name, "Product created");
            Redirect::to(PRODUCTS_PATH).into_response()
        }
        Err(e) => {
            let (status, message) = page_error(e);
            (status, view::product_form(None, &form, Some(&message))).into_response()
        }
    }
}

async fn insert(state: &AppState, form: &ProductForm) -> ServiceResult<i64> {
    let input = form.to_input()?;
    Ok(product_db::create_product(&state.pool, &input).await?)
}

/// GET /admin/products/edit/{id}
async fn edit_form(State(state): State<AppState>, Path(id): Path<String>) -> (StatusCode, Html<String>) {
    let Some(id) = parse_id(&id) else {
        return (StatusCode::NOT_FOUND, view::product_missing(PRODUCT_NOT_FOUND));
    };

    match product_db::find_product(&state.pool, id).await {
        Ok(Some(product)) => (
            StatusCode::OK,
            view::product_form(Some(id), &ProductForm::from(&product), None),
        ),
        Ok(None) => (StatusCode::NOT_FOUND, view::product_missing(PRODUCT_NOT_FOUND)),
        Err(e) => {
            let (status, message) = page_error(e.into());
            (status, view::product_missing(&message))
        }
    }
}

/// POST /admin/products/update/{id}
///
/// Replaces every column. On failure the form comes back with the values
/// exactly as submitted.
async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<ProductForm>,
) -> Response {
    let Some(id) = parse_id(&id) else {
        return (StatusCode::NOT_FOUND, view::product_missing(PRODUCT_NOT_FOUND)).into_response();
    };

    match replace(&state, id, &form).await {
        Ok(()) => {
            tracing::info!(product_id = id, "Product updated");
            Redirect::to(PRODUCTS_PATH).into_response()
        }
        Err(e) => {
            let (status, message) = page_error(e);
            (status, view::product_form(Some(id), &form, Some(&message))).into_response()
        }
    }
}

async fn replace(state: &AppState, id: i64, form: &ProductForm) -> ServiceResult<()> {
    let input = form.to_input()?;
    if product_db::update_product(&state.pool, id, &input).await? {
        Ok(())
    } else {
        Err(AppError::new(ErrorCode::ProductNotFound).into())
    }
}

/// POST /admin/products/delete/{id}
///
/// Refused while orders still reference the product.
async fn delete(State(state): State<AppState>, Path(raw_id): Path<String>) -> Response {
    let Some(id) = parse_id(&raw_id) else {
        return render_list(&state, StatusCode::NOT_FOUND, Some(PRODUCT_NOT_FOUND))
            .await
            .into_response();
    };

    match remove(&state, id).await {
        Ok(()) => {
            tracing::info!(product_id = id, "Product deleted");
            Redirect::to(PRODUCTS_PATH).into_response()
        }
        Err(e) => {
            let (status, message) = page_error(e);
            render_list(&state, status, Some(&message)).await.into_response()
        }
    }
}

async fn remove(state: &AppState, id: i64) -> ServiceResult<()> {
    match product_db::delete_product(&state.pool, id).await {
        Ok(true) => Ok(()),
        Ok(false) => Err(AppError::new(ErrorCode::ProductNotFound).into()),
        Err(e) if db::is_foreign_key_violation(&e) => Err(ServiceError::App(
            AppError::with_message(
                ErrorCode::ProductHasOrders,
                format!("Product {id} has orders and cannot be deleted"),
            )
            .with_detail("product_id", id),
        )),
        Err(e) => Err(e.into()),
    }
}
