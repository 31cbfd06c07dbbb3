//! Back-office pages

use std::fmt::Write;

use axum::response::Html;
use serde::Deserialize;
use shared::error::AppError;
use shared::models::{OrderSummary, Product, ProductInput};

use super::{error_banner, escape_html, format_price, layout};
use crate::validation;

/// Raw product form values, as submitted and as re-rendered after an error
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ProductForm {
    pub name: String,
    pub price: String,
    pub image_url: String,
    pub stock: String,
    pub description: String,
}

impl ProductForm {
    /// Validate and convert; empty optional fields become NULL
    pub fn to_input(&self) -> Result<ProductInput, AppError> {
        validation::product_input(
            &self.name,
            &self.price,
            &self.image_url,
            &self.stock,
            &self.description,
        )
    }
}

impl From<&Product> for ProductForm {
    fn from(p: &Product) -> Self {
        Self {
            name: p.name.clone(),
            price: p.price.map(|d| d.to_string()).unwrap_or_default(),
            image_url: p.image_url.clone().unwrap_or_default(),
            stock: p.stock.to_string(),
            description: p.description.clone().unwrap_or_default(),
        }
    }
}

pub fn product_list(products: &[Product], error: Option<&str>) -> Html<String> {
    let mut rows = String::new();
    for p in products {
        let _ = write!(
            rows,
            r#"<tr>
<td>{id}</td>
<td>{name}</td>
<td>{price}</td>
<td>{stock}</td>
<td class="actions">
<a href="/admin/products/edit/{id}">Edit</a>
<form action="/admin/products/delete/{id}" method="post" class="inline"><button type="submit">Delete</button></form>
</td>
</tr>
"#,
            id = p.id,
            name = escape_html(&p.name),
            price = escape_html(&format_price(p.price)),
            stock = p.stock,
        );
    }

    let body = format!(
        r#"<h1>Products</h1>
{error}
<p><a href="/admin/products/new" class="button">New product</a></p>
<table class="admin-table">
<thead><tr><th>ID</th><th>Name</th><th>Price</th><th>Stock</th><th></th></tr></thead>
<tbody>
{rows}</tbody>
</table>"#,
        error = error_banner(error),
    );
    layout("Admin: products", &body)
}

/// Create form when `product_id` is `None`, edit form otherwise
pub fn product_form(product_id: Option<i64>, values: &ProductForm, error: Option<&str>) -> Html<String> {
    let (title, action) = match product_id {
        Some(id) => ("Edit product".to_string(), format!("/admin/products/update/{id}")),
        None => ("New product".to_string(), "/admin/products/create".to_string()),
    };

    let body = format!(
        r#"<h1>{title}</h1>
{error}
<form action="{action}" method="post" class="product-form">
<label>Name <input type="text" name="name" value="{name}" required maxlength="{name_max}"></label>
<label>Price <input type="text" name="price" value="{price}" inputmode="decimal"></label>
<label>Image URL <input type="text" name="image_url" value="{image_url}" maxlength="{url_max}"></label>
<label>Stock <input type="number" name="stock" value="{stock}" min="0"></label>
<label>Description <textarea name="description" maxlength="{note_max}">{description}</textarea></label>
<button type="submit">Save</button>
</form>
<p><a href="/admin/products">Back to products</a></p>"#,
        title = title,
        error = error_banner(error),
        action = escape_html(&action),
        name = escape_html(&values.name),
        name_max = validation::MAX_NAME_LEN,
        price = escape_html(&values.price),
        image_url = escape_html(&values.image_url),
        url_max = validation::MAX_URL_LEN,
        stock = escape_html(&values.stock),
        description = escape_html(&values.description),
        note_max = validation::MAX_NOTE_LEN,
    );
    layout(&title, &body)
}

/// Edit page for an id that could not be loaded
pub fn product_missing(error: &str) -> Html<String> {
    let body = format!(
        r#"<h1>Edit product</h1>
{}
<p><a href="/admin/products">Back to products</a></p>"#,
        error_banner(Some(error))
    );
    layout("Edit product", &body)
}

/// Orders joined with their product, newest first
pub fn order_list(orders: &[OrderSummary], error: Option<&str>) -> Html<String> {
    let mut rows = String::new();
    for o in orders {
        let total = o
            .total()
            .map(|t| format_price(Some(t)))
            .unwrap_or_default();
        let _ = write!(
            rows,
            r#"<tr>
<td>{id}</td>
<td>{date}</td>
<td><a href="/{product_id}">{name}</a></td>
<td>{price}</td>
<td>{quantity}</td>
<td>{total}</td>
</tr>
"#,
            id = o.id,
            date = o.order_date.format("%Y-%m-%d %H:%M:%S UTC"),
            product_id = o.product_id,
            name = escape_html(&o.product_name),
            price = escape_html(&format_price(o.price)),
            quantity = o.quantity,
            total = escape_html(&total),
        );
    }

    let body = format!(
        r#"<h1>Orders</h1>
{error}
<table class="admin-table">
<thead><tr><th>ID</th><th>Date</th><th>Product</th><th>Price</th><th>Qty</th><th>Total</th></tr></thead>
<tbody>
{rows}</tbody>
</table>"#,
        error = error_banner(error),
    );
    layout("Admin: orders", &body)
}
