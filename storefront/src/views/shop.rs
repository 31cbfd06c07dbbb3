//! Storefront pages

use std::fmt::Write;

use axum::response::Html;
use shared::models::Product;

use super::{error_banner, escape_html, format_price, layout};

fn image(product: &Product) -> String {
    match &product.image_url {
        Some(url) => format!(
            r#"<img src="{}" alt="{}">"#,
            escape_html(url),
            escape_html(&product.name)
        ),
        None => r#"<div class="no-image"></div>"#.to_string(),
    }
}

/// Product grid, newest first
pub fn index(products: &[Product], error: Option<&str>) -> Html<String> {
    let mut cards = String::new();
    for p in products {
        let _ = write!(
            cards,
            r#"<a href="/{id}" class="product-card">
{image}
<div class="product-info"><h2>{name}</h2><p>{price}</p></div>
</a>
"#,
            id = p.id,
            image = image(p),
            name = escape_html(&p.name),
            price = escape_html(&format_price(p.price)),
        );
    }

    let body = format!(
        r#"<h1>Products</h1>
{error}
<div id="products" class="product-grid">
{cards}</div>
<script src="/static/index.js" defer></script>"#,
        error = error_banner(error),
    );
    layout("Products", &body)
}

/// Product detail with the order form. `product` is `None` when the lookup failed.
pub fn detail(product: Option<&Product>, error: Option<&str>) -> Html<String> {
    let Some(p) = product else {
        let body = format!(
            r#"{}
<p><a href="/">Back to products</a></p>"#,
            error_banner(error)
        );
        return layout("Product", &body);
    };

    let order_form = if p.in_stock() {
        format!(
            r#"<form action="/order" method="post" class="order-form">
<input type="hidden" name="product_id" value="{id}">
<label>Quantity <input type="number" name="quantity" value="1" min="1" max="{stock}"></label>
<button type="submit">Buy now</button>
</form>"#,
            id = p.id,
            stock = p.stock,
        )
    } else {
        r#"<p class="sold-out">Sold out</p>"#.to_string()
    };

    let body = format!(
        r#"{error}
<article class="product-detail">
{image}
<div class="product-info">
<h1>{name}</h1>
<p class="price">{price}</p>
<p class="stock">In stock: {stock}</p>
<p class="description">{description}</p>
{order_form}
</div>
</article>
<p><a href="/">Back to products</a></p>"#,
        error = error_banner(error),
        image = image(p),
        name = escape_html(&p.name),
        price = escape_html(&format_price(p.price)),
        stock = p.stock,
        description = escape_html(p.description.as_deref().unwrap_or("")),
    );
    layout(&p.name, &body)
}

/// Shown after the order redirect
pub fn order_complete(order_id: Option<i64>) -> Html<String> {
    let reference = match order_id {
        Some(id) => format!("<p>Your order number is <strong>#{id}</strong>.</p>"),
        None => String::new(),
    };
    let body = format!(
        r#"<section class="order-complete">
<h1>Thank you for your order</h1>
{reference}
<p><a href="/">Continue shopping</a></p>
</section>"#
    );
    layout("Order complete", &body)
}
