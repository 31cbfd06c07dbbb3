//! Server-side HTML rendering
//!
//! Plain functions returning markup. Every interpolated value goes through
//! [`escape_html`]; pages share [`layout`].

pub mod admin;
pub mod shop;

use std::fmt::Write;

use axum::response::Html;
use rust_decimal::Decimal;

/// Escape text for HTML element content and quoted attribute values
pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Wrap a page body in the shared document shell
pub fn layout(title: &str, body: &str) -> Html<String> {
    let mut page = String::with_capacity(body.len() + 512);
    let _ = write!(
        page,
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
<link rel="stylesheet" href="/static/style.css">
</head>
<body>
<header class="site-header">
<a href="/" class="brand">Storefront</a>
<nav><a href="/admin/products">Products</a> <a href="/admin/orders">Orders</a></nav>
</header>
<main>
{body}
</main>
</body>
</html>
"#,
        title = escape_html(title),
    );
    Html(page)
}

/// Inline error banner, empty when there is nothing to report
pub fn error_banner(message: Option<&str>) -> String {
    match message {
        Some(msg) if !msg.is_empty() => {
            format!(r#"<p class="error" id="errorMessage">{}</p>"#, escape_html(msg))
        }
        _ => r#"<p class="error" id="errorMessage"></p>"#.to_string(),
    }
}

/// Standalone failure page with a way back
pub fn error_page(label: &str, message: &str, back_href: &str) -> Html<String> {
    let body = format!(
        r#"<section class="failure">
<h1>{label}</h1>
<p class="error">{message}</p>
<p><a href="{back}">Go back</a></p>
</section>"#,
        label = escape_html(label),
        message = escape_html(message),
        back = escape_html(back_href),
    );
    layout(label, &body)
}

/// Display price, tax included
pub fn format_price(price: Option<Decimal>) -> String {
    match price {
        Some(p) => format!("¥{} (tax incl.)", p.normalize()),
        None => "Price on request".to_string(),
    }
}
