//! Input validation helpers
//!
//! Text length limits and the parsing rules for the admin product form.
//! Every check runs before any SQL is issued.

use rust_decimal::Decimal;
use shared::error::{AppError, ErrorCode};
use shared::models::ProductInput;

// ── Text length limits ──────────────────────────────────────────────

/// Product names
pub const MAX_NAME_LEN: usize = 200;

/// Product descriptions
pub const MAX_NOTE_LEN: usize = 500;

/// Image URLs
pub const MAX_URL_LEN: usize = 2048;

// ── Price column limits: NUMERIC(12,2) ─────────────────────────────

/// Digits after the decimal point
pub const PRICE_SCALE: u32 = 2;

/// Smallest price that no longer fits ten integer digits
// 10_000_000_000 (= 2 * 2^32 + 0x540B_E400); `Decimal::new` is not const.
const PRICE_LIMIT: Decimal = Decimal::from_parts(0x540B_E400, 2, 0, false, 0);

// ── Validation helpers ──────────────────────────────────────────────

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{field} must not be empty")));
    }
    let len = value.chars().count();
    if len > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({len} chars, max {max_len})"
        )));
    }
    Ok(())
}

/// Validate that an optional string, if present, is within the length limit.
pub fn validate_optional_text(
    value: &Option<String>,
    field: &str,
    max_len: usize,
) -> Result<(), AppError> {
    if let Some(v) = value {
        let len = v.chars().count();
        if len > max_len {
            return Err(AppError::validation(format!(
                "{field} is too long ({len} chars, max {max_len})"
            )));
        }
    }
    Ok(())
}

// ── Form fields ─────────────────────────────────────────────────────

/// An empty form field means NULL
pub fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Blank is no price; otherwise a non-negative decimal that fits the
/// price column without rounding
pub fn parse_price(value: &str) -> Result<Option<Decimal>, AppError> {
    let Some(raw) = non_empty(value) else {
        return Ok(None);
    };
    let price: Decimal = raw
        .parse()
        .map_err(|_| AppError::validation(format!("price must be a number, got {raw:?}")))?;
    if price.is_sign_negative() && !price.is_zero() {
        return Err(invalid_price("price must not be negative"));
    }
    if price.normalize().scale() > PRICE_SCALE {
        return Err(invalid_price(format!(
            "price must have at most {PRICE_SCALE} decimal places, got {raw:?}"
        )));
    }
    if price >= PRICE_LIMIT {
        return Err(invalid_price(format!(
            "price must be less than {PRICE_LIMIT}, got {raw:?}"
        )));
    }
    Ok(Some(price))
}

fn invalid_price(message: impl Into<String>) -> AppError {
    AppError::with_message(ErrorCode::ProductInvalidPrice, message)
}

/// Blank stores 0; otherwise a non-negative integer
pub fn parse_stock(value: &str) -> Result<Option<i32>, AppError> {
    let Some(raw) = non_empty(value) else {
        return Ok(None);
    };
    let stock: i32 = raw
        .parse()
        .map_err(|_| AppError::validation(format!("stock must be a whole number, got {raw:?}")))?;
    if stock < 0 {
        return Err(AppError::validation("stock must not be negative"));
    }
    Ok(Some(stock))
}

/// Turn raw form values into a validated product payload
pub fn product_input(
    name: &str,
    price: &str,
    image_url: &str,
    stock: &str,
    description: &str,
) -> Result<ProductInput, AppError> {
    validate_required_text(name, "name", MAX_NAME_LEN)?;

    let input = ProductInput {
        name: name.trim().to_string(),
        price: parse_price(price)?,
        image_url: non_empty(image_url),
        stock: parse_stock(stock)?,
        description: non_empty(description),
    };

    validate_optional_text(&input.image_url, "image_url", MAX_URL_LEN)?;
    validate_optional_text(&input.description, "description", MAX_NOTE_LEN)?;
    Ok(input)
}
