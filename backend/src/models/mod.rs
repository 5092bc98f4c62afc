//! Typed records parsed out of the loosely-typed stored documents.
//!
//! Every field access against raw JSON happens here, with explicit
//! defaults, so nothing downstream ever touches an untyped document.

pub mod brand;
pub mod car;
pub mod rental;
pub mod site_config;

pub use brand::Brand;
pub use car::Car;
pub use rental::Rental;
pub use site_config::SiteConfig;

use rust_decimal::Decimal;
use serde_json::Value;

pub(crate) fn str_field(fields: &Value, key: &str) -> String {
    fields
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

pub(crate) fn i32_field(fields: &Value, key: &str) -> i32 {
    i64_field(fields, key) as i32
}

pub(crate) fn i64_field(fields: &Value, key: &str) -> i64 {
    match fields.get(key) {
        Some(Value::Number(n)) => n.as_i64().unwrap_or_else(|| {
            n.as_f64().map(|f| f as i64).unwrap_or_default()
        }),
        Some(Value::String(s)) => s.trim().parse().unwrap_or_default(),
        _ => 0,
    }
}

/// Prices are stored as numbers but show up as strings in older documents.
pub(crate) fn decimal_field(fields: &Value, key: &str) -> Decimal {
    match fields.get(key) {
        Some(Value::Number(n)) => n.to_string().parse().unwrap_or_default(),
        Some(Value::String(s)) => s.trim().parse().unwrap_or_default(),
        _ => Decimal::ZERO,
    }
}

pub(crate) fn string_list_field(fields: &Value, key: &str) -> Vec<String> {
    fields
        .get(key)
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}
