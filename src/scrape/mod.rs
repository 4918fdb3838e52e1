// src/scrape/mod.rs

//! Site-specific page parsing and API clients.
//!
//! Every provider field name and markup selector lives in this module.
//! Upstream markup or schema changes touch one file here; the pipeline and
//! service layers only see normalized models.

pub mod coursera;
pub mod edx;
pub mod linkedin;
pub mod udemy;

use scraper::Selector;
use serde_json::Value;

use crate::error::{AppError, Result};

/// Parse a CSS selector.
pub(crate) fn selector(s: &str) -> Result<Selector> {
    Selector::parse(s).map_err(|e| AppError::selector(s, format!("{e:?}")))
}

/// Read a provider numeric field that may arrive as a number or a
/// currency-formatted string. Anything else maps to `None`, never zero.
pub(crate) fn price_from_value(value: Option<&Value>) -> Option<f64> {
    match value? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => crate::utils::parse_price(s),
        _ => None,
    }
}

/// Read a provider field that should be a list of strings.
pub(crate) fn string_list(value: Option<Value>) -> Option<Vec<String>> {
    value.and_then(|v| serde_json::from_value(v).ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selector_valid() {
        assert!(selector("div.base-card").is_ok());
        assert!(selector("[[invalid").is_err());
    }

    #[test]
    fn test_price_from_value() {
        assert_eq!(price_from_value(Some(&serde_json::json!(19.99))), Some(19.99));
        assert_eq!(
            price_from_value(Some(&serde_json::json!("R$ 79,90"))),
            Some(79.90)
        );
        assert_eq!(price_from_value(Some(&serde_json::json!(null))), None);
        assert_eq!(price_from_value(None), None);
    }
}
