//! Numeric-or-currency recognition for the sort tie-break

use once_cell::sync::Lazy;
use regex::Regex;

/// Optional leading "$", digit groups optionally comma-separated, optional
/// two-digit fractional part
static CURRENCY_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\$?\d{1,3}(,\d{3})*(\.\d{2})?$|^\$?\d+(\.\d{2})?$").unwrap());

/// Parse a value for numeric tie-breaking
///
/// Accepts currency-style strings ("$1,500.00", "1,500", "$500") and any
/// plain finite decimal ("42", "-3.5"). Returns `None` for anything else,
/// in which case the caller falls back to lexical comparison.
pub fn parse_numeric(value: &str) -> Option<f64> {
    let trimmed = value.trim();

    if CURRENCY_PATTERN.is_match(trimmed) {
        let cleaned: String = trimmed
            .chars()
            .filter(|c| *c != '$' && *c != ',')
            .collect();
        return cleaned.parse::<f64>().ok().filter(|n| n.is_finite());
    }

    trimmed.parse::<f64>().ok().filter(|n| n.is_finite())
}
