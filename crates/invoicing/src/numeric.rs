//! Lenient numeric handling for free-text edit cells.
//!
//! The edit surface hands us whatever text a cell contained when it lost
//! focus. Anything that is not a finite number degrades to `0.0`; this never
//! fails.

use serde::{Deserialize, Deserializer};

/// Parse cell text as a number, or `None` if it is not a finite number.
///
/// Surrounding whitespace is ignored and empty text counts as zero.
pub fn parse_numeric(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Some(0.0);
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parse cell text as a number, coercing malformed input to `0.0`.
pub fn parse_lenient(raw: &str) -> f64 {
    match parse_numeric(raw) {
        Some(value) => value,
        None => {
            tracing::debug!(raw, "malformed numeric input coerced to 0");
            0.0
        }
    }
}

/// Presentation rounding: two decimal places.
///
/// Only used at the display/rendering boundary; stored values keep full
/// precision.
pub fn format_amount(value: f64) -> String {
    // -0.0 would otherwise print as "-0.00".
    let value = if value == 0.0 { 0.0 } else { value };
    format!("{value:.2}")
}

/// Stored collections written by older clients carry numbers as JSON numbers,
/// as numeric strings (raw cell text), or as `null`.
pub(crate) fn deserialize_lenient<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
    }

    Ok(match Option::<Raw>::deserialize(deserializer)? {
        Some(Raw::Number(n)) if n.is_finite() => n,
        Some(Raw::Number(_)) => 0.0,
        Some(Raw::Text(text)) => parse_lenient(&text),
        None => 0.0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_and_padded_numbers() {
        assert_eq!(parse_lenient("12.5"), 12.5);
        assert_eq!(parse_lenient("  7 "), 7.0);
        assert_eq!(parse_lenient("-3"), -3.0);
        assert_eq!(parse_lenient(".5"), 0.5);
    }

    #[test]
    fn malformed_input_becomes_zero() {
        assert_eq!(parse_lenient("abc"), 0.0);
        assert_eq!(parse_lenient("1.2.3"), 0.0);
        assert_eq!(parse_lenient(""), 0.0);
        assert_eq!(parse_lenient("inf"), 0.0);
        assert_eq!(parse_lenient("NaN"), 0.0);
        assert_eq!(parse_numeric("abc"), None);
        assert_eq!(parse_numeric(""), Some(0.0));
    }

    #[test]
    fn formats_to_two_decimals() {
        assert_eq!(format_amount(18.9), "18.90");
        assert_eq!(format_amount(0.0), "0.00");
        assert_eq!(format_amount(-0.0), "0.00");
        assert_eq!(format_amount(2.0 / 3.0), "0.67");
        assert_eq!(format_amount(-12.345), "-12.35");
    }

    #[derive(Debug, Deserialize)]
    struct Cell {
        #[serde(default, deserialize_with = "deserialize_lenient")]
        value: f64,
    }

    #[test]
    fn deserializes_numbers_strings_and_nulls() {
        let cell: Cell = serde_json::from_str(r#"{"value": 4}"#).unwrap();
        assert_eq!(cell.value, 4.0);
        let cell: Cell = serde_json::from_str(r#"{"value": "2.5"}"#).unwrap();
        assert_eq!(cell.value, 2.5);
        let cell: Cell = serde_json::from_str(r#"{"value": "two"}"#).unwrap();
        assert_eq!(cell.value, 0.0);
        let cell: Cell = serde_json::from_str(r#"{"value": null}"#).unwrap();
        assert_eq!(cell.value, 0.0);
        let cell: Cell = serde_json::from_str(r#"{}"#).unwrap();
        assert_eq!(cell.value, 0.0);
    }
}
