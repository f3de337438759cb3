// In crates/core-types/src/coerce.rs

//! Lenient text-to-value coercion for loosely typed candle records.
//!
//! Nothing here fails. A value that cannot be read as a number becomes `NaN`
//! and a missing field reads as the text `"undefined"`, so one bad record
//! degrades its own bar instead of rejecting the batch.

use serde_json::Value;

/// Text used for a field that is not present on the record.
pub const MISSING_TEXT: &str = "undefined";

/// Reads the longest leading decimal number out of `text`.
///
/// Leading whitespace is skipped and trailing garbage is ignored, so
/// `"  12.5abc"` reads as `12.5`. A signed `Infinity` is accepted. Returns
/// `NaN` when no digits can be read.
pub fn parse_float(text: &str) -> f64 {
    let trimmed = text.trim_start_matches(|c: char| c.is_whitespace() || c == '\u{feff}');
    let bytes = trimmed.as_bytes();

    let mut end = 0;
    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end = 1;
    }

    if trimmed[end..].starts_with("Infinity") {
        return if bytes[0] == b'-' { f64::NEG_INFINITY } else { f64::INFINITY };
    }

    let int_digits = count_digits(&bytes[end..]);
    end += int_digits;

    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = count_digits(&bytes[end + 1..]);
        if int_digits > 0 || frac_digits > 0 {
            end += 1 + frac_digits;
        }
    }

    if int_digits == 0 && frac_digits == 0 {
        return f64::NAN;
    }

    // The exponent only counts when at least one digit follows it.
    if matches!(bytes.get(end), Some(b'e') | Some(b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+') | Some(b'-')) {
            exp_end += 1;
        }
        let exp_digits = count_digits(&bytes[exp_end.min(bytes.len())..]);
        if exp_digits > 0 {
            end = exp_end + exp_digits;
        }
    }

    trimmed[..end].parse().unwrap_or(f64::NAN)
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}

/// Coerces an optional field text into a number, `NaN` when absent.
pub fn coerce_number(text: Option<&str>) -> f64 {
    text.map_or(f64::NAN, parse_float)
}

/// Coerces an optional field text into an owned string.
pub fn coerce_text(text: Option<&str>) -> String {
    text.unwrap_or(MISSING_TEXT).to_string()
}

/// The textual form of a JSON value, matching how a dynamic language would
/// stringify it.
pub fn json_text(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::Null => String::new(),
                other => json_text(other),
            })
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => "[object Object]".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_plain_and_prefixed_numbers() {
        assert_eq!(parse_float("42"), 42.0);
        assert_eq!(parse_float("  -3.25"), -3.25);
        assert_eq!(parse_float("12.5abc"), 12.5);
        assert_eq!(parse_float(".5"), 0.5);
        assert_eq!(parse_float("5."), 5.0);
        assert_eq!(parse_float("+7"), 7.0);
        assert_eq!(parse_float("1e3"), 1000.0);
        assert_eq!(parse_float("1e"), 1.0);
        assert_eq!(parse_float("2E-2x"), 0.02);
        assert_eq!(parse_float("1.2.3"), 1.2);
    }

    #[test]
    fn reads_infinity() {
        assert_eq!(parse_float("Infinity"), f64::INFINITY);
        assert_eq!(parse_float("-Infinityish"), f64::NEG_INFINITY);
    }

    #[test]
    fn garbage_becomes_nan() {
        assert!(parse_float("").is_nan());
        assert!(parse_float("abc").is_nan());
        assert!(parse_float(".").is_nan());
        assert!(parse_float("-").is_nan());
        assert!(parse_float("null").is_nan());
        assert!(coerce_number(None).is_nan());
    }

    #[test]
    fn missing_text_is_undefined() {
        assert_eq!(coerce_text(None), "undefined");
        assert_eq!(coerce_text(Some("2022-08-01")), "2022-08-01");
    }

    #[test]
    fn json_values_stringify() {
        assert_eq!(json_text(&json!("0.351")), "0.351");
        assert_eq!(json_text(&json!(1660694400000u64)), "1660694400000");
        assert_eq!(json_text(&json!(true)), "true");
        assert_eq!(json_text(&json!(null)), "null");
        assert_eq!(json_text(&json!([1, null, "a"])), "1,,a");
        assert_eq!(json_text(&json!({"a": 1})), "[object Object]");
    }
}
