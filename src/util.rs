// Utility helpers for parsing and display formatting.
//
// This module centralizes all the "dirty" JSON/number/date handling so the
// metrics code can assume typed values and only has to pick a fallback.
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use num_format::{Locale, ToFormattedString};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Parse a string-like value into `f64` while being forgiving about
/// formatting issues that are common in hand-entered amounts.
///
/// - Trims whitespace.
/// - Rejects values that contain alphabetic characters.
/// - Strips thousands separators like `","` before parsing.
/// - Returns `None` for anything that cannot be safely parsed.
pub fn parse_f64_safe(s: Option<&str>) -> Option<f64> {
    let s = s?.trim();
    if s.is_empty() {
        return None;
    }
    if s.chars().any(|c| c.is_ascii_alphabetic()) {
        return None;
    }
    let s = s.replace(",", "");
    s.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Coerce an arbitrary JSON value into a number. Numbers pass through,
/// numeric strings are parsed, everything else is `None`.
pub fn value_to_f64(v: &Value) -> Option<f64> {
    match v {
        Value::Number(n) => n.as_f64().filter(|f| f.is_finite()),
        Value::String(s) => parse_f64_safe(Some(s)),
        _ => None,
    }
}

/// Serde hook for numeric fields that may arrive as numbers, strings, `null`
/// or garbage. Never fails; unusable input becomes `None`.
pub fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let v = Option::<Value>::deserialize(deserializer)?;
    Ok(v.as_ref().and_then(value_to_f64))
}

/// Serde hook for text fields that sometimes arrive as numbers
/// (tower and flat numbers in particular).
pub fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let v = Option::<Value>::deserialize(deserializer)?;
    Ok(match v {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

/// Treat `None`, `""` and whitespace-only strings alike.
pub fn non_empty(s: &Option<String>) -> Option<&str> {
    s.as_deref().filter(|v| !v.trim().is_empty())
}

/// Lower-case and drop every whitespace character.
pub fn normalize_name(name: &str) -> String {
    name.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Contribution dates come either as plain `YYYY-MM-DD` or as full
/// RFC 3339 timestamps straight from the database.
pub fn parse_date_safe(s: Option<&str>) -> Option<NaiveDateTime> {
    let s = s?.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_utc());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt);
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

pub fn format_number(n: f64, decimals: usize) -> String {
    // Format a floating-point value with:
    // - a fixed number of decimal places, and
    // - locale-aware thousands separators (e.g., `1,234,567.89`).
    let neg = n.is_sign_negative() && n != 0.0;
    let abs_n = n.abs();
    let s = format!("{:.*}", decimals, abs_n);
    let mut parts = s.split('.');
    let int_part = parts.next().unwrap_or("0");
    let frac_part = parts.next();
    // Past i64 range, keep the digits without separators.
    let mut res = match int_part.parse::<i64>() {
        Ok(int_val) => int_val.to_formatted_string(&Locale::en),
        Err(_) => int_part.to_string(),
    };
    if let Some(frac) = frac_part {
        if decimals > 0 {
            res.push('.');
            res.push_str(frac);
        }
    } else if decimals > 0 {
        res.push('.');
        res.push_str(&"0".repeat(decimals));
    }
    if neg {
        format!("-{}", res)
    } else {
        res
    }
}

pub fn format_int<T>(n: T) -> String
where
    T: ToFormattedString,
{
    // Thin wrapper around `num-format` for counts in console messages
    // (e.g., `1,024 contributions loaded`).
    n.to_formatted_string(&Locale::en)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_forgiving_numbers() {
        assert_eq!(parse_f64_safe(Some(" 1,500.50 ")), Some(1500.5));
        assert_eq!(parse_f64_safe(Some("abc")), None);
        assert_eq!(parse_f64_safe(Some("")), None);
        assert_eq!(parse_f64_safe(None), None);
    }

    #[test]
    fn coerces_json_values() {
        assert_eq!(value_to_f64(&json!(250)), Some(250.0));
        assert_eq!(value_to_f64(&json!("250")), Some(250.0));
        assert_eq!(value_to_f64(&json!(null)), None);
        assert_eq!(value_to_f64(&json!({"amount": 1})), None);
    }

    #[test]
    fn normalizes_names() {
        assert_eq!(normalize_name(" Sam  Rao "), "samrao");
        assert_eq!(normalize_name("SAM\tRAO"), "samrao");
    }

    #[test]
    fn parses_both_date_shapes() {
        let d = parse_date_safe(Some("2024-03-01")).unwrap();
        assert_eq!(d.to_string(), "2024-03-01 00:00:00");
        let t = parse_date_safe(Some("2024-03-01T10:15:00.000Z")).unwrap();
        assert_eq!(t.to_string(), "2024-03-01 10:15:00");
        assert!(parse_date_safe(Some("yesterday")).is_none());
    }

    #[test]
    fn formats_with_separators() {
        assert_eq!(format_number(1234567.891, 2), "1,234,567.89");
        assert_eq!(format_number(-1500.0, 2), "-1,500.00");
        assert_eq!(format_number(0.0, 0), "0");
        assert_eq!(format_int(9855_i64), "9,855");
    }

    #[test]
    fn huge_values_keep_their_digits() {
        assert_eq!(format_number(1e19, 2), "10000000000000000000.00");
        assert_eq!(format_number(-1e19, 0), "-10000000000000000000");
    }
}
