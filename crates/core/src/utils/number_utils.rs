//! Lenient number parsing for operator-entered form fields.

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use std::str::FromStr;

/// Parses text the way a browser number input coerces it.
///
/// Surrounding whitespace is ignored and an empty string is zero. Hex, octal
/// and binary literals are accepted without a sign, and `Infinity` is
/// accepted with an optional sign. Returns `None` where the coercion would
/// produce NaN.
pub fn parse_js_number(raw: &str) -> Option<f64> {
    let text = raw.trim();
    if text.is_empty() {
        return Some(0.0);
    }

    for (prefix, radix) in [("0x", 16), ("0X", 16), ("0o", 8), ("0O", 8), ("0b", 2), ("0B", 2)] {
        if let Some(digits) = text.strip_prefix(prefix) {
            return u64::from_str_radix(digits, radix).ok().map(|v| v as f64);
        }
    }

    let unsigned = text.trim_start_matches(['+', '-']);
    if text.len() - unsigned.len() > 1 {
        return None;
    }
    if unsigned == "Infinity" {
        return Some(if text.starts_with('-') {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        });
    }
    // Rust also accepts "inf" and "nan", which a browser does not.
    if !unsigned.starts_with(|c: char| c.is_ascii_digit() || c == '.') {
        return None;
    }

    text.parse::<f64>().ok()
}

/// Parses operator text into a decimal amount.
///
/// Plain decimal notation is parsed exactly. Anything else a browser would
/// still accept (exponents, hex) goes through `f64`. Infinite values have no
/// decimal form and yield `None`.
pub fn parse_decimal(raw: &str) -> Option<Decimal> {
    let text = raw.trim();
    if text.is_empty() {
        return None;
    }
    let approx = parse_js_number(text).filter(|v| v.is_finite())?;
    Decimal::from_str(text.trim_start_matches('+'))
        .ok()
        .or_else(|| Decimal::from_f64(approx))
}
