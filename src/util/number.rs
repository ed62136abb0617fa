// Copyright 2024-2025 rotary-panel contributors
// This file is part of rotary-panel.
// rotary-panel is licensed under the AGPL-3.0 license (see LICENSE file for details).

//! Lenient number parsing for operator-typed form text.
//!
//! Both functions accept the longest numeric prefix after leading whitespace and ignore whatever
//! follows, so `"15deg"` reads as 15. This is how the controller's web form has always coerced
//! input, and operators rely on it.

/// Parse the longest decimal prefix of `text` as a float.
///
/// Accepts an optional sign, digits with an optional fraction, an optional exponent, and
/// `Infinity`. Returns `None` when no prefix is a number.
pub fn parse_float_prefix(text: &str) -> Option<f64> {
    let text = text.trim_start();
    let bytes = text.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }

    if text[end..].starts_with("Infinity") {
        let sign = if bytes.first() == Some(&b'-') { -1.0 } else { 1.0 };
        return Some(sign * f64::INFINITY);
    }

    let integer_digits = count_digits(&bytes[end..]);
    end += integer_digits;

    let mut fraction_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        fraction_digits = count_digits(&bytes[end + 1..]);
        if integer_digits > 0 || fraction_digits > 0 {
            end += 1 + fraction_digits;
        }
    }

    if integer_digits == 0 && fraction_digits == 0 {
        return None;
    }

    // an exponent only counts if it has at least one digit
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exponent_end = end + 1;
        if matches!(bytes.get(exponent_end), Some(b'+' | b'-')) {
            exponent_end += 1;
        }
        let exponent_digits = count_digits(&bytes[exponent_end.min(bytes.len())..]);
        if exponent_digits > 0 {
            end = exponent_end + exponent_digits;
        }
    }

    text[..end].parse::<f64>().ok()
}

/// Parse the longest base-10 integer prefix of `text`.
///
/// A fraction is truncated (`"12.7"` is 12). Returns `None` when there are no digits or the
/// value doesn't fit in an `i64`.
pub fn parse_int_prefix(text: &str) -> Option<i64> {
    let text = text.trim_start();
    let bytes = text.as_bytes();
    let sign_len = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let digits = count_digits(&bytes[sign_len..]);

    if digits == 0 {
        return None;
    }

    text[..sign_len + digits].parse::<i64>().ok()
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|byte| byte.is_ascii_digit()).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_floats() {
        assert_eq!(parse_float_prefix("15"), Some(15.0));
        assert_eq!(parse_float_prefix("-15.5"), Some(-15.5));
        assert_eq!(parse_float_prefix("+0.25"), Some(0.25));
        assert_eq!(parse_float_prefix(".5"), Some(0.5));
        assert_eq!(parse_float_prefix("5."), Some(5.0));
        assert_eq!(parse_float_prefix("1e3"), Some(1000.0));
        assert_eq!(parse_float_prefix("2.5E-1"), Some(0.25));
    }

    #[test]
    fn float_prefixes() {
        assert_eq!(parse_float_prefix("  36deg"), Some(36.0));
        assert_eq!(parse_float_prefix("1.2.3"), Some(1.2));
        assert_eq!(parse_float_prefix("4e"), Some(4.0));
        assert_eq!(parse_float_prefix("4e+"), Some(4.0));
        assert_eq!(parse_float_prefix("7-"), Some(7.0));
    }

    #[test]
    fn not_floats() {
        assert_eq!(parse_float_prefix(""), None);
        assert_eq!(parse_float_prefix("   "), None);
        assert_eq!(parse_float_prefix("abc"), None);
        assert_eq!(parse_float_prefix("-"), None);
        assert_eq!(parse_float_prefix("."), None);
        assert_eq!(parse_float_prefix("-.e5"), None);
        assert_eq!(parse_float_prefix("NaN"), None);
    }

    #[test]
    fn infinity() {
        assert_eq!(parse_float_prefix("Infinity"), Some(f64::INFINITY));
        assert_eq!(parse_float_prefix("-Infinityx"), Some(f64::NEG_INFINITY));
        assert_eq!(parse_float_prefix("inf"), None);
    }

    #[test]
    fn integers() {
        assert_eq!(parse_int_prefix("42"), Some(42));
        assert_eq!(parse_int_prefix("  -7"), Some(-7));
        assert_eq!(parse_int_prefix("12.7"), Some(12));
        assert_eq!(parse_int_prefix("100steps"), Some(100));
        assert_eq!(parse_int_prefix(".5"), None);
        assert_eq!(parse_int_prefix("+"), None);
        assert_eq!(parse_int_prefix(""), None);
        assert_eq!(parse_int_prefix("99999999999999999999"), None);
    }
}
