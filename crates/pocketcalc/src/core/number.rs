//! Text <-> number conversion for the calculator display
//!
//! The display is text, not a number. These helpers define the two
//! conversions the state machine relies on: a permissive prefix parse and the
//! canonical shortest round-trip rendering of an `f64`.

/// Magnitude at and above which numbers render in exponent form.
const EXPONENT_UPPER: f64 = 1e21;
/// Magnitude below which (non-zero) numbers render in exponent form.
const EXPONENT_LOWER: f64 = 1e-6;

/// Parses display text into a number.
///
/// Leading whitespace is skipped. Accepts an optional sign, `Infinity`, and
/// the longest prefix of the form `digits[.digits][e[+-]digits]`. Text with
/// no numeric prefix yields `NaN`. Never fails.
#[must_use]
pub fn parse_display(text: &str) -> f64 {
    let trimmed = text.trim_start();
    let (sign, body) = match trimmed.as_bytes().first() {
        Some(b'-') => (-1.0, &trimmed[1..]),
        Some(b'+') => (1.0, &trimmed[1..]),
        _ => (1.0, trimmed),
    };

    if body.starts_with("Infinity") {
        return sign * f64::INFINITY;
    }

    let end = numeric_prefix_len(body.as_bytes());
    if end == 0 {
        return f64::NAN;
    }

    body[..end].parse::<f64>().map_or(f64::NAN, |v| sign * v)
}

/// Length of the longest parseable unsigned decimal prefix, or 0.
fn numeric_prefix_len(bytes: &[u8]) -> usize {
    let digits_from = |mut i: usize| {
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        i
    };

    let int_end = digits_from(0);
    let mut end = int_end;
    let mut mantissa_digits = int_end;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_end = digits_from(end + 1);
        mantissa_digits += frac_end - (end + 1);
        end = frac_end;
    }

    if mantissa_digits == 0 {
        return 0;
    }

    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_start = end + 1;
        if exp_start < bytes.len() && matches!(bytes[exp_start], b'+' | b'-') {
            exp_start += 1;
        }
        let exp_end = digits_from(exp_start);
        if exp_end > exp_start {
            end = exp_end;
        }
    }

    end
}

/// Renders a number the way the display shows it.
///
/// Integers have no fraction (`8`), fractions use the shortest round-trip
/// digits (`0.30000000000000004`), very large or very small magnitudes use
/// exponent form (`1e+21`, `1.5e-7`), and non-finite values render as
/// `Infinity`, `-Infinity` or `NaN`. Negative zero renders as `0`.
#[must_use]
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        return "NaN".to_string();
    }
    if n.is_infinite() {
        return if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if n == 0.0 {
        return "0".to_string();
    }

    let magnitude = n.abs();
    if (EXPONENT_LOWER..EXPONENT_UPPER).contains(&magnitude) {
        return n.to_string();
    }

    let exp_form = format!("{n:e}");
    match exp_form.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{mantissa}e+{exponent}")
        }
        _ => exp_form,
    }
}

/// Serde adapter storing an optional number as its display text.
///
/// JSON has no encoding for `Infinity` or `NaN`; storing text keeps an
/// accumulator such as `5 ÷ 0` intact across a save and load.
pub(crate) mod optional_number_text {
    use super::{format_number, parse_display};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &Option<f64>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(v) => serializer.serialize_some(&format_number(*v)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text: Option<String> = Option::deserialize(deserializer)?;
        Ok(text.map(|t| parse_display(&t)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    // ===== parse_display =====

    #[test]
    fn test_parse_integer() {
        assert_eq!(parse_display("123"), 123.0);
    }

    #[test]
    fn test_parse_trailing_decimal_point() {
        assert_eq!(parse_display("3."), 3.0);
        assert_eq!(parse_display("0."), 0.0);
    }

    #[test]
    fn test_parse_negative() {
        assert_eq!(parse_display("-4.5"), -4.5);
    }

    #[test]
    fn test_parse_leading_fraction() {
        assert_eq!(parse_display(".5"), 0.5);
    }

    #[test]
    fn test_parse_infinity() {
        assert_eq!(parse_display("Infinity"), f64::INFINITY);
        assert_eq!(parse_display("-Infinity"), f64::NEG_INFINITY);
    }

    #[test]
    fn test_parse_exponent() {
        assert_eq!(parse_display("1e+21"), 1e21);
        assert_eq!(parse_display("1.5e-7"), 1.5e-7);
    }

    #[test]
    fn test_parse_dangling_exponent_uses_mantissa() {
        assert_eq!(parse_display("1e"), 1.0);
        assert_eq!(parse_display("2e+"), 2.0);
    }

    #[test]
    fn test_parse_prefix_only() {
        assert_eq!(parse_display("12abc"), 12.0);
        assert_eq!(parse_display("  7"), 7.0);
    }

    #[test]
    fn test_parse_no_number_is_nan() {
        assert!(parse_display("").is_nan());
        assert!(parse_display("-").is_nan());
        assert!(parse_display(".").is_nan());
        assert!(parse_display("NaN").is_nan());
        assert!(parse_display("abc").is_nan());
    }

    // ===== format_number =====

    #[test]
    fn test_format_integer_has_no_fraction() {
        assert_eq!(format_number(8.0), "8");
        assert_eq!(format_number(-42.0), "-42");
    }

    #[test]
    fn test_format_fraction() {
        assert_eq!(format_number(0.5), "0.5");
        assert_eq!(format_number(3.25), "3.25");
    }

    #[test]
    fn test_format_keeps_long_mantissa() {
        assert_eq!(format_number(0.1 + 0.2), "0.30000000000000004");
    }

    #[test]
    fn test_format_zero_and_negative_zero() {
        assert_eq!(format_number(0.0), "0");
        assert_eq!(format_number(-0.0), "0");
    }

    #[test]
    fn test_format_non_finite() {
        assert_eq!(format_number(f64::INFINITY), "Infinity");
        assert_eq!(format_number(f64::NEG_INFINITY), "-Infinity");
        assert_eq!(format_number(f64::NAN), "NaN");
    }

    #[test]
    fn test_format_large_uses_signed_exponent() {
        assert_eq!(format_number(1e21), "1e+21");
        assert_eq!(format_number(-2.5e30), "-2.5e+30");
    }

    #[test]
    fn test_format_just_below_exponent_threshold() {
        assert_eq!(format_number(1e20), "100000000000000000000");
    }

    #[test]
    fn test_format_small_uses_exponent() {
        assert_eq!(format_number(1.5e-7), "1.5e-7");
        assert_eq!(format_number(0.000_001), "0.000001");
    }

    // ===== serde adapter =====

    #[derive(Debug, serde::Serialize, serde::Deserialize)]
    struct Holder {
        #[serde(with = "optional_number_text")]
        value: Option<f64>,
    }

    #[test]
    fn test_number_text_keeps_infinity() {
        let json = serde_json::to_string(&Holder {
            value: Some(f64::INFINITY),
        })
        .unwrap();
        assert_eq!(json, r#"{"value":"Infinity"}"#);
        let back: Holder = serde_json::from_str(&json).unwrap();
        assert_eq!(back.value, Some(f64::INFINITY));
    }

    #[test]
    fn test_number_text_none() {
        let json = serde_json::to_string(&Holder { value: None }).unwrap();
        assert_eq!(json, r#"{"value":null}"#);
        let back: Holder = serde_json::from_str(&json).unwrap();
        assert_eq!(back.value, None);
    }

    proptest! {
        #[test]
        fn prop_format_then_parse_is_lossless(
            n in any::<f64>().prop_filter("finite", |n| n.is_finite()),
        ) {
            let back = parse_display(&format_number(n));
            // -0 renders as "0"
            prop_assert!(back == n || (n == 0.0 && back == 0.0));
        }

        #[test]
        fn prop_parse_never_panics(s in ".{0,24}") {
            let _ = parse_display(&s);
        }
    }
}
