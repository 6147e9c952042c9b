//! Field coercion for loosely-typed record fields.
//!
//! Rows come from a hosted store where any column may be missing, null or of
//! an unexpected JSON type. Decoding never fails on those columns: the lenient
//! deserializers below map anything unusable to "absent", and
//! [`coerce_number`] resolves "absent" to a documented per-field fallback.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Fallback for `qty`.
pub const DEFAULT_QTY: f64 = 1.0;

/// Fallback for hours, rates, costs and markup percentages.
pub const DEFAULT_AMOUNT: f64 = 0.0;

/// Returns `value` if it is a finite number, otherwise `fallback`.
///
/// Never yields NaN or an infinity as long as `fallback` is finite.
pub fn coerce_number(value: Option<f64>, fallback: f64) -> f64 {
    match value {
        Some(v) if v.is_finite() => v,
        _ => fallback,
    }
}

/// Clamp an overflowed product or sum to the nearest finite `f64`.
///
/// NaN (only reachable from `inf - inf`) becomes 0.
pub fn saturate(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(f64::MIN, f64::MAX)
    }
}

/// Decode any JSON value into `Some(f64)` only when it is a JSON number.
pub fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| v.as_f64()))
}

/// Only JSON `true` is true.
pub fn lenient_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(matches!(value, Some(Value::Bool(true))))
}

/// Integer sort key; finite floats truncate toward zero, anything else is 0.
pub fn lenient_sort_order<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    let Some(Value::Number(n)) = value else {
        return Ok(0);
    };
    if let Some(i) = n.as_i64() {
        return Ok(i);
    }
    Ok(n
        .as_f64()
        .filter(|f| f.is_finite())
        .map(|f| f.trunc() as i64)
        .unwrap_or(0))
}

/// Keep JSON strings, drop everything else.
pub fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => Some(s),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Row {
        #[serde(default, deserialize_with = "lenient_number")]
        n: Option<f64>,
        #[serde(default, deserialize_with = "lenient_flag")]
        flag: bool,
        #[serde(default, deserialize_with = "lenient_sort_order")]
        order: i64,
        #[serde(default, deserialize_with = "lenient_text")]
        text: Option<String>,
    }

    fn decode(json: &str) -> Row {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn coerce_returns_fallback_for_absent_and_non_finite() {
        assert_eq!(coerce_number(None, DEFAULT_QTY), 1.0);
        assert_eq!(coerce_number(Some(f64::NAN), 0.0), 0.0);
        assert_eq!(coerce_number(Some(f64::INFINITY), 7.0), 7.0);
        assert_eq!(coerce_number(Some(f64::NEG_INFINITY), 7.0), 7.0);
    }

    #[test]
    fn coerce_keeps_finite_values_including_negative_and_zero() {
        assert_eq!(coerce_number(Some(2.5), 1.0), 2.5);
        assert_eq!(coerce_number(Some(-10.0), 0.0), -10.0);
        assert_eq!(coerce_number(Some(0.0), 1.0), 0.0);
    }

    #[test]
    fn saturate_clamps_overflow_and_clears_nan() {
        assert_eq!(saturate(1e200 * 1e200), f64::MAX);
        assert_eq!(saturate(-1e200 * 1e200), f64::MIN);
        assert_eq!(saturate(f64::INFINITY - f64::INFINITY), 0.0);
        assert_eq!(saturate(-42.5), -42.5);
    }

    #[test]
    fn missing_fields_decode_to_defaults() {
        let p = decode("{}");
        assert_eq!(p.n, None);
        assert!(!p.flag);
        assert_eq!(p.order, 0);
        assert_eq!(p.text, None);
    }

    #[test]
    fn wrong_json_types_degrade_instead_of_failing() {
        let p = decode(r#"{"n":"12","flag":"true","order":"3","text":5}"#);
        assert_eq!(p.n, None);
        assert!(!p.flag);
        assert_eq!(p.order, 0);
        assert_eq!(p.text, None);

        let p = decode(r#"{"n":null,"flag":null,"order":null,"text":null}"#);
        assert_eq!(p.n, None);
        assert!(!p.flag);
        assert_eq!(p.order, 0);
    }

    #[test]
    fn numeric_fields_decode_from_json_numbers() {
        let p = decode(r#"{"n":12.5,"flag":true,"order":-2.9,"text":"hi"}"#);
        assert_eq!(p.n, Some(12.5));
        assert!(p.flag);
        assert_eq!(p.order, -2);
        assert_eq!(p.text.as_deref(), Some("hi"));
    }

    proptest! {
        #[test]
        fn coerce_never_returns_non_finite(raw in any::<f64>(), fallback in -1.0e9f64..1.0e9f64) {
            let out = coerce_number(Some(raw), fallback);
            prop_assert!(out.is_finite());
            if raw.is_finite() {
                prop_assert_eq!(out.to_bits(), raw.to_bits());
            } else {
                prop_assert_eq!(out, fallback);
            }
        }
    }
}
