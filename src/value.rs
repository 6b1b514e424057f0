//! Value interpretation shared by the rule catalog
//!
//! Field values are opaque [`serde_json::Value`]s; rules interpret them only
//! as far as they need to. This module holds that shared interpretation:
//! emptiness, numeric coercion, and length measurement.

use serde_json::Value;

/// Returns `true` when a value counts as empty for validation purposes.
///
/// Empty is `null` or the empty string. This is exactly the emptiness that
/// [`ValidationRule::required`](crate::ValidationRule::required) rejects and
/// that every other rule passes vacuously, so composed rules never report an
/// empty field twice.
///
/// # Examples
///
/// ```
/// use formwork::value::is_empty_value;
/// use serde_json::json;
///
/// assert!(is_empty_value(&json!(null)));
/// assert!(is_empty_value(&json!("")));
/// assert!(!is_empty_value(&json!("x")));
/// assert!(!is_empty_value(&json!(0)));
/// assert!(!is_empty_value(&json!(false)));
/// ```
pub fn is_empty_value(value: &Value) -> bool {
	match value {
		Value::Null => true,
		Value::String(s) => s.is_empty(),
		_ => false,
	}
}

/// Coerces a value to `f64` for the numeric bound rules.
///
/// Numbers convert directly; strings are trimmed and parsed. Anything else
/// is not coercible and yields `None`, which the bound rules treat as a
/// failure.
///
/// # Examples
///
/// ```
/// use formwork::value::as_number;
/// use serde_json::json;
///
/// assert_eq!(as_number(&json!(7)), Some(7.0));
/// assert_eq!(as_number(&json!("  12.5 ")), Some(12.5));
/// assert_eq!(as_number(&json!("seven")), None);
/// assert_eq!(as_number(&json!([1, 2])), None);
/// ```
pub fn as_number(value: &Value) -> Option<f64> {
	match value {
		Value::Number(n) => n.as_f64(),
		Value::String(s) => s.trim().parse::<f64>().ok(),
		_ => None,
	}
}

/// Measures a value for the length rules.
///
/// Strings count characters (not bytes), arrays count elements; other types
/// have no length and yield `None`.
///
/// # Examples
///
/// ```
/// use formwork::value::value_length;
/// use serde_json::json;
///
/// assert_eq!(value_length(&json!("héllo")), Some(5));
/// assert_eq!(value_length(&json!([1, 2, 3])), Some(3));
/// assert_eq!(value_length(&json!(42)), None);
/// ```
pub fn value_length(value: &Value) -> Option<usize> {
	match value {
		Value::String(s) => Some(s.chars().count()),
		Value::Array(items) => Some(items.len()),
		_ => None,
	}
}
