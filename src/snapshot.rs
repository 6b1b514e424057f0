//! Serializable snapshots of form state
//!
//! The engine itself carries closures and is not serializable; a host
//! rendering layer that wants plain data (for templating, transfer to a
//! client, or debugging) extracts a [`FormSnapshot`] instead.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// A point-in-time, plain-data view of a [`Form`](crate::Form).
///
/// Extracted via [`Form::snapshot`](crate::Form::snapshot); all fields
/// mirror the live engine state at the moment of extraction.
///
/// # Examples
///
/// ```
/// use formwork::{Form, RuleSet, ValidationRule};
/// use serde_json::json;
/// use std::collections::HashMap;
///
/// let mut form = Form::with_rules(
/// 	HashMap::from([("name".to_string(), json!(""))]),
/// 	RuleSet::new().field("name", vec![ValidationRule::required()]),
/// );
/// form.handle_blur("name");
///
/// let snapshot = form.snapshot();
/// assert!(!snapshot.is_valid);
///
/// let json = serde_json::to_string(&snapshot).unwrap();
/// assert!(json.contains("This field is required"));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormSnapshot {
	/// Current field values
	pub values: HashMap<String, Value>,

	/// Current field errors (field name -> message)
	pub errors: HashMap<String, String>,

	/// Fields that have blurred at least once since the last reset
	pub touched: HashMap<String, bool>,

	/// Caller-driven submission flag
	pub submitting: bool,

	/// Whether the error map was empty at extraction time
	pub is_valid: bool,
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::rules::{RuleSet, ValidationRule};
	use crate::Form;
	use rstest::rstest;
	use serde_json::json;

	#[rstest]
	fn test_snapshot_mirrors_live_state() {
		let mut form = Form::with_rules(
			HashMap::from([("email".to_string(), json!("bad"))]),
			RuleSet::new().field("email", vec![ValidationRule::email()]),
		);
		form.handle_blur("email");
		form.set_submitting(true);

		let snapshot = form.snapshot();

		assert_eq!(snapshot.values, *form.values());
		assert_eq!(snapshot.errors, *form.errors());
		assert_eq!(snapshot.touched, *form.touched());
		assert!(snapshot.submitting);
		assert_eq!(snapshot.is_valid, form.is_valid());
	}

	#[rstest]
	fn test_snapshot_round_trips_through_json() {
		let mut form = Form::with_rules(
			HashMap::from([("name".to_string(), json!(""))]),
			RuleSet::new().field("name", vec![ValidationRule::required()]),
		);
		form.handle_blur("name");

		let snapshot = form.snapshot();
		let json = serde_json::to_string(&snapshot).expect("serialize");
		let restored: FormSnapshot = serde_json::from_str(&json).expect("deserialize");

		assert_eq!(restored.errors, snapshot.errors);
		assert_eq!(restored.values, snapshot.values);
		assert_eq!(restored.is_valid, snapshot.is_valid);
	}

	#[rstest]
	fn test_snapshot_is_detached_from_engine() {
		let mut form = Form::new(HashMap::from([("name".to_string(), json!("Ada"))]));
		let snapshot = form.snapshot();

		form.set_value("name", json!("Grace"));

		assert_eq!(snapshot.values.get("name"), Some(&json!("Ada")));
	}
}
