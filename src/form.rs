//! The form-state engine
//!
//! [`Form`] owns live field values, per-field error messages, per-field
//! touched flags, and a caller-driven submitting flag, and recomputes
//! validity incrementally as values change. It performs no I/O and never
//! renders; a host layer reads the state after each mutating call.

use crate::rules::RuleSet;
use crate::snapshot::FormSnapshot;
use serde_json::Value;
use std::collections::HashMap;

#[cfg_attr(doc, aquamarine::aquamarine)]
/// A live form instance: values, errors, touched flags, and a submitting
/// flag, validated against a fixed [`RuleSet`].
///
/// The value key set is fixed at construction; validation failure is data
/// (an entry in [`errors`](Form::errors)), never an error type.
///
/// Per-field lifecycle (emergent from the operations, not an explicit state
/// type):
///
/// ```mermaid
/// stateDiagram-v2
///     [*] --> Pristine
///     Pristine --> TouchedValid: handle_blur (rules pass)
///     Pristine --> TouchedInvalid: handle_blur (rule fails)
///     TouchedValid --> TouchedInvalid: handle_input (rule fails)
///     TouchedInvalid --> TouchedValid: handle_input (rules pass)
///     TouchedValid --> Pristine: reset
///     TouchedInvalid --> Pristine: reset
/// ```
///
/// # Examples
///
/// ```
/// use formwork::{Form, RuleSet, ValidationRule};
/// use serde_json::json;
/// use std::collections::HashMap;
///
/// let initial = HashMap::from([("email".to_string(), json!(""))]);
/// let rules = RuleSet::new()
/// 	.field("email", vec![ValidationRule::required(), ValidationRule::email()]);
///
/// let mut form = Form::with_rules(initial, rules);
/// assert!(form.is_valid());
///
/// form.set_value("email", json!("bad"));
/// form.handle_blur("email");
/// assert_eq!(form.error("email"), Some("Enter a valid email address"));
///
/// form.set_value("email", json!("user@example.com"));
/// form.handle_input("email");
/// assert!(form.is_valid());
/// ```
#[derive(Debug)]
pub struct Form {
	values: HashMap<String, Value>,
	initial: HashMap<String, Value>,
	rules: RuleSet,
	errors: HashMap<String, String>,
	touched: HashMap<String, bool>,
	submitting: bool,
}

impl Form {
	/// Creates a form with no validation rules.
	///
	/// # Examples
	///
	/// ```
	/// use formwork::Form;
	/// use serde_json::json;
	/// use std::collections::HashMap;
	///
	/// let form = Form::new(HashMap::from([("name".to_string(), json!(""))]));
	/// assert!(form.is_valid());
	/// assert_eq!(form.field_count(), 1);
	/// ```
	pub fn new(initial: HashMap<String, Value>) -> Self {
		Self::with_rules(initial, RuleSet::new())
	}

	/// Creates a form from initial values and a rule set.
	///
	/// The initial values are snapshotted; [`reset`](Form::reset) restores
	/// them by value. The rule set is read-only for the lifetime of the
	/// form.
	///
	/// # Examples
	///
	/// ```
	/// use formwork::{Form, RuleSet, ValidationRule};
	/// use serde_json::json;
	/// use std::collections::HashMap;
	///
	/// let form = Form::with_rules(
	/// 	HashMap::from([("age".to_string(), json!(null))]),
	/// 	RuleSet::new().field("age", vec![ValidationRule::min(18.0)]),
	/// );
	/// assert!(form.errors().is_empty());
	/// assert!(!form.is_submitting());
	/// ```
	pub fn with_rules(initial: HashMap<String, Value>, rules: RuleSet) -> Self {
		Self {
			values: initial.clone(),
			initial,
			rules,
			errors: HashMap::new(),
			touched: HashMap::new(),
			submitting: false,
		}
	}

	/// Validates one field against its declared rules.
	///
	/// Rules run in declared order and evaluation stops at the first
	/// failure, whose message becomes `errors[name]`; only the first
	/// violated constraint is surfaced per field at a time. On success any
	/// existing error entry is removed. A field with no rules passes
	/// without side effect. Only `errors` is mutated, never `touched` or
	/// `values`.
	///
	/// # Examples
	///
	/// ```
	/// use formwork::{Form, RuleSet, ValidationRule};
	/// use serde_json::json;
	/// use std::collections::HashMap;
	///
	/// let mut form = Form::with_rules(
	/// 	HashMap::from([("mail".to_string(), json!("bad"))]),
	/// 	RuleSet::new()
	/// 		.field("mail", vec![ValidationRule::required(), ValidationRule::email()]),
	/// );
	///
	/// // `required` passes (non-empty), so the surfaced message is email's.
	/// assert!(!form.validate_field("mail"));
	/// assert_eq!(form.error("mail"), Some("Enter a valid email address"));
	///
	/// // Unknown or rule-less fields always pass.
	/// assert!(form.validate_field("nickname"));
	/// ```
	pub fn validate_field(&mut self, name: &str) -> bool {
		let Some(field_rules) = self.rules.rules_for(name) else {
			return true;
		};
		let value = self.values.get(name).cloned().unwrap_or(Value::Null);
		for rule in field_rules {
			if !rule.passes(&value) {
				tracing::trace!(field = name, error = rule.message(), "field invalid");
				self.errors.insert(name.to_string(), rule.message().to_string());
				return false;
			}
		}
		self.errors.remove(name);
		true
	}

	/// Validates every field that has rules; returns `true` iff all passed.
	///
	/// Iteration covers the rule set's keys, not the value keys: a field
	/// without rules can never contribute an error, even if the caller
	/// expects `errors` to mirror all value keys.
	///
	/// # Examples
	///
	/// ```
	/// use formwork::{Form, RuleSet, ValidationRule};
	/// use serde_json::json;
	/// use std::collections::HashMap;
	///
	/// let mut form = Form::with_rules(
	/// 	HashMap::from([
	/// 		("name".to_string(), json!("")),
	/// 		("note".to_string(), json!("")),
	/// 	]),
	/// 	RuleSet::new().field("name", vec![ValidationRule::required()]),
	/// );
	///
	/// assert!(!form.validate_all());
	/// assert!(form.error("name").is_some());
	/// assert!(form.error("note").is_none());
	/// ```
	pub fn validate_all(&mut self) -> bool {
		let names: Vec<String> = self.rules.field_names().map(String::from).collect();
		let mut all_valid = true;
		for name in names {
			if !self.validate_field(&name) {
				all_valid = false;
			}
		}
		tracing::debug!(valid = all_valid, errors = self.errors.len(), "validated form");
		all_valid
	}

	/// Marks a field as touched, then re-validates it.
	///
	/// Idempotent: repeated blurs are harmless and still re-validate.
	/// Callers should only pass names from the construction-time value set;
	/// an arbitrary key still gets a touched entry (documented constraint,
	/// not runtime-checked).
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
	///
	/// form.handle_blur("name");
	/// assert!(form.is_touched("name"));
	/// assert_eq!(form.error("name"), Some("This field is required"));
	/// ```
	pub fn handle_blur(&mut self, name: &str) {
		self.touched.insert(name.to_string(), true);
		let _ = self.validate_field(name);
	}

	/// Re-validates a field on value change, but only once it is touched.
	///
	/// An untouched field is left alone so errors never appear on a field
	/// the user has not interacted with and left yet. The caller writes the
	/// new value first ([`set_value`](Form::set_value)); this operation
	/// validates, it does not set.
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
	///
	/// // Not yet touched: invalid value, but no error surfaced.
	/// form.handle_input("name");
	/// assert!(form.error("name").is_none());
	///
	/// form.handle_blur("name");
	/// form.set_value("name", json!("Ada"));
	/// form.handle_input("name");
	/// assert!(form.is_valid());
	/// ```
	pub fn handle_input(&mut self, name: &str) {
		if self.is_touched(name) {
			let _ = self.validate_field(name);
		}
	}

	/// Restores the construction-time snapshot.
	///
	/// Values are restored by value, errors and touched flags are cleared
	/// entirely, and the submitting flag drops to `false`. Idempotent.
	///
	/// # Examples
	///
	/// ```
	/// use formwork::{Form, RuleSet, ValidationRule};
	/// use serde_json::json;
	/// use std::collections::HashMap;
	///
	/// let mut form = Form::with_rules(
	/// 	HashMap::from([("name".to_string(), json!("Ada"))]),
	/// 	RuleSet::new().field("name", vec![ValidationRule::required()]),
	/// );
	///
	/// form.set_value("name", json!(""));
	/// form.handle_blur("name");
	/// form.set_submitting(true);
	///
	/// form.reset();
	/// assert_eq!(form.value("name"), Some(&json!("Ada")));
	/// assert!(form.errors().is_empty());
	/// assert!(form.touched().is_empty());
	/// assert!(!form.is_submitting());
	/// ```
	pub fn reset(&mut self) {
		self.values = self.initial.clone();
		self.errors.clear();
		self.touched.clear();
		self.submitting = false;
		tracing::debug!("form reset to initial state");
	}

	/// True iff no field currently has an error.
	///
	/// Computed from the live error map on every call, never cached.
	pub fn is_valid(&self) -> bool {
		self.errors.is_empty()
	}

	/// True iff at least one field currently has an error.
	pub fn has_errors(&self) -> bool {
		!self.errors.is_empty()
	}

	/// The current value of a field.
	pub fn value(&self, name: &str) -> Option<&Value> {
		self.values.get(name)
	}

	/// All current field values.
	pub fn values(&self) -> &HashMap<String, Value> {
		&self.values
	}

	/// Writes a field value.
	///
	/// The value key set is fixed at construction: writing to an unknown
	/// key is a no-op returning `false`.
	///
	/// # Examples
	///
	/// ```
	/// use formwork::Form;
	/// use serde_json::json;
	/// use std::collections::HashMap;
	///
	/// let mut form = Form::new(HashMap::from([("name".to_string(), json!(""))]));
	/// assert!(form.set_value("name", json!("Ada")));
	/// assert!(!form.set_value("unknown", json!("x")));
	/// assert_eq!(form.field_count(), 1);
	/// ```
	pub fn set_value(&mut self, name: &str, value: Value) -> bool {
		match self.values.get_mut(name) {
			Some(slot) => {
				*slot = value;
				true
			}
			None => false,
		}
	}

	/// All current field errors, keyed by field name.
	///
	/// Absence of a key means the field has no error.
	pub fn errors(&self) -> &HashMap<String, String> {
		&self.errors
	}

	/// The current error message for a field, if any.
	pub fn error(&self, name: &str) -> Option<&str> {
		self.errors.get(name).map(String::as_str)
	}

	/// All touched flags recorded since the last reset.
	pub fn touched(&self) -> &HashMap<String, bool> {
		&self.touched
	}

	/// True once a field has blurred at least once since the last reset.
	pub fn is_touched(&self, name: &str) -> bool {
		self.touched.get(name).copied().unwrap_or(false)
	}

	/// The caller-driven submission flag.
	///
	/// The engine never sets it true before validation nor false after;
	/// submission orchestration belongs to the embedding layer. Only
	/// [`reset`](Form::reset) clears it.
	pub fn is_submitting(&self) -> bool {
		self.submitting
	}

	/// Sets the submission flag.
	pub fn set_submitting(&mut self, submitting: bool) {
		self.submitting = submitting;
	}

	/// True when any current value differs from the initial snapshot.
	///
	/// # Examples
	///
	/// ```
	/// use formwork::Form;
	/// use serde_json::json;
	/// use std::collections::HashMap;
	///
	/// let mut form = Form::new(HashMap::from([("name".to_string(), json!("Ada"))]));
	/// assert!(!form.has_changed());
	///
	/// form.set_value("name", json!("Grace"));
	/// assert!(form.has_changed());
	///
	/// form.reset();
	/// assert!(!form.has_changed());
	/// ```
	pub fn has_changed(&self) -> bool {
		self.values != self.initial
	}

	/// Number of fields in the (fixed) value set.
	pub fn field_count(&self) -> usize {
		self.values.len()
	}

	/// The rule set this form validates against.
	pub fn rule_set(&self) -> &RuleSet {
		&self.rules
	}

	/// The construction-time value snapshot.
	pub fn initial(&self) -> &HashMap<String, Value> {
		&self.initial
	}

	/// A serializable point-in-time view of the engine state.
	///
	/// # Examples
	///
	/// ```
	/// use formwork::Form;
	/// use serde_json::json;
	/// use std::collections::HashMap;
	///
	/// let form = Form::new(HashMap::from([("name".to_string(), json!("Ada"))]));
	/// let snapshot = form.snapshot();
	/// assert!(snapshot.is_valid);
	/// assert_eq!(snapshot.values.get("name"), Some(&json!("Ada")));
	/// ```
	pub fn snapshot(&self) -> FormSnapshot {
		FormSnapshot {
			values: self.values.clone(),
			errors: self.errors.clone(),
			touched: self.touched.clone(),
			submitting: self.submitting,
			is_valid: self.is_valid(),
		}
	}
}
