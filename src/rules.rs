//! Validation rules and rule sets
//!
//! A [`ValidationRule`] pairs a predicate over a field value with the message
//! surfaced when the predicate fails. The fixed catalog of constructors
//! (`required`, `email`, length and numeric bounds, patterns) covers the
//! common cases; [`ValidationRule::new`] accepts any closure for the rest.
//!
//! Every rule except `required` passes an empty value vacuously, so rules
//! compose freely on optional fields without double-reporting emptiness.

use crate::value::{as_number, is_empty_value, value_length};
use regex::Regex;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::sync::LazyLock;

// Simple local@domain.tld shape: no whitespace or extra '@' around the
// separator, at least one dot after it.
static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("EMAIL_REGEX: invalid regex pattern")
});

/// Errors raised while constructing a rule.
///
/// Rule *evaluation* is infallible; only construction from untrusted input
/// (a pattern string) can fail.
#[derive(Debug, thiserror::Error)]
pub enum RuleError {
	#[error("Invalid pattern: {0}")]
	Pattern(#[from] regex::Error),
}

type Predicate = Box<dyn Fn(&Value) -> bool + Send + Sync>;

/// A single validation rule: a predicate paired with a failure message.
///
/// Rules are immutable once constructed. Each catalog constructor carries a
/// default message; [`with_message`](ValidationRule::with_message) overrides
/// it.
///
/// # Examples
///
/// ```
/// use formwork::ValidationRule;
/// use serde_json::json;
///
/// let rule = ValidationRule::min_length(8);
/// assert!(!rule.passes(&json!("short")));
/// assert!(rule.passes(&json!("long enough")));
/// // Empty values pass every rule except `required`.
/// assert!(rule.passes(&json!("")));
/// ```
pub struct ValidationRule {
	check: Predicate,
	message: String,
}

impl ValidationRule {
	/// Creates a custom rule from a predicate and a message.
	///
	/// # Examples
	///
	/// ```
	/// use formwork::ValidationRule;
	/// use serde_json::json;
	///
	/// let even = ValidationRule::new(
	/// 	|v| v.as_i64().is_some_and(|n| n % 2 == 0),
	/// 	"Enter an even number",
	/// );
	/// assert!(even.passes(&json!(4)));
	/// assert!(!even.passes(&json!(3)));
	/// ```
	pub fn new<F>(check: F, message: impl Into<String>) -> Self
	where
		F: Fn(&Value) -> bool + Send + Sync + 'static,
	{
		Self {
			check: Box::new(check),
			message: message.into(),
		}
	}

	/// Replaces the rule's failure message.
	///
	/// # Examples
	///
	/// ```
	/// use formwork::ValidationRule;
	///
	/// let rule = ValidationRule::required().with_message("Name is required");
	/// assert_eq!(rule.message(), "Name is required");
	/// ```
	pub fn with_message(mut self, message: impl Into<String>) -> Self {
		self.message = message.into();
		self
	}

	/// The message surfaced when this rule fails.
	pub fn message(&self) -> &str {
		&self.message
	}

	/// Evaluates the rule against a value.
	pub fn passes(&self, value: &Value) -> bool {
		(self.check)(value)
	}

	/// The value must not be `null` or the empty string.
	///
	/// This is the only rule that rejects emptiness; all others pass empty
	/// values vacuously.
	///
	/// # Examples
	///
	/// ```
	/// use formwork::ValidationRule;
	/// use serde_json::json;
	///
	/// let rule = ValidationRule::required();
	/// assert!(!rule.passes(&json!("")));
	/// assert!(!rule.passes(&json!(null)));
	/// assert!(rule.passes(&json!("x")));
	/// assert!(rule.passes(&json!(0)));
	/// ```
	pub fn required() -> Self {
		Self::new(|v| !is_empty_value(v), "This field is required")
	}

	/// The value must be empty or a `local@domain.tld`-shaped string.
	///
	/// # Examples
	///
	/// ```
	/// use formwork::ValidationRule;
	/// use serde_json::json;
	///
	/// let rule = ValidationRule::email();
	/// assert!(rule.passes(&json!("user@example.com")));
	/// assert!(rule.passes(&json!("")));
	/// assert!(!rule.passes(&json!("not-an-email")));
	/// assert!(!rule.passes(&json!("a b@example.com")));
	/// ```
	pub fn email() -> Self {
		Self::new(
			|v| {
				if is_empty_value(v) {
					return true;
				}
				v.as_str().is_some_and(|s| EMAIL_REGEX.is_match(s))
			},
			"Enter a valid email address",
		)
	}

	/// The value must be empty or at least `len` characters (or elements)
	/// long.
	///
	/// # Examples
	///
	/// ```
	/// use formwork::ValidationRule;
	/// use serde_json::json;
	///
	/// let rule = ValidationRule::min_length(8);
	/// assert!(!rule.passes(&json!("short")));
	/// assert!(rule.passes(&json!("12345678")));
	/// assert!(rule.passes(&json!("")));
	/// ```
	pub fn min_length(len: usize) -> Self {
		Self::new(
			move |v| {
				if is_empty_value(v) {
					return true;
				}
				value_length(v).is_some_and(|l| l >= len)
			},
			format!("Enter at least {len} characters"),
		)
	}

	/// The value must be empty or at most `len` characters (or elements)
	/// long.
	///
	/// # Examples
	///
	/// ```
	/// use formwork::ValidationRule;
	/// use serde_json::json;
	///
	/// let rule = ValidationRule::max_length(3);
	/// assert!(rule.passes(&json!("abc")));
	/// assert!(!rule.passes(&json!("abcd")));
	/// ```
	pub fn max_length(len: usize) -> Self {
		Self::new(
			move |v| {
				if is_empty_value(v) {
					return true;
				}
				value_length(v).is_some_and(|l| l <= len)
			},
			format!("Enter no more than {len} characters"),
		)
	}

	/// The value must be empty or a string the given regex matches.
	///
	/// The pattern is compiled by the caller, so rule construction cannot
	/// fail here; see [`pattern_str`](ValidationRule::pattern_str) for the
	/// fallible variant.
	///
	/// # Examples
	///
	/// ```
	/// use formwork::ValidationRule;
	/// use regex::Regex;
	/// use serde_json::json;
	///
	/// let rule = ValidationRule::pattern(Regex::new(r"^\d{4}$").unwrap());
	/// assert!(rule.passes(&json!("2024")));
	/// assert!(!rule.passes(&json!("24")));
	/// ```
	pub fn pattern(regex: Regex) -> Self {
		Self::new(
			move |v| {
				if is_empty_value(v) {
					return true;
				}
				v.as_str().is_some_and(|s| regex.is_match(s))
			},
			"Enter a value in the expected format",
		)
	}

	/// Compiles `pattern` and builds a [`pattern`](ValidationRule::pattern)
	/// rule from it.
	///
	/// # Examples
	///
	/// ```
	/// use formwork::ValidationRule;
	///
	/// assert!(ValidationRule::pattern_str(r"^\d+$").is_ok());
	/// assert!(ValidationRule::pattern_str(r"(unclosed").is_err());
	/// ```
	pub fn pattern_str(pattern: &str) -> Result<Self, RuleError> {
		Ok(Self::pattern(Regex::new(pattern)?))
	}

	/// The value must be empty or numerically coercible to at least `bound`.
	///
	/// Numbers convert directly; strings are parsed. A non-empty value that
	/// cannot be coerced fails the rule.
	///
	/// # Examples
	///
	/// ```
	/// use formwork::ValidationRule;
	/// use serde_json::json;
	///
	/// let rule = ValidationRule::min(10.0);
	/// assert!(!rule.passes(&json!("7")));
	/// assert!(rule.passes(&json!("12")));
	/// assert!(rule.passes(&json!(10)));
	/// assert!(!rule.passes(&json!("ten")));
	/// ```
	pub fn min(bound: f64) -> Self {
		Self::new(
			move |v| {
				if is_empty_value(v) {
					return true;
				}
				as_number(v).is_some_and(|n| n >= bound)
			},
			format!("Enter a value greater than or equal to {bound}"),
		)
	}

	/// The value must be empty or numerically coercible to at most `bound`.
	///
	/// # Examples
	///
	/// ```
	/// use formwork::ValidationRule;
	/// use serde_json::json;
	///
	/// let rule = ValidationRule::max(100.0);
	/// assert!(rule.passes(&json!(99)));
	/// assert!(!rule.passes(&json!("101")));
	/// ```
	pub fn max(bound: f64) -> Self {
		Self::new(
			move |v| {
				if is_empty_value(v) {
					return true;
				}
				as_number(v).is_some_and(|n| n <= bound)
			},
			format!("Enter a value less than or equal to {bound}"),
		)
	}
}

impl fmt::Debug for ValidationRule {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ValidationRule")
			.field("message", &self.message)
			.finish_non_exhaustive()
	}
}

/// Per-field validation rules, keyed by field name.
///
/// Supplied once at form construction and read-only for the lifetime of the
/// form. Rule order within a field is evaluation order: validation stops at
/// the first failing rule.
///
/// # Examples
///
/// ```
/// use formwork::{RuleSet, ValidationRule};
///
/// let rules = RuleSet::new()
/// 	.field("email", vec![ValidationRule::required(), ValidationRule::email()])
/// 	.field("age", vec![ValidationRule::min(18.0)]);
///
/// assert_eq!(rules.len(), 2);
/// assert!(rules.rules_for("email").is_some());
/// assert!(rules.rules_for("nickname").is_none());
/// ```
#[derive(Debug, Default)]
pub struct RuleSet {
	rules: HashMap<String, Vec<ValidationRule>>,
}

impl RuleSet {
	/// Creates an empty rule set.
	pub fn new() -> Self {
		Self::default()
	}

	/// Adds the rules for one field, replacing any previous entry.
	pub fn field(mut self, name: impl Into<String>, rules: Vec<ValidationRule>) -> Self {
		self.rules.insert(name.into(), rules);
		self
	}

	/// The ordered rules declared for `name`, if any.
	pub fn rules_for(&self, name: &str) -> Option<&[ValidationRule]> {
		self.rules.get(name).map(Vec::as_slice)
	}

	/// Names of all fields that have rules.
	pub fn field_names(&self) -> impl Iterator<Item = &str> {
		self.rules.keys().map(String::as_str)
	}

	/// True when no field has rules.
	pub fn is_empty(&self) -> bool {
		self.rules.is_empty()
	}

	/// Number of fields with rules.
	pub fn len(&self) -> usize {
		self.rules.len()
	}
}

impl FromIterator<(String, Vec<ValidationRule>)> for RuleSet {
	fn from_iter<I: IntoIterator<Item = (String, Vec<ValidationRule>)>>(iter: I) -> Self {
		Self {
			rules: iter.into_iter().collect(),
		}
	}
}
