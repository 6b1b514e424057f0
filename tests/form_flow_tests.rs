//! Form flow tests
//!
//! Scenario-level coverage for the blur/input/submit/reset lifecycle and the
//! engine's derived-state guarantees.

use formwork::{Form, RuleSet, ValidationRule};
use proptest::prelude::*;
use rstest::rstest;
use serde_json::{Value, json};
use std::collections::HashMap;

fn registration_form() -> Form {
	let initial = HashMap::from([
		("mail".to_string(), json!("")),
		("password".to_string(), json!("")),
		("age".to_string(), json!(null)),
		("bio".to_string(), json!("")),
	]);
	let rules = RuleSet::new()
		.field(
			"mail",
			vec![ValidationRule::required(), ValidationRule::email()],
		)
		.field(
			"password",
			vec![ValidationRule::required(), ValidationRule::min_length(8)],
		)
		.field("age", vec![ValidationRule::min(18.0)]);
	Form::with_rules(initial, rules)
}

#[rstest]
fn test_fresh_form_is_valid_until_validated() {
	let form = registration_form();

	assert!(form.is_valid());
	assert!(!form.has_errors());
	assert!(form.errors().is_empty());
	assert!(form.touched().is_empty());
}

#[rstest]
fn test_typing_before_blur_stays_silent() {
	let mut form = registration_form();

	for ch in ["b", "ba", "bad"] {
		form.set_value("mail", json!(ch));
		form.handle_input("mail");
	}

	assert!(form.error("mail").is_none());
	assert!(form.is_valid());
}

#[rstest]
fn test_blur_then_typing_gives_live_feedback() {
	let mut form = registration_form();

	form.handle_blur("password");
	assert_eq!(form.error("password"), Some("This field is required"));

	form.set_value("password", json!("short"));
	form.handle_input("password");
	assert_eq!(form.error("password"), Some("Enter at least 8 characters"));

	form.set_value("password", json!("long enough now"));
	form.handle_input("password");
	assert!(form.error("password").is_none());
}

#[rstest]
fn test_submit_flow_validates_everything_at_once() {
	let mut form = registration_form();
	form.set_value("mail", json!("user@example.com"));
	form.set_value("password", json!("short"));
	form.set_value("age", json!("17"));

	// Submission orchestration belongs to the caller.
	form.set_submitting(true);
	let ok = form.validate_all();
	form.set_submitting(false);

	assert!(!ok);
	assert!(form.error("mail").is_none());
	assert_eq!(form.error("password"), Some("Enter at least 8 characters"));
	assert_eq!(
		form.error("age"),
		Some("Enter a value greater than or equal to 18")
	);
}

#[rstest]
fn test_successful_submit_then_reset_returns_to_pristine() {
	let mut form = registration_form();
	form.set_value("mail", json!("user@example.com"));
	form.set_value("password", json!("correct horse"));
	form.set_value("age", json!(30));

	assert!(form.validate_all());

	form.reset();

	assert_eq!(form.value("mail"), Some(&json!("")));
	assert_eq!(form.value("age"), Some(&json!(null)));
	assert!(form.errors().is_empty());
	assert!(form.touched().is_empty());
	assert!(!form.has_changed());
}

#[rstest]
fn test_optional_field_passes_rules_vacuously_when_empty() {
	// `age` has a min rule but no required rule: empty stays valid.
	let mut form = registration_form();
	form.handle_blur("age");

	assert!(form.error("age").is_none());

	form.set_value("age", json!("7"));
	form.handle_input("age");
	assert!(form.error("age").is_some());

	form.set_value("age", json!(""));
	form.handle_input("age");
	assert!(form.error("age").is_none());
}

#[rstest]
fn test_rule_less_field_never_blocks_submission() {
	let mut form = registration_form();
	form.set_value("mail", json!("user@example.com"));
	form.set_value("password", json!("longenough"));
	form.set_value("bio", json!(""));
	form.handle_blur("bio");

	assert!(form.validate_all());
	assert!(form.error("bio").is_none());
}

#[rstest]
#[case(json!(""), Some("This field is required"))]
#[case(json!("x"), None)]
fn test_required_scenario(#[case] value: Value, #[case] expected: Option<&str>) {
	let mut form = Form::with_rules(
		HashMap::from([("name".to_string(), value)]),
		RuleSet::new().field("name", vec![ValidationRule::required()]),
	);

	let valid = form.validate_field("name");

	assert_eq!(valid, expected.is_none());
	assert_eq!(form.error("name"), expected);
}

#[rstest]
fn test_reordered_rules_change_surfaced_message() {
	let initial = HashMap::from([("code".to_string(), json!("toolongtoo"))]);
	let max_then_pattern = RuleSet::new().field(
		"code",
		vec![
			ValidationRule::max_length(4),
			ValidationRule::pattern_str(r"^\d+$").expect("valid pattern"),
		],
	);
	let pattern_then_max = RuleSet::new().field(
		"code",
		vec![
			ValidationRule::pattern_str(r"^\d+$").expect("valid pattern"),
			ValidationRule::max_length(4),
		],
	);

	let mut first = Form::with_rules(initial.clone(), max_then_pattern);
	let mut second = Form::with_rules(initial, pattern_then_max);
	first.validate_field("code");
	second.validate_field("code");

	assert_eq!(first.error("code"), Some("Enter no more than 4 characters"));
	assert_eq!(
		second.error("code"),
		Some("Enter a value in the expected format")
	);
}

#[rstest]
fn test_custom_messages_flow_through_to_errors() {
	let mut form = Form::with_rules(
		HashMap::from([("mail".to_string(), json!("nope"))]),
		RuleSet::new().field(
			"mail",
			vec![ValidationRule::email().with_message("That address looks wrong")],
		),
	);

	form.handle_blur("mail");

	assert_eq!(form.error("mail"), Some("That address looks wrong"));
}

#[rstest]
fn test_snapshot_reflects_mid_flow_state() {
	let mut form = registration_form();
	form.handle_blur("mail");
	form.set_submitting(true);

	let snapshot = form.snapshot();

	assert!(!snapshot.is_valid);
	assert!(snapshot.submitting);
	assert_eq!(snapshot.touched.get("mail"), Some(&true));
	assert!(snapshot.errors.contains_key("mail"));
}

// =============================================================================
// Property tests
// =============================================================================

/// One caller-visible engine operation, for random interleaving.
#[derive(Debug, Clone)]
enum Op {
	SetValue(usize, String),
	Blur(usize),
	Input(usize),
	ValidateField(usize),
	ValidateAll,
	Reset,
}

const FIELDS: [&str; 3] = ["mail", "password", "age"];

fn op_strategy() -> impl Strategy<Value = Op> {
	prop_oneof![
		(0..FIELDS.len(), "[a-z0-9@. ]{0,12}").prop_map(|(i, s)| Op::SetValue(i, s)),
		(0..FIELDS.len()).prop_map(Op::Blur),
		(0..FIELDS.len()).prop_map(Op::Input),
		(0..FIELDS.len()).prop_map(Op::ValidateField),
		Just(Op::ValidateAll),
		Just(Op::Reset),
	]
}

fn apply(form: &mut Form, op: &Op) {
	match op {
		Op::SetValue(i, s) => {
			form.set_value(FIELDS[*i], json!(s));
		}
		Op::Blur(i) => form.handle_blur(FIELDS[*i]),
		Op::Input(i) => form.handle_input(FIELDS[*i]),
		Op::ValidateField(i) => {
			form.validate_field(FIELDS[*i]);
		}
		Op::ValidateAll => {
			form.validate_all();
		}
		Op::Reset => form.reset(),
	}
}

proptest! {
	#[test]
	fn prop_is_valid_always_negates_has_errors(ops in prop::collection::vec(op_strategy(), 0..40)) {
		let mut form = registration_form();
		for op in &ops {
			apply(&mut form, op);
			prop_assert_eq!(form.is_valid(), !form.has_errors());
		}
	}

	#[test]
	fn prop_errors_only_on_ruled_fields(ops in prop::collection::vec(op_strategy(), 0..40)) {
		let mut form = registration_form();
		for op in &ops {
			apply(&mut form, op);
			for field in form.errors().keys() {
				prop_assert!(form.rule_set().rules_for(field).is_some());
			}
		}
	}

	#[test]
	fn prop_value_shape_never_changes(ops in prop::collection::vec(op_strategy(), 0..40)) {
		let mut form = registration_form();
		let shape: Vec<String> = {
			let mut keys: Vec<String> = form.values().keys().cloned().collect();
			keys.sort();
			keys
		};
		for op in &ops {
			apply(&mut form, op);
			let mut keys: Vec<String> = form.values().keys().cloned().collect();
			keys.sort();
			prop_assert_eq!(&keys, &shape);
		}
	}

	#[test]
	fn prop_reset_is_idempotent(ops in prop::collection::vec(op_strategy(), 0..40)) {
		let mut form = registration_form();
		for op in &ops {
			apply(&mut form, op);
		}
		form.reset();
		let once = form.snapshot();
		form.reset();
		let twice = form.snapshot();

		prop_assert_eq!(once.values, twice.values);
		prop_assert_eq!(once.errors, twice.errors);
		prop_assert_eq!(once.touched, twice.touched);
		prop_assert_eq!(once.submitting, twice.submitting);
	}

	#[test]
	fn prop_validate_all_agrees_with_empty_errors(ops in prop::collection::vec(op_strategy(), 0..40)) {
		let mut form = registration_form();
		for op in &ops {
			apply(&mut form, op);
		}
		let ok = form.validate_all();
		prop_assert_eq!(ok, form.errors().is_empty());
		prop_assert_eq!(ok, form.is_valid());
	}
}
