//! Form state management and validation
//!
//! This crate provides a synchronous form-state engine:
//! - Live field values with a fixed, construction-time key set
//! - A declarative per-field rule catalog (required, email, length bounds,
//!   numeric bounds, patterns) plus custom predicate rules
//! - First-failure-wins per-field error reporting
//! - Blur/input gating so errors only surface on fields the user has left
//! - A serializable snapshot of engine state for host rendering layers
//!
//! The engine performs no I/O, never renders, and never throws on invalid
//! input: validation failure is data, read back through the error map.
//!
//! # Examples
//!
//! ```
//! use formwork::{Form, RuleSet, ValidationRule};
//! use serde_json::json;
//! use std::collections::HashMap;
//!
//! let initial = HashMap::from([
//! 	("email".to_string(), json!("")),
//! 	("age".to_string(), json!(null)),
//! ]);
//! let rules = RuleSet::new()
//! 	.field("email", vec![ValidationRule::required(), ValidationRule::email()])
//! 	.field("age", vec![ValidationRule::min(18.0)]);
//!
//! let mut form = Form::with_rules(initial, rules);
//! form.set_value("email", json!("user@example.com"));
//!
//! assert!(form.validate_all());
//! assert!(form.is_valid());
//! ```

pub mod form;
pub mod rules;
pub mod snapshot;
pub mod value;

pub use form::Form;
pub use rules::{RuleError, RuleSet, ValidationRule};
pub use snapshot::FormSnapshot;
