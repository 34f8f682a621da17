//! Data validation engine.
//!
//! Schemas are plain data (an ordered list of [`rules::ValidationRule`]) and
//! the evaluator is pure logic, so the same engine validates record payloads
//! and account payloads without any framework annotations.

pub mod evaluator;
pub mod rules;
pub mod schemas;

use std::collections::BTreeMap;

pub use evaluator::{evaluate, normalize};
pub use rules::{FieldViolation, RuleKind, Schema, ValidationResult, ValidationRule, ValueKind};

/// Field name to human-readable failure message.
pub type FieldErrors = BTreeMap<String, String>;
