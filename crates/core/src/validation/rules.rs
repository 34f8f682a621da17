//! Validation rule and result types.

use regex::Regex;
use serde::Serialize;

use super::FieldErrors;

/// The JSON shape a field is expected to hold once normalized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Text,
    Integer,
    Number,
}

/// What a single rule checks.
///
/// Every kind except [`RuleKind::Required`] passes when the field is absent,
/// so presence and shape are reported independently.
#[derive(Debug, Clone)]
pub enum RuleKind {
    Required,
    TypeCheck(ValueKind),
    MinLength(usize),
    MinValue(f64),
    MaxValue(f64),
    EnumValues(&'static [&'static str]),
    Pattern(Regex),
}

impl RuleKind {
    /// Short machine-readable name, reported on each violation.
    pub fn name(&self) -> &'static str {
        match self {
            RuleKind::Required => "required",
            RuleKind::TypeCheck(_) => "type_check",
            RuleKind::MinLength(_) => "min_length",
            RuleKind::MinValue(_) => "min_value",
            RuleKind::MaxValue(_) => "max_value",
            RuleKind::EnumValues(_) => "enum_values",
            RuleKind::Pattern(_) => "regex_pattern",
        }
    }
}

/// One constraint on one field, with the message reported when it fails.
#[derive(Debug, Clone)]
pub struct ValidationRule {
    pub field: &'static str,
    pub kind: RuleKind,
    pub message: String,
}

/// An ordered list of rules describing one payload shape.
///
/// Rule order matters: when a field breaks several rules, the field-error map
/// reports the first one.
#[derive(Debug, Clone, Default)]
pub struct Schema {
    pub rules: Vec<ValidationRule>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a rule (builder style).
    pub fn rule(mut self, field: &'static str, kind: RuleKind, message: impl Into<String>) -> Self {
        self.rules.push(ValidationRule {
            field,
            kind,
            message: message.into(),
        });
        self
    }

    /// The declared value kind of `field`, if the schema type-checks it.
    pub fn value_kind(&self, field: &str) -> Option<ValueKind> {
        self.rules.iter().find_map(|r| match r.kind {
            RuleKind::TypeCheck(kind) if r.field == field => Some(kind),
            _ => None,
        })
    }
}

/// Aggregated result of evaluating every rule of a schema against one payload.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<FieldViolation>,
}

impl ValidationResult {
    /// Collapse violations into a field-error map, keeping the first message
    /// reported for each field.
    pub fn into_field_errors(self) -> FieldErrors {
        let mut map = FieldErrors::new();
        for violation in self.errors {
            map.entry(violation.field).or_insert(violation.message);
        }
        map
    }
}

/// A single field-level rule violation.
#[derive(Debug, Clone, Serialize)]
pub struct FieldViolation {
    pub field: String,
    pub rule_type: &'static str,
    pub message: String,
}
