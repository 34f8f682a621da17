//! Rule evaluator: pure logic, no database access.

use serde_json::{Map, Number, Value};

use super::rules::{FieldViolation, RuleKind, Schema, ValidationResult, ValidationRule, ValueKind};

/// Normalize a raw payload against the kinds declared by `schema`.
///
/// - Text fields holding strings are trimmed.
/// - Integer/number fields holding numeric strings (as multipart forms send
///   them) are converted to JSON numbers.
/// - Integer/number fields holding an empty string are dropped, so they read
///   as absent.
///
/// Values that cannot be converted are left untouched for the type check to
/// report.
pub fn normalize(schema: &Schema, mut data: Map<String, Value>) -> Map<String, Value> {
    let fields: Vec<String> = data.keys().cloned().collect();

    for field in fields {
        let Some(kind) = schema.value_kind(&field) else {
            continue;
        };
        let Some(Value::String(raw)) = data.get(&field) else {
            continue;
        };
        let trimmed = raw.trim().to_string();

        match kind {
            ValueKind::Text => {
                data.insert(field, Value::String(trimmed));
            }
            ValueKind::Integer | ValueKind::Number if trimmed.is_empty() => {
                data.remove(&field);
            }
            ValueKind::Integer | ValueKind::Number => {
                if let Some(number) = parse_number(&trimmed) {
                    data.insert(field, Value::Number(number));
                }
            }
        }
    }

    data
}

fn parse_number(s: &str) -> Option<Number> {
    if let Ok(i) = s.parse::<i64>() {
        return Some(Number::from(i));
    }
    s.parse::<f64>().ok().and_then(Number::from_f64)
}

/// Evaluate every rule of `schema` against a single payload.
///
/// Evaluation never stops at the first failure; all violations are collected.
pub fn evaluate(schema: &Schema, data: &Map<String, Value>) -> ValidationResult {
    let errors: Vec<FieldViolation> = schema
        .rules
        .iter()
        .filter_map(|rule| evaluate_single_rule(rule, data.get(rule.field)))
        .collect();

    ValidationResult {
        is_valid: errors.is_empty(),
        errors,
    }
}

fn evaluate_single_rule(rule: &ValidationRule, value: Option<&Value>) -> Option<FieldViolation> {
    let failed = match &rule.kind {
        RuleKind::Required => is_missing(value),
        RuleKind::TypeCheck(kind) => present(value).is_some_and(|v| !matches_kind(v, *kind)),
        RuleKind::MinLength(min) => value
            .and_then(Value::as_str)
            .is_some_and(|s| s.chars().count() < *min),
        RuleKind::MinValue(min) => value.and_then(Value::as_f64).is_some_and(|n| n < *min),
        RuleKind::MaxValue(max) => value.and_then(Value::as_f64).is_some_and(|n| n > *max),
        RuleKind::EnumValues(allowed) => present(value)
            .is_some_and(|v| !v.as_str().is_some_and(|s| allowed.contains(&s))),
        RuleKind::Pattern(re) => value
            .and_then(Value::as_str)
            .is_some_and(|s| !s.is_empty() && !re.is_match(s)),
    };

    failed.then(|| FieldViolation {
        field: rule.field.to_string(),
        rule_type: rule.kind.name(),
        message: rule.message.clone(),
    })
}

fn present(value: Option<&Value>) -> Option<&Value> {
    value.filter(|v| !v.is_null())
}

fn is_missing(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.trim().is_empty(),
        _ => false,
    }
}

fn matches_kind(value: &Value, kind: ValueKind) -> bool {
    match kind {
        ValueKind::Text => value.is_string(),
        ValueKind::Number => value.is_number(),
        ValueKind::Integer => {
            value.is_i64()
                || value.is_u64()
                || value.as_f64().is_some_and(|f| f.fract() == 0.0)
        }
    }
}
