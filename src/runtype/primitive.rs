//! Checks for the leaf runtypes: `unknown`, `never`, `boolean`, `number`,
//! `string` and `literal`.

use serde_json::Value;
use stillwater::Validation;

use crate::error::{Failure, ValidationError};
use crate::CheckResult;

/// Returns the JSON kind name for a value.
pub(crate) fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Builds the standard `Expected <expected>, but was <kind>` failure.
pub(crate) fn type_mismatch(expected: impl std::fmt::Display, value: &Value) -> Failure {
    Failure::single(
        ValidationError::at_root(format!(
            "Expected {}, but was {}",
            expected,
            kind_name(value)
        ))
        .with_code("invalid_type"),
    )
}

pub(crate) fn check_never(value: &Value) -> CheckResult<'_> {
    Validation::Failure(
        Failure::single(
            ValidationError::at_root(format!("Expected never, but was {}", kind_name(value)))
                .with_code("never"),
        ),
    )
}

pub(crate) fn check_boolean(value: &Value) -> CheckResult<'_> {
    match value {
        Value::Bool(_) => Validation::Success(value),
        _ => Validation::Failure(type_mismatch("boolean", value)),
    }
}

pub(crate) fn check_number(value: &Value) -> CheckResult<'_> {
    match value {
        Value::Number(_) => Validation::Success(value),
        _ => Validation::Failure(type_mismatch("number", value)),
    }
}

pub(crate) fn check_string(value: &Value) -> CheckResult<'_> {
    match value {
        Value::String(_) => Validation::Success(value),
        _ => Validation::Failure(type_mismatch("string", value)),
    }
}

pub(crate) fn check_literal<'a>(literal: &Value, value: &'a Value) -> CheckResult<'a> {
    if literal == value {
        Validation::Success(value)
    } else {
        Validation::Failure(Failure::single(
            ValidationError::at_root(format!(
                "Expected literal {}, but was {}",
                literal, value
            ))
            .with_code("literal_mismatch"),
        ))
    }
}
