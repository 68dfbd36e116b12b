//! Union, intersection and optional runtypes.
//!
//! - `union`: at least one alternative must accept the value
//! - `intersect`: every member must accept the value
//! - `optional`: the value may be absent from a record; present values are
//!   checked against the inner runtype

use serde_json::Value;
use stillwater::Validation;

use crate::error::{Failure, ValidationError};
use crate::runtype::primitive::kind_name;
use crate::runtype::Runtype;
use crate::validation::{dispatch, ValidationOptions, Visited};
use crate::CheckResult;

/// Succeeds on the first alternative that accepts the value.
///
/// Alternatives are tried in order. When none matches, a single error
/// describing the whole union is reported rather than one per alternative.
pub(crate) fn check_union<'a>(
    union: &Runtype,
    alternatives: &[Runtype],
    value: &'a Value,
    visited: &mut Visited,
    options: &ValidationOptions,
) -> CheckResult<'a> {
    for alternative in alternatives {
        if dispatch(alternative, value, visited, options).is_success() {
            return Validation::Success(value);
        }
    }

    Validation::Failure(Failure::single(
        ValidationError::at_root(format!(
            "Expected {}, but was {}",
            union,
            kind_name(value)
        ))
        .with_code("no_match"),
    ))
}

/// Checks the value against every member, relaying their errors unchanged.
pub(crate) fn check_intersect<'a>(
    members: &[Runtype],
    value: &'a Value,
    visited: &mut Visited,
    options: &ValidationOptions,
) -> CheckResult<'a> {
    let mut errors = Vec::new();
    for member in members {
        if let Validation::Failure(failure) = dispatch(member, value, visited, options) {
            errors.extend(failure);
            if options.is_fail_fast() {
                break;
            }
        }
    }

    match Failure::from_vec(errors) {
        Some(failure) => Validation::Failure(failure),
        None => Validation::Success(value),
    }
}

pub(crate) fn check_optional<'a>(
    inner: &Runtype,
    value: &'a Value,
    visited: &mut Visited,
    options: &ValidationOptions,
) -> CheckResult<'a> {
    dispatch(inner, value, visited, options)
}
