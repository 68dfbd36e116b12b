//! Tuple runtype: a fixed-length array with a runtype per position.

use serde_json::Value;
use stillwater::Validation;

use crate::error::{Failure, ValidationError};
use crate::runtype::array::collect_element_errors;
use crate::runtype::primitive::kind_name;
use crate::runtype::Runtype;
use crate::validation::{ValidationOptions, Visited};
use crate::CheckResult;

pub(crate) fn check_tuple<'a>(
    elements: &[Runtype],
    candidate: &'a Value,
    visited: &mut Visited,
    options: &ValidationOptions,
) -> CheckResult<'a> {
    let items = match candidate.as_array() {
        Some(items) => items,
        None => {
            return Validation::Failure(Failure::single(
                ValidationError::at_root(format!(
                    "Expected tuple to be an array, but was {}",
                    kind_name(candidate)
                ))
                .with_code("invalid_type"),
            ))
        }
    };

    if items.len() != elements.len() {
        return Validation::Failure(Failure::single(
            ValidationError::at_root(format!(
                "Expected an array of length {}, but was {}",
                elements.len(),
                items.len()
            ))
            .with_code("tuple_length"),
        ));
    }

    let errors = collect_element_errors(
        elements
            .iter()
            .zip(items)
            .enumerate()
            .map(|(i, (runtype, item))| (i, runtype, item)),
        visited,
        options,
    );

    match Failure::from_vec(errors) {
        Some(failure) => Validation::Failure(failure),
        None => Validation::Success(candidate),
    }
}
