//! Array runtype.
//!
//! This module provides [`ArrayRuntype`], the payload of `Reflect::Array`.
//! Its check is the template every container runtype follows: verify the
//! container kind, validate each child through [`dispatch`], prefix the
//! child's error keys with the child's position, and either stop at the first
//! failing child or keep going, depending on the options.

use serde_json::Value;
use stillwater::Validation;

use crate::error::{Failure, ValidationError};
use crate::runtype::primitive::type_mismatch;
use crate::runtype::{Reflect, Runtype};
use crate::validation::{dispatch, ValidationOptions, Visited};
use crate::CheckResult;

/// An array runtype: every element must conform to `element`.
///
/// Read-only arrays differ only in metadata; the runtime check is the same.
///
/// # Example
///
/// ```rust
/// use runtypes::Runtype;
/// use serde_json::json;
///
/// let numbers = Runtype::array(Runtype::number());
///
/// let value = json!([1, 2, 3]);
/// let checked = numbers.validate(&value).into_result().unwrap();
/// assert!(std::ptr::eq(checked, &value));
///
/// let failure = numbers.validate(&json!([1, "x", 3])).into_result().unwrap_err();
/// assert_eq!(failure.first().key(), Some("[1]".to_string()));
/// assert_eq!(failure.first().message, "Expected number, but was string");
/// ```
#[derive(Debug, Clone)]
pub struct ArrayRuntype {
    element: Runtype,
    is_readonly: bool,
}

impl ArrayRuntype {
    pub(crate) fn new(element: Runtype, is_readonly: bool) -> Self {
        Self {
            element,
            is_readonly,
        }
    }

    /// Returns the runtype every element is checked against.
    pub fn element(&self) -> &Runtype {
        &self.element
    }

    /// Returns true if this runtype describes a read-only array.
    pub fn is_readonly(&self) -> bool {
        self.is_readonly
    }

    /// Returns a new read-only array runtype over the same element runtype.
    pub fn as_readonly(&self) -> Runtype {
        Runtype::new(Reflect::Array(ArrayRuntype::new(self.element.clone(), true)))
    }

    pub(crate) fn check<'a>(
        &self,
        candidate: &'a Value,
        visited: &mut Visited,
        options: &ValidationOptions,
    ) -> CheckResult<'a> {
        let items = match candidate.as_array() {
            Some(items) => items,
            None => return Validation::Failure(type_mismatch("array", candidate)),
        };

        let errors = collect_element_errors(
            items.iter().enumerate().map(|(i, item)| (i, &self.element, item)),
            visited,
            options,
        );

        match Failure::from_vec(errors) {
            Some(failure) => Validation::Failure(failure),
            None => Validation::Success(candidate),
        }
    }
}

/// Validates positional children and returns their errors keyed by position.
///
/// Errors are in ascending position order and, within a position, in the
/// child's own order. With `fail_fast` set, scanning stops after the first
/// failing child.
pub(crate) fn collect_element_errors<'r, 'a>(
    elements: impl Iterator<Item = (usize, &'r Runtype, &'a Value)>,
    visited: &mut Visited,
    options: &ValidationOptions,
) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    for (index, runtype, item) in elements {
        if let Validation::Failure(failure) = dispatch(runtype, item, visited, options) {
            errors.extend(
                failure
                    .into_iter()
                    .map(|error| error.prefixed_with_index(index)),
            );
            if options.is_fail_fast() {
                break;
            }
        }
    }
    errors
}
