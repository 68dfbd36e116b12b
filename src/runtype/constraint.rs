//! Constrained and custom runtypes.
//!
//! This module provides [`ConstraintRuntype`], which narrows another runtype
//! with a predicate, and [`CustomRuntype`], the result of
//! [`Runtype::create`]: an arbitrary check function under a caller-chosen tag.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;
use stillwater::Validation;

use crate::error::{Failure, ValidationError};
use crate::runtype::Runtype;
use crate::validation::{dispatch, ValidationOptions, Visited};
use crate::CheckResult;

/// Predicate stored in a constraint. `Err` carries the failure message.
pub(crate) type Predicate = Arc<dyn Fn(&Value) -> Result<(), String> + Send + Sync>;

/// Check function stored in a custom runtype.
pub(crate) type CheckFn = Arc<
    dyn for<'a> Fn(&'a Value, &mut Visited, &ValidationOptions) -> CheckResult<'a> + Send + Sync,
>;

/// A runtype that accepts values conforming to `underlying` for which the
/// predicate also holds.
///
/// The predicate only runs once the underlying check has passed.
#[derive(Clone)]
pub struct ConstraintRuntype {
    underlying: Runtype,
    name: Option<String>,
    predicate: Predicate,
}

impl ConstraintRuntype {
    pub(crate) fn new(underlying: Runtype, name: Option<String>, predicate: Predicate) -> Self {
        Self {
            underlying,
            name,
            predicate,
        }
    }

    /// Returns the runtype checked before the predicate.
    pub fn underlying(&self) -> &Runtype {
        &self.underlying
    }

    /// Returns the constraint's name, if it was given one.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub(crate) fn check<'a>(
        &self,
        value: &'a Value,
        visited: &mut Visited,
        options: &ValidationOptions,
    ) -> CheckResult<'a> {
        if let Validation::Failure(failure) = dispatch(&self.underlying, value, visited, options) {
            return Validation::Failure(failure);
        }

        match (self.predicate)(value) {
            Ok(()) => Validation::Success(value),
            Err(message) => Validation::Failure(Failure::single(
                ValidationError::at_root(message).with_code("constraint"),
            )),
        }
    }
}

impl fmt::Debug for ConstraintRuntype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConstraintRuntype")
            .field("underlying", &self.underlying)
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// A runtype built from a caller-supplied check function.
#[derive(Clone)]
pub struct CustomRuntype {
    tag: String,
    check: CheckFn,
}

impl CustomRuntype {
    pub(crate) fn new(tag: String, check: CheckFn) -> Self {
        Self { tag, check }
    }

    /// Returns the tag given at construction.
    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub(crate) fn check<'a>(
        &self,
        value: &'a Value,
        visited: &mut Visited,
        options: &ValidationOptions,
    ) -> CheckResult<'a> {
        (self.check)(value, visited, options)
    }
}

impl fmt::Debug for CustomRuntype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomRuntype")
            .field("tag", &self.tag)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use crate::validation::dispatch;
    use crate::{Failure, Runtype, ValidationError};
    use serde_json::json;
    use stillwater::Validation;

    #[test]
    fn test_guard_message_names_constraint() {
        let positive = Runtype::number().with_guard("positive", |v| {
            v.as_f64().is_some_and(|n| n > 0.0)
        });

        assert!(positive.validate(&json!(3)).is_success());

        let failure = positive.validate(&json!(-3)).into_result().unwrap_err();
        assert_eq!(failure.first().message, "Failed constraint check for positive");
        assert_eq!(failure.first().code, "constraint");
    }

    #[test]
    fn test_underlying_failure_skips_predicate() {
        let even = Runtype::number().with_constraint(|v| match v.as_i64() {
            Some(n) if n % 2 == 0 => Ok(()),
            _ => Err(format!("{} is not even", v)),
        });

        let failure = even.validate(&json!("2")).into_result().unwrap_err();
        assert_eq!(failure.first().message, "Expected number, but was string");

        let failure = even.validate(&json!(3)).into_result().unwrap_err();
        assert_eq!(failure.first().message, "3 is not even");
    }

    #[test]
    fn test_pattern() {
        let digits = Runtype::pattern(r"^\d+$").unwrap();
        assert!(digits.validate(&json!("12345")).is_success());

        let failure = digits.validate(&json!("12a")).into_result().unwrap_err();
        assert_eq!(failure.first().message, "Expected string matching /^\\d+$/, but was \"12a\"");

        assert!(Runtype::pattern("(").is_err());
    }

    #[test]
    fn test_create_wraps_check_function() {
        let even_length = Runtype::create("even-length", |value, visited, options| {
            match dispatch(&Runtype::array(Runtype::unknown()), value, visited, options) {
                Validation::Failure(failure) => Validation::Failure(failure),
                Validation::Success(_) if value.as_array().map_or(0, Vec::len) % 2 == 0 => {
                    Validation::Success(value)
                }
                Validation::Success(_) => Validation::Failure(Failure::single(
                    ValidationError::at_root("Expected an even number of elements")
                        .with_code("even_length"),
                )),
            }
        });

        assert_eq!(even_length.tag(), "even-length");
        assert!(even_length.validate(&json!([1, 2])).is_success());
        assert!(even_length.validate(&json!([1])).is_failure());
        assert!(even_length.validate(&json!({})).is_failure());

        let nested = Runtype::array(even_length);
        let failure = nested.validate(&json!([[1, 2], [3]])).into_result().unwrap_err();
        assert_eq!(failure.first().key(), Some("[1]".to_string()));
        assert_eq!(failure.first().code, "even_length");
    }
}
