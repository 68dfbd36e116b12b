//! Record and dictionary runtypes.
//!
//! This module provides [`RecordRuntype`] for objects with a known set of
//! fields and the check for `dictionary` runtypes, whose values all share one
//! runtype. Field errors are keyed by field name.

use indexmap::IndexMap;
use serde_json::{Map, Value};
use stillwater::Validation;

use crate::error::{Failure, ValidationError};
use crate::runtype::primitive::type_mismatch;
use crate::runtype::{Reflect, Runtype};
use crate::validation::{dispatch, ValidationOptions, Visited};
use crate::CheckResult;

/// An object runtype with named fields.
///
/// Fields are checked in declaration order, so errors are reported in that
/// order too. A field may be absent only if its runtype is
/// [`Runtype::optional`] or the record is partial. Properties not declared
/// are ignored.
///
/// # Example
///
/// ```rust
/// use runtypes::Runtype;
/// use serde_json::json;
///
/// let user = Runtype::record([
///     ("name", Runtype::string()),
///     ("age", Runtype::optional(Runtype::number())),
/// ]);
///
/// assert!(user.validate(&json!({"name": "Alice"})).is_success());
///
/// let failure = user.validate(&json!({"name": 1, "age": "x"})).into_result().unwrap_err();
/// assert_eq!(failure.keys(), vec![Some("name".to_string()), Some("age".to_string())]);
/// ```
#[derive(Debug, Clone)]
pub struct RecordRuntype {
    fields: IndexMap<String, Runtype>,
    is_partial: bool,
}

impl RecordRuntype {
    pub(crate) fn new(fields: IndexMap<String, Runtype>, is_partial: bool) -> Self {
        Self { fields, is_partial }
    }

    /// Returns the declared fields in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &Runtype)> {
        self.fields.iter().map(|(name, runtype)| (name.as_str(), runtype))
    }

    /// Returns the runtype declared for a field.
    pub fn field(&self, name: &str) -> Option<&Runtype> {
        self.fields.get(name)
    }

    /// Returns true if every field may be absent.
    pub fn is_partial(&self) -> bool {
        self.is_partial
    }

    /// Returns true if the named field may be absent.
    pub fn is_optional(&self, name: &str) -> bool {
        match self.fields.get(name) {
            Some(runtype) => self.is_partial || matches!(runtype.reflect(), Reflect::Optional(_)),
            None => false,
        }
    }

    pub(crate) fn check<'a>(
        &self,
        candidate: &'a Value,
        visited: &mut Visited,
        options: &ValidationOptions,
    ) -> CheckResult<'a> {
        let object = match candidate.as_object() {
            Some(object) => object,
            None => return Validation::Failure(type_mismatch("record", candidate)),
        };

        let mut errors = Vec::new();
        for (name, field) in &self.fields {
            let field_errors = match object.get(name) {
                Some(value) => match dispatch(field, value, visited, options) {
                    Validation::Success(_) => continue,
                    Validation::Failure(failure) => failure.into_vec(),
                },
                None if self.is_optional(name) => continue,
                None => vec![ValidationError::at_root(format!(
                    "Expected {}, but was missing",
                    field
                ))
                .with_code("missing_field")],
            };

            errors.extend(
                field_errors
                    .into_iter()
                    .map(|error| error.prefixed_with_field(name.as_str())),
            );
            if options.is_fail_fast() {
                break;
            }
        }

        match Failure::from_vec(errors) {
            Some(failure) => Validation::Failure(failure),
            None => Validation::Success(candidate),
        }
    }
}

pub(crate) fn check_dictionary<'a>(
    value_runtype: &Runtype,
    candidate: &'a Value,
    visited: &mut Visited,
    options: &ValidationOptions,
) -> CheckResult<'a> {
    let object: &Map<String, Value> = match candidate.as_object() {
        Some(object) => object,
        None => return Validation::Failure(type_mismatch("dictionary", candidate)),
    };

    let mut errors = Vec::new();
    for (key, value) in object {
        if let Validation::Failure(failure) = dispatch(value_runtype, value, visited, options) {
            errors.extend(
                failure
                    .into_iter()
                    .map(|error| error.prefixed_with_field(key.as_str())),
            );
            if options.is_fail_fast() {
                break;
            }
        }
    }

    match Failure::from_vec(errors) {
        Some(failure) => Validation::Failure(failure),
        None => Validation::Success(candidate),
    }
}

#[cfg(test)]
mod tests {
    use crate::{Runtype, ValidationOptions};
    use serde_json::json;

    fn user() -> Runtype {
        Runtype::record([
            ("name", Runtype::string()),
            ("age", Runtype::number()),
            ("email", Runtype::optional(Runtype::string())),
        ])
    }

    #[test]
    fn test_missing_required_field() {
        let failure = user().validate(&json!({"name": "Bob"})).into_result().unwrap_err();
        assert_eq!(failure.len(), 1);
        assert_eq!(failure.first().key(), Some("age".to_string()));
        assert_eq!(failure.first().message, "Expected number, but was missing");
        assert_eq!(failure.first().code, "missing_field");
    }

    #[test]
    fn test_optional_field_checked_when_present() {
        assert!(user().validate(&json!({"name": "Bob", "age": 3})).is_success());

        let failure = user()
            .validate(&json!({"name": "Bob", "age": 3, "email": 7}))
            .into_result()
            .unwrap_err();
        assert_eq!(failure.first().key(), Some("email".to_string()));
    }

    #[test]
    fn test_fail_fast_stops_at_first_field() {
        let failure = user()
            .validate_with(&json!({}), &ValidationOptions::fail_fast_mode())
            .into_result()
            .unwrap_err();
        assert_eq!(failure.len(), 1);
        assert_eq!(failure.first().key(), Some("name".to_string()));
    }

    #[test]
    fn test_partial_allows_absent_fields() {
        let patch = Runtype::partial([("name", Runtype::string()), ("age", Runtype::number())]);
        assert!(patch.validate(&json!({})).is_success());
        assert!(patch.validate(&json!({"age": "x"})).is_failure());
    }

    #[test]
    fn test_record_rejects_non_objects() {
        let failure = user().validate(&json!([1])).into_result().unwrap_err();
        assert_eq!(failure.first().message, "Expected record, but was array");
    }

    #[test]
    fn test_dictionary_keys_errors_by_property() {
        let scores = Runtype::dictionary(Runtype::number());
        assert!(scores.validate(&json!({"a": 1, "b": 2})).is_success());

        let failure = scores
            .validate(&json!({"a": 1, "b": "two"}))
            .into_result()
            .unwrap_err();
        assert_eq!(failure.first().key(), Some("b".to_string()));

        let failure = scores.validate(&json!("x")).into_result().unwrap_err();
        assert_eq!(failure.first().message, "Expected dictionary, but was string");
    }
}
