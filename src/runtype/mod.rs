//! Runtypes: immutable, composable runtime checks.
//!
//! A [`Runtype`] is a cheap-to-clone handle to a [`Reflect`] value, a closed
//! sum type with one variant per kind of check. Every runtype exposes the
//! same protocol: [`Runtype::check`] takes the candidate value, the per-call
//! [`Visited`] guard and the [`ValidationOptions`], and returns a
//! [`CheckResult`]. Combinators reach their children through
//! [`dispatch`](crate::validation::dispatch).
//!
//! Builder methods such as [`Runtype::or`] and [`Runtype::as_readonly`]
//! always return new runtypes; nothing is ever modified after construction,
//! so runtypes can be shared freely between threads.
//!
//! # Example
//!
//! ```rust
//! use runtypes::Runtype;
//! use serde_json::json;
//!
//! let matrix = Runtype::array(Runtype::array(Runtype::number()));
//!
//! let failure = matrix
//!     .validate(&json!([[1, 2], [3, "y"]]))
//!     .into_result()
//!     .unwrap_err();
//! assert_eq!(failure.first().key(), Some("[1].[1]".to_string()));
//! ```

mod array;
mod combinators;
mod constraint;
mod primitive;
mod record;
mod reference;
mod show;
mod tuple;

use std::sync::Arc;

use indexmap::IndexMap;
use rayon::prelude::*;
use regex::Regex;
use serde_json::Value;

use crate::validation::{dispatch, ValidationOptions, Visited};
use crate::CheckResult;

pub use array::ArrayRuntype;
pub use constraint::{ConstraintRuntype, CustomRuntype};
pub use record::RecordRuntype;
pub use reference::ReferenceRuntype;

/// The kind of a runtype together with its kind-specific metadata.
///
/// Matching on `Reflect` lets consumers (message formatting, tooling)
/// handle every kind of runtype exhaustively.
#[derive(Debug, Clone)]
pub enum Reflect {
    /// Accepts every value.
    Unknown,
    /// Accepts no value.
    Never,
    /// Accepts `true` and `false`.
    Boolean,
    /// Accepts any JSON number.
    Number,
    /// Accepts any JSON string.
    String,
    /// Accepts exactly one value.
    Literal(Value),
    /// Accepts arrays whose elements all conform to one runtype.
    Array(ArrayRuntype),
    /// Accepts arrays of a fixed length with a runtype per position.
    Tuple(Vec<Runtype>),
    /// Accepts objects with the declared fields.
    Record(RecordRuntype),
    /// Accepts objects whose values all conform to one runtype.
    Dictionary(Runtype),
    /// Accepts values any alternative accepts.
    Union(Vec<Runtype>),
    /// Accepts values every member accepts.
    Intersect(Vec<Runtype>),
    /// Marks a record field as optional.
    Optional(Runtype),
    /// Narrows a runtype with a predicate.
    Constraint(ConstraintRuntype),
    /// Refers to a runtype in a registry by name.
    Reference(ReferenceRuntype),
    /// Wraps a caller-supplied check function.
    Custom(CustomRuntype),
}

impl Reflect {
    /// Returns the discriminant string for this kind.
    pub fn tag(&self) -> &str {
        match self {
            Reflect::Unknown => "unknown",
            Reflect::Never => "never",
            Reflect::Boolean => "boolean",
            Reflect::Number => "number",
            Reflect::String => "string",
            Reflect::Literal(_) => "literal",
            Reflect::Array(_) => "array",
            Reflect::Tuple(_) => "tuple",
            Reflect::Record(_) => "record",
            Reflect::Dictionary(_) => "dictionary",
            Reflect::Union(_) => "union",
            Reflect::Intersect(_) => "intersect",
            Reflect::Optional(_) => "optional",
            Reflect::Constraint(_) => "constraint",
            Reflect::Reference(_) => "reference",
            Reflect::Custom(custom) => custom.tag(),
        }
    }
}

/// An immutable runtime type check.
///
/// Cloning a `Runtype` clones a handle, not the check: clones share identity
/// (see [`Runtype::ptr_eq`]). Two runtypes built separately are distinct
/// even when they describe the same shape.
#[derive(Clone)]
pub struct Runtype {
    inner: Arc<Reflect>,
}

impl Runtype {
    pub(crate) fn new(reflect: Reflect) -> Self {
        Self {
            inner: Arc::new(reflect),
        }
    }

    /// Creates a runtype from a check function.
    ///
    /// The function receives the candidate value, the cycle guard and the
    /// options, and must follow the same protocol as the built-in runtypes:
    /// return the candidate itself on success, and validate nested values
    /// through [`dispatch`](crate::validation::dispatch).
    ///
    /// # Example
    ///
    /// ```rust
    /// use runtypes::{Failure, Runtype, ValidationError};
    /// use serde_json::json;
    /// use stillwater::Validation;
    ///
    /// let integer = Runtype::create("integer", |value, _visited, _options| {
    ///     if value.is_i64() || value.is_u64() {
    ///         Validation::Success(value)
    ///     } else {
    ///         Validation::Failure(Failure::single(
    ///             ValidationError::at_root("Expected integer").with_code("invalid_type"),
    ///         ))
    ///     }
    /// });
    ///
    /// assert!(integer.validate(&json!(3)).is_success());
    /// assert!(integer.validate(&json!(1.5)).is_failure());
    /// ```
    pub fn create<F>(tag: impl Into<String>, check: F) -> Self
    where
        F: for<'a> Fn(&'a Value, &mut Visited, &ValidationOptions) -> CheckResult<'a>
            + Send
            + Sync
            + 'static,
    {
        Self::new(Reflect::Custom(CustomRuntype::new(tag.into(), Arc::new(check))))
    }

    /// A runtype accepting every value.
    pub fn unknown() -> Self {
        Self::new(Reflect::Unknown)
    }

    /// A runtype accepting no value.
    pub fn never() -> Self {
        Self::new(Reflect::Never)
    }

    /// A runtype accepting booleans.
    pub fn boolean() -> Self {
        Self::new(Reflect::Boolean)
    }

    /// A runtype accepting numbers.
    pub fn number() -> Self {
        Self::new(Reflect::Number)
    }

    /// A runtype accepting strings.
    pub fn string() -> Self {
        Self::new(Reflect::String)
    }

    /// A runtype accepting exactly `value`.
    pub fn literal(value: impl Into<Value>) -> Self {
        Self::new(Reflect::Literal(value.into()))
    }

    /// A runtype accepting only `null`.
    pub fn null() -> Self {
        Self::literal(Value::Null)
    }

    /// A runtype accepting strings that match a regular expression.
    ///
    /// # Errors
    ///
    /// Returns the regex compilation error for an invalid pattern.
    pub fn pattern(pattern: &str) -> Result<Self, regex::Error> {
        let regex = Regex::new(pattern)?;
        let name = format!("/{}/", pattern);
        Ok(Self::string().constrained(Some(name), move |value| match value.as_str() {
            Some(s) if regex.is_match(s) => Ok(()),
            _ => Err(format!(
                "Expected string matching /{}/, but was {}",
                regex.as_str(),
                value
            )),
        }))
    }

    /// An array runtype whose elements must all conform to `element`.
    pub fn array(element: Runtype) -> Self {
        Self::new(Reflect::Array(ArrayRuntype::new(element, false)))
    }

    /// A fixed-length array runtype with one runtype per position.
    pub fn tuple(elements: impl IntoIterator<Item = Runtype>) -> Self {
        Self::new(Reflect::Tuple(elements.into_iter().collect()))
    }

    /// An object runtype with the given fields, checked in the given order.
    ///
    /// Wrap a field's runtype in [`Runtype::optional`] to allow its absence.
    pub fn record<K: Into<String>>(fields: impl IntoIterator<Item = (K, Runtype)>) -> Self {
        Self::new(Reflect::Record(RecordRuntype::new(collect_fields(fields), false)))
    }

    /// Like [`Runtype::record`], but every field may be absent.
    pub fn partial<K: Into<String>>(fields: impl IntoIterator<Item = (K, Runtype)>) -> Self {
        Self::new(Reflect::Record(RecordRuntype::new(collect_fields(fields), true)))
    }

    /// An object runtype whose values must all conform to `value`.
    pub fn dictionary(value: Runtype) -> Self {
        Self::new(Reflect::Dictionary(value))
    }

    /// A runtype accepting values that any alternative accepts.
    pub fn union(alternatives: impl IntoIterator<Item = Runtype>) -> Self {
        Self::new(Reflect::Union(alternatives.into_iter().collect()))
    }

    /// A runtype accepting values that every member accepts.
    pub fn intersect(members: impl IntoIterator<Item = Runtype>) -> Self {
        Self::new(Reflect::Intersect(members.into_iter().collect()))
    }

    /// Marks a record field as optional.
    pub fn optional(inner: Runtype) -> Self {
        Self::new(Reflect::Optional(inner))
    }

    /// Returns a union of this runtype and `other`.
    pub fn or(&self, other: Runtype) -> Self {
        Self::union([self.clone(), other])
    }

    /// Returns an intersection of this runtype and `other`.
    pub fn and(&self, other: Runtype) -> Self {
        Self::intersect([self.clone(), other])
    }

    /// Returns a runtype that additionally requires `constraint` to hold.
    ///
    /// The constraint returns `Err(message)` to reject a value; the message
    /// becomes the error message.
    pub fn with_constraint<F>(&self, constraint: F) -> Self
    where
        F: Fn(&Value) -> Result<(), String> + Send + Sync + 'static,
    {
        self.constrained(None, constraint)
    }

    /// Returns a runtype that additionally requires `guard` to return true.
    ///
    /// Rejected values are reported as `Failed constraint check for <name>`.
    pub fn with_guard<F>(&self, name: impl Into<String>, guard: F) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        let name = name.into();
        let message = format!("Failed constraint check for {}", name);
        self.constrained(Some(name), move |value| {
            if guard(value) {
                Ok(())
            } else {
                Err(message.clone())
            }
        })
    }

    fn constrained<F>(&self, name: Option<String>, constraint: F) -> Self
    where
        F: Fn(&Value) -> Result<(), String> + Send + Sync + 'static,
    {
        Self::new(Reflect::Constraint(ConstraintRuntype::new(
            self.clone(),
            name,
            Arc::new(constraint),
        )))
    }

    /// Returns a read-only variant of an array runtype, or `None` if this is
    /// not an array runtype.
    ///
    /// The receiver is unchanged; the new runtype accepts exactly the same
    /// values.
    pub fn as_readonly(&self) -> Option<Self> {
        self.as_array().map(ArrayRuntype::as_readonly)
    }

    /// Returns the discriminant string of this runtype's kind.
    pub fn tag(&self) -> &str {
        self.inner.tag()
    }

    /// Returns the kind and metadata of this runtype.
    pub fn reflect(&self) -> &Reflect {
        &self.inner
    }

    /// Returns the array metadata if this is an array runtype.
    pub fn as_array(&self) -> Option<&ArrayRuntype> {
        match self.reflect() {
            Reflect::Array(array) => Some(array),
            _ => None,
        }
    }

    /// Returns true if both handles refer to the same runtype instance.
    pub fn ptr_eq(&self, other: &Runtype) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    pub(crate) fn id(&self) -> usize {
        Arc::as_ptr(&self.inner) as usize
    }

    /// Collects the names of all registry references reachable from this runtype.
    ///
    /// References are not followed, so this terminates for recursive runtypes.
    pub fn collect_refs(&self, refs: &mut Vec<String>) {
        match self.reflect() {
            Reflect::Array(array) => array.element().collect_refs(refs),
            Reflect::Tuple(members) | Reflect::Union(members) | Reflect::Intersect(members) => {
                for member in members {
                    member.collect_refs(refs);
                }
            }
            Reflect::Record(record) => {
                for (_, field) in record.fields() {
                    field.collect_refs(refs);
                }
            }
            Reflect::Dictionary(inner) | Reflect::Optional(inner) => inner.collect_refs(refs),
            Reflect::Constraint(constraint) => constraint.underlying().collect_refs(refs),
            Reflect::Reference(reference) => refs.push(reference.name().to_string()),
            Reflect::Unknown
            | Reflect::Never
            | Reflect::Boolean
            | Reflect::Number
            | Reflect::String
            | Reflect::Literal(_)
            | Reflect::Custom(_) => {}
        }
    }

    /// Runs this runtype's own check on `value`.
    ///
    /// This is the protocol entry point used by
    /// [`dispatch`](crate::validation::dispatch). Callers outside a running
    /// validation should use [`Runtype::validate`] instead, which sets up the
    /// cycle guard.
    pub fn check<'a>(
        &self,
        value: &'a Value,
        visited: &mut Visited,
        options: &ValidationOptions,
    ) -> CheckResult<'a> {
        match self.reflect() {
            Reflect::Unknown => stillwater::Validation::Success(value),
            Reflect::Never => primitive::check_never(value),
            Reflect::Boolean => primitive::check_boolean(value),
            Reflect::Number => primitive::check_number(value),
            Reflect::String => primitive::check_string(value),
            Reflect::Literal(literal) => primitive::check_literal(literal, value),
            Reflect::Array(array) => array.check(value, visited, options),
            Reflect::Tuple(elements) => tuple::check_tuple(elements, value, visited, options),
            Reflect::Record(record) => record.check(value, visited, options),
            Reflect::Dictionary(inner) => record::check_dictionary(inner, value, visited, options),
            Reflect::Union(alternatives) => {
                combinators::check_union(self, alternatives, value, visited, options)
            }
            Reflect::Intersect(members) => {
                combinators::check_intersect(members, value, visited, options)
            }
            Reflect::Optional(inner) => combinators::check_optional(inner, value, visited, options),
            Reflect::Constraint(constraint) => constraint.check(value, visited, options),
            Reflect::Reference(reference) => reference.check(value, visited, options),
            Reflect::Custom(custom) => custom.check(value, visited, options),
        }
    }

    /// Validates a value, collecting every error.
    ///
    /// On success the returned reference is `value` itself.
    pub fn validate<'a>(&self, value: &'a Value) -> CheckResult<'a> {
        self.validate_with(value, &ValidationOptions::default())
    }

    /// Validates a value with explicit options.
    pub fn validate_with<'a>(&self, value: &'a Value, options: &ValidationOptions) -> CheckResult<'a> {
        let mut visited = Visited::new();
        dispatch(self, value, &mut visited, options)
    }

    /// Returns true if the value conforms.
    ///
    /// Stops at the first error since only the verdict is needed.
    pub fn guard(&self, value: &Value) -> bool {
        self.validate_with(value, &ValidationOptions::fail_fast_mode())
            .is_success()
    }

    /// Validates many values in parallel, one independent run per value.
    ///
    /// Results are returned in input order.
    ///
    /// # Example
    ///
    /// ```rust
    /// use runtypes::{Runtype, ValidationOptions};
    /// use serde_json::json;
    ///
    /// let values = vec![json!([1]), json!("no"), json!([])];
    /// let results = Runtype::array(Runtype::number())
    ///     .validate_many(&values, &ValidationOptions::default());
    ///
    /// let verdicts: Vec<bool> = results.iter().map(|r| r.is_success()).collect();
    /// assert_eq!(verdicts, vec![true, false, true]);
    /// ```
    pub fn validate_many<'a>(
        &self,
        values: &'a [Value],
        options: &ValidationOptions,
    ) -> Vec<CheckResult<'a>> {
        values
            .par_iter()
            .map(|value| self.validate_with(value, options))
            .collect()
    }
}

fn collect_fields<K: Into<String>>(
    fields: impl IntoIterator<Item = (K, Runtype)>,
) -> IndexMap<String, Runtype> {
    fields
        .into_iter()
        .map(|(name, runtype)| (name.into(), runtype))
        .collect()
}

const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<Runtype>();
    assert_sync::<Runtype>();
};
