//! Validation error types.
//!
//! This module provides [`ValidationError`] for single check failures and
//! [`Failure`] for the ordered, non-empty list of errors a failing check returns.

use std::fmt::{self, Display};

use stillwater::prelude::*;

use crate::path::KeyPath;

/// A single validation error.
///
/// - **path**: where, relative to the checked value, the failure occurred
/// - **message**: human-readable description of the failure
/// - **code**: machine-readable error code for programmatic handling
///
/// # Example
///
/// ```rust
/// use runtypes::{KeyPath, ValidationError};
///
/// let error = ValidationError::new(KeyPath::root(), "Expected number, but was string")
///     .with_code("invalid_type")
///     .prefixed_with_index(1);
///
/// assert_eq!(error.key(), Some("[1]".to_string()));
/// assert_eq!(error.code, "invalid_type");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// The path to the value that failed validation.
    pub path: KeyPath,
    /// Human-readable error message.
    pub message: String,
    /// Machine-readable error code (e.g., `invalid_type`).
    pub code: String,
}

impl ValidationError {
    /// Creates a new error with the given path and message.
    ///
    /// The error code defaults to "validation_error". Use `with_code` to set
    /// a more specific code.
    pub fn new(path: KeyPath, message: impl Into<String>) -> Self {
        Self {
            path,
            message: message.into(),
            code: "validation_error".to_string(),
        }
    }

    /// Creates an error located at the checked value itself.
    pub fn at_root(message: impl Into<String>) -> Self {
        Self::new(KeyPath::root(), message)
    }

    /// Sets the error code and returns self for chaining.
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = code.into();
        self
    }

    /// Returns the formatted key, or `None` when the error concerns the
    /// checked value itself.
    pub fn key(&self) -> Option<String> {
        if self.path.is_root() {
            None
        } else {
            Some(self.path.to_string())
        }
    }

    /// Returns this error with an array index placed in front of its path.
    pub fn prefixed_with_index(mut self, index: usize) -> Self {
        self.path = self.path.prepend_index(index);
        self
    }

    /// Returns this error with a field name placed in front of its path.
    pub fn prefixed_with_field(mut self, name: impl Into<String>) -> Self {
        self.path = self.path.prepend_field(name);
        self
    }
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_root() {
            write!(f, "{}", self.message)
        } else {
            write!(f, "{}: {}", self.path, self.message)
        }
    }
}

impl std::error::Error for ValidationError {}

const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<ValidationError>();
    assert_sync::<ValidationError>();
};

/// The outcome of a failing check: a non-empty, ordered list of errors.
///
/// `Failure` wraps a `NonEmptyVec<ValidationError>`, so a failing check can
/// never report zero errors. Errors keep the order in which they were found.
///
/// # Combining Errors
///
/// `Failure` implements `Semigroup`; combining concatenates in order:
///
/// ```rust
/// use runtypes::{Failure, ValidationError};
/// use stillwater::prelude::*;
///
/// let first = Failure::single(ValidationError::at_root("first"));
/// let second = Failure::single(ValidationError::at_root("second"));
///
/// let combined = first.combine(second);
/// assert_eq!(combined.len(), 2);
/// assert_eq!(combined.first().message, "first");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Failure(NonEmptyVec<ValidationError>);

impl Failure {
    /// Creates a `Failure` containing a single error.
    pub fn single(error: ValidationError) -> Self {
        Self(NonEmptyVec::singleton(error))
    }

    /// Creates a `Failure` from a list of errors, or `None` if the list is empty.
    ///
    /// Combinators accumulate into a plain `Vec` and use this to decide
    /// between success and failure.
    pub fn from_vec(errors: Vec<ValidationError>) -> Option<Self> {
        let mut errors = errors.into_iter();
        let head = errors.next()?;
        Some(errors.fold(Self::single(head), |acc, error| {
            acc.combine(Self::single(error))
        }))
    }

    /// Returns the number of errors.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; a `Failure` holds at least one error.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Returns an iterator over the errors in encounter order.
    pub fn iter(&self) -> impl Iterator<Item = &ValidationError> {
        self.0.iter()
    }

    /// Returns the first error found.
    pub fn first(&self) -> &ValidationError {
        self.0.head()
    }

    /// Returns all errors located at the given path.
    pub fn at_key(&self, path: &KeyPath) -> Vec<&ValidationError> {
        self.0.iter().filter(|e| &e.path == path).collect()
    }

    /// Returns all errors with the given code.
    pub fn with_code(&self, code: &str) -> Vec<&ValidationError> {
        self.0.iter().filter(|e| e.code == code).collect()
    }

    /// Returns the formatted keys of all errors, in order.
    pub fn keys(&self) -> Vec<Option<String>> {
        self.0.iter().map(ValidationError::key).collect()
    }

    /// Converts this failure into a `Vec<ValidationError>`.
    pub fn into_vec(self) -> Vec<ValidationError> {
        self.0.into_vec()
    }

    /// Returns a reference to the underlying `NonEmptyVec`.
    pub fn as_non_empty_vec(&self) -> &NonEmptyVec<ValidationError> {
        &self.0
    }
}

impl Semigroup for Failure {
    fn combine(self, other: Self) -> Self {
        Failure(self.0.combine(other.0))
    }
}

impl Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Validation failed with {} error(s):", self.len())?;
        for (i, error) in self.iter().enumerate() {
            writeln!(f, "  {}. {}", i + 1, error)?;
        }
        Ok(())
    }
}

impl std::error::Error for Failure {}

impl IntoIterator for Failure {
    type Item = ValidationError;
    type IntoIter = std::vec::IntoIter<ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_vec().into_iter()
    }
}

impl<'a> IntoIterator for &'a Failure {
    type Item = &'a ValidationError;
    type IntoIter = Box<dyn Iterator<Item = &'a ValidationError> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.0.iter())
    }
}

const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<Failure>();
    assert_sync::<Failure>();
};
