//! # Runtypes
//!
//! Composable runtime type checks for JSON values.
//!
//! ## Overview
//!
//! A [`Runtype`] describes a shape (a number, an array of records, a union
//! of literals, ...) and checks, at runtime, whether an arbitrary
//! `serde_json::Value` has that shape. Checks never transform the value: a
//! successful check returns a reference to the very value it was given. A
//! failing check returns every error it found, each located by a key path
//! such as `[2].name`, or only the first one when fail-fast mode is on.
//!
//! ## Core Types
//!
//! - [`Runtype`]: an immutable, shareable check; [`Reflect`] exposes its kind
//! - [`Failure`]: a non-empty, ordered list of [`ValidationError`]s
//! - [`KeyPath`]: the structured location of an error (`[1].[1]`, `users.[0].email`)
//! - [`ValidationOptions`]: per-call switches such as fail-fast
//! - [`RuntypeRegistry`]: named runtypes and references for recursive shapes
//!
//! ## Example
//!
//! ```rust
//! use runtypes::Runtype;
//! use serde_json::json;
//!
//! let numbers = Runtype::array(Runtype::number());
//!
//! assert!(numbers.validate(&json!([1, 2, 3])).is_success());
//!
//! let failure = numbers.validate(&json!([1, "x", 3])).into_result().unwrap_err();
//! assert_eq!(failure.len(), 1);
//! assert_eq!(failure.first().key(), Some("[1]".to_string()));
//! assert_eq!(failure.first().message, "Expected number, but was string");
//!
//! let failure = numbers.validate(&json!("not an array")).into_result().unwrap_err();
//! assert_eq!(failure.first().key(), None);
//! assert_eq!(failure.first().message, "Expected array, but was string");
//! ```

pub mod error;
pub mod path;
pub mod registry;
pub mod runtype;
pub mod validation;

pub use error::{Failure, ValidationError};
pub use path::{KeyPath, PathSegment};
pub use registry::{RegistryError, RuntypeRegistry};
pub use runtype::{
    ArrayRuntype, ConstraintRuntype, CustomRuntype, RecordRuntype, ReferenceRuntype, Reflect,
    Runtype,
};
pub use validation::{dispatch, ValidationOptions, Visited};

/// Type alias for validation results using [`Failure`].
pub type ValidationResult<T> = stillwater::Validation<T, Failure>;

/// The result of checking a borrowed value: the value itself on success.
pub type CheckResult<'a> = ValidationResult<&'a serde_json::Value>;
