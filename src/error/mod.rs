//! Error types for validation failures.
//!
//! This module provides [`ValidationError`] for a single failed check and
//! [`Failure`], the non-empty collection every failing check returns.

mod failure;

pub use failure::{Failure, ValidationError};
