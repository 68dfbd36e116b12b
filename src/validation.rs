//! Per-call validation state and the recursive dispatch function.
//!
//! This module provides [`ValidationOptions`], the read-only switches passed
//! unchanged through one validation run, [`Visited`], the in-progress guard
//! that breaks runtype cycles, and [`dispatch`], the single entry point every
//! combinator uses to validate a child value.

use std::collections::HashSet;

use serde_json::Value;
use stillwater::Validation;

use crate::runtype::Runtype;
use crate::CheckResult;

/// Default bound on nested registry reference resolutions.
pub const DEFAULT_MAX_REFERENCE_DEPTH: usize = 100;

/// Behavioral switches for a single validation run.
///
/// Options are chosen by the caller and passed by reference through every
/// recursive call; nothing mutates them during a run.
///
/// # Example
///
/// ```rust
/// use runtypes::{Runtype, ValidationOptions};
/// use serde_json::json;
///
/// let numbers = Runtype::array(Runtype::number());
/// let value = json!([1, "x", 3, "y"]);
///
/// let all = numbers.validate_with(&value, &ValidationOptions::collect_all());
/// assert_eq!(all.into_result().unwrap_err().len(), 2);
///
/// let first = numbers.validate_with(&value, &ValidationOptions::fail_fast_mode());
/// assert_eq!(first.into_result().unwrap_err().len(), 1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationOptions {
    fail_fast: bool,
    max_reference_depth: usize,
}

impl ValidationOptions {
    /// Options that collect every error (the default).
    pub fn collect_all() -> Self {
        Self::default()
    }

    /// Options that stop at the first failing element or field.
    pub fn fail_fast_mode() -> Self {
        Self::default().fail_fast(true)
    }

    /// Sets whether containers stop scanning at the first failure.
    pub fn fail_fast(mut self, fail_fast: bool) -> Self {
        self.fail_fast = fail_fast;
        self
    }

    /// Sets the maximum number of nested registry reference resolutions.
    ///
    /// Reaching the limit produces a `max_depth_exceeded` error instead of
    /// recursing further.
    pub fn max_reference_depth(mut self, depth: usize) -> Self {
        self.max_reference_depth = depth;
        self
    }

    /// Returns true if containers stop at the first failure.
    pub fn is_fail_fast(&self) -> bool {
        self.fail_fast
    }

    /// Returns the configured reference depth limit.
    pub fn reference_depth_limit(&self) -> usize {
        self.max_reference_depth
    }
}

impl Default for ValidationOptions {
    fn default() -> Self {
        Self {
            fail_fast: false,
            max_reference_depth: DEFAULT_MAX_REFERENCE_DEPTH,
        }
    }
}

/// Cycle guard for one top-level validation call.
///
/// Records which `(value, runtype)` pairs are currently being checked. A pair
/// that is re-entered while still in progress is a cycle through the runtype
/// graph and is treated as conforming. The guard also tracks how deep the
/// current chain of registry references is.
///
/// A fresh `Visited` is created by every top-level entry point and dropped
/// when it returns; runtypes never store one.
#[derive(Debug, Default)]
pub struct Visited {
    in_progress: HashSet<(usize, usize)>,
    reference_depth: usize,
}

impl Visited {
    /// Creates an empty guard.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if no check is currently in progress.
    pub fn is_idle(&self) -> bool {
        self.in_progress.is_empty()
    }

    /// Returns the depth of the current reference chain.
    pub fn reference_depth(&self) -> usize {
        self.reference_depth
    }

    /// Marks a pair as in progress. Returns false if it already was.
    pub(crate) fn enter(&mut self, key: (usize, usize)) -> bool {
        self.in_progress.insert(key)
    }

    pub(crate) fn leave(&mut self, key: (usize, usize)) {
        self.in_progress.remove(&key);
    }

    pub(crate) fn descend_reference(&mut self) {
        self.reference_depth += 1;
    }

    pub(crate) fn ascend_reference(&mut self) {
        self.reference_depth = self.reference_depth.saturating_sub(1);
    }
}

/// Validates `value` against `runtype` as part of an enclosing check.
///
/// Every combinator reaches its children through this function. The result
/// of the runtype's own check is returned unchanged; keys stay relative to
/// `value`. If the same runtype is already checking this exact value further
/// up the stack, the call succeeds immediately instead of recursing.
pub fn dispatch<'a>(
    runtype: &Runtype,
    value: &'a Value,
    visited: &mut Visited,
    options: &ValidationOptions,
) -> CheckResult<'a> {
    let key = (value as *const Value as usize, runtype.id());
    if !visited.enter(key) {
        tracing::trace!(tag = runtype.tag(), "runtype re-entered on in-progress value");
        return Validation::Success(value);
    }

    let result = runtype.check(value, visited, options);
    visited.leave(key);
    result
}
