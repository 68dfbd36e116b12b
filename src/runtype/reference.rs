//! Reference runtype for registry-based validation.
//!
//! A [`ReferenceRuntype`] names a runtype held by a
//! [`RuntypeRegistry`](crate::RuntypeRegistry) and resolves it each time it is
//! checked. This is how self-referential and mutually recursive runtypes are
//! written.

use std::sync::Weak;

use serde_json::Value;
use stillwater::Validation;

use crate::error::{Failure, ValidationError};
use crate::registry::RuntypeTable;
use crate::validation::{dispatch, ValidationOptions, Visited};
use crate::CheckResult;

/// A runtype that refers to another runtype by registry name.
///
/// The reference holds the registry weakly, so registering a runtype that
/// refers to itself does not keep the registry alive forever.
#[derive(Debug, Clone)]
pub struct ReferenceRuntype {
    name: String,
    table: Weak<RuntypeTable>,
}

impl ReferenceRuntype {
    pub(crate) fn new(name: String, table: Weak<RuntypeTable>) -> Self {
        Self { name, table }
    }

    /// Returns the name of the referenced runtype.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn check<'a>(
        &self,
        value: &'a Value,
        visited: &mut Visited,
        options: &ValidationOptions,
    ) -> CheckResult<'a> {
        let limit = options.reference_depth_limit();
        if visited.reference_depth() >= limit {
            tracing::debug!(name = %self.name, limit, "reference depth limit reached");
            return Validation::Failure(Failure::single(
                ValidationError::at_root(format!(
                    "Maximum reference depth {} exceeded resolving '{}'",
                    limit, self.name
                ))
                .with_code("max_depth_exceeded"),
            ));
        }

        let table = match self.table.upgrade() {
            Some(table) => table,
            None => {
                return Validation::Failure(Failure::single(
                    ValidationError::at_root(format!(
                        "Reference to '{}' outlived its registry",
                        self.name
                    ))
                    .with_code("missing_registry"),
                ))
            }
        };

        // The read guard is a temporary here, released before recursing.
        let target = table.read().get(&self.name).cloned();
        let target = match target {
            Some(target) => target,
            None => {
                return Validation::Failure(Failure::single(
                    ValidationError::at_root(format!("Runtype '{}' is not registered", self.name))
                        .with_code("missing_reference"),
                ))
            }
        };

        visited.descend_reference();
        let result = dispatch(&target, value, visited, options);
        visited.ascend_reference();
        result
    }
}
