//! Runtype registry for named and recursive runtypes.
//!
//! This module provides the [`RuntypeRegistry`] type that stores named
//! runtypes and hands out references to them, so runtypes can refer to
//! themselves or to each other.

use parking_lot::RwLock;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

use crate::runtype::{Reflect, ReferenceRuntype, Runtype};
use crate::validation::ValidationOptions;
use crate::CheckResult;

/// Storage shared between a registry and the references it hands out.
pub(crate) type RuntypeTable = RwLock<HashMap<String, Runtype>>;

/// A thread-safe registry of named runtypes.
///
/// # Thread Safety
///
/// The registry uses `Arc<RwLock<...>>` for thread-safe access:
/// - Multiple threads can validate concurrently (read-only access)
/// - Registration operations are serialized (write access)
///
/// Clones share the same storage.
///
/// # Example
///
/// ```rust
/// use runtypes::{Runtype, RuntypeRegistry};
/// use serde_json::json;
///
/// let registry = RuntypeRegistry::new();
///
/// // A comment with nested replies of the same shape
/// registry.register("Comment", Runtype::record([
///     ("text", Runtype::string()),
///     ("replies", Runtype::array(registry.reference("Comment"))),
/// ])).unwrap();
///
/// let value = json!({
///     "text": "top",
///     "replies": [{"text": "reply", "replies": []}]
/// });
/// let result = registry.validate("Comment", &value).unwrap();
/// assert!(result.is_success());
/// ```
#[derive(Clone, Default)]
pub struct RuntypeRegistry {
    table: Arc<RuntypeTable>,
}

impl RuntypeRegistry {
    /// Creates a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a runtype under the given name.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::DuplicateName` if the name is already registered.
    ///
    /// # Example
    ///
    /// ```rust
    /// use runtypes::{Runtype, RuntypeRegistry};
    ///
    /// let registry = RuntypeRegistry::new();
    /// registry.register("Email", Runtype::string()).unwrap();
    ///
    /// // Duplicate registration fails
    /// assert!(registry.register("Email", Runtype::string()).is_err());
    /// ```
    pub fn register(&self, name: impl Into<String>, runtype: Runtype) -> Result<(), RegistryError> {
        let name = name.into();
        let mut table = self.table.write();

        if table.contains_key(&name) {
            return Err(RegistryError::DuplicateName(name));
        }

        tracing::debug!(name = %name, tag = runtype.tag(), "registered runtype");
        table.insert(name, runtype);
        Ok(())
    }

    /// Retrieves a runtype by name.
    pub fn get(&self, name: &str) -> Option<Runtype> {
        self.table.read().get(name).cloned()
    }

    /// Returns true if a runtype is registered under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.table.read().contains_key(name)
    }

    /// Returns the number of registered runtypes.
    pub fn len(&self) -> usize {
        self.table.read().len()
    }

    /// Returns true if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.table.read().is_empty()
    }

    /// Returns a runtype that resolves `name` in this registry when checked.
    ///
    /// The name does not need to be registered yet. Checking a reference
    /// whose name is still unknown fails with a `missing_reference` error.
    pub fn reference(&self, name: impl Into<String>) -> Runtype {
        Runtype::new(Reflect::Reference(ReferenceRuntype::new(
            name.into(),
            Arc::downgrade(&self.table),
        )))
    }

    /// Returns the names referenced by registered runtypes that are not
    /// themselves registered, sorted and without duplicates.
    ///
    /// # Example
    ///
    /// ```rust
    /// use runtypes::{Runtype, RuntypeRegistry};
    ///
    /// let registry = RuntypeRegistry::new();
    /// registry.register("User", Runtype::record([
    ///     ("id", registry.reference("UserId")),
    /// ])).unwrap();
    ///
    /// assert_eq!(registry.validate_refs(), vec!["UserId"]);
    /// ```
    pub fn validate_refs(&self) -> Vec<String> {
        let table = self.table.read();
        let mut all_refs = Vec::new();

        for runtype in table.values() {
            runtype.collect_refs(&mut all_refs);
        }

        let mut unresolved: Vec<String> = all_refs
            .into_iter()
            .filter(|name| !table.contains_key(name))
            .collect();

        unresolved.sort();
        unresolved.dedup();
        unresolved
    }

    /// Validates a value against a named runtype, collecting every error.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::NotFound` if the name is not registered.
    pub fn validate<'a>(&self, name: &str, value: &'a Value) -> Result<CheckResult<'a>, RegistryError> {
        self.validate_with(name, value, &ValidationOptions::default())
    }

    /// Validates a value against a named runtype with explicit options.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::NotFound` if the name is not registered.
    pub fn validate_with<'a>(
        &self,
        name: &str,
        value: &'a Value,
        options: &ValidationOptions,
    ) -> Result<CheckResult<'a>, RegistryError> {
        let runtype = self
            .get(name)
            .ok_or_else(|| RegistryError::NotFound(name.to_string()))?;

        Ok(runtype.validate_with(value, options))
    }
}

/// Errors that can occur during registry operations.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// Attempted to register a runtype with a name that already exists.
    #[error("runtype '{0}' already registered")]
    DuplicateName(String),

    /// Attempted to validate with a name that doesn't exist.
    #[error("runtype '{0}' not found")]
    NotFound(String),
}

const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<RuntypeRegistry>();
    assert_sync::<RuntypeRegistry>();
};
