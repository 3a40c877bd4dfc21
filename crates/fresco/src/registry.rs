//! The registry collects definitions before a container exists.
//!
//! A [`Registry`] is a cheap, cloneable handle: every clone sees the same
//! entries. Applications that should accumulate definitions share one handle;
//! applications that must stay isolated either get their own registry or call
//! [`Registry::flush`] between lifecycles.

use crate::container::{Binding, DefinitionProvider, Definitions, Identifier};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::debug;

#[derive(Debug, Clone, Default)]
pub struct Registry {
    definitions: Arc<RwLock<Definitions>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merges every definition of `provider`, overwriting entries with the
    /// same identifier.
    pub fn add_definitions(&self, provider: &dyn DefinitionProvider) {
        let definitions = provider.definitions();
        let mut current = self.write();

        for identifier in definitions.identifiers().filter(|identifier| current.contains(identifier)) {
            debug!(%identifier, "definition overridden");
        }

        current.extend(definitions);
    }

    /// Adds or overwrites a single entry.
    pub fn add_definition(&self, identifier: Identifier, binding: Binding) {
        if self.write().insert(identifier.clone(), binding).is_some() {
            debug!(%identifier, "definition overridden");
        }
    }

    /// Returns a snapshot of the current definitions.
    pub fn definitions(&self) -> Definitions {
        self.read().clone()
    }

    pub fn get(&self, identifier: &Identifier) -> Option<Binding> {
        self.read().get(identifier).cloned()
    }

    pub fn contains(&self, identifier: &Identifier) -> bool {
        self.read().contains(identifier)
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Removes every entry, for every holder of this registry.
    pub fn flush(&self) {
        self.write().clear();
        debug!("registry flushed");
    }

    fn read(&self) -> RwLockReadGuard<'_, Definitions> {
        self.definitions.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Definitions> {
        self.definitions.write().unwrap_or_else(PoisonError::into_inner)
    }
}
