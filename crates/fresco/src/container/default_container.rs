use crate::container::{Binding, Container, ContainerError, Definitions, Factory, Identifier, Instance};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::{Mutex, PoisonError, RwLock};
use std::thread::{self, ThreadId};
use tracing::trace;

/// A container resolving from a fixed snapshot of definitions.
///
/// Factory bindings are invoked at most once: the first successful result is
/// cached and handed out to every later caller, so all bindings behave as
/// singletons. Values registered with [`Container::instance`] shadow the
/// definitions.
///
/// Cycles are tracked per thread: two threads may build the same identifier
/// at once, the first result to be stored wins.
pub struct DefaultContainer {
    definitions: Definitions,
    instances: RwLock<HashMap<Identifier, Instance>>,
    resolving: Mutex<HashSet<(ThreadId, Identifier)>>,
}

/// Marks an identifier as being built on the current thread until dropped,
/// including when the factory panics.
struct Resolving<'a> {
    resolving: &'a Mutex<HashSet<(ThreadId, Identifier)>>,
    key: (ThreadId, Identifier),
}

impl<'a> Resolving<'a> {
    fn enter(
        resolving: &'a Mutex<HashSet<(ThreadId, Identifier)>>,
        identifier: &Identifier,
    ) -> Result<Self, ContainerError> {
        let key = (thread::current().id(), identifier.clone());
        if !resolving.lock().unwrap_or_else(PoisonError::into_inner).insert(key.clone()) {
            return Err(ContainerError::circular_dependency(identifier));
        }
        Ok(Self { resolving, key })
    }
}

impl Drop for Resolving<'_> {
    fn drop(&mut self) {
        self.resolving.lock().unwrap_or_else(PoisonError::into_inner).remove(&self.key);
    }
}

impl DefaultContainer {
    pub fn new(definitions: Definitions) -> Self {
        Self { definitions, instances: RwLock::new(HashMap::new()), resolving: Mutex::new(HashSet::new()) }
    }

    pub fn definitions(&self) -> &Definitions {
        &self.definitions
    }

    /// Returns true if `identifier` is defined or has a registered instance.
    pub fn has(&self, identifier: &Identifier) -> bool {
        self.definitions.contains(identifier) || self.cached(identifier).is_some()
    }

    fn cached(&self, identifier: &Identifier) -> Option<Instance> {
        self.instances.read().unwrap_or_else(PoisonError::into_inner).get(identifier).cloned()
    }

    fn build(&self, identifier: &Identifier, factory: &Factory) -> Result<Instance, ContainerError> {
        let guard = Resolving::enter(&self.resolving, identifier)?;

        trace!(%identifier, "building instance");
        // the lock is released while the factory runs, it may resolve other identifiers
        let result = (factory.as_ref())(self);
        drop(guard);

        let instance = result?;
        self.instances
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(identifier.clone())
            .or_insert(instance);

        // another resolution of the same identifier may have won the race
        self.cached(identifier).ok_or_else(|| ContainerError::not_found(identifier))
    }
}

impl Container for DefaultContainer {
    fn make(&self, identifier: &Identifier) -> Result<Instance, ContainerError> {
        if let Some(instance) = self.cached(identifier) {
            return Ok(instance);
        }

        match self.definitions.get(identifier) {
            Some(Binding::Instance(instance)) => Ok(instance.clone()),
            Some(Binding::Factory(factory)) => self.build(identifier, factory),
            None => Err(ContainerError::not_found(identifier)),
        }
    }

    fn instance(&self, identifier: Identifier, value: Instance) {
        self.instances.write().unwrap_or_else(PoisonError::into_inner).insert(identifier, value);
    }
}

impl fmt::Debug for DefaultContainer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DefaultContainer")
            .field("definitions", &self.definitions.len())
            .field("instances", &self.instances.read().unwrap_or_else(PoisonError::into_inner).len())
            .finish_non_exhaustive()
    }
}
