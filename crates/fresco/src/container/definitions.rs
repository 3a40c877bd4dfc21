//! Definitions: bindings from capability identifiers to the values a
//! container hands out for them.

use crate::container::{Container, ContainerError, Identifier, Instance};
use indexmap::IndexMap;
use indexmap::map::Iter;
use std::fmt;
use std::sync::Arc;

/// A factory producing an instance. It receives the container so it can
/// resolve its own dependencies.
pub type Factory = Arc<dyn Fn(&dyn Container) -> Result<Instance, ContainerError> + Send + Sync>;

/// What an identifier is bound to.
#[derive(Clone)]
pub enum Binding {
    /// Built on first resolution, then cached by the container.
    Factory(Factory),
    /// Handed out as is.
    Instance(Instance),
}

impl Binding {
    pub fn factory<F>(factory: F) -> Self
    where
        F: Fn(&dyn Container) -> Result<Instance, ContainerError> + Send + Sync + 'static,
    {
        Binding::Factory(Arc::new(factory))
    }

    pub fn instance<T: ?Sized + Send + Sync + 'static>(value: Arc<T>) -> Self {
        Binding::Instance(Instance::shared(value))
    }
}

impl fmt::Debug for Binding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Binding::Factory(_) => f.write_str("Binding::Factory"),
            Binding::Instance(instance) => f.debug_tuple("Binding::Instance").field(instance).finish(),
        }
    }
}

/// An ordered set of bindings.
///
/// Inserting an identifier that is already present replaces its binding and
/// keeps its original position: the last write wins.
#[derive(Debug, Clone, Default)]
pub struct Definitions {
    bindings: IndexMap<Identifier, Binding>,
}

impl Definitions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds the capability `T` to a factory.
    ///
    /// # Example
    /// ```
    /// use fresco::container::Definitions;
    /// use std::sync::Arc;
    ///
    /// trait Greeter: Send + Sync {
    ///     fn greet(&self) -> String;
    /// }
    ///
    /// struct English;
    /// impl Greeter for English {
    ///     fn greet(&self) -> String {
    ///         "hello".into()
    ///     }
    /// }
    ///
    /// let definitions = Definitions::new().bind::<dyn Greeter, _>(|_container| {
    ///     let greeter: Arc<dyn Greeter> = Arc::new(English);
    ///     Ok(greeter)
    /// });
    /// assert_eq!(definitions.len(), 1);
    /// ```
    #[must_use]
    pub fn bind<T, F>(self, factory: F) -> Self
    where
        T: ?Sized + Send + Sync + 'static,
        F: Fn(&dyn Container) -> Result<Arc<T>, ContainerError> + Send + Sync + 'static,
    {
        self.bind_as(Identifier::of::<T>(), factory)
    }

    /// Binds `identifier` to a factory producing an `Arc<T>`.
    #[must_use]
    pub fn bind_as<T, F>(mut self, identifier: Identifier, factory: F) -> Self
    where
        T: ?Sized + Send + Sync + 'static,
        F: Fn(&dyn Container) -> Result<Arc<T>, ContainerError> + Send + Sync + 'static,
    {
        self.insert(identifier, Binding::factory(move |container| factory(container).map(Instance::shared)));
        self
    }

    /// Binds the capability `T` to an existing value.
    #[must_use]
    pub fn instance<T: ?Sized + Send + Sync + 'static>(mut self, value: Arc<T>) -> Self {
        self.insert(Identifier::of::<T>(), Binding::instance(value));
        self
    }

    /// Inserts a binding, returning the one it replaced.
    pub fn insert(&mut self, identifier: Identifier, binding: Binding) -> Option<Binding> {
        self.bindings.insert(identifier, binding)
    }

    /// Merges `other` into `self`, entries of `other` winning on collision.
    pub fn extend(&mut self, other: Definitions) {
        self.bindings.extend(other.bindings);
    }

    pub fn get(&self, identifier: &Identifier) -> Option<&Binding> {
        self.bindings.get(identifier)
    }

    pub fn contains(&self, identifier: &Identifier) -> bool {
        self.bindings.contains_key(identifier)
    }

    pub fn identifiers(&self) -> impl Iterator<Item = &Identifier> {
        self.bindings.keys()
    }

    pub fn iter(&self) -> Iter<'_, Identifier, Binding> {
        self.bindings.iter()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    pub(crate) fn clear(&mut self) {
        self.bindings.clear();
    }
}

impl<'a> IntoIterator for &'a Definitions {
    type Item = (&'a Identifier, &'a Binding);
    type IntoIter = Iter<'a, Identifier, Binding>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Something that contributes definitions to a registry.
pub trait DefinitionProvider {
    fn definitions(&self) -> Definitions;
}

impl DefinitionProvider for Definitions {
    fn definitions(&self) -> Definitions {
        self.clone()
    }
}

/// A single named definition, usable wherever a provider is expected.
#[derive(Debug, Clone)]
pub struct Definition {
    identifier: Identifier,
    binding: Binding,
}

impl Definition {
    pub fn new(identifier: Identifier, binding: Binding) -> Self {
        Self { identifier, binding }
    }

    pub fn identifier(&self) -> &Identifier {
        &self.identifier
    }

    pub fn binding(&self) -> &Binding {
        &self.binding
    }
}

impl DefinitionProvider for Definition {
    fn definitions(&self) -> Definitions {
        let mut definitions = Definitions::new();
        definitions.insert(self.identifier.clone(), self.binding.clone());
        definitions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::container::ContainerExt;
    use crate::container::DefaultContainer;

    #[test]
    fn last_write_wins_and_keeps_position() {
        let mut definitions = Definitions::new()
            .instance(Arc::new(1_u32))
            .instance(Arc::new(String::from("first")))
            .instance(Arc::new(2_u32));

        assert_eq!(definitions.len(), 2);
        assert_eq!(
            definitions.identifiers().cloned().collect::<Vec<_>>(),
            vec![Identifier::of::<u32>(), Identifier::of::<String>()]
        );

        definitions.extend(Definitions::new().instance(Arc::new(String::from("second"))));

        let container = DefaultContainer::new(definitions);
        assert_eq!(*container.resolve::<u32>().unwrap(), 2);
        assert_eq!(*container.resolve::<String>().unwrap(), "second");
    }

    #[test]
    fn single_definition_is_a_provider() {
        let definition = Definition::new(Identifier::named("answer"), Binding::instance(Arc::new(42_u8)));

        let definitions = definition.definitions();
        assert_eq!(definitions.len(), 1);
        assert!(definitions.contains(definition.identifier()));
        assert!(matches!(definition.binding(), Binding::Instance(_)));
    }
}
