//! The dependency-injection container contracts.
//!
//! A [`Container`] resolves capability [`Identifier`]s to [`Instance`]s. It is
//! built from [`Definitions`] by a [`ContainerDefinition`]; the framework uses
//! [`DefaultContainerDefinition`] unless the application is given another one.

mod default_container;
mod definitions;
mod error;
mod identifier;
mod instance;

pub use default_container::DefaultContainer;
pub use definitions::{Binding, Definition, DefinitionProvider, Definitions, Factory};
pub use error::ContainerError;
pub use identifier::Identifier;
pub use instance::Instance;

use std::any::type_name;
use std::sync::Arc;

/// Resolves capabilities to instances.
#[cfg_attr(test, mockall::automock)]
pub trait Container: Send + Sync {
    /// Resolves `identifier` to an instance.
    fn make(&self, identifier: &Identifier) -> Result<Instance, ContainerError>;

    /// Registers a ready value for `identifier`, replacing any cached one.
    fn instance(&self, identifier: Identifier, value: Instance);
}

/// Typed helpers over [`Container`].
pub trait ContainerExt: Container {
    /// Resolves the capability `T`.
    fn resolve<T: ?Sized + Send + Sync + 'static>(&self) -> Result<Arc<T>, ContainerError> {
        self.resolve_as(&Identifier::of::<T>())
    }

    /// Resolves `identifier`, expecting it to hold an `Arc<T>`.
    fn resolve_as<T: ?Sized + Send + Sync + 'static>(&self, identifier: &Identifier) -> Result<Arc<T>, ContainerError> {
        self.make(identifier)?.downcast::<T>().ok_or_else(|| ContainerError::type_mismatch(identifier, type_name::<T>()))
    }

    /// Registers `value` as the instance of capability `T`.
    fn share<T: ?Sized + Send + Sync + 'static>(&self, value: Arc<T>) {
        self.instance(Identifier::of::<T>(), Instance::shared(value));
    }
}

impl<C: Container + ?Sized> ContainerExt for C {}

/// Builds a container out of the definitions collected in a registry.
pub trait ContainerDefinition: Send + Sync {
    fn define(&self, definitions: &Definitions) -> Result<Arc<dyn Container>, ContainerError>;
}

/// Builds a [`DefaultContainer`].
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultContainerDefinition;

impl ContainerDefinition for DefaultContainerDefinition {
    fn define(&self, definitions: &Definitions) -> Result<Arc<dyn Container>, ContainerError> {
        Ok(Arc::new(DefaultContainer::new(definitions.clone())))
    }
}
