use crate::container::Identifier;
use std::error::Error;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ContainerError {
    #[error("no definition for {identifier}")]
    NotFound { identifier: Identifier },

    #[error("{identifier} does not resolve to {expected}")]
    TypeMismatch { identifier: Identifier, expected: &'static str },

    #[error("circular dependency while resolving {identifier}")]
    CircularDependency { identifier: Identifier },

    #[error("factory for {identifier} failed: {source}")]
    Factory {
        identifier: Identifier,
        #[source]
        source: Box<dyn Error + Send + Sync>,
    },
}

impl ContainerError {
    pub fn not_found(identifier: &Identifier) -> Self {
        Self::NotFound { identifier: identifier.clone() }
    }

    pub fn type_mismatch(identifier: &Identifier, expected: &'static str) -> Self {
        Self::TypeMismatch { identifier: identifier.clone(), expected }
    }

    pub fn circular_dependency(identifier: &Identifier) -> Self {
        Self::CircularDependency { identifier: identifier.clone() }
    }

    /// Wraps an error raised by user code inside a factory.
    pub fn factory<E: Into<Box<dyn Error + Send + Sync>>>(identifier: Identifier, source: E) -> Self {
        Self::Factory { identifier, source: source.into() }
    }
}
