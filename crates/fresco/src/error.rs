use crate::config::ConfigError;
use crate::container::ContainerError;
use crate::routing::RoutingError;
use thiserror::Error;

/// Everything that can abort building or bootstrapping an application.
#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("container error: {source}")]
    Container {
        #[from]
        source: ContainerError,
    },

    #[error("routing error: {source}")]
    Routing {
        #[from]
        source: RoutingError,
    },

    #[error("configuration error: {source}")]
    Config {
        #[from]
        source: ConfigError,
    },

    #[error("the container definition cannot change once the container is built")]
    ContainerAlreadyBuilt,
}
