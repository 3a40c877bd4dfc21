//! Units of startup work run by [`Application::bootstrap`](crate::Application::bootstrap).

mod handle_exceptions;
mod load_routes;
mod register_definitions;

pub use handle_exceptions::HandleExceptions;
pub use load_routes::LoadRoutes;
pub use register_definitions::RegisterDefinitions;

use crate::{Application, ApplicationError};

/// One step of the application startup sequence.
///
/// Bootstrappers are resolved from the container right before they run, so
/// their own dependencies come from the container too. A failing bootstrapper
/// aborts the sequence.
#[cfg_attr(test, mockall::automock)]
pub trait Bootstrapper: Send + Sync {
    fn bootstrap(&self, app: &Application) -> Result<(), ApplicationError>;
}
