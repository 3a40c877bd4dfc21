use crate::bootstrap::Bootstrapper;
use crate::container::ContainerExt;
use crate::exceptions::ExceptionRunner;
use crate::{Application, ApplicationError};
use tracing::debug;

/// Installs the container's [`ExceptionRunner`] on the application, unless
/// the caller already set one.
#[derive(Debug, Clone, Copy, Default)]
pub struct HandleExceptions;

impl Bootstrapper for HandleExceptions {
    fn bootstrap(&self, app: &Application) -> Result<(), ApplicationError> {
        if app.exception_runner().is_some() {
            debug!("keeping the exception runner set by the caller");
            return Ok(());
        }

        let runner = app.container()?.resolve::<dyn ExceptionRunner>()?;
        app.set_exception_runner(runner);
        Ok(())
    }
}
