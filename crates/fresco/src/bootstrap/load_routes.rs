use crate::bootstrap::Bootstrapper;
use crate::routing::{RouteLoader, Router};
use crate::{Application, ApplicationError};
use std::fmt;
use std::sync::Arc;

/// Asks the route loader to populate the router.
pub struct LoadRoutes {
    loader: Arc<dyn RouteLoader>,
    router: Arc<dyn Router>,
}

impl LoadRoutes {
    pub fn new(loader: Arc<dyn RouteLoader>, router: Arc<dyn Router>) -> Self {
        Self { loader, router }
    }
}

impl Bootstrapper for LoadRoutes {
    fn bootstrap(&self, _app: &Application) -> Result<(), ApplicationError> {
        self.loader.load_routes(self.router.as_ref())?;
        Ok(())
    }
}

impl fmt::Debug for LoadRoutes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoadRoutes").finish_non_exhaustive()
    }
}
