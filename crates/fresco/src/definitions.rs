//! Definition providers shipped with the framework.

use crate::{Request, RootPath};
use crate::bootstrap::{Bootstrapper, HandleExceptions, LoadRoutes, RegisterDefinitions};
use crate::config::AppConfig;
use crate::container::{ContainerExt, DefinitionProvider, Definitions, Identifier};
use crate::exceptions::{ExceptionRunner, Runner};
use crate::routing::{LoadRoutesFromFile, RouteLoader, Router, TreeRouter};
use std::sync::Arc;

/// The bootstrappers every application runs and the default exception runner.
///
/// Registered by the application itself at construction.
#[derive(Debug, Clone, Copy, Default)]
pub struct FoundationDefinitions;

impl DefinitionProvider for FoundationDefinitions {
    fn definitions(&self) -> Definitions {
        Definitions::new()
            .bind_as(Identifier::of::<RegisterDefinitions>(), |_| {
                let bootstrapper: Arc<dyn Bootstrapper> = Arc::new(RegisterDefinitions);
                Ok(bootstrapper)
            })
            .bind_as(Identifier::of::<HandleExceptions>(), |_| {
                let bootstrapper: Arc<dyn Bootstrapper> = Arc::new(HandleExceptions);
                Ok(bootstrapper)
            })
            .bind::<dyn ExceptionRunner, _>(|container| {
                let config = container.resolve::<AppConfig>()?;
                let runner: Arc<dyn ExceptionRunner> = Arc::new(Runner::new(config.debug()));
                Ok(runner)
            })
    }
}

/// A [`TreeRouter`] and the [`LoadRoutes`] bootstrapper.
///
/// `LoadRoutes` also needs a [`RouteLoader`], see [`RouteFileDefinition`].
#[derive(Debug, Clone, Copy, Default)]
pub struct RoutingDefinitions;

impl DefinitionProvider for RoutingDefinitions {
    fn definitions(&self) -> Definitions {
        Definitions::new()
            .bind::<dyn Router, _>(|_| {
                let router: Arc<dyn Router> = Arc::new(TreeRouter::new());
                Ok(router)
            })
            .bind_as(Identifier::of::<LoadRoutes>(), |container| {
                let loader = container.resolve::<dyn RouteLoader>()?;
                let router = container.resolve::<dyn Router>()?;
                let bootstrapper: Arc<dyn Bootstrapper> = Arc::new(LoadRoutes::new(loader, router));
                Ok(bootstrapper)
            })
    }
}

/// Loads routes from the file named by [`AppConfig::routes`], relative to
/// the application root.
#[derive(Debug, Clone, Copy, Default)]
pub struct RouteFileDefinition;

impl DefinitionProvider for RouteFileDefinition {
    fn definitions(&self) -> Definitions {
        Definitions::new().bind::<dyn RouteLoader, _>(|container| {
            let root = container.resolve::<RootPath>()?;
            let config = container.resolve::<AppConfig>()?;
            let loader: Arc<dyn RouteLoader> = Arc::new(LoadRoutesFromFile::new(root.path().join(&config.routes)));
            Ok(loader)
        })
    }
}

/// Makes a [`Request`] resolvable from the container.
///
/// ```
/// use fresco::definitions::RequestDefinition;
///
/// let request = http::Request::get("/users?page=2").body(Vec::<u8>::new()).unwrap();
/// let definition = RequestDefinition::new(request);
/// assert_eq!(definition.request().get("page"), Some("2"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct RequestDefinition {
    request: Request,
}

impl RequestDefinition {
    pub fn new(request: impl Into<Request>) -> Self {
        Self { request: request.into() }
    }

    pub fn request(&self) -> &Request {
        &self.request
    }
}

impl DefinitionProvider for RequestDefinition {
    fn definitions(&self) -> Definitions {
        Definitions::new().instance(Arc::new(self.request.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Application;
    use crate::container::{ContainerError, DefaultContainer};

    #[test]
    fn foundation_binds_the_default_bootstrappers() {
        let definitions = FoundationDefinitions.definitions();

        assert!(definitions.contains(&Identifier::of::<RegisterDefinitions>()));
        assert!(definitions.contains(&Identifier::of::<HandleExceptions>()));
        assert!(definitions.contains(&Identifier::of::<dyn ExceptionRunner>()));
    }

    #[test]
    fn route_file_loader_points_into_the_root() {
        let mut definitions = RouteFileDefinition.definitions();
        definitions.extend(
            Definitions::new().instance(Arc::new(RootPath::new("/srv/app"))).instance(Arc::new(AppConfig::default())),
        );
        let container = DefaultContainer::new(definitions);

        assert!(container.resolve::<dyn RouteLoader>().is_ok());
    }

    #[test]
    fn load_routes_requires_a_loader() {
        let container = DefaultContainer::new(RoutingDefinitions.definitions());

        let result = container.resolve_as::<dyn Bootstrapper>(&Identifier::of::<LoadRoutes>());
        assert!(matches!(result, Err(ContainerError::NotFound { .. })));
    }

    #[test]
    fn request_definition_makes_the_request_resolvable() {
        let root = tempfile::tempdir().unwrap();
        let app = Application::new(root.path());
        let request = http::Request::post("/users").header("accept", "application/json").body("{}").unwrap();

        app.definitions(&[&RoutingDefinitions, &RequestDefinition::new(request)]);

        assert!(app.registry().contains(&Identifier::of::<Request>()));
        let resolved = app.container().unwrap().resolve::<Request>().unwrap();
        assert_eq!(resolved.method(), &http::Method::POST);
        assert_eq!(resolved.header_or("accept", "").first(), "application/json");
    }

    #[test]
    fn default_request_definition_binds_an_empty_request() {
        let container = DefaultContainer::new(RequestDefinition::default().definitions());

        assert_eq!(*container.resolve::<Request>().unwrap(), Request::default());
    }
}
