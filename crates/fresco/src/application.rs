//! The application: registry, lazily built container and startup sequence.

use crate::bootstrap::{Bootstrapper, HandleExceptions, RegisterDefinitions};
use crate::config::CONFIG_FILE;
use crate::container::{
    Binding, Container, ContainerDefinition, ContainerError, ContainerExt, DefaultContainer, DefaultContainerDefinition,
    DefinitionProvider, Identifier,
};
use crate::definitions::FoundationDefinitions;
use crate::exceptions::{ExceptionRunner, Runner};
use crate::{ApplicationError, Registry};
use http::Response;
use once_cell::sync::OnceCell;
use std::error::Error;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};
use tracing::{debug, info, warn};

/// The application root directory, shared through the container once it is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RootPath(PathBuf);

impl RootPath {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self(path.into())
    }

    pub fn path(&self) -> &Path {
        &self.0
    }
}

/// A web application.
///
/// Construction only records definitions. The container is built from the
/// registry on the first call to [`Application::container`] and reused for the
/// lifetime of the application; [`Application::bootstrap`] then runs the
/// configured bootstrappers against it, in order.
///
/// # Example
/// ```no_run
/// use fresco::Application;
/// use fresco::bootstrap::LoadRoutes;
/// use fresco::definitions::{RouteFileDefinition, RoutingDefinitions};
///
/// let app = Application::builder("/srv/app").bootstrapper::<LoadRoutes>().build();
/// app.definitions(&[&RoutingDefinitions, &RouteFileDefinition]);
///
/// if let Err(e) = app.bootstrap() {
///     let page = app.render_exception(&e);
///     eprintln!("{}", page.body());
/// }
/// ```
pub struct Application {
    root_path: PathBuf,
    registry: Registry,
    container: OnceCell<Arc<dyn Container>>,
    exception_runner: RwLock<Option<Arc<dyn ExceptionRunner>>>,
    bootstrappers: Vec<Identifier>,
}

pub struct ApplicationBuilder {
    root_path: PathBuf,
    registry: Option<Registry>,
    container_definition: Arc<dyn ContainerDefinition>,
    bootstrappers: Vec<Identifier>,
}

impl ApplicationBuilder {
    fn new(root_path: PathBuf) -> Self {
        Self {
            root_path,
            registry: None,
            container_definition: Arc::new(DefaultContainerDefinition),
            bootstrappers: vec![Identifier::of::<RegisterDefinitions>(), Identifier::of::<HandleExceptions>()],
        }
    }

    /// Uses `registry` instead of a fresh one. Applications built on the same
    /// registry see each other's definitions.
    #[must_use]
    pub fn registry(mut self, registry: Registry) -> Self {
        self.registry = Some(registry);
        self
    }

    #[must_use]
    pub fn container_definition(mut self, definition: impl ContainerDefinition + 'static) -> Self {
        self.container_definition = Arc::new(definition);
        self
    }

    /// Appends `T` to the bootstrappers run by [`Application::bootstrap`].
    #[must_use]
    pub fn bootstrapper<T: Bootstrapper + 'static>(mut self) -> Self {
        self.bootstrappers.push(Identifier::of::<T>());
        self
    }

    pub fn build(self) -> Application {
        let registry = self.registry.unwrap_or_default();
        registry.add_definitions(&FoundationDefinitions);
        registry.add_definition(
            Identifier::of::<dyn ContainerDefinition>(),
            Binding::instance(self.container_definition),
        );

        debug!(root = %self.root_path.display(), bootstrappers = self.bootstrappers.len(), "application created");

        Application {
            root_path: self.root_path,
            registry,
            container: OnceCell::new(),
            exception_runner: RwLock::new(None),
            bootstrappers: self.bootstrappers,
        }
    }
}

impl Application {
    pub fn builder(root_path: impl Into<PathBuf>) -> ApplicationBuilder {
        ApplicationBuilder::new(root_path.into())
    }

    /// Creates an application with a fresh registry and the default container.
    pub fn new(root_path: impl Into<PathBuf>) -> Self {
        Self::builder(root_path).build()
    }

    /// Creates an application whose container comes from `definition`.
    pub fn with_container_definition(
        root_path: impl Into<PathBuf>,
        definition: impl ContainerDefinition + 'static,
    ) -> Self {
        Self::builder(root_path).container_definition(definition).build()
    }

    pub fn root_path(&self) -> &Path {
        &self.root_path
    }

    pub fn config_path(&self) -> PathBuf {
        self.root_path.join(CONFIG_FILE)
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn bootstrappers(&self) -> &[Identifier] {
        &self.bootstrappers
    }

    /// Returns the container, building it on first use.
    pub fn container(&self) -> Result<Arc<dyn Container>, ApplicationError> {
        self.container.get_or_try_init(|| self.build_container()).map(Arc::clone)
    }

    fn build_container(&self) -> Result<Arc<dyn Container>, ApplicationError> {
        let definitions = self.registry.definitions();
        let identifier = Identifier::of::<dyn ContainerDefinition>();

        // a factory binding is built by a throwaway container over the same definitions
        let instance = match definitions.get(&identifier) {
            Some(Binding::Instance(instance)) => instance.clone(),
            Some(Binding::Factory(_)) => DefaultContainer::new(definitions.clone()).make(&identifier)?,
            None => return Err(ContainerError::not_found(&identifier).into()),
        };
        let definition = instance
            .downcast::<dyn ContainerDefinition>()
            .ok_or_else(|| ContainerError::type_mismatch(&identifier, "dyn ContainerDefinition"))?;

        let container = definition.define(&definitions)?;
        container.share(Arc::new(RootPath::new(self.root_path.clone())));

        info!(definitions = definitions.len(), "container built");
        Ok(container)
    }

    /// Replaces the definition the container will be built from.
    ///
    /// Fails with [`ApplicationError::ContainerAlreadyBuilt`] once the container
    /// exists: the built container is never swapped out.
    pub fn define_container(&self, definition: impl ContainerDefinition + 'static) -> Result<(), ApplicationError> {
        if self.container.get().is_some() {
            return Err(ApplicationError::ContainerAlreadyBuilt);
        }

        let definition: Arc<dyn ContainerDefinition> = Arc::new(definition);
        self.registry.add_definition(Identifier::of::<dyn ContainerDefinition>(), Binding::instance(definition));
        Ok(())
    }

    /// Merges the definitions of `provider` into the registry.
    pub fn define(&self, provider: &dyn DefinitionProvider) {
        self.registry.add_definitions(provider);

        if self.container.get().is_some() {
            warn!("container already built, new definitions apply to the next application only");
        }
    }

    /// Merges several providers, in order.
    pub fn definitions(&self, providers: &[&dyn DefinitionProvider]) {
        for provider in providers {
            self.define(*provider);
        }
    }

    /// Runs every configured bootstrapper, in order.
    ///
    /// The first failure is returned as is; the remaining bootstrappers do
    /// not run.
    pub fn bootstrap(&self) -> Result<(), ApplicationError> {
        let container = self.container()?;

        for identifier in &self.bootstrappers {
            let bootstrapper = container.resolve_as::<dyn Bootstrapper>(identifier)?;
            debug!(%identifier, "running bootstrapper");
            bootstrapper.bootstrap(self)?;
        }

        info!(bootstrappers = self.bootstrappers.len(), "application bootstrapped");
        Ok(())
    }

    // TODO: read the environment from AppConfig once it is loaded before the container is built
    pub fn is_local(&self) -> bool {
        true
    }

    pub fn set_exception_runner(&self, runner: Arc<dyn ExceptionRunner>) {
        *self.exception_runner.write().unwrap_or_else(PoisonError::into_inner) = Some(runner);
    }

    pub fn exception_runner(&self) -> Option<Arc<dyn ExceptionRunner>> {
        self.exception_runner.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Renders `error` with the installed exception runner, or with a default
    /// [`Runner`] when none is installed yet.
    pub fn render_exception(&self, error: &(dyn Error + 'static)) -> Response<String> {
        match self.exception_runner() {
            Some(runner) => runner.render(error),
            None => Runner::new(self.is_local()).render(error),
        }
    }
}

impl fmt::Debug for Application {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Application")
            .field("root_path", &self.root_path)
            .field("registry", &self.registry.len())
            .field("container_built", &self.container.get().is_some())
            .field("bootstrappers", &self.bootstrappers)
            .finish_non_exhaustive()
    }
}

impl fmt::Debug for ApplicationBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApplicationBuilder")
            .field("root_path", &self.root_path)
            .field("bootstrappers", &self.bootstrappers)
            .finish_non_exhaustive()
    }
}
