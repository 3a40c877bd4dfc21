use crate::bootstrap::Bootstrapper;
use crate::config::AppConfig;
use crate::container::ContainerExt;
use crate::{Application, ApplicationError};
use std::sync::Arc;
use tracing::info;

/// Loads the application configuration and shares it through the container.
///
/// Runs first: the definitions of later steps (the exception runner, the
/// route file loader) resolve [`AppConfig`].
#[derive(Debug, Clone, Copy, Default)]
pub struct RegisterDefinitions;

impl Bootstrapper for RegisterDefinitions {
    fn bootstrap(&self, app: &Application) -> Result<(), ApplicationError> {
        let config = AppConfig::load(app.root_path())?;
        info!(
            name = %config.name,
            environment = ?config.environment,
            definitions = app.registry().len(),
            "registering definitions"
        );

        app.container()?.share(Arc::new(config));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CONFIG_FILE;
    use std::fs;

    #[test]
    fn configuration_becomes_resolvable() {
        let root = tempfile::tempdir().unwrap();
        fs::create_dir_all(root.path().join("config")).unwrap();
        fs::write(root.path().join(CONFIG_FILE), "name = \"blog\"").unwrap();
        let app = Application::new(root.path());

        RegisterDefinitions.bootstrap(&app).unwrap();

        let config = app.container().unwrap().resolve::<AppConfig>().unwrap();
        assert_eq!(config.name, "blog");
    }

    #[test]
    fn malformed_configuration_aborts() {
        let root = tempfile::tempdir().unwrap();
        fs::create_dir_all(root.path().join("config")).unwrap();
        fs::write(root.path().join(CONFIG_FILE), "debug = \"yes\"").unwrap();
        let app = Application::new(root.path());

        let result = RegisterDefinitions.bootstrap(&app);

        assert!(matches!(result, Err(ApplicationError::Config { .. })));
    }
}
