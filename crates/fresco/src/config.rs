//! Application configuration, read from `config/app.toml` under the root path.

use serde::Deserialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Location of the configuration file, relative to the application root.
pub const CONFIG_FILE: &str = "config/app.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed configuration {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Local,
    Production,
}

/// Root configuration of an application.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub name: String,

    pub environment: Environment,

    /// Render error details in error pages. Unset, it follows the environment:
    /// on locally, off in production. See [`AppConfig::debug`].
    pub debug: Option<bool>,

    /// Route file, relative to the application root.
    pub routes: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self { name: "fresco".into(), environment: Environment::Local, debug: None, routes: PathBuf::from("routes.toml") }
    }
}

impl AppConfig {
    /// Loads the configuration of the application rooted at `root`.
    ///
    /// A missing file is not an error: every field falls back to its default.
    pub fn load(root: &Path) -> Result<Self, ConfigError> {
        let path = root.join(CONFIG_FILE);

        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no configuration file, using defaults");
                return Ok(Self::default());
            }
            Err(source) => return Err(ConfigError::Read { path, source }),
        };

        toml::from_str(&content).map_err(|source| ConfigError::Parse { path, source })
    }

    pub fn is_local(&self) -> bool {
        self.environment == Environment::Local
    }

    pub fn debug(&self) -> bool {
        self.debug.unwrap_or_else(|| self.is_local())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    fn root_with_config(content: &str) -> tempfile::TempDir {
        let root = tempfile::tempdir().unwrap();
        fs::create_dir_all(root.path().join("config")).unwrap();
        fs::write(root.path().join(CONFIG_FILE), content).unwrap();
        root
    }

    #[test]
    fn missing_file_yields_defaults() {
        let root = tempfile::tempdir().unwrap();

        assert_eq!(AppConfig::load(root.path()).unwrap(), AppConfig::default());
    }

    #[test]
    fn partial_file_keeps_remaining_defaults() {
        let root = root_with_config(indoc! {r#"
            name = "shop"
            environment = "production"
        "#});

        let config = AppConfig::load(root.path()).unwrap();

        assert_eq!(config.name, "shop");
        assert!(!config.is_local());
        assert!(!config.debug());
        assert_eq!(config.routes, PathBuf::from("routes.toml"));
    }

    #[test]
    fn debug_follows_the_environment_unless_set() {
        assert!(AppConfig::default().debug());

        let root = root_with_config(indoc! {r#"
            environment = "production"
            debug = true
        "#});

        assert!(AppConfig::load(root.path()).unwrap().debug());
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let root = root_with_config("environment = \"staging\"");

        assert!(matches!(AppConfig::load(root.path()), Err(ConfigError::Parse { .. })));
    }
}
