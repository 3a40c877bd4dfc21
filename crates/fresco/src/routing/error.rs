use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RoutingError {
    #[error("failed to read route file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed route file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid http method {method} for route {path}")]
    InvalidMethod { method: String, path: String },

    #[error("invalid route path: {source}")]
    Insert {
        #[from]
        source: matchit::InsertError,
    },

    #[error("route {method} {path} is already registered")]
    DuplicateRoute { method: http::Method, path: String },
}

impl RoutingError {
    pub fn read<P: Into<PathBuf>>(path: P, source: io::Error) -> Self {
        Self::Read { path: path.into(), source }
    }

    pub fn parse<P: Into<PathBuf>>(path: P, source: toml::de::Error) -> Self {
        Self::Parse { path: path.into(), source }
    }

    pub fn invalid_method<S: ToString, P: ToString>(method: S, path: P) -> Self {
        Self::InvalidMethod { method: method.to_string(), path: path.to_string() }
    }
}
