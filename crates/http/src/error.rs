use thiserror::Error;

/// Errors raised while deriving a new [`Request`](crate::Request) value or
/// reading typed data out of one.
#[derive(Error, Debug)]
pub enum RequestError {
    #[error("invalid http method: {method}")]
    InvalidMethod { method: String },

    #[error("invalid header name: {name}")]
    InvalidHeaderName { name: String },

    #[error("invalid value for header {name}")]
    InvalidHeaderValue { name: String },

    #[error("invalid query string: {reason}")]
    InvalidQuery { reason: String },

    #[error("invalid json body: {source}")]
    InvalidJson {
        #[from]
        source: serde_json::Error,
    },
}

impl RequestError {
    pub fn invalid_method<S: ToString>(method: S) -> Self {
        Self::InvalidMethod { method: method.to_string() }
    }

    pub fn invalid_header_name<S: ToString>(name: S) -> Self {
        Self::InvalidHeaderName { name: name.to_string() }
    }

    pub fn invalid_header_value<S: ToString>(name: S) -> Self {
        Self::InvalidHeaderValue { name: name.to_string() }
    }

    pub fn invalid_query<S: ToString>(reason: S) -> Self {
        Self::InvalidQuery { reason: reason.to_string() }
    }
}
