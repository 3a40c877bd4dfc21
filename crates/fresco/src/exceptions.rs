//! Turning errors that escape the application into responses.

use http::header::CONTENT_TYPE;
use http::{HeaderValue, Response, StatusCode};
use std::error::Error;
use std::fmt::Write;
use tracing::error;

/// Renders an error that reached the application boundary.
pub trait ExceptionRunner: Send + Sync {
    fn render(&self, error: &(dyn Error + 'static)) -> Response<String>;
}

/// The default runner: logs the error and renders a plain-text `500` page.
///
/// With `debug` on the page lists the error and each of its sources.
#[derive(Debug, Clone, Copy)]
pub struct Runner {
    debug: bool,
}

impl Runner {
    pub fn new(debug: bool) -> Self {
        Self { debug }
    }

    pub fn is_debug(&self) -> bool {
        self.debug
    }

    fn body(&self, error: &(dyn Error + 'static)) -> String {
        if !self.debug {
            return "500 Internal Server Error\n".into();
        }

        let mut body = format!("500 Internal Server Error\n\n{error}\n");
        let mut source = error.source();
        while let Some(cause) = source {
            // writing into a String cannot fail
            let _ = writeln!(body, "  caused by: {cause}");
            source = cause.source();
        }
        body
    }
}

impl ExceptionRunner for Runner {
    fn render(&self, error: &(dyn Error + 'static)) -> Response<String> {
        error!(cause = %error, "unhandled application error");

        let mut response = Response::new(self.body(error));
        *response.status_mut() = StatusCode::INTERNAL_SERVER_ERROR;
        response.headers_mut().insert(CONTENT_TYPE, HeaderValue::from_static("text/plain; charset=utf-8"));
        response
    }
}
