//! Immutable HTTP server request values for the fresco framework.
//!
//! The `http` crate models the message itself. This crate layers the
//! server-side view on top of it: cookies, query parameters, uploaded files,
//! a parsed body and request attributes, all behind an API where every change
//! produces a new value.
//!
//! # Example
//!
//! ```
//! use bytes::Bytes;
//! use fresco_http::{HeaderField, Request};
//!
//! let request: Request = http::Request::builder()
//!     .uri("/search?q=fresco")
//!     .header("accept", "text/html")
//!     .body(Bytes::new())
//!     .unwrap()
//!     .into();
//!
//! let json = request.with_header("accept", "application/json").unwrap();
//!
//! assert_eq!(request.header("accept"), Some(HeaderField::Single("text/html")));
//! assert_eq!(json.header("accept"), Some(HeaderField::Single("application/json")));
//! assert_eq!(request.get("q"), Some("fresco"));
//! ```

mod error;
mod request;

pub use error::RequestError;
pub use request::HeaderField;
pub use request::Request;
pub use request::UploadedFile;
