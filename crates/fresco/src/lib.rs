//! A small web application framework.
//!
//! An [`Application`] collects definitions from providers into a
//! [`Registry`], builds a dependency-injection container from them on first
//! use, and runs an ordered list of bootstrappers against it:
//!
//! 1. [`RegisterDefinitions`](bootstrap::RegisterDefinitions) loads the
//!    configuration and shares it through the container;
//! 2. [`HandleExceptions`](bootstrap::HandleExceptions) installs the exception
//!    runner;
//! 3. any bootstrapper added with
//!    [`ApplicationBuilder::bootstrapper`], such as
//!    [`LoadRoutes`](bootstrap::LoadRoutes).
//!
//! Requests are modelled by [`fresco_http::Request`], re-exported here.

mod application;
mod error;
mod registry;

pub mod bootstrap;
pub mod config;
pub mod container;
pub mod definitions;
pub mod exceptions;
pub mod routing;

pub use application::Application;
pub use application::ApplicationBuilder;
pub use application::RootPath;
pub use error::ApplicationError;
pub use fresco_http::Request;
pub use registry::Registry;
