//! Route declarations, the router contract and the loaders that populate it.

mod error;
mod loader;
mod route;
mod tree_router;

pub use error::RoutingError;
pub use loader::{LoadRoutesFromFile, RouteLoader, loader_fn};
pub use route::{Route, RouteMatch};
pub use tree_router::TreeRouter;

use fresco_http::Request;
use http::Method;

/// Registers routes and matches requests against them.
///
/// Registration goes through `&self` so a router can be shared through the
/// container while loaders populate it.
pub trait Router: Send + Sync {
    fn add_route(&self, route: Route) -> Result<(), RoutingError>;

    /// Finds the route for `method` on `path`, if any.
    fn resolve(&self, method: &Method, path: &str) -> Option<RouteMatch>;

    /// Every registered route.
    fn routes(&self) -> Vec<Route>;

    fn resolve_request(&self, request: &Request) -> Option<RouteMatch> {
        self.resolve(request.method(), request.uri().path())
    }
}
