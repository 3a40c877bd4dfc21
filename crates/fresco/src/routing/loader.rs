use crate::routing::{Route, Router, RoutingError, TreeRouter};
use http::Method;
use serde::Deserialize;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Populates a router from some source of route declarations.
pub trait RouteLoader: Send + Sync {
    fn load_routes(&self, router: &dyn Router) -> Result<(), RoutingError>;
}

/// A loader that wraps a closure.
struct FnRouteLoader<F>(F);

impl<F> RouteLoader for FnRouteLoader<F>
where
    F: Fn(&dyn Router) -> Result<(), RoutingError> + Send + Sync,
{
    fn load_routes(&self, router: &dyn Router) -> Result<(), RoutingError> {
        (self.0)(router)
    }
}

/// Creates a loader from a closure, for routes declared in code.
///
/// # Example
/// ```
/// use fresco::routing::{loader_fn, Route, RouteLoader, Router, TreeRouter};
///
/// let loader = loader_fn(|router| router.add_route(Route::get("/", "home@index")));
///
/// let router = TreeRouter::new();
/// loader.load_routes(&router).unwrap();
/// assert_eq!(router.routes().len(), 1);
/// ```
pub fn loader_fn<F>(f: F) -> impl RouteLoader
where
    F: Fn(&dyn Router) -> Result<(), RoutingError> + Send + Sync,
{
    FnRouteLoader(f)
}

#[derive(Debug, Deserialize)]
struct RouteFile {
    #[serde(default, rename = "route")]
    routes: Vec<RouteDeclaration>,
}

#[derive(Debug, Deserialize)]
struct RouteDeclaration {
    method: String,
    path: String,
    action: String,
    name: Option<String>,
}

impl RouteDeclaration {
    fn into_route(self) -> Result<Route, RoutingError> {
        let method = Method::from_bytes(self.method.to_ascii_uppercase().as_bytes())
            .map_err(|_e| RoutingError::invalid_method(&self.method, &self.path))?;

        let route = Route::new(method, self.path, self.action);
        Ok(match self.name {
            Some(name) => route.with_name(name),
            None => route,
        })
    }
}

/// Loads routes from a TOML file made of `[[route]]` tables:
///
/// ```toml
/// [[route]]
/// method = "GET"
/// path = "/users/{id}"
/// action = "UserController@show"
/// name = "users.show"
/// ```
///
/// The whole file is checked before the first route is registered: an invalid
/// method, a route declared twice or a path conflict inside the file leaves the
/// router untouched. A conflict with a route the router already holds is only
/// found on registration, in which case the routes preceding it in the file
/// stay registered.
pub struct LoadRoutesFromFile {
    path: PathBuf,
}

impl LoadRoutesFromFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<Vec<Route>, RoutingError> {
        let content = fs::read_to_string(&self.path).map_err(|e| RoutingError::read(&self.path, e))?;
        let file: RouteFile = toml::from_str(&content).map_err(|e| RoutingError::parse(&self.path, e))?;

        file.routes.into_iter().map(RouteDeclaration::into_route).collect()
    }
}

impl RouteLoader for LoadRoutesFromFile {
    fn load_routes(&self, router: &dyn Router) -> Result<(), RoutingError> {
        let routes = self.read()?;
        let count = routes.len();

        let scratch = TreeRouter::new();
        for route in &routes {
            scratch.add_route(route.clone())?;
        }

        for route in routes {
            router.add_route(route)?;
        }

        info!(path = %self.path.display(), count, "routes loaded");
        Ok(())
    }
}

impl fmt::Debug for LoadRoutesFromFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoadRoutesFromFile").field("path", &self.path).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::TreeRouter;
    use indoc::indoc;
    use std::io::Write;

    fn route_file(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn declared_routes_are_registered() {
        let file = route_file(indoc! {r#"
            [[route]]
            method = "GET"
            path = "/"
            action = "home@index"

            [[route]]
            method = "post"
            path = "/users/{id}"
            action = "users@update"
            name = "users.update"
        "#});

        let router = TreeRouter::new();
        LoadRoutesFromFile::new(file.path()).load_routes(&router).unwrap();

        let route_match = router.resolve(&Method::POST, "/users/3").unwrap();
        assert_eq!(route_match.route().name(), Some("users.update"));
        assert_eq!(route_match.param("id"), Some("3"));
        assert_eq!(router.routes().len(), 2);
    }

    #[test]
    fn empty_file_registers_nothing() {
        let file = route_file("");
        let router = TreeRouter::new();

        LoadRoutesFromFile::new(file.path()).load_routes(&router).unwrap();

        assert!(router.routes().is_empty());
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let loader = LoadRoutesFromFile::new(dir.path().join("routes.toml"));

        assert!(matches!(loader.load_routes(&TreeRouter::new()), Err(RoutingError::Read { .. })));
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let file = route_file("[[route]]\nmethod = \"GET\"");

        let result = LoadRoutesFromFile::new(file.path()).load_routes(&TreeRouter::new());
        assert!(matches!(result, Err(RoutingError::Parse { .. })));
    }

    #[test]
    fn invalid_method_leaves_router_untouched() {
        let file = route_file(indoc! {r#"
            [[route]]
            method = "GET"
            path = "/"
            action = "home@index"

            [[route]]
            method = "NOT A METHOD"
            path = "/broken"
            action = "broken@index"
        "#});

        let router = TreeRouter::new();
        let result = LoadRoutesFromFile::new(file.path()).load_routes(&router);

        assert!(matches!(result, Err(RoutingError::InvalidMethod { .. })));
        assert!(router.routes().is_empty());
    }

    #[test]
    fn duplicate_declarations_leave_router_untouched() {
        let file = route_file(indoc! {r#"
            [[route]]
            method = "GET"
            path = "/a"
            action = "a@first"

            [[route]]
            method = "GET"
            path = "/a"
            action = "a@second"
        "#});

        let router = TreeRouter::new();
        let result = LoadRoutesFromFile::new(file.path()).load_routes(&router);

        assert!(matches!(result, Err(RoutingError::DuplicateRoute { .. })));
        assert!(router.routes().is_empty());
    }

    #[test]
    fn conflicting_paths_leave_router_untouched() {
        let file = route_file(indoc! {r#"
            [[route]]
            method = "GET"
            path = "/users/{id}"
            action = "users@show"

            [[route]]
            method = "GET"
            path = "/users/{name}"
            action = "users@find"
        "#});

        let router = TreeRouter::new();
        let result = LoadRoutesFromFile::new(file.path()).load_routes(&router);

        assert!(matches!(result, Err(RoutingError::Insert { .. })));
        assert!(router.routes().is_empty());
    }

    #[test]
    fn closures_can_load_routes() {
        let loader = loader_fn(|router| {
            router.add_route(Route::get("/health", "health@check"))?;
            router.add_route(Route::get("/ready", "health@ready"))
        });
        let router = TreeRouter::new();

        loader.load_routes(&router).unwrap();

        assert_eq!(router.routes().len(), 2);
    }
}
