use crate::routing::{Route, RouteMatch, Router, RoutingError};
use http::Method;
use std::collections::HashMap;
use std::fmt;
use std::sync::{PoisonError, RwLock, RwLockReadGuard};
use tracing::{debug, trace};

type InnerRouter<T> = matchit::Router<T>;

/// A [`Router`] backed by a `matchit` path tree.
///
/// Routes sharing a path are grouped under one tree entry and told apart by
/// method. A `HEAD` request falls back to the `GET` route of its path when no
/// explicit `HEAD` route exists.
pub struct TreeRouter {
    inner: RwLock<RouteTree>,
}

struct RouteTree {
    tree: InnerRouter<usize>,
    groups: Vec<Vec<Route>>,
    paths: HashMap<String, usize>,
}

impl TreeRouter {
    pub fn new() -> Self {
        Self { inner: RwLock::new(RouteTree { tree: InnerRouter::new(), groups: Vec::new(), paths: HashMap::new() }) }
    }

    /// Returns the methods registered for the path matching `path`.
    pub fn allowed_methods(&self, path: &str) -> Vec<Method> {
        let tree = self.read();
        tree.tree
            .at(path)
            .ok()
            .and_then(|matched| tree.groups.get(*matched.value))
            .map(|group| group.iter().map(|route| route.method().clone()).collect())
            .unwrap_or_default()
    }

    fn read(&self) -> RwLockReadGuard<'_, RouteTree> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for TreeRouter {
    fn default() -> Self {
        Self::new()
    }
}

impl Router for TreeRouter {
    fn add_route(&self, route: Route) -> Result<(), RoutingError> {
        let mut guard = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        let tree = &mut *guard;

        let index = match tree.paths.get(route.path()).copied() {
            Some(index) => index,
            None => {
                let index = tree.groups.len();
                tree.tree.insert(route.path(), index)?;
                tree.groups.push(Vec::new());
                tree.paths.insert(route.path().to_string(), index);
                index
            }
        };

        let group = &mut tree.groups[index];
        if group.iter().any(|existing| existing.method() == route.method()) {
            return Err(RoutingError::DuplicateRoute { method: route.method().clone(), path: route.path().to_string() });
        }

        debug!(method = %route.method(), path = route.path(), action = route.action(), "route registered");
        group.push(route);
        Ok(())
    }

    fn resolve(&self, method: &Method, path: &str) -> Option<RouteMatch> {
        let tree = self.read();
        let matched = tree
            .tree
            .at(path)
            .map_err(|e| trace!("match '{}' error: {}", path, e))
            .ok()?;
        let group = tree.groups.get(*matched.value)?;

        let route = group.iter().find(|route| route.method() == method).or_else(|| {
            (method == Method::HEAD).then(|| group.iter().find(|route| route.method() == Method::GET)).flatten()
        })?;

        let params = matched.params.iter().map(|(key, value)| (key.to_string(), value.to_string())).collect();
        Some(RouteMatch::new(route.clone(), params))
    }

    fn routes(&self) -> Vec<Route> {
        self.read().groups.iter().flatten().cloned().collect()
    }
}

impl fmt::Debug for TreeRouter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TreeRouter").field("paths", &self.read().paths.len()).finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fresco_http::Request;

    fn router() -> TreeRouter {
        let router = TreeRouter::new();
        router.add_route(Route::get("/", "home@index")).unwrap();
        router.add_route(Route::post("/", "home@store")).unwrap();
        router.add_route(Route::get("/users/{id}", "users@show").with_name("users.show")).unwrap();
        router
    }

    #[test]
    fn routes_are_matched_by_method() {
        let router = router();

        assert_eq!(router.resolve(&Method::GET, "/").unwrap().route().action(), "home@index");
        assert_eq!(router.resolve(&Method::POST, "/").unwrap().route().action(), "home@store");
        assert!(router.resolve(&Method::DELETE, "/").is_none());
        assert_eq!(router.allowed_methods("/"), vec![Method::GET, Method::POST]);
    }

    #[test]
    fn path_params_are_extracted() {
        let route_match = router().resolve(&Method::GET, "/users/42").unwrap();

        assert_eq!(route_match.route().name(), Some("users.show"));
        assert_eq!(route_match.param("id"), Some("42"));
    }

    #[test]
    fn head_falls_back_to_get() {
        let route_match = router().resolve(&Method::HEAD, "/users/1").unwrap();

        assert_eq!(route_match.route().method(), &Method::GET);
    }

    #[test]
    fn unknown_paths_do_not_match() {
        let router = router();

        assert!(router.resolve(&Method::GET, "/missing").is_none());
        assert!(router.allowed_methods("/missing").is_empty());
    }

    #[test]
    fn duplicate_routes_are_rejected() {
        let router = router();

        let result = router.add_route(Route::get("/users/{id}", "users@other"));
        assert!(matches!(result, Err(RoutingError::DuplicateRoute { .. })));
        assert_eq!(router.routes().len(), 3);
    }

    #[test]
    fn conflicting_paths_surface_the_tree_error() {
        let router = router();

        let result = router.add_route(Route::get("/users/{name}", "users@by_name"));
        assert!(matches!(result, Err(RoutingError::Insert { .. })));
    }

    #[test]
    fn requests_resolve_through_their_method_and_path() {
        let request: Request = http::Request::builder().method(Method::POST).uri("/?page=2").body(Vec::<u8>::new()).unwrap().into();

        assert_eq!(router().resolve_request(&request).unwrap().route().action(), "home@store");
    }
}
