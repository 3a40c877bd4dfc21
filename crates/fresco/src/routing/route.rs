use fresco_http::Request;
use http::Method;

/// A route declaration: requests with `method` on `path` are handled by `action`.
///
/// The path uses `matchit` syntax, e.g. `/users/{id}` or `/assets/{*file}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    method: Method,
    path: String,
    action: String,
    name: Option<String>,
}

macro_rules! method_route {
    ($method:ident, $http_method:ident) => {
        #[doc = concat!("Creates a `", stringify!($http_method), "` route.")]
        pub fn $method(path: impl Into<String>, action: impl Into<String>) -> Self {
            Self::new(Method::$http_method, path, action)
        }
    };
}

impl Route {
    pub fn new(method: Method, path: impl Into<String>, action: impl Into<String>) -> Self {
        Self { method, path: path.into(), action: action.into(), name: None }
    }

    method_route!(get, GET);
    method_route!(post, POST);
    method_route!(put, PUT);
    method_route!(delete, DELETE);
    method_route!(head, HEAD);
    method_route!(options, OPTIONS);
    method_route!(patch, PATCH);

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// The handler this route dispatches to, e.g. `UserController@show`.
    pub fn action(&self) -> &str {
        &self.action
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

/// A matched route along with the path parameters extracted from the request path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatch {
    route: Route,
    params: Vec<(String, String)>,
}

impl RouteMatch {
    pub(crate) fn new(route: Route, params: Vec<(String, String)>) -> Self {
        Self { route, params }
    }

    pub fn route(&self) -> &Route {
        &self.route
    }

    pub fn params(&self) -> &[(String, String)] {
        &self.params
    }

    /// Gets the value of a path parameter by its name
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.iter().find(|(key, _)| key == name).map(|(_, value)| value.as_str())
    }

    /// Returns a copy of `request` carrying every path parameter as an attribute.
    pub fn apply(&self, request: &Request) -> Request {
        self.params.iter().fold(request.clone(), |request, (key, value)| request.with_attribute(key.as_str(), value.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn method_helpers_set_the_method() {
        assert_eq!(Route::get("/", "home").method(), &Method::GET);
        assert_eq!(Route::patch("/", "home").method(), &Method::PATCH);
        assert_eq!(Route::delete("/users/{id}", "users@destroy").with_name("users.destroy").name(), Some("users.destroy"));
    }

    #[test]
    fn params_become_request_attributes() {
        let route_match = RouteMatch::new(
            Route::get("/users/{id}/posts/{post}", "posts@show"),
            vec![("id".into(), "7".into()), ("post".into(), "hello".into())],
        );

        let request = route_match.apply(&Request::default());

        assert_eq!(route_match.param("post"), Some("hello"));
        assert_eq!(request.attribute("id"), Some(&json!("7")));
        assert_eq!(request.attribute("post"), Some(&json!("hello")));
    }
}
