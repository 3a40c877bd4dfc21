//! Immutable server request values.
//!
//! [`Request`] carries everything a handler can learn about an incoming HTTP
//! request: the message line and headers from the `http` crate, plus the
//! server-side derived data (cookies, query parameters, uploaded files, a parsed
//! body and free-form attributes).
//!
//! Every `with_*`/`without_*` method leaves the receiver untouched and returns a
//! new value, so a request can be handed to several layers without any of them
//! observing the others' changes.

mod header_field;
mod uploaded_file;

pub use header_field::HeaderField;
pub use uploaded_file::UploadedFile;

use crate::RequestError;
use bytes::Bytes;
use http::{HeaderMap, HeaderName, HeaderValue, Method, Uri, Version};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::HashMap;
use tracing::warn;

/// An immutable HTTP server request.
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    method: Method,
    uri: Uri,
    version: Version,
    headers: HeaderMap,
    body: Bytes,
    request_target: Option<String>,
    cookie_params: HashMap<String, String>,
    query_params: HashMap<String, String>,
    uploaded_files: HashMap<String, UploadedFile>,
    parsed_body: Option<Value>,
    attributes: HashMap<String, Value>,
}

impl Default for Request {
    fn default() -> Self {
        Self::from(http::Request::new(Bytes::new()))
    }
}

impl<B: Into<Bytes>> From<http::Request<B>> for Request {
    fn from(request: http::Request<B>) -> Self {
        let (parts, body) = request.into_parts();
        let query_params = parse_query(&parts.uri);
        let cookie_params = parse_cookies(&parts.headers);

        Self {
            method: parts.method,
            uri: parts.uri,
            version: parts.version,
            headers: parts.headers,
            body: body.into(),
            request_target: None,
            cookie_params,
            query_params,
            uploaded_files: HashMap::new(),
            parsed_body: None,
            attributes: HashMap::new(),
        }
    }
}

impl Request {
    /// Converts back into an `http::Request`.
    ///
    /// Server-side data (attributes, parsed body, uploaded files) has no
    /// counterpart there and is dropped.
    pub fn into_http(self) -> http::Request<Bytes> {
        let mut request = http::Request::new(self.body);
        *request.method_mut() = self.method;
        *request.uri_mut() = self.uri;
        *request.version_mut() = self.version;
        *request.headers_mut() = self.headers;
        request
    }

    /// Returns the HTTP method of the request
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Returns the URI of the request
    pub fn uri(&self) -> &Uri {
        &self.uri
    }

    /// Returns the HTTP version of the request
    pub fn protocol_version(&self) -> Version {
        self.version
    }

    /// Returns the HTTP headers of the request
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn body(&self) -> &Bytes {
        &self.body
    }

    /// Returns the request target as it would appear in the request line.
    ///
    /// Unless overridden with [`Request::with_request_target`], this is the
    /// URI path (or `/`) followed by the query string, if any.
    pub fn request_target(&self) -> String {
        if let Some(target) = &self.request_target {
            return target.clone();
        }

        let path = match self.uri.path() {
            "" => "/",
            path => path,
        };

        match self.uri.query() {
            Some(query) => format!("{path}?{query}"),
            None => path.to_string(),
        }
    }

    /// Looks up a header by name.
    ///
    /// Returns `None` when the header is absent, otherwise a single value or
    /// every value of a repeated header. Values that are not visible ASCII are
    /// skipped.
    pub fn header(&self, name: &str) -> Option<HeaderField<'_>> {
        let values = self.headers.get_all(name).iter().filter_map(|value| value.to_str().ok()).collect();
        HeaderField::from_values(values)
    }

    /// Like [`Request::header`], falling back to `default` when the header is absent.
    pub fn header_or<'a>(&'a self, name: &str, default: &'a str) -> HeaderField<'a> {
        self.header(name).unwrap_or(HeaderField::Single(default))
    }

    pub fn cookie_params(&self) -> &HashMap<String, String> {
        &self.cookie_params
    }

    pub fn cookie(&self, name: &str) -> Option<&str> {
        self.cookie_params.get(name).map(String::as_str)
    }

    pub fn query_params(&self) -> &HashMap<String, String> {
        &self.query_params
    }

    /// Returns a query parameter by name.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.query_params.get(key).map(String::as_str)
    }

    /// Returns a query parameter by name, or `default` when it is absent.
    pub fn get_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.get(key).unwrap_or(default)
    }

    /// Deserializes the URI query string into `T`.
    ///
    /// This reads the raw query of the URI, not the (possibly overridden)
    /// query parameters, so nested keys such as `user[name]=..` are supported.
    pub fn query<T: DeserializeOwned>(&self) -> Result<T, RequestError> {
        let query = self.uri.query().unwrap_or_default();
        serde_qs::from_str::<T>(query).map_err(RequestError::invalid_query)
    }

    /// Deserializes the raw body as json.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, RequestError> {
        Ok(serde_json::from_slice(&self.body)?)
    }

    pub fn uploaded_files(&self) -> &HashMap<String, UploadedFile> {
        &self.uploaded_files
    }

    pub fn parsed_body(&self) -> Option<&Value> {
        self.parsed_body.as_ref()
    }

    pub fn attributes(&self) -> &HashMap<String, Value> {
        &self.attributes
    }

    pub fn attribute(&self, name: &str) -> Option<&Value> {
        self.attributes.get(name)
    }

    pub fn attribute_or<'a>(&'a self, name: &str, default: &'a Value) -> &'a Value {
        self.attribute(name).unwrap_or(default)
    }

    #[must_use]
    pub fn with_request_target(&self, target: impl Into<String>) -> Self {
        let mut request = self.clone();
        request.request_target = Some(target.into());
        request
    }

    pub fn with_method(&self, method: &str) -> Result<Self, RequestError> {
        let method = Method::from_bytes(method.as_bytes()).map_err(|_e| RequestError::invalid_method(method))?;
        let mut request = self.clone();
        request.method = method;
        Ok(request)
    }

    /// Returns a copy with a new URI. Query parameters are left as they were,
    /// use [`Request::with_query_params`] to replace them.
    #[must_use]
    pub fn with_uri(&self, uri: Uri) -> Self {
        let mut request = self.clone();
        request.uri = uri;
        request
    }

    #[must_use]
    pub fn with_protocol_version(&self, version: Version) -> Self {
        let mut request = self.clone();
        request.version = version;
        request
    }

    /// Returns a copy where `name` has exactly the given value.
    pub fn with_header(&self, name: &str, value: &str) -> Result<Self, RequestError> {
        let (name, value) = header_pair(name, value)?;
        let mut request = self.clone();
        request.headers.insert(name, value);
        Ok(request)
    }

    /// Returns a copy with `value` appended to the existing values of `name`.
    pub fn with_added_header(&self, name: &str, value: &str) -> Result<Self, RequestError> {
        let (name, value) = header_pair(name, value)?;
        let mut request = self.clone();
        request.headers.append(name, value);
        Ok(request)
    }

    #[must_use]
    pub fn without_header(&self, name: &str) -> Self {
        let mut request = self.clone();
        request.headers.remove(name);
        request
    }

    #[must_use]
    pub fn with_body(&self, body: impl Into<Bytes>) -> Self {
        let mut request = self.clone();
        request.body = body.into();
        request
    }

    #[must_use]
    pub fn with_cookie_params(&self, cookies: HashMap<String, String>) -> Self {
        let mut request = self.clone();
        request.cookie_params = cookies;
        request
    }

    #[must_use]
    pub fn with_query_params(&self, query: HashMap<String, String>) -> Self {
        let mut request = self.clone();
        request.query_params = query;
        request
    }

    #[must_use]
    pub fn with_uploaded_files(&self, files: HashMap<String, UploadedFile>) -> Self {
        let mut request = self.clone();
        request.uploaded_files = files;
        request
    }

    #[must_use]
    pub fn with_parsed_body(&self, parsed_body: Value) -> Self {
        let mut request = self.clone();
        request.parsed_body = Some(parsed_body);
        request
    }

    #[must_use]
    pub fn with_attribute(&self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        let mut request = self.clone();
        request.attributes.insert(name.into(), value.into());
        request
    }

    #[must_use]
    pub fn without_attribute(&self, name: &str) -> Self {
        let mut request = self.clone();
        request.attributes.remove(name);
        request
    }
}

fn header_pair(name: &str, value: &str) -> Result<(HeaderName, HeaderValue), RequestError> {
    let header_name = HeaderName::from_bytes(name.as_bytes()).map_err(|_e| RequestError::invalid_header_name(name))?;
    let header_value = HeaderValue::from_str(value).map_err(|_e| RequestError::invalid_header_value(name))?;
    Ok((header_name, header_value))
}

fn parse_query(uri: &Uri) -> HashMap<String, String> {
    let Some(query) = uri.query() else {
        return HashMap::new();
    };

    match serde_urlencoded::from_str::<Vec<(String, String)>>(query) {
        Ok(pairs) => pairs.into_iter().collect(),
        Err(e) => {
            warn!(query, cause = %e, "ignoring malformed query string");
            HashMap::new()
        }
    }
}

fn parse_cookies(headers: &HeaderMap) -> HashMap<String, String> {
    headers
        .get_all(http::header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|line| line.split(';'))
        .filter_map(|pair| {
            let (name, value) = pair.split_once('=')?;
            let name = name.trim();
            (!name.is_empty()).then(|| (name.to_string(), value.trim().to_string()))
        })
        .collect()
}
