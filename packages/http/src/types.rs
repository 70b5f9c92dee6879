use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Request headers, passed through verbatim.
///
/// Ordered so that signing layers see a stable iteration order.
pub type Headers = BTreeMap<String, String>;

/// Query parameters, URL-encoded onto the request path.
pub type Query = BTreeMap<String, String>;

/// HTTP methods a transport can issue.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    #[default]
    GET,
    HEAD,
    PUT,
    POST,
}

impl From<Method> for http::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::GET => http::Method::GET,
            Method::HEAD => http::Method::HEAD,
            Method::PUT => http::Method::PUT,
            Method::POST => http::Method::POST,
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(http::Method::from(*self).as_str())
    }
}

/// Response to a request that reached the server.
///
/// A failure status is still a `Response`; only transport-level failures
/// are errors.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Response {
    /// HTTP status code
    pub code: u16,

    /// Raw body bytes (empty for `HEAD`)
    pub data: Vec<u8>,

    /// Response headers
    pub headers: Headers,
}

impl Response {
    /// Check if the response status indicates success (2xx)
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.code)
    }

    /// Check if the response status indicates a client error (4xx)
    pub fn client_error(&self) -> bool {
        (400..500).contains(&self.code)
    }

    /// Check if the response status indicates a server error (5xx)
    pub fn server_error(&self) -> bool {
        (500..600).contains(&self.code)
    }

    /// Whether reissuing the same request may succeed.
    pub fn retry(&self) -> bool {
        self.server_error()
    }

    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}
