use std::collections::HashMap;
use std::ffi::OsString;
use std::num::ParseIntError;

/// HTTP request methods accepted by the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// GET - List the served directory or download a file
    GET,
    /// POST - Upload a file
    POST,
}

impl Method {
    /// Parses an HTTP method token.
    ///
    /// Matching is case-sensitive and only `GET` and `POST` are known.
    ///
    /// # Example
    ///
    /// ```
    /// # use httpfs::http::request::Method;
    /// assert_eq!(Method::from_str("GET"), Some(Method::GET));
    /// assert_eq!(Method::from_str("get"), None);
    /// assert_eq!(Method::from_str("PUT"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "GET" => Some(Method::GET),
            "POST" => Some(Method::POST),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Method::GET => "GET",
            Method::POST => "POST",
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A parsed request head plus the still-unread rest of the connection.
///
/// `body` is positioned right after the blank line that ends the headers;
/// the handler reads at most `Content-Length` bytes from it.
#[derive(Debug)]
pub struct Request<R> {
    /// GET or POST
    pub method: Method,
    /// Request target as the raw bytes sent (e.g. "/notes.txt")
    pub path: OsString,
    /// Protocol token (e.g. "HTTP/1.0")
    pub protocol: String,
    /// Header names as received; a repeated name keeps its last value
    pub headers: HashMap<String, String>,
    /// Remaining bytes of the connection
    pub body: R,
}

impl<R> Request<R> {
    /// Retrieves a header value by its exact name.
    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers.get(key).map(|v| v.as_str())
    }

    /// Parses the Content-Length header.
    ///
    /// Returns `None` when the header is absent, and the parse outcome otherwise.
    pub fn content_length(&self) -> Option<Result<u64, ParseIntError>> {
        self.header("Content-Length").map(|v| v.parse::<u64>())
    }
}
