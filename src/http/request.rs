use std::fmt;

use crate::http::error::ParseError;
use crate::http::headers::{Headers, is_token};

/// HTTP request methods.
///
/// Any all-uppercase token is accepted; the registered methods get their own
/// variant and everything else is carried as [`Method::Extension`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Method {
    /// GET - Retrieve a resource
    GET,
    /// HEAD - Like GET but without the response body
    HEAD,
    /// POST - Create or submit data
    POST,
    /// PUT - Replace a resource
    PUT,
    /// DELETE - Delete a resource
    DELETE,
    /// CONNECT - Establish a tunnel
    CONNECT,
    /// OPTIONS - Describe communication options
    OPTIONS,
    /// TRACE - Loop-back test
    TRACE,
    /// PATCH - Partial modification of a resource
    PATCH,
    /// Any other uppercase method token
    Extension(String),
}

impl Method {
    /// Parses a method token from the request line.
    ///
    /// Methods are case-sensitive: any token without lowercase letters.
    ///
    /// # Example
    ///
    /// ```
    /// # use tcphttp::http::request::Method;
    /// assert_eq!(Method::parse("GET").unwrap(), Method::GET);
    /// assert_eq!(Method::parse("PURGE").unwrap(), Method::Extension("PURGE".into()));
    /// assert!(Method::parse("M-SEARCH").is_ok());
    /// assert!(Method::parse("get").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self, ParseError> {
        if !is_token(s.as_bytes()) || s.bytes().any(|b| b.is_ascii_lowercase()) {
            return Err(ParseError::InvalidMethod(s.to_string()));
        }

        Ok(match s {
            "GET" => Method::GET,
            "HEAD" => Method::HEAD,
            "POST" => Method::POST,
            "PUT" => Method::PUT,
            "DELETE" => Method::DELETE,
            "CONNECT" => Method::CONNECT,
            "OPTIONS" => Method::OPTIONS,
            "TRACE" => Method::TRACE,
            "PATCH" => Method::PATCH,
            other => Method::Extension(other.to_string()),
        })
    }

    pub fn as_str(&self) -> &str {
        match self {
            Method::GET => "GET",
            Method::HEAD => "HEAD",
            Method::POST => "POST",
            Method::PUT => "PUT",
            Method::DELETE => "DELETE",
            Method::CONNECT => "CONNECT",
            Method::OPTIONS => "OPTIONS",
            Method::TRACE => "TRACE",
            Method::PATCH => "PATCH",
            Method::Extension(s) => s,
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The first line of a request: `METHOD target HTTP/version`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestLine {
    pub method: Method,
    /// The request-URI, kept as sent (e.g. "/search?q=rust").
    pub target: String,
    /// Protocol version without the `HTTP/` prefix (e.g. "1.1").
    pub version: String,
}

/// A fully parsed HTTP request.
///
/// Produced by [`RequestParser`](crate::http::parser::RequestParser) once it
/// reaches the done state; never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub request_line: RequestLine,
    pub headers: Headers,
    pub body: Vec<u8>,
}

impl Request {
    pub fn method(&self) -> &Method {
        &self.request_line.method
    }

    pub fn target(&self) -> &str {
        &self.request_line.target
    }

    pub fn version(&self) -> &str {
        &self.request_line.version
    }

    /// Retrieves a header value by name, ignoring case.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name)
    }

    /// The declared Content-Length, if present and numeric.
    pub fn content_length(&self) -> Option<usize> {
        self.header("Content-Length")
            .and_then(|v| v.trim().parse().ok())
    }
}
