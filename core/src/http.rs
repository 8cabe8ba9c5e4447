//! HTTP primitive types and message structures.
//!
//! # Design
//! These types describe requests and responses as plain data. The parser
//! produces `Request` values and the writer consumes `Response` values; the
//! connection handler on the other side owns every socket. All fields are
//! owned types so values can cross thread or FFI boundaries freely.
//!
//! Header mappings are `BTreeMap`s: iteration is sorted by key, a repeated
//! name keeps the last value, and names are compared case-sensitively.

use std::collections::BTreeMap;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Header name to value, iterated in ascending key order.
pub type Headers = BTreeMap<String, String>;

/// HTTP request method.
///
/// Any token outside the nine standard verbs maps to `Unknown`; that is a
/// sentinel, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Method {
    Get,
    Head,
    Post,
    Put,
    Patch,
    Delete,
    Connect,
    Options,
    Trace,
    #[default]
    Unknown,
}

impl Method {
    /// Exact, case-sensitive match against the standard verbs.
    pub fn from_token(token: &str) -> Self {
        match token {
            "GET" => Method::Get,
            "HEAD" => Method::Head,
            "POST" => Method::Post,
            "PUT" => Method::Put,
            "PATCH" => Method::Patch,
            "DELETE" => Method::Delete,
            "CONNECT" => Method::Connect,
            "OPTIONS" => Method::Options,
            "TRACE" => Method::Trace,
            _ => Method::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Head => "HEAD",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
            Method::Connect => "CONNECT",
            Method::Options => "OPTIONS",
            Method::Trace => "TRACE",
            Method::Unknown => "UNKNOWN",
        }
    }
}

impl FromStr for Method {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Method::from_token(s))
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn method_from_string(token: &str) -> Method {
    Method::from_token(token)
}

pub fn method_to_string(method: Method) -> &'static str {
    method.as_str()
}

/// HTTP status code.
///
/// The associated constants are the codes this crate knows a reason phrase
/// for. Any other code can still be built with `HttpStatus::from(u16)`; it
/// reports "Unknown Status" as its reason phrase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HttpStatus(u16);

impl HttpStatus {
    pub const OK: HttpStatus = HttpStatus(200);
    pub const CREATED: HttpStatus = HttpStatus(201);
    pub const ACCEPTED: HttpStatus = HttpStatus(202);
    pub const NO_CONTENT: HttpStatus = HttpStatus(204);
    pub const BAD_REQUEST: HttpStatus = HttpStatus(400);
    pub const UNAUTHORIZED: HttpStatus = HttpStatus(401);
    pub const FORBIDDEN: HttpStatus = HttpStatus(403);
    pub const NOT_FOUND: HttpStatus = HttpStatus(404);
    pub const METHOD_NOT_ALLOWED: HttpStatus = HttpStatus(405);
    pub const INTERNAL_SERVER_ERROR: HttpStatus = HttpStatus(500);
    pub const NOT_IMPLEMENTED: HttpStatus = HttpStatus(501);
    pub const BAD_GATEWAY: HttpStatus = HttpStatus(502);
    pub const SERVICE_UNAVAILABLE: HttpStatus = HttpStatus(503);

    pub const fn code(self) -> u16 {
        self.0
    }

    /// Canonical reason phrase, or "Unknown Status" for codes outside the table.
    pub fn reason_phrase(self) -> &'static str {
        known_reason(self.0).unwrap_or("Unknown Status")
    }

    pub fn is_known(self) -> bool {
        known_reason(self.0).is_some()
    }
}

fn known_reason(code: u16) -> Option<&'static str> {
    let phrase = match code {
        200 => "OK",
        201 => "Created",
        202 => "Accepted",
        204 => "No Content",
        400 => "Bad Request",
        401 => "Unauthorized",
        403 => "Forbidden",
        404 => "Not Found",
        405 => "Method Not Allowed",
        500 => "Internal Server Error",
        501 => "Not Implemented",
        502 => "Bad Gateway",
        503 => "Service Unavailable",
        _ => return None,
    };
    Some(phrase)
}

impl From<u16> for HttpStatus {
    fn from(code: u16) -> Self {
        HttpStatus(code)
    }
}

impl From<HttpStatus> for u16 {
    fn from(status: HttpStatus) -> Self {
        status.0
    }
}

impl fmt::Display for HttpStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.0, self.reason_phrase())
    }
}

pub fn status_reason_phrase(status: HttpStatus) -> &'static str {
    status.reason_phrase()
}

/// Protocol version, rendered as `HTTP/<major>.<minor>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Version {
    pub major: u32,
    pub minor: u32,
}

impl Version {
    pub const HTTP_1_0: Version = Version { major: 1, minor: 0 };
    pub const HTTP_1_1: Version = Version { major: 1, minor: 1 };

    pub const fn new(major: u32, minor: u32) -> Self {
        Version { major, minor }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HTTP/{}.{}", self.major, self.minor)
    }
}

/// A parsed HTTP request.
///
/// `target` is the raw request-target, not decoded. `body` is everything after
/// the header block, unframed.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Request {
    pub method: Method,
    pub target: String,
    pub version: Version,
    pub headers: Headers,
    pub body: String,
}

/// An HTTP response ready for the writer.
///
/// `body` is caller-supplied text, usually produced by `Value::stringify`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub version: Version,
    pub status: HttpStatus,
    pub headers: Headers,
    pub body: String,
}

impl Response {
    /// HTTP/1.1 response with no headers and an empty body.
    pub fn new(status: HttpStatus) -> Self {
        Response {
            version: Version::HTTP_1_1,
            status,
            headers: Headers::new(),
            body: String::new(),
        }
    }

    /// Insert one header, overwriting any previous value under the same name.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Replace the whole header mapping.
    pub fn with_headers(mut self, headers: Headers) -> Self {
        self.headers = headers;
        self
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }
}
