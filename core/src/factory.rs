//! Canned JSON responses for common status codes.
//!
//! Each builder returns an HTTP/1.1 response whose body is the serialized
//! value and whose only header is `Content-Type: application/json`. Pass
//! `Value::Null` (or `()`) for the default `null` body. To replace the default
//! header mapping, use `custom_with_headers` or chain `Response::with_headers`.

use crate::http::{Headers, HttpStatus, Response, Version};
use crate::json::Value;

pub const JSON_CONTENT_TYPE: &str = "application/json";

/// The mapping every canned response starts with.
pub fn default_headers() -> Headers {
    let mut headers = Headers::new();
    headers.insert("Content-Type".to_string(), JSON_CONTENT_TYPE.to_string());
    headers
}

/// JSON response with any status, known or not.
pub fn custom(status: HttpStatus, body: impl Into<Value>) -> Response {
    custom_with_headers(status, body, default_headers())
}

/// Like `custom`, but `headers` replaces the default mapping outright. No
/// `Content-Type` is added unless `headers` carries one.
pub fn custom_with_headers(status: HttpStatus, body: impl Into<Value>, headers: Headers) -> Response {
    Response {
        version: Version::HTTP_1_1,
        status,
        headers,
        body: body.into().stringify(),
    }
}

pub fn ok(body: impl Into<Value>) -> Response {
    custom(HttpStatus::OK, body)
}

pub fn created(body: impl Into<Value>) -> Response {
    custom(HttpStatus::CREATED, body)
}

pub fn bad_request(body: impl Into<Value>) -> Response {
    custom(HttpStatus::BAD_REQUEST, body)
}

pub fn not_found(body: impl Into<Value>) -> Response {
    custom(HttpStatus::NOT_FOUND, body)
}

pub fn internal_server_error(body: impl Into<Value>) -> Response {
    custom(HttpStatus::INTERNAL_SERVER_ERROR, body)
}
