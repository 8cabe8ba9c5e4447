//! C-ABI wrapper around `httpcodec-core`.
//!
//! # Overview
//! Exposes the request parser and the response writer through `extern "C"`
//! functions, so a connection handler written in any language with a C FFI
//! can hand over a buffered request and get back the bytes to send.
//!
//! # Design
//! - Every `extern "C"` function wraps its body in `catch_unwind` so panics
//!   never cross the FFI boundary.
//! - Requests come back as plain `#[repr(C)]` data inside an
//!   `FfiParseResult` envelope; responses are built through an opaque
//!   `FfiResponse` handle.
//! - JSON bodies arrive as pre-serialized text. There is no `Value` tree on
//!   the C side.
//! - The C caller owns all returned pointers and must call the matching
//!   `http_free_*` / `http_response_free` function to release them.

pub mod types;

use std::ffi::CStr;
use std::os::raw::c_char;
use std::panic::catch_unwind;

use httpcodec_core::{factory, parse_request_bytes, HttpStatus, Response, Value};

use types::*;

/// Borrow a C string as UTF-8, replacing invalid sequences.
fn lossy(ptr: *const c_char) -> String {
    unsafe { CStr::from_ptr(ptr) }.to_string_lossy().into_owned()
}

// ---------------------------------------------------------------------------
// Request parsing
// ---------------------------------------------------------------------------

/// Parse a fully buffered, NUL-terminated HTTP request.
///
/// Never returns null. The caller must free the result with
/// `http_free_parse_result`.
#[unsafe(no_mangle)]
pub extern "C" fn http_parse_request(raw: *const c_char) -> *mut FfiParseResult {
    catch_unwind(|| {
        if raw.is_null() {
            return FfiParseResult::null_arg("raw");
        }
        let bytes = unsafe { CStr::from_ptr(raw) }.to_bytes();
        match parse_request_bytes(bytes) {
            Ok(req) => FfiParseResult::ok(req),
            Err(e) => FfiParseResult::from_error(e),
        }
    })
    .unwrap_or_else(|_| FfiParseResult::panic("panic while parsing request"))
}

/// Free an `FfiParseResult` and the request it carries. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn http_free_parse_result(result: *mut FfiParseResult) {
    if result.is_null() {
        return;
    }
    let _ = catch_unwind(|| {
        let result = unsafe { Box::from_raw(result) };
        drop_c_string(result.error_message);
        FfiRequest::free(result.request);
    });
}

// ---------------------------------------------------------------------------
// Response building
// ---------------------------------------------------------------------------

/// Create an HTTP/1.1 response with no headers and an empty body.
///
/// Any status code is accepted; codes without a known reason phrase are
/// written as "Unknown Status". Free with `http_response_free`.
#[unsafe(no_mangle)]
pub extern "C" fn http_response_new(status: u16) -> *mut FfiResponse {
    catch_unwind(|| {
        let inner = Response::new(HttpStatus::from(status));
        Box::into_raw(Box::new(FfiResponse { inner }))
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Create a JSON response: HTTP/1.1, `Content-Type: application/json`, and
/// `body_json` as the body. `body_json` must already be serialized JSON;
/// null means the JSON literal `null`.
#[unsafe(no_mangle)]
pub extern "C" fn http_response_json(status: u16, body_json: *const c_char) -> *mut FfiResponse {
    catch_unwind(|| {
        let mut inner = factory::custom(HttpStatus::from(status), Value::Null);
        if !body_json.is_null() {
            inner.body = lossy(body_json);
        }
        Box::into_raw(Box::new(FfiResponse { inner }))
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Set a header, replacing any previous value under the same name.
///
/// Returns false if any argument is null.
#[unsafe(no_mangle)]
pub extern "C" fn http_response_set_header(
    response: *mut FfiResponse,
    name: *const c_char,
    value: *const c_char,
) -> bool {
    catch_unwind(|| {
        if response.is_null() || name.is_null() || value.is_null() {
            return false;
        }
        let response = unsafe { &mut *response };
        response.inner.headers.insert(lossy(name), lossy(value));
        true
    })
    .unwrap_or(false)
}

/// Replace the response body with raw text. Returns false if any argument is null.
#[unsafe(no_mangle)]
pub extern "C" fn http_response_set_body(response: *mut FfiResponse, body: *const c_char) -> bool {
    catch_unwind(|| {
        if response.is_null() || body.is_null() {
            return false;
        }
        let response = unsafe { &mut *response };
        response.inner.body = lossy(body);
        true
    })
    .unwrap_or(false)
}

/// Render the response to wire text.
///
/// Returns null if `response` is null. Free the string with `http_free_string`.
#[unsafe(no_mangle)]
pub extern "C" fn http_response_serialize(response: *const FfiResponse) -> *mut c_char {
    catch_unwind(|| {
        if response.is_null() {
            return std::ptr::null_mut();
        }
        let response = unsafe { &*response };
        into_c_string(response.inner.to_wire())
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Free a response created by `http_response_new` or `http_response_json`.
/// Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn http_response_free(response: *mut FfiResponse) {
    if !response.is_null() {
        let _ = catch_unwind(|| {
            drop(unsafe { Box::from_raw(response) });
        });
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Reason phrase for a status code ("Unknown Status" if unlisted).
/// Free the string with `http_free_string`.
#[unsafe(no_mangle)]
pub extern "C" fn http_status_reason_phrase(status: u16) -> *mut c_char {
    catch_unwind(|| into_c_string(HttpStatus::from(status).reason_phrase().to_string()))
        .unwrap_or(std::ptr::null_mut())
}

/// Serialize a C string as a quoted, escaped JSON string literal.
///
/// Returns null if `s` is null. Free the result with `http_free_string`.
#[unsafe(no_mangle)]
pub extern "C" fn http_json_quote(s: *const c_char) -> *mut c_char {
    catch_unwind(|| {
        if s.is_null() {
            return std::ptr::null_mut();
        }
        into_c_string(Value::from(lossy(s)).stringify())
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Free a C string allocated by this library. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn http_free_string(s: *mut c_char) {
    if !s.is_null() {
        let _ = catch_unwind(|| drop_c_string(s));
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
