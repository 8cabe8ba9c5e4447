//! C-side shapes of a parsed request and of the parse outcome.
//!
//! A `Request` crosses as `FfiRequest`: NUL-terminated strings for target and
//! body, the sorted header map flattened into a boxed `FfiHeader` slice, and
//! the method as a numbered enum. Responses never cross by value; C holds an
//! opaque `FfiResponse` and edits it through `lib.rs`. Allocation and release
//! of every pointer handed out live in this module.

use std::ffi::CString;
use std::os::raw::c_char;

use httpcodec_core::{Method, ParseError, Request, Response};

/// Opaque handle to a `Response` under construction. C callers receive a
/// pointer to this and pass it back into every `http_response_*` function.
pub struct FfiResponse {
    pub(crate) inner: Response,
}

/// Move a Rust string onto the C heap. The codec never produces interior
/// NULs from C input, so the empty-string fallback is unreachable in practice.
pub(crate) fn into_c_string(s: String) -> *mut c_char {
    CString::new(s).unwrap_or_default().into_raw()
}

/// Reclaim a string produced by `into_c_string`. Null is ignored.
pub(crate) fn drop_c_string(ptr: *mut c_char) {
    if !ptr.is_null() {
        drop(unsafe { CString::from_raw(ptr) });
    }
}

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// HTTP method as a C enum.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FfiMethod {
    Get = 0,
    Head = 1,
    Post = 2,
    Put = 3,
    Patch = 4,
    Delete = 5,
    Connect = 6,
    Options = 7,
    Trace = 8,
    Unknown = 9,
}

impl From<Method> for FfiMethod {
    fn from(m: Method) -> Self {
        match m {
            Method::Get => FfiMethod::Get,
            Method::Head => FfiMethod::Head,
            Method::Post => FfiMethod::Post,
            Method::Put => FfiMethod::Put,
            Method::Patch => FfiMethod::Patch,
            Method::Delete => FfiMethod::Delete,
            Method::Connect => FfiMethod::Connect,
            Method::Options => FfiMethod::Options,
            Method::Trace => FfiMethod::Trace,
            Method::Unknown => FfiMethod::Unknown,
        }
    }
}

/// One entry of the flattened header map. Both strings are owned by the
/// enclosing `FfiRequest` and released with it.
#[repr(C)]
pub struct FfiHeader {
    pub key: *mut c_char,
    pub value: *mut c_char,
}

/// A parsed HTTP request as C-compatible plain data.
///
/// Headers are in ascending key order. `body` is never null; an absent body
/// is the empty string.
#[repr(C)]
pub struct FfiRequest {
    pub method: FfiMethod,
    pub target: *mut c_char,
    pub version_major: u32,
    pub version_minor: u32,
    pub headers: *mut FfiHeader,
    pub headers_len: u32,
    pub body: *mut c_char,
}

impl FfiRequest {
    /// Convert a core `Request` into a heap-allocated `FfiRequest`.
    pub(crate) fn from_core(req: Request) -> *mut Self {
        let headers_len = req.headers.len() as u32;
        let headers = if req.headers.is_empty() {
            std::ptr::null_mut()
        } else {
            let ffi_headers: Box<[FfiHeader]> = req
                .headers
                .into_iter()
                .map(|(k, v)| FfiHeader {
                    key: into_c_string(k),
                    value: into_c_string(v),
                })
                .collect();
            Box::into_raw(ffi_headers) as *mut FfiHeader
        };

        Box::into_raw(Box::new(FfiRequest {
            method: req.method.into(),
            target: into_c_string(req.target),
            version_major: req.version.major,
            version_minor: req.version.minor,
            headers,
            headers_len,
            body: into_c_string(req.body),
        }))
    }

    /// Free a request produced by `from_core`, including every string it owns.
    pub(crate) fn free(ptr: *mut Self) {
        if ptr.is_null() {
            return;
        }
        let req = unsafe { Box::from_raw(ptr) };
        drop_c_string(req.target);
        drop_c_string(req.body);
        if !req.headers.is_null() && req.headers_len > 0 {
            let slice = std::ptr::slice_from_raw_parts_mut(req.headers, req.headers_len as usize);
            let headers = unsafe { Box::from_raw(slice) };
            for h in headers.iter() {
                drop_c_string(h.key);
                drop_c_string(h.value);
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

/// Error codes returned in `FfiParseResult`.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FfiErrorCode {
    Ok = 0,
    Parse = 1,
    NullArg = 2,
    Panic = 3,
}

/// Result envelope for `http_parse_request`.
///
/// On success `error_code` is `Ok`, `error_message` is null, and `request`
/// points to the parsed request. On failure `error_code` describes the
/// category, `error_message` is a human-readable C string, and `request`
/// is null.
#[repr(C)]
pub struct FfiParseResult {
    pub error_code: FfiErrorCode,
    pub error_message: *mut c_char,
    pub request: *mut FfiRequest,
}

impl FfiParseResult {
    pub(crate) fn ok(req: Request) -> *mut Self {
        Box::into_raw(Box::new(FfiParseResult {
            error_code: FfiErrorCode::Ok,
            error_message: std::ptr::null_mut(),
            request: FfiRequest::from_core(req),
        }))
    }

    pub(crate) fn from_error(err: ParseError) -> *mut Self {
        Self::failure(FfiErrorCode::Parse, err.to_string())
    }

    pub(crate) fn null_arg(name: &str) -> *mut Self {
        Self::failure(FfiErrorCode::NullArg, format!("null argument: {name}"))
    }

    pub(crate) fn panic(msg: &str) -> *mut Self {
        Self::failure(FfiErrorCode::Panic, msg.to_string())
    }

    fn failure(error_code: FfiErrorCode, msg: String) -> *mut Self {
        Box::into_raw(Box::new(FfiParseResult {
            error_code,
            error_message: into_c_string(msg),
            request: std::ptr::null_mut(),
        }))
    }
}
