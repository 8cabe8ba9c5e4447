//! HTTP response serialization.
//!
//! The writer performs no validation: header names and values are written
//! as given, and no `Content-Length` is inserted. Callers that need framing
//! add the header themselves.

use std::fmt::Write as _;
use std::io;

use crate::http::Response;

/// Render a response to its exact wire text.
pub fn serialize_response(response: &Response) -> String {
    let mut out = String::with_capacity(64 + response.body.len());
    let _ = write!(
        out,
        "{} {} {}\r\n",
        response.version,
        response.status.code(),
        response.status.reason_phrase()
    );
    for (name, value) in &response.headers {
        let _ = write!(out, "{name}: {value}\r\n");
    }
    out.push_str("\r\n");
    out.push_str(&response.body);
    out
}

impl Response {
    pub fn to_wire(&self) -> String {
        serialize_response(self)
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        serialize_response(self).into_bytes()
    }

    /// Write the wire bytes to `writer` in one `write_all`.
    pub fn write_to<W: io::Write>(&self, mut writer: W) -> io::Result<()> {
        writer.write_all(serialize_response(self).as_bytes())
    }
}
