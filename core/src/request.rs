//! HTTP request parsing.
//!
//! # Design
//! The caller hands over the whole buffered request. The parser is lenient by
//! contract: a request line with fewer than three tokens leaves method, target
//! and version at their defaults, a header line without `:` is skipped, and
//! an unknown verb becomes `Method::Unknown`. Only a version token whose
//! components do not convert to integers is an error.
//!
//! The header block ends at a line that is exactly `\r` (a CRLF blank line
//! once the `\n` is consumed). Whatever follows is the body, verbatim, with no
//! `Content-Length` or chunked framing applied.

use std::fmt::Write as _;
use std::str::FromStr;

use tracing::{debug, trace};

use crate::error::{ParseError, VersionComponent};
use crate::http::{Method, Request, Version};

/// Parse a fully buffered request.
#[tracing::instrument(skip(raw), level = "debug", fields(len = raw.len()))]
pub fn parse_request(raw: &str) -> Result<Request, ParseError> {
    let mut request = Request::default();
    let mut rest = raw;

    let request_line = next_line(&mut rest).unwrap_or("");
    let request_line = request_line.strip_suffix('\r').unwrap_or(request_line);
    let tokens: Vec<&str> = request_line.split_terminator(' ').collect();

    if tokens.len() >= 3 {
        request.method = Method::from_token(tokens[0]);
        if request.method == Method::Unknown {
            debug!(token = tokens[0], "Unrecognised method token");
        }
        request.target = tokens[1].to_string();
        request.version = parse_version(tokens[2])?;
        debug!(method = %request.method, target = %request.target, version = %request.version, "Parsed request line");
    } else {
        debug!(tokens = tokens.len(), "Request line has fewer than three tokens, leaving defaults");
    }

    while let Some(line) = next_line(&mut rest) {
        if line == "\r" {
            break;
        }
        match line.split_once(':') {
            Some((name, value)) => {
                request
                    .headers
                    .insert(trim_space(name).to_string(), trim_space(value).to_string());
            }
            None => trace!(line, "Skipping header line without a colon"),
        }
    }

    request.body = rest.to_string();
    Ok(request)
}

/// Parse raw connection bytes. Invalid UTF-8 sequences are replaced with U+FFFD.
pub fn parse_request_bytes(raw: &[u8]) -> Result<Request, ParseError> {
    parse_request(&String::from_utf8_lossy(raw))
}

impl FromStr for Request {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_request(s)
    }
}

/// Render a request back to wire text: request line, headers in key order,
/// a blank line, then the body.
pub fn serialize_request(request: &Request) -> String {
    let mut out = String::new();
    let _ = write!(
        out,
        "{} {} {}\r\n",
        request.method, request.target, request.version
    );
    for (name, value) in &request.headers {
        let _ = write!(out, "{name}: {value}\r\n");
    }
    out.push_str("\r\n");
    out.push_str(&request.body);
    out
}

/// Pop the next `\n`-terminated line off `rest`, without the `\n`. The final
/// unterminated fragment counts as a line; an exhausted buffer yields `None`.
fn next_line<'a>(rest: &mut &'a str) -> Option<&'a str> {
    if rest.is_empty() {
        return None;
    }
    let line = match rest.find('\n') {
        Some(i) => {
            let line = &rest[..i];
            *rest = &rest[i + 1..];
            line
        }
        None => std::mem::take(rest),
    };
    Some(line)
}

/// ASCII whitespace including vertical tab.
fn trim_space(s: &str) -> &str {
    s.trim_matches(|c: char| c.is_ascii_whitespace() || c == '\x0B')
}

/// `HTTP/<major>.<minor>`. The first five bytes are skipped without being
/// checked; anything after a second `.` is ignored. A missing component is
/// the empty string and fails to convert like any other non-number.
fn parse_version(token: &str) -> Result<Version, ParseError> {
    let digits = token.get(5..).unwrap_or("");
    let mut parts = digits.split('.');
    let major = parts.next().unwrap_or_default();
    let minor = parts.next().unwrap_or_default();
    Ok(Version {
        major: parse_component(major, VersionComponent::Major)?,
        minor: parse_component(minor, VersionComponent::Minor)?,
    })
}

fn parse_component(value: &str, component: VersionComponent) -> Result<u32, ParseError> {
    value
        .parse::<u32>()
        .map_err(|source| ParseError::InvalidVersionNumber {
            component,
            value: value.to_string(),
            source,
        })
}
