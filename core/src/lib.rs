//! Sans-IO HTTP/1.x request parser, response writer, and JSON serializer.
//!
//! # Overview
//! The connection handler buffers a full request and calls
//! [`parse_request`]; application code builds a [`Response`] (usually via the
//! canned builders in [`factory`] and a JSON [`Value`]); [`serialize_response`]
//! turns it into the bytes the handler writes back. Nothing here touches a
//! socket, spawns a thread, or keeps global state.
//!
//! # Design
//! - Every function is a value-in/value-out transformation over owned data.
//! - Parsing is lenient except for an unreadable version token, which is the
//!   only [`ParseError`].
//! - Header and object mappings are `BTreeMap`s, so output order is sorted
//!   by key.

pub mod error;
pub mod factory;
pub mod http;
pub mod json;
pub mod request;
pub mod response;

pub use error::{ParseError, VersionComponent};
pub use http::{
    method_from_string, method_to_string, status_reason_phrase, Headers, HttpStatus, Method,
    Request, Response, Version,
};
pub use json::{stringify, Object, Value};
pub use request::{parse_request, parse_request_bytes, serialize_request};
pub use response::serialize_response;
