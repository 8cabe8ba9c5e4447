//! Error types for the request parser.
//!
//! # Design
//! Every other irregularity in a request (short request line, colon-less
//! header, unknown verb) degrades to a default value. The one thing the parser
//! refuses is a version token it cannot turn into two integers, so every
//! variant here describes that token.

use std::num::ParseIntError;

use thiserror::Error;

/// Which half of `HTTP/<major>.<minor>` failed to convert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionComponent {
    Major,
    Minor,
}

impl std::fmt::Display for VersionComponent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VersionComponent::Major => f.write_str("major"),
            VersionComponent::Minor => f.write_str("minor"),
        }
    }
}

/// Errors returned by `parse_request`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// A version component is missing or not a non-negative integer.
    #[error("invalid {component} version {value:?}: {source}")]
    InvalidVersionNumber {
        component: VersionComponent,
        value: String,
        #[source]
        source: ParseIntError,
    },
}
