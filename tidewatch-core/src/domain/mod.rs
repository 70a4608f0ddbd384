//! Core domain types
//!
//! The entities tracked by the registry. These are the shapes served by the
//! server and consumed by the client and CLI.

pub mod forecast;
pub mod job;
pub mod pipeline;

use thiserror::Error;

/// Error returned when a wire string names no known enum variant
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid {kind} '{value}' (expected one of: {})", .expected.join(", "))]
pub struct ParseEnumError {
    kind: &'static str,
    value: String,
    expected: &'static [&'static str],
}

impl ParseEnumError {
    pub(crate) fn new(kind: &'static str, value: &str, expected: &'static [&'static str]) -> Self {
        Self {
            kind,
            value: value.to_string(),
            expected,
        }
    }

    /// The rejected input
    pub fn value(&self) -> &str {
        &self.value
    }
}
