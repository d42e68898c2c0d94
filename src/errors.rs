//! Application error model
//!
//! Defines a typed error hierarchy using `thiserror`. The taxonomy is
//! deliberately narrow: extraction never fails outright (missing parts and
//! undecodable payloads are represented as absent/empty results), so the
//! only fallible surface is outbound-message construction.

use thiserror::Error;

/// Content-engine error type
///
/// Extraction APIs return `Option`/empty values for "nothing found"; this
/// type covers the cases that are genuine caller mistakes.
#[derive(Debug, Error)]
pub enum ContentError {
    /// Invalid user input (validation failed, malformed header field)
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl ContentError {
    /// Convenience constructor for `InvalidInput`
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }
}

/// Type alias for fallible return values
///
/// Use this for all internal functions that can fail. Provides a consistent
/// error type throughout the codebase.
pub type ContentResult<T> = Result<T, ContentError>;
