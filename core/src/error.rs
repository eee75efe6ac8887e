//! Error type for the formatter.
//!
//! # Design
//! The Rust API takes every structured value by reference, so a missing value
//! cannot reach the formatter from Rust code. Callers that start from nullable
//! handles (the C ABI) go through [`require`] first, which fails before any
//! buffer is touched.

use thiserror::Error;

/// Errors raised before formatting starts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    /// A required structured value was absent.
    #[error("{0} may not be null")]
    NullArgument(&'static str),
}

/// Unwrap a value that must be present, naming it in the error otherwise.
pub fn require<'a, T: ?Sized>(value: Option<&'a T>, name: &'static str) -> Result<&'a T, FormatError> {
    value.ok_or(FormatError::NullArgument(name))
}
