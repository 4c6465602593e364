//! Shared field-level validation error type.
//!
//! Input validation in both subsystems is expressed as pure rule functions
//! that report failures against a named field, decoupled from any transport
//! or form-binding mechanism. Callers collect the reported errors and render
//! them next to the offending input.

use std::fmt;

/// A validation failure attributed to a single named input field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    field: &'static str,
    message: String,
}

impl FieldError {
    /// Creates a field error for `field` with a human-readable message.
    #[must_use]
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }

    /// Returns the name of the offending field.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        self.field
    }

    /// Returns the human-readable failure message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}
