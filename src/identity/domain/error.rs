//! Error types for identity domain validation.

use thiserror::Error;

/// Errors returned while constructing domain identity values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IdentityDomainError {
    /// The user identifier is empty.
    #[error("user identifier must not be empty")]
    EmptyUserId,

    /// The email address is not in a plausible `local@domain` shape.
    #[error("invalid email address: {0}")]
    InvalidEmail(String),
}
