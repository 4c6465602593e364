//! Error types for task domain validation.

use thiserror::Error;

/// Errors returned while constructing domain task values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The short description is empty after trimming.
    #[error("short description must not be empty")]
    EmptyShortDescription,

    /// The short description exceeds the storage limit.
    #[error(
        "short description is {0} characters, limit is {limit}",
        limit = crate::task::domain::ShortDescription::MAX_LENGTH
    )]
    ShortDescriptionTooLong(usize),

    /// The detailed description exceeds the storage limit.
    #[error(
        "detailed description is {0} characters, limit is {limit}",
        limit = crate::task::domain::DetailedDescription::MAX_LENGTH
    )]
    DetailedDescriptionTooLong(usize),
}
