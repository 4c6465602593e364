//! Domain model for task lifecycle management.
//!
//! The task domain models task ownership, validated descriptions, derived
//! runtime status, and the access guard applied before any operation on an
//! existing task, while keeping all infrastructure concerns outside of the
//! domain boundary.

mod access;
mod description;
mod error;
mod ids;
mod status;
mod task;

pub use access::{authorize, AccessIntent, TaskAccessError};
pub use description::{DetailedDescription, ShortDescription};
pub use error::TaskDomainError;
pub use ids::TaskId;
pub use status::TaskStatus;
pub use task::{PersistedTaskData, Task, TaskChanges};

pub use crate::identity::domain::UserId;
