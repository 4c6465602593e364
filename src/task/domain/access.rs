//! Ownership and state guard applied before operations on existing tasks.
//!
//! The guard is a pure decision: given the resolved acting user, the looked-up
//! task (if any), the intended operation, and the current time, it either
//! returns the task for the operation to proceed against or reports why the
//! operation must be refused. A task owned by another user is reported as
//! [`TaskAccessError::NotFound`], identical to a genuinely missing task, so
//! responses do not leak whether a foreign task identifier exists.

use super::{Task, TaskId, TaskStatus, UserId};
use chrono::{DateTime, Utc};
use thiserror::Error;

/// The kind of operation a caller intends to perform on an existing task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessIntent {
    /// Read the task without changing it.
    View,
    /// Change the task's mutable fields or mark it done.
    Mutate,
    /// Remove the task permanently.
    Delete,
}

/// Reasons the guard refuses an operation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskAccessError {
    /// No task with this identifier is visible to the acting user.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// The task exists and belongs to the user, but its status forbids the
    /// operation.
    #[error("task {id} is {label} and cannot be modified", label = .status.label())]
    InvalidState {
        /// The targeted task.
        id: TaskId,
        /// The derived status that blocked the operation.
        status: TaskStatus,
    },
}

/// Decides whether `user_id` may perform `intent` on the looked-up task.
///
/// Deletion requires ownership only; any status may be deleted by its owner.
/// Mutation additionally requires the derived status to be `Active` as of
/// `now`, so Done and Expired tasks are read-only apart from deletion.
///
/// # Errors
///
/// Returns [`TaskAccessError::NotFound`] when the task is absent or owned by
/// a different user, and [`TaskAccessError::InvalidState`] when a mutation
/// targets a non-Active task.
pub fn authorize<'a>(
    user_id: &UserId,
    task_id: TaskId,
    task: Option<&'a Task>,
    intent: AccessIntent,
    now: DateTime<Utc>,
) -> Result<&'a Task, TaskAccessError> {
    let task = task.ok_or(TaskAccessError::NotFound(task_id))?;
    if !task.is_owned_by(user_id) {
        return Err(TaskAccessError::NotFound(task_id));
    }

    match intent {
        AccessIntent::View | AccessIntent::Delete => Ok(task),
        AccessIntent::Mutate => {
            let status = task.status(now);
            if status.is_active() {
                Ok(task)
            } else {
                Err(TaskAccessError::InvalidState {
                    id: task_id,
                    status,
                })
            }
        }
    }
}
