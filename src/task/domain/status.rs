//! Derived runtime status for tasks.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Runtime status of a task, derived rather than stored.
///
/// `Done` always takes precedence over time-based expiry: a completed task
/// never reverts to `Active` or decays into `Expired`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Task is not done and its deadline, if any, has not passed.
    Active,
    /// Task has been explicitly marked complete by its owner.
    Done,
    /// Task is not done and its deadline has passed.
    Expired,
}

impl TaskStatus {
    /// Derives the status from the stored completion flag and deadline.
    ///
    /// A task with no deadline is `Active` at every instant until marked
    /// done. The deadline itself counts as expired: `now >= completion_date`
    /// yields `Expired`.
    #[must_use]
    pub fn derive(
        is_done: bool,
        completion_date: Option<DateTime<Utc>>,
        now: DateTime<Utc>,
    ) -> Self {
        if is_done {
            return Self::Done;
        }
        match completion_date {
            Some(deadline) if now >= deadline => Self::Expired,
            _ => Self::Active,
        }
    }

    /// Returns the human-facing label for this status.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Active => "In progress",
            Self::Done => "Done",
            Self::Expired => "Expired",
        }
    }

    /// Returns whether a task in this status accepts edits and completion.
    #[must_use]
    pub const fn is_active(self) -> bool {
        matches!(self, Self::Active)
    }
}
