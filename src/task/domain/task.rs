//! Task aggregate root.

use super::{DetailedDescription, ShortDescription, TaskId, TaskStatus, UserId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Task aggregate root.
///
/// Ownership (`owner_id`) and `created_at` are fixed at creation. The
/// completion flag moves one way only, through [`Task::mark_done`]. Status is
/// never stored; it is derived on demand from the flag and deadline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    owner_id: UserId,
    short_description: ShortDescription,
    detailed_description: Option<DetailedDescription>,
    created_at: DateTime<Utc>,
    completion_date: Option<DateTime<Utc>>,
    is_done: bool,
    version: i64,
}

/// The mutable fields applied by an edit, as one atomic replacement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskChanges {
    /// Replacement one-line summary.
    pub short_description: ShortDescription,
    /// Replacement body, cleared when `None`.
    pub detailed_description: Option<DetailedDescription>,
    /// Replacement deadline, cleared when `None`.
    pub completion_date: Option<DateTime<Utc>>,
}

/// Parameter object for reconstructing a persisted task aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted owner identifier.
    pub owner_id: UserId,
    /// Persisted one-line summary.
    pub short_description: ShortDescription,
    /// Persisted body, if any.
    pub detailed_description: Option<DetailedDescription>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted deadline, if any.
    pub completion_date: Option<DateTime<Utc>>,
    /// Persisted completion flag.
    pub is_done: bool,
    /// Persisted optimistic-concurrency row version.
    pub version: i64,
}

impl Task {
    /// Creates a new active task owned by `owner_id`.
    #[must_use]
    pub fn new(
        owner_id: UserId,
        short_description: ShortDescription,
        detailed_description: Option<DetailedDescription>,
        completion_date: Option<DateTime<Utc>>,
        clock: &impl Clock,
    ) -> Self {
        Self {
            id: TaskId::new(),
            owner_id,
            short_description,
            detailed_description,
            created_at: clock.utc(),
            completion_date,
            is_done: false,
            version: 0,
        }
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            owner_id: data.owner_id,
            short_description: data.short_description,
            detailed_description: data.detailed_description,
            created_at: data.created_at,
            completion_date: data.completion_date,
            is_done: data.is_done,
            version: data.version,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the owning user's identifier.
    #[must_use]
    pub const fn owner_id(&self) -> &UserId {
        &self.owner_id
    }

    /// Returns the one-line summary.
    #[must_use]
    pub const fn short_description(&self) -> &ShortDescription {
        &self.short_description
    }

    /// Returns the body, if any.
    #[must_use]
    pub const fn detailed_description(&self) -> Option<&DetailedDescription> {
        self.detailed_description.as_ref()
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the deadline, if any.
    #[must_use]
    pub const fn completion_date(&self) -> Option<DateTime<Utc>> {
        self.completion_date
    }

    /// Returns the completion flag.
    #[must_use]
    pub const fn is_done(&self) -> bool {
        self.is_done
    }

    /// Returns the row version this aggregate was loaded with.
    #[must_use]
    pub const fn version(&self) -> i64 {
        self.version
    }

    /// Derives the runtime status as of `now`.
    #[must_use]
    pub fn status(&self, now: DateTime<Utc>) -> TaskStatus {
        TaskStatus::derive(self.is_done, self.completion_date, now)
    }

    /// Returns whether `user_id` owns this task.
    #[must_use]
    pub fn is_owned_by(&self, user_id: &UserId) -> bool {
        self.owner_id == *user_id
    }

    /// Applies an edit to the three mutable fields.
    ///
    /// `id`, `owner_id`, `created_at`, and `is_done` are never altered by an
    /// edit. Callers must have passed the access guard first; this method
    /// does not re-check status.
    pub fn apply_changes(&mut self, changes: TaskChanges) {
        self.short_description = changes.short_description;
        self.detailed_description = changes.detailed_description;
        self.completion_date = changes.completion_date;
    }

    /// Marks the task complete.
    ///
    /// One-way: there is no transition back to not-done. Callers must have
    /// passed the access guard first; this method does not re-check status.
    pub fn mark_done(&mut self) {
        self.is_done = true;
    }
}
