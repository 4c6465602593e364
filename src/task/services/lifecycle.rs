//! Service layer for task creation, listing, editing, completion, and
//! deletion.
//!
//! Every operation targeting an existing task evaluates
//! [`crate::task::domain::authorize`] before touching storage state, so the
//! ownership and status rules live in one place. The guard's read and the
//! mutating write are not atomic; a concurrent writer is detected by the
//! repository's version check and surfaces as
//! [`TaskRepositoryError::Conflict`], which callers may retry.

use crate::task::{
    domain::{authorize, AccessIntent, Task, TaskAccessError, TaskChanges, TaskId, UserId},
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
    validation::{validate_task_input, ValidatedTaskInput},
};
use crate::validation::FieldError;
use chrono::{DateTime, Utc};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Request payload for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    short_description: String,
    detailed_description: Option<String>,
    completion_date: Option<DateTime<Utc>>,
}

impl CreateTaskRequest {
    /// Creates a request with the required summary field.
    #[must_use]
    pub fn new(short_description: impl Into<String>) -> Self {
        Self {
            short_description: short_description.into(),
            detailed_description: None,
            completion_date: None,
        }
    }

    /// Sets the free-form body.
    #[must_use]
    pub fn with_detailed_description(mut self, body: impl Into<String>) -> Self {
        self.detailed_description = Some(body.into());
        self
    }

    /// Sets the deadline.
    #[must_use]
    pub const fn with_completion_date(mut self, deadline: DateTime<Utc>) -> Self {
        self.completion_date = Some(deadline);
        self
    }
}

/// Request payload for editing a task's mutable fields.
///
/// Absent optional fields clear the stored value; an edit is an atomic
/// replacement of all three mutable fields, never a partial patch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditTaskRequest {
    short_description: String,
    detailed_description: Option<String>,
    completion_date: Option<DateTime<Utc>>,
}

impl EditTaskRequest {
    /// Creates a request with the required summary field.
    #[must_use]
    pub fn new(short_description: impl Into<String>) -> Self {
        Self {
            short_description: short_description.into(),
            detailed_description: None,
            completion_date: None,
        }
    }

    /// Sets the free-form body.
    #[must_use]
    pub fn with_detailed_description(mut self, body: impl Into<String>) -> Self {
        self.detailed_description = Some(body.into());
        self
    }

    /// Sets the deadline.
    #[must_use]
    pub const fn with_completion_date(mut self, deadline: DateTime<Utc>) -> Self {
        self.completion_date = Some(deadline);
        self
    }
}

/// A user's task list partitioned for presentation.
///
/// Both buckets preserve the repository's newest-first creation order. The
/// partition is evaluated once, at `as_of`; a task whose deadline passes
/// after the listing was taken stays in the bucket it was placed in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskBoard {
    active: Vec<Task>,
    inactive: Vec<Task>,
    as_of: DateTime<Utc>,
}

impl TaskBoard {
    /// Returns the tasks that were Active when the listing was taken.
    #[must_use]
    pub fn active(&self) -> &[Task] {
        &self.active
    }

    /// Returns the tasks that were Done or Expired when the listing was
    /// taken.
    #[must_use]
    pub fn inactive(&self) -> &[Task] {
        &self.inactive
    }

    /// Returns the instant the partition was evaluated at.
    #[must_use]
    pub const fn as_of(&self) -> DateTime<Utc> {
        self.as_of
    }

    /// Returns the total number of tasks across both buckets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.active.len() + self.inactive.len()
    }

    /// Returns whether the user has no tasks at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.active.is_empty() && self.inactive.is_empty()
    }
}

/// Service-level errors for task lifecycle operations.
#[derive(Debug, Error)]
pub enum TaskLifecycleError {
    /// One or more input fields failed validation.
    #[error("invalid task input: {}", join_field_errors(.0))]
    Validation(Vec<FieldError>),

    /// The access guard refused the operation.
    #[error(transparent)]
    Access(#[from] TaskAccessError),

    /// Repository operation failed. [`TaskRepositoryError::Conflict`] means
    /// a concurrent writer changed the task; the caller may re-read and
    /// retry.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
}

/// Result type for task lifecycle service operations.
pub type TaskLifecycleResult<T> = Result<T, TaskLifecycleError>;

fn join_field_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Task lifecycle orchestration service.
pub struct TaskLifecycleService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> Clone for TaskLifecycleService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<R, C> TaskLifecycleService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new task lifecycle service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Creates a new task owned by `owner_id`.
    ///
    /// New tasks start not-done with `created_at` taken from the service
    /// clock. No guard applies; the resource does not exist yet.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Validation`] when the descriptions are
    /// invalid, or [`TaskLifecycleError::Repository`] when persistence fails.
    pub async fn create(
        &self,
        owner_id: &UserId,
        request: CreateTaskRequest,
    ) -> TaskLifecycleResult<Task> {
        let ValidatedTaskInput {
            short_description,
            detailed_description,
        } = validate_task_input(
            &request.short_description,
            request.detailed_description.as_deref(),
        )
        .map_err(TaskLifecycleError::Validation)?;

        let task = Task::new(
            owner_id.clone(),
            short_description,
            detailed_description,
            request.completion_date,
            &*self.clock,
        );
        self.repository.store(&task).await?;
        Ok(task)
    }

    /// Lists `owner_id`'s tasks, newest creation first, partitioned into
    /// Active and Inactive (Done or Expired) buckets as of the service
    /// clock's current time.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when persistence lookup
    /// fails.
    pub async fn list(&self, owner_id: &UserId) -> TaskLifecycleResult<TaskBoard> {
        let tasks = self.repository.list_by_owner(owner_id).await?;
        let now = self.clock.utc();
        let (active, inactive) = tasks
            .into_iter()
            .partition(|task| task.status(now).is_active());
        Ok(TaskBoard {
            active,
            inactive,
            as_of: now,
        })
    }

    /// Fetches one of `owner_id`'s tasks for display.
    ///
    /// # Errors
    ///
    /// Returns [`TaskAccessError::NotFound`] (via
    /// [`TaskLifecycleError::Access`]) when the task is absent or owned by
    /// another user.
    pub async fn find(&self, owner_id: &UserId, task_id: TaskId) -> TaskLifecycleResult<Task> {
        let task = self.guarded(owner_id, task_id, AccessIntent::View).await?;
        Ok(task)
    }

    /// Replaces the mutable fields of an Active task owned by `owner_id`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Validation`] for invalid input,
    /// [`TaskLifecycleError::Access`] when the task is missing, foreign, or
    /// not Active, and [`TaskRepositoryError::Conflict`] (via
    /// [`TaskLifecycleError::Repository`]) when a concurrent writer changed
    /// the task between the guard's read and the write.
    pub async fn edit(
        &self,
        owner_id: &UserId,
        task_id: TaskId,
        request: EditTaskRequest,
    ) -> TaskLifecycleResult<Task> {
        let ValidatedTaskInput {
            short_description,
            detailed_description,
        } = validate_task_input(
            &request.short_description,
            request.detailed_description.as_deref(),
        )
        .map_err(TaskLifecycleError::Validation)?;

        let mut task = self
            .guarded(owner_id, task_id, AccessIntent::Mutate)
            .await?;
        task.apply_changes(TaskChanges {
            short_description,
            detailed_description,
            completion_date: request.completion_date,
        });
        let updated = self.repository.update(&task).await?;
        Ok(updated)
    }

    /// Marks an Active task owned by `owner_id` as done.
    ///
    /// An already-Done task never reaches the flag assignment: the guard
    /// rejects it as not Active first.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Access`] when the task is missing,
    /// foreign, or not Active, and [`TaskRepositoryError::Conflict`] (via
    /// [`TaskLifecycleError::Repository`]) on a concurrent write.
    pub async fn mark_done(
        &self,
        owner_id: &UserId,
        task_id: TaskId,
    ) -> TaskLifecycleResult<Task> {
        let mut task = self
            .guarded(owner_id, task_id, AccessIntent::Mutate)
            .await?;
        task.mark_done();
        let updated = self.repository.update(&task).await?;
        Ok(updated)
    }

    /// Deletes one of `owner_id`'s tasks, whatever its status.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Access`] when the task is absent or
    /// owned by another user.
    pub async fn delete(&self, owner_id: &UserId, task_id: TaskId) -> TaskLifecycleResult<()> {
        let task = self
            .guarded(owner_id, task_id, AccessIntent::Delete)
            .await?;
        self.repository.delete(task.id()).await?;
        Ok(())
    }

    /// Deletes every task owned by `owner_id` as one batch.
    ///
    /// Invoked by the account-deletion flow before the user record itself is
    /// removed. Returns the number of tasks removed.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when the batch delete
    /// fails.
    pub async fn delete_all_for_user(&self, owner_id: &UserId) -> TaskLifecycleResult<usize> {
        let removed: TaskRepositoryResult<usize> =
            self.repository.delete_all_for_owner(owner_id).await;
        Ok(removed?)
    }

    /// Looks up `task_id` and evaluates the access guard for `intent`.
    async fn guarded(
        &self,
        owner_id: &UserId,
        task_id: TaskId,
        intent: AccessIntent,
    ) -> TaskLifecycleResult<Task> {
        let found = self.repository.find_by_id(task_id).await?;
        let now = self.clock.utc();
        let task = authorize(owner_id, task_id, found.as_ref(), intent, now)?;
        Ok(task.clone())
    }
}
