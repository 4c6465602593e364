//! In-memory repository for task lifecycle tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::task::{
    domain::{PersistedTaskData, Task, TaskId, UserId},
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};

/// Thread-safe in-memory task repository.
///
/// Honours the same optimistic-concurrency contract as the `PostgreSQL`
/// adapter: updates apply only while the stored row version matches the
/// version the aggregate was loaded with.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskRepository {
    state: Arc<RwLock<InMemoryTaskState>>,
}

#[derive(Debug, Default)]
struct InMemoryTaskState {
    tasks: HashMap<TaskId, Task>,
    owner_index: HashMap<UserId, Vec<TaskId>>,
}

impl InMemoryTaskRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn index_owner(state: &mut InMemoryTaskState, task: &Task) {
    state
        .owner_index
        .entry(task.owner_id().clone())
        .or_default()
        .push(task.id());
}

/// Removes a task ID from the owner index, cleaning up the entry if empty.
fn remove_from_owner_index(state: &mut InMemoryTaskState, owner_id: &UserId, task_id: TaskId) {
    if let Some(ids) = state.owner_index.get_mut(owner_id) {
        ids.retain(|id| *id != task_id);
        if ids.is_empty() {
            state.owner_index.remove(owner_id);
        }
    }
}

/// Returns a stored copy of `task` with the row version advanced by one.
fn with_bumped_version(task: &Task) -> Task {
    Task::from_persisted(PersistedTaskData {
        id: task.id(),
        owner_id: task.owner_id().clone(),
        short_description: task.short_description().clone(),
        detailed_description: task.detailed_description().cloned(),
        created_at: task.created_at(),
        completion_date: task.completion_date(),
        is_done: task.is_done(),
        version: task.version() + 1,
    })
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        if state.tasks.contains_key(&task.id()) {
            return Err(TaskRepositoryError::DuplicateTask(task.id()));
        }

        index_owner(&mut state, task);
        state.tasks.insert(task.id(), task.clone());
        Ok(())
    }

    async fn update(&self, task: &Task) -> TaskRepositoryResult<Task> {
        let mut state = self.state.write().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;

        let stored_version = state
            .tasks
            .get(&task.id())
            .ok_or(TaskRepositoryError::NotFound(task.id()))?
            .version();
        if stored_version != task.version() {
            return Err(TaskRepositoryError::Conflict(task.id()));
        }

        let persisted = with_bumped_version(task);
        state.tasks.insert(task.id(), persisted.clone());
        Ok(persisted)
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        let state = self.state.read().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(state.tasks.get(&id).cloned())
    }

    async fn list_by_owner(&self, owner_id: &UserId) -> TaskRepositoryResult<Vec<Task>> {
        let state = self.state.read().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let mut tasks: Vec<Task> = state
            .owner_index
            .get(owner_id)
            .map(|ids| {
                ids.iter()
                    .filter_map(|id| state.tasks.get(id).cloned())
                    .collect()
            })
            .unwrap_or_default();
        tasks.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
        Ok(tasks)
    }

    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let removed = state
            .tasks
            .remove(&id)
            .ok_or(TaskRepositoryError::NotFound(id))?;
        let owner_id = removed.owner_id().clone();
        remove_from_owner_index(&mut state, &owner_id, id);
        Ok(())
    }

    async fn delete_all_for_owner(&self, owner_id: &UserId) -> TaskRepositoryResult<usize> {
        let mut state = self.state.write().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let ids = state.owner_index.remove(owner_id).unwrap_or_default();
        let mut removed = 0;
        for id in ids {
            if state.tasks.remove(&id).is_some() {
                removed += 1;
            }
        }
        Ok(removed)
    }
}
