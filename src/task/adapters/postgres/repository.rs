//! `PostgreSQL` repository implementation for task storage.

use super::{
    models::{NewTaskRow, TaskRow},
    schema::tasks,
};
use crate::task::{
    domain::{
        DetailedDescription, PersistedTaskData, ShortDescription, Task, TaskId, UserId,
    },
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL` connection pool type used by task adapters.
pub type TaskPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed task repository.
///
/// Concurrent modification is detected by filtering updates on the row
/// version the aggregate was loaded with; an update matching zero rows while
/// the task still exists means another writer won the race.
#[derive(Debug, Clone)]
pub struct PostgresTaskRepository {
    pool: TaskPgPool,
}

impl PostgresTaskRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: TaskPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> TaskRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> TaskRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(TaskRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(TaskRepositoryError::persistence)?
    }
}

#[async_trait]
impl TaskRepository for PostgresTaskRepository {
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()> {
        let task_id = task.id();
        let new_row = to_new_row(task);

        self.run_blocking(move |connection| {
            diesel::insert_into(tasks::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        TaskRepositoryError::DuplicateTask(task_id)
                    }
                    _ => TaskRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn update(&self, task: &Task) -> TaskRepositoryResult<Task> {
        let task_id = task.id();
        let loaded_version = task.version();
        let short_description = task.short_description().as_str().to_owned();
        let detailed_description = task
            .detailed_description()
            .map(|body| body.as_str().to_owned());
        let completion_date = task.completion_date();
        let is_done = task.is_done();

        self.run_blocking(move |connection| {
            let updated = diesel::update(
                tasks::table.filter(
                    tasks::id
                        .eq(task_id.into_inner())
                        .and(tasks::version.eq(loaded_version)),
                ),
            )
            .set((
                tasks::short_description.eq(short_description),
                tasks::detailed_description.eq(detailed_description),
                tasks::completion_date.eq(completion_date),
                tasks::is_done.eq(is_done),
                tasks::version.eq(loaded_version + 1),
            ))
            .returning(TaskRow::as_returning())
            .get_result::<TaskRow>(connection)
            .optional()
            .map_err(TaskRepositoryError::persistence)?;

            match updated {
                Some(row) => row_to_task(row),
                // Zero rows matched: the task is gone or its version moved on.
                None => {
                    let exists = task_exists(connection, task_id)?;
                    if exists {
                        Err(TaskRepositoryError::Conflict(task_id))
                    } else {
                        Err(TaskRepositoryError::NotFound(task_id))
                    }
                }
            }
        })
        .await
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        self.run_blocking(move |connection| {
            let row = tasks::table
                .filter(tasks::id.eq(id.into_inner()))
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()
                .map_err(TaskRepositoryError::persistence)?;
            row.map(row_to_task).transpose()
        })
        .await
    }

    async fn list_by_owner(&self, owner_id: &UserId) -> TaskRepositoryResult<Vec<Task>> {
        let owner = owner_id.as_str().to_owned();
        self.run_blocking(move |connection| {
            let rows = tasks::table
                .filter(tasks::owner_id.eq(owner))
                .order(tasks::created_at.desc())
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }

    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<()> {
        self.run_blocking(move |connection| {
            let removed = diesel::delete(tasks::table.filter(tasks::id.eq(id.into_inner())))
                .execute(connection)
                .map_err(TaskRepositoryError::persistence)?;
            if removed == 0 {
                return Err(TaskRepositoryError::NotFound(id));
            }
            Ok(())
        })
        .await
    }

    async fn delete_all_for_owner(&self, owner_id: &UserId) -> TaskRepositoryResult<usize> {
        let owner = owner_id.as_str().to_owned();
        self.run_blocking(move |connection| {
            diesel::delete(tasks::table.filter(tasks::owner_id.eq(owner)))
                .execute(connection)
                .map_err(TaskRepositoryError::persistence)
        })
        .await
    }
}

fn to_new_row(task: &Task) -> NewTaskRow {
    NewTaskRow {
        id: task.id().into_inner(),
        owner_id: task.owner_id().as_str().to_owned(),
        short_description: task.short_description().as_str().to_owned(),
        detailed_description: task
            .detailed_description()
            .map(|body| body.as_str().to_owned()),
        created_at: task.created_at(),
        completion_date: task.completion_date(),
        is_done: task.is_done(),
        version: task.version(),
    }
}

fn row_to_task(row: TaskRow) -> TaskRepositoryResult<Task> {
    let TaskRow {
        id,
        owner_id,
        short_description,
        detailed_description,
        created_at,
        completion_date,
        is_done,
        version,
    } = row;

    let data = PersistedTaskData {
        id: TaskId::from_uuid(id),
        owner_id: UserId::new(owner_id).map_err(TaskRepositoryError::persistence)?,
        short_description: ShortDescription::new(short_description)
            .map_err(TaskRepositoryError::persistence)?,
        detailed_description: detailed_description
            .map(DetailedDescription::new)
            .transpose()
            .map_err(TaskRepositoryError::persistence)?,
        created_at,
        completion_date,
        is_done,
        version,
    };
    Ok(Task::from_persisted(data))
}

fn task_exists(connection: &mut PgConnection, id: TaskId) -> TaskRepositoryResult<bool> {
    let found = tasks::table
        .filter(tasks::id.eq(id.into_inner()))
        .count()
        .get_result::<i64>(connection)
        .map_err(TaskRepositoryError::persistence)?;
    Ok(found > 0)
}
