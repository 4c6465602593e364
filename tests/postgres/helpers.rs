//! Shared test helpers for `PostgreSQL` integration tests.

pub use super::cluster::{BoxError, PostgresCluster, postgres_cluster};
use super::cluster::ManagedCluster;
use chrono::{DateTime, Local, TimeZone, Utc};
use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use mockable::Clock;
use pensum::identity::adapters::postgres::PostgresUserRepository;
use pensum::identity::domain::{EmailAddress, User, UserId};
use pensum::identity::ports::UserRepository;
use pensum::task::adapters::postgres::PostgresTaskRepository;
use pensum::task::domain::{DetailedDescription, ShortDescription, Task};
use tokio::runtime::Runtime;

/// SQL to create the users and tasks schema for tests.
pub const CREATE_SCHEMA_SQL: &str =
    include_str!("../../migrations/2026-08-20-000000_create_users_and_tasks/up.sql");

/// Template database name for pre-migrated schema.
pub const TEMPLATE_DB: &str = "pensum_test_template";

/// Clock pinned to a fixed instant for deterministic creation timestamps.
#[derive(Debug, Clone)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.0.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.0
    }
}

/// A reference instant used across the suite.
pub fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0)
        .single()
        .expect("valid timestamp")
}

/// Builds a current-thread-agnostic runtime for driving async repositories.
///
/// # Errors
///
/// Returns an error if the runtime cannot be constructed.
pub fn test_runtime() -> Result<Runtime, BoxError> {
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|err| Box::new(err) as BoxError)
}

/// Drops the per-test database once the test is done with it.
pub struct CleanupGuard<'a> {
    cluster: &'a ManagedCluster,
    db_name: String,
}

impl<'a> CleanupGuard<'a> {
    /// Registers `db_name` for cleanup against `cluster`.
    #[must_use]
    pub const fn new(cluster: &'a ManagedCluster, db_name: String) -> Self {
        Self { cluster, db_name }
    }

    /// Drops the registered database.
    ///
    /// # Errors
    ///
    /// Returns an error if the `DROP DATABASE` statement fails.
    pub fn cleanup(self) -> Result<(), BoxError> {
        self.cluster.drop_database(&self.db_name)
    }
}

/// Ensures the template database exists with the schema applied.
///
/// # Errors
///
/// Returns an error if template creation or migration fails.
pub fn ensure_template(cluster: &ManagedCluster) -> Result<(), BoxError> {
    let connection = cluster.connection();
    cluster.ensure_template_exists(TEMPLATE_DB, move |db_name| {
        apply_migrations(&connection.database_url(db_name))
    })
}

fn apply_migrations(url: &str) -> Result<(), BoxError> {
    let mut conn = PgConnection::establish(url).map_err(|err| Box::new(err) as BoxError)?;
    conn.batch_execute(CREATE_SCHEMA_SQL)
        .map_err(|err| Box::new(err) as BoxError)?;
    Ok(())
}

/// Creates a test database from the template and returns both repositories
/// backed by a shared pool.
///
/// # Errors
///
/// Returns an error if database creation or pool construction fails.
pub fn setup_repositories(
    cluster: &ManagedCluster,
    db_name: &str,
) -> Result<(PostgresTaskRepository, PostgresUserRepository), BoxError> {
    cluster.create_database_from_template(db_name, TEMPLATE_DB)?;
    let url = cluster.connection().database_url(db_name);
    let manager = ConnectionManager::<PgConnection>::new(url);
    let pool = Pool::builder()
        .max_size(1)
        .build(manager)
        .map_err(|err| Box::new(err) as BoxError)?;
    Ok((
        PostgresTaskRepository::new(pool.clone()),
        PostgresUserRepository::new(pool),
    ))
}

/// Stores a user record to satisfy the `tasks.owner_id` foreign key.
///
/// # Errors
///
/// Returns an error if validation or the insert fails.
pub fn store_owner(
    rt: &Runtime,
    users: &PostgresUserRepository,
    id: &str,
    email: &str,
) -> Result<UserId, BoxError> {
    let user = User::new(UserId::new(id)?, EmailAddress::new(email)?, "Alice", "Larkin");
    rt.block_on(users.store(&user))?;
    Ok(user.id().clone())
}

/// Creates an active task owned by `owner` with a pinned creation instant.
///
/// # Errors
///
/// Returns an error if description validation fails.
pub fn task_owned_by(owner: &UserId, created_at: DateTime<Utc>) -> Result<Task, BoxError> {
    Ok(Task::new(
        owner.clone(),
        ShortDescription::new("Inspect the fuse box")?,
        Some(DetailedDescription::new("Check that the RCD trips cleanly.")?),
        None,
        &FixedClock(created_at),
    ))
}
