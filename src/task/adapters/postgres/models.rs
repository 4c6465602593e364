//! Diesel row models for task persistence.

use super::schema::tasks;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for task records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskRow {
    /// Task identifier.
    pub id: uuid::Uuid,
    /// Owning user's identifier.
    pub owner_id: String,
    /// One-line summary.
    pub short_description: String,
    /// Optional free-form body.
    pub detailed_description: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Optional deadline.
    pub completion_date: Option<DateTime<Utc>>,
    /// Explicit completion flag.
    pub is_done: bool,
    /// Optimistic-concurrency row version.
    pub version: i64,
}

/// Insert model for task records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = tasks)]
pub struct NewTaskRow {
    /// Task identifier.
    pub id: uuid::Uuid,
    /// Owning user's identifier.
    pub owner_id: String,
    /// One-line summary.
    pub short_description: String,
    /// Optional free-form body.
    pub detailed_description: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Optional deadline.
    pub completion_date: Option<DateTime<Utc>>,
    /// Explicit completion flag.
    pub is_done: bool,
    /// Optimistic-concurrency row version.
    pub version: i64,
}
