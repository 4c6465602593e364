//! Diesel schema for task persistence.

diesel::table! {
    /// Task records owned by users.
    ///
    /// `owner_id` references `users (id)` with `ON DELETE CASCADE`, so the
    /// database enforces the task-to-user cascade even if the service-level
    /// batch delete is bypassed.
    tasks (id) {
        /// Task identifier.
        id -> Uuid,
        /// Owning user's provider-issued identifier.
        #[max_length = 255]
        owner_id -> Varchar,
        /// One-line summary.
        #[max_length = 128]
        short_description -> Varchar,
        /// Optional free-form body.
        #[max_length = 1024]
        detailed_description -> Nullable<Varchar>,
        /// Creation timestamp, immutable after insert.
        created_at -> Timestamptz,
        /// Optional deadline.
        completion_date -> Nullable<Timestamptz>,
        /// Explicit completion flag.
        is_done -> Bool,
        /// Optimistic-concurrency row version.
        version -> Int8,
    }
}
