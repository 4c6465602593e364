//! Diesel schema for user persistence.

diesel::table! {
    /// Local user profile records.
    ///
    /// `email` carries a unique index; `tasks.owner_id` references `id` with
    /// `ON DELETE CASCADE`.
    users (id) {
        /// Provider-issued user identifier.
        #[max_length = 255]
        id -> Varchar,
        /// Unique, lowercased email address.
        #[max_length = 254]
        email -> Varchar,
        /// Given name.
        #[max_length = 100]
        first_name -> Varchar,
        /// Family name.
        #[max_length = 100]
        last_name -> Varchar,
    }
}
