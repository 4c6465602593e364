//! Port contracts for identity and account management.
//!
//! Ports define the narrow contracts this crate requires from its external
//! collaborators: the auth provider that owns credentials and sessions, the
//! mailer, and user-record persistence.

pub mod mailer;
pub mod provider;
pub mod repository;

pub use mailer::{EmailMessage, Mailer, MailerError, MailerResult};
pub use provider::{AuthProvider, AuthProviderError, AuthProviderResult, ResetToken};
pub use repository::{UserRepository, UserRepositoryError, UserRepositoryResult};
