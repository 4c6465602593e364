//! Domain model for identity and account management.

mod email;
mod error;
mod ids;
mod user;

pub use email::EmailAddress;
pub use error::IdentityDomainError;
pub use ids::{SessionToken, UserId};
pub use user::User;
