//! In-memory adapters for identity tests.
//!
//! A real deployment wires the ports to an external identity service and an
//! SMTP relay; these adapters exist so account flows can be exercised
//! end-to-end in process.

mod mailer;
mod provider;
mod user;

pub use mailer::RecordingMailer;
pub use provider::InMemoryAuthProvider;
pub use user::InMemoryUserRepository;
