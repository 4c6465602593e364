//! Identity and account lifecycle for Pensum.
//!
//! This module resolves "who is making this request" into the local [`domain::User`]
//! record the task subsystem's ownership checks run against, and drives the
//! account lifecycle: registration, sign-in and sign-out, password change and
//! recovery, and account deletion with its task cascade. Credential handling
//! itself is delegated to an external auth provider behind a port; this
//! module is not an auth system. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;
pub mod validation;
