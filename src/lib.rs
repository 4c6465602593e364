//! Pensum: personal task-tracking core.
//!
//! This crate provides the task lifecycle and account management core of a
//! personal task tracker: users own private task lists, every mutation is
//! gated by an ownership check, and a task's Active / Done / Expired status
//! is derived from its completion flag and deadline at evaluation time.
//!
//! # Architecture
//!
//! Pensum follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (database, auth, email)
//!
//! # Modules
//!
//! - [`task`]: Task entity model, ownership guard, and lifecycle service
//! - [`identity`]: Session resolution and account lifecycle
//! - [`validation`]: Shared field-level validation error type

pub mod identity;
pub mod task;
pub mod validation;
