//! Task lifecycle management for Pensum.
//!
//! This module implements the task side of the tracker: creating tasks with
//! validated descriptions, listing a user's tasks newest-first partitioned
//! into active and inactive buckets, editing and completing tasks while they
//! are still active, and deleting tasks (singly or as the batch cascade run
//! during account deletion). Every operation against an existing task is
//! preceded by an ownership-and-state guard evaluation. The module follows
//! hexagonal architecture:
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
