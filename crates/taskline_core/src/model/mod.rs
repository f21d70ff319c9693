//! Domain model for task records.
//!
//! # Responsibility
//! - Define canonical data structures used by core business logic.
//! - Keep lifecycle state (open/completed/removed) in one record shape.
//!
//! # Invariants
//! - Every task is identified by a stable store-assigned `TaskId`.
//! - Removal is represented by soft-delete tombstones, not hard delete.

pub mod task;
