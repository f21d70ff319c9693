//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the task data-access contract consumed by the service layer.
//! - Isolate SQLite query details from business orchestration.
//!
//! # Invariants
//! - Repository writes only accept pre-validated `TaskDraft` input.
//! - Bulk updates report changed-row counts; missing ids are skipped, not
//!   errors.

pub mod task_repo;
