//! Task domain model.
//!
//! # Responsibility
//! - Define the canonical task record and its lifecycle fields.
//! - Validate descriptions before anything reaches persistence.
//!
//! # Invariants
//! - `id` is store-assigned, stable, and never reused for another task.
//! - A blank description never exists past `TaskDraft` construction.
//! - Soft delete is represented by `deleted_at`, never by row removal.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Stable identifier assigned by the store at insert time.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type TaskId = i64;

/// Canonical persisted task record.
///
/// Timestamps are epoch milliseconds. `completed_at`/`deleted_at` model
/// lifecycle state as present/absent values, not sentinel dates: absent
/// `completed_at` means open, absent `deleted_at` means active.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Store-assigned id. Ids of soft-deleted tasks are never recycled.
    pub id: TaskId,
    /// Trimmed, non-blank text. Immutable after creation.
    pub description: String,
    /// Store-assigned creation time in epoch milliseconds.
    pub created_at: i64,
    /// Completion time. Set at most once; completing again is a no-op.
    pub completed_at: Option<i64>,
    /// Soft-delete tombstone time. Terminal once set.
    pub deleted_at: Option<i64>,
}

impl Task {
    /// Returns whether this task has been completed.
    pub fn is_completed(&self) -> bool {
        self.completed_at.is_some()
    }

    /// Returns whether this task is visible outside the `Removed` filter.
    pub fn is_active(&self) -> bool {
        self.deleted_at.is_none()
    }
}

/// Validated candidate for insertion.
///
/// The only way to hand a description to the repository: construction trims
/// the input and rejects blank text, so write paths never see an invalid
/// description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDraft {
    description: String,
}

impl TaskDraft {
    /// Trims `description` and builds a draft, rejecting blank input.
    ///
    /// # Errors
    /// - `TaskValidationError::EmptyDescription` when the trimmed text is
    ///   empty. The error keeps the original input for reporting.
    pub fn new(description: impl Into<String>) -> Result<Self, TaskValidationError> {
        let raw = description.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(TaskValidationError::EmptyDescription { input: raw });
        }
        Ok(Self {
            description: trimmed.to_string(),
        })
    }

    /// Returns the trimmed description text.
    pub fn description(&self) -> &str {
        &self.description
    }
}

/// Validation failure for task input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskValidationError {
    /// Description was empty or whitespace-only. `input` is the raw text as
    /// supplied by the caller, before trimming.
    EmptyDescription { input: String },
}

impl Display for TaskValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyDescription { input } => {
                write!(f, "task '{input}': description cannot be empty")
            }
        }
    }
}

impl Error for TaskValidationError {}

/// Closed selection predicate for list queries.
///
/// Explicit ids and filter are mutually exclusive selection modes: when a
/// caller supplies a non-empty id set the repository uses `Ids` and the
/// predicate column below is ignored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ListFilter {
    /// Active tasks (not soft-deleted), completed or not.
    All,
    /// Active tasks that are not completed. The default view.
    #[default]
    Uncompleted,
    /// Active tasks that are completed.
    Completed,
    /// Soft-deleted tasks only.
    Removed,
    /// Select by explicit id set, ignoring lifecycle state.
    Ids,
}
