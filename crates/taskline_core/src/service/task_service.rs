//! Task use-case service.
//!
//! # Responsibility
//! - Enforce task business rules between untrusted input and the repository.
//! - Wrap repository failures with operation-scoped context.
//!
//! # Invariants
//! - Validation failures are collected across all inputs, never
//!   short-circuited, and nothing is persisted when any input is invalid.
//! - Delete/list/complete are each a single repository round trip.

use crate::model::task::{ListFilter, Task, TaskDraft, TaskId, TaskValidationError};
use crate::repo::task_repo::{RepoError, TaskRepository};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Service-level error: collected validation failures or a wrapped
/// repository failure scoped to the operation that hit it.
#[derive(Debug)]
pub enum TaskServiceError {
    /// One entry per invalid description, in input order.
    Validation(Vec<TaskValidationError>),
    Create(RepoError),
    Delete(RepoError),
    List(RepoError),
    Complete(RepoError),
}

impl Display for TaskServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(errors) => {
                write!(f, "validation errors: ")?;
                for (index, error) in errors.iter().enumerate() {
                    if index > 0 {
                        write!(f, "; ")?;
                    }
                    write!(f, "{error}")?;
                }
                Ok(())
            }
            Self::Create(err) => write!(f, "failed to create tasks: {err}"),
            Self::Delete(err) => write!(f, "failed to delete tasks: {err}"),
            Self::List(err) => write!(f, "failed to list tasks: {err}"),
            Self::Complete(err) => write!(f, "failed to complete tasks: {err}"),
        }
    }
}

impl Error for TaskServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(errors) => errors
                .first()
                .map(|err| err as &(dyn Error + 'static)),
            Self::Create(err)
            | Self::Delete(err)
            | Self::List(err)
            | Self::Complete(err) => Some(err),
        }
    }
}

/// Use-case service owning task business rules.
///
/// The only component with business logic; the repository below it owns no
/// rules, the dispatcher above it owns no rules.
pub struct TaskService<R: TaskRepository> {
    repo: R,
}

impl<R: TaskRepository> TaskService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Validates every description and persists the batch atomically.
    ///
    /// # Contract
    /// - All descriptions are validated before any store access; every
    ///   failure is reported in one combined error.
    /// - Any invalid description aborts the whole create: nothing is
    ///   persisted and no tasks are returned.
    /// - On success, returns the stored tasks in input order with distinct
    ///   store-assigned ids.
    pub fn create(&self, descriptions: &[String]) -> Result<Vec<Task>, TaskServiceError> {
        let mut drafts = Vec::with_capacity(descriptions.len());
        let mut failures = Vec::new();
        for description in descriptions {
            match TaskDraft::new(description.as_str()) {
                Ok(draft) => drafts.push(draft),
                Err(err) => failures.push(err),
            }
        }

        if !failures.is_empty() {
            warn!(
                "event=task_create module=service status=rejected invalid_count={} valid_count={}",
                failures.len(),
                drafts.len()
            );
            return Err(TaskServiceError::Validation(failures));
        }

        let created = self.repo.create(&drafts).map_err(TaskServiceError::Create)?;
        info!(
            "event=task_create module=service status=ok count={}",
            created.len()
        );
        Ok(created)
    }

    /// Soft-deletes the given ids, returning the affected-row count.
    ///
    /// Ids that match no active row contribute 0, not an error.
    pub fn delete(&self, ids: &[TaskId]) -> Result<usize, TaskServiceError> {
        let affected = self.repo.delete(ids).map_err(TaskServiceError::Delete)?;
        info!(
            "event=task_delete module=service status=ok requested={} affected={}",
            ids.len(),
            affected
        );
        Ok(affected)
    }

    /// Lists tasks by explicit ids or by filter.
    ///
    /// A non-empty id set overrides `filter` entirely (`ListFilter::Ids`).
    pub fn list(
        &self,
        ids: &[TaskId],
        filter: ListFilter,
    ) -> Result<Vec<Task>, TaskServiceError> {
        let effective = if ids.is_empty() { filter } else { ListFilter::Ids };
        self.repo
            .get(ids, effective)
            .map_err(TaskServiceError::List)
    }

    /// Completes the given ids, returning the affected-row count.
    ///
    /// Ids already completed, soft-deleted, or missing contribute 0.
    pub fn complete(&self, ids: &[TaskId]) -> Result<usize, TaskServiceError> {
        let affected = self.repo.complete(ids).map_err(TaskServiceError::Complete)?;
        info!(
            "event=task_complete module=service status=ok requested={} affected={}",
            ids.len(),
            affected
        );
        Ok(affected)
    }
}
