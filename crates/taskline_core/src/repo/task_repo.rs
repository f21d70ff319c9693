//! Task repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide stable bulk operations over canonical `tasks` storage.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Only validated `TaskDraft` values reach insert SQL.
//! - Read paths must reject invalid persisted state instead of masking it.
//! - Timestamps are assigned by the store, not by callers.

use crate::db::DbError;
use crate::model::task::{ListFilter, Task, TaskDraft, TaskId, TaskValidationError};
use rusqlite::{params_from_iter, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const TASK_SELECT_SQL: &str = "SELECT
    id,
    description,
    created_at,
    completed_at,
    deleted_at
FROM tasks";

const NOW_EPOCH_MS_SQL: &str = "(strftime('%s', 'now') * 1000)";

pub type RepoResult<T> = Result<T, RepoError>;

/// Generic repository error for task persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(TaskValidationError),
    Db(DbError),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted task data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::InvalidData(_) => None,
        }
    }
}

impl From<TaskValidationError> for RepoError {
    fn from(value: TaskValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for task lifecycle operations.
///
/// Expressed as a trait so the SQLite implementation and in-memory test
/// doubles are interchangeable without touching the service.
pub trait TaskRepository {
    /// Inserts all drafts in one transaction and returns the stored rows,
    /// ids and timestamps assigned, in input order. All rows or none.
    fn create(&self, drafts: &[TaskDraft]) -> RepoResult<Vec<Task>>;

    /// Soft-deletes active rows matching `ids`, returning the changed-row
    /// count. Already-deleted or missing ids contribute 0, not an error.
    fn delete(&self, ids: &[TaskId]) -> RepoResult<usize>;

    /// Selects rows. Non-empty `ids` select exactly those rows regardless
    /// of `filter` and of soft-delete status; empty `ids` select by the
    /// filter predicate. Rows come back in ascending id order.
    fn get(&self, ids: &[TaskId], filter: ListFilter) -> RepoResult<Vec<Task>>;

    /// Completes active, not-yet-completed rows matching `ids`, returning
    /// the changed-row count. Other ids contribute 0, not an error.
    fn complete(&self, ids: &[TaskId]) -> RepoResult<usize>;
}

/// SQLite-backed task repository.
pub struct SqliteTaskRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteTaskRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl TaskRepository for SqliteTaskRepository<'_> {
    fn create(&self, drafts: &[TaskDraft]) -> RepoResult<Vec<Task>> {
        if drafts.is_empty() {
            return Ok(Vec::new());
        }

        // Single transaction: a failing insert rolls back every row.
        let tx = self.conn.unchecked_transaction()?;
        let mut created = Vec::with_capacity(drafts.len());
        {
            let mut insert = tx.prepare("INSERT INTO tasks (description) VALUES (?1);")?;
            let mut select = tx.prepare(&format!("{TASK_SELECT_SQL} WHERE id = ?1;"))?;
            for draft in drafts {
                insert.execute([draft.description()])?;
                let mut rows = select.query([tx.last_insert_rowid()])?;
                let row = rows
                    .next()?
                    .ok_or_else(|| RepoError::InvalidData("inserted task row not found".into()))?;
                created.push(parse_task_row(row)?);
            }
        }
        tx.commit()?;

        Ok(created)
    }

    fn delete(&self, ids: &[TaskId]) -> RepoResult<usize> {
        if ids.is_empty() {
            return Ok(0);
        }

        let sql = format!(
            "UPDATE tasks
             SET deleted_at = {NOW_EPOCH_MS_SQL}
             WHERE deleted_at IS NULL AND id IN ({});",
            id_placeholders(ids.len())
        );
        let changed = self
            .conn
            .execute(&sql, params_from_iter(ids.iter().copied()))?;

        Ok(changed)
    }

    fn get(&self, ids: &[TaskId], filter: ListFilter) -> RepoResult<Vec<Task>> {
        if !ids.is_empty() {
            // Explicit ids win over the filter and ignore soft-delete
            // status, so removed rows stay inspectable by id.
            let sql = format!(
                "{TASK_SELECT_SQL} WHERE id IN ({}) ORDER BY id ASC;",
                id_placeholders(ids.len())
            );
            let mut stmt = self.conn.prepare(&sql)?;
            let rows = stmt.query(params_from_iter(ids.iter().copied()))?;
            return collect_tasks(rows);
        }

        let predicate = match filter {
            // `Ids` with no ids selects nothing.
            ListFilter::Ids => return Ok(Vec::new()),
            ListFilter::All => "deleted_at IS NULL",
            ListFilter::Uncompleted => "completed_at IS NULL AND deleted_at IS NULL",
            ListFilter::Completed => "completed_at IS NOT NULL AND deleted_at IS NULL",
            ListFilter::Removed => "deleted_at IS NOT NULL",
        };

        let sql = format!("{TASK_SELECT_SQL} WHERE {predicate} ORDER BY id ASC;");
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query([])?;
        collect_tasks(rows)
    }

    fn complete(&self, ids: &[TaskId]) -> RepoResult<usize> {
        if ids.is_empty() {
            return Ok(0);
        }

        let sql = format!(
            "UPDATE tasks
             SET completed_at = {NOW_EPOCH_MS_SQL}
             WHERE completed_at IS NULL AND deleted_at IS NULL AND id IN ({});",
            id_placeholders(ids.len())
        );
        let changed = self
            .conn
            .execute(&sql, params_from_iter(ids.iter().copied()))?;

        Ok(changed)
    }
}

fn collect_tasks(mut rows: rusqlite::Rows<'_>) -> RepoResult<Vec<Task>> {
    let mut tasks = Vec::new();
    while let Some(row) = rows.next()? {
        tasks.push(parse_task_row(row)?);
    }
    Ok(tasks)
}

fn parse_task_row(row: &Row<'_>) -> RepoResult<Task> {
    let id: TaskId = row.get("id")?;
    let description: String = row.get("description")?;

    if description.trim().is_empty() {
        return Err(RepoError::InvalidData(format!(
            "blank description in tasks row id={id}"
        )));
    }

    Ok(Task {
        id,
        description,
        created_at: row.get("created_at")?,
        completed_at: row.get("completed_at")?,
        deleted_at: row.get("deleted_at")?,
    })
}

fn id_placeholders(count: usize) -> String {
    let mut placeholders = String::from("?");
    for _ in 1..count {
        placeholders.push_str(", ?");
    }
    placeholders
}
