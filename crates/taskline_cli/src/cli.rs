//! Command dispatch for the taskline binary.
//!
//! # Responsibility
//! - Parse process arguments into (command, operands).
//! - Translate id tokens and list operands before the service is invoked.
//! - Route results to the renderer and errors to the caller.
//!
//! # Invariants
//! - A non-integer id token fails with a parse error naming the token and
//!   never reaches the service.
//! - `list` without operands defaults to the uncompleted view.

use crate::render::print_tasks;
use clap::{Parser, Subcommand};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io::Write;
use std::num::ParseIntError;
use std::path::PathBuf;
use taskline_core::{ListFilter, TaskId, TaskRepository, TaskService, TaskServiceError};

#[derive(Parser, Debug)]
#[command(name = "taskline", version, about = "Local task manager backed by SQLite")]
pub struct Cli {
    /// Path to the task database file (default: taskline.db, or $TASKLINE_DB).
    #[arg(long, value_name = "PATH")]
    pub db: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Create one task per description.
    New {
        #[arg(required = true, value_name = "DESCRIPTION")]
        descriptions: Vec<String>,
    },
    /// Soft-delete tasks by id.
    Remove {
        #[arg(required = true, value_name = "ID")]
        ids: Vec<String>,
    },
    /// List tasks: no operand for the open view, a filter keyword
    /// (all|completed|uncompleted|removed), or explicit ids.
    List {
        #[arg(value_name = "FILTER|ID")]
        args: Vec<String>,
    },
    /// Mark tasks as completed by id.
    Complete {
        #[arg(required = true, value_name = "ID")]
        ids: Vec<String>,
    },
}

/// Dispatcher-level error: bad operands or a propagated service failure.
#[derive(Debug)]
pub enum CliError {
    ParseId { token: String, source: ParseIntError },
    InvalidArguments(String),
    Service(TaskServiceError),
    Io(std::io::Error),
}

impl Display for CliError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ParseId { token, source } => {
                write!(f, "failed to parse ID `{token}`: {source}")
            }
            Self::InvalidArguments(argument) => write!(f, "invalid arguments: {argument}"),
            Self::Service(err) => write!(f, "{err}"),
            Self::Io(err) => write!(f, "failed to write output: {err}"),
        }
    }
}

impl Error for CliError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::ParseId { source, .. } => Some(source),
            Self::InvalidArguments(_) => None,
            Self::Service(err) => Some(err),
            Self::Io(err) => Some(err),
        }
    }
}

impl From<TaskServiceError> for CliError {
    fn from(value: TaskServiceError) -> Self {
        Self::Service(value)
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

/// Executes one parsed command against the service, writing normal output
/// to `out`. Errors are returned to the caller, which owns the error
/// stream and the exit code.
pub fn run<R: TaskRepository>(
    service: &TaskService<R>,
    command: Command,
    out: &mut impl Write,
) -> Result<(), CliError> {
    match command {
        Command::New { descriptions } => {
            let created = service.create(&descriptions)?;
            print_tasks(out, &created)?;
        }
        Command::Remove { ids } => {
            let ids = parse_ids(&ids)?;
            let affected = service.delete(&ids)?;
            writeln!(out, "{affected} of {} tasks successfully deleted", ids.len())?;
        }
        Command::List { args } => {
            let (ids, filter) = interpret_list_args(&args)?;
            let tasks = service.list(&ids, filter)?;
            print_tasks(out, &tasks)?;
        }
        Command::Complete { ids } => {
            let ids = parse_ids(&ids)?;
            let affected = service.complete(&ids)?;
            writeln!(
                out,
                "{affected} of {} tasks successfully completed",
                ids.len()
            )?;
        }
    }

    Ok(())
}

/// Parses id tokens, failing on the first token that is not an integer.
fn parse_ids(tokens: &[String]) -> Result<Vec<TaskId>, CliError> {
    tokens
        .iter()
        .map(|token| {
            token.parse::<TaskId>().map_err(|source| CliError::ParseId {
                token: token.clone(),
                source,
            })
        })
        .collect()
}

/// Interprets `list` operands: nothing selects the default view, integer
/// tokens select explicit ids, a single keyword selects a filter.
fn interpret_list_args(args: &[String]) -> Result<(Vec<TaskId>, ListFilter), CliError> {
    if args.is_empty() {
        return Ok((Vec::new(), ListFilter::default()));
    }

    if let Ok(ids) = parse_ids(args) {
        return Ok((ids, ListFilter::Ids));
    }

    if args.len() == 1 {
        let filter = match args[0].as_str() {
            "all" => ListFilter::All,
            "completed" => ListFilter::Completed,
            "uncompleted" => ListFilter::Uncompleted,
            "removed" => ListFilter::Removed,
            other => return Err(CliError::InvalidArguments(other.to_string())),
        };
        return Ok((Vec::new(), filter));
    }

    Err(CliError::InvalidArguments(args.join(" ")))
}


#[cfg(test)]
mod dispatch_tests {
    use super::{run, CliError, Command};
    use taskline_core::db::open_db_in_memory;
    use taskline_core::{SqliteTaskRepository, TaskService, TaskServiceError};

    fn strings(tokens: &[&str]) -> Vec<String> {
        tokens.iter().map(|token| token.to_string()).collect()
    }

    fn dispatch(
        service: &TaskService<SqliteTaskRepository<'_>>,
        command: Command,
    ) -> Result<String, CliError> {
        let mut out = Vec::new();
        run(service, command, &mut out)?;
        Ok(String::from_utf8(out).expect("output should be UTF-8"))
    }

    #[test]
    fn new_command_prints_the_created_tasks() {
        let conn = open_db_in_memory().unwrap();
        let service = TaskService::new(SqliteTaskRepository::new(&conn));

        let output = dispatch(
            &service,
            Command::New {
                descriptions: strings(&["Buy milk"]),
            },
        )
        .unwrap();

        assert!(output.contains("Buy milk"));
        assert!(output.contains('·'), "new tasks render as open");
    }

    #[test]
    fn remove_and_complete_report_affected_counts() {
        let conn = open_db_in_memory().unwrap();
        let service = TaskService::new(SqliteTaskRepository::new(&conn));
        dispatch(
            &service,
            Command::New {
                descriptions: strings(&["one", "two"]),
            },
        )
        .unwrap();

        let completed = dispatch(
            &service,
            Command::Complete {
                ids: strings(&["1", "2"]),
            },
        )
        .unwrap();
        assert_eq!(completed, "2 of 2 tasks successfully completed\n");

        let removed = dispatch(
            &service,
            Command::Remove {
                ids: strings(&["1", "999"]),
            },
        )
        .unwrap();
        assert_eq!(removed, "1 of 2 tasks successfully deleted\n");
    }

    #[test]
    fn list_default_view_shows_open_tasks_only() {
        let conn = open_db_in_memory().unwrap();
        let service = TaskService::new(SqliteTaskRepository::new(&conn));
        dispatch(
            &service,
            Command::New {
                descriptions: strings(&["open task", "done task"]),
            },
        )
        .unwrap();
        dispatch(
            &service,
            Command::Complete {
                ids: strings(&["2"]),
            },
        )
        .unwrap();

        let output = dispatch(&service, Command::List { args: Vec::new() }).unwrap();
        assert!(output.contains("open task"));
        assert!(!output.contains("done task"));
    }

    #[test]
    fn list_of_nothing_prints_placeholder() {
        let conn = open_db_in_memory().unwrap();
        let service = TaskService::new(SqliteTaskRepository::new(&conn));

        let output = dispatch(&service, Command::List { args: Vec::new() }).unwrap();
        assert_eq!(output, "No tasks found\n");
    }

    #[test]
    fn blank_description_surfaces_a_validation_error() {
        let conn = open_db_in_memory().unwrap();
        let service = TaskService::new(SqliteTaskRepository::new(&conn));

        let err = dispatch(
            &service,
            Command::New {
                descriptions: strings(&["", "Valid task"]),
            },
        )
        .unwrap_err();

        assert!(matches!(
            err,
            CliError::Service(TaskServiceError::Validation(_))
        ));
        assert!(err.to_string().contains("description cannot be empty"));
    }

    #[test]
    fn bad_id_token_fails_before_the_service_runs() {
        let conn = open_db_in_memory().unwrap();
        let service = TaskService::new(SqliteTaskRepository::new(&conn));

        let err = dispatch(
            &service,
            Command::Remove {
                ids: strings(&["notanumber"]),
            },
        )
        .unwrap_err();

        assert!(err.to_string().contains("failed to parse ID `notanumber`"));
    }
}
