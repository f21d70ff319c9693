//! taskline binary entry point.
//!
//! # Responsibility
//! - Resolve configuration (database path, logging) and wire the stack.
//! - Act as the terminal error sink: errors go to stderr, exit code 1.

mod cli;
mod render;

use clap::Parser;
use cli::Cli;
use std::path::PathBuf;
use std::process::ExitCode;
use taskline_core::db::open_db;
use taskline_core::{default_log_level, init_logging, SqliteTaskRepository, TaskService};

const DEFAULT_DB_FILE: &str = "taskline.db";
const DB_PATH_ENV: &str = "TASKLINE_DB";

fn main() -> ExitCode {
    let args = Cli::parse();

    // Logging must never block task management; degrade to a warning.
    if let Err(warning) = bootstrap_logging() {
        eprintln!("warning: file logging disabled: {warning}");
    }

    let db_path = resolve_db_path(args.db);
    let conn = match open_db(&db_path) {
        Ok(conn) => conn,
        Err(err) => {
            eprintln!("failed to open task database `{}`: {err}", db_path.display());
            return ExitCode::FAILURE;
        }
    };

    let service = TaskService::new(SqliteTaskRepository::new(&conn));

    let stdout = std::io::stdout();
    if let Err(err) = cli::run(&service, args.command, &mut stdout.lock()) {
        eprintln!("{err}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

fn resolve_db_path(flag: Option<PathBuf>) -> PathBuf {
    flag.or_else(|| std::env::var_os(DB_PATH_ENV).map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DB_FILE))
}

fn bootstrap_logging() -> Result<(), String> {
    let cwd = std::env::current_dir()
        .map_err(|err| format!("cannot resolve working directory: {err}"))?;
    let log_dir = cwd.join(".taskline").join("logs");
    let log_dir = log_dir
        .to_str()
        .ok_or_else(|| "log directory path is not valid UTF-8".to_string())?;
    init_logging(default_log_level(), log_dir)
}
