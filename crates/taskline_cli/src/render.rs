//! Plain-text rendering of task lists.
//!
//! # Responsibility
//! - Turn a task list into aligned, one-line-per-task text.
//! - Keep rendering a pure function of its input; no service access here.

use chrono::{Local, TimeZone};
use std::io::{self, Write};
use taskline_core::Task;

const OPEN_MARKER: &str = "·";
const COMPLETED_MARKER: &str = "✓";

/// Writes one line per task with ID, status marker, creation time, and
/// description. An empty list renders as `No tasks found`.
pub fn print_tasks(out: &mut impl Write, tasks: &[Task]) -> io::Result<()> {
    if tasks.is_empty() {
        writeln!(out, "No tasks found")?;
        return Ok(());
    }

    let id_width = tasks
        .iter()
        .map(|task| task.id.to_string().len())
        .max()
        .unwrap_or(0)
        .max("ID".len());

    writeln!(
        out,
        "{:<id_width$}  {:<6}  {:<16}  {}",
        "ID", "Status", "Created At", "Description"
    )?;
    writeln!(out, "{}", "-".repeat(id_width + 40))?;

    for task in tasks {
        let marker = if task.is_completed() {
            COMPLETED_MARKER
        } else {
            OPEN_MARKER
        };
        writeln!(
            out,
            "{:<id_width$}  {:<6}  {:<16}  {}",
            task.id,
            marker,
            format_created_at(task.created_at),
            task.description
        )?;
    }

    Ok(())
}

/// Formats an epoch-millisecond timestamp as local `dd/mm/yyyy HH:MM`.
fn format_created_at(epoch_ms: i64) -> String {
    match Local.timestamp_millis_opt(epoch_ms).single() {
        Some(datetime) => datetime.format("%d/%m/%Y %H:%M").to_string(),
        None => "unknown".to_string(),
    }
}
