use chrono::{NaiveDate, NaiveTime};
use clap::Subcommand;
use momento_core::enums::TaskStatus;

use super::{parse_date_arg, parse_time_arg};

/// Task and task-log commands.
#[derive(Clone, Debug, Subcommand)]
pub enum TaskCommands {
    /// List tasks.
    List,
    /// Get a task by ID.
    Get { id: i64 },
    /// Create a task.
    Create {
        title: String,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        status: Option<TaskStatus>,
        #[arg(long, value_parser = parse_date_arg)]
        date: Option<NaiveDate>,
        #[arg(long, value_parser = parse_time_arg)]
        start: Option<NaiveTime>,
        #[arg(long, value_parser = parse_time_arg)]
        end: Option<NaiveTime>,
    },
    /// Update a task. Omitted fields keep their stored value.
    Update {
        id: i64,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        status: Option<TaskStatus>,
        #[arg(long, value_parser = parse_date_arg)]
        date: Option<NaiveDate>,
        #[arg(long, value_parser = parse_time_arg)]
        start: Option<NaiveTime>,
        #[arg(long, value_parser = parse_time_arg)]
        end: Option<NaiveTime>,
    },
    /// Move a task and its logs to the trash.
    Delete { id: i64 },
    /// List a task's logs, newest first.
    Logs { id: i64 },
    /// Add a log entry to a task.
    Log {
        id: i64,
        #[arg(required = true, num_args = 1..)]
        content: Vec<String>,
    },
    /// Replace a log entry's content.
    EditLog {
        id: i64,
        log_id: i64,
        #[arg(required = true, num_args = 1..)]
        content: Vec<String>,
    },
    /// Delete a log entry.
    DeleteLog { id: i64, log_id: i64 },
    /// Ask the assistant to turn free text into a task draft. Nothing is saved.
    Parse {
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },
}
