use clap::{Args, Subcommand};

use crate::cli::subcommands::{
    MomentoCommands, NoteCommands, TaskCommands, parse_date_arg,
};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Run the HTTP server.
    Serve(ServeArgs),
    /// Ask the assistant to do something.
    Chat(ChatArgs),
    /// Tasks and their logs.
    Task {
        #[command(subcommand)]
        action: TaskCommands,
    },
    /// Notes.
    Note {
        #[command(subcommand)]
        action: NoteCommands,
    },
    /// Timed momento tasks.
    Momento {
        #[command(subcommand)]
        action: MomentoCommands,
    },
    /// List deleted tasks with their logs.
    Trash,
    /// Show the activity feed.
    Activity(ActivityArgs),
}

#[derive(Clone, Debug, Args)]
pub struct ServeArgs {
    /// Listen address, overriding `server.addr`
    #[arg(long)]
    pub addr: Option<String>,
}

#[derive(Clone, Debug, Args)]
pub struct ChatArgs {
    /// The message to send
    #[arg(required = true, num_args = 1..)]
    pub message: Vec<String>,
}

#[derive(Clone, Debug, Args)]
pub struct ActivityArgs {
    /// First day to include
    #[arg(long, value_parser = parse_date_arg)]
    pub from: Option<chrono::NaiveDate>,
    /// Last day to include
    #[arg(long, value_parser = parse_date_arg)]
    pub to: Option<chrono::NaiveDate>,
    /// Max entries (defaults to `general.default_limit`)
    #[arg(long)]
    pub limit: Option<u32>,
}
