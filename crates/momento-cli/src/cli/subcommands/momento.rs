use clap::Subcommand;

/// Momento (timed task) commands.
#[derive(Clone, Debug, Subcommand)]
pub enum MomentoCommands {
    /// Start a timed task.
    Start {
        title: String,
        #[arg(long)]
        description: Option<String>,
    },
    /// Finish a running task by ID or by part of its title.
    Finish {
        #[arg(required = true, num_args = 1..)]
        identifier: Vec<String>,
    },
    /// List running tasks with their elapsed time.
    Active,
    /// Log to `--task`, or to the running task when omitted.
    Log {
        #[arg(long)]
        task: Option<i64>,
        #[arg(required = true, num_args = 1..)]
        content: Vec<String>,
    },
}
