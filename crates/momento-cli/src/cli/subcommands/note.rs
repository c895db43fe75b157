use std::path::PathBuf;

use clap::Subcommand;

/// Note commands.
#[derive(Clone, Debug, Subcommand)]
pub enum NoteCommands {
    /// List notes, most recently updated first.
    List,
    /// Get a note by ID.
    Get { id: i64 },
    /// Create a note.
    Create {
        title: String,
        #[arg(long)]
        content: String,
    },
    /// Update a note. Omitted fields keep their stored value.
    Update {
        id: i64,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        content: Option<String>,
    },
    /// Delete a note.
    Delete { id: i64 },
    /// Transcribe a recording into a note draft. Saved only with `--save`.
    Transcribe {
        path: PathBuf,
        /// Audio MIME type; guessed from the file extension when omitted.
        #[arg(long)]
        mime_type: Option<String>,
        #[arg(long)]
        save: bool,
    },
}
