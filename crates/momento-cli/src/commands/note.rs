use std::path::Path;

use anyhow::Context;
use momento_core::entities::NewNote;
use momento_db::updates::note::NoteUpdate;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::NoteCommands;
use crate::context::AppContext;
use crate::output::output;

/// Handle `momento note`.
pub async fn handle(action: NoteCommands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let service = &ctx.service;
    match action {
        NoteCommands::List => output(&service.list_notes().await?, flags.format),
        NoteCommands::Get { id } => output(&service.get_note(id).await?, flags.format),
        NoteCommands::Create { title, content } => {
            let note = service.create_note(NewNote { title, content }).await?;
            output(&note, flags.format)
        }
        NoteCommands::Update { id, title, content } => {
            let update = NoteUpdate { title, content };
            output(&service.update_note(id, &update).await?, flags.format)
        }
        NoteCommands::Delete { id } => output(&service.delete_note(id).await?, flags.format),
        NoteCommands::Transcribe {
            path,
            mime_type,
            save,
        } => {
            let audio = tokio::fs::read(&path)
                .await
                .with_context(|| format!("failed to read {}", path.display()))?;
            let mime_type = mime_type.or_else(|| audio_mime_type(&path).map(str::to_string));
            let draft = ctx
                .assistant()?
                .transcribe_note(&audio, mime_type.as_deref())
                .await?;
            if !save {
                return output(&draft, flags.format);
            }
            let note = service
                .create_note(NewNote {
                    title: draft.title,
                    content: draft.content,
                })
                .await?;
            output(&note, flags.format)
        }
    }
}

/// MIME type for common recording formats, by extension.
fn audio_mime_type(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    Some(match ext.as_str() {
        "webm" => "audio/webm",
        "ogg" | "opus" => "audio/ogg",
        "mp3" => "audio/mpeg",
        "wav" => "audio/wav",
        "m4a" | "mp4" => "audio/mp4",
        "flac" => "audio/flac",
        "aac" => "audio/aac",
        _ => return None,
    })
}
