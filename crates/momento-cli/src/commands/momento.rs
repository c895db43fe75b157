use crate::cli::GlobalFlags;
use crate::cli::subcommands::MomentoCommands;
use crate::context::AppContext;
use crate::output::output;

/// Handle `momento momento`.
pub async fn handle(
    action: MomentoCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let service = &ctx.service;
    match action {
        MomentoCommands::Start { title, description } => {
            let started = service.start_momento(&title, description.as_deref()).await?;
            output(&started, flags.format)
        }
        MomentoCommands::Finish { identifier } => {
            let finished = service.finish_momento(&identifier.join(" ")).await?;
            output(&finished, flags.format)
        }
        MomentoCommands::Active => output(&service.active_momento_tasks().await?, flags.format),
        MomentoCommands::Log { task, content } => {
            let placement = service.add_log_smart(task, &content.join(" ")).await?;
            output(&placement, flags.format)
        }
    }
}
