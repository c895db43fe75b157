use momento_core::entities::NewTask;
use momento_db::updates::task::TaskUpdate;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::TaskCommands;
use crate::context::AppContext;
use crate::output::output;

/// Handle `momento task`.
pub async fn handle(action: TaskCommands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let service = &ctx.service;
    match action {
        TaskCommands::List => output(&service.list_tasks().await?, flags.format),
        TaskCommands::Get { id } => output(&service.get_task(id).await?, flags.format),
        TaskCommands::Create {
            title,
            description,
            status,
            date,
            start,
            end,
        } => {
            let new = NewTask {
                title,
                description,
                status,
                task_date: date,
                start_time: start,
                end_time: end,
                ..NewTask::default()
            };
            output(&service.create_task(new).await?, flags.format)
        }
        TaskCommands::Update {
            id,
            title,
            description,
            status,
            date,
            start,
            end,
        } => {
            let update = TaskUpdate {
                title,
                description,
                status,
                task_date: date,
                start_time: start,
                end_time: end,
                ..TaskUpdate::default()
            };
            output(&service.update_task(id, &update).await?, flags.format)
        }
        TaskCommands::Delete { id } => output(&service.delete_task(id).await?, flags.format),
        TaskCommands::Logs { id } => output(&service.list_task_logs(id).await?, flags.format),
        TaskCommands::Log { id, content } => {
            let log = service.create_task_log(id, &content.join(" ")).await?;
            output(&log, flags.format)
        }
        TaskCommands::EditLog {
            id,
            log_id,
            content,
        } => {
            let log = service
                .update_task_log(id, log_id, &content.join(" "))
                .await?;
            output(&log, flags.format)
        }
        TaskCommands::DeleteLog { id, log_id } => {
            output(&service.delete_task_log(id, log_id).await?, flags.format)
        }
        TaskCommands::Parse { text } => {
            let draft = ctx.assistant()?.parse_task(&text.join(" ")).await?;
            output(&draft, flags.format)
        }
    }
}
