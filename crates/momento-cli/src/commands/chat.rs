use momento_assistant::Content;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::ChatArgs;
use crate::context::AppContext;
use crate::output::output;

/// Handle `momento chat`: one user turn through the tool-calling loop.
pub async fn handle(args: &ChatArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let assistant = ctx.assistant()?;
    let history = vec![Content::user_text(args.message.join(" "))];
    let reply = assistant.respond(&ctx.service, history).await?;
    output(&reply, flags.format)
}
