use momento_db::repos::activity::ActivityFilter;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::ActivityArgs;
use crate::context::AppContext;
use crate::output::output;

/// Handle `momento activity`.
pub async fn handle(args: &ActivityArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let filter = ActivityFilter {
        start_date: args.from,
        end_date: args.to,
        limit: args.limit,
    };
    let entries = ctx.service.list_activity(&filter).await?;
    output(&entries, flags.format)
}

/// Handle `momento trash`.
pub async fn trash(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let entries = ctx.service.list_trash().await?;
    output(&entries, flags.format)
}
