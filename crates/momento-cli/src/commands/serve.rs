use anyhow::Context;
use momento_server::AppState;

use crate::cli::root_commands::ServeArgs;
use crate::context::AppContext;

/// Handle `momento serve`.
pub async fn handle(args: &ServeArgs, ctx: &AppContext) -> anyhow::Result<()> {
    let addr = args.addr.as_deref().unwrap_or(&ctx.config.server.addr);
    let state = AppState::from_config(ctx.service.clone(), &ctx.config);

    momento_server::serve(addr, state)
        .await
        .with_context(|| format!("server on {addr} stopped"))
}
