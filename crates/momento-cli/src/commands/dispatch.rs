use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;
use crate::context::AppContext;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(command: Commands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match command {
        Commands::Serve(args) => commands::serve::handle(&args, ctx).await,
        Commands::Chat(args) => commands::chat::handle(&args, ctx, flags).await,
        Commands::Task { action } => commands::task::handle(action, ctx, flags).await,
        Commands::Note { action } => commands::note::handle(action, ctx, flags).await,
        Commands::Momento { action } => commands::momento::handle(action, ctx, flags).await,
        Commands::Trash => commands::activity::trash(ctx, flags).await,
        Commands::Activity(args) => commands::activity::handle(&args, ctx, flags).await,
    }
}
