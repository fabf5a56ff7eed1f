use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;
use crate::context::AppContext;

/// Dispatch a parsed command to the corresponding handler module.
pub fn dispatch(command: Commands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match command {
        Commands::Log(args) => commands::log::handle(&args, ctx, flags),
        Commands::Analyze(args) => commands::analyze::handle(&args, ctx, flags),
        Commands::Validate { action } => commands::validate::handle(&action, ctx, flags),
        Commands::Tree(args) => commands::tree::handle(&args, ctx, flags),
        Commands::Schema(args) => commands::schema::handle(&args, flags),
    }
}
