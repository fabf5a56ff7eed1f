#[path = "log/check.rs"]
mod check;
#[path = "log/record.rs"]
mod record;

use fdl_feedback::FeedbackLog;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::LogArgs;
use crate::cli::subcommands::LogCommands;
use crate::context::AppContext;

/// Handle `fdl log` and `fdl log check`.
pub fn handle(args: &LogArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let log = FeedbackLog::new(ctx.config.log_path(ctx.root()));
    match &args.action {
        Some(LogCommands::Check) => check::run(&log, flags),
        None => record::run(args, &log, ctx, flags),
    }
}
