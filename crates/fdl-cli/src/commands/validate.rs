#[path = "validate/links.rs"]
mod links;
#[path = "validate/naming.rs"]
mod naming;

use std::fmt::Write as _;

use fdl_core::violation::Violation;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::ValidateCommands;
use crate::context::AppContext;

/// Handle `fdl validate`. Any FAIL exits non-zero after the report is printed.
pub fn handle(
    action: &ValidateCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        ValidateCommands::Naming(args) => naming::run(args, ctx, flags),
        ValidateCommands::Links(args) => links::run(args, ctx, flags),
    }
}

/// `subject: reason -> remediation` lines for the text renderings.
fn remediation_lines<'a>(
    failures: impl IntoIterator<Item = (&'a str, &'a Violation)>,
) -> String {
    let mut out = String::new();
    for (subject, violation) in failures {
        let _ = writeln!(
            out,
            "  {subject}: {} (expected {}, found {})\n    fix: {}",
            violation.reason, violation.expected, violation.found, violation.remediation
        );
    }
    out
}
