use clap::{ArgGroup, Args, Subcommand};

use crate::cli::subcommands::{LogCommands, ValidateCommands};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Append a correction to the feedback log.
    Log(LogArgs),
    /// Detect recurring feedback patterns and write the suggestions report.
    Analyze(AnalyzeArgs),
    /// Naming and traceability link validation.
    Validate {
        #[command(subcommand)]
        action: ValidateCommands,
    },
    /// Show the traceability tree below a requirement, with gaps.
    Tree(TreeArgs),
    /// Print a registered JSON Schema, or list the registered names.
    Schema(SchemaArgs),
}

#[derive(Clone, Debug, Args)]
#[command(args_conflicts_with_subcommands = true, subcommand_negates_reqs = true)]
pub struct LogArgs {
    #[command(subcommand)]
    pub action: Option<LogCommands>,

    /// Feedback type: mistake, repetition, clarification
    #[arg(long = "type", value_name = "TYPE", required = true)]
    pub kind: Option<String>,

    /// What went wrong
    #[arg(long, required = true)]
    pub context: Option<String>,

    /// The correction applied
    #[arg(long, required = true)]
    pub feedback: Option<String>,

    /// Testing, Architecture, Security, Performance, API, Naming, Documentation
    #[arg(long, required = true)]
    pub category: Option<String>,

    /// low, medium, high
    #[arg(long, default_value = "medium")]
    pub severity: String,
}

#[derive(Clone, Debug, Args)]
pub struct AnalyzeArgs {
    /// Only analyze this category
    #[arg(long)]
    pub category: Option<String>,

    /// Inclusive start of the date window (YYYY-MM-DD or RFC 3339)
    #[arg(long, conflicts_with = "weekly")]
    pub since: Option<String>,

    /// Inclusive end of the date window (YYYY-MM-DD or RFC 3339)
    #[arg(long, conflicts_with = "weekly")]
    pub until: Option<String>,

    /// Analyze the last 7 days
    #[arg(long)]
    pub weekly: bool,

    /// Minimum occurrences for a pattern (overrides feedback.threshold)
    #[arg(long, value_name = "N")]
    pub min_frequency: Option<usize>,

    /// Report path (overrides feedback.report_path)
    #[arg(long)]
    pub output: Option<String>,

    /// Do not write the Markdown report
    #[arg(long)]
    pub no_report: bool,
}

#[derive(Clone, Debug, Args)]
#[command(group(ArgGroup::new("target").required(true).args(["root", "all"])))]
pub struct TreeArgs {
    /// Root requirement ID (e.g. US-001)
    pub root: Option<String>,

    /// One tree per user story
    #[arg(long)]
    pub all: bool,

    /// Maximum requirement depth (overrides gap.max_depth)
    #[arg(long, value_name = "N")]
    pub max_depth: Option<usize>,
}

#[derive(Clone, Debug, Args)]
pub struct SchemaArgs {
    /// Schema name; omit to list registered names
    pub name: Option<String>,
}
