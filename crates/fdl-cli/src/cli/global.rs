use clap::ValueEnum;

/// Shared output mode across all commands.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable tables and trees.
    #[default]
    Text,
    /// Pretty-printed JSON.
    Json,
    /// Single-line JSON.
    Raw,
    Markdown,
}

/// Global flags available before or after subcommands.
#[derive(Clone, Debug)]
pub struct GlobalFlags {
    pub format: OutputFormat,
    pub quiet: bool,
    pub project: Option<String>,
}
