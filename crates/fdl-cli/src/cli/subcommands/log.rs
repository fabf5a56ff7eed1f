use clap::Subcommand;

/// Feedback log maintenance.
#[derive(Clone, Debug, Subcommand)]
pub enum LogCommands {
    /// Validate every log line against the `feedback_entry` schema.
    Check,
}
