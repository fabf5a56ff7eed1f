use clap::Parser;

pub mod global;
pub mod root_commands;
pub mod subcommands;

pub use global::{GlobalFlags, OutputFormat};
pub use root_commands::Commands;

/// Top-level CLI parser for the `fdl` binary.
#[derive(Debug, Parser)]
#[command(
    name = "fdl",
    version,
    about = "fdl - feedback log, traceability validator and gap visualizer"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: text, json, raw, markdown
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Quiet mode (errors only on stderr)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Project root path (defaults to auto-detect via .fdl)
    #[arg(short, long, global = true)]
    pub project: Option<String>,
}

impl Cli {
    /// Extract ergonomic global flags struct for command handlers.
    #[must_use]
    pub fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
            quiet: self.quiet,
            project: self.project.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::{CommandFactory, Parser};

    use super::{Cli, Commands, GlobalFlags, OutputFormat};
    use crate::cli::subcommands::{LogCommands, ValidateCommands};

    #[test]
    fn clap_command_tree_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_parse_before_subcommand() {
        let cli = Cli::try_parse_from(["fdl", "--format", "json", "--verbose", "tree", "US-001"])
            .expect("cli should parse");

        assert_eq!(cli.format, OutputFormat::Json);
        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::Tree(_)));
    }

    #[test]
    fn global_flags_parse_after_subcommand() {
        let cli = Cli::try_parse_from(["fdl", "analyze", "--format", "markdown", "--quiet"])
            .expect("cli should parse");

        assert_eq!(cli.format, OutputFormat::Markdown);
        assert!(cli.quiet);
        assert!(matches!(cli.command, Commands::Analyze(_)));
    }

    #[test]
    fn output_format_defaults_to_text() {
        let cli = Cli::try_parse_from(["fdl", "analyze"]).expect("cli should parse");
        assert_eq!(cli.format, OutputFormat::Text);
    }

    #[test]
    fn output_format_rejects_invalid_value() {
        let parsed = Cli::try_parse_from(["fdl", "--format", "xml", "analyze"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn global_flags_extraction_copies_values() {
        let cli = Cli::try_parse_from(["fdl", "--project", "/tmp/demo", "analyze"])
            .expect("cli should parse");
        let flags: GlobalFlags = cli.global_flags();
        assert_eq!(flags.project.as_deref(), Some("/tmp/demo"));
    }

    #[test]
    fn log_entry_requires_all_fields() {
        let parsed = Cli::try_parse_from(["fdl", "log", "--type", "mistake", "--context", "x"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn log_entry_parses_with_fields() {
        let cli = Cli::try_parse_from([
            "fdl",
            "log",
            "--type",
            "mistake",
            "--context",
            "fixture before import",
            "--feedback",
            "imports first",
            "--category",
            "Testing",
            "--severity",
            "high",
        ])
        .expect("cli should parse");

        let Commands::Log(args) = cli.command else {
            panic!("expected log command");
        };
        assert!(args.action.is_none());
        assert_eq!(args.kind.as_deref(), Some("mistake"));
        assert_eq!(args.severity, "high");
    }

    #[test]
    fn log_check_needs_no_entry_fields() {
        let cli = Cli::try_parse_from(["fdl", "log", "check"]).expect("cli should parse");
        let Commands::Log(args) = cli.command else {
            panic!("expected log command");
        };
        assert!(matches!(args.action, Some(LogCommands::Check)));
    }

    #[test]
    fn validate_naming_accepts_paths_or_all() {
        let cli = Cli::try_parse_from(["fdl", "validate", "naming", "tests/test_auth.py"])
            .expect("cli should parse");
        let Commands::Validate { action } = cli.command else {
            panic!("expected validate command");
        };
        let ValidateCommands::Naming(args) = action else {
            panic!("expected naming");
        };
        assert_eq!(args.paths.len(), 1);
        assert!(!args.all);

        assert!(Cli::try_parse_from(["fdl", "validate", "naming", "x.py", "--all"]).is_err());
        assert!(Cli::try_parse_from(["fdl", "validate", "naming"]).is_err());
    }

    #[test]
    fn validate_links_targets_are_exclusive() {
        assert!(
            Cli::try_parse_from(["fdl", "validate", "links", "--requirement", "SW-REQ-001"]).is_ok()
        );
        assert!(
            Cli::try_parse_from([
                "fdl",
                "validate",
                "links",
                "--requirement",
                "SW-REQ-001",
                "--all"
            ])
            .is_err()
        );
        assert!(Cli::try_parse_from(["fdl", "validate", "links"]).is_err());
    }

    #[test]
    fn tree_needs_root_or_all() {
        assert!(Cli::try_parse_from(["fdl", "tree", "--all", "--max-depth", "4"]).is_ok());
        assert!(Cli::try_parse_from(["fdl", "tree"]).is_err());
        assert!(Cli::try_parse_from(["fdl", "tree", "US-001", "--all"]).is_err());
    }
}
