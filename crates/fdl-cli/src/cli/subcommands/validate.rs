use clap::{ArgGroup, Args, Subcommand};

#[derive(Clone, Debug, Subcommand)]
pub enum ValidateCommands {
    /// Check test and requirement filenames against the naming grammar.
    Naming(NamingArgs),
    /// Check `tested_by` / `Validates:` links in both directions.
    Links(LinksArgs),
}

#[derive(Clone, Debug, Args)]
#[command(group(ArgGroup::new("target").required(true).args(["paths", "all"])))]
pub struct NamingArgs {
    /// Files to check
    pub paths: Vec<String>,

    /// Check every file under the tests and requirements directories
    #[arg(long)]
    pub all: bool,

    /// Only report tests of this level: UT, IT, ST, AT
    #[arg(long)]
    pub level: Option<String>,

    /// Tests directory (overrides paths.tests_dir)
    #[arg(long)]
    pub tests_dir: Option<String>,

    /// Requirements directory (overrides paths.requirements_dir)
    #[arg(long)]
    pub requirements_dir: Option<String>,
}

#[derive(Clone, Debug, Args)]
#[command(group(ArgGroup::new("target").required(true).args(["requirement", "test", "all"])))]
pub struct LinksArgs {
    /// Requirement ID whose `tested_by` links to check
    #[arg(long)]
    pub requirement: Option<String>,

    /// Test file whose `Validates:` marker to check
    #[arg(long)]
    pub test: Option<String>,

    /// Every requirement, then every test file
    #[arg(long)]
    pub all: bool,

    /// Tests directory (overrides paths.tests_dir)
    #[arg(long)]
    pub tests_dir: Option<String>,

    /// Requirements directory (overrides paths.requirements_dir)
    #[arg(long)]
    pub requirements_dir: Option<String>,
}
