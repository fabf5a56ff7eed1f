use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use fdl_core::enums::TestLevel;
use fdl_trace::index::test_files;
use fdl_trace::{Layout, NamingReport, validate_naming, walk};

use super::remediation_lines;
use crate::cli::GlobalFlags;
use crate::cli::subcommands::NamingArgs;
use crate::commands::shared::parse::parse_closed;
use crate::context::AppContext;
use crate::output::table::{TableOptions, render_table};
use crate::output::{Report, output};

impl Report for NamingReport {
    fn text(&self) -> String {
        if self.results.is_empty() {
            return "No files to check".to_string();
        }

        let rows = self
            .results
            .iter()
            .map(|r| {
                vec![
                    r.file.clone(),
                    r.status.to_string(),
                    r.kind.map_or_else(|| "-".to_string(), |k| k.to_string()),
                    r.id.clone().unwrap_or_else(|| "-".to_string()),
                    r.violations
                        .iter()
                        .map(|v| v.reason.as_str())
                        .collect::<Vec<_>>()
                        .join("; "),
                ]
            })
            .collect::<Vec<_>>();

        let mut out = render_table(
            &["file", "status", "kind", "id", "reason"],
            &rows,
            TableOptions::detect(),
        );
        out.push('\n');

        let failures = self
            .results
            .iter()
            .flat_map(|r| r.violations.iter().map(move |v| (r.file.as_str(), v)))
            .collect::<Vec<_>>();
        if !failures.is_empty() {
            out.push_str("\nViolations:\n");
            out.push_str(&remediation_lines(failures));
        }

        let _ = write!(
            out,
            "\n{} checked, {} passed, {} failed",
            self.total, self.passed, self.failed
        );
        out
    }
}

pub fn run(args: &NamingArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let level: Option<TestLevel> = args.level.as_deref().map(parse_closed).transpose()?;
    let config = ctx.config_with_dirs(args.tests_dir.as_deref(), args.requirements_dir.as_deref());
    let index = ctx.scan(args.tests_dir.as_deref(), args.requirements_dir.as_deref())?;

    let paths = if args.all {
        discover(index.layout(), &config)?
    } else {
        let cwd = std::env::current_dir().context("failed to read current directory")?;
        args.paths
            .iter()
            .map(|raw| locate(raw, &cwd, ctx.root()))
            .collect()
    };

    let report = validate_naming(&paths, &index, level);
    let failed = report.failed;
    let total = report.total;

    output(&report, flags)?;
    if failed > 0 {
        bail!("validate naming: {failed} of {total} file(s) failed");
    }
    Ok(())
}

/// Every test file plus every Markdown file under the requirements directory.
fn discover(layout: &Layout, config: &fdl_config::FdlConfig) -> anyhow::Result<Vec<PathBuf>> {
    let mut paths = test_files(&layout.tests_dir, layout, config)
        .context("failed to list test files")?;
    let exclude = config.trace.exclude_set()?;
    paths.extend(
        walk::files_under(&layout.requirements_dir, &layout.root, &exclude, |p| {
            walk::has_extension(p, "md")
        }),
    );
    Ok(paths)
}

/// Relative paths resolve against the working directory when the file is
/// there, otherwise against the project root.
fn locate(raw: &str, cwd: &Path, root: &Path) -> PathBuf {
    let path = Path::new(raw);
    if path.is_absolute() {
        return path.to_path_buf();
    }
    let from_cwd = cwd.join(path);
    if from_cwd.exists() {
        from_cwd
    } else {
        root.join(path)
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use tempfile::TempDir;

    use super::locate;

    #[test]
    fn locate_prefers_existing_file_under_cwd() {
        let cwd = TempDir::new().expect("tempdir should create");
        let root = TempDir::new().expect("tempdir should create");
        std::fs::write(cwd.path().join("a.py"), "").expect("file should write");

        assert_eq!(locate("a.py", cwd.path(), root.path()), cwd.path().join("a.py"));
        assert_eq!(locate("b.py", cwd.path(), root.path()), root.path().join("b.py"));
        assert_eq!(locate("/x/c.py", cwd.path(), root.path()), Path::new("/x/c.py"));
    }
}
