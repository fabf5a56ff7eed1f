use anyhow::{Context, bail};
use fdl_feedback::{FeedbackLog, LogCheckReport};
use fdl_schema::SchemaRegistry;

use crate::cli::GlobalFlags;
use crate::output::table::{TableOptions, render_table};
use crate::output::{Report, output};

impl Report for LogCheckReport {
    fn text(&self) -> String {
        if self.is_valid() {
            return format!("{}: {} line(s) valid", self.path, self.lines_checked);
        }
        let rows = self
            .errors
            .iter()
            .map(|e| vec![e.line.to_string(), e.message.clone()])
            .collect::<Vec<_>>();
        format!(
            "{}: {} of {} line(s) invalid\n\n{}",
            self.path,
            self.errors.len(),
            self.lines_checked,
            render_table(&["line", "message"], &rows, TableOptions::detect())
        )
    }
}

pub fn run(log: &FeedbackLog, flags: &GlobalFlags) -> anyhow::Result<()> {
    let report = log
        .check(&SchemaRegistry::new())
        .context("failed to read feedback log")?;
    let valid = report.is_valid();
    let invalid = report.errors.len();

    output(&report, flags)?;
    if !valid {
        bail!("log check: {invalid} invalid line(s)");
    }
    Ok(())
}
