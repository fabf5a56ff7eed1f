use std::fmt::Write as _;
use std::path::Path;

use anyhow::Context;
use chrono::Utc;
use fdl_config::resolve;
use fdl_feedback::{AnalyzeOptions, FeedbackLog, PatternReport, analyze, render_markdown, write_report};
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::AnalyzeArgs;
use crate::commands::shared::parse::{Bound, parse_bound, parse_closed};
use crate::context::AppContext;
use crate::output::{Report, output};

#[derive(Debug, Serialize)]
struct AnalyzeResponse {
    #[serde(flatten)]
    report: PatternReport,
    #[serde(skip_serializing_if = "Option::is_none")]
    report_path: Option<String>,
    /// 1-based log lines that could not be read.
    skipped_lines: Vec<usize>,
}

impl Report for AnalyzeResponse {
    fn text(&self) -> String {
        let report = &self.report;
        let mut out = format!(
            "{} entries, {} pattern(s) at >= {} occurrences ({})\n",
            report.total_entries,
            report.patterns.len(),
            report.threshold,
            report.period
        );
        for pattern in &report.patterns {
            let _ = writeln!(
                out,
                "  {:>3}x [{}] {} ({}): {}",
                pattern.count,
                pattern.category,
                pattern.summary,
                pattern.max_severity,
                pattern.suggested_action
            );
        }
        if !self.skipped_lines.is_empty() {
            let _ = writeln!(out, "Skipped {} unreadable line(s)", self.skipped_lines.len());
        }
        if let Some(path) = &self.report_path {
            let _ = writeln!(out, "Report written to {path}");
        }
        out
    }

    fn markdown(&self) -> String {
        render_markdown(&self.report)
    }
}

/// Handle `fdl analyze`.
pub fn handle(args: &AnalyzeArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let now = Utc::now();
    let mut opts = AnalyzeOptions {
        threshold: args.min_frequency.unwrap_or(ctx.config.feedback.threshold),
        category: args.category.as_deref().map(parse_closed).transpose()?,
        since: args
            .since
            .as_deref()
            .map(|raw| parse_bound(raw, "since", Bound::Start))
            .transpose()?,
        until: args
            .until
            .as_deref()
            .map(|raw| parse_bound(raw, "until", Bound::End))
            .transpose()?,
    };
    if opts.threshold == 0 {
        anyhow::bail!("invalid --min-frequency 0: must be at least 1");
    }
    if args.weekly {
        opts = opts.last_week(now);
    }

    let log = FeedbackLog::new(ctx.config.log_path(ctx.root()));
    let loaded = log.load().context("failed to load feedback log")?;
    let report = analyze(&loaded.entries, &opts, now);

    let report_path = if args.no_report {
        None
    } else {
        let path = args.output.as_deref().map_or_else(
            || ctx.config.report_path(ctx.root()),
            |raw| resolve(ctx.root(), Path::new(raw)),
        );
        write_report(&path, &report).context("failed to write suggestions report")?;
        Some(path.display().to_string())
    };

    output(
        &AnalyzeResponse {
            report,
            report_path,
            skipped_lines: loaded.skipped_lines,
        },
        flags,
    )
}
