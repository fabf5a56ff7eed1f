use anyhow::Context;
use chrono::Utc;
use fdl_core::feedback::{FeedbackEntry, NewFeedback};
use fdl_feedback::FeedbackLog;
use fdl_trace::layout::slash_path;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::LogArgs;
use crate::commands::shared::parse::parse_closed;
use crate::context::AppContext;
use crate::output::{Report, output};

#[derive(Debug, Serialize)]
struct LogResponse {
    log_path: String,
    entry: FeedbackEntry,
}

impl Report for LogResponse {
    fn text(&self) -> String {
        format!(
            "Logged {} ({}, {}) to {}",
            self.entry.kind, self.entry.category, self.entry.severity, self.log_path
        )
    }
}

pub fn run(
    args: &LogArgs,
    log: &FeedbackLog,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let input = NewFeedback {
        kind: parse_closed(required(args.kind.as_deref(), "--type")?)?,
        context: required(args.context.as_deref(), "--context")?.to_string(),
        feedback: required(args.feedback.as_deref(), "--feedback")?.to_string(),
        category: parse_closed(required(args.category.as_deref(), "--category")?)?,
        severity: parse_closed(&args.severity)?,
    };

    let entry = log
        .record(input, Utc::now())
        .context("feedback entry was not logged")?;

    let log_path = log
        .path()
        .strip_prefix(ctx.root())
        .map_or_else(|_| log.path().display().to_string(), slash_path);
    output(&LogResponse { log_path, entry }, flags)
}

fn required<'a>(value: Option<&'a str>, flag: &str) -> anyhow::Result<&'a str> {
    value.with_context(|| format!("{flag} is required"))
}
