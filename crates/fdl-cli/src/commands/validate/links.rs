use std::fmt::Write as _;

use anyhow::bail;
use fdl_trace::links::{validate_all, validate_requirement, validate_test};
use fdl_trace::{LinkReport, RequirementLinkResult, TestLinkResult};
use serde::Serialize;

use super::remediation_lines;
use crate::cli::GlobalFlags;
use crate::cli::subcommands::LinksArgs;
use crate::context::AppContext;
use crate::output::table::{TableOptions, render_table};
use crate::output::{Report, output};

/// Single-target runs print the bare result; `--all` prints both lists.
#[derive(Debug, Serialize)]
#[serde(untagged)]
enum LinksResponse {
    Requirement(RequirementLinkResult),
    Test(TestLinkResult),
    All(LinkReport),
}

impl LinksResponse {
    fn failed(&self) -> usize {
        match self {
            Self::Requirement(r) => usize::from(!r.status.is_pass()),
            Self::Test(t) => usize::from(!t.status.is_pass()),
            Self::All(report) => report.failed(),
        }
    }

    fn as_report(&self) -> LinkReport {
        match self {
            Self::Requirement(r) => LinkReport {
                requirements: vec![r.clone()],
                tests: Vec::new(),
            },
            Self::Test(t) => LinkReport {
                requirements: Vec::new(),
                tests: vec![t.clone()],
            },
            Self::All(report) => report.clone(),
        }
    }
}

impl Report for LinksResponse {
    fn text(&self) -> String {
        let report = self.as_report();
        let options = TableOptions::detect();
        let mut out = String::new();

        if !report.requirements.is_empty() {
            let rows = report
                .requirements
                .iter()
                .map(|r| {
                    vec![
                        r.requirement_id.clone(),
                        r.status.to_string(),
                        r.valid_links.to_string(),
                        r.missing_links.len().to_string(),
                    ]
                })
                .collect::<Vec<_>>();
            out.push_str(&render_table(
                &["requirement", "status", "valid", "missing"],
                &rows,
                options,
            ));
            out.push('\n');
        }

        if !report.tests.is_empty() {
            if !out.is_empty() {
                out.push('\n');
            }
            let rows = report
                .tests
                .iter()
                .map(|t| {
                    vec![
                        t.test.clone(),
                        t.status.to_string(),
                        t.validates.join(", "),
                    ]
                })
                .collect::<Vec<_>>();
            out.push_str(&render_table(&["test", "status", "validates"], &rows, options));
            out.push('\n');
        }

        let failures = report
            .requirements
            .iter()
            .flat_map(|r| {
                r.violations
                    .iter()
                    .chain(r.missing_links.iter().map(|m| &m.violation))
                    .map(move |v| (r.requirement_id.as_str(), v))
            })
            .chain(
                report
                    .tests
                    .iter()
                    .flat_map(|t| t.violations.iter().map(move |v| (t.test.as_str(), v))),
            )
            .collect::<Vec<_>>();
        if !failures.is_empty() {
            out.push_str("\nViolations:\n");
            out.push_str(&remediation_lines(failures));
        }

        let checked = report.requirements.len() + report.tests.len();
        let _ = write!(out, "\n{checked} checked, {} failed", report.failed());
        out
    }
}

pub fn run(args: &LinksArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let index = ctx.scan(args.tests_dir.as_deref(), args.requirements_dir.as_deref())?;

    let response = if let Some(id) = &args.requirement {
        LinksResponse::Requirement(validate_requirement(&index, id))
    } else if let Some(test) = &args.test {
        LinksResponse::Test(validate_test(&index, test))
    } else {
        LinksResponse::All(validate_all(&index))
    };
    let failed = response.failed();

    output(&response, flags)?;
    if failed > 0 {
        bail!("validate links: {failed} check(s) failed");
    }
    Ok(())
}
