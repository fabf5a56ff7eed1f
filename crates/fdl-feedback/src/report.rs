//! Markdown rendering of a [`PatternReport`].

use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::path::Path;

use fdl_core::enums::Severity;

use crate::analyzer::{PatternReport, PatternSuggestion};
use crate::error::FeedbackError;

/// Rows per category table.
const TABLE_ROWS: usize = 5;

/// Render the full suggestions report.
#[must_use]
pub fn render_markdown(report: &PatternReport) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "# Feedback Pattern Analysis Report\n");
    let _ = writeln!(out, "**Generated:** {}", report.generated_at);
    let _ = writeln!(out, "**Total Entries:** {}", report.total_entries);
    let _ = writeln!(out, "**Patterns Detected:** {}", report.patterns.len());
    let _ = writeln!(out, "**Threshold:** >= {} occurrences", report.threshold);
    let _ = writeln!(out, "**Period:** {}", report.period);
    if let Some(category) = report.category_filter {
        let _ = writeln!(out, "**Category:** {category}");
    }
    out.push('\n');

    if report.total_entries == 0 {
        out.push_str("No feedback entries found for the specified period.\n");
        return out;
    }
    if report.patterns.is_empty() {
        let _ = writeln!(
            out,
            "No pattern reached the threshold of {} occurrences.",
            report.threshold
        );
        return out;
    }

    executive_summary(&mut out, report);

    let by_category = group_by_category(&report.patterns);
    category_tables(&mut out, &by_category);
    category_impact(&mut out, &by_category);
    detailed_suggestions(&mut out, &by_category);
    recommended_actions(&mut out, report);

    out
}

/// Overwrite `path` with the rendered report.
///
/// # Errors
///
/// Returns `FeedbackError::Io` if the parent directory cannot be created or
/// the file cannot be written.
pub fn write_report(path: &Path, report: &PatternReport) -> Result<(), FeedbackError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| FeedbackError::io(parent, e))?;
    }
    std::fs::write(path, render_markdown(report)).map_err(|e| FeedbackError::io(path, e))?;
    tracing::info!(path = %path.display(), patterns = report.patterns.len(), "report written");
    Ok(())
}

fn group_by_category(patterns: &[PatternSuggestion]) -> BTreeMap<&'static str, Vec<&PatternSuggestion>> {
    let mut map: BTreeMap<&'static str, Vec<&PatternSuggestion>> = BTreeMap::new();
    for pattern in patterns {
        map.entry(pattern.category.as_str()).or_default().push(pattern);
    }
    map
}

fn executive_summary(out: &mut String, report: &PatternReport) {
    out.push_str("## Executive Summary\n\n");
    let high: Vec<&PatternSuggestion> = report.high_severity().collect();
    if high.is_empty() {
        out.push_str("No high-severity patterns detected.\n\n");
        return;
    }
    out.push_str("### Priority Patterns Requiring Immediate Attention\n\n");
    for p in high {
        let _ = writeln!(
            out,
            "- **{}** ({}, {}x): {}",
            escape(&p.key),
            p.category,
            p.count,
            escape(&p.summary)
        );
    }
    out.push('\n');
}

fn category_tables(out: &mut String, by_category: &BTreeMap<&str, Vec<&PatternSuggestion>>) {
    out.push_str("## Pattern Analysis by Category\n\n");
    for (category, patterns) in by_category {
        let _ = writeln!(out, "### {category} ({} patterns)\n", patterns.len());
        out.push_str("| Pattern | Count | Severity | Action |\n");
        out.push_str("|---------|-------|----------|--------|\n");
        for p in patterns.iter().take(TABLE_ROWS) {
            let _ = writeln!(
                out,
                "| {} | {} | {} | {} |",
                escape(&p.key),
                p.count,
                p.max_severity,
                escape(&p.suggested_action)
            );
        }
        out.push('\n');
    }
}

fn category_impact(out: &mut String, by_category: &BTreeMap<&str, Vec<&PatternSuggestion>>) {
    let mut impact: Vec<(&str, usize)> = by_category
        .iter()
        .map(|(category, patterns)| (*category, patterns.iter().map(|p| p.count).sum()))
        .collect();
    impact.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));

    out.push_str("## Category Impact Analysis\n\n");
    out.push_str("Categories ranked by pattern occurrences:\n\n");
    for (rank, (category, count)) in impact.iter().enumerate() {
        let _ = writeln!(out, "{}. **{category}**: {count} pattern occurrences", rank + 1);
    }
    out.push('\n');
}

fn detailed_suggestions(out: &mut String, by_category: &BTreeMap<&str, Vec<&PatternSuggestion>>) {
    out.push_str("## Detailed Update Suggestions\n\n");
    let mut number = 1;
    for (category, patterns) in by_category {
        let _ = writeln!(out, "### {category}\n");
        for p in patterns {
            let _ = writeln!(out, "**{number}. {}**", escape(&p.key));
            let _ = writeln!(out, "- Summary: {}", p.summary);
            let _ = writeln!(out, "- Occurrences: {}", p.count);
            let _ = writeln!(out, "- Severity: {}", p.max_severity);
            let _ = writeln!(out, "- Action: {}", p.suggested_action);
            if !p.examples.is_empty() {
                out.push_str("- Examples:\n");
                for e in &p.examples {
                    let _ = writeln!(
                        out,
                        "  - `{}` {}: {} -> {}",
                        e.timestamp, e.kind, e.context, e.feedback
                    );
                }
            }
            out.push('\n');
            number += 1;
        }
    }
}

fn recommended_actions(out: &mut String, report: &PatternReport) {
    let at = |severity: Severity| {
        report
            .patterns
            .iter()
            .filter(|p| p.max_severity == severity)
            .count()
    };

    out.push_str("## Recommended Actions\n\n");
    let _ = writeln!(
        out,
        "1. **Immediate** ({} high-severity patterns): add prominent rules or automated checks for each.",
        at(Severity::High)
    );
    let _ = writeln!(
        out,
        "2. **This week** ({} medium-severity patterns): update documentation with examples of the correct approach.",
        at(Severity::Medium)
    );
    let _ = writeln!(
        out,
        "3. **Next iteration** ({} low-severity patterns): refine guidance and watch for growth.",
        at(Severity::Low)
    );
    out.push_str("\nRe-run `fdl analyze --weekly --min-frequency 2` to track week-over-week change.\n");
}

/// Escape characters that would break a Markdown table cell.
fn escape(text: &str) -> String {
    text.replace('|', "\\|").replace('\n', " ")
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use fdl_core::enums::{Category, FeedbackType};
    use fdl_core::feedback::FeedbackEntry;

    use super::*;
    use crate::analyzer::{AnalyzeOptions, analyze};

    fn entries() -> Vec<FeedbackEntry> {
        let mut out = Vec::new();
        for (category, context, feedback, severity, n) in [
            (Category::Naming, "wrong prefix", "use TC-UT", Severity::Medium, 3),
            (Category::Security, "password sent in cleartext", "hash it", Severity::Low, 4),
            (Category::Testing, "a | b", "c", Severity::Low, 3),
        ] {
            for _ in 0..n {
                out.push(FeedbackEntry {
                    timestamp: "2026-02-08T12:00:00Z".into(),
                    session_id: "s20260208".into(),
                    kind: FeedbackType::Mistake,
                    context: context.into(),
                    feedback: feedback.into(),
                    category,
                    severity,
                });
            }
        }
        out
    }

    fn report() -> PatternReport {
        analyze(
            &entries(),
            &AnalyzeOptions::default(),
            Utc.with_ymd_and_hms(2026, 2, 10, 0, 0, 0).unwrap(),
        )
    }

    #[test]
    fn has_every_section() {
        let md = render_markdown(&report());
        for heading in [
            "# Feedback Pattern Analysis Report",
            "## Executive Summary",
            "## Pattern Analysis by Category",
            "## Category Impact Analysis",
            "## Detailed Update Suggestions",
            "## Recommended Actions",
        ] {
            assert!(md.contains(heading), "missing {heading}");
        }
        assert!(md.contains("**Patterns Detected:** 3"));
    }

    #[test]
    fn high_severity_detector_in_summary() {
        let md = render_markdown(&report());
        let summary = md
            .split("## Pattern Analysis by Category")
            .next()
            .unwrap_or_default();
        assert!(summary.contains("plain_password"));
        assert!(!summary.contains("test_naming"));
    }

    #[test]
    fn pipes_are_escaped_in_tables() {
        let md = render_markdown(&report());
        assert!(md.contains("| a b \\| c | 3 | low |"));
    }

    #[test]
    fn impact_ranks_largest_category_first() {
        let md = render_markdown(&report());
        assert!(md.contains("1. **Security**: 4 pattern occurrences"));
    }

    #[test]
    fn empty_report_says_so() {
        let empty = analyze(
            &[],
            &AnalyzeOptions::default(),
            Utc.with_ymd_and_hms(2026, 2, 10, 0, 0, 0).unwrap(),
        );
        let md = render_markdown(&empty);
        assert!(md.contains("No feedback entries found"));
        assert!(!md.contains("## Executive Summary"));
    }
}
