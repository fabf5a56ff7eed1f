//! Recurring-pattern detection over the feedback log.
//!
//! Entries are grouped by category and pattern key. The key is the name of the
//! first matching [`detectors`](crate::detectors) entry, or else a normalized
//! signature of the entry text, so identical corrections always land in the
//! same group. Groups reaching the threshold become [`PatternSuggestion`]s.

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, SecondsFormat, Utc};
use fdl_core::enums::{Category, Severity};
use fdl_core::feedback::FeedbackEntry;
use serde::Serialize;

use crate::detectors::{self, Detector};

/// Examples kept per suggestion.
pub const MAX_EXAMPLES: usize = 3;

/// Default minimum group size.
pub const DEFAULT_THRESHOLD: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalyzeOptions {
    pub threshold: usize,
    pub category: Option<Category>,
    /// Inclusive lower bound on `timestamp`.
    pub since: Option<DateTime<Utc>>,
    /// Inclusive upper bound on `timestamp`.
    pub until: Option<DateTime<Utc>>,
}

impl Default for AnalyzeOptions {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            category: None,
            since: None,
            until: None,
        }
    }
}

impl AnalyzeOptions {
    /// Restrict to the seven days ending at `now`.
    #[must_use]
    pub fn last_week(mut self, now: DateTime<Utc>) -> Self {
        self.since = Some(now - Duration::days(7));
        self.until = Some(now);
        self
    }

    const fn has_window(&self) -> bool {
        self.since.is_some() || self.until.is_some()
    }

    fn keeps(&self, entry: &FeedbackEntry) -> bool {
        if self.category.is_some_and(|c| c != entry.category) {
            return false;
        }
        if !self.has_window() {
            return true;
        }
        let Some(at) = entry.recorded_at() else {
            tracing::warn!(
                timestamp = %entry.timestamp,
                "excluding entry with unparseable timestamp from date window"
            );
            return false;
        };
        self.since.is_none_or(|since| at >= since) && self.until.is_none_or(|until| at <= until)
    }
}

/// Time span a report covers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ReportPeriod {
    AllTime,
    Window {
        since: Option<String>,
        until: Option<String>,
    },
}

impl ReportPeriod {
    fn from_options(opts: &AnalyzeOptions) -> Self {
        if opts.has_window() {
            let fmt = |t: DateTime<Utc>| t.to_rfc3339_opts(SecondsFormat::Secs, true);
            Self::Window {
                since: opts.since.map(fmt),
                until: opts.until.map(fmt),
            }
        } else {
            Self::AllTime
        }
    }
}

impl std::fmt::Display for ReportPeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AllTime => f.write_str("All time"),
            Self::Window { since, until } => write!(
                f,
                "{} to {}",
                since.as_deref().unwrap_or("beginning"),
                until.as_deref().unwrap_or("now")
            ),
        }
    }
}

/// A recurring group at or above the threshold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PatternSuggestion {
    pub category: Category,
    /// Detector name or normalized signature.
    pub key: String,
    pub summary: String,
    pub count: usize,
    pub max_severity: Severity,
    /// Set when the group was formed by a built-in detector.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detector: Option<String>,
    pub suggested_action: String,
    /// First members of the group in log order.
    pub examples: Vec<FeedbackEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PatternReport {
    pub generated_at: String,
    /// Entries remaining after filters.
    pub total_entries: usize,
    pub threshold: usize,
    pub period: ReportPeriod,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_filter: Option<Category>,
    pub patterns: Vec<PatternSuggestion>,
}

impl PatternReport {
    /// Suggestions whose severity is `high`.
    pub fn high_severity(&self) -> impl Iterator<Item = &PatternSuggestion> {
        self.patterns
            .iter()
            .filter(|p| p.max_severity == Severity::High)
    }
}

/// Case-fold, replace every non-alphanumeric character with a space, and
/// collapse runs of whitespace.
#[must_use]
pub fn normalize(text: &str) -> String {
    let folded: String = text
        .chars()
        .map(|c| {
            if c.is_alphanumeric() {
                c.to_lowercase().next().unwrap_or(c)
            } else {
                ' '
            }
        })
        .collect();
    folded.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Grouping key of an entry within its category.
#[must_use]
pub fn pattern_key(entry: &FeedbackEntry) -> String {
    key_for(entry, detectors::match_entry(entry))
}

fn key_for(entry: &FeedbackEntry, detector: Option<&Detector>) -> String {
    detector.map_or_else(
        || {
            format!(
                "{} | {}",
                normalize(&entry.context),
                normalize(&entry.feedback)
            )
        },
        |d| d.name.to_string(),
    )
}

struct Group<'a> {
    detector: Option<&'static Detector>,
    members: Vec<&'a FeedbackEntry>,
}

/// Group, threshold, and rank the entries.
///
/// Ordering is count descending, then category name, then key, so the same
/// log always produces the same report body.
#[must_use]
pub fn analyze(
    entries: &[FeedbackEntry],
    opts: &AnalyzeOptions,
    now: DateTime<Utc>,
) -> PatternReport {
    let kept: Vec<&FeedbackEntry> = entries.iter().filter(|e| opts.keeps(e)).collect();

    let mut groups: BTreeMap<(Category, String), Group<'_>> = BTreeMap::new();
    for entry in &kept {
        let detector = detectors::match_entry(entry);
        let key = key_for(entry, detector);
        groups
            .entry((entry.category, key))
            .or_insert_with(|| Group {
                detector,
                members: Vec::new(),
            })
            .members
            .push(entry);
    }

    let mut patterns: Vec<PatternSuggestion> = groups
        .into_iter()
        .filter(|(_, group)| group.members.len() >= opts.threshold)
        .map(|((category, key), group)| suggestion(category, key, &group))
        .collect();

    patterns.sort_by(|a, b| {
        b.count
            .cmp(&a.count)
            .then_with(|| a.category.as_str().cmp(b.category.as_str()))
            .then_with(|| a.key.cmp(&b.key))
    });

    tracing::debug!(
        entries = kept.len(),
        patterns = patterns.len(),
        threshold = opts.threshold,
        "feedback analysis complete"
    );

    PatternReport {
        generated_at: now.to_rfc3339_opts(SecondsFormat::Secs, true),
        total_entries: kept.len(),
        threshold: opts.threshold,
        period: ReportPeriod::from_options(opts),
        category_filter: opts.category,
        patterns,
    }
}

fn suggestion(category: Category, key: String, group: &Group<'_>) -> PatternSuggestion {
    let member_max = group
        .members
        .iter()
        .map(|e| e.severity)
        .max()
        .unwrap_or_default();
    let first = group.members.first();

    let (summary, suggested_action, max_severity) = match group.detector {
        Some(d) => (
            d.summary.to_string(),
            d.suggestion.to_string(),
            member_max.max(d.severity),
        ),
        None => (
            first.map(|e| e.context.clone()).unwrap_or_default(),
            first
                .map(|e| format!("Add a rule: {}", e.feedback))
                .unwrap_or_default(),
            member_max,
        ),
    };

    PatternSuggestion {
        category,
        key,
        summary,
        count: group.members.len(),
        max_severity,
        detector: group.detector.map(|d| d.name.to_string()),
        suggested_action,
        examples: group
            .members
            .iter()
            .take(MAX_EXAMPLES)
            .map(|e| (*e).clone())
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use fdl_core::enums::FeedbackType;
    use pretty_assertions::assert_eq;

    use super::*;

    fn entry(category: Category, context: &str, feedback: &str, ts: &str) -> FeedbackEntry {
        FeedbackEntry {
            timestamp: ts.into(),
            session_id: String::new(),
            kind: FeedbackType::Mistake,
            context: context.into(),
            feedback: feedback.into(),
            category,
            severity: Severity::Low,
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 2, 10, 0, 0, 0).unwrap()
    }

    #[test]
    fn normalize_folds_case_and_punctuation() {
        assert_eq!(normalize("  Forgot   the VALIDATOR!! "), "forgot the validator");
        assert_eq!(normalize("a_b-c.d"), "a b c d");
        assert_eq!(normalize("---"), "");
    }

    #[test]
    fn signature_key_when_no_detector_matches() {
        let e = entry(Category::Testing, "Forgot validator.", "Add to Checklist", "2026-02-08T00:00:00Z");
        assert_eq!(pattern_key(&e), "forgot validator | add to checklist");
    }

    #[test]
    fn differently_punctuated_text_groups_together() {
        let entries = vec![
            entry(Category::Testing, "Forgot validator", "add to checklist", "2026-02-08T00:00:00Z"),
            entry(Category::Testing, "forgot validator.", "Add to checklist!", "2026-02-08T00:00:01Z"),
            entry(Category::Testing, "FORGOT  validator", "add to checklist", "2026-02-08T00:00:02Z"),
        ];
        let report = analyze(&entries, &AnalyzeOptions::default(), now());
        assert_eq!(report.patterns.len(), 1);
        assert_eq!(report.patterns[0].count, 3);
        assert_eq!(report.patterns[0].detector, None);
    }

    #[test]
    fn detector_floor_raises_severity() {
        let entries: Vec<_> = (0..3)
            .map(|i| {
                entry(
                    Category::Security,
                    &format!("password stored in plain text #{i}"),
                    "hash it",
                    "2026-02-08T00:00:00Z",
                )
            })
            .collect();
        let report = analyze(&entries, &AnalyzeOptions::default(), now());
        assert_eq!(report.patterns.len(), 1);
        assert_eq!(report.patterns[0].key, "plain_password");
        assert_eq!(report.patterns[0].max_severity, Severity::High);
        assert_eq!(report.high_severity().count(), 1);
    }

    #[test]
    fn window_excludes_out_of_range_and_unparseable() {
        let entries = vec![
            entry(Category::Naming, "a", "b", "2026-02-09T00:00:00Z"),
            entry(Category::Naming, "a", "b", "2026-01-01T00:00:00Z"),
            entry(Category::Naming, "a", "b", "yesterday"),
        ];
        let opts = AnalyzeOptions {
            threshold: 1,
            ..AnalyzeOptions::default()
        }
        .last_week(now());
        let report = analyze(&entries, &opts, now());
        assert_eq!(report.total_entries, 1);
        assert!(matches!(report.period, ReportPeriod::Window { .. }));
    }

    #[test]
    fn unparseable_timestamp_kept_without_window() {
        let entries = vec![entry(Category::Naming, "a", "b", "yesterday")];
        let opts = AnalyzeOptions {
            threshold: 1,
            ..AnalyzeOptions::default()
        };
        assert_eq!(analyze(&entries, &opts, now()).total_entries, 1);
    }

    #[test]
    fn examples_are_capped() {
        let entries: Vec<_> = (0..5)
            .map(|_| entry(Category::Api, "x", "y", "2026-02-08T00:00:00Z"))
            .collect();
        let report = analyze(&entries, &AnalyzeOptions::default(), now());
        assert_eq!(report.patterns[0].count, 5);
        assert_eq!(report.patterns[0].examples.len(), MAX_EXAMPLES);
    }
}
