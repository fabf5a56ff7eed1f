//! End-to-end: append through the log, load it back, analyze, write the report.

use chrono::{DateTime, TimeZone, Utc};
use fdl_core::enums::{Category, FeedbackType, Severity};
use fdl_core::feedback::NewFeedback;
use fdl_feedback::{AnalyzeOptions, FeedbackLog, analyze, write_report};
use pretty_assertions::assert_eq;
use rstest::rstest;
use tempfile::TempDir;

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 2, 8, 12, 0, 0).unwrap()
}

fn naming_mistake() -> NewFeedback {
    NewFeedback {
        kind: FeedbackType::Mistake,
        context: "wrong prefix".into(),
        feedback: "use TC-UT".into(),
        category: Category::Naming,
        severity: Severity::Medium,
    }
}

fn repeated(context: &str) -> NewFeedback {
    NewFeedback {
        kind: FeedbackType::Repetition,
        context: context.into(),
        feedback: "Add to checklist".into(),
        category: Category::Testing,
        severity: Severity::Low,
    }
}

fn log_in(tmp: &TempDir) -> FeedbackLog {
    FeedbackLog::new(tmp.path().join(".fdl/feedback.jsonl"))
}

#[test]
fn three_identical_naming_mistakes_form_one_group() {
    let tmp = TempDir::new().unwrap();
    let log = log_in(&tmp);
    for _ in 0..3 {
        log.record(naming_mistake(), now()).unwrap();
    }

    let loaded = log.load().unwrap();
    let report = analyze(&loaded.entries, &AnalyzeOptions::default(), now());

    assert_eq!(report.total_entries, 3);
    assert_eq!(report.patterns.len(), 1);
    let group = &report.patterns[0];
    assert_eq!(group.category, Category::Naming);
    assert_eq!(group.count, 3);
    assert_eq!(group.key, "test_naming");
}

#[rstest]
#[case(3, 3, 1)]
#[case(3, 2, 0)]
#[case(5, 5, 1)]
#[case(5, 4, 0)]
#[case(1, 1, 1)]
fn identical_entries_group_iff_threshold_reached(
    #[case] threshold: usize,
    #[case] logged: usize,
    #[case] groups: usize,
) {
    let tmp = TempDir::new().unwrap();
    let log = log_in(&tmp);
    for _ in 0..logged {
        log.record(repeated("Forgot validator"), now()).unwrap();
    }

    let opts = AnalyzeOptions {
        threshold,
        ..AnalyzeOptions::default()
    };
    let report = analyze(&log.load().unwrap().entries, &opts, now());

    assert_eq!(report.patterns.len(), groups);
    if let Some(group) = report.patterns.first() {
        assert_eq!(group.count, logged);
    }
}

#[test]
fn absent_and_empty_logs_yield_no_groups() {
    let tmp = TempDir::new().unwrap();
    let log = log_in(&tmp);
    let report = analyze(&log.load().unwrap().entries, &AnalyzeOptions::default(), now());
    assert_eq!(report.total_entries, 0);
    assert!(report.patterns.is_empty());

    std::fs::create_dir_all(log.path().parent().unwrap()).unwrap();
    std::fs::write(log.path(), "\n\n").unwrap();
    assert!(log.load().unwrap().entries.is_empty());
}

#[test]
fn category_filter_limits_groups() {
    let tmp = TempDir::new().unwrap();
    let log = log_in(&tmp);
    for _ in 0..3 {
        log.record(naming_mistake(), now()).unwrap();
        log.record(repeated("Forgot validator"), now()).unwrap();
    }

    let opts = AnalyzeOptions {
        category: Some(Category::Testing),
        ..AnalyzeOptions::default()
    };
    let report = analyze(&log.load().unwrap().entries, &opts, now());

    assert_eq!(report.total_entries, 3);
    assert_eq!(report.patterns.len(), 1);
    assert_eq!(report.patterns[0].category, Category::Testing);
}

#[test]
fn ties_break_on_category_then_key() {
    let tmp = TempDir::new().unwrap();
    let log = log_in(&tmp);
    for _ in 0..3 {
        log.record(repeated("zeta step skipped"), now()).unwrap();
        log.record(repeated("alpha step skipped"), now()).unwrap();
        log.record(naming_mistake(), now()).unwrap();
    }
    log.record(repeated("alpha step skipped"), now()).unwrap();

    let report = analyze(&log.load().unwrap().entries, &AnalyzeOptions::default(), now());
    let order: Vec<(usize, &str, &str)> = report
        .patterns
        .iter()
        .map(|p| (p.count, p.category.as_str(), p.key.as_str()))
        .collect();

    assert_eq!(
        order,
        vec![
            (4, "Testing", "alpha step skipped | add to checklist"),
            (3, "Naming", "test_naming"),
            (3, "Testing", "zeta step skipped | add to checklist"),
        ]
    );
}

#[test]
fn malformed_lines_do_not_abort_analysis() {
    let tmp = TempDir::new().unwrap();
    let log = log_in(&tmp);
    for _ in 0..3 {
        log.record(naming_mistake(), now()).unwrap();
    }
    let mut content = std::fs::read_to_string(log.path()).unwrap();
    content.push_str("{\"timestamp\": truncated\n");
    std::fs::write(log.path(), content).unwrap();

    let loaded = log.load().unwrap();
    assert_eq!(loaded.entries.len(), 3);
    assert_eq!(loaded.skipped_lines, vec![4]);
    assert_eq!(
        analyze(&loaded.entries, &AnalyzeOptions::default(), now()).patterns.len(),
        1
    );
}

#[test]
fn report_overwrites_previous_file() {
    let tmp = TempDir::new().unwrap();
    let log = log_in(&tmp);
    for _ in 0..3 {
        log.record(naming_mistake(), now()).unwrap();
    }
    let report_path = tmp.path().join("skill_update_suggestions.md");
    std::fs::write(&report_path, "stale content").unwrap();

    let report = analyze(&log.load().unwrap().entries, &AnalyzeOptions::default(), now());
    write_report(&report_path, &report).unwrap();

    let written = std::fs::read_to_string(&report_path).unwrap();
    assert!(!written.contains("stale content"));
    assert!(written.contains("test_naming"));
    assert!(written.contains("**Total Entries:** 3"));
}

#[test]
fn logged_lines_pass_the_schema_check() {
    let tmp = TempDir::new().unwrap();
    let log = log_in(&tmp);
    log.record(naming_mistake(), now()).unwrap();
    log.record(repeated("Forgot validator"), now()).unwrap();

    let check = log.check(&fdl_schema::SchemaRegistry::new()).unwrap();
    assert_eq!(check.lines_checked, 2);
    assert!(check.is_valid(), "{:?}", check.errors);
}
