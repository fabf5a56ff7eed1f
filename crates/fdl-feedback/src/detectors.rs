//! Built-in catalog of known mistake patterns.
//!
//! A detector clusters entries whose text mentions the same underlying mistake
//! even when the wording differs. Detectors only apply to entries of their own
//! category, and the first match in catalog order wins.

use std::sync::LazyLock;

use fdl_core::enums::{Category, Severity};
use fdl_core::feedback::FeedbackEntry;
use regex::Regex;

/// A named mistake pattern with its remediation hint.
#[derive(Debug)]
pub struct Detector {
    pub name: &'static str,
    pub category: Category,
    /// Lowest severity any group matched by this detector is reported at.
    pub severity: Severity,
    pub summary: &'static str,
    pub suggestion: &'static str,
    pattern: Regex,
}

impl Detector {
    /// Whether `text` mentions this pattern. Matching is case-insensitive.
    #[must_use]
    pub fn is_match(&self, text: &str) -> bool {
        self.pattern.is_match(text)
    }
}

struct Spec {
    name: &'static str,
    category: Category,
    severity: Severity,
    summary: &'static str,
    suggestion: &'static str,
    pattern: &'static str,
}

const CATALOG: &[Spec] = &[
    Spec {
        name: "fixture_before_import",
        category: Category::Testing,
        severity: Severity::High,
        summary: "pytest fixture declared before its imports",
        suggestion: "Add pytest fixture placement warning (imports must come before decorators)",
        pattern: r"@pytest\.fixture.*before.*import|nameerror.*pytest|fixture.*import",
    },
    Spec {
        name: "private_method_test",
        category: Category::Testing,
        severity: Severity::High,
        summary: "tests exercising private methods",
        suggestion: "Emphasize: never test private methods, only the public API",
        pattern: r"\._\w+|private method|_private|internal implementation",
    },
    Spec {
        name: "blackbox_violation",
        category: Category::Testing,
        severity: Severity::High,
        summary: "tests importing internals instead of driving the public surface",
        suggestion: "Strengthen the black-box only rule with more examples",
        pattern: r"from src\.|imported.*internal|not black.?box|subprocess missing",
    },
    Spec {
        name: "missing_validates",
        category: Category::Testing,
        severity: Severity::Medium,
        summary: "test files without a Validates: marker",
        suggestion: "Add the Validates: field to test templates",
        pattern: r"validates:|missing.*validates|no validates field",
    },
    Spec {
        name: "dependency_violation",
        category: Category::Architecture,
        severity: Severity::High,
        summary: "dependencies pointing the wrong way across layers",
        suggestion: "Clarify dependency direction rules with diagrams",
        pattern: r"dependency.*wrong.*direction|layer.*violation|hexagonal|clean arch",
    },
    Spec {
        name: "god_class",
        category: Category::Architecture,
        severity: Severity::Medium,
        summary: "classes carrying too many responsibilities",
        suggestion: "Add god class anti-pattern detection",
        pattern: r"god class|too many.*responsibilities|single responsibility|srp violation",
    },
    Spec {
        name: "plain_password",
        category: Category::Security,
        severity: Severity::High,
        summary: "passwords stored or sent in clear text",
        suggestion: "Add password hashing requirements prominently",
        pattern: r"password.*plain|unhashed|cleartext|not.*encrypted",
    },
    Spec {
        name: "sql_injection",
        category: Category::Security,
        severity: Severity::High,
        summary: "queries built from unescaped input",
        suggestion: "Emphasize parameterized queries in examples",
        pattern: r"sql.*injection|parameterized.*query|prepared statement",
    },
    Spec {
        name: "n_plus_one",
        category: Category::Performance,
        severity: Severity::High,
        summary: "one query per item inside a loop",
        suggestion: "Add N+1 query pattern detection and solutions",
        pattern: r"n\+1|n plus one|query.*loop|multiple.*queries|batch",
    },
    Spec {
        name: "rest_violation",
        category: Category::Api,
        severity: Severity::Medium,
        summary: "HTTP methods or status codes used against REST conventions",
        suggestion: "Add a REST principles decision tree",
        pattern: r"rest.*violation|wrong.*http.*method|status code|get.*with.*body",
    },
    Spec {
        name: "test_naming",
        category: Category::Naming,
        severity: Severity::Medium,
        summary: "test files not following the TC-<LEVEL>-<ID>_<component> convention",
        suggestion: "Run `fdl validate naming --all` before committing",
        pattern: r"tc-[uas][ti]|test.*naming|wrong.*prefix|naming convention",
    },
    Spec {
        name: "missing_frontmatter",
        category: Category::Documentation,
        severity: Severity::High,
        summary: "requirement documents without YAML front-matter",
        suggestion: "Add a front-matter validation checklist",
        pattern: r"frontmatter|front-matter|yaml header|metadata.*missing|validates:.*missing",
    },
];

static DETECTORS: LazyLock<Vec<Detector>> = LazyLock::new(|| {
    CATALOG
        .iter()
        .filter_map(|spec| {
            match Regex::new(&format!("(?i){}", spec.pattern)) {
                Ok(pattern) => Some(Detector {
                    name: spec.name,
                    category: spec.category,
                    severity: spec.severity,
                    summary: spec.summary,
                    suggestion: spec.suggestion,
                    pattern,
                }),
                Err(error) => {
                    tracing::warn!(detector = spec.name, %error, "detector pattern does not compile");
                    None
                }
            }
        })
        .collect()
});

/// Every detector, in catalog order.
#[must_use]
pub fn all() -> &'static [Detector] {
    &DETECTORS
}

/// Look up a detector by name.
#[must_use]
pub fn by_name(name: &str) -> Option<&'static Detector> {
    all().iter().find(|d| d.name == name)
}

/// First detector of the entry's category whose pattern matches
/// `context + " " + feedback`.
#[must_use]
pub fn match_entry(entry: &FeedbackEntry) -> Option<&'static Detector> {
    let text = format!("{} {}", entry.context, entry.feedback);
    all()
        .iter()
        .filter(|d| d.category == entry.category)
        .find(|d| d.is_match(&text))
}
