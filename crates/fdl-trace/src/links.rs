//! Bidirectional requirement/test link validation.
//!
//! A link is valid only when both sides name each other: the requirement lists
//! the test in `tested_by`, and the test's `Validates:` marker names the
//! requirement. A forward reference alone never passes.

use fdl_core::enums::CheckStatus;
use fdl_core::violation::{Violation, reasons};
use serde::Serialize;

use crate::index::{ArtifactIndex, RequirementDoc, TestDoc};

/// A `tested_by` entry that does not resolve to a test naming this requirement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MissingLink {
    pub expected_test_id: String,
    #[serde(flatten)]
    pub violation: Violation,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RequirementLinkResult {
    pub requirement_id: String,
    pub status: CheckStatus,
    /// Number of `tested_by` entries linked in both directions.
    pub valid_links: usize,
    /// The `tested_by` entries counted in `valid_links`.
    pub linked_tests: Vec<String>,
    pub missing_links: Vec<MissingLink>,
    /// Failures of the requirement itself (absent, no front-matter, no tests).
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub violations: Vec<Violation>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TestLinkResult {
    pub test: String,
    pub status: CheckStatus,
    pub validates: Vec<String>,
    pub violations: Vec<Violation>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct LinkReport {
    pub requirements: Vec<RequirementLinkResult>,
    pub tests: Vec<TestLinkResult>,
}

impl LinkReport {
    #[must_use]
    pub fn is_pass(&self) -> bool {
        self.requirements.iter().all(|r| r.status.is_pass())
            && self.tests.iter().all(|t| t.status.is_pass())
    }

    #[must_use]
    pub fn failed(&self) -> usize {
        self.requirements
            .iter()
            .filter(|r| !r.status.is_pass())
            .count()
            + self.tests.iter().filter(|t| !t.status.is_pass()).count()
    }
}

/// Check every `tested_by` entry of one requirement.
#[must_use]
pub fn validate_requirement(index: &ArtifactIndex, requirement_id: &str) -> RequirementLinkResult {
    let layout = index.layout();
    let mut result = RequirementLinkResult {
        requirement_id: requirement_id.trim().to_string(),
        status: CheckStatus::Fail,
        valid_links: 0,
        linked_tests: Vec::new(),
        missing_links: Vec::new(),
        violations: Vec::new(),
    };

    let Some(doc) = index.requirement(requirement_id) else {
        let path = layout.requirement_path(&format!("{}.md", result.requirement_id));
        result.violations.push(Violation::new(
            reasons::REQUIREMENT_NOT_FOUND,
            path.clone(),
            "absent",
            format!("create {path} with front-matter listing tested_by"),
        ));
        return result;
    };
    let doc_path = layout.display(&doc.path);

    if !doc.has_frontmatter {
        result.violations.push(Violation::new(
            reasons::NO_FRONTMATTER,
            "YAML front-matter with a tested_by list",
            doc.frontmatter_error
                .clone()
                .unwrap_or_else(|| "no front-matter block".to_string()),
            format!("add a --- delimited front-matter block with tested_by to {doc_path}"),
        ));
        return result;
    }

    if doc.tested_by.is_empty() {
        result.violations.push(Violation::new(
            reasons::NO_TESTS_LINKED,
            "at least one test in tested_by",
            "tested_by: []",
            format!("list the tests that validate {} in {doc_path}", doc.id),
        ));
        return result;
    }

    for reference in &doc.tested_by {
        match index.find_test(reference) {
            None => {
                let path = layout.test_path(reference);
                result.missing_links.push(MissingLink {
                    expected_test_id: reference.clone(),
                    violation: Violation::new(
                        reasons::TEST_NOT_FOUND,
                        path.clone(),
                        "absent",
                        format!("create {path} with `Validates: {}`", doc.id),
                    ),
                });
            }
            Some(test) if test.validates_requirement(&doc.id) => {
                result.linked_tests.push(reference.clone());
            }
            Some(test) => result.missing_links.push(MissingLink {
                expected_test_id: reference.clone(),
                violation: backward_link_violation(index, test, doc),
            }),
        }
    }

    result.valid_links = result.linked_tests.len();
    result.status = CheckStatus::from_ok(result.missing_links.is_empty());
    result
}

fn backward_link_violation(index: &ArtifactIndex, test: &TestDoc, doc: &RequirementDoc) -> Violation {
    let test_path = index.layout().display(&test.path);
    if test.has_marker {
        Violation::new(
            reasons::MISSING_BACKWARD_LINK,
            format!("Validates: {}", doc.id),
            if test.validates.is_empty() {
                "Validates: (no requirement id)".to_string()
            } else {
                format!("Validates: {}", test.validates.join(", "))
            },
            format!("add {} to the Validates: line of {test_path}", doc.id),
        )
    } else {
        Violation::new(
            reasons::MISSING_VALIDATES_MARKER,
            format!("Validates: {}", doc.id),
            "no Validates: or Tests: line",
            format!("add `Validates: {}` to the docstring of {test_path}", doc.id),
        )
    }
}

/// Check one test's marker against the requirements it names.
#[must_use]
pub fn validate_test(index: &ArtifactIndex, reference: &str) -> TestLinkResult {
    let layout = index.layout();
    let Some(test) = index.find_test(reference) else {
        let path = layout.test_path(reference);
        return TestLinkResult {
            test: reference.to_string(),
            status: CheckStatus::Fail,
            validates: Vec::new(),
            violations: vec![Violation::new(
                reasons::TEST_NOT_FOUND,
                path.clone(),
                "absent",
                format!("check the path or create {path}"),
            )],
        };
    };

    let test_path = layout.display(&test.path);
    let mut violations = Vec::new();

    if test.validates.is_empty() {
        violations.push(Violation::new(
            reasons::MISSING_VALIDATES_MARKER,
            "Validates: <requirement id>",
            if test.has_marker {
                "marker names no requirement id"
            } else {
                "no Validates: or Tests: line"
            },
            format!("add `Validates: <requirement id>` to the docstring of {test_path}"),
        ));
    }

    for id in &test.validates {
        match index.requirement(id) {
            None => {
                let path = layout.requirement_path(&format!("{id}.md"));
                violations.push(Violation::new(
                    reasons::REQUIREMENT_NOT_FOUND,
                    path.clone(),
                    "absent",
                    format!("create {path} or correct the Validates: line of {test_path}"),
                ));
            }
            Some(doc) if doc.lists_test(test) => {}
            Some(doc) => violations.push(Violation::new(
                reasons::MISSING_FORWARD_LINK,
                format!("{} in tested_by of {}", test.file_name, doc.id),
                if doc.tested_by.is_empty() {
                    "tested_by: []".to_string()
                } else {
                    format!("tested_by: [{}]", doc.tested_by.join(", "))
                },
                format!(
                    "add {} to tested_by in {}",
                    test.file_name,
                    layout.display(&doc.path)
                ),
            )),
        }
    }

    TestLinkResult {
        test: test_path,
        status: CheckStatus::from_ok(violations.is_empty()),
        validates: test.validates.clone(),
        violations,
    }
}

/// Every indexed requirement, then every indexed test.
#[must_use]
pub fn validate_all(index: &ArtifactIndex) -> LinkReport {
    LinkReport {
        requirements: index
            .requirements()
            .map(|doc| validate_requirement(index, &doc.id))
            .collect(),
        tests: index
            .tests()
            .iter()
            .map(|t| validate_test(index, &index.layout().display(&t.path)))
            .collect(),
    }
}
