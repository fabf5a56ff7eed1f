//! Per-file naming validation.
//!
//! Naming conformance and referential integrity are separate checks: a test
//! name must match the grammar *and* the requirement it encodes must be
//! indexed.

use std::path::{Path, PathBuf};

use fdl_core::enums::{CheckStatus, NodeKind, TestLevel};
use fdl_core::violation::{Violation, reasons};
use serde::Serialize;

use crate::index::ArtifactIndex;
use crate::naming::{self, NameError};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NamingResult {
    pub file: String,
    pub status: CheckStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<NodeKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<TestLevel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub component: Option<String>,
    pub violations: Vec<Violation>,
}

impl NamingResult {
    fn new(file: String) -> Self {
        Self {
            file,
            status: CheckStatus::Fail,
            kind: None,
            level: None,
            id: None,
            component: None,
            violations: Vec::new(),
        }
    }

    fn finish(mut self) -> Self {
        self.status = CheckStatus::from_ok(self.violations.is_empty());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NamingReport {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub results: Vec<NamingResult>,
}

impl NamingReport {
    #[must_use]
    pub fn from_results(results: Vec<NamingResult>) -> Self {
        let passed = results.iter().filter(|r| r.status.is_pass()).count();
        Self {
            total: results.len(),
            passed,
            failed: results.len() - passed,
            results,
        }
    }

    #[must_use]
    pub const fn is_pass(&self) -> bool {
        self.failed == 0
    }
}

/// Validate each path's basename. `.md` files are checked against the
/// requirement grammars, everything else against the test grammar. With a
/// `level`, only tests of that level are reported.
#[must_use]
pub fn validate_naming(
    paths: &[PathBuf],
    index: &ArtifactIndex,
    level: Option<TestLevel>,
) -> NamingReport {
    let results = paths
        .iter()
        .map(|p| validate_file(p, index))
        .filter(|r| level.is_none_or(|l| r.level == Some(l)))
        .collect();
    NamingReport::from_results(results)
}

#[must_use]
pub fn validate_file(path: &Path, index: &ArtifactIndex) -> NamingResult {
    let layout = index.layout();
    let mut result = NamingResult::new(layout.display(path));
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    if path
        .extension()
        .is_some_and(|e| e.eq_ignore_ascii_case("md"))
    {
        check_requirement_name(path, &file_name, &mut result);
    } else {
        check_test_name(path, &file_name, index, &mut result);
    }

    if !result.violations.is_empty() {
        tracing::debug!(file = %result.file, violations = result.violations.len(), "naming check failed");
    }
    result.finish()
}

fn check_requirement_name(path: &Path, file_name: &str, result: &mut NamingResult) {
    match naming::parse_requirement_name(file_name) {
        Some(parsed) => {
            result.kind = Some(parsed.kind);
            result.id = Some(parsed.id);
            result.component = parsed.name;
        }
        None => result.violations.push(Violation::new(
            reasons::INVALID_NAMING_FORMAT,
            naming::REQUIREMENT_PATTERN,
            file_name,
            format!("rename {file_name} to {}", naming::suggest_requirement_name(path)),
        )),
    }
}

fn check_test_name(path: &Path, file_name: &str, index: &ArtifactIndex, result: &mut NamingResult) {
    let layout = index.layout();
    let extension = path
        .extension()
        .map(|e| e.to_string_lossy().into_owned())
        .filter(|e| layout.is_test_extension(e))
        .unwrap_or_else(|| layout.test_extension().to_string());

    match naming::parse_test_name(file_name, &layout.test_extensions) {
        Ok(name) => {
            result.kind = Some(NodeKind::Test);
            result.level = Some(name.level);
            result.id = Some(name.id.clone());
            result.component = Some(name.component.clone());

            let candidates = name.requirement_candidates();
            if !index.has_any_requirement(&candidates) {
                let expected = candidates
                    .iter()
                    .map(|c| layout.requirement_path(&format!("{c}.md")))
                    .collect::<Vec<_>>()
                    .join(" or ");
                result.violations.push(Violation::new(
                    reasons::REQUIREMENT_NOT_FOUND,
                    expected,
                    format!("no requirement {} is indexed", name.requirement_id()),
                    format!(
                        "create {} or correct the ID in {file_name}",
                        layout.requirement_path(&format!("{}.md", name.requirement_id()))
                    ),
                ));
            }
        }
        Err(NameError::UnknownLevel(level)) => {
            result.kind = Some(NodeKind::Test);
            let allowed = TestLevel::ALL.map(TestLevel::as_str).join(", ");
            result.violations.push(Violation::new(
                reasons::UNKNOWN_TEST_LEVEL,
                format!("one of {allowed}"),
                level.clone(),
                format!("replace {level} in {file_name} with one of {allowed}"),
            ));
        }
        Err(NameError::InvalidFormat) => {
            result.violations.push(Violation::new(
                reasons::INVALID_NAMING_FORMAT,
                naming::test_pattern(&extension),
                file_name,
                format!(
                    "rename {file_name} to {}",
                    naming::suggest_test_name(path, &extension)
                ),
            ));
        }
    }
}
