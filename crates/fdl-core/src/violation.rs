//! The shape every validator failure is reported with.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Machine-stable failure reasons shared by the validators.
pub mod reasons {
    pub const INVALID_NAMING_FORMAT: &str = "invalid naming format";
    pub const UNKNOWN_TEST_LEVEL: &str = "unknown test level";
    pub const REQUIREMENT_NOT_FOUND: &str = "requirement not found";
    pub const NO_FRONTMATTER: &str = "no frontmatter";
    pub const NO_TESTS_LINKED: &str = "no test files linked";
    pub const TEST_NOT_FOUND: &str = "test file not found";
    pub const MISSING_BACKWARD_LINK: &str = "missing backward link";
    pub const MISSING_VALIDATES_MARKER: &str = "missing validates marker";
    pub const MISSING_FORWARD_LINK: &str = "missing forward link";
    pub const UNREADABLE: &str = "unreadable file";
}

/// A single failed check: what was expected, what was found, and how to fix it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Violation {
    /// One of [`reasons`].
    pub reason: String,
    /// Expected pattern, link, or value.
    pub expected: String,
    /// What is actually on disk.
    pub found: String,
    /// Concrete remediation (a rename, a path to create, a field to add).
    pub remediation: String,
}

impl Violation {
    pub fn new(
        reason: &str,
        expected: impl Into<String>,
        found: impl Into<String>,
        remediation: impl Into<String>,
    ) -> Self {
        Self {
            reason: reason.to_string(),
            expected: expected.into(),
            found: found.into(),
            remediation: remediation.into(),
        }
    }
}
