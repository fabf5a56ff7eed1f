//! Closed enums for feedback records, test levels, and traceability chains.
//!
//! Every enum carries `as_str()` for its wire spelling, a `Display` impl, and
//! (where users type the value on the command line) a case-insensitive
//! `FromStr` that reports unknown values as `CoreError::Configuration`.

use std::fmt;
use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

// ---------------------------------------------------------------------------
// FeedbackType
// ---------------------------------------------------------------------------

/// Kind of correction a feedback entry records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackType {
    Mistake,
    Repetition,
    Clarification,
}

impl FeedbackType {
    pub const ALL: [Self; 3] = [Self::Mistake, Self::Repetition, Self::Clarification];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Mistake => "mistake",
            Self::Repetition => "repetition",
            Self::Clarification => "clarification",
        }
    }
}

impl fmt::Display for FeedbackType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FeedbackType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_closed(s, "type", &Self::ALL, |v| v.as_str())
    }
}

// ---------------------------------------------------------------------------
// Category
// ---------------------------------------------------------------------------

/// Area of engineering practice a feedback entry belongs to.
///
/// Serialized in title case (`"Testing"`, `"API"`) to match the log format.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
pub enum Category {
    Testing,
    Architecture,
    Security,
    Performance,
    #[serde(rename = "API")]
    Api,
    Naming,
    Documentation,
}

impl Category {
    pub const ALL: [Self; 7] = [
        Self::Testing,
        Self::Architecture,
        Self::Security,
        Self::Performance,
        Self::Api,
        Self::Naming,
        Self::Documentation,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Testing => "Testing",
            Self::Architecture => "Architecture",
            Self::Security => "Security",
            Self::Performance => "Performance",
            Self::Api => "API",
            Self::Naming => "Naming",
            Self::Documentation => "Documentation",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_closed(s, "category", &Self::ALL, |v| v.as_str())
    }
}

// ---------------------------------------------------------------------------
// Severity
// ---------------------------------------------------------------------------

/// Severity of a feedback entry. Ordered `Low < Medium < High`.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Low,
    #[default]
    Medium,
    High,
}

impl Severity {
    pub const ALL: [Self; 3] = [Self::Low, Self::Medium, Self::High];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_closed(s, "severity", &Self::ALL, |v| v.as_str())
    }
}

// ---------------------------------------------------------------------------
// TestLevel
// ---------------------------------------------------------------------------

/// Test level encoded in a `TC-<LEVEL>-<ID>_<component>` filename.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum TestLevel {
    Ut,
    It,
    St,
    At,
}

impl TestLevel {
    pub const ALL: [Self; 4] = [Self::Ut, Self::It, Self::St, Self::At];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ut => "UT",
            Self::It => "IT",
            Self::St => "ST",
            Self::At => "AT",
        }
    }

    /// Requirement kind a test at this level validates.
    ///
    /// ```text
    /// UT, IT → SW-REQ
    /// ST     → SYS-REQ
    /// AT     → US
    /// ```
    #[must_use]
    pub const fn validated_kind(self) -> NodeKind {
        match self {
            Self::Ut | Self::It => NodeKind::SwReq,
            Self::St => NodeKind::SysReq,
            Self::At => NodeKind::Us,
        }
    }
}

impl fmt::Display for TestLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TestLevel {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_closed(s, "level", &Self::ALL, |v| v.as_str())
    }
}

// ---------------------------------------------------------------------------
// NodeKind
// ---------------------------------------------------------------------------

/// Position of an artifact in the traceability chain.
///
/// ```text
/// US → SYS-REQ → SW-REQ → CODE
///                       → TEST
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
pub enum NodeKind {
    #[serde(rename = "US")]
    Us,
    #[serde(rename = "SYS-REQ")]
    SysReq,
    #[serde(rename = "SW-REQ")]
    SwReq,
    #[serde(rename = "CODE")]
    Code,
    #[serde(rename = "TEST")]
    Test,
}

impl NodeKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Us => "US",
            Self::SysReq => "SYS-REQ",
            Self::SwReq => "SW-REQ",
            Self::Code => "CODE",
            Self::Test => "TEST",
        }
    }

    /// Whether this kind is backed by a requirement document.
    #[must_use]
    pub const fn is_requirement(self) -> bool {
        matches!(self, Self::Us | Self::SysReq | Self::SwReq)
    }

    /// Identifier prefix for requirement kinds (`US-`, `SYS-REQ-`, `SW-REQ-`).
    #[must_use]
    pub const fn id_prefix(self) -> Option<&'static str> {
        match self {
            Self::Us => Some("US-"),
            Self::SysReq => Some("SYS-REQ-"),
            Self::SwReq => Some("SW-REQ-"),
            Self::Code | Self::Test => None,
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// ChainStatus
// ---------------------------------------------------------------------------

/// Completeness of a node in the traceability chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum ChainStatus {
    Complete,
    Missing,
    Partial,
}

impl ChainStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Complete => "COMPLETE",
            Self::Missing => "MISSING",
            Self::Partial => "PARTIAL",
        }
    }
}

impl fmt::Display for ChainStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// CheckStatus
// ---------------------------------------------------------------------------

/// Outcome of a single validator check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum CheckStatus {
    Pass,
    Fail,
}

impl CheckStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pass => "PASS",
            Self::Fail => "FAIL",
        }
    }

    #[must_use]
    pub const fn is_pass(self) -> bool {
        matches!(self, Self::Pass)
    }

    /// `Pass` when `ok`, otherwise `Fail`.
    #[must_use]
    pub const fn from_ok(ok: bool) -> Self {
        if ok { Self::Pass } else { Self::Fail }
    }
}

impl fmt::Display for CheckStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn parse_closed<T: Copy>(
    raw: &str,
    field: &str,
    all: &[T],
    as_str: impl Fn(T) -> &'static str,
) -> Result<T, CoreError> {
    let wanted = raw.trim();
    all.iter()
        .copied()
        .find(|value| as_str(*value).eq_ignore_ascii_case(wanted))
        .ok_or_else(|| {
            let expected: Vec<&str> = all.iter().map(|v| as_str(*v)).collect();
            CoreError::unknown(field, raw, &expected)
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Testing", Category::Testing)]
    #[case("testing", Category::Testing)]
    #[case("API", Category::Api)]
    #[case("api", Category::Api)]
    #[case(" Naming ", Category::Naming)]
    fn category_parses_case_insensitively(#[case] raw: &str, #[case] expected: Category) {
        assert_eq!(raw.parse::<Category>().unwrap(), expected);
    }

    #[test]
    fn unknown_category_is_configuration_error() {
        let err = "Styling".parse::<Category>().unwrap_err();
        assert!(matches!(err, CoreError::Configuration { .. }));
        assert!(err.to_string().contains("Styling"));
        assert!(err.to_string().contains("Documentation"));
    }

    #[test]
    fn category_serializes_in_title_case() {
        assert_eq!(serde_json::to_string(&Category::Api).unwrap(), "\"API\"");
        assert_eq!(
            serde_json::to_string(&Category::Naming).unwrap(),
            "\"Naming\""
        );
    }

    #[test]
    fn severity_orders_low_to_high() {
        assert!(Severity::Low < Severity::Medium);
        assert!(Severity::Medium < Severity::High);
        assert_eq!(Severity::default(), Severity::Medium);
    }

    #[test]
    fn unknown_level_is_rejected() {
        assert!("XT".parse::<TestLevel>().is_err());
        assert_eq!("ut".parse::<TestLevel>().unwrap(), TestLevel::Ut);
    }

    #[test]
    fn level_maps_to_validated_requirement_kind() {
        assert_eq!(TestLevel::Ut.validated_kind(), NodeKind::SwReq);
        assert_eq!(TestLevel::It.validated_kind(), NodeKind::SwReq);
        assert_eq!(TestLevel::St.validated_kind(), NodeKind::SysReq);
        assert_eq!(TestLevel::At.validated_kind(), NodeKind::Us);
    }

    #[test]
    fn node_kind_wire_names() {
        assert_eq!(
            serde_json::to_string(&NodeKind::SysReq).unwrap(),
            "\"SYS-REQ\""
        );
        assert_eq!(serde_json::to_string(&ChainStatus::Partial).unwrap(), "\"PARTIAL\"");
        assert_eq!(serde_json::to_string(&CheckStatus::Fail).unwrap(), "\"FAIL\"");
    }
}
