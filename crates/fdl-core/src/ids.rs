//! Identifier prefixes and classification helpers.
//!
//! Requirement IDs look like `US-A1`, `SYS-REQ-001`, `SW-REQ-086`. The short
//! forms `SYS-001` and `SW-001` (from `SW-001_name.md` filenames) are accepted
//! and classified the same way. Anything referenced from a requirement that is
//! not a requirement ID is either a test (`TC-…` or a path under `tests/`) or a
//! code path.

use crate::enums::{NodeKind, TestLevel};

/// Prefix of every test case filename.
pub const TEST_CASE_PREFIX: &str = "TC-";

/// Classify a reference found in a front-matter list.
#[must_use]
pub fn classify_reference(reference: &str) -> NodeKind {
    let reference = reference.trim();
    if reference.starts_with("US-") {
        return NodeKind::Us;
    }
    if reference.starts_with("SYS-") {
        return NodeKind::SysReq;
    }
    if reference.starts_with("SW-") {
        return NodeKind::SwReq;
    }

    let file_name = reference.rsplit('/').next().unwrap_or(reference);
    if file_name.starts_with(TEST_CASE_PREFIX)
        || reference.starts_with("tests/")
        || reference.contains("/tests/")
    {
        NodeKind::Test
    } else {
        NodeKind::Code
    }
}

/// The part of a requirement ID after its kind prefix.
///
/// `SW-REQ-001` → `001`, `SW-001` → `001`, `US-A1` → `A1`.
#[must_use]
pub fn requirement_suffix(id: &str) -> Option<&str> {
    ["SYS-REQ-", "SW-REQ-", "SYS-", "SW-", "US-"]
        .iter()
        .find_map(|prefix| id.strip_prefix(prefix))
        .filter(|rest| !rest.is_empty())
}

/// Canonical requirement ID for a kind and suffix.
///
/// Returns `None` for non-requirement kinds.
#[must_use]
pub fn requirement_id(kind: NodeKind, suffix: &str) -> Option<String> {
    kind.id_prefix().map(|prefix| format!("{prefix}{suffix}"))
}

/// Every spelling under which the requirement validated by a test may be filed.
///
/// `TC-UT-001_*` validates `SW-REQ-001`, which may also be filed as `SW-001`.
#[must_use]
pub fn requirement_candidates(level: TestLevel, number: &str) -> Vec<String> {
    match level.validated_kind() {
        NodeKind::SwReq => vec![format!("SW-REQ-{number}"), format!("SW-{number}")],
        NodeKind::SysReq => vec![format!("SYS-REQ-{number}"), format!("SYS-{number}")],
        NodeKind::Us => vec![format!("US-{number}")],
        NodeKind::Code | NodeKind::Test => Vec::new(),
    }
}

/// Whether two requirement IDs name the same requirement.
///
/// Long and short forms are equivalent (`SW-REQ-001` == `SW-001`).
#[must_use]
pub fn same_requirement(a: &str, b: &str) -> bool {
    let (a, b) = (a.trim(), b.trim());
    if a == b {
        return true;
    }
    let kind_a = classify_reference(a);
    kind_a.is_requirement()
        && kind_a == classify_reference(b)
        && requirement_suffix(a).is_some()
        && requirement_suffix(a) == requirement_suffix(b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("US-A1", NodeKind::Us)]
    #[case("SYS-REQ-001", NodeKind::SysReq)]
    #[case("SW-REQ-086", NodeKind::SwReq)]
    #[case("SW-012", NodeKind::SwReq)]
    #[case("TC-UT-001_auth.py", NodeKind::Test)]
    #[case("tests/unit/helpers.py", NodeKind::Test)]
    #[case("src/auth/service.py", NodeKind::Code)]
    #[case("auth.py", NodeKind::Code)]
    fn classifies_references(#[case] reference: &str, #[case] expected: NodeKind) {
        assert_eq!(classify_reference(reference), expected);
    }

    #[test]
    fn suffix_strips_longest_prefix() {
        assert_eq!(requirement_suffix("SW-REQ-001"), Some("001"));
        assert_eq!(requirement_suffix("SYS-REQ-7"), Some("7"));
        assert_eq!(requirement_suffix("SW-001"), Some("001"));
        assert_eq!(requirement_suffix("US-A1"), Some("A1"));
        assert_eq!(requirement_suffix("US-"), None);
        assert_eq!(requirement_suffix("auth.py"), None);
    }

    #[test]
    fn builds_requirement_ids() {
        assert_eq!(
            requirement_id(NodeKind::SwReq, "001").as_deref(),
            Some("SW-REQ-001")
        );
        assert_eq!(requirement_id(NodeKind::Code, "001"), None);
    }

    #[test]
    fn candidates_follow_test_level() {
        assert_eq!(
            requirement_candidates(TestLevel::Ut, "001"),
            vec!["SW-REQ-001", "SW-001"]
        );
        assert_eq!(
            requirement_candidates(TestLevel::St, "002"),
            vec!["SYS-REQ-002", "SYS-002"]
        );
        assert_eq!(requirement_candidates(TestLevel::At, "3"), vec!["US-3"]);
    }

    #[test]
    fn long_and_short_forms_are_the_same_requirement() {
        assert!(same_requirement("SW-REQ-001", "SW-001"));
        assert!(same_requirement("SW-REQ-001", " SW-REQ-001 "));
        assert!(!same_requirement("SW-REQ-001", "SW-REQ-002"));
        assert!(!same_requirement("SW-REQ-001", "SYS-REQ-001"));
    }
}
