//! Filename grammars.
//!
//! ```text
//! test         TC-<LEVEL>-<ID>_<component>.<ext>      LEVEL in UT IT ST AT, ID digits
//! requirement  (SW|SYS)-REQ-<ID>[_<name>].md
//!              (SW|SYS)-<ID>_<name>.md
//!              US-<ID>[_<name>].md
//! ```
//!
//! Matching is against the whole basename; there is no partial acceptance.

use std::path::Path;
use std::sync::LazyLock;

use fdl_core::enums::{NodeKind, TestLevel};
use fdl_core::ids;
use regex::Regex;

/// Display form of the test grammar for a given extension.
#[must_use]
pub fn test_pattern(extension: &str) -> String {
    format!("TC-{{LEVEL}}-{{ID}}_{{component}}.{extension}")
}

pub const REQUIREMENT_PATTERN: &str = "{SW|SYS}-REQ-{ID}[_{name}].md | {SW|SYS}-{ID}_{name}.md | US-{ID}[_{name}].md";

static TEST_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^TC-([A-Z]+)-(\d+)_([^./\\][^/\\]*)\.([A-Za-z0-9]+)$")
        .expect("test name regex is valid")
});

static REQ_LONG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(SW|SYS)-REQ-(\d+)(?:_([^/\\]+))?\.md$").expect("requirement name regex is valid")
});

static REQ_SHORT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(SW|SYS)-(\d+)_([^/\\]+)\.md$").expect("short requirement name regex is valid")
});

static USER_STORY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^US-([A-Za-z0-9]+)(?:_([^/\\]+))?\.md$").expect("user story regex is valid")
});

/// A conforming test filename.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestName {
    pub level: TestLevel,
    pub id: String,
    pub component: String,
    pub extension: String,
}

impl TestName {
    /// Every spelling of the requirement this test validates.
    #[must_use]
    pub fn requirement_candidates(&self) -> Vec<String> {
        ids::requirement_candidates(self.level, &self.id)
    }

    /// Canonical ID of the requirement this test validates.
    #[must_use]
    pub fn requirement_id(&self) -> String {
        self.requirement_candidates()
            .into_iter()
            .next()
            .unwrap_or_default()
    }
}

/// Why a name failed the test grammar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NameError {
    InvalidFormat,
    /// Shape is right but the level is outside the closed set.
    UnknownLevel(String),
}

/// Parse a test filename. `extensions` lists the accepted extensions.
///
/// # Errors
///
/// Returns `NameError::UnknownLevel` when only the level is wrong, and
/// `NameError::InvalidFormat` for every other mismatch.
pub fn parse_test_name(file_name: &str, extensions: &[String]) -> Result<TestName, NameError> {
    let caps = TEST_NAME.captures(file_name).ok_or(NameError::InvalidFormat)?;

    let extension = caps[4].to_string();
    if !extensions.iter().any(|e| e.eq_ignore_ascii_case(&extension)) {
        return Err(NameError::InvalidFormat);
    }

    let raw_level = &caps[1];
    let level = TestLevel::ALL
        .into_iter()
        .find(|l| l.as_str() == raw_level)
        .ok_or_else(|| NameError::UnknownLevel(raw_level.to_string()))?;

    Ok(TestName {
        level,
        id: caps[2].to_string(),
        component: caps[3].to_string(),
        extension,
    })
}

/// A conforming requirement filename.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequirementName {
    pub kind: NodeKind,
    /// ID as spelled in the filename (`SW-REQ-001`, `SW-001`, `US-A1`).
    pub id: String,
    pub name: Option<String>,
}

#[must_use]
pub fn parse_requirement_name(file_name: &str) -> Option<RequirementName> {
    let kind_of = |prefix: &str| {
        if prefix == "SW" {
            NodeKind::SwReq
        } else {
            NodeKind::SysReq
        }
    };

    if let Some(caps) = REQ_LONG.captures(file_name) {
        return Some(RequirementName {
            kind: kind_of(&caps[1]),
            id: format!("{}-REQ-{}", &caps[1], &caps[2]),
            name: caps.get(3).map(|m| m.as_str().to_string()),
        });
    }
    if let Some(caps) = REQ_SHORT.captures(file_name) {
        return Some(RequirementName {
            kind: kind_of(&caps[1]),
            id: format!("{}-{}", &caps[1], &caps[2]),
            name: Some(caps[3].to_string()),
        });
    }
    USER_STORY.captures(file_name).map(|caps| RequirementName {
        kind: NodeKind::Us,
        id: format!("US-{}", &caps[1]),
        name: caps.get(2).map(|m| m.as_str().to_string()),
    })
}

/// Level implied by a directory name such as `unit` or `integration`.
#[must_use]
pub fn level_for_directory(dir: &str) -> Option<TestLevel> {
    match dir.to_ascii_lowercase().as_str() {
        "unit" | "ut" | "unit_tests" => Some(TestLevel::Ut),
        "integration" | "it" | "integration_tests" => Some(TestLevel::It),
        "system" | "st" | "system_tests" => Some(TestLevel::St),
        "acceptance" | "at" | "e2e" | "acceptance_tests" => Some(TestLevel::At),
        _ => None,
    }
}

/// A conforming name for a non-conforming test file.
///
/// The level comes from the nearest parent directory that names one (`unit`
/// gives `UT`), defaulting to `UT`; the ID is a placeholder `001`.
#[must_use]
pub fn suggest_test_name(path: &Path, extension: &str) -> String {
    let level = path
        .ancestors()
        .skip(1)
        .filter_map(|p| p.file_name())
        .find_map(|name| level_for_directory(&name.to_string_lossy()))
        .unwrap_or(TestLevel::Ut);

    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    format!("TC-{level}-001_{}.{extension}", component_slug(&stem))
}

/// A conforming name for a non-conforming requirement file.
#[must_use]
pub fn suggest_requirement_name(path: &Path) -> String {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    format!("SW-REQ-001_{}.md", component_slug(&stem))
}

/// `test_auth` -> `auth`, `AuthService-test` -> `authservice`.
fn component_slug(stem: &str) -> String {
    let lowered = stem.to_ascii_lowercase();
    let trimmed = lowered
        .strip_prefix("test_")
        .or_else(|| lowered.strip_prefix("test-"))
        .unwrap_or(&lowered);
    let trimmed = trimmed
        .strip_suffix("_test")
        .or_else(|| trimmed.strip_suffix("-test"))
        .unwrap_or(trimmed);

    let slug: String = trimmed
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    let slug = slug.trim_matches('_');
    if slug.is_empty() || slug == "test" {
        "component".to_string()
    } else {
        slug.to_string()
    }
}

/// Lowercase `snake_case` slug of a free-text title.
#[must_use]
pub fn slugify(text: &str) -> String {
    let slug: String = text
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '_'
            }
        })
        .collect();
    let parts: Vec<&str> = slug.split('_').filter(|p| !p.is_empty()).collect();
    if parts.is_empty() {
        "component".to_string()
    } else {
        parts.join("_")
    }
}
