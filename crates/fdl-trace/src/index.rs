//! In-memory index of requirement documents, test files, and code files.
//!
//! Every validator and the gap visualizer read artifacts through this type,
//! never straight from disk, so they can be exercised against records built
//! in memory.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use fdl_config::FdlConfig;
use fdl_core::enums::NodeKind;
use fdl_core::ids;
use regex::Regex;
use serde::Serialize;

use crate::error::TraceError;
use crate::frontmatter::{self, Frontmatter};
use crate::layout::{Layout, normalize_reference};
use crate::naming;
use crate::walk;

static REQUIREMENT_REF: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:US-[A-Za-z0-9]+|(?:SW|SYS)-REQ-[A-Za-z0-9]+|(?:SW|SYS)-\d+)\b")
        .expect("requirement reference regex is valid")
});

/// A requirement Markdown document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RequirementDoc {
    pub id: String,
    pub kind: NodeKind,
    pub path: PathBuf,
    pub title: Option<String>,
    pub traced_from: Vec<String>,
    pub traces_to: Vec<String>,
    pub refined_in: Vec<String>,
    pub tested_by: Vec<String>,
    pub has_frontmatter: bool,
    /// Set when a front-matter block exists but does not parse.
    pub frontmatter_error: Option<String>,
}

impl RequirementDoc {
    /// Parse a requirement document. The ID comes from the `id` field, else
    /// from the filename; `None` if neither yields a requirement ID.
    #[must_use]
    pub fn from_markdown(path: &Path, content: &str) -> Option<Self> {
        let file_name = path.file_name()?.to_string_lossy().into_owned();
        let from_name = naming::parse_requirement_name(&file_name);

        let (fields, has_frontmatter, frontmatter_error) = match Frontmatter::parse(content) {
            Frontmatter::Fields(fields) => (fields, true, None),
            Frontmatter::Missing => (BTreeMap::new(), false, None),
            Frontmatter::Invalid(error) => (BTreeMap::new(), false, Some(error)),
        };

        let id = frontmatter::string_field(&fields, "id")
            .or_else(|| from_name.as_ref().map(|n| n.id.clone()))?;
        let kind = ids::classify_reference(&id);
        if !kind.is_requirement() {
            tracing::warn!(path = %path.display(), %id, "front-matter id is not a requirement id");
            return None;
        }

        Some(Self {
            id,
            kind,
            path: path.to_path_buf(),
            title: frontmatter::string_field(&fields, "title")
                .or_else(|| markdown_heading(content)),
            traced_from: frontmatter::string_list(&fields, "traced_from"),
            traces_to: frontmatter::string_list(&fields, "traces_to"),
            refined_in: frontmatter::string_list(&fields, "refined_in"),
            tested_by: frontmatter::string_list(&fields, "tested_by"),
            has_frontmatter,
            frontmatter_error,
        })
    }

    /// Downstream references in traversal order for this requirement's kind.
    #[must_use]
    pub fn children(&self) -> Vec<&str> {
        let lists: [&[String]; 2] = match self.kind {
            NodeKind::Us => [self.traces_to.as_slice(), &[]],
            NodeKind::SysReq => [self.refined_in.as_slice(), self.traces_to.as_slice()],
            NodeKind::SwReq => [self.refined_in.as_slice(), self.tested_by.as_slice()],
            NodeKind::Code | NodeKind::Test => [&[], &[]],
        };
        lists
            .into_iter()
            .flatten()
            .map(String::as_str)
            .collect()
    }

    /// Whether `tested_by` names the test with this file name or path.
    #[must_use]
    pub fn lists_test(&self, test: &TestDoc) -> bool {
        self.tested_by.iter().any(|r| test.is_named_by(r))
    }
}

/// A test source file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TestDoc {
    pub path: PathBuf,
    pub file_name: String,
    /// Whether any `Validates:` or `Tests:` line exists.
    pub has_marker: bool,
    /// Requirement IDs named by the marker lines, in order of appearance.
    pub validates: Vec<String>,
}

impl TestDoc {
    #[must_use]
    pub fn from_source(path: &Path, content: &str) -> Self {
        let mut has_marker = false;
        let mut validates: Vec<String> = Vec::new();

        for line in content.lines() {
            let line = line
                .trim()
                .trim_start_matches(['#', '/', '*', '-', '"', '\''])
                .trim_start();
            let Some(rest) = line
                .strip_prefix("Validates:")
                .or_else(|| line.strip_prefix("Tests:"))
            else {
                continue;
            };
            has_marker = true;
            for m in REQUIREMENT_REF.find_iter(rest) {
                if !validates.iter().any(|v| v == m.as_str()) {
                    validates.push(m.as_str().to_string());
                }
            }
        }

        Self {
            path: path.to_path_buf(),
            file_name: path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default(),
            has_marker,
            validates,
        }
    }

    /// Whether a `tested_by` or CLI reference denotes this file. References
    /// are compared by basename.
    #[must_use]
    pub fn is_named_by(&self, reference: &str) -> bool {
        let reference = normalize_reference(reference);
        let base = reference.rsplit('/').next().unwrap_or(&reference);
        !base.is_empty() && base == self.file_name
    }

    /// Whether the marker names `requirement_id` in any spelling.
    #[must_use]
    pub fn validates_requirement(&self, requirement_id: &str) -> bool {
        self.validates
            .iter()
            .any(|v| ids::same_requirement(v, requirement_id))
    }
}

#[derive(Debug, Clone)]
pub struct ArtifactIndex {
    layout: Layout,
    requirements: BTreeMap<String, RequirementDoc>,
    tests: Vec<TestDoc>,
    /// Project-relative code paths.
    code_files: BTreeSet<String>,
}

impl ArtifactIndex {
    /// Scan the requirements, tests, and code directories of a project.
    ///
    /// Unreadable files and directories are skipped with a warning.
    ///
    /// # Errors
    ///
    /// Returns `TraceError` if the exclude globs do not compile.
    pub fn scan(root: &Path, config: &FdlConfig) -> Result<Self, TraceError> {
        let layout = Layout::from_config(root, config);
        let exclude = config.trace.exclude_set()?;

        let mut requirements = Vec::new();
        for path in walk::files_under(&layout.requirements_dir, root, &exclude, |p| {
            walk::has_extension(p, "md")
        }) {
            let Some(content) = read(&path) else { continue };
            match RequirementDoc::from_markdown(&path, &content) {
                Some(doc) => requirements.push(doc),
                None => tracing::debug!(path = %path.display(), "not a requirement document"),
            }
        }

        let mut tests = Vec::new();
        for path in test_files(&layout.tests_dir, &layout, config)? {
            let Some(content) = read(&path) else { continue };
            tests.push(TestDoc::from_source(&path, &content));
        }

        let code = walk::files_under(&layout.code_dir, root, &exclude, |_| true)
            .into_iter()
            .map(|p| layout.display(&p))
            .collect();

        tracing::debug!(
            requirements = requirements.len(),
            tests = tests.len(),
            "artifact index built"
        );
        Ok(Self::from_records(layout, requirements, tests, code))
    }

    /// Build an index from already-parsed records.
    ///
    /// When two requirements share an ID the first (in path order) wins.
    #[must_use]
    pub fn from_records(
        layout: Layout,
        mut requirements: Vec<RequirementDoc>,
        mut tests: Vec<TestDoc>,
        code_files: Vec<String>,
    ) -> Self {
        requirements.sort_by(|a, b| a.path.cmp(&b.path));
        tests.sort_by(|a, b| a.path.cmp(&b.path));

        let mut by_id: BTreeMap<String, RequirementDoc> = BTreeMap::new();
        for doc in requirements {
            if let Some(existing) = by_id.get(&doc.id) {
                tracing::warn!(
                    id = %doc.id,
                    kept = %existing.path.display(),
                    ignored = %doc.path.display(),
                    "duplicate requirement id"
                );
                continue;
            }
            by_id.insert(doc.id.clone(), doc);
        }

        Self {
            layout,
            requirements: by_id,
            tests,
            code_files: code_files
                .iter()
                .map(|c| normalize_reference(c))
                .collect(),
        }
    }

    #[must_use]
    pub const fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Requirements in ID order.
    pub fn requirements(&self) -> impl Iterator<Item = &RequirementDoc> {
        self.requirements.values()
    }

    /// Tests in path order.
    #[must_use]
    pub fn tests(&self) -> &[TestDoc] {
        &self.tests
    }

    /// Look up a requirement, accepting long and short ID spellings.
    #[must_use]
    pub fn requirement(&self, id: &str) -> Option<&RequirementDoc> {
        let id = id.trim();
        self.requirements.get(id).or_else(|| {
            self.requirements
                .values()
                .find(|doc| ids::same_requirement(&doc.id, id))
        })
    }

    /// Whether any spelling in `candidates` is indexed.
    #[must_use]
    pub fn has_any_requirement(&self, candidates: &[String]) -> bool {
        candidates.iter().any(|c| self.requirement(c).is_some())
    }

    /// Resolve a test reference (basename, tests-relative, or project-relative
    /// path). An exact path match wins over a basename match.
    #[must_use]
    pub fn find_test(&self, reference: &str) -> Option<&TestDoc> {
        let reference = normalize_reference(reference);
        let tests_prefix = self.layout.display(&self.layout.tests_dir);
        self.tests
            .iter()
            .find(|t| {
                let rel = self.layout.display(&t.path);
                rel == reference || rel == format!("{tests_prefix}/{reference}")
            })
            .or_else(|| self.tests.iter().find(|t| t.is_named_by(&reference)))
    }

    /// Whether a code reference names an indexed code file.
    #[must_use]
    pub fn code_exists(&self, reference: &str) -> bool {
        self.code_files.contains(&self.layout.code_path(reference))
    }
}

/// Files under `dir` with a configured test extension, minus exclusions.
///
/// # Errors
///
/// Returns `TraceError` if the exclude globs do not compile.
pub fn test_files(dir: &Path, layout: &Layout, config: &FdlConfig) -> Result<Vec<PathBuf>, TraceError> {
    let exclude = config.trace.exclude_set()?;
    Ok(walk::files_under(dir, &layout.root, &exclude, |p| {
        p.extension()
            .is_some_and(|e| layout.is_test_extension(&e.to_string_lossy()))
    }))
}

/// File contents with invalid UTF-8 replaced; markers and front-matter keys
/// are ASCII.
fn read(path: &Path) -> Option<String> {
    match std::fs::read(path) {
        Ok(bytes) => Some(String::from_utf8_lossy(&bytes).into_owned()),
        Err(error) => {
            tracing::warn!(path = %path.display(), %error, "skipping unreadable file");
            None
        }
    }
}

fn markdown_heading(content: &str) -> Option<String> {
    content
        .lines()
        .find_map(|l| l.strip_prefix("# "))
        .map(|h| h.trim().to_string())
        .filter(|h| !h.is_empty())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn layout() -> Layout {
        Layout::from_config(Path::new("/repo"), &FdlConfig::default())
    }

    #[test]
    fn requirement_from_frontmatter() {
        let doc = RequirementDoc::from_markdown(
            Path::new("/repo/requirements/sw/SW-REQ-001_auth.md"),
            "---\nid: SW-REQ-001\ntitle: Auth\nrefined_in: [auth.py]\ntested_by:\n  - TC-UT-001_auth.py\n---\n",
        )
        .unwrap();
        assert_eq!(doc.kind, NodeKind::SwReq);
        assert_eq!(doc.title.as_deref(), Some("Auth"));
        assert_eq!(doc.children(), vec!["auth.py", "TC-UT-001_auth.py"]);
        assert!(doc.has_frontmatter);
    }

    #[test]
    fn requirement_without_frontmatter_takes_id_from_name() {
        let doc = RequirementDoc::from_markdown(
            Path::new("/repo/requirements/SW-REQ-086.md"),
            "# Parser\n\nBody.\n",
        )
        .unwrap();
        assert_eq!(doc.id, "SW-REQ-086");
        assert_eq!(doc.title.as_deref(), Some("Parser"));
        assert!(!doc.has_frontmatter);
        assert!(doc.tested_by.is_empty());
    }

    #[test]
    fn non_requirement_markdown_is_ignored() {
        assert!(RequirementDoc::from_markdown(Path::new("/repo/requirements/README.md"), "# Hi").is_none());
    }

    #[test]
    fn test_markers_in_docstrings_and_comments() {
        let doc = TestDoc::from_source(
            Path::new("/repo/tests/unit/TC-UT-001_auth.py"),
            "\"\"\"\nTC-UT-001: auth\n\nValidates: SW-REQ-001, SW-REQ-002\n\"\"\"\n# Tests: SW-REQ-001\n",
        );
        assert!(doc.has_marker);
        assert_eq!(doc.validates, vec!["SW-REQ-001", "SW-REQ-002"]);
        assert!(doc.validates_requirement("SW-001"));
        assert!(!doc.validates_requirement("SW-REQ-003"));
    }

    #[test]
    fn free_text_marker_names_nothing() {
        let doc = TestDoc::from_source(
            Path::new("/repo/tests/TC-UT-001_verification.py"),
            "Validates: Package installation and CLI commands work correctly\n",
        );
        assert!(doc.has_marker);
        assert!(doc.validates.is_empty());
    }

    #[test]
    fn lookups_accept_spellings_and_paths() {
        let req = RequirementDoc::from_markdown(
            Path::new("/repo/requirements/SW-001_auth.md"),
            "---\ntested_by: [unit/TC-UT-001_auth.py]\n---\n",
        )
        .unwrap();
        let test = TestDoc::from_source(Path::new("/repo/tests/unit/TC-UT-001_auth.py"), "Validates: SW-001\n");
        let index = ArtifactIndex::from_records(
            layout(),
            vec![req],
            vec![test],
            vec!["src/auth.py".to_string()],
        );

        assert_eq!(index.requirement("SW-REQ-001").map(|r| r.id.as_str()), Some("SW-001"));
        assert!(index.find_test("TC-UT-001_auth.py").is_some());
        assert!(index.find_test("unit/TC-UT-001_auth.py").is_some());
        assert!(index.find_test("tests/unit/TC-UT-001_auth.py").is_some());
        assert!(index.find_test("TC-UT-002_auth.py").is_none());
        assert!(index.code_exists("auth.py"));
        assert!(index.code_exists("src/auth.py"));
        assert!(!index.code_exists("db.py"));

        let req = index.requirement("SW-001").unwrap();
        assert!(req.lists_test(&index.tests()[0]));
    }

    #[test]
    fn duplicate_ids_keep_first_path() {
        let a = RequirementDoc::from_markdown(Path::new("/repo/requirements/a/SW-REQ-001.md"), "# A").unwrap();
        let b = RequirementDoc::from_markdown(Path::new("/repo/requirements/b/SW-REQ-001.md"), "# B").unwrap();
        let index = ArtifactIndex::from_records(layout(), vec![b, a], vec![], vec![]);
        assert_eq!(index.requirements().count(), 1);
        assert_eq!(index.requirement("SW-REQ-001").and_then(|r| r.title.as_deref()), Some("A"));
    }
}
