//! Where requirements, tests, and code live for one project.

use std::path::{Component, Path, PathBuf};

use fdl_config::FdlConfig;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    pub root: PathBuf,
    pub requirements_dir: PathBuf,
    pub tests_dir: PathBuf,
    pub code_dir: PathBuf,
    /// Extensions test files may carry, without the dot. The first is used in
    /// expected patterns and suggested renames.
    pub test_extensions: Vec<String>,
}

impl Layout {
    #[must_use]
    pub fn from_config(root: &Path, config: &FdlConfig) -> Self {
        Self {
            root: root.to_path_buf(),
            requirements_dir: config.paths.requirements_dir(root),
            tests_dir: config.paths.tests_dir(root),
            code_dir: config.paths.code_dir(root),
            test_extensions: config
                .trace
                .test_extensions
                .iter()
                .map(|e| e.trim_start_matches('.').to_string())
                .collect(),
        }
    }

    /// Primary test extension.
    #[must_use]
    pub fn test_extension(&self) -> &str {
        self.test_extensions.first().map_or("py", String::as_str)
    }

    #[must_use]
    pub fn is_test_extension(&self, extension: &str) -> bool {
        self.test_extensions
            .iter()
            .any(|e| e.eq_ignore_ascii_case(extension))
    }

    /// `path` relative to the project root with `/` separators, for display
    /// and for matching references written in front-matter.
    #[must_use]
    pub fn display(&self, path: &Path) -> String {
        slash_path(path.strip_prefix(&self.root).unwrap_or(path))
    }

    /// Project-relative path of a requirement file named `file_name`.
    #[must_use]
    pub fn requirement_path(&self, file_name: &str) -> String {
        self.display(&self.requirements_dir.join(file_name))
    }

    /// Project-relative path of a test file named `file_name`.
    #[must_use]
    pub fn test_path(&self, file_name: &str) -> String {
        self.display(&self.tests_dir.join(file_name))
    }

    /// Project-relative path of a code file referenced as `reference`.
    #[must_use]
    pub fn code_path(&self, reference: &str) -> String {
        let reference = normalize_reference(reference);
        let code_prefix = self.display(&self.code_dir);
        if reference.starts_with(&format!("{code_prefix}/")) {
            reference
        } else {
            self.display(&self.code_dir.join(reference))
        }
    }
}

/// Render a path with `/` separators, dropping `.` components.
#[must_use]
pub fn slash_path(path: &Path) -> String {
    path.components()
        .filter_map(|c| match c {
            Component::CurDir => None,
            other => Some(other.as_os_str().to_string_lossy().into_owned()),
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Trim whitespace, leading `./`, and backslashes from a front-matter reference.
#[must_use]
pub fn normalize_reference(reference: &str) -> String {
    let unified = reference.trim().replace('\\', "/");
    let mut rest = unified.as_str();
    while let Some(stripped) = rest.strip_prefix("./") {
        rest = stripped;
    }
    rest.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout() -> Layout {
        Layout::from_config(Path::new("/repo"), &FdlConfig::default())
    }

    #[test]
    fn paths_are_project_relative() {
        let l = layout();
        assert_eq!(l.requirement_path("SW-REQ-001.md"), "requirements/SW-REQ-001.md");
        assert_eq!(l.test_path("TC-UT-001_auth.py"), "tests/TC-UT-001_auth.py");
        assert_eq!(l.display(Path::new("/repo/tests/unit/x.py")), "tests/unit/x.py");
    }

    #[test]
    fn code_paths_accept_both_forms() {
        let l = layout();
        assert_eq!(l.code_path("auth/service.py"), "src/auth/service.py");
        assert_eq!(l.code_path("./src/auth/service.py"), "src/auth/service.py");
    }

    #[test]
    fn extension_matching_ignores_case_and_dot() {
        let l = layout();
        assert_eq!(l.test_extension(), "py");
        assert!(l.is_test_extension("PY"));
        assert!(!l.is_test_extension("rs"));
    }
}
