//! Artifact repository layout.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PathsConfig {
    /// Directory holding requirement Markdown files (`US-*`, `SYS-REQ-*`, `SW-REQ-*`).
    #[serde(default = "default_requirements_dir")]
    pub requirements_dir: PathBuf,

    /// Directory holding `TC-*` test files.
    #[serde(default = "default_tests_dir")]
    pub tests_dir: PathBuf,

    /// Directory that `refined_in` code paths are relative to.
    #[serde(default = "default_code_dir")]
    pub code_dir: PathBuf,
}

fn default_requirements_dir() -> PathBuf {
    PathBuf::from("requirements")
}

fn default_tests_dir() -> PathBuf {
    PathBuf::from("tests")
}

fn default_code_dir() -> PathBuf {
    PathBuf::from("src")
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            requirements_dir: default_requirements_dir(),
            tests_dir: default_tests_dir(),
            code_dir: default_code_dir(),
        }
    }
}

impl PathsConfig {
    /// Requirements directory resolved against the project root.
    #[must_use]
    pub fn requirements_dir(&self, root: &Path) -> PathBuf {
        resolve(root, &self.requirements_dir)
    }

    /// Tests directory resolved against the project root.
    #[must_use]
    pub fn tests_dir(&self, root: &Path) -> PathBuf {
        resolve(root, &self.tests_dir)
    }

    /// Code directory resolved against the project root.
    #[must_use]
    pub fn code_dir(&self, root: &Path) -> PathBuf {
        resolve(root, &self.code_dir)
    }
}

/// Resolve `path` against `root` unless it is already absolute.
#[must_use]
pub fn resolve(root: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    }
}
