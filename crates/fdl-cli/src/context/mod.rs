mod project_root;

use std::path::{Path, PathBuf};

use anyhow::Context;
use fdl_config::FdlConfig;
use fdl_trace::ArtifactIndex;

pub use project_root::find_project_root;

/// Resolved project state shared by command handlers.
pub struct AppContext {
    pub project_root: PathBuf,
    pub config: FdlConfig,
}

impl AppContext {
    pub const fn new(project_root: PathBuf, config: FdlConfig) -> Self {
        Self {
            project_root,
            config,
        }
    }

    pub fn root(&self) -> &Path {
        &self.project_root
    }

    /// Scan the artifact repository, optionally with directory overrides.
    pub fn scan(
        &self,
        tests_dir: Option<&str>,
        requirements_dir: Option<&str>,
    ) -> anyhow::Result<ArtifactIndex> {
        let config = self.config_with_dirs(tests_dir, requirements_dir);
        ArtifactIndex::scan(&self.project_root, &config).with_context(|| {
            format!(
                "failed to scan artifacts under {}",
                self.project_root.display()
            )
        })
    }

    /// Copy of the config with `--tests-dir` / `--requirements-dir` applied.
    pub fn config_with_dirs(
        &self,
        tests_dir: Option<&str>,
        requirements_dir: Option<&str>,
    ) -> FdlConfig {
        let mut config = self.config.clone();
        if let Some(dir) = tests_dir {
            config.paths.tests_dir = PathBuf::from(dir);
        }
        if let Some(dir) = requirements_dir {
            config.paths.requirements_dir = PathBuf::from(dir);
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use fdl_config::FdlConfig;

    use super::AppContext;

    #[test]
    fn directory_overrides_replace_configured_paths() {
        let ctx = AppContext::new(PathBuf::from("/repo"), FdlConfig::default());
        let config = ctx.config_with_dirs(Some("qa"), None);
        assert_eq!(config.paths.tests_dir, PathBuf::from("qa"));
        assert_eq!(config.paths.requirements_dir, PathBuf::from("requirements"));
    }
}
