//! # fdl-config
//!
//! Layered configuration loading for fdl using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`FDL_*` prefix, `__` as separator)
//! 2. Project-level `<project>/.fdl/config.toml`
//! 3. User-level `~/.config/fdl/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `FDL_FEEDBACK__THRESHOLD` -> `feedback.threshold`,
//! `FDL_PATHS__TESTS_DIR` -> `paths.tests_dir`, etc.
//! The `__` (double underscore) separates nested config sections.
//!
//! # Usage
//!
//! ```no_run
//! use std::path::Path;
//! use fdl_config::FdlConfig;
//!
//! let config = FdlConfig::load_with_dotenv(Path::new(".")).expect("config");
//! println!("threshold: {}", config.feedback.threshold);
//! ```

mod error;
mod feedback;
mod gap;
mod paths;
mod trace;

pub use error::ConfigError;
pub use feedback::FeedbackConfig;
pub use gap::GapConfig;
pub use paths::{PathsConfig, resolve};
pub use trace::TraceConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Directory marking an fdl project root.
pub const PROJECT_DIR: &str = ".fdl";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct FdlConfig {
    #[serde(default)]
    pub paths: PathsConfig,
    #[serde(default)]
    pub feedback: FeedbackConfig,
    #[serde(default)]
    pub trace: TraceConfig,
    #[serde(default)]
    pub gap: GapConfig,
}

impl FdlConfig {
    /// Load configuration for the project rooted at `project_root`.
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] if you need
    /// `.env` file loading.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a source fails to parse or a value is invalid.
    pub fn load(project_root: &Path) -> Result<Self, ConfigError> {
        let config: Self = Self::figment(project_root).extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration with `.env` file support.
    ///
    /// Loads `<project>/.env` (if present) before building the figment.
    /// Variables already set in the process environment are not overridden.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Dotenv` if the `.env` file cannot be read or
    /// parsed, otherwise as [`Self::load`].
    pub fn load_with_dotenv(project_root: &Path) -> Result<Self, ConfigError> {
        let env_path = project_root.join(".env");
        if env_path.is_file() {
            dotenvy::from_path(&env_path).map_err(|source| ConfigError::Dotenv {
                path: env_path.clone(),
                source,
            })?;
        }
        Self::load(project_root)
    }

    /// Build the figment provider chain.
    ///
    /// This is public so tests can inspect the figment directly or add
    /// additional providers on top.
    #[must_use]
    pub fn figment(project_root: &Path) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        // Layer 2: Project-local config
        let local_path = Self::project_config_path(project_root);
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Environment variables (highest priority)
        figment.merge(Env::prefixed("FDL_").split("__"))
    }

    /// Reject values that would make a command meaningless.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` for a zero threshold, a zero depth
    /// limit, an empty extension list, or an exclude glob that does not compile.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.feedback.threshold == 0 {
            return Err(ConfigError::InvalidValue {
                field: "feedback.threshold".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        if self.gap.max_depth == 0 {
            return Err(ConfigError::InvalidValue {
                field: "gap.max_depth".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        if self.trace.test_extensions.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "trace.test_extensions".to_string(),
                reason: "must list at least one extension".to_string(),
            });
        }
        self.trace.exclude_set()?;
        Ok(())
    }

    /// Feedback log path resolved against the project root.
    #[must_use]
    pub fn log_path(&self, project_root: &Path) -> PathBuf {
        resolve(project_root, &self.feedback.log_path)
    }

    /// Report path resolved against the project root.
    #[must_use]
    pub fn report_path(&self, project_root: &Path) -> PathBuf {
        resolve(project_root, &self.feedback.report_path)
    }

    /// Path to the project-local config file.
    #[must_use]
    pub fn project_config_path(project_root: &Path) -> PathBuf {
        project_root.join(PROJECT_DIR).join("config.toml")
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("fdl").join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = FdlConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.feedback.threshold, 3);
        assert_eq!(config.gap.max_depth, 16);
        assert_eq!(config.trace.test_extensions, vec!["py"]);
    }

    #[test]
    fn zero_threshold_is_rejected() {
        let mut config = FdlConfig::default();
        config.feedback.threshold = 0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("feedback.threshold"));
    }

    #[test]
    fn zero_depth_is_rejected() {
        let mut config = FdlConfig::default();
        config.gap.max_depth = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn log_and_report_paths_resolve_against_root() {
        let config = FdlConfig::default();
        let root = Path::new("/repo");
        assert_eq!(
            config.log_path(root),
            PathBuf::from("/repo/.fdl/feedback.jsonl")
        );
        assert_eq!(
            config.report_path(root),
            PathBuf::from("/repo/skill_update_suggestions.md")
        );
    }
}
