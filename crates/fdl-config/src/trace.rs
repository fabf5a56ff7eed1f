//! Naming and link validation configuration.

use globset::{Glob, GlobSet, GlobSetBuilder};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

fn default_test_extensions() -> Vec<String> {
    vec!["py".to_string()]
}

fn default_exclude() -> Vec<String> {
    vec!["**/__init__.py".to_string(), "**/conftest.py".to_string()]
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TraceConfig {
    /// File extensions treated as test files during discovery.
    #[serde(default = "default_test_extensions")]
    pub test_extensions: Vec<String>,

    /// Glob patterns (relative to the scanned directory) skipped during discovery.
    #[serde(default = "default_exclude")]
    pub exclude: Vec<String>,
}

impl Default for TraceConfig {
    fn default() -> Self {
        Self {
            test_extensions: default_test_extensions(),
            exclude: default_exclude(),
        }
    }
}

impl TraceConfig {
    /// Compile `exclude` into a matcher.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` naming the first pattern that fails
    /// to compile.
    pub fn exclude_set(&self) -> Result<GlobSet, ConfigError> {
        let mut builder = GlobSetBuilder::new();
        for pattern in &self.exclude {
            let glob = Glob::new(pattern).map_err(|error| ConfigError::InvalidValue {
                field: "trace.exclude".to_string(),
                reason: format!("'{pattern}': {error}"),
            })?;
            builder.add(glob);
        }
        builder.build().map_err(|error| ConfigError::InvalidValue {
            field: "trace.exclude".to_string(),
            reason: error.to_string(),
        })
    }

    /// Whether `extension` (without the dot) marks a test file.
    #[must_use]
    pub fn is_test_extension(&self, extension: &str) -> bool {
        self.test_extensions
            .iter()
            .any(|candidate| candidate.trim_start_matches('.').eq_ignore_ascii_case(extension))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_excludes_match_python_scaffolding() {
        let set = TraceConfig::default().exclude_set().unwrap();
        assert!(set.is_match("unit/__init__.py"));
        assert!(set.is_match("conftest.py"));
        assert!(!set.is_match("unit/TC-UT-001_auth.py"));
    }

    #[test]
    fn invalid_glob_is_reported() {
        let config = TraceConfig {
            exclude: vec!["[unclosed".to_string()],
            ..TraceConfig::default()
        };
        let err = config.exclude_set().unwrap_err();
        assert!(err.to_string().contains("trace.exclude"));
    }

    #[test]
    fn extensions_match_with_or_without_dot() {
        let config = TraceConfig {
            test_extensions: vec![".rs".to_string(), "py".to_string()],
            ..TraceConfig::default()
        };
        assert!(config.is_test_extension("rs"));
        assert!(config.is_test_extension("PY"));
        assert!(!config.is_test_extension("md"));
    }
}
