//! Feedback log and pattern analysis configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Default minimum group size for a pattern to be reported.
const fn default_threshold() -> usize {
    3
}

fn default_log_path() -> PathBuf {
    PathBuf::from(".fdl/feedback.jsonl")
}

fn default_report_path() -> PathBuf {
    PathBuf::from("skill_update_suggestions.md")
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FeedbackConfig {
    /// Append-only JSONL feedback log.
    #[serde(default = "default_log_path")]
    pub log_path: PathBuf,

    /// Markdown report written by `fdl analyze` (overwritten on each run).
    #[serde(default = "default_report_path")]
    pub report_path: PathBuf,

    /// Minimum occurrences before a group is reported.
    #[serde(default = "default_threshold")]
    pub threshold: usize,
}

impl Default for FeedbackConfig {
    fn default() -> Self {
        Self {
            log_path: default_log_path(),
            report_path: default_report_path(),
            threshold: default_threshold(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_correct() {
        let config = FeedbackConfig::default();
        assert_eq!(config.threshold, 3);
        assert_eq!(config.log_path, PathBuf::from(".fdl/feedback.jsonl"));
        assert_eq!(config.report_path, PathBuf::from("skill_update_suggestions.md"));
    }
}
