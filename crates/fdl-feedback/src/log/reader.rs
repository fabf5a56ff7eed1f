//! Tolerant bulk loading.

use fdl_core::feedback::FeedbackEntry;

use super::FeedbackLog;
use crate::error::FeedbackError;

/// Entries read from a log, plus the 1-based line numbers that were skipped.
#[derive(Debug, Clone, Default)]
pub struct LoadedLog {
    pub entries: Vec<FeedbackEntry>,
    pub skipped_lines: Vec<usize>,
}

impl FeedbackLog {
    /// Read every well-formed entry in log order.
    ///
    /// A missing log is an empty log. Blank lines are ignored; lines that do
    /// not parse or fail validation are skipped with a warning.
    ///
    /// # Errors
    ///
    /// Returns `FeedbackError::Io` if the file exists but cannot be read.
    pub fn load(&self) -> Result<LoadedLog, FeedbackError> {
        if !self.path.exists() {
            return Ok(LoadedLog::default());
        }

        let content =
            std::fs::read_to_string(&self.path).map_err(|e| FeedbackError::io(&self.path, e))?;

        let mut loaded = LoadedLog::default();
        for (line_idx, line) in content.lines().enumerate() {
            let line_no = line_idx + 1;
            let trimmed = line.trim().trim_start_matches('\u{feff}');
            if trimmed.is_empty() {
                continue;
            }

            let parsed = serde_json::from_str::<FeedbackEntry>(trimmed)
                .map_err(|error| error.to_string())
                .and_then(|entry| {
                    entry
                        .validate()
                        .map(|()| entry)
                        .map_err(|error| error.to_string())
                });

            match parsed {
                Ok(entry) => loaded.entries.push(entry),
                Err(error) => {
                    tracing::warn!(
                        path = %self.path.display(),
                        line = line_no,
                        %error,
                        "skipping malformed feedback line"
                    );
                    loaded.skipped_lines.push(line_no);
                }
            }
        }

        Ok(loaded)
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    const GOOD: &str = r#"{"timestamp":"2026-02-08T12:00:00Z","session_id":"s20260208","type":"mistake","context":"wrong prefix","feedback":"use TC-UT","category":"Naming","severity":"medium"}"#;

    #[test]
    fn missing_log_is_empty() {
        let tmp = TempDir::new().unwrap();
        let loaded = FeedbackLog::new(tmp.path().join("absent.jsonl"))
            .load()
            .unwrap();
        assert!(loaded.entries.is_empty());
        assert!(loaded.skipped_lines.is_empty());
    }

    #[test]
    fn skips_blank_and_malformed_lines() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("feedback.jsonl");
        let blank_context = GOOD.replace("wrong prefix", " ");
        std::fs::write(
            &path,
            format!("{GOOD}\n\n{{not json\n{blank_context}\n{GOOD}\n"),
        )
        .unwrap();

        let loaded = FeedbackLog::new(&path).load().unwrap();
        assert_eq!(loaded.entries.len(), 2);
        assert_eq!(loaded.skipped_lines, vec![3, 4]);
    }
}
