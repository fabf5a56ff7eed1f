//! Log appends.
//!
//! Each append opens the file in append mode, writes exactly one line, flushes,
//! and closes (`serde_jsonlines::append_json_lines`). Concurrent writers from
//! separate processes therefore interleave whole lines; their relative order is
//! unspecified, which analysis does not depend on.

use chrono::{DateTime, Utc};
use fdl_core::feedback::{FeedbackEntry, NewFeedback};

use super::FeedbackLog;
use crate::error::FeedbackError;

impl FeedbackLog {
    /// Validate and append one entry.
    ///
    /// # Errors
    ///
    /// Returns `FeedbackError::Core` if the entry is malformed (nothing is
    /// written), or `FeedbackError::Io` if the file cannot be appended to.
    pub fn append(&self, entry: &FeedbackEntry) -> Result<(), FeedbackError> {
        entry.validate()?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| FeedbackError::io(parent, e))?;
        }

        serde_jsonlines::append_json_lines(&self.path, [entry])
            .map_err(|e| FeedbackError::io(&self.path, e))?;

        tracing::debug!(
            path = %self.path.display(),
            category = %entry.category,
            severity = %entry.severity,
            "feedback entry appended"
        );
        Ok(())
    }

    /// Stamp a new entry at `now` and append it.
    ///
    /// # Errors
    ///
    /// See [`FeedbackLog::append`].
    pub fn record(
        &self,
        input: NewFeedback,
        now: DateTime<Utc>,
    ) -> Result<FeedbackEntry, FeedbackError> {
        let entry = FeedbackEntry::record(input, now)?;
        self.append(&entry)?;
        Ok(entry)
    }
}
