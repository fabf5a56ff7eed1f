//! Append-only JSONL feedback log.
//!
//! One [`FeedbackEntry`](fdl_core::feedback::FeedbackEntry) per line. The log is
//! only ever appended to; analysis reads it in bulk and never rewrites it.

mod check;
mod reader;
mod writer;

use std::path::{Path, PathBuf};

pub use check::{LogCheckReport, LogLineError};
pub use reader::LoadedLog;

/// Handle on a feedback log file.
#[derive(Debug, Clone)]
pub struct FeedbackLog {
    path: PathBuf,
}

impl FeedbackLog {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the log file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}
