//! Feedback log error types.

use std::path::PathBuf;

use fdl_core::errors::CoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FeedbackError {
    /// The entry failed validation; nothing was written.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Reading or writing a log or report file failed.
    #[error("io error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Serializing a report failed.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl FeedbackError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
