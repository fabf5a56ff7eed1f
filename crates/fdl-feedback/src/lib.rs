//! # fdl-feedback
//!
//! Feedback log and pattern detector.
//!
//! - [`log`]: append-only JSONL log of [`FeedbackEntry`](fdl_core::feedback::FeedbackEntry)
//!   records, tolerant loading, and schema checking
//! - [`detectors`]: built-in catalog of known mistake patterns
//! - [`analyzer`]: grouping by category and pattern key, threshold filtering,
//!   deterministic ranking
//! - [`report`]: Markdown rendering of an analysis run

pub mod analyzer;
pub mod detectors;
pub mod error;
pub mod log;
pub mod report;

pub use analyzer::{AnalyzeOptions, PatternReport, PatternSuggestion, ReportPeriod, analyze};
pub use error::FeedbackError;
pub use log::{FeedbackLog, LoadedLog, LogCheckReport, LogLineError};
pub use report::{render_markdown, write_report};
