//! Feedback log record.
//!
//! One `FeedbackEntry` is serialized per line of the append-only feedback log.
//! Entries are immutable once written; their identity is their position.
//!
//! `session_id` was added after the first log format shipped, so lines
//! without it deserialize with an empty session. `timestamp` stays a string
//! because older lines carry naive local timestamps without an offset; use
//! [`FeedbackEntry::recorded_at`] to get a comparable instant.

use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{Category, FeedbackType, Severity};
use crate::errors::CoreError;

/// A single correction recorded in the feedback log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct FeedbackEntry {
    /// ISO 8601 timestamp of when the entry was logged.
    pub timestamp: String,

    /// Day-scoped session ID (`s{YYYYMMDD}`).
    #[serde(default)]
    pub session_id: String,

    /// What kind of correction this was.
    #[serde(rename = "type")]
    pub kind: FeedbackType,

    /// What went wrong.
    pub context: String,

    /// The correction applied.
    pub feedback: String,

    pub category: Category,

    #[serde(default)]
    pub severity: Severity,
}

/// Caller-supplied fields of a new feedback entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewFeedback {
    pub kind: FeedbackType,
    pub context: String,
    pub feedback: String,
    pub category: Category,
    pub severity: Severity,
}

impl FeedbackEntry {
    /// Stamp and validate a new entry.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` if `context` or `feedback` is blank.
    pub fn record(input: NewFeedback, now: DateTime<Utc>) -> Result<Self, CoreError> {
        let entry = Self {
            timestamp: now.to_rfc3339_opts(SecondsFormat::Secs, true),
            session_id: session_id_for(now),
            kind: input.kind,
            context: input.context.trim().to_string(),
            feedback: input.feedback.trim().to_string(),
            category: input.category,
            severity: input.severity,
        };
        entry.validate()?;
        Ok(entry)
    }

    /// Check that every required free-text field is non-empty.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` naming the first empty field.
    pub fn validate(&self) -> Result<(), CoreError> {
        for (field, value) in [
            ("timestamp", &self.timestamp),
            ("context", &self.context),
            ("feedback", &self.feedback),
        ] {
            if value.trim().is_empty() {
                return Err(CoreError::validation(field, "must not be empty"));
            }
        }
        Ok(())
    }

    /// Parsed `timestamp`, or `None` if it is not a recognised ISO 8601 form.
    #[must_use]
    pub fn recorded_at(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(&self.timestamp)
    }
}

/// Session ID for the day of `now`.
#[must_use]
pub fn session_id_for(now: DateTime<Utc>) -> String {
    format!("s{}", now.format("%Y%m%d"))
}

/// Parse an RFC 3339 timestamp, falling back to a naive timestamp read as UTC.
#[must_use]
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .map(|naive| naive.and_utc())
}
