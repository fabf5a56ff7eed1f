//! Cross-cutting error types for fdl.
//!
//! This module defines errors that can originate from any crate in the system.
//! Component errors (`FeedbackError`, `TraceError`, `GapError`) wrap these in
//! their respective crates; `fdl-cli` converges everything into `anyhow`.

use thiserror::Error;

/// Errors that can be raised by any fdl crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A record or filename failed validation.
    #[error("Validation error: {field}: {reason}")]
    Validation { field: String, reason: String },

    /// A referenced requirement or test file is absent.
    #[error("Not found: {kind} {id}")]
    NotFound { kind: String, id: String },

    /// The requirement graph loops back onto an ancestor.
    #[error("Circular reference: {}", path.join(" -> "))]
    CircularReference { path: Vec<String> },

    /// An unknown category, level code, or other closed-set value.
    #[error("Configuration error: unknown {field} '{value}' (expected one of: {expected})")]
    Configuration {
        field: String,
        value: String,
        expected: String,
    },

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CoreError {
    /// Build a `Validation` error.
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Build a `Configuration` error for an unrecognised closed-set value.
    pub fn unknown(field: impl Into<String>, value: impl Into<String>, expected: &[&str]) -> Self {
        Self::Configuration {
            field: field.into(),
            value: value.into(),
            expected: expected.join(", "),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn circular_reference_names_the_cycle() {
        let err = CoreError::CircularReference {
            path: vec!["SW-REQ-001".into(), "SW-REQ-002".into(), "SW-REQ-001".into()],
        };
        assert_eq!(
            err.to_string(),
            "Circular reference: SW-REQ-001 -> SW-REQ-002 -> SW-REQ-001"
        );
    }

    #[test]
    fn unknown_lists_expected_values() {
        let err = CoreError::unknown("level", "XT", &["UT", "IT"]);
        assert_eq!(
            err.to_string(),
            "Configuration error: unknown level 'XT' (expected one of: UT, IT)"
        );
    }
}
