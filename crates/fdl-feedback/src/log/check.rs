use fdl_schema::SchemaRegistry;
use serde::Serialize;

use super::FeedbackLog;
use crate::error::FeedbackError;

#[derive(Debug, Clone, Serialize)]
pub struct LogLineError {
    pub line: usize,
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct LogCheckReport {
    pub path: String,
    pub lines_checked: usize,
    pub errors: Vec<LogLineError>,
}

impl LogCheckReport {
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

impl FeedbackLog {
    /// Validate every non-blank line against the `feedback_entry` schema.
    ///
    /// # Errors
    ///
    /// Returns `FeedbackError::Io` if the file exists but cannot be read.
    pub fn check(&self, schema: &SchemaRegistry) -> Result<LogCheckReport, FeedbackError> {
        let mut report = LogCheckReport {
            path: self.path.display().to_string(),
            lines_checked: 0,
            errors: Vec::new(),
        };
        if !self.path.exists() {
            return Ok(report);
        }

        let content =
            std::fs::read_to_string(&self.path).map_err(|e| FeedbackError::io(&self.path, e))?;

        for (line_idx, line) in content.lines().enumerate() {
            let line_no = line_idx + 1;
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            report.lines_checked += 1;

            if trimmed.starts_with('\u{feff}') {
                report.errors.push(LogLineError {
                    line: line_no,
                    message: "BOM detected".to_string(),
                });
                continue;
            }

            if trimmed.starts_with("<<<<<<<")
                || trimmed.starts_with("=======")
                || trimmed.starts_with(">>>>>>>")
            {
                report.errors.push(LogLineError {
                    line: line_no,
                    message: "git conflict marker detected".to_string(),
                });
                continue;
            }

            let value: serde_json::Value = match serde_json::from_str(trimmed) {
                Ok(value) => value,
                Err(error) => {
                    report.errors.push(LogLineError {
                        line: line_no,
                        message: format!("invalid JSON: {error}"),
                    });
                    continue;
                }
            };

            if let Err(error) = schema.validate("feedback_entry", &value) {
                report.errors.push(LogLineError {
                    line: line_no,
                    message: format!("schema validation failed: {error}"),
                });
            }
        }

        Ok(report)
    }
}
