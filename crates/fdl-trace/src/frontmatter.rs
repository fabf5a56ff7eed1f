//! YAML front-matter extraction.
//!
//! Front-matter is converted to `serde_json::Value` so downstream code handles
//! one value model regardless of the YAML scalar types used.

use std::collections::BTreeMap;

use serde_json::Value;

/// Outcome of looking for a front-matter block.
#[derive(Debug, Clone, PartialEq)]
pub enum Frontmatter {
    /// The document does not open with `---`, or the block is empty.
    Missing,
    /// The block exists but is not a YAML mapping.
    Invalid(String),
    Fields(BTreeMap<String, Value>),
}

impl Frontmatter {
    #[must_use]
    pub fn parse(input: &str) -> Self {
        let mut lines = input.lines();
        let Some(first) = lines.next() else {
            return Self::Missing;
        };
        if first.trim_start_matches('\u{feff}').trim_end() != "---" {
            return Self::Missing;
        }

        let mut yaml_lines: Vec<&str> = Vec::new();
        let mut closed = false;
        for line in lines {
            let trimmed = line.trim_end();
            if trimmed == "---" || trimmed == "..." {
                closed = true;
                break;
            }
            yaml_lines.push(line);
        }

        if !closed {
            return Self::Invalid("front-matter block is not closed with ---".to_string());
        }
        if yaml_lines.iter().all(|l| l.trim().is_empty()) {
            return Self::Missing;
        }

        let raw = yaml_lines.join("\n");
        let yaml: serde_yaml::Value = match serde_yaml::from_str(&raw) {
            Ok(value) => value,
            Err(error) => return Self::Invalid(error.to_string()),
        };
        match serde_json::to_value(yaml) {
            Ok(Value::Object(map)) => Self::Fields(map.into_iter().collect()),
            Ok(_) => Self::Invalid("front-matter is not a mapping".to_string()),
            Err(error) => Self::Invalid(error.to_string()),
        }
    }
}

/// A scalar string field.
#[must_use]
pub fn string_field(fields: &BTreeMap<String, Value>, key: &str) -> Option<String> {
    match fields.get(key)? {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// A list-of-strings field. A scalar is read as a one-element list and
/// `null` or an absent key as empty.
#[must_use]
pub fn string_list(fields: &BTreeMap<String, Value>, key: &str) -> Vec<String> {
    let scalar = |value: &Value| match value {
        Value::String(s) => Some(s.trim().to_string()).filter(|s| !s.is_empty()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    };
    match fields.get(key) {
        Some(Value::Array(items)) => items.iter().filter_map(scalar).collect(),
        Some(other) => scalar(other).into_iter().collect(),
        None => Vec::new(),
    }
}
