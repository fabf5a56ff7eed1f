//! Central schema registry for fdl types.
//!
//! The `SchemaRegistry` builds JSON Schemas from fdl-core types at construction
//! time using [`schemars::schema_for!`] and provides validation via `jsonschema`.

use std::collections::HashMap;

use schemars::schema_for;

use crate::error::SchemaError;

/// Store of every JSON Schema fdl can export or validate against.
pub struct SchemaRegistry {
    schemas: HashMap<&'static str, serde_json::Value>,
}

/// Insert a schema into the map, converting the `schemars` output to a
/// `serde_json::Value`.
macro_rules! register {
    ($map:expr, $name:expr, $ty:ty) => {
        $map.insert(
            $name,
            serde_json::to_value(schema_for!($ty)).unwrap_or(serde_json::Value::Null),
        );
    };
}

impl SchemaRegistry {
    /// Build a registry containing the log record, violation, and enum schemas.
    #[must_use]
    pub fn new() -> Self {
        let mut schemas = HashMap::new();

        // --- Persisted records ---
        register!(schemas, "feedback_entry", fdl_core::feedback::FeedbackEntry);

        // --- Reported shapes ---
        register!(schemas, "violation", fdl_core::violation::Violation);

        // --- Closed sets ---
        register!(schemas, "feedback_type", fdl_core::enums::FeedbackType);
        register!(schemas, "category", fdl_core::enums::Category);
        register!(schemas, "severity", fdl_core::enums::Severity);
        register!(schemas, "test_level", fdl_core::enums::TestLevel);
        register!(schemas, "node_kind", fdl_core::enums::NodeKind);
        register!(schemas, "chain_status", fdl_core::enums::ChainStatus);
        register!(schemas, "check_status", fdl_core::enums::CheckStatus);

        Self { schemas }
    }

    /// Get a schema by name. Returns `None` if not found.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&serde_json::Value> {
        self.schemas.get(name)
    }

    /// Validate a JSON value against a named schema.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::NotFound` if the schema name is unknown, or
    /// `SchemaError::ValidationFailed` if validation produces errors.
    pub fn validate(&self, name: &str, instance: &serde_json::Value) -> Result<(), SchemaError> {
        let schema = self
            .get(name)
            .ok_or_else(|| SchemaError::NotFound(name.to_string()))?;

        let validator = jsonschema::validator_for(schema)
            .map_err(|e| SchemaError::Generation(format!("{e}")))?;

        let errors: Vec<String> = validator
            .iter_errors(instance)
            .map(|e| format!("{e}"))
            .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(SchemaError::ValidationFailed { errors })
        }
    }

    /// List all registered schema names.
    #[must_use]
    pub fn list(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = self.schemas.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// Number of registered schemas.
    #[must_use]
    pub fn schema_count(&self) -> usize {
        self.schemas.len()
    }
}

impl Default for SchemaRegistry {
    fn default() -> Self {
        Self::new()
    }
}
