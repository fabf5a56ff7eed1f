use anyhow::bail;
use fdl_schema::SchemaRegistry;
use serde::Serialize;
use serde_json::Value;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::SchemaArgs;
use crate::output::{Report, output};

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum SchemaResponse {
    Names(Vec<&'static str>),
    Schema(Value),
}

impl Report for SchemaResponse {
    fn text(&self) -> String {
        match self {
            Self::Names(names) => names.join("\n"),
            Self::Schema(schema) => {
                serde_json::to_string_pretty(schema).unwrap_or_else(|_| schema.to_string())
            }
        }
    }
}

/// Handle `fdl schema`.
pub fn handle(args: &SchemaArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    let registry = SchemaRegistry::new();
    let response = match args.name.as_deref() {
        None => SchemaResponse::Names(registry.list()),
        Some(name) => match registry.get(name) {
            Some(schema) => SchemaResponse::Schema(schema.clone()),
            None => bail!(
                "unknown schema '{name}' (expected one of: {})",
                registry.list().join(", ")
            ),
        },
    };
    output(&response, flags)
}
