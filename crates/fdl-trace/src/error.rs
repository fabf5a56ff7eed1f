//! Trace error types.

use fdl_config::ConfigError;

#[derive(Debug, thiserror::Error)]
pub enum TraceError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
}
