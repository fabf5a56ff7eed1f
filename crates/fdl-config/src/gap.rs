//! Gap tree configuration.

use serde::{Deserialize, Serialize};

/// Default recursion limit for chain traversal.
const fn default_max_depth() -> usize {
    16
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GapConfig {
    /// Deepest chain the visualizer will descend before reporting an error.
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
}

impl Default for GapConfig {
    fn default() -> Self {
        Self {
            max_depth: default_max_depth(),
        }
    }
}
