use std::path::Path;

use anyhow::Context;
use fdl_config::FdlConfig;

/// Load `<project>/.env` (if present) and then the layered configuration.
pub fn load_config(project_root: &Path) -> anyhow::Result<FdlConfig> {
    FdlConfig::load_with_dotenv(project_root).with_context(|| {
        format!(
            "failed to load configuration for {}",
            project_root.display()
        )
    })
}
