pub mod memory;
pub mod messages;
pub mod prompt;
pub mod skills;

use pincer_config::AppConfig;
use std::path::PathBuf;

/// Load the config, letting `--workspace` override file and environment.
pub fn load_config(workspace: Option<PathBuf>) -> pincer_core::Result<AppConfig> {
    let mut config = AppConfig::load()?;
    if let Some(workspace) = workspace {
        config.workspace = Some(workspace);
    }
    tracing::debug!(workspace = %config.workspace_dir().display(), "Config loaded");
    Ok(config)
}
