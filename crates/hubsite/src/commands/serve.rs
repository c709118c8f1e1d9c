//! Preview server command.

use std::path::{Path, PathBuf};

use anyhow::Result;
use hubsite_server::{PreviewConfig, PreviewServer};

use crate::config::load_config;

/// Run the serve command.
pub async fn run(
    config_path: &Path,
    port: Option<u16>,
    dir: Option<PathBuf>,
    open: bool,
) -> Result<()> {
    let file_config = load_config(config_path)?;

    let config = PreviewConfig {
        root: dir.unwrap_or_else(|| PathBuf::from(&file_config.hub.output)),
        base_path: file_config.hub.base_path,
        host: file_config.serve.host,
        port: port.unwrap_or(file_config.serve.port),
        open,
    };

    tracing::info!(
        "Serving {} on port {}",
        config.root.display(),
        config.port
    );

    PreviewServer::new(config).start().await?;

    Ok(())
}
