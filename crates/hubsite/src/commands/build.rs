//! Hub build command.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use hubsite_meta::MetadataCatalog;
use hubsite_static::{BuildOutcome, HubPage, Pipeline, ProjectBuilder, SystemRunner};

use crate::config::load_config;

/// Command line overrides for the build.
#[derive(Debug, Default)]
pub struct BuildOptions {
    pub projects: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub metadata: Option<PathBuf>,
    pub minify: Option<bool>,
}

/// Run the build command.
pub async fn run(config_path: &Path, options: BuildOptions) -> Result<()> {
    tracing::info!("Building hub...");

    let file_config = load_config(config_path)?;
    let build_config = file_config.build_config(options.projects, options.output)?;

    let metadata_path = options
        .metadata
        .unwrap_or_else(|| PathBuf::from(&file_config.hub.metadata));
    let catalog = MetadataCatalog::load(&metadata_path);

    let hub = HubPage::new(
        file_config.hub.title.clone(),
        &file_config.hub.base_path,
        options.minify.unwrap_or(file_config.build.minify),
    );

    let builder = ProjectBuilder::new(build_config, catalog, SystemRunner);
    let pipeline = Pipeline::new(builder, hub);

    // Builds spawn blocking child processes one after another.
    let result = tokio::task::spawn_blocking(move || pipeline.run())
        .await
        .context("Build task panicked")??;

    let summary = &result.summary;
    tracing::info!(
        "Built {}, copied {}, skipped {} projects in {}ms",
        summary.count(|o| matches!(o, BuildOutcome::Built { .. })),
        summary.count(|o| matches!(o, BuildOutcome::Copied { .. })),
        summary.count(|o| matches!(o, BuildOutcome::Skipped { .. })),
        result.duration_ms
    );

    tracing::info!("Hub page: {}", result.hub_page.display());

    Ok(())
}
