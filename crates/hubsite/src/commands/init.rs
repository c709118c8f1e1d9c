//! Initialize a hub in the current directory.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use hubsite_meta::{slugify, CatalogEntry, ProjectMetadata};

use crate::config::load_config;

/// Run the init command.
pub async fn run(config_path: &Path, yes: bool) -> Result<()> {
    tracing::info!("Initializing hub...");

    if !config_path.exists() || yes {
        fs::write(config_path, DEFAULT_CONFIG)
            .with_context(|| format!("Failed to write {}", config_path.display()))?;
        tracing::info!("Created {}", config_path.display());
    } else {
        tracing::warn!(
            "{} already exists. Use --yes to overwrite.",
            config_path.display()
        );
    }

    let config = load_config(config_path)?;
    let projects_dir = PathBuf::from(&config.hub.projects_dir);
    let metadata_path = PathBuf::from(&config.hub.metadata);

    if metadata_path.exists() && !yes {
        tracing::warn!(
            "{} already exists. Use --yes to overwrite.",
            metadata_path.display()
        );
    } else {
        let entries = seed_catalog(&projects_dir)?;
        let json = serde_json::to_string_pretty(&entries)?;
        fs::write(&metadata_path, json + "\n")
            .with_context(|| format!("Failed to write {}", metadata_path.display()))?;
        tracing::info!(
            "Created {} with {} projects",
            metadata_path.display(),
            entries.len()
        );
    }

    if !projects_dir.exists() {
        fs::create_dir_all(&projects_dir)
            .with_context(|| format!("Failed to create {}", projects_dir.display()))?;
        tracing::info!("Created {}/", projects_dir.display());
    }

    tracing::info!("Initialization complete!");
    tracing::info!("Run 'hubsite build' to publish, then 'hubsite serve' to preview.");

    Ok(())
}

/// One catalog entry with default fields per project directory.
fn seed_catalog(projects_dir: &Path) -> Result<Vec<CatalogEntry>> {
    if !projects_dir.is_dir() {
        return Ok(Vec::new());
    }

    let mut names = Vec::new();
    for entry in fs::read_dir(projects_dir)
        .with_context(|| format!("Failed to read {}", projects_dir.display()))?
    {
        let entry = entry?;
        if entry.file_type()?.is_dir() {
            if let Ok(name) = entry.file_name().into_string() {
                names.push(name);
            }
        }
    }
    names.sort();

    Ok(names
        .into_iter()
        .map(|name| {
            let defaults = ProjectMetadata::defaults(&name);
            CatalogEntry {
                slug: Some(slugify(&name)),
                directory: Some(name),
                title: Some(defaults.title),
                subtitle: Some(defaults.subtitle),
                description: Some(defaults.description),
                tags: Some(defaults.tags),
                link_text: Some(defaults.link_text),
                external_url: None,
            }
        })
        .collect())
}

const DEFAULT_CONFIG: &str = r#"# Hubsite Configuration

[hub]
# Directory containing one subdirectory per project
projects_dir = "Projects"

# Publish root (served by 'hubsite serve')
output = "docs"

# Project metadata catalog
metadata = "projects.json"

# Hub page title
title = "Project Hub"

# URL prefix the hub is served under
base_path = "/hub"

[build]
install = ["npm", "ci"]
build = ["npm", "run", "build"]

# Checked in order after a build
output_candidates = ["dist", "build", "docs"]

# Published instead of the whole project when present
content_dir = "docs"

exclude = [".git", "node_modules"]
minify = true

[serve]
host = "127.0.0.1"
port = 8080
"#;
