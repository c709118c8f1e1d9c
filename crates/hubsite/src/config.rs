//! Configuration file structure (hub.toml).

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use hubsite_static::{BuildConfig, CommandSpec};

#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    #[serde(default)]
    pub hub: HubSettings,
    #[serde(default)]
    pub build: BuildSettings,
    #[serde(default)]
    pub serve: ServeSettings,
}

#[derive(Debug, Deserialize)]
pub struct HubSettings {
    #[serde(default = "default_projects_dir")]
    pub projects_dir: String,
    #[serde(default = "default_output")]
    pub output: String,
    /// Metadata catalog (JSON)
    #[serde(default = "default_metadata")]
    pub metadata: String,
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default = "default_base_path")]
    pub base_path: String,
}

#[derive(Debug, Deserialize)]
pub struct BuildSettings {
    #[serde(default = "default_install")]
    pub install: Vec<String>,
    #[serde(default = "default_build")]
    pub build: Vec<String>,
    #[serde(default = "default_output_candidates")]
    pub output_candidates: Vec<String>,
    #[serde(default = "default_content_dir")]
    pub content_dir: String,
    #[serde(default = "default_exclude")]
    pub exclude: Vec<String>,
    #[serde(default = "default_minify")]
    pub minify: bool,
}

#[derive(Debug, Deserialize)]
pub struct ServeSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for HubSettings {
    fn default() -> Self {
        Self {
            projects_dir: default_projects_dir(),
            output: default_output(),
            metadata: default_metadata(),
            title: default_title(),
            base_path: default_base_path(),
        }
    }
}

impl Default for BuildSettings {
    fn default() -> Self {
        Self {
            install: default_install(),
            build: default_build(),
            output_candidates: default_output_candidates(),
            content_dir: default_content_dir(),
            exclude: default_exclude(),
            minify: default_minify(),
        }
    }
}

impl Default for ServeSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_projects_dir() -> String {
    "Projects".to_string()
}
fn default_output() -> String {
    "docs".to_string()
}
fn default_metadata() -> String {
    "projects.json".to_string()
}
fn default_title() -> String {
    "Project Hub".to_string()
}
fn default_base_path() -> String {
    "/hub".to_string()
}
fn default_install() -> Vec<String> {
    vec!["npm".to_string(), "ci".to_string()]
}
fn default_build() -> Vec<String> {
    vec!["npm".to_string(), "run".to_string(), "build".to_string()]
}
fn default_output_candidates() -> Vec<String> {
    vec!["dist".to_string(), "build".to_string(), "docs".to_string()]
}
fn default_content_dir() -> String {
    "docs".to_string()
}
fn default_exclude() -> Vec<String> {
    vec![".git".to_string(), "node_modules".to_string()]
}
fn default_minify() -> bool {
    true
}
fn default_host() -> String {
    "127.0.0.1".to_string()
}
fn default_port() -> u16 {
    8080
}

impl ConfigFile {
    /// Build settings for the project builder, with paths taken from the
    /// config unless overridden.
    pub fn build_config(
        &self,
        projects: Option<PathBuf>,
        output: Option<PathBuf>,
    ) -> Result<BuildConfig> {
        let install = CommandSpec::from_argv(&self.build.install)
            .context("build.install must name a command")?;
        let build = CommandSpec::from_argv(&self.build.build)
            .context("build.build must name a command")?;

        Ok(BuildConfig {
            projects_dir: projects.unwrap_or_else(|| PathBuf::from(&self.hub.projects_dir)),
            output_dir: output.unwrap_or_else(|| PathBuf::from(&self.hub.output)),
            install,
            build,
            output_candidates: self.build.output_candidates.clone(),
            content_dir: self.build.content_dir.clone(),
            exclude: self.build.exclude.clone(),
        })
    }
}

/// Load configuration if the file exists.
/// Returns an error if the config file exists but is malformed.
pub fn load_config(path: &Path) -> Result<ConfigFile> {
    if path.exists() {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config: ConfigFile = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        tracing::info!("Loaded config from {}", path.display());
        return Ok(config);
    }
    Ok(ConfigFile::default())
}
