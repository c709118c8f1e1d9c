//! Hub page generation.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use hubsite_meta::{normalize_base_path, publish_href};

use crate::assets::AssetPipeline;
use crate::builder::ProjectEntry;
use crate::templates::{HubContext, TemplateEngine};

/// Card data embedded in the hub page for one published project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HubEntry {
    pub slug: String,
    /// Directory name
    pub name: String,
    pub title: String,
    pub subtitle: String,
    pub description: String,
    pub tags: Vec<String>,
    pub link_text: String,
    /// Published location, `<base>/<slug>/`
    pub href: String,
    pub external_url: Option<String>,
}

impl HubEntry {
    pub fn from_project(entry: &ProjectEntry, base_path: &str) -> Self {
        let meta = &entry.metadata;

        Self {
            slug: entry.slug.clone(),
            name: entry.name.clone(),
            title: meta.title.clone(),
            subtitle: meta.subtitle.clone(),
            description: meta.description.clone(),
            tags: meta.tags.clone(),
            link_text: meta.link_text.clone(),
            href: publish_href(base_path, &entry.slug),
            external_url: meta.external_url.clone(),
        }
    }
}

/// Errors that can occur while producing the hub page.
#[derive(Debug, thiserror::Error)]
pub enum HubError {
    #[error("Failed to render hub page: {0}")]
    TemplateError(String),

    #[error("Failed to write hub page: {0}")]
    WriteError(String),
}

/// Renders the hub page from published projects.
pub struct HubPage {
    templates: TemplateEngine,
    title: String,
    base_path: String,
    minify: bool,
}

impl HubPage {
    pub fn new(title: impl Into<String>, base_path: &str, minify: bool) -> Self {
        Self {
            templates: TemplateEngine::new(),
            title: title.into(),
            base_path: normalize_base_path(base_path),
            minify,
        }
    }

    /// Card entries for the given projects; skipped projects are left out.
    pub fn entries<'a>(
        &self,
        projects: impl IntoIterator<Item = &'a ProjectEntry>,
    ) -> Vec<HubEntry> {
        projects
            .into_iter()
            .filter(|p| p.outcome.is_published())
            .map(|p| HubEntry::from_project(p, &self.base_path))
            .collect()
    }

    /// Render the complete HTML document.
    pub fn render<'a>(
        &self,
        projects: impl IntoIterator<Item = &'a ProjectEntry>,
    ) -> Result<String, HubError> {
        let context = HubContext {
            title: self.title.clone(),
            base_path: self.base_path.clone(),
            projects: self.entries(projects),
            css: AssetPipeline::hub_css_for(self.minify),
        };

        self.templates
            .render_hub(&context)
            .map_err(|e| HubError::TemplateError(e.to_string()))
    }

    /// Render and write `index.html` into `output_dir`.
    pub fn write<'a>(
        &self,
        output_dir: &Path,
        projects: impl IntoIterator<Item = &'a ProjectEntry>,
    ) -> Result<PathBuf, HubError> {
        let html = self.render(projects)?;

        fs::create_dir_all(output_dir).map_err(|e| HubError::WriteError(e.to_string()))?;
        let path = output_dir.join("index.html");
        fs::write(&path, html).map_err(|e| HubError::WriteError(e.to_string()))?;

        Ok(path)
    }
}

/// Pull the embedded card list back out of a rendered hub page.
pub fn embedded_entries(html: &str) -> Option<Vec<HubEntry>> {
    const MARKER: &str = "const PROJECTS = ";

    let start = html.find(MARKER)? + MARKER.len();
    let rest = &html[start..];
    let end = rest.find(";\n")?;

    serde_json::from_str(&rest[..end]).ok()
}
