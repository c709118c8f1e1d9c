//! Project metadata catalog and resolution.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

const DEFAULT_SUBTITLE: &str = "Project";
const DEFAULT_DESCRIPTION: &str = "No description available yet.";
const DEFAULT_LINK_TEXT: &str = "Open project";

/// One entry of the metadata catalog file.
///
/// Every field is optional; unset fields are filled with defaults when the
/// entry is resolved.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntry {
    /// Slug this entry applies to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,

    /// Directory name this entry applies to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub directory: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,

    /// Label of the card's action link
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link_text: Option<String>,

    /// Link target overriding the published path
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_url: Option<String>,
}

impl CatalogEntry {
    /// Whether this entry describes the project with the given slug or directory name.
    fn matches(&self, slug: &str, name: &str) -> bool {
        self.slug.as_deref() == Some(slug) || self.directory.as_deref() == Some(name)
    }
}

/// Fully resolved display metadata for one project.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProjectMetadata {
    pub title: String,
    pub subtitle: String,
    pub description: String,
    pub tags: Vec<String>,
    pub link_text: String,
    pub external_url: Option<String>,
}

impl ProjectMetadata {
    /// The default metadata for a project with no catalog entry.
    pub fn defaults(name: &str) -> Self {
        Self {
            title: name.to_string(),
            subtitle: DEFAULT_SUBTITLE.to_string(),
            description: DEFAULT_DESCRIPTION.to_string(),
            tags: Vec::new(),
            link_text: DEFAULT_LINK_TEXT.to_string(),
            external_url: None,
        }
    }

    fn from_entry(entry: &CatalogEntry, name: &str) -> Self {
        let defaults = Self::defaults(name);

        Self {
            title: entry.title.clone().unwrap_or(defaults.title),
            subtitle: entry.subtitle.clone().unwrap_or(defaults.subtitle),
            description: entry.description.clone().unwrap_or(defaults.description),
            tags: entry.tags.clone().unwrap_or(defaults.tags),
            link_text: entry.link_text.clone().unwrap_or(defaults.link_text),
            external_url: entry.external_url.clone(),
        }
    }
}

/// Errors that can occur when loading a catalog strictly.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Failed to read metadata catalog {path}: {message}")]
    ReadError { path: String, message: String },

    #[error("Invalid metadata catalog {path}: {message}")]
    InvalidJson { path: String, message: String },
}

/// The list of known project metadata entries.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetadataCatalog {
    entries: Vec<CatalogEntry>,
}

impl MetadataCatalog {
    /// Create a catalog from already parsed entries.
    pub fn new(entries: Vec<CatalogEntry>) -> Self {
        Self { entries }
    }

    /// Parse a catalog from JSON text.
    pub fn from_json(source: &str) -> Result<Self, serde_json::Error> {
        let entries: Vec<CatalogEntry> = serde_json::from_str(source)?;
        Ok(Self { entries })
    }

    /// Load a catalog, failing on unreadable or malformed files.
    pub fn try_load(path: &Path) -> Result<Self, CatalogError> {
        let source = fs::read_to_string(path).map_err(|e| CatalogError::ReadError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        Self::from_json(&source).map_err(|e| CatalogError::InvalidJson {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    /// Load a catalog, falling back to an empty one on any problem.
    ///
    /// A missing file is normal and only logged at debug level; an
    /// unreadable or malformed file produces a warning.
    pub fn load(path: &Path) -> Self {
        if !path.exists() {
            tracing::debug!("No metadata catalog at {}", path.display());
            return Self::default();
        }

        match Self::try_load(path) {
            Ok(catalog) => {
                tracing::info!(
                    "Loaded {} metadata entries from {}",
                    catalog.len(),
                    path.display()
                );
                catalog
            }
            Err(e) => {
                tracing::warn!("{}; using default metadata", e);
                Self::default()
            }
        }
    }

    /// Resolve the display metadata for a project.
    ///
    /// The first entry matching either the slug or the directory name wins.
    pub fn resolve(&self, slug: &str, name: &str) -> ProjectMetadata {
        self.entries
            .iter()
            .find(|entry| entry.matches(slug, name))
            .map(|entry| ProjectMetadata::from_entry(entry, name))
            .unwrap_or_else(|| ProjectMetadata::defaults(name))
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
