//! Project naming and display metadata.
//!
//! This crate turns project directory names into URL-safe slugs and looks up
//! the display metadata (title, description, tags, links) that the hub page
//! shows for each project.

pub mod metadata;
pub mod slug;

pub use metadata::{CatalogEntry, CatalogError, MetadataCatalog, ProjectMetadata};
pub use slug::{normalize_base_path, publish_href, slugify};
