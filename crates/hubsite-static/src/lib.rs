//! Publishing pipeline for hubsite.
//!
//! Builds or copies every project of a projects directory into a publish
//! root, then generates a hub page that links to all of them.

pub mod assets;
pub mod builder;
pub mod copy;
pub mod hub;
pub mod pipeline;
pub mod runner;
pub mod templates;

pub use builder::{
    BuildConfig, BuildError, BuildOutcome, BuildSummary, ProjectBuilder, ProjectEntry, ProjectKind,
};
pub use hub::{embedded_entries, HubEntry, HubError, HubPage};
pub use pipeline::{Pipeline, PipelineError, PipelineResult};
pub use runner::{CommandRunner, CommandSpec, CommandStatus, SystemRunner};
