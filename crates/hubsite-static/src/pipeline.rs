//! One full publish run: build every project, then write the hub page.

use std::path::PathBuf;
use std::time::Instant;

use crate::builder::{BuildError, BuildSummary, ProjectBuilder};
use crate::hub::{HubError, HubPage};
use crate::runner::CommandRunner;

/// Result of a publish run.
#[derive(Debug)]
pub struct PipelineResult {
    pub summary: BuildSummary,

    /// Path of the generated hub page
    pub hub_page: PathBuf,

    /// Total run time in milliseconds
    pub duration_ms: u64,
}

/// Errors that abort a publish run.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error(transparent)]
    Build(#[from] BuildError),

    #[error(transparent)]
    Hub(#[from] HubError),
}

/// Runs the builder and feeds its summary to the hub page renderer.
pub struct Pipeline<R: CommandRunner> {
    builder: ProjectBuilder<R>,
    hub: HubPage,
}

impl<R: CommandRunner> Pipeline<R> {
    pub fn new(builder: ProjectBuilder<R>, hub: HubPage) -> Self {
        Self { builder, hub }
    }

    /// Run the whole pipeline.
    ///
    /// A fatal build error returns before the hub page is touched, leaving
    /// the previous hub page (if any) in place.
    pub fn run(&self) -> Result<PipelineResult, PipelineError> {
        let start = Instant::now();

        let summary = self.builder.build_all()?;
        tracing::info!("Build summary:\n{}", summary.to_json());

        let hub_page = self
            .hub
            .write(&self.builder.config().output_dir, &summary.entries)?;

        Ok(PipelineResult {
            summary,
            hub_page,
            duration_ms: start.elapsed().as_millis() as u64,
        })
    }
}
