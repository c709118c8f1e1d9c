//! Project discovery and build-or-copy publishing.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use hubsite_meta::{slugify, MetadataCatalog, ProjectMetadata};

use crate::copy::copy_tree;
use crate::runner::{CommandRunner, CommandSpec};

/// Configuration for publishing a projects directory.
#[derive(Debug, Clone)]
pub struct BuildConfig {
    /// Directory whose subdirectories are the projects
    pub projects_dir: PathBuf,

    /// Publish root
    pub output_dir: PathBuf,

    /// Dependency install command, run before the build
    pub install: CommandSpec,

    /// Build command
    pub build: CommandSpec,

    /// Artifact directories checked after a build, in order
    pub output_candidates: Vec<String>,

    /// Subdirectory published instead of the whole project when present
    pub content_dir: String,

    /// Path segments never copied
    pub exclude: Vec<String>,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            projects_dir: PathBuf::from("Projects"),
            output_dir: PathBuf::from("docs"),
            install: CommandSpec::new("npm", &["ci"]),
            build: CommandSpec::new("npm", &["run", "build"]),
            output_candidates: vec!["dist".to_string(), "build".to_string(), "docs".to_string()],
            content_dir: "docs".to_string(),
            exclude: vec![".git".to_string(), "node_modules".to_string()],
        }
    }
}

/// How a project was recognized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProjectKind {
    /// Has a `package.json`
    PackageJson,
    Static,
}

/// What happened to a project during the run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum BuildOutcome {
    /// Built, then the named artifact directory was published
    Built { output: String },

    /// Published without building; `source` is `docs/` or `/`
    Copied { source: String },

    Skipped { reason: String },
}

impl BuildOutcome {
    pub fn is_published(&self) -> bool {
        !matches!(self, BuildOutcome::Skipped { .. })
    }
}

/// One discovered project and its outcome.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectEntry {
    /// Directory name
    pub name: String,
    pub slug: String,
    #[serde(rename = "type")]
    pub kind: ProjectKind,
    #[serde(flatten)]
    pub outcome: BuildOutcome,
    #[serde(skip)]
    pub metadata: ProjectMetadata,
    /// Directory the published files came from
    #[serde(skip)]
    pub source_path: Option<PathBuf>,
}

/// Ordered record of every project processed in a run.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct BuildSummary {
    pub entries: Vec<ProjectEntry>,
}

impl BuildSummary {
    /// Entries that produced output, in build order.
    pub fn published(&self) -> impl Iterator<Item = &ProjectEntry> {
        self.entries.iter().filter(|e| e.outcome.is_published())
    }

    pub fn count(&self, pred: impl Fn(&BuildOutcome) -> bool) -> usize {
        self.entries.iter().filter(|e| pred(&e.outcome)).count()
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "[]".to_string())
    }
}

/// Errors that abort a build run.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("Failed to read projects directory: {0}")]
    ReadError(String),

    #[error("Invalid package.json for {project}: {message}")]
    ManifestError { project: String, message: String },

    #[error("Command failed for {project}: {command}{}", exit_suffix(.code))]
    CommandFailed {
        project: String,
        command: String,
        code: Option<i32>,
    },

    #[error("Could not find a build directory for {project}; expected one of {expected}")]
    MissingOutput { project: String, expected: String },

    #[error("Failed to write output: {0}")]
    WriteError(String),
}

fn exit_suffix(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!(" (exit code {})", code),
        None => String::new(),
    }
}

/// The parts of `package.json` the builder cares about.
#[derive(Debug, Default, Deserialize)]
struct PackageManifest {
    #[serde(default)]
    scripts: Option<serde_json::Map<String, serde_json::Value>>,
}

impl PackageManifest {
    fn has_build_script(&self) -> bool {
        self.scripts
            .as_ref()
            .and_then(|scripts| scripts.get("build"))
            .and_then(|script| script.as_str())
            .is_some_and(|script| !script.is_empty())
    }
}

/// Publishes every project of a projects directory, one at a time.
///
/// Holds everything a run needs: configuration, the metadata catalog, and
/// the command runner used for builds.
pub struct ProjectBuilder<R: CommandRunner> {
    config: BuildConfig,
    catalog: MetadataCatalog,
    runner: R,
}

impl<R: CommandRunner> ProjectBuilder<R> {
    /// Create a new project builder.
    pub fn new(config: BuildConfig, catalog: MetadataCatalog, runner: R) -> Self {
        Self {
            config,
            catalog,
            runner,
        }
    }

    pub fn config(&self) -> &BuildConfig {
        &self.config
    }

    /// Build or copy every project, stopping at the first fatal error.
    pub fn build_all(&self) -> Result<BuildSummary, BuildError> {
        fs::create_dir_all(&self.config.output_dir)
            .map_err(|e| BuildError::WriteError(e.to_string()))?;

        let names = self.discover_projects()?;
        let mut summary = BuildSummary::default();

        for name in names {
            let entry = self.build_project(&name)?;

            if summary.entries.iter().any(|e| e.slug == entry.slug) {
                tracing::warn!(
                    "Project {} shares slug '{}' with an earlier project and replaces its output",
                    entry.name,
                    entry.slug
                );
            }

            summary.entries.push(entry);
        }

        Ok(summary)
    }

    /// List project directory names in lexicographic order.
    fn discover_projects(&self) -> Result<Vec<String>, BuildError> {
        let dir = &self.config.projects_dir;

        let read_dir = fs::read_dir(dir)
            .map_err(|e| BuildError::ReadError(format!("{}: {}", dir.display(), e)))?;

        let mut names = Vec::new();
        for entry in read_dir {
            let entry =
                entry.map_err(|e| BuildError::ReadError(format!("{}: {}", dir.display(), e)))?;

            let is_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);
            if !is_dir {
                continue;
            }

            match entry.file_name().into_string() {
                Ok(name) => names.push(name),
                Err(name) => {
                    tracing::warn!("Skipping project with non UTF-8 name: {:?}", name);
                }
            }
        }

        names.sort();
        tracing::debug!("Discovered {} projects in {}", names.len(), dir.display());

        Ok(names)
    }

    /// Publish a single project into `<output>/<slug>`.
    fn build_project(&self, name: &str) -> Result<ProjectEntry, BuildError> {
        let project_path = self.config.projects_dir.join(name);
        let slug = slugify(name);
        let metadata = self.catalog.resolve(&slug, name);
        let target = self.config.output_dir.join(&slug);

        prepare_target(&target)?;

        let manifest_path = project_path.join("package.json");

        let (kind, outcome, source_path) = if manifest_path.is_file() {
            let manifest = read_manifest(&manifest_path, name)?;

            if manifest.has_build_script() {
                let output_dir = self.run_build(name, &project_path)?;
                self.copy(&output_dir, &target)?;

                let output = output_dir
                    .file_name()
                    .map(|n| n.to_string_lossy().to_string())
                    .unwrap_or_default();

                (
                    ProjectKind::PackageJson,
                    BuildOutcome::Built { output },
                    Some(output_dir),
                )
            } else {
                tracing::info!("Skipping {}: package.json has no build script", name);
                (
                    ProjectKind::PackageJson,
                    BuildOutcome::Skipped {
                        reason: "no build script".to_string(),
                    },
                    None,
                )
            }
        } else {
            let content = project_path.join(&self.config.content_dir);

            if content.is_dir() {
                self.copy(&content, &target)?;
                (
                    ProjectKind::Static,
                    BuildOutcome::Copied {
                        source: format!("{}/", self.config.content_dir),
                    },
                    Some(content),
                )
            } else {
                self.copy(&project_path, &target)?;
                (
                    ProjectKind::Static,
                    BuildOutcome::Copied {
                        source: "/".to_string(),
                    },
                    Some(project_path.clone()),
                )
            }
        };

        if outcome.is_published() {
            tracing::info!("Published {} -> {}", name, target.display());
        }

        Ok(ProjectEntry {
            name: name.to_string(),
            slug,
            kind,
            outcome,
            metadata,
            source_path,
        })
    }

    /// Run install and build, then locate the artifact directory.
    fn run_build(&self, name: &str, project_path: &Path) -> Result<PathBuf, BuildError> {
        for command in [&self.config.install, &self.config.build] {
            let status = self
                .runner
                .run(command, project_path)
                .map_err(|e| {
                    tracing::error!("Failed to start `{}` for {}: {}", command, name, e);
                    BuildError::CommandFailed {
                        project: name.to_string(),
                        command: command.to_string(),
                        code: None,
                    }
                })?;

            if !status.success {
                return Err(BuildError::CommandFailed {
                    project: name.to_string(),
                    command: command.to_string(),
                    code: status.code,
                });
            }
        }

        pick_output_dir(project_path, &self.config.output_candidates).ok_or_else(|| {
            BuildError::MissingOutput {
                project: name.to_string(),
                expected: self
                    .config
                    .output_candidates
                    .iter()
                    .map(|c| format!("{}/", c))
                    .collect::<Vec<_>>()
                    .join(", "),
            }
        })
    }

    fn copy(&self, source: &Path, target: &Path) -> Result<(), BuildError> {
        let files = copy_tree(source, target, &self.config.exclude).map_err(|e| {
            BuildError::WriteError(format!(
                "{} -> {}: {}",
                source.display(),
                target.display(),
                e
            ))
        })?;
        tracing::debug!("Copied {} files from {}", files, source.display());
        Ok(())
    }
}

/// Replace `target` with a fresh empty directory.
fn prepare_target(target: &Path) -> Result<(), BuildError> {
    if target.exists() {
        fs::remove_dir_all(target)
            .map_err(|e| BuildError::WriteError(format!("{}: {}", target.display(), e)))?;
    }
    fs::create_dir_all(target)
        .map_err(|e| BuildError::WriteError(format!("{}: {}", target.display(), e)))
}

fn read_manifest(path: &Path, project: &str) -> Result<PackageManifest, BuildError> {
    let content = fs::read_to_string(path).map_err(|e| BuildError::ManifestError {
        project: project.to_string(),
        message: e.to_string(),
    })?;

    serde_json::from_str(&content).map_err(|e| BuildError::ManifestError {
        project: project.to_string(),
        message: e.to_string(),
    })
}

/// First candidate that exists as a directory under `base`.
pub fn pick_output_dir(base: &Path, candidates: &[String]) -> Option<PathBuf> {
    candidates
        .iter()
        .map(|candidate| base.join(candidate))
        .find(|path| path.is_dir())
}
