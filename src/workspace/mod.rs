//! Multi-project generation driver.
//!
//! A run discovers projects, then processes each one independently: load its
//! `scaffold.toml`, resolve it against the shared registry, render the generated
//! region, and write (or, in check mode, only compare) its manifest. Projects run
//! concurrently up to the configured parallelism. A failing project is reported
//! and never stops its siblings.
//!
//! Reports come back in discovery order regardless of completion order, so output
//! is stable across runs.

mod discovery;

pub use discovery::{ProjectLocation, discover, is_project_dir};

use crate::project::ProjectDescriptor;
use crate::registry::Registry;
use crate::render::{Renderer, WriteOutcome, writer};
use crate::resolver::{Resolution, Resolver};
use crate::utils::ProgressBar;
use anyhow::{Context, Result};
use futures::stream::{self, StreamExt};
use std::sync::Arc;
use tracing::{debug, warn};

/// Whether manifests are written or only compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    /// Write changed manifests.
    Write,
    /// Never write; report what would change.
    Check,
}

/// Result of processing one project.
#[derive(Debug)]
pub struct ProjectReport {
    pub location: ProjectLocation,
    /// Outcome, or the error that stopped this project.
    pub result: Result<WriteOutcome>,
}

impl ProjectReport {
    #[must_use]
    pub const fn is_failure(&self) -> bool {
        self.result.is_err()
    }

    /// In check mode, whether the manifest differs from what would be generated.
    #[must_use]
    pub fn is_stale(&self) -> bool {
        matches!(self.result, Ok(WriteOutcome::Created | WriteOutcome::Updated))
    }
}

/// Reports of a whole run, in discovery order.
#[derive(Debug, Default)]
pub struct RunSummary {
    pub reports: Vec<ProjectReport>,
}

impl RunSummary {
    pub fn failures(&self) -> impl Iterator<Item = &ProjectReport> {
        self.reports.iter().filter(|report| report.is_failure())
    }

    #[must_use]
    pub fn failure_count(&self) -> usize {
        self.failures().count()
    }

    #[must_use]
    pub fn stale_count(&self) -> usize {
        self.reports.iter().filter(|report| report.is_stale()).count()
    }

    /// Number of projects with the given outcome.
    #[must_use]
    pub fn count(&self, outcome: WriteOutcome) -> usize {
        self.reports
            .iter()
            .filter(|report| matches!(&report.result, Ok(actual) if *actual == outcome))
            .count()
    }
}

/// Processes projects against one registry and one template.
#[derive(Debug, Clone)]
pub struct Generator {
    resolver: Resolver,
    renderer: Arc<Renderer>,
    max_parallel: usize,
}

impl Generator {
    #[must_use]
    pub fn new(registry: Arc<Registry>, renderer: Renderer, max_parallel: usize) -> Self {
        Self {
            resolver: Resolver::new(registry),
            renderer: Arc::new(renderer),
            max_parallel: max_parallel.max(1),
        }
    }

    #[must_use]
    pub const fn resolver(&self) -> &Resolver {
        &self.resolver
    }

    /// Load and resolve one project without rendering it.
    pub async fn resolve(&self, location: &ProjectLocation) -> Result<(ProjectDescriptor, Resolution)> {
        let content = tokio::fs::read_to_string(&location.project_file).await.with_context(|| {
            format!("Failed to read project file: {}", location.project_file.display())
        })?;
        let project =
            ProjectDescriptor::parse(&content, &location.project_file.display().to_string())?;
        let resolution = self.resolver.resolve(&project)?;
        Ok((project, resolution))
    }

    /// Process one project.
    pub async fn process(&self, location: &ProjectLocation, mode: RunMode) -> Result<WriteOutcome> {
        let (project, resolution) = self.resolve(location).await?;
        let rendered = self.renderer.render_resolution(&project, &resolution)?;

        let outcome = match mode {
            RunMode::Write => writer::write(&location.manifest, &rendered).await?,
            RunMode::Check => writer::plan(&location.manifest, &rendered).await?.outcome,
        };
        debug!("Project '{}': {}", project.name, outcome);
        Ok(outcome)
    }

    /// Process every location, at most `max_parallel` at a time.
    pub async fn run(
        &self,
        locations: Vec<ProjectLocation>,
        mode: RunMode,
        progress: &ProgressBar,
    ) -> RunSummary {
        debug!(
            "Processing {} project(s) with parallelism {}",
            locations.len(),
            self.max_parallel
        );

        let mut indexed: Vec<(usize, ProjectReport)> = stream::iter(locations.into_iter().enumerate())
            .map(|(index, location)| {
                let generator = self.clone();
                let progress = progress.clone();
                async move {
                    progress.set_message(location.label());
                    let result = generator.process(&location, mode).await;
                    if let Err(error) = &result {
                        warn!("Project {} failed: {:#}", location.project_file.display(), error);
                    }
                    progress.inc(1);
                    (
                        index,
                        ProjectReport {
                            location,
                            result,
                        },
                    )
                }
            })
            .buffer_unordered(self.max_parallel)
            .collect()
            .await;

        indexed.sort_by_key(|(index, _)| *index);
        RunSummary {
            reports: indexed.into_iter().map(|(_, report)| report).collect(),
        }
    }
}
