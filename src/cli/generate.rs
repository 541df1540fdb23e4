//! `generate` and `check`: run every discovered project through the generator.

use super::CliConfig;
use super::common::{CommandContext, display_path, paths_or_current};
use crate::core::find_scaffold_error;
use crate::render::WriteOutcome;
use crate::utils::ProgressBar;
use crate::workspace::{Generator, ProjectReport, RunMode, RunSummary, discover};
use anyhow::{Result, bail};
use clap::Args;
use colored::Colorize;
use std::path::PathBuf;

/// Resolve projects and write their manifests.
#[derive(Args, Debug)]
pub struct GenerateCommand {
    /// Project directories, project files, or workspace directories to search
    paths: Vec<PathBuf>,

    /// Maximum number of projects processed at once
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u16).range(1..))]
    max_parallel: Option<u16>,
}

impl GenerateCommand {
    pub async fn execute(self, cli: &CliConfig) -> Result<()> {
        let summary = run(&self.paths, self.max_parallel, RunMode::Write, cli).await?;

        println!(
            "{} {} created, {} updated, {} unchanged, {} failed",
            "Summary:".bold(),
            summary.count(WriteOutcome::Created),
            summary.count(WriteOutcome::Updated),
            summary.count(WriteOutcome::Unchanged),
            summary.failure_count()
        );

        let failures = summary.failure_count();
        if failures > 0 {
            bail!("{failures} of {} project(s) failed", summary.reports.len());
        }
        Ok(())
    }
}

/// Report manifests that `generate` would change, without writing anything.
#[derive(Args, Debug)]
pub struct CheckCommand {
    /// Project directories, project files, or workspace directories to search
    paths: Vec<PathBuf>,
}

impl CheckCommand {
    pub async fn execute(self, cli: &CliConfig) -> Result<()> {
        let summary = run(&self.paths, None, RunMode::Check, cli).await?;

        let failures = summary.failure_count();
        let stale = summary.stale_count();
        if failures > 0 {
            bail!("{failures} of {} project(s) failed", summary.reports.len());
        }
        if stale > 0 {
            bail!(
                "{stale} manifest(s) out of date. Run 'scaffold generate' to update them"
            );
        }
        println!("{} All {} manifest(s) are up to date", "✓".green(), summary.reports.len());
        Ok(())
    }
}

async fn run(
    paths: &[PathBuf],
    max_parallel: Option<u16>,
    mode: RunMode,
    cli: &CliConfig,
) -> Result<RunSummary> {
    let context = CommandContext::load(cli).await?;
    let locations = discover(
        &paths_or_current(paths),
        context.config.discovery_depth,
        &context.config.manifest_file,
    )?;
    if locations.is_empty() {
        bail!("No scaffold.toml found. Create one per project to describe its dependencies");
    }

    let parallelism = max_parallel.map_or_else(|| context.config.max_parallel(), usize::from);
    let generator = Generator::new(context.registry.clone(), context.renderer()?, parallelism);

    let progress = ProgressBar::new(locations.len() as u64, !context.no_progress);
    let summary = generator.run(locations, mode, &progress).await;
    progress.finish_and_clear();

    for report in &summary.reports {
        println!("{}", format_report(report, mode));
    }
    Ok(summary)
}

fn format_report(report: &ProjectReport, mode: RunMode) -> String {
    let manifest = display_path(&report.location.manifest);
    match (&report.result, mode) {
        (Ok(WriteOutcome::Created), RunMode::Write) => {
            format!("  {} {manifest}", label("created").green())
        }
        (Ok(WriteOutcome::Updated), RunMode::Write) => {
            format!("  {} {manifest}", label("updated").yellow())
        }
        (Ok(WriteOutcome::Created), RunMode::Check) => {
            format!("  {} {manifest}", label("missing").yellow())
        }
        (Ok(WriteOutcome::Updated), RunMode::Check) => {
            format!("  {} {manifest}", label("stale").yellow())
        }
        (Ok(WriteOutcome::Unchanged), _) => {
            format!("  {} {manifest}", label("unchanged").bright_black())
        }
        (Err(error), _) => {
            let kind = find_scaffold_error(error).map_or("Error", |e| e.kind());
            format!(
                "  {} {}: {}: {:#}",
                label("failed").red(),
                display_path(&report.location.project_file),
                kind.red().bold(),
                error
            )
        }
    }
}

/// Status word padded to a fixed column before coloring.
fn label(status: &str) -> String {
    format!("{status:<10}")
}
