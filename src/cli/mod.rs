//! Command-line interface for scaffold.
//!
//! # Commands
//!
//! - `generate` - Resolve projects and write their manifests
//! - `check` - Report manifests that `generate` would change, without writing
//! - `tree` - Show a project's bundle closure, dependencies and links
//! - `registry list` / `registry validate` - Inspect the bundle registry
//!
//! # Global Options
//!
//! - `--verbose` / `-v`: Debug logging
//! - `--quiet` / `-q`: Errors only
//! - `--config <PATH>`: Generator configuration file
//! - `--registry <PATH>`: Registry file replacing the built-in table
//! - `--no-progress`: Never draw progress bars
//!
//! `RUST_LOG`, when set, takes precedence over `--verbose` and `--quiet`.
//!
//! # Examples
//!
//! ```bash
//! # Regenerate every project below the current directory
//! scaffold generate
//!
//! # Fail the CI build when a manifest is stale
//! scaffold check libs/
//!
//! # Explain why a dependency is present
//! scaffold tree libs/foxcache
//! ```

pub mod common;
mod generate;
mod registry;
mod tree;


use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Settings derived from global flags, applied before any command runs.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    /// Log filter used when `RUST_LOG` is unset.
    pub log_level: String,
    /// Disable progress bars.
    pub no_progress: bool,
    /// `--config` value.
    pub config_path: Option<PathBuf>,
    /// `--registry` value.
    pub registry_path: Option<PathBuf>,
}

impl CliConfig {
    #[must_use]
    pub fn new() -> Self {
        Self {
            log_level: "warn".to_string(),
            ..Self::default()
        }
    }

    /// Install the global tracing subscriber on stderr.
    ///
    /// `RUST_LOG` wins over the flag-derived level. Calling this more than once
    /// is harmless.
    pub fn init_logging(&self) {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(&self.log_level));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    }
}

/// Multi-project build-descriptor generator.
#[derive(Parser, Debug)]
#[command(
    name = "scaffold",
    about = "Generate build manifests for a family of related libraries",
    version,
    long_about = "scaffold resolves each project's bundle requests against a shared registry \
                  and keeps the generated region of its build manifest up to date."
)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug logging
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Path to the generator configuration file
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Path to a registry file replacing the built-in bundle table
    #[arg(long, global = true, value_name = "PATH")]
    registry: Option<PathBuf>,

    /// Disable progress bars
    #[arg(long, global = true)]
    no_progress: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Resolve projects and write their manifests
    Generate(generate::GenerateCommand),

    /// Check that manifests are up to date without writing them
    Check(generate::CheckCommand),

    /// Show a project's resolved bundles, dependencies and links
    Tree(tree::TreeCommand),

    /// Inspect the bundle registry
    Registry(registry::RegistryCommand),
}

impl Cli {
    /// Execute the parsed command.
    pub async fn execute(self) -> Result<()> {
        let config = self.build_config();
        config.init_logging();
        self.execute_with_config(config).await
    }

    /// Derive [`CliConfig`] from the global flags.
    #[must_use]
    pub fn build_config(&self) -> CliConfig {
        let log_level = if self.verbose {
            "debug"
        } else if self.quiet {
            "error"
        } else {
            "warn"
        };

        CliConfig {
            log_level: log_level.to_string(),
            no_progress: self.no_progress,
            config_path: self.config.clone(),
            registry_path: self.registry.clone(),
        }
    }

    /// Execute with an explicit configuration; logging is left as is.
    pub async fn execute_with_config(self, config: CliConfig) -> Result<()> {
        match self.command {
            Commands::Generate(cmd) => cmd.execute(&config).await,
            Commands::Check(cmd) => cmd.execute(&config).await,
            Commands::Tree(cmd) => cmd.execute(&config).await,
            Commands::Registry(cmd) => cmd.execute(&config).await,
        }
    }
}
