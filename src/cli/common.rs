//! Shared setup for commands: configuration, registry and renderer.

use super::CliConfig;
use crate::config::GeneratorConfig;
use crate::registry::Registry;
use crate::render::Renderer;
use anyhow::Result;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Everything a command needs besides its own arguments.
#[derive(Debug)]
pub struct CommandContext {
    pub config: GeneratorConfig,
    pub registry: Arc<Registry>,
    pub no_progress: bool,
}

impl CommandContext {
    /// Load configuration and the registry.
    ///
    /// `--registry` beats the `registry` key of the configuration file, which beats
    /// the built-in table.
    pub async fn load(cli: &CliConfig) -> Result<Self> {
        let config = GeneratorConfig::load(cli.config_path.clone()).await?;
        let registry = match cli.registry_path.as_ref().or(config.registry.as_ref()) {
            Some(path) => {
                tracing::debug!("Loading registry from {}", path.display());
                Registry::load(path)?
            }
            None => Registry::builtin()?,
        };
        Ok(Self {
            config,
            registry: Arc::new(registry),
            no_progress: cli.no_progress,
        })
    }

    /// The configured template, or the built-in one.
    pub fn renderer(&self) -> Result<Renderer> {
        match &self.config.template {
            Some(path) => Renderer::from_template_file(path),
            None => Ok(Renderer::new()?),
        }
    }
}

/// Paths to operate on, defaulting to the current directory.
#[must_use]
pub fn paths_or_current(paths: &[PathBuf]) -> Vec<PathBuf> {
    if paths.is_empty() {
        vec![PathBuf::from(".")]
    } else {
        paths.to_vec()
    }
}

/// Path shown in reports: relative to the current directory when possible.
#[must_use]
pub fn display_path(path: &Path) -> String {
    std::env::current_dir()
        .ok()
        .and_then(|cwd| path.strip_prefix(cwd).ok().map(Path::to_path_buf))
        .unwrap_or_else(|| path.to_path_buf())
        .display()
        .to_string()
}
