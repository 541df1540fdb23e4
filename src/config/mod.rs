//! Generator configuration.
//!
//! Settings that apply to a whole run rather than to one project live in
//! `scaffold-config.toml`. Every key is optional; a missing file means defaults.
//!
//! # Location
//!
//! The first of these that is set wins:
//!
//! 1. `--config <file>` on the command line
//! 2. The `SCAFFOLD_CONFIG` environment variable
//! 3. `<config dir>/scaffold/config.toml` (`~/.config` on Linux,
//!    `~/Library/Application Support` on macOS, `%APPDATA%` on Windows)
//!
//! An explicitly named file must exist; the default location may be absent.
//!
//! # Format
//!
//! ```toml
//! max-parallel = 8
//! manifest-file = "pom.xml"
//! template = "templates/pom.xml.tera"   # relative to this file
//! registry = "registry.toml"            # relative to this file
//! discovery-depth = 4
//! ```
//!
//! Command-line flags override values from the file.

use crate::constants::{
    CONFIG_PATH_ENV, DEFAULT_DISCOVERY_DEPTH, DEFAULT_MANIFEST_FILE_NAME, default_max_parallel,
};
use crate::core::ScaffoldError;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;

/// Run-wide settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields, default)]
pub struct GeneratorConfig {
    /// Projects processed concurrently; derived from the CPU count when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_parallel: Option<usize>,
    /// File name of the manifest written next to each project file.
    pub manifest_file: String,
    /// Tera template replacing the built-in manifest template.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template: Option<PathBuf>,
    /// Registry file replacing the built-in bundle table.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registry: Option<PathBuf>,
    /// Maximum directory depth searched below a workspace root.
    pub discovery_depth: usize,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            max_parallel: None,
            manifest_file: DEFAULT_MANIFEST_FILE_NAME.to_string(),
            template: None,
            registry: None,
            discovery_depth: DEFAULT_DISCOVERY_DEPTH,
        }
    }
}

impl GeneratorConfig {
    /// Load from the first configured location, falling back to defaults.
    ///
    /// `flag` is the `--config` value, if any.
    pub async fn load(flag: Option<PathBuf>) -> Result<Self> {
        let env = std::env::var_os(CONFIG_PATH_ENV).map(PathBuf::from);
        match locate(flag, env) {
            Some((path, true)) => Self::load_from(&path).await,
            Some((path, false)) if path.exists() => Self::load_from(&path).await,
            _ => {
                tracing::debug!("No generator configuration found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Load from a specific file.
    ///
    /// Relative `template` and `registry` paths are resolved against the file's
    /// directory.
    pub async fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read generator config from {}", path.display()))?;
        let mut config = Self::parse(&content)
            .with_context(|| format!("Failed to load generator config from {}", path.display()))?;

        if let Some(base) = path.parent() {
            config.template = config.template.map(|template| base.join(template));
            config.registry = config.registry.map(|registry| base.join(registry));
        }
        tracing::debug!("Loaded generator configuration from {}", path.display());
        Ok(config)
    }

    /// Parse and validate configuration text.
    pub fn parse(content: &str) -> Result<Self, ScaffoldError> {
        let config: Self = toml::from_str(content).map_err(|e| ScaffoldError::ConfigError {
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ScaffoldError> {
        if self.max_parallel == Some(0) {
            return Err(ScaffoldError::ConfigError {
                message: "max-parallel must be at least 1".to_string(),
            });
        }
        let file_name = Path::new(&self.manifest_file);
        if self.manifest_file.is_empty()
            || file_name.file_name().is_none_or(|name| name != file_name.as_os_str())
        {
            return Err(ScaffoldError::ConfigError {
                message: format!("manifest-file '{}' must be a plain file name", self.manifest_file),
            });
        }
        Ok(())
    }

    /// Effective parallelism.
    #[must_use]
    pub fn max_parallel(&self) -> usize {
        self.max_parallel.unwrap_or_else(default_max_parallel).max(1)
    }

    /// `<config dir>/scaffold/config.toml`, if the platform has a config directory.
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("scaffold").join("config.toml"))
    }
}

/// Pick the configuration file: flag, then environment, then default location.
///
/// The boolean is true when the file was named explicitly and must exist.
fn locate(flag: Option<PathBuf>, env: Option<PathBuf>) -> Option<(PathBuf, bool)> {
    flag.or(env)
        .map(|path| (path, true))
        .or_else(|| GeneratorConfig::default_path().map(|path| (path, false)))
}
