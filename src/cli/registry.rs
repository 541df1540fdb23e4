//! `registry list` and `registry validate`.

use super::CliConfig;
use super::common::CommandContext;
use crate::registry::{BundleDescriptor, DocLink, Registry};
use anyhow::{Result, anyhow, bail};
use clap::{Args, Subcommand};
use colored::Colorize;

/// Inspect the bundle registry.
#[derive(Args, Debug)]
pub struct RegistryCommand {
    #[command(subcommand)]
    action: RegistryAction,
}

#[derive(Subcommand, Debug)]
enum RegistryAction {
    /// List every bundle with its coordinates and implications
    List {
        /// Output format (text, json)
        #[arg(short = 'f', long, default_value = "text")]
        format: String,
    },

    /// Check implications for unknown targets and cycles
    Validate,
}

impl RegistryCommand {
    pub async fn execute(self, cli: &CliConfig) -> Result<()> {
        let context = CommandContext::load(cli).await?;
        match self.action {
            RegistryAction::List {
                format,
            } => list(&context.registry, &format),
            RegistryAction::Validate => validate(&context.registry),
        }
    }
}

fn list(registry: &Registry, format: &str) -> Result<()> {
    match format {
        "json" => {
            let bundles: Vec<&BundleDescriptor> = registry.bundles().collect();
            println!("{}", serde_json::to_string_pretty(&bundles)?);
        }
        "text" => {
            for bundle in registry.bundles() {
                println!("{}", describe(bundle));
            }
        }
        other => return Err(anyhow!("Invalid format '{other}'. Valid formats are: text, json")),
    }
    Ok(())
}

fn describe(bundle: &BundleDescriptor) -> String {
    let mut line = bundle.id.cyan().bold().to_string();
    for coordinate in &bundle.coordinates {
        line.push_str(&format!("\n    {coordinate}"));
        if !coordinate.scope.is_compile() {
            line.push_str(&format!(" ({})", coordinate.scope).bright_black().to_string());
        }
    }
    if !bundle.implies.is_empty() {
        line.push_str(&format!("\n    implies: {}", bundle.implies.join(", ")).bright_black().to_string());
    }
    match &bundle.doc {
        Some(DocLink::Template(template)) => {
            line.push_str(&format!("\n    docs: {template}").bright_black().to_string());
        }
        Some(DocLink::Unavailable) => {
            line.push_str(&"\n    docs: unavailable".bright_black().to_string());
        }
        None => {}
    }
    line
}

fn validate(registry: &Registry) -> Result<()> {
    let problems = registry.validate();
    if problems.is_empty() {
        println!("{} Registry is valid ({} bundles)", "✓".green(), registry.len());
        return Ok(());
    }

    for problem in &problems {
        println!("  {} {problem}", "✗".red());
    }
    bail!("Registry has {} problem(s)", problems.len())
}
