//! Display how a project's requests expand.
//!
//! # Output Format
//!
//! ## Tree Format (Default)
//! ```text
//! foxcache
//! ├── stagean 1.3.0
//! ├── noexception-slf4j 1.7.1
//! │   ├── noexception 1.7.1 (*)
//! │   └── slf4j 1.7.32
//! └── hookless 0.17.1
//!     ├── closeablescope 1.0.1
//!     └── noexception 1.7.1 (*)
//!
//! Dependencies:
//!   com.machinezoo.stagean:stagean:1.3.0 [stagean]
//!   ...
//!
//! Links:
//!   https://stagean.machinezoo.com/javadoc/
//!
//! (*) = already pulled in earlier
//! ```
//!
//! ## JSON Format
//! The full resolution: closure entries, dependencies and links.

use super::CliConfig;
use super::common::CommandContext;
use crate::constants::PROJECT_FILE_NAME;
use crate::resolver::{ClosureEntry, Resolution, Resolver};
use crate::workspace::{Generator, ProjectLocation, is_project_dir};
use anyhow::{Result, anyhow};
use clap::Args;
use colored::Colorize;
use std::path::PathBuf;

/// Show a project's resolved bundles, dependencies and links.
#[derive(Args, Debug)]
pub struct TreeCommand {
    /// Project directory or project file
    #[arg(default_value = ".")]
    path: PathBuf,

    /// Output format (tree, json)
    #[arg(short = 'f', long, default_value = "tree")]
    format: String,
}

impl TreeCommand {
    pub async fn execute(self, cli: &CliConfig) -> Result<()> {
        self.validate_arguments()?;

        let project_file = if self.path.is_dir() {
            if !is_project_dir(&self.path) {
                return Err(anyhow!(
                    "No {PROJECT_FILE_NAME} in {}",
                    self.path.display()
                ));
            }
            self.path.join(PROJECT_FILE_NAME)
        } else {
            self.path.clone()
        };

        let context = CommandContext::load(cli).await?;
        let location = ProjectLocation::new(project_file, &context.config.manifest_file);
        let generator = Generator::new(context.registry.clone(), context.renderer()?, 1);
        let (_, resolution) = generator.resolve(&location).await?;

        match self.format.as_str() {
            "json" => println!("{}", serde_json::to_string_pretty(&resolution)?),
            _ => print!("{}", render_tree(&resolution, generator.resolver())),
        }
        Ok(())
    }

    fn validate_arguments(&self) -> Result<()> {
        match self.format.as_str() {
            "tree" | "json" => Ok(()),
            other => Err(anyhow!("Invalid format '{other}'. Valid formats are: tree, json")),
        }
    }
}

/// Text rendering of a resolution.
fn render_tree(resolution: &Resolution, resolver: &Resolver) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n", resolution.project.cyan().bold()));

    let roots: Vec<&ClosureEntry> =
        resolution.closure.iter().filter(|entry| entry.implied_by.is_none()).collect();
    let mut repeated = false;
    for (i, root) in roots.iter().enumerate() {
        let is_last = i == roots.len() - 1;
        print_node(&root.bundle_id, "", is_last, false, resolution, resolver, &mut out, &mut repeated);
    }

    out.push_str(&format!("\n{}\n", "Dependencies:".bold()));
    for dependency in &resolution.dependencies {
        out.push_str(&format!(
            "  {} {}\n",
            dependency,
            format!("[{}]", dependency.source_bundle).bright_black()
        ));
    }

    if !resolution.links.is_empty() {
        out.push_str(&format!("\n{}\n", "Links:".bold()));
        for link in resolution.links.iter() {
            out.push_str(&format!("  {link}\n"));
        }
    }

    if repeated {
        out.push_str(&format!("\n{}\n", "(*) = already pulled in earlier".bright_black()));
    }
    out
}

#[allow(clippy::too_many_arguments)]
fn print_node(
    id: &str,
    prefix: &str,
    is_last: bool,
    is_repeat: bool,
    resolution: &Resolution,
    resolver: &Resolver,
    out: &mut String,
    repeated: &mut bool,
) {
    let connector = if is_last { "└── " } else { "├── " };
    let version = resolution
        .dependencies
        .iter()
        .find(|dependency| dependency.source_bundle == id)
        .map(|dependency| format!(" {}", dependency.version.bright_black()))
        .unwrap_or_default();
    let marker = if is_repeat {
        *repeated = true;
        " (*)".bright_black().to_string()
    } else {
        String::new()
    };
    out.push_str(&format!("{prefix}{connector}{}{version}{marker}\n", id.cyan()));

    if is_repeat {
        return;
    }

    let implies = resolver.registry().get(id).map(|bundle| bundle.implies.as_slice()).unwrap_or_default();
    let child_prefix = if is_last {
        format!("{prefix}    ")
    } else {
        format!("{prefix}│   ")
    };
    for (i, child) in implies.iter().enumerate() {
        let introduced_here = resolution
            .closure
            .iter()
            .any(|entry| entry.bundle_id == *child && entry.implied_by.as_deref() == Some(id));
        print_node(
            child,
            &child_prefix,
            i == implies.len() - 1,
            !introduced_here,
            resolution,
            resolver,
            out,
            repeated,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::project::{DependencyRequest, ProjectDescriptor};
    use crate::registry::Registry;
    use std::sync::Arc;

    #[test]
    fn test_render_tree_marks_repeats() {
        colored::control::set_override(false);
        let resolver = Resolver::new(Arc::new(Registry::builtin().unwrap()));
        let project = ProjectDescriptor::new("demo")
            .request(DependencyRequest::bundle("noexception-slf4j"))
            .request(DependencyRequest::bundle("hookless"));
        let resolution = resolver.resolve(&project).unwrap();

        let text = render_tree(&resolution, &resolver);
        assert!(text.starts_with("demo\n├── noexception-slf4j 1.7.1\n"));
        assert!(text.contains("│   ├── noexception 1.7.1\n"));
        assert!(text.contains("│   └── slf4j 1.7.32\n"));
        assert!(text.contains("└── hookless 0.17.1\n"));
        assert!(text.contains("    └── noexception 1.7.1 (*)\n"));
        assert!(text.contains("(*) = already pulled in earlier"));
        assert!(text.contains("Dependencies:\n  com.machinezoo.noexception:noexception:1.7.1 [noexception]\n"));
    }

    #[test]
    fn test_invalid_format_rejected() {
        let command = TreeCommand {
            path: PathBuf::from("."),
            format: "xml".to_string(),
        };
        assert!(command.validate_arguments().is_err());
    }
}
