//! Manifest rendering and region-preserving writes.
//!
//! [`Renderer`] turns a project and its resolved dependencies into the text of the
//! manifest's generated region. The default template produces a Maven `pom.xml`
//! body; a custom Tera template can be supplied through configuration. Rendering
//! is pure: the same inputs always give byte-identical text.
//!
//! The [`writer`] module places that text between the region markers of the
//! on-disk manifest without disturbing anything outside them.
//!
//! # Template Context
//!
//! | Variable        | Content                                              |
//! |-----------------|------------------------------------------------------|
//! | `project`       | The project descriptor (name, group, description...) |
//! | `display_name`  | Pretty name, or the name when none is set            |
//! | `homepage`      | Homepage URL, null when the project has no website   |
//! | `license`       | License name or null                                 |
//! | `javadoc`       | Whether documentation is enabled                     |
//! | `dependencies`  | Resolved dependencies in emission order              |
//! | `links`         | Documentation links                                  |
//!
//! Values are inserted raw; templates escape them with Tera's `escape_xml` filter.

pub mod writer;

pub use writer::{ManifestPlan, WriteOutcome};

use crate::core::ScaffoldError;
use crate::project::ProjectDescriptor;
use crate::resolver::{Resolution, ResolvedDependency, ResolvedLinkSet};
use anyhow::{Context, Result};
use serde::Serialize;
use std::path::Path;
use tera::{Context as TeraContext, Tera};

const TEMPLATE_NAME: &str = "manifest";

/// Built-in Maven `pom.xml` region template.
pub const DEFAULT_TEMPLATE: &str = include_str!("pom.xml.tera");

#[derive(Serialize)]
struct ManifestContext<'a> {
    project: &'a ProjectDescriptor,
    display_name: &'a str,
    homepage: Option<String>,
    license: Option<&'a str>,
    javadoc: bool,
    dependencies: &'a [ResolvedDependency],
    links: &'a ResolvedLinkSet,
}

/// Renders generated regions from a single compiled template.
#[derive(Debug)]
pub struct Renderer {
    tera: Tera,
}

impl Renderer {
    /// A renderer using [`DEFAULT_TEMPLATE`].
    pub fn new() -> Result<Self, ScaffoldError> {
        Self::with_template(DEFAULT_TEMPLATE)
    }

    /// A renderer for a template given as text.
    pub fn with_template(source: &str) -> Result<Self, ScaffoldError> {
        let mut tera = Tera::default();
        tera.autoescape_on(vec![]);
        tera.add_raw_template(TEMPLATE_NAME, source).map_err(|e| ScaffoldError::TemplateError {
            reason: format_tera_error(&e),
        })?;
        Ok(Self {
            tera,
        })
    }

    /// A renderer for a template file.
    pub fn from_template_file(path: &Path) -> Result<Self> {
        let source = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read template file: {}", path.display()))?;
        Self::with_template(&source)
            .with_context(|| format!("Failed to compile template {}", path.display()))
    }

    /// Render the generated region for a project.
    ///
    /// The result always ends with a newline.
    pub fn render(
        &self,
        project: &ProjectDescriptor,
        dependencies: &[ResolvedDependency],
        links: &ResolvedLinkSet,
    ) -> Result<String, ScaffoldError> {
        let homepage = project.homepage.clone().or_else(|| {
            project.flags.website.then(|| format!("https://{}.machinezoo.com/", project.name))
        });
        let manifest = ManifestContext {
            project,
            display_name: project.display_name(),
            homepage,
            license: project.license.as_deref(),
            javadoc: project.flags.javadoc,
            dependencies,
            links,
        };

        let context = TeraContext::from_serialize(&manifest).map_err(|e| {
            ScaffoldError::TemplateError {
                reason: format_tera_error(&e),
            }
        })?;
        let mut text = self.tera.render(TEMPLATE_NAME, &context).map_err(|e| {
            ScaffoldError::TemplateError {
                reason: format!("project '{}': {}", project.name, format_tera_error(&e)),
            }
        })?;

        if !text.ends_with('\n') {
            text.push('\n');
        }
        Ok(text)
    }

    /// Render straight from a [`Resolution`].
    pub fn render_resolution(
        &self,
        project: &ProjectDescriptor,
        resolution: &Resolution,
    ) -> Result<String, ScaffoldError> {
        self.render(project, &resolution.dependencies, &resolution.links)
    }
}

/// Flatten a Tera error chain into one line.
fn format_tera_error(error: &tera::Error) -> String {
    use std::error::Error;

    let mut messages = vec![error.to_string()];
    let mut source = error.source();
    while let Some(inner) = source {
        messages.push(inner.to_string());
        source = inner.source();
    }
    messages.retain(|message| !message.trim().is_empty());
    messages.join(": ")
}
