//! Loading project descriptors from `scaffold.toml`.
//!
//! # File Format
//!
//! ```toml
//! [project]
//! name = "foxcache"
//! pretty-name = "Fox Cache"
//! description = "Reactive persistent cache for applications based on Hookless."
//! inception-year = 2020
//! jdk = 17
//! javadoc = false
//! stagean = true
//!
//! [dependencies]
//! use = [
//!     "closeablescope",
//!     "noexception",
//!     { bundle = "hookless", version = "0.17.1" },
//!     # Used to serialize cache content.
//!     "com.esotericsoftware:kryo:5.2.0",
//!     "junit",
//! ]
//!
//! [javadoc]
//! links = ["https://stagean.machinezoo.com/javadoc/"]
//! suppress = ["noexception"]
//! ```
//!
//! A plain string in `use` is a bundle id, unless it contains `:`, in which case it
//! is an inline `group:artifact:version` coordinate.

use super::{DEFAULT_TOOLCHAIN_VERSION, DependencyRequest, ProjectDescriptor, ProjectFlags};
use crate::core::ScaffoldError;
use crate::registry::{Coordinate, is_valid_version};
use anyhow::{Context, Result};
use chrono::Datelike;
use regex::Regex;
use serde::Deserialize;
use std::collections::BTreeSet;
use std::path::Path;
use std::sync::LazyLock;

/// Bundle ids and project names: lowercase words joined by `.`, `-` or `_`.
static IDENTIFIER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-z0-9][a-z0-9._-]*$").expect("identifier pattern is valid")
});

/// Earliest accepted inception year.
const MIN_INCEPTION_YEAR: i32 = 1970;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ProjectFile {
    project: ProjectSection,
    #[serde(default)]
    dependencies: DependenciesSection,
    #[serde(default)]
    javadoc: JavadocSection,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct ProjectSection {
    name: String,
    #[serde(default)]
    pretty_name: Option<String>,
    #[serde(default)]
    description: String,
    inception_year: i32,
    #[serde(default = "default_jdk")]
    jdk: u32,
    #[serde(default)]
    group: Option<String>,
    #[serde(default)]
    homepage: Option<String>,
    #[serde(default)]
    license: Option<String>,
    #[serde(default = "default_true")]
    javadoc: bool,
    #[serde(default)]
    stagean: bool,
    #[serde(default = "default_true")]
    website: bool,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct DependenciesSection {
    #[serde(default, rename = "use")]
    uses: Vec<RequestSpec>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct JavadocSection {
    #[serde(default)]
    links: Vec<String>,
    #[serde(default)]
    suppress: Vec<String>,
}

/// A request as written in the file.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RequestSpec {
    /// `"hookless"` or `"group:artifact:version"`
    Simple(String),
    /// `{ bundle = "hookless", version = "1.0" }` or `{ coordinate = "g:a", version = "1.0" }`
    Detailed {
        #[serde(default)]
        bundle: Option<String>,
        #[serde(default)]
        coordinate: Option<String>,
        #[serde(default)]
        version: Option<String>,
    },
}

const fn default_true() -> bool {
    true
}

const fn default_jdk() -> u32 {
    DEFAULT_TOOLCHAIN_VERSION
}

impl ProjectDescriptor {
    /// Load and validate a descriptor from a `scaffold.toml` file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read project file: {}", path.display()))?;
        Ok(Self::parse(&content, &path.display().to_string())?)
    }

    /// Parse and validate a descriptor from TOML text.
    ///
    /// `file` is only used in error messages.
    pub fn parse(content: &str, file: &str) -> Result<Self, ScaffoldError> {
        let invalid = |reason: String| ScaffoldError::ProjectConfigError {
            file: file.to_string(),
            reason,
        };

        let parsed: ProjectFile = toml::from_str(content).map_err(|e| invalid(e.to_string()))?;
        let section = parsed.project;

        if !IDENTIFIER.is_match(&section.name) {
            return Err(invalid(format!(
                "project name '{}' must be lowercase letters, digits, '.', '-' or '_'",
                section.name
            )));
        }

        let current_year = chrono::Local::now().year();
        if section.inception_year < MIN_INCEPTION_YEAR || section.inception_year > current_year {
            return Err(invalid(format!(
                "inception-year {} must be between {MIN_INCEPTION_YEAR} and {current_year}",
                section.inception_year
            )));
        }

        let mut requests = Vec::with_capacity(parsed.dependencies.uses.len());
        for spec in parsed.dependencies.uses {
            requests.push(request_from_spec(spec).map_err(&invalid)?);
        }

        for link in &parsed.javadoc.links {
            if !(link.starts_with("https://") || link.starts_with("http://")) {
                return Err(invalid(format!("javadoc link '{link}' is not an http(s) URL")));
            }
        }

        let mut suppressed_links = BTreeSet::new();
        for id in parsed.javadoc.suppress {
            if !IDENTIFIER.is_match(&id) && Coordinate::parse(&id).is_err() {
                return Err(invalid(format!("cannot suppress links of invalid bundle id '{id}'")));
            }
            suppressed_links.insert(id);
        }

        Ok(Self {
            group: section.group.unwrap_or_else(|| format!("com.machinezoo.{}", section.name)),
            name: section.name,
            pretty_name: section.pretty_name,
            description: section.description,
            inception_year: section.inception_year,
            toolchain_version: section.jdk,
            homepage: section.homepage,
            license: section.license,
            flags: ProjectFlags {
                javadoc: section.javadoc,
                stagean: section.stagean,
                website: section.website,
            },
            requests,
            extra_links: parsed.javadoc.links,
            suppressed_links,
        })
    }
}

fn request_from_spec(spec: RequestSpec) -> Result<DependencyRequest, String> {
    match spec {
        RequestSpec::Simple(text) if text.contains(':') => {
            Ok(DependencyRequest::inline(Coordinate::parse(&text)?))
        }
        RequestSpec::Simple(id) => {
            check_bundle_id(&id)?;
            Ok(DependencyRequest::bundle(id))
        }
        RequestSpec::Detailed {
            bundle,
            coordinate,
            version,
        } => {
            if let Some(version) = &version
                && !is_valid_version(version)
            {
                return Err(format!("invalid version override '{version}'"));
            }
            match (bundle, coordinate) {
                (Some(id), None) => {
                    check_bundle_id(&id)?;
                    Ok(match version {
                        Some(version) => DependencyRequest::pinned(id, version),
                        None => DependencyRequest::bundle(id),
                    })
                }
                (None, Some(text)) => {
                    let mut coordinate = Coordinate::parse(&text)?;
                    if let Some(version) = version {
                        if coordinate.version.as_ref().is_some_and(|pinned| *pinned != version) {
                            return Err(format!(
                                "coordinate '{text}' already pins a version different from '{version}'"
                            ));
                        }
                        coordinate.version = Some(version);
                    }
                    Ok(DependencyRequest::inline(coordinate))
                }
                (Some(_), Some(_)) => {
                    Err("a request takes either 'bundle' or 'coordinate', not both".to_string())
                }
                (None, None) => Err("a request needs a 'bundle' or a 'coordinate'".to_string()),
            }
        }
    }
}

fn check_bundle_id(id: &str) -> Result<(), String> {
    if IDENTIFIER.is_match(id) {
        Ok(())
    } else {
        Err(format!("invalid bundle id '{id}'"))
    }
}
