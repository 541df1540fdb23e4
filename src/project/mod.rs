//! Project descriptors: one library's metadata and its ordered bundle requests.
//!
//! A [`ProjectDescriptor`] is plain data. Every "kind" of project is expressed by
//! which bundles it requests and which flags it sets, never by a distinct type.
//! Descriptors are normally loaded from a `scaffold.toml` file (see [`config`])
//! and live for a single resolution run.

pub mod config;

use crate::constants::STAGEAN_BUNDLE;
use crate::registry::{BundleId, Coordinate};
use chrono::Datelike;
use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;

/// Toolchain (JDK) level used when a descriptor is built without one.
pub const DEFAULT_TOOLCHAIN_VERSION: u32 = 17;

/// One capability request, the equivalent of a single `use_x()` line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DependencyRequest {
    /// Requested bundle. For inline requests this is `group:artifact`.
    pub bundle_id: BundleId,
    /// Explicit version pin for the bundle's own coordinates.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version_override: Option<String>,
    /// Raw coordinate for inline requests that bypass the registry.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inline: Option<Coordinate>,
}

impl DependencyRequest {
    /// Request a registry bundle at its registry version.
    pub fn bundle(id: impl Into<BundleId>) -> Self {
        Self {
            bundle_id: id.into(),
            version_override: None,
            inline: None,
        }
    }

    /// Request a registry bundle with an explicit version.
    pub fn pinned(id: impl Into<BundleId>, version: impl Into<String>) -> Self {
        Self {
            bundle_id: id.into(),
            version_override: Some(version.into()),
            inline: None,
        }
    }

    /// Request a raw coordinate that is not in the registry.
    ///
    /// The coordinate's version acts as the request's override, so two inline
    /// requests for the same artifact with different versions conflict.
    #[must_use]
    pub fn inline(coordinate: Coordinate) -> Self {
        Self {
            bundle_id: coordinate.key(),
            version_override: coordinate.version.clone(),
            inline: Some(coordinate),
        }
    }

    /// Whether this request bypasses the registry.
    #[must_use]
    pub const fn is_inline(&self) -> bool {
        self.inline.is_some()
    }
}

impl fmt::Display for DependencyRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.version_override {
            Some(version) => write!(f, "{}@{}", self.bundle_id, version),
            None => write!(f, "{}", self.bundle_id),
        }
    }
}

/// Boolean switches copied from the project file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProjectFlags {
    /// Generate API documentation; when off, no documentation links are emitted.
    pub javadoc: bool,
    /// Use stage annotations; implies a leading request for the `stagean` bundle.
    pub stagean: bool,
    /// The project has a website (rendered as the manifest's `<url>`).
    pub website: bool,
}

impl Default for ProjectFlags {
    fn default() -> Self {
        Self {
            javadoc: true,
            stagean: false,
            website: true,
        }
    }
}

/// In-memory representation of one project's declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectDescriptor {
    /// Repository and artifact name, e.g. `foxcache`.
    pub name: String,
    /// Human-readable name, e.g. `Fox Cache`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pretty_name: Option<String>,
    /// One-line description.
    pub description: String,
    /// Year the project started.
    pub inception_year: i32,
    /// Toolchain (JDK) level.
    pub toolchain_version: u32,
    /// Maven group for the project's own coordinates.
    pub group: String,
    /// Homepage override; derived from the name when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub homepage: Option<String>,
    /// License name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license: Option<String>,
    /// Boolean switches.
    pub flags: ProjectFlags,
    /// Requests in declaration order.
    pub requests: Vec<DependencyRequest>,
    /// Documentation links appended after bundle links.
    pub extra_links: Vec<String>,
    /// Bundles whose documentation links are deliberately omitted.
    pub suppressed_links: BTreeSet<BundleId>,
}

impl ProjectDescriptor {
    /// A descriptor with default metadata and no requests.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            group: format!("com.machinezoo.{name}"),
            name,
            pretty_name: None,
            description: String::new(),
            inception_year: chrono::Local::now().year(),
            toolchain_version: DEFAULT_TOOLCHAIN_VERSION,
            homepage: None,
            license: None,
            flags: ProjectFlags::default(),
            requests: Vec::new(),
            extra_links: Vec::new(),
            suppressed_links: BTreeSet::new(),
        }
    }

    /// Append a request.
    #[must_use]
    pub fn request(mut self, request: DependencyRequest) -> Self {
        self.requests.push(request);
        self
    }

    /// Replace the flags.
    #[must_use]
    pub const fn with_flags(mut self, flags: ProjectFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Suppress the documentation link of a bundle.
    #[must_use]
    pub fn suppress_link(mut self, id: impl Into<BundleId>) -> Self {
        self.suppressed_links.insert(id.into());
        self
    }

    /// The name shown to humans, falling back to the repository name.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.pretty_name.as_deref().unwrap_or(&self.name)
    }

    /// Requests the resolver actually sees: flag-implied base requests first,
    /// then the declared ones.
    #[must_use]
    pub fn effective_requests(&self) -> Vec<DependencyRequest> {
        let mut requests = Vec::with_capacity(self.requests.len() + 1);
        if self.flags.stagean {
            requests.push(DependencyRequest::bundle(STAGEAN_BUNDLE));
        }
        requests.extend(self.requests.iter().cloned());
        requests
    }
}
