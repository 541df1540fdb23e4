//! Resolution of project requests into concrete dependencies and documentation links.
//!
//! The resolver expands a project's ordered requests through the [`Registry`] into
//! a closure of bundles, applies version overrides, and produces the dependency
//! list and documentation links that the renderer writes into the manifest.
//!
//! # Algorithm
//!
//! 1. **Override collection**: every request's version pin is recorded up front;
//!    two requests pinning one bundle to different versions fail with
//!    [`ScaffoldError::VersionConflict`].
//! 2. **Closure walk**: requests are visited in declaration order. A bundle not yet
//!    in the closure is added, then its implications are expanded depth-first in
//!    declared order before the next request is considered. A bundle already in
//!    the closure is skipped, so the first path that reaches a bundle wins.
//! 3. **Emission**: each bundle's coordinates are emitted after those of the
//!    bundles it introduced (post-order of the same walk), so a library always
//!    follows the libraries it builds on. Each `group:artifact` pair is emitted
//!    once, at its first position.
//! 4. **Links**: documentation links follow closure order, skipping suppressed
//!    bundles, bundles marked unavailable, and everything when documentation is
//!    disabled for the project. The project's extra links come last.
//!
//! Resolution is pure: it reads the registry and the descriptor and touches
//! nothing else, so identical inputs always produce identical output.
//!
//! # Example
//!
//! ```rust,no_run
//! use scaffold_cli::project::{DependencyRequest, ProjectDescriptor};
//! use scaffold_cli::registry::Registry;
//! use scaffold_cli::resolver::Resolver;
//! use std::sync::Arc;
//!
//! # fn example() -> Result<(), scaffold_cli::core::ScaffoldError> {
//! let resolver = Resolver::new(Arc::new(Registry::builtin()?));
//! let project = ProjectDescriptor::new("demo").request(DependencyRequest::bundle("pushmode"));
//! let resolution = resolver.resolve(&project)?;
//! for dependency in &resolution.dependencies {
//!     println!("{dependency}");
//! }
//! # Ok(())
//! # }
//! ```

mod conflict;

#[cfg(test)]
mod tests;

pub use conflict::{OverrideConflict, OverrideSet};

use crate::core::ScaffoldError;
use crate::project::ProjectDescriptor;
use crate::registry::{BundleDescriptor, BundleId, Coordinate, DocLink, Registry, Scope};
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

/// A bundle in the resolved closure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClosureEntry {
    /// Bundle id.
    pub bundle_id: BundleId,
    /// Whether the bundle was pulled in by an implication rather than requested.
    pub via_transitive: bool,
    /// The bundle whose implication introduced this one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub implied_by: Option<BundleId>,
    /// Nesting depth in the walk; directly requested bundles are at depth 0.
    pub depth: usize,
}

/// One concrete dependency line of the manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedDependency {
    pub group: String,
    pub artifact: String,
    /// Final version after overrides.
    pub version: String,
    pub scope: Scope,
    /// Bundle that contributed this coordinate.
    pub source_bundle: BundleId,
    /// Whether the contributing bundle was only implied.
    pub via_transitive: bool,
}

impl ResolvedDependency {
    /// `group:artifact`
    #[must_use]
    pub fn key(&self) -> String {
        format!("{}:{}", self.group, self.artifact)
    }
}

impl fmt::Display for ResolvedDependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.group, self.artifact, self.version)?;
        if !self.scope.is_compile() {
            write!(f, " ({})", self.scope)?;
        }
        Ok(())
    }
}

/// Ordered, duplicate-free documentation URLs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ResolvedLinkSet {
    links: Vec<String>,
}

impl ResolvedLinkSet {
    /// Append a link unless it is already present.
    pub fn push(&mut self, link: String) -> bool {
        if self.links.contains(&link) {
            return false;
        }
        self.links.push(link);
        true
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.links.iter().map(String::as_str)
    }

    #[must_use]
    pub fn contains(&self, link: &str) -> bool {
        self.links.iter().any(|known| known == link)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.links.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.links
    }
}

/// Output of resolving one project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolution {
    /// Name of the resolved project.
    pub project: String,
    /// Bundles in discovery order.
    pub closure: Vec<ClosureEntry>,
    /// Dependencies in emission order.
    pub dependencies: Vec<ResolvedDependency>,
    /// Documentation links in closure order.
    pub links: ResolvedLinkSet,
}

impl Resolution {
    /// Closure bundle ids in discovery order.
    #[must_use]
    pub fn bundle_ids(&self) -> Vec<&str> {
        self.closure.iter().map(|entry| entry.bundle_id.as_str()).collect()
    }
}

/// Expands project requests against a shared registry.
///
/// Cloning a resolver is cheap; clones share the same registry.
#[derive(Debug, Clone)]
pub struct Resolver {
    registry: Arc<Registry>,
}

impl Resolver {
    #[must_use]
    pub const fn new(registry: Arc<Registry>) -> Self {
        Self {
            registry,
        }
    }

    #[must_use]
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Resolve one project.
    ///
    /// # Errors
    ///
    /// - [`ScaffoldError::UnknownBundle`] when a request or implication names a
    ///   bundle the registry lacks
    /// - [`ScaffoldError::RegistryCycle`] when the walk runs into an implication cycle
    /// - [`ScaffoldError::VersionConflict`] when two requests pin one bundle differently
    /// - [`ScaffoldError::MissingVersion`] when an unversioned coordinate gets no pin
    pub fn resolve(&self, project: &ProjectDescriptor) -> Result<Resolution, ScaffoldError> {
        let requests = project.effective_requests();
        debug!("Resolving project '{}' with {} request(s)", project.name, requests.len());

        let overrides = OverrideSet::collect(&requests).map_err(|conflict| {
            ScaffoldError::VersionConflict {
                project: project.name.clone(),
                bundle: conflict.bundle,
                first: conflict.first,
                second: conflict.second,
            }
        })?;

        let mut catalog = Catalog {
            registry: &self.registry,
            inline: HashMap::new(),
        };
        for request in &requests {
            if let Some(coordinate) = &request.inline {
                catalog.inline.entry(request.bundle_id.clone()).or_insert_with(|| {
                    BundleDescriptor::new(request.bundle_id.clone()).coordinate(coordinate.clone())
                });
            }
        }

        let mut walk = Walk {
            project: &project.name,
            closure: Vec::new(),
            seen: HashSet::new(),
            stack: Vec::new(),
            post_order: Vec::new(),
        };
        for request in &requests {
            walk.visit(&catalog, &request.bundle_id, None, 0)?;
        }

        let versions = VersionPicker {
            project: &project.name,
            overrides: &overrides,
        };
        let dependencies = emit_dependencies(&catalog, &walk, &versions)?;
        let links = collect_links(&catalog, &walk.closure, project, &versions)?;

        debug!(
            "Resolved '{}': {} bundles, {} dependencies, {} links",
            project.name,
            walk.closure.len(),
            dependencies.len(),
            links.len()
        );

        Ok(Resolution {
            project: project.name.clone(),
            closure: walk.closure,
            dependencies,
            links,
        })
    }
}

/// Registry plus the ad-hoc bundles of inline requests.
struct Catalog<'a> {
    registry: &'a Registry,
    inline: HashMap<BundleId, BundleDescriptor>,
}

impl Catalog<'_> {
    fn get(&self, id: &str) -> Option<&BundleDescriptor> {
        self.inline.get(id).or_else(|| self.registry.get(id))
    }
}

/// Mutable state of the depth-first closure walk.
struct Walk<'p> {
    project: &'p str,
    closure: Vec<ClosureEntry>,
    seen: HashSet<BundleId>,
    /// Bundles currently being expanded, outermost first.
    stack: Vec<BundleId>,
    /// Bundles whose expansion has finished, in completion order.
    post_order: Vec<BundleId>,
}

impl Walk<'_> {
    fn visit(
        &mut self,
        catalog: &Catalog<'_>,
        id: &str,
        parent: Option<&str>,
        depth: usize,
    ) -> Result<(), ScaffoldError> {
        if let Some(start) = self.stack.iter().position(|open| open == id) {
            let mut chain: Vec<&str> = self.stack[start..].iter().map(String::as_str).collect();
            chain.push(id);
            return Err(ScaffoldError::RegistryCycle {
                project: self.project.to_string(),
                chain: chain.join(" -> "),
            });
        }
        if self.seen.contains(id) {
            debug!("Bundle '{}' already in closure, skipping", id);
            return Ok(());
        }

        let Some(descriptor) = catalog.get(id) else {
            return Err(self.unknown_bundle(catalog.registry, id, parent));
        };

        debug!("Adding bundle '{}' at depth {}", id, depth);
        self.seen.insert(id.to_string());
        self.closure.push(ClosureEntry {
            bundle_id: id.to_string(),
            via_transitive: parent.is_some(),
            implied_by: parent.map(str::to_string),
            depth,
        });

        self.stack.push(id.to_string());
        for implied in &descriptor.implies {
            self.visit(catalog, implied, Some(id), depth + 1)?;
        }
        self.stack.pop();
        self.post_order.push(id.to_string());
        Ok(())
    }

    fn unknown_bundle(&self, registry: &Registry, id: &str, parent: Option<&str>) -> ScaffoldError {
        let error = registry.lookup(id).err();
        let hint = error
            .and_then(|error| error.suggestion)
            .map(|suggestion| format!(". Did you mean '{suggestion}'?"))
            .unwrap_or_default();
        ScaffoldError::UnknownBundle {
            project: self.project.to_string(),
            bundle: id.to_string(),
            origin: parent.map_or_else(
                || "requested directly".to_string(),
                |parent| format!("implied by '{parent}'"),
            ),
            hint,
        }
    }
}

/// Final version of a bundle's coordinate: the bundle's pin, else the registry version.
struct VersionPicker<'a> {
    project: &'a str,
    overrides: &'a OverrideSet,
}

impl VersionPicker<'_> {
    fn pick(&self, bundle: &str, coordinate: &Coordinate) -> Result<String, ScaffoldError> {
        self.overrides
            .version_of(bundle)
            .or(coordinate.version.as_deref())
            .map(str::to_string)
            .ok_or_else(|| ScaffoldError::MissingVersion {
                project: self.project.to_string(),
                bundle: bundle.to_string(),
                artifact: coordinate.key(),
            })
    }
}

fn emit_dependencies(
    catalog: &Catalog<'_>,
    walk: &Walk<'_>,
    versions: &VersionPicker<'_>,
) -> Result<Vec<ResolvedDependency>, ScaffoldError> {
    let transitive: HashMap<&str, bool> = walk
        .closure
        .iter()
        .map(|entry| (entry.bundle_id.as_str(), entry.via_transitive))
        .collect();

    let mut dependencies: Vec<ResolvedDependency> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();

    for id in &walk.post_order {
        let Some(descriptor) = catalog.get(id) else {
            continue;
        };
        for coordinate in &descriptor.coordinates {
            let dependency = ResolvedDependency {
                group: coordinate.group.clone(),
                artifact: coordinate.artifact.clone(),
                version: versions.pick(id, coordinate)?,
                scope: coordinate.scope,
                source_bundle: id.clone(),
                via_transitive: transitive.get(id.as_str()).copied().unwrap_or(false),
            };

            let key = dependency.key();
            if let Some(&position) = positions.get(&key) {
                let kept = &dependencies[position];
                if kept.version != dependency.version {
                    warn!(
                        "Project '{}': {} {} from bundle '{}' ignored, keeping {} from bundle '{}'",
                        versions.project,
                        key,
                        dependency.version,
                        dependency.source_bundle,
                        kept.version,
                        kept.source_bundle
                    );
                }
                continue;
            }
            positions.insert(key, dependencies.len());
            dependencies.push(dependency);
        }
    }

    Ok(dependencies)
}

fn collect_links(
    catalog: &Catalog<'_>,
    closure: &[ClosureEntry],
    project: &ProjectDescriptor,
    versions: &VersionPicker<'_>,
) -> Result<ResolvedLinkSet, ScaffoldError> {
    for id in unmatched_suppressions(closure, project) {
        warn!(
            "Project '{}' suppresses links of '{}', which is not among its bundles",
            project.name, id
        );
    }

    let mut links = ResolvedLinkSet::default();
    if !project.flags.javadoc {
        debug!("Documentation disabled for '{}', emitting no links", project.name);
        return Ok(links);
    }

    for entry in closure {
        if project.suppressed_links.contains(&entry.bundle_id) {
            debug!("Link of bundle '{}' suppressed", entry.bundle_id);
            continue;
        }
        let Some(descriptor) = catalog.get(&entry.bundle_id) else {
            continue;
        };
        let (Some(template), Some(first)) = (&descriptor.doc, descriptor.coordinates.first()) else {
            continue;
        };
        if matches!(template, DocLink::Unavailable) {
            continue;
        }
        let version = versions.pick(&entry.bundle_id, first)?;
        if let Some(link) = template.expand(&first.group, &first.artifact, &version) {
            links.push(link);
        }
    }

    for link in &project.extra_links {
        links.push(link.clone());
    }

    Ok(links)
}

/// Suppressed bundle ids that never appear in the closure.
fn unmatched_suppressions<'a>(closure: &[ClosureEntry], project: &'a ProjectDescriptor) -> Vec<&'a BundleId> {
    project
        .suppressed_links
        .iter()
        .filter(|id| !closure.iter().any(|entry| entry.bundle_id == **id))
        .collect()
}
