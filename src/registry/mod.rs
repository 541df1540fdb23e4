//! Bundle registry: the shared table of known dependency bundles.
//!
//! A bundle is a named unit of dependency configuration: one or more library
//! coordinates, an optional list of bundles it transitively implies, and an
//! optional documentation link. Projects request bundles by id; the
//! [`resolver`](crate::resolver) expands those requests through this table.
//!
//! The registry is immutable once constructed. It is built once per process,
//! either from the table compiled into the binary ([`Registry::builtin`]) or from a
//! registry file ([`Registry::load`]), and shared read-only between workers.
//!
//! # Registry File Format
//!
//! ```toml
//! [bundles.hookless]
//! coordinates = ["com.machinezoo.hookless:hookless:0.17.1"]
//! implies = ["closeablescope", "noexception"]
//! doc = "https://hookless.machinezoo.com/javadoc/"
//!
//! [bundles.junit]
//! coordinates = [
//!     { group = "org.junit.jupiter", artifact = "junit-jupiter", version = "5.8.1", scope = "test" },
//! ]
//!
//! [bundles.kryo]
//! coordinates = ["com.esotericsoftware:kryo:5.2.0"]
//! doc = "unavailable"
//! ```

mod builtin;
mod coordinate;
mod validation;

pub use coordinate::{Coordinate, Scope, is_valid_version};
pub use validation::RegistryProblem;

use crate::core::ScaffoldError;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::path::Path;
use strsim::levenshtein;
use thiserror::Error;

/// Identifier of a bundle, unique within a registry.
pub type BundleId = String;

/// Literal used in registry files to mark a documentation link as intentionally absent.
const DOC_UNAVAILABLE: &str = "unavailable";

/// Maximum edit distance for "did you mean" suggestions.
const SUGGESTION_MAX_DISTANCE: usize = 3;

/// Documentation link of a bundle.
///
/// `Unavailable` is distinct from having no link at all: it records that the
/// library is known to publish no usable API docs, so tooling does not flag it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DocLink {
    /// URL template; `{group}`, `{artifact}` and `{version}` are substituted from
    /// the bundle's first coordinate.
    Template(String),
    /// The library has no stable documentation to link to.
    Unavailable,
}

impl DocLink {
    /// Expand the template against a resolved coordinate.
    ///
    /// Returns `None` for [`DocLink::Unavailable`].
    #[must_use]
    pub fn expand(&self, group: &str, artifact: &str, version: &str) -> Option<String> {
        match self {
            Self::Template(template) => Some(
                template
                    .replace("{group}", group)
                    .replace("{artifact}", artifact)
                    .replace("{version}", version),
            ),
            Self::Unavailable => None,
        }
    }
}

impl From<String> for DocLink {
    fn from(value: String) -> Self {
        if value == DOC_UNAVAILABLE {
            Self::Unavailable
        } else {
            Self::Template(value)
        }
    }
}

impl From<DocLink> for String {
    fn from(value: DocLink) -> Self {
        match value {
            DocLink::Template(template) => template,
            DocLink::Unavailable => DOC_UNAVAILABLE.to_string(),
        }
    }
}

/// Descriptor of a single bundle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BundleDescriptor {
    /// Bundle id.
    pub id: BundleId,
    /// Coordinates contributed by this bundle, in emission order.
    pub coordinates: Vec<Coordinate>,
    /// Bundles pulled in automatically, in expansion order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub implies: Vec<BundleId>,
    /// Documentation link template.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doc: Option<DocLink>,
}

impl BundleDescriptor {
    /// Start a descriptor with no coordinates, implications or docs.
    pub fn new(id: impl Into<BundleId>) -> Self {
        Self {
            id: id.into(),
            coordinates: Vec::new(),
            implies: Vec::new(),
            doc: None,
        }
    }

    /// Append a coordinate.
    #[must_use]
    pub fn coordinate(mut self, coordinate: Coordinate) -> Self {
        self.coordinates.push(coordinate);
        self
    }

    /// Append implied bundles.
    #[must_use]
    pub fn implies<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<BundleId>,
    {
        self.implies.extend(ids.into_iter().map(Into::into));
        self
    }

    /// Set the documentation link template.
    #[must_use]
    pub fn doc(mut self, template: impl Into<String>) -> Self {
        self.doc = Some(DocLink::Template(template.into()));
        self
    }

    /// Mark documentation as intentionally unavailable.
    #[must_use]
    pub fn doc_unavailable(mut self) -> Self {
        self.doc = Some(DocLink::Unavailable);
        self
    }
}

/// Lookup failure for a bundle id that the registry does not contain.
#[derive(Debug, Clone, Error)]
#[error("Unknown bundle '{id}'")]
pub struct UnknownBundleError {
    /// The id that was looked up.
    pub id: BundleId,
    /// Closest known id, if any is within a small edit distance.
    pub suggestion: Option<BundleId>,
}

/// Immutable table of bundle descriptors keyed by id.
///
/// Construct with [`Registry::builtin`], [`Registry::load`] or
/// [`Registry::from_bundles`]; there is no mutation API.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    bundles: BTreeMap<BundleId, BundleDescriptor>,
}

impl Registry {
    /// Build a registry from descriptors, rejecting duplicate ids.
    ///
    /// Implication targets are not checked here; dangling or cyclic implications
    /// surface during resolution or through [`Registry::validate`].
    pub fn from_bundles<I>(bundles: I) -> Result<Self, ScaffoldError>
    where
        I: IntoIterator<Item = BundleDescriptor>,
    {
        let mut table = BTreeMap::new();
        for bundle in bundles {
            if bundle.id.trim().is_empty() {
                return Err(ScaffoldError::RegistryConfigError {
                    reason: "bundle id must not be empty".to_string(),
                });
            }
            if let Some(previous) = table.insert(bundle.id.clone(), bundle) {
                return Err(ScaffoldError::RegistryConfigError {
                    reason: format!("bundle '{}' is defined more than once", previous.id),
                });
            }
        }
        Ok(Self {
            bundles: table,
        })
    }

    /// The table shipped with the binary.
    ///
    /// Goes through [`Registry::from_bundles`], so a duplicated id in the shipped
    /// table is reported rather than silently replacing the earlier entry.
    pub fn builtin() -> Result<Self, ScaffoldError> {
        Self::from_bundles(builtin::bundles())
    }

    /// Load a registry table from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read registry file: {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("Failed to load registry {}", path.display()))
    }

    /// Parse a registry table from TOML text.
    pub fn parse(content: &str) -> Result<Self, ScaffoldError> {
        let file: RegistryFile =
            toml::from_str(content).map_err(|e| ScaffoldError::RegistryConfigError {
                reason: e.to_string(),
            })?;

        let mut bundles = Vec::with_capacity(file.bundles.len());
        for (id, spec) in file.bundles {
            let mut coordinates = Vec::with_capacity(spec.coordinates.len());
            for coordinate in spec.coordinates {
                let coordinate = match coordinate {
                    CoordinateSpec::Short(text) => Coordinate::parse(&text).map_err(|reason| {
                        ScaffoldError::RegistryConfigError {
                            reason: format!("bundle '{id}': {reason}"),
                        }
                    })?,
                    CoordinateSpec::Full(coordinate) => coordinate,
                };
                coordinates.push(coordinate);
            }
            bundles.push(BundleDescriptor {
                id,
                coordinates,
                implies: spec.implies,
                doc: spec.doc,
            });
        }
        Self::from_bundles(bundles)
    }

    /// Look up a bundle by id.
    pub fn lookup(&self, id: &str) -> Result<&BundleDescriptor, UnknownBundleError> {
        self.bundles.get(id).ok_or_else(|| UnknownBundleError {
            id: id.to_string(),
            suggestion: self.suggest(id).map(str::to_string),
        })
    }

    /// Look up a bundle by id without computing a suggestion on a miss.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&BundleDescriptor> {
        self.bundles.get(id)
    }

    /// Whether a bundle with this id exists.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.bundles.contains_key(id)
    }

    /// Every bundle id, sorted.
    #[must_use]
    pub fn all_ids(&self) -> BTreeSet<&str> {
        self.bundles.keys().map(String::as_str).collect()
    }

    /// Iterate descriptors in id order.
    pub fn bundles(&self) -> impl Iterator<Item = &BundleDescriptor> {
        self.bundles.values()
    }

    /// Number of bundles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bundles.len()
    }

    /// Whether the registry has no bundles.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bundles.is_empty()
    }

    /// Closest known id to `id`, for "did you mean" hints.
    #[must_use]
    pub fn suggest(&self, id: &str) -> Option<&str> {
        self.bundles
            .keys()
            .map(|known| (levenshtein(id, known), known))
            .filter(|(distance, _)| *distance <= SUGGESTION_MAX_DISTANCE)
            .min()
            .map(|(_, known)| known.as_str())
    }
}

impl fmt::Display for BundleDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)?;
        for coordinate in &self.coordinates {
            write!(f, " {coordinate}")?;
        }
        Ok(())
    }
}

/// On-disk registry table.
#[derive(Debug, Deserialize)]
struct RegistryFile {
    #[serde(default)]
    bundles: BTreeMap<BundleId, BundleSpec>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct BundleSpec {
    coordinates: Vec<CoordinateSpec>,
    #[serde(default)]
    implies: Vec<BundleId>,
    #[serde(default)]
    doc: Option<DocLink>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum CoordinateSpec {
    Short(String),
    Full(Coordinate),
}
