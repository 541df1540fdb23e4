//! Library coordinates (`group:artifact:version`) and dependency scopes.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

/// Group and artifact segments: letters, digits, dots, dashes, underscores.
static SEGMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9][A-Za-z0-9._-]*$").expect("segment pattern is valid")
});

/// Versions additionally allow `+` for build metadata.
static VERSION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9][A-Za-z0-9.+_-]*$").expect("version pattern is valid")
});

/// Dependency scope, mirroring the Maven scopes the rendered manifest uses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    /// Needed to compile and run (the default).
    #[default]
    Compile,
    /// Needed only by tests.
    Test,
    /// Supplied by the runtime environment.
    Provided,
}

impl Scope {
    /// Whether this is the default scope, which manifests leave implicit.
    #[must_use]
    pub fn is_compile(&self) -> bool {
        *self == Self::Compile
    }

    /// Scope name as written in manifests.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Compile => "compile",
            Self::Test => "test",
            Self::Provided => "provided",
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A library coordinate contributed by a bundle.
///
/// `version` may be absent in the registry, in which case a request must supply
/// an override.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Coordinate {
    /// Group id, e.g. `com.machinezoo.hookless`.
    pub group: String,
    /// Artifact id, e.g. `hookless`.
    pub artifact: String,
    /// Pinned version, if the registry pins one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// Dependency scope.
    #[serde(default, skip_serializing_if = "Scope::is_compile")]
    pub scope: Scope,
}

impl Coordinate {
    /// A versioned coordinate in the compile scope.
    pub fn new(group: impl Into<String>, artifact: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            artifact: artifact.into(),
            version: Some(version.into()),
            scope: Scope::Compile,
        }
    }

    /// A coordinate whose version must come from a request override.
    pub fn unversioned(group: impl Into<String>, artifact: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            artifact: artifact.into(),
            version: None,
            scope: Scope::Compile,
        }
    }

    /// Same coordinate in another scope.
    #[must_use]
    pub fn with_scope(mut self, scope: Scope) -> Self {
        self.scope = scope;
        self
    }

    /// Parse `group:artifact` or `group:artifact:version`.
    ///
    /// Returns a human-readable reason on failure.
    pub fn parse(text: &str) -> Result<Self, String> {
        let parts: Vec<&str> = text.trim().split(':').collect();
        let (group, artifact, version) = match parts.as_slice() {
            [group, artifact] => (*group, *artifact, None),
            [group, artifact, version] => (*group, *artifact, Some(*version)),
            _ => {
                return Err(format!(
                    "'{text}' is not a coordinate; expected group:artifact or group:artifact:version"
                ));
            }
        };

        if !SEGMENT.is_match(group) {
            return Err(format!("invalid group '{group}' in coordinate '{text}'"));
        }
        if !SEGMENT.is_match(artifact) {
            return Err(format!("invalid artifact '{artifact}' in coordinate '{text}'"));
        }
        if let Some(version) = version
            && !is_valid_version(version)
        {
            return Err(format!("invalid version '{version}' in coordinate '{text}'"));
        }

        Ok(Self {
            group: group.to_string(),
            artifact: artifact.to_string(),
            version: version.map(str::to_string),
            scope: Scope::Compile,
        })
    }

    /// `group:artifact`, the identity used for deduplication.
    #[must_use]
    pub fn key(&self) -> String {
        format!("{}:{}", self.group, self.artifact)
    }
}

/// Whether a string is acceptable as a version or version override.
#[must_use]
pub fn is_valid_version(version: &str) -> bool {
    VERSION.is_match(version)
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.version {
            Some(version) => write!(f, "{}:{}:{}", self.group, self.artifact, version),
            None => write!(f, "{}:{}", self.group, self.artifact),
        }
    }
}
