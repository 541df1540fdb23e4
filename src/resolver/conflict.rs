//! Version override bookkeeping and conflict detection.
//!
//! Overrides are collected from every request before the closure is walked, so a
//! conflicting pin is reported even when the second request would otherwise be
//! skipped as a duplicate.

use crate::project::DependencyRequest;
use crate::registry::BundleId;
use std::collections::BTreeMap;
use std::fmt;

/// Two requests pin the same bundle to different versions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverrideConflict {
    /// The pinned bundle.
    pub bundle: BundleId,
    /// Label of the request that pinned first.
    pub first: String,
    /// Label of the request that disagreed.
    pub second: String,
}

impl fmt::Display for OverrideConflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}' pinned by {} and {}", self.bundle, self.first, self.second)
    }
}

#[derive(Debug, Clone)]
struct Pin {
    version: String,
    requested_by: String,
}

/// Version pins keyed by bundle id.
#[derive(Debug, Default)]
pub struct OverrideSet {
    pins: BTreeMap<BundleId, Pin>,
}

impl OverrideSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect the pins of `requests`, failing on the first disagreement.
    ///
    /// Requests are labelled by their 1-based position.
    pub fn collect(requests: &[DependencyRequest]) -> Result<Self, OverrideConflict> {
        let mut set = Self::new();
        for (index, request) in requests.iter().enumerate() {
            set.record(index + 1, request)?;
        }
        Ok(set)
    }

    /// Record one request's pin. Requests without an override are ignored, and
    /// repeating the same pin is not a conflict.
    pub fn record(&mut self, position: usize, request: &DependencyRequest) -> Result<(), OverrideConflict> {
        let Some(version) = &request.version_override else {
            return Ok(());
        };
        let label = format!("request #{position} ({request})");

        match self.pins.get(&request.bundle_id) {
            Some(pin) if pin.version != *version => Err(OverrideConflict {
                bundle: request.bundle_id.clone(),
                first: pin.requested_by.clone(),
                second: label,
            }),
            Some(_) => Ok(()),
            None => {
                self.pins.insert(
                    request.bundle_id.clone(),
                    Pin {
                        version: version.clone(),
                        requested_by: label,
                    },
                );
                Ok(())
            }
        }
    }

    /// The pinned version of a bundle, if any request pinned it.
    pub fn version_of(&self, bundle: &str) -> Option<&str> {
        self.pins.get(bundle).map(|pin| pin.version.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.pins.is_empty()
    }
}
