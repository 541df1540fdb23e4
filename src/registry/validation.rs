//! Whole-registry consistency checks.
//!
//! Resolution only notices registry defects on the paths a project actually
//! walks. [`Registry::validate`] checks the entire table up front so registry
//! maintainers can catch dangling implications and cycles before any project
//! trips over them.

use super::{BundleId, Registry};
use petgraph::algo::tarjan_scc;
use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::HashMap;
use std::fmt;

/// A defect found by [`Registry::validate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryProblem {
    /// A bundle implies an id that is not in the registry.
    UnknownImplication {
        /// The implying bundle.
        bundle: BundleId,
        /// The missing implied id.
        implied: BundleId,
    },
    /// A set of bundles imply each other in a cycle.
    Cycle {
        /// Members of the cycle, sorted by id.
        members: Vec<BundleId>,
    },
    /// A bundle contributes no coordinates.
    NoCoordinates {
        /// The empty bundle.
        bundle: BundleId,
    },
}

impl fmt::Display for RegistryProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownImplication {
                bundle,
                implied,
            } => write!(f, "bundle '{bundle}' implies unknown bundle '{implied}'"),
            Self::Cycle {
                members,
            } => write!(f, "implication cycle between {}", members.join(", ")),
            Self::NoCoordinates {
                bundle,
            } => write!(f, "bundle '{bundle}' has no coordinates"),
        }
    }
}

impl Registry {
    /// Check the whole table for dangling implications, cycles and empty bundles.
    ///
    /// Returns every problem found, in a deterministic order; an empty vector
    /// means the registry is consistent.
    #[must_use]
    pub fn validate(&self) -> Vec<RegistryProblem> {
        let mut problems = Vec::new();
        let mut graph: DiGraph<&str, ()> = DiGraph::new();
        let mut nodes: HashMap<&str, NodeIndex> = HashMap::new();

        for bundle in self.bundles() {
            nodes.insert(bundle.id.as_str(), graph.add_node(bundle.id.as_str()));
        }

        for bundle in self.bundles() {
            if bundle.coordinates.is_empty() {
                problems.push(RegistryProblem::NoCoordinates {
                    bundle: bundle.id.clone(),
                });
            }
            for implied in &bundle.implies {
                match nodes.get(implied.as_str()) {
                    Some(&target) => {
                        graph.update_edge(nodes[bundle.id.as_str()], target, ());
                    }
                    None => problems.push(RegistryProblem::UnknownImplication {
                        bundle: bundle.id.clone(),
                        implied: implied.clone(),
                    }),
                }
            }
        }

        let mut cycles: Vec<Vec<BundleId>> = tarjan_scc(&graph)
            .into_iter()
            .filter(|component| {
                component.len() > 1
                    || graph.contains_edge(component[0], component[0])
            })
            .map(|component| {
                let mut members: Vec<BundleId> =
                    component.into_iter().map(|index| graph[index].to_string()).collect();
                members.sort();
                members
            })
            .collect();
        cycles.sort();
        problems.extend(cycles.into_iter().map(|members| RegistryProblem::Cycle {
            members,
        }));

        problems
    }
}
