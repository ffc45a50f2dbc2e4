//! core::graph
//!
//! Dependency graph representation and construction.
//!
//! # Architecture
//!
//! The dependency graph is a DAG (cycles are a build-time data error
//! surfaced by the orderer) where:
//! - Nodes are stems, declared or merely referenced as dependencies
//! - Forward edges map a stem to the set of stems it depends on
//! - Reverse edges map a stem to its dependents
//!
//! Nodes referenced only as dependency targets are "virtual": the graph
//! traverses them, but the orderer never emits them unless they are
//! present. The virtual root is implicit: [`DependencyGraph::roots`] yields
//! every zero-dependency node, which is exactly the implicit edge set from
//! a designated single origin.
//!
//! # Invariants
//!
//! - The reverse mapping is always the exact transpose of the forward
//!   mapping; [`DependencyGraph::add_dependency`] is the single insertion
//!   point that maintains this symmetry
//! - Every node has an entry in both mappings, even when empty

use std::collections::{BTreeMap, BTreeSet};

use thiserror::Error;

use crate::core::naming::{self, NamingError};
use crate::core::types::StemId;

/// Errors from graph construction.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GraphError {
    /// A known stem fails naming validation. Naming validity is a
    /// precondition for ancestor-chain edges to be correct, so the whole
    /// build aborts.
    #[error("invalid stem naming: '{stem}'")]
    InvalidNaming {
        /// The offending stem.
        stem: StemId,
        #[source]
        source: NamingError,
    },
}

/// The dependency graph over stems.
///
/// Built once per run via [`build`], then treated as read-only by the
/// orderer.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DependencyGraph {
    /// Forward edges: stem -> stems it depends on.
    deps: BTreeMap<StemId, BTreeSet<StemId>>,
    /// Reverse edges: stem -> stems that depend on it.
    dependents: BTreeMap<StemId, BTreeSet<StemId>>,
}

impl DependencyGraph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Ensure a node exists, with empty edge sets if new.
    pub fn add_node(&mut self, stem: StemId) {
        self.dependents.entry(stem.clone()).or_default();
        self.deps.entry(stem).or_default();
    }

    /// Record that `dependent` depends on `dependency`.
    ///
    /// Both endpoints become nodes if they were not already. The reverse
    /// mapping is updated in the same step, keeping it the exact transpose
    /// of the forward mapping.
    pub fn add_dependency(&mut self, dependent: StemId, dependency: StemId) {
        self.dependents.entry(dependent.clone()).or_default();
        self.deps.entry(dependency.clone()).or_default();
        self.deps
            .entry(dependent.clone())
            .or_default()
            .insert(dependency.clone());
        self.dependents
            .entry(dependency)
            .or_default()
            .insert(dependent);
    }

    /// The stems `stem` depends on.
    pub fn deps(&self, stem: &StemId) -> Option<&BTreeSet<StemId>> {
        self.deps.get(stem)
    }

    /// The stems that depend on `stem`.
    pub fn dependents(&self, stem: &StemId) -> Option<&BTreeSet<StemId>> {
        self.dependents.get(stem)
    }

    /// Whether the graph contains `stem` as a node.
    pub fn contains(&self, stem: &StemId) -> bool {
        self.deps.contains_key(stem)
    }

    /// All nodes, in identifier order.
    pub fn nodes(&self) -> impl Iterator<Item = &StemId> {
        self.deps.keys()
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.deps.len()
    }

    /// Whether the graph has no nodes.
    pub fn is_empty(&self) -> bool {
        self.deps.is_empty()
    }

    /// Zero-dependency nodes, in identifier order.
    ///
    /// These are the nodes with an implicit edge from the virtual root;
    /// traversal-style orderers start here.
    pub fn roots(&self) -> impl Iterator<Item = &StemId> {
        self.deps
            .iter()
            .filter(|(_, deps)| deps.is_empty())
            .map(|(stem, _)| stem)
    }

    /// Find a dependency cycle anywhere in the graph.
    ///
    /// Returns the cyclic path with the entry node repeated at the end
    /// (e.g. `[a, b, a]`), or `None` if the graph is acyclic.
    pub fn find_cycle(&self) -> Option<Vec<StemId>> {
        let all: BTreeSet<StemId> = self.deps.keys().cloned().collect();
        self.find_cycle_within(&all)
    }

    /// Find a dependency cycle restricted to `scope`.
    ///
    /// Edges leaving the scope are ignored. Used by the reachability
    /// orderer to extract a diagnostic path from the unvisited residue.
    pub fn find_cycle_within(&self, scope: &BTreeSet<StemId>) -> Option<Vec<StemId>> {
        let mut visited = BTreeSet::new();
        for start in scope {
            if visited.contains(start) {
                continue;
            }
            let mut path = Vec::new();
            if let Some(cycle) = self.cycle_from(start, scope, &mut visited, &mut path) {
                return Some(cycle);
            }
        }
        None
    }

    fn cycle_from(
        &self,
        stem: &StemId,
        scope: &BTreeSet<StemId>,
        visited: &mut BTreeSet<StemId>,
        path: &mut Vec<StemId>,
    ) -> Option<Vec<StemId>> {
        if let Some(pos) = path.iter().position(|p| p == stem) {
            let mut cycle = path[pos..].to_vec();
            cycle.push(stem.clone());
            return Some(cycle);
        }
        if visited.contains(stem) {
            return None;
        }
        visited.insert(stem.clone());
        path.push(stem.clone());

        if let Some(deps) = self.deps.get(stem) {
            for dep in deps {
                if !scope.contains(dep) {
                    continue;
                }
                if let Some(cycle) = self.cycle_from(dep, scope, visited, path) {
                    return Some(cycle);
                }
            }
        }

        path.pop();
        None
    }
}

/// Build the dependency graph from merged per-stem dependency sets and the
/// set of known stems.
///
/// Steps:
/// 1. Validate naming of every known stem (abort on the first failure)
/// 2. Insert declared edges, creating placeholder nodes for targets
/// 3. Insert every known stem as a node, so dependency-free known stems
///    are recognizable as topological sources
/// 4. For every node that parses and is not entity-only, add one edge per
///    adjacent pair of its ancestor chain
///
/// Virtual references that never parse keep their declared edges but
/// contribute no ancestor edges.
///
/// # Errors
///
/// Returns `GraphError::InvalidNaming` if any known stem fails naming
/// validation.
///
/// # Example
///
/// ```
/// use std::collections::{BTreeMap, BTreeSet};
/// use stemflow::core::graph::build;
/// use stemflow::core::types::StemId;
///
/// let known: BTreeSet<StemId> = [
///     StemId::new("x").unwrap(),
///     StemId::new("x__y").unwrap(),
/// ]
/// .into();
///
/// let graph = build(&BTreeMap::new(), &known).unwrap();
/// let x = StemId::new("x").unwrap();
/// assert!(graph.deps(&StemId::new("x__y").unwrap()).unwrap().contains(&x));
/// ```
pub fn build(
    declarations: &BTreeMap<StemId, BTreeSet<StemId>>,
    known: &BTreeSet<StemId>,
) -> Result<DependencyGraph, GraphError> {
    for stem in known {
        if let Err(source) = naming::parse(stem.as_str()) {
            return Err(GraphError::InvalidNaming {
                stem: stem.clone(),
                source,
            });
        }
    }

    let mut graph = DependencyGraph::new();
    for (stem, deps) in declarations {
        graph.add_node(stem.clone());
        for dep in deps {
            graph.add_dependency(stem.clone(), dep.clone());
        }
    }
    for stem in known {
        graph.add_node(stem.clone());
    }

    let nodes: Vec<StemId> = graph.nodes().cloned().collect();
    for stem in nodes {
        let Ok(record) = naming::parse(stem.as_str()) else {
            continue;
        };
        if record.is_entity_only() {
            continue;
        }
        let mut dependent = stem;
        for ancestor in record.ancestor_chain() {
            graph.add_dependency(dependent, ancestor.clone());
            dependent = ancestor;
        }
    }

    Ok(graph)
}
