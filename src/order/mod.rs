//! order
//!
//! Emission ordering over the dependency graph.
//!
//! # Strategies
//!
//! Two interchangeable strategies implement the same contract:
//!
//! - [`Strategy::Weight`] (shipped default): each node's weight is
//!   `1 + max(weight of its dependencies)` (`0` with no dependencies);
//!   present stems are sorted ascending by weight, tie-broken by
//!   identifier order.
//! - [`Strategy::Reachability`]: Kahn-style visitation seeded from the
//!   implicit root, FIFO layer order, dependents enqueued in identifier
//!   order; stems are emitted on first visit.
//!
//! Both agree on acyclic graphs without ties; their tie-break semantics
//! differ deliberately and are never merged.
//!
//! # Contract
//!
//! For every edge `dependency -> dependent` with both ends present, the
//! dependency is emitted strictly earlier. Every present stem appears
//! exactly once (duplicates collapse to first arrival). Given the same
//! graph and the same present slice, output is byte-identical across runs.
//!
//! # Example
//!
//! ```
//! use std::collections::{BTreeMap, BTreeSet};
//! use stemflow::core::graph::build;
//! use stemflow::core::types::StemId;
//! use stemflow::order::order;
//!
//! let stems: Vec<StemId> = ["x__y", "x"]
//!     .iter()
//!     .map(|s| StemId::new(*s).unwrap())
//!     .collect();
//! let known: BTreeSet<StemId> = stems.iter().cloned().collect();
//!
//! let graph = build(&BTreeMap::new(), &known).unwrap();
//! let sequence = order(&graph, &stems).unwrap();
//! assert_eq!(sequence[0].as_str(), "x");
//! assert_eq!(sequence[1].as_str(), "x__y");
//! ```

pub mod reachability;
pub mod weight;

use std::collections::BTreeSet;

use thiserror::Error;

use crate::core::graph::DependencyGraph;
use crate::core::naming;
use crate::core::types::StemId;

/// Errors from ordering.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum OrderError {
    /// A genuine dependency cycle; the payload is the offending path with
    /// the entry node repeated at the end.
    #[error("dependency cycle: {}", join_path(.0))]
    Cycle(Vec<StemId>),

    /// A present stem fails naming validation. Checked before any ordering
    /// work begins, since naming validity is a precondition for
    /// ancestor-chain edges.
    #[error("invalid stem naming: '{0}'")]
    InvalidNaming(StemId),
}

fn join_path(path: &[StemId]) -> String {
    path.iter()
        .map(StemId::as_str)
        .collect::<Vec<_>>()
        .join(" -> ")
}

/// Ordering strategy selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Strategy {
    /// Longest-path weight, tie-broken by identifier order.
    #[default]
    Weight,
    /// Root-seeded reachability, tie-broken by discovery order.
    Reachability,
}

/// Error from parsing a strategy name.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown ordering strategy '{0}', expected 'weight' or 'reach'")]
pub struct StrategyParseError(String);

impl std::str::FromStr for Strategy {
    type Err = StrategyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "weight" => Ok(Strategy::Weight),
            "reach" | "reachability" => Ok(Strategy::Reachability),
            other => Err(StrategyParseError(other.to_string())),
        }
    }
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Strategy::Weight => write!(f, "weight"),
            Strategy::Reachability => write!(f, "reach"),
        }
    }
}

/// Compute the emission order with the default strategy.
///
/// `present` restricts output to stems that correspond to real artifacts;
/// its order is the original arrival order and feeds the tie-break of the
/// reachability strategy.
///
/// # Errors
///
/// - `OrderError::InvalidNaming` if any present stem fails naming
///   validation (reported before any ordering work)
/// - `OrderError::Cycle` if the graph contains a dependency cycle
pub fn order(graph: &DependencyGraph, present: &[StemId]) -> Result<Vec<StemId>, OrderError> {
    order_with(graph, present, Strategy::default())
}

/// Compute the emission order with an explicit strategy.
pub fn order_with(
    graph: &DependencyGraph,
    present: &[StemId],
    strategy: Strategy,
) -> Result<Vec<StemId>, OrderError> {
    let present = validate_present(present)?;
    match strategy {
        Strategy::Weight => weight::order(graph, &present),
        Strategy::Reachability => reachability::order(graph, &present),
    }
}

/// Validate naming of every present stem and collapse duplicates to their
/// first arrival, preserving order.
fn validate_present(present: &[StemId]) -> Result<Vec<StemId>, OrderError> {
    let mut seen = BTreeSet::new();
    let mut unique = Vec::with_capacity(present.len());
    for stem in present {
        if naming::parse(stem.as_str()).is_err() {
            return Err(OrderError::InvalidNaming(stem.clone()));
        }
        if seen.insert(stem.clone()) {
            unique.push(stem.clone());
        }
    }
    Ok(unique)
}
