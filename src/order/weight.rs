//! order::weight
//!
//! Longest-path weight ordering (shipped default).
//!
//! Each node's weight is `1 + max(weight of its dependencies)`, with `0`
//! for a node that depends on nothing. Present stems are sorted ascending
//! by weight and tie-broken by identifier order, so mutually-independent
//! stems come out in lexicographic order regardless of arrival order.
//!
//! Weights are computed for every graph node, so a cycle anywhere in the
//! graph is detected, matching the reachability strategy. Cycle detection
//! triggers when the recursion revisits a node already on its own path,
//! before unbounded descent can occur.

use std::collections::BTreeMap;

use super::OrderError;
use crate::core::graph::DependencyGraph;
use crate::core::types::StemId;

/// Order `present` by longest-path weight.
///
/// `present` must already be validated and deduplicated by the caller.
pub(crate) fn order(
    graph: &DependencyGraph,
    present: &[StemId],
) -> Result<Vec<StemId>, OrderError> {
    let mut weights: BTreeMap<StemId, usize> = BTreeMap::new();
    for node in graph.nodes() {
        let mut path = Vec::new();
        compute(graph, node, &mut weights, &mut path)?;
    }

    // A present stem the graph has never seen depends on nothing.
    let mut ranked: Vec<(usize, StemId)> = present
        .iter()
        .map(|stem| (weights.get(stem).copied().unwrap_or(0), stem.clone()))
        .collect();
    ranked.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.cmp(&b.1)));

    Ok(ranked.into_iter().map(|(_, stem)| stem).collect())
}

/// Compute (and memoize) the weight of one node.
fn compute(
    graph: &DependencyGraph,
    stem: &StemId,
    weights: &mut BTreeMap<StemId, usize>,
    path: &mut Vec<StemId>,
) -> Result<usize, OrderError> {
    if let Some(weight) = weights.get(stem) {
        return Ok(*weight);
    }
    if let Some(pos) = path.iter().position(|p| p == stem) {
        let mut cycle = path[pos..].to_vec();
        cycle.push(stem.clone());
        return Err(OrderError::Cycle(cycle));
    }

    path.push(stem.clone());
    let mut weight = 0;
    if let Some(deps) = graph.deps(stem) {
        for dep in deps {
            weight = weight.max(1 + compute(graph, dep, weights, path)?);
        }
    }
    path.pop();

    weights.insert(stem.clone(), weight);
    Ok(weight)
}
