//! Start ordering of resolved units using `petgraph`.
//!
//! Builds a directed graph from the resolved closure's dependency edges and
//! computes the order in which the runtime should start the units.

use std::collections::HashMap;

use relforge_common::error::{ReleaseError, Result};
use relforge_common::types::{ResolvedSet, UnitName};

/// Returns a start ordering for the resolved units.
///
/// Dependencies appear before the units that depend on them; ties are broken
/// by the closure's name-sorted insertion order.
///
/// # Errors
///
/// Returns a `Config` error if the dependency graph contains a cycle — a
/// cyclic closure resolves fine but cannot be given a start order.
pub fn start_order(resolved: &ResolvedSet) -> Result<Vec<UnitName>> {
    let mut graph: petgraph::Graph<UnitName, ()> = petgraph::Graph::new();
    let mut nodes = HashMap::new();

    for name in resolved.keys() {
        let idx = graph.add_node(name.clone());
        let _ = nodes.insert(name.clone(), idx);
    }
    for unit in resolved.values() {
        for dep in &unit.dependencies {
            if let (Some(&from), Some(&to)) = (nodes.get(dep), nodes.get(&unit.name)) {
                // Edge points from dependency to dependent so that
                // toposort yields dependencies first.
                let _ = graph.add_edge(from, to, ());
            }
        }
    }

    match petgraph::algo::toposort(&graph, None) {
        Ok(indices) => Ok(indices
            .iter()
            .filter_map(|&idx| graph.node_weight(idx).cloned())
            .collect()),
        Err(_cycle) => Err(ReleaseError::Config {
            message: "cyclic dependency detected between release units".into(),
        }),
    }
}
