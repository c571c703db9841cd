//! Severity propagation - back-dating worst outcomes to causal ancestors
//!
//! A node's severity must reflect the worst consequence reachable from it,
//! not only the consequences attached to it directly. Closures are computed
//! by frontier expansion over a visited set, so cycles terminate and every
//! node appears at most once.

use rustc_hash::{FxHashMap, FxHashSet};

use super::store::{GraphError, HazardGraph, NodeId};
use crate::models::Severity;

impl HazardGraph {
    /// Every node with a directed path to `start`, including `start`.
    pub fn ancestors(&self, start: NodeId) -> FxHashSet<NodeId> {
        reachable(start, &self.reverse_adjacency())
    }

    /// Every node reachable from `start`, including `start`.
    pub fn descendants(&self, start: NodeId) -> FxHashSet<NodeId> {
        reachable(start, &self.forward_adjacency())
    }

    /// Merge each severity-bearing node's severity into all of its
    /// ancestors. Merges are monotonic and commutative, so the fixpoint is
    /// independent of processing order.
    pub fn propagate_severity(&mut self) -> Result<(), GraphError> {
        let predecessors = self.reverse_adjacency();
        let scored: Vec<(NodeId, Severity)> = self
            .nodes
            .values()
            .filter_map(|node| node.severity.map(|severity| (node.id, severity)))
            .collect();
        for (id, severity) in scored {
            for ancestor in reachable(id, &predecessors) {
                self.merge_severity(ancestor, severity)?;
            }
        }
        Ok(())
    }

    fn forward_adjacency(&self) -> FxHashMap<NodeId, Vec<NodeId>> {
        let mut adjacency: FxHashMap<NodeId, Vec<NodeId>> = FxHashMap::default();
        for edge in &self.edges {
            adjacency.entry(edge.source).or_default().push(edge.target);
        }
        adjacency
    }

    fn reverse_adjacency(&self) -> FxHashMap<NodeId, Vec<NodeId>> {
        let mut adjacency: FxHashMap<NodeId, Vec<NodeId>> = FxHashMap::default();
        for edge in &self.edges {
            adjacency.entry(edge.target).or_default().push(edge.source);
        }
        adjacency
    }
}

fn reachable(start: NodeId, adjacency: &FxHashMap<NodeId, Vec<NodeId>>) -> FxHashSet<NodeId> {
    let mut visited = FxHashSet::default();
    visited.insert(start);
    let mut frontier = vec![start];
    while let Some(node) = frontier.pop() {
        let Some(neighbours) = adjacency.get(&node) else {
            continue;
        };
        for &next in neighbours {
            if visited.insert(next) {
                frontier.push(next);
            }
        }
    }
    visited
}
