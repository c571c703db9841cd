//! Graph pruning - severity floor, single-node focus, edge cleanup
//!
//! Pruning only ever removes event nodes; groups stay so the viewer keeps
//! its component structure. Edge cleanup is a separate explicit sweep: the
//! node table and edge list are independent, so removing a node does not
//! touch its edges.

use tracing::debug;

use super::store::{GraphError, HazardGraph, NodeId};
use crate::models::Severity;

impl HazardGraph {
    /// Remove every event whose severity is known and below `floor`.
    /// Events with no severity at all are kept.
    pub fn limit_severity(&mut self, floor: Severity) {
        let doomed: Vec<NodeId> = self
            .nodes
            .values()
            .filter(|node| !node.is_group())
            .filter(|node| node.severity.is_some_and(|severity| severity < floor))
            .map(|node| node.id)
            .collect();
        debug!(removed = doomed.len(), %floor, "applying severity floor");
        for id in doomed {
            self.remove_event(id);
        }
    }

    /// Restrict the graph to one event's causal neighbourhood: its full
    /// ancestry plus all of its descendants.
    pub fn isolate(&mut self, label: &str, group: &str) -> Result<(), GraphError> {
        let focus = self.resolve_event(label, group)?;
        let mut keep = self.ancestors(focus);
        keep.extend(self.descendants(focus));
        let doomed: Vec<NodeId> = self
            .nodes
            .values()
            .filter(|node| !node.is_group() && !keep.contains(&node.id))
            .map(|node| node.id)
            .collect();
        debug!(removed = doomed.len(), kept = keep.len(), "isolating focus event");
        for id in doomed {
            self.remove_event(id);
        }
        Ok(())
    }

    /// Drop every edge with a missing endpoint. Run after node removal.
    pub fn drop_dangling_edges(&mut self) {
        let nodes = &self.nodes;
        self.edges
            .retain(|edge| nodes.contains_key(&edge.source) && nodes.contains_key(&edge.target));
        self.edge_set = self
            .edges
            .iter()
            .map(|edge| (edge.source, edge.target))
            .collect();
    }

    fn remove_event(&mut self, id: NodeId) {
        if let Some(node) = self.nodes.shift_remove(&id) {
            if let Some(group) = node.group {
                self.event_ids.remove(&(node.label, group));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// blocked(Valve) -> no flow(Pump) -> overflow(Tank), plus a stray
    /// unconnected event.
    fn sample() -> (HazardGraph, [NodeId; 4]) {
        let mut graph = HazardGraph::new();
        let valve = graph.ensure_group("Valve");
        let blocked = graph.ensure_event("blocked", valve);
        let pump = graph.ensure_group("Pump");
        let no_flow = graph.ensure_event("no flow", pump);
        let tank = graph.ensure_group("Tank");
        let overflow = graph.ensure_event("overflow", tank);
        let stray = graph.ensure_event("stray", pump);
        graph.add_edge(blocked, no_flow);
        graph.add_edge(no_flow, overflow);
        (graph, [blocked, no_flow, overflow, stray])
    }

    #[test]
    fn test_limit_severity_keeps_unscored_and_groups() {
        let (mut graph, [blocked, no_flow, overflow, stray]) = sample();
        graph.merge_severity(blocked, Severity::E).unwrap();
        graph.merge_severity(no_flow, Severity::D).unwrap();
        graph.merge_severity(overflow, Severity::A).unwrap();
        graph.limit_severity(Severity::D);

        assert!(graph.node(blocked).is_none());
        assert!(graph.node(no_flow).is_some());
        assert!(graph.node(overflow).is_some());
        // No severity at all is not "below the floor".
        assert!(graph.node(stray).is_some());
        assert_eq!(graph.nodes().filter(|n| n.is_group()).count(), 3);
    }

    #[test]
    fn test_isolate_keeps_exactly_the_neighbourhood() {
        let (mut graph, [blocked, no_flow, overflow, stray]) = sample();
        graph.isolate("no flow", "Pump").unwrap();
        graph.drop_dangling_edges();

        let kept: Vec<NodeId> = graph
            .nodes()
            .filter(|n| !n.is_group())
            .map(|n| n.id)
            .collect();
        assert_eq!(kept, vec![blocked, no_flow, overflow]);
        assert!(graph.node(stray).is_none());
        for edge in graph.edges() {
            assert!(graph.node(edge.source).is_some());
            assert!(graph.node(edge.target).is_some());
        }
    }

    #[test]
    fn test_isolate_unknown_focus_is_fatal() {
        let (mut graph, _) = sample();
        assert!(matches!(
            graph.isolate("no flow", "Turbine"),
            Err(GraphError::NoSuchEvent { .. })
        ));
    }

    #[test]
    fn test_dangling_edges_swept() {
        let (mut graph, [blocked, no_flow, _, _]) = sample();
        graph.merge_severity(no_flow, Severity::F).unwrap();
        graph.limit_severity(Severity::A);
        assert!(graph.node(no_flow).is_none());
        assert_eq!(graph.edge_count(), 2);
        graph.drop_dangling_edges();
        assert_eq!(graph.edge_count(), 0);
        assert!(graph.node(blocked).is_some());
    }

    #[test]
    fn test_removed_label_can_be_recreated() {
        let (mut graph, [_, no_flow, _, _]) = sample();
        graph.merge_severity(no_flow, Severity::F).unwrap();
        graph.limit_severity(Severity::A);
        // The dedup key was released with the node; a fresh id is assigned.
        let pump = graph.ensure_group("Pump");
        let recreated = graph.ensure_event("no flow", pump);
        assert_ne!(recreated, no_flow);
    }
}
