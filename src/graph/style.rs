//! Presentation attributes - severity colours for nodes and edges
//!
//! Styling only decorates; it never changes the graph's shape. Unscored
//! nodes and edges stay bare.

use super::store::HazardGraph;
use crate::gml::Value;

impl HazardGraph {
    /// Fill every severity-bearing event with its scale colour.
    pub fn colour_nodes(&mut self) {
        for node in self.nodes.values_mut() {
            if let Some(severity) = node.severity {
                node.graphics
                    .insert("fill".to_string(), Value::from(severity.colour()));
            }
        }
    }

    /// Style every edge with a scored endpoint: width tracks the rank, fill
    /// the colour, using the worse of the two endpoint severities. After
    /// propagation that is always the source's.
    pub fn colour_edges(&mut self) {
        let nodes = &self.nodes;
        for edge in &mut self.edges {
            let source = nodes.get(&edge.source).and_then(|node| node.severity);
            let target = nodes.get(&edge.target).and_then(|node| node.severity);
            let Some(severity) = source.max(target) else {
                continue;
            };
            edge.graphics
                .insert("width".to_string(), Value::Int(severity.rank()));
            edge.graphics
                .insert("fill".to_string(), Value::from(severity.colour()));
            edge.graphics
                .insert("targetArrow".to_string(), Value::from("standard"));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Severity;

    #[test]
    fn test_colour_nodes_fills_scored_events_only() {
        let mut graph = HazardGraph::new();
        let g = graph.ensure_group("Pump");
        let scored = graph.ensure_event("no flow", g);
        let unscored = graph.ensure_event("stray", g);
        graph.merge_severity(scored, Severity::A).unwrap();
        graph.colour_nodes();

        let scored = graph.node(scored).unwrap();
        assert_eq!(scored.graphics.get("fill"), Some(&Value::from("#FA0018")));
        let unscored = graph.node(unscored).unwrap();
        assert!(unscored.graphics.get("fill").is_none());
        let group = graph.node(g).unwrap();
        assert!(group.graphics.is_empty());
    }

    #[test]
    fn test_colour_edges_uses_worse_endpoint() {
        let mut graph = HazardGraph::new();
        let g = graph.ensure_group("Pump");
        let a = graph.ensure_event("a", g);
        let b = graph.ensure_event("b", g);
        let c = graph.ensure_event("c", g);
        graph.add_edge(a, b);
        graph.add_edge(b, c);
        graph.merge_severity(a, Severity::A).unwrap();
        graph.merge_severity(b, Severity::D).unwrap();
        graph.colour_edges();

        let ab = &graph.edges()[0];
        assert_eq!(ab.graphics.get("width"), Some(&Value::Int(6)));
        assert_eq!(ab.graphics.get("fill"), Some(&Value::from("#FA0018")));
        assert_eq!(
            ab.graphics.get("targetArrow"),
            Some(&Value::from("standard"))
        );
        // b -> c: only b is scored.
        let bc = &graph.edges()[1];
        assert_eq!(bc.graphics.get("width"), Some(&Value::Int(3)));
    }

    #[test]
    fn test_unscored_edges_stay_bare() {
        let mut graph = HazardGraph::new();
        let g = graph.ensure_group("Pump");
        let a = graph.ensure_event("a", g);
        let b = graph.ensure_event("b", g);
        graph.add_edge(a, b);
        graph.colour_edges();
        assert!(graph.edges()[0].graphics.is_empty());
    }
}
