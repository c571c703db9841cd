//! Hazard graph storage and construction
//!
//! Plain owned graph: an insertion-ordered node table keyed by id, an edge
//! list with a membership set, and the dedup lookups that make group and
//! event creation idempotent. Ids come from one counter shared by groups
//! and events, so id order is assignment order and survives into the
//! encoded output.

use indexmap::IndexMap;
use rustc_hash::{FxHashMap, FxHashSet};
use thiserror::Error;

use crate::gml::{AttrMap, GmlEdge, GmlGraph, GmlNode, Value};
use crate::ingest::{EventRef, HazopRecord};
use crate::models::Severity;

pub type NodeId = u32;

#[derive(Debug, Error)]
pub enum GraphError {
    #[error("node id {0} does not exist")]
    NodeNotFound(NodeId),

    #[error("node id {0} is a group and cannot carry severity")]
    NotAnEvent(NodeId),

    #[error("no event labelled {label:?} in group {group:?}")]
    NoSuchEvent { label: String, group: String },
}

/// What a node stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// A component/category. Groups events and never carries severity.
    Group,
    /// A distinct event owned by a group.
    Event,
}

/// A node in the hazard graph.
#[derive(Debug, Clone)]
pub struct HazardNode {
    pub id: NodeId,
    pub label: String,
    pub kind: NodeKind,
    /// Owning group id; `None` for group nodes themselves.
    pub group: Option<NodeId>,
    pub severity: Option<Severity>,
    /// Presentation attributes consumed by the viewer.
    pub graphics: AttrMap,
}

impl HazardNode {
    fn group(id: NodeId, name: &str) -> Self {
        Self {
            id,
            label: name.to_string(),
            kind: NodeKind::Group,
            group: None,
            severity: None,
            graphics: AttrMap::new(),
        }
    }

    fn event(id: NodeId, label: &str, group: NodeId) -> Self {
        let mut graphics = AttrMap::new();
        graphics.insert("type".to_string(), Value::from("ellipse"));
        Self {
            id,
            label: label.to_string(),
            kind: NodeKind::Event,
            group: Some(group),
            severity: None,
            graphics,
        }
    }

    pub fn is_group(&self) -> bool {
        self.kind == NodeKind::Group
    }
}

/// A directed edge. No attributes until styled.
#[derive(Debug, Clone)]
pub struct HazardEdge {
    pub source: NodeId,
    pub target: NodeId,
    pub graphics: AttrMap,
}

/// The full graph, exclusively owned by one pipeline run.
#[derive(Debug, Default)]
pub struct HazardGraph {
    pub(crate) nodes: IndexMap<NodeId, HazardNode>,
    pub(crate) edges: Vec<HazardEdge>,
    pub(crate) edge_set: FxHashSet<(NodeId, NodeId)>,
    group_ids: FxHashMap<String, NodeId>,
    pub(crate) event_ids: FxHashMap<(String, NodeId), NodeId>,
    next_id: NodeId,
}

impl HazardGraph {
    pub fn new() -> Self {
        Self::default()
    }

    fn alloc_id(&mut self) -> NodeId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Look up a group by name, creating it on first sight. Idempotent.
    pub fn ensure_group(&mut self, name: &str) -> NodeId {
        if let Some(&id) = self.group_ids.get(name) {
            return id;
        }
        let id = self.alloc_id();
        self.group_ids.insert(name.to_string(), id);
        self.nodes.insert(id, HazardNode::group(id, name));
        id
    }

    /// Look up an event by (label, owning group), creating it on first
    /// sight. Idempotent.
    pub fn ensure_event(&mut self, label: &str, group: NodeId) -> NodeId {
        debug_assert!(self.nodes.contains_key(&group));
        if let Some(&id) = self.event_ids.get(&(label.to_string(), group)) {
            return id;
        }
        let id = self.alloc_id();
        self.event_ids.insert((label.to_string(), group), id);
        self.nodes.insert(id, HazardNode::event(id, label, group));
        id
    }

    /// Insert a directed edge. Self-loops and duplicates are dropped.
    pub fn add_edge(&mut self, source: NodeId, target: NodeId) {
        debug_assert!(self.nodes.contains_key(&source));
        debug_assert!(self.nodes.contains_key(&target));
        if source == target {
            return;
        }
        if !self.edge_set.insert((source, target)) {
            return;
        }
        self.edges.push(HazardEdge {
            source,
            target,
            graphics: AttrMap::new(),
        });
    }

    /// Raise a node's severity to `severity` if that is worse than what it
    /// already carries. Never lowers.
    pub fn merge_severity(&mut self, id: NodeId, severity: Severity) -> Result<(), GraphError> {
        let node = self
            .nodes
            .get_mut(&id)
            .ok_or(GraphError::NodeNotFound(id))?;
        if node.kind == NodeKind::Group {
            return Err(GraphError::NotAnEvent(id));
        }
        node.severity = Some(node.severity.map_or(severity, |current| current.max(severity)));
        Ok(())
    }

    /// Fold one normalized record into the graph: ensure the three events,
    /// derive the two causal edges, attach severity to the consequence.
    pub fn ingest_record(&mut self, record: &HazopRecord) -> Result<(), GraphError> {
        let current = self.ensure_ref(&record.current);
        let cause = self.ensure_ref(&record.cause);
        let consequence = self.ensure_ref(&record.consequence);
        self.add_edge(cause, current);
        self.add_edge(current, consequence);
        self.merge_severity(consequence, record.severity)
    }

    fn ensure_ref(&mut self, event: &EventRef) -> NodeId {
        let group = self.ensure_group(&event.group);
        self.ensure_event(&event.label, group)
    }

    /// Resolve a (label, group name) pair to an event node.
    pub fn resolve_event(&self, label: &str, group: &str) -> Result<NodeId, GraphError> {
        self.group_ids
            .get(group)
            .and_then(|&gid| self.event_ids.get(&(label.to_string(), gid)))
            .copied()
            .ok_or_else(|| GraphError::NoSuchEvent {
                label: label.to_string(),
                group: group.to_string(),
            })
    }

    pub fn node(&self, id: NodeId) -> Option<&HazardNode> {
        self.nodes.get(&id)
    }

    /// Nodes in id-assignment order.
    pub fn nodes(&self) -> impl Iterator<Item = &HazardNode> {
        self.nodes.values()
    }

    pub fn edges(&self) -> &[HazardEdge] {
        &self.edges
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Project the graph onto the encoder's attribute model.
    pub fn to_gml(&self) -> GmlGraph {
        let nodes = self
            .nodes
            .values()
            .map(|node| {
                let mut attrs = AttrMap::new();
                match node.kind {
                    NodeKind::Group => {
                        attrs.insert("isGroup".to_string(), Value::Int(1));
                    }
                    NodeKind::Event => {
                        if let Some(group) = node.group {
                            attrs.insert("gid".to_string(), Value::from(group));
                        }
                        if let Some(severity) = node.severity {
                            attrs.insert("risk".to_string(), Value::Int(severity.rank()));
                        }
                        if !node.graphics.is_empty() {
                            attrs.insert("graphics".to_string(), Value::Map(node.graphics.clone()));
                        }
                    }
                }
                GmlNode {
                    id: i64::from(node.id),
                    label: node.label.clone(),
                    attrs,
                }
            })
            .collect();

        let edges = self
            .edges
            .iter()
            .map(|edge| {
                let mut attrs = AttrMap::new();
                if !edge.graphics.is_empty() {
                    attrs.insert("graphics".to_string(), Value::Map(edge.graphics.clone()));
                }
                GmlEdge {
                    source: i64::from(edge.source),
                    target: i64::from(edge.target),
                    key: None,
                    attrs,
                }
            })
            .collect();

        GmlGraph {
            directed: true,
            multigraph: false,
            attrs: AttrMap::new(),
            nodes,
            edges,
        }
    }
}
