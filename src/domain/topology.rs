use crate::domain::edge::CandidateEdge;
use crate::domain::node::NodeId;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Final coverage state of a node after building
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoverageStatus {
    /// Every cone of width α holds a selected neighbor
    Covered,
    /// Candidates ran out before coverage was reached (boundary node)
    Exhausted,
    /// No candidates at all; coverage holds vacuously
    Isolated,
}

impl CoverageStatus {
    pub fn is_covered(&self) -> bool {
        matches!(self, CoverageStatus::Covered)
    }
}

/// Ordered per-node selection of candidate edges.
///
/// Order is insertion order during the greedy build, which is also ascending
/// distance; the last edge is always the farthest.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedEdgeSet {
    node: NodeId,
    edges: Vec<CandidateEdge>,
    status: CoverageStatus,
}

impl SelectedEdgeSet {
    pub fn new(node: NodeId) -> Self {
        Self {
            node,
            edges: Vec::new(),
            status: CoverageStatus::Isolated,
        }
    }

    pub fn node(&self) -> NodeId {
        self.node
    }

    pub fn status(&self) -> CoverageStatus {
        self.status
    }

    pub(crate) fn set_status(&mut self, status: CoverageStatus) {
        self.status = status;
    }

    pub fn edges(&self) -> &[CandidateEdge] {
        &self.edges
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn contains(&self, target: NodeId) -> bool {
        self.edges.iter().any(|e| e.target == target)
    }

    pub fn targets(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.edges.iter().map(|e| e.target)
    }

    pub fn angles(&self) -> Vec<f64> {
        self.edges.iter().map(|e| e.bearing).collect()
    }

    /// Append an edge. Returns false (and leaves the set unchanged) for a foreign
    /// source or a target that is already present.
    pub fn push(&mut self, edge: CandidateEdge) -> bool {
        if edge.source != self.node || self.contains(edge.target) {
            return false;
        }
        self.edges.push(edge);
        true
    }

    pub(crate) fn pop_farthest(&mut self) -> Option<CandidateEdge> {
        self.edges.pop()
    }

    pub(crate) fn remove_target(&mut self, target: NodeId) -> Option<CandidateEdge> {
        let pos = self.edges.iter().position(|e| e.target == target)?;
        Some(self.edges.remove(pos))
    }

    /// Reinsert an edge at its selection-order position
    pub(crate) fn restore(&mut self, edge: CandidateEdge) {
        if self.contains(edge.target) {
            return;
        }
        let pos = self
            .edges
            .partition_point(|e| e.selection_order(&edge).is_lt());
        self.edges.insert(pos, edge);
    }

    /// Transmit radius needed to reach every selected neighbor
    pub fn radius(&self) -> f64 {
        self.edges.iter().map(|e| e.distance).fold(0.0, f64::max)
    }
}

/// Final neighbor sets, keyed by node id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topology {
    neighbors: BTreeMap<NodeId, BTreeSet<NodeId>>,
}

impl Topology {
    pub fn new() -> Self {
        Self::default()
    }

    /// Topology with every listed node present and no links
    pub fn with_nodes(ids: impl IntoIterator<Item = NodeId>) -> Self {
        Self {
            neighbors: ids.into_iter().map(|id| (id, BTreeSet::new())).collect(),
        }
    }

    pub fn from_selections(selections: &[SelectedEdgeSet]) -> Self {
        let neighbors = selections
            .iter()
            .map(|s| (s.node(), s.targets().collect()))
            .collect();
        Self { neighbors }
    }

    pub fn add_node(&mut self, id: NodeId) {
        self.neighbors.entry(id).or_default();
    }

    pub fn add_edge(&mut self, source: NodeId, target: NodeId) {
        self.neighbors.entry(target).or_default();
        self.neighbors.entry(source).or_default().insert(target);
    }

    pub fn has_edge(&self, source: NodeId, target: NodeId) -> bool {
        self.neighbors
            .get(&source)
            .is_some_and(|n| n.contains(&target))
    }

    pub fn neighbors(&self, id: NodeId) -> Option<&BTreeSet<NodeId>> {
        self.neighbors.get(&id)
    }

    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.neighbors.keys().copied()
    }

    pub fn node_count(&self) -> usize {
        self.neighbors.len()
    }

    /// Directed edges in (source, target) order
    pub fn edges(&self) -> impl Iterator<Item = (NodeId, NodeId)> + '_ {
        self.neighbors
            .iter()
            .flat_map(|(&u, vs)| vs.iter().map(move |&v| (u, v)))
    }

    pub fn edge_count(&self) -> usize {
        self.neighbors.values().map(BTreeSet::len).sum()
    }

    /// Edges whose reverse is absent
    pub fn asymmetric_edges(&self) -> impl Iterator<Item = (NodeId, NodeId)> + '_ {
        self.edges().filter(|&(u, v)| !self.has_edge(v, u))
    }

    pub fn is_symmetric(&self) -> bool {
        self.asymmetric_edges().next().is_none()
    }
}
