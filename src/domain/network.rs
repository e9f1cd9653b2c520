use crate::domain::edge::{CandidateEdge, sort_candidates};
use crate::domain::error::{CbtcError, Result};
use crate::domain::node::{Node, NodeId, Position, normalize_angle};
use crate::domain::topology::Topology;
use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::f64::consts::{PI, TAU};

/// Absolute/relative tolerance when checking supplied distances against positions
pub const DISTANCE_TOLERANCE: f64 = 1e-6;

/// Validated node set plus per-node candidate lists.
///
/// Candidate lists are kept in selection order (ascending distance, lower target id first).
#[derive(Debug, Clone)]
pub struct Network {
    nodes: Vec<Node>,
    index: HashMap<NodeId, usize>,
    candidates: Vec<Vec<CandidateEdge>>,
}

impl Network {
    /// Build the full candidate graph: every ordered pair within the source's radius.
    pub fn from_nodes(nodes: Vec<Node>) -> Result<Self> {
        let (nodes, index) = index_nodes(nodes)?;

        let candidates = nodes
            .iter()
            .map(|source| {
                let mut list: Vec<CandidateEdge> = nodes
                    .iter()
                    .filter_map(|target| CandidateEdge::between(source, target))
                    .collect();
                sort_candidates(&mut list);
                list
            })
            .collect();

        Ok(Self {
            nodes,
            index,
            candidates,
        })
    }

    /// Accept candidate edges produced elsewhere, checking them against the node positions.
    pub fn from_parts(nodes: Vec<Node>, edges: Vec<CandidateEdge>) -> Result<Self> {
        let (nodes, index) = index_nodes(nodes)?;
        let mut candidates: Vec<Vec<CandidateEdge>> = vec![Vec::new(); nodes.len()];
        let mut seen: HashSet<(NodeId, NodeId)> = HashSet::with_capacity(edges.len());

        for edge in edges {
            let (Some(&si), Some(&ti)) = (index.get(&edge.source), index.get(&edge.target)) else {
                return Err(CbtcError::input(format!(
                    "candidate edge {} -> {} references an unknown node",
                    edge.source, edge.target
                )));
            };
            if si == ti {
                return Err(CbtcError::input(format!(
                    "candidate edge {} -> {} is a self-loop",
                    edge.source, edge.target
                )));
            }
            if !seen.insert((edge.source, edge.target)) {
                return Err(CbtcError::input(format!(
                    "candidate edge {} -> {} appears more than once",
                    edge.source, edge.target
                )));
            }

            let source = &nodes[si];
            let target = &nodes[ti];
            let actual = source.distance_to(target);
            if !edge.distance.is_finite()
                || (edge.distance - actual).abs() > DISTANCE_TOLERANCE * actual.max(1.0)
            {
                return Err(CbtcError::input(format!(
                    "candidate edge {} -> {} has distance {} but the nodes are {} apart",
                    edge.source, edge.target, edge.distance, actual
                )));
            }
            if actual > source.radius + DISTANCE_TOLERANCE {
                return Err(CbtcError::input(format!(
                    "candidate edge {} -> {} exceeds the source radius {}",
                    edge.source, edge.target, source.radius
                )));
            }

            let bearing = source.position.bearing_to(&target.position);
            if actual > 0.0 && !bearing_matches(edge.bearing, bearing) {
                return Err(CbtcError::input(format!(
                    "candidate edge {} -> {} has bearing {} but the nodes lie at {}",
                    edge.source, edge.target, edge.bearing, bearing
                )));
            }

            candidates[si].push(CandidateEdge {
                bearing: normalize_angle(edge.bearing),
                ..edge
            });
        }

        for list in &mut candidates {
            sort_candidates(list);
        }

        Ok(Self {
            nodes,
            index,
            candidates,
        })
    }

    /// Nodes in ascending id order
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.index.get(&id).map(|&i| &self.nodes[i])
    }

    /// Candidate list of `id` in selection order; empty for unknown ids
    pub fn candidates(&self, id: NodeId) -> &[CandidateEdge] {
        self.index
            .get(&id)
            .map(|&i| self.candidates[i].as_slice())
            .unwrap_or(&[])
    }

    pub fn candidate(&self, source: NodeId, target: NodeId) -> Option<&CandidateEdge> {
        self.candidates(source).iter().find(|e| e.target == target)
    }

    pub fn candidate_edges(&self) -> impl Iterator<Item = &CandidateEdge> {
        self.candidates.iter().flatten()
    }

    pub fn candidate_edge_count(&self) -> usize {
        self.candidates.iter().map(Vec::len).sum()
    }

    pub fn positions(&self) -> BTreeMap<NodeId, Position> {
        self.nodes.iter().map(|n| (n.id, n.position)).collect()
    }

    /// Every candidate edge as a topology (no topology control)
    pub fn full_topology(&self) -> Topology {
        let mut topology = Topology::with_nodes(self.nodes.iter().map(|n| n.id));
        for edge in self.candidate_edges() {
            topology.add_edge(edge.source, edge.target);
        }
        topology
    }

    /// Candidate graph as a petgraph digraph; node weights are ids, edge weights distances.
    ///
    /// Graph node indices follow ascending id order.
    pub fn candidate_graph(&self) -> DiGraph<NodeId, f64> {
        let mut graph = DiGraph::with_capacity(self.nodes.len(), self.candidate_edge_count());
        let slots: Vec<NodeIndex> = self.nodes.iter().map(|n| graph.add_node(n.id)).collect();
        for (si, list) in self.candidates.iter().enumerate() {
            for edge in list {
                if let Some(&ti) = self.index.get(&edge.target) {
                    graph.add_edge(slots[si], slots[ti], edge.distance);
                }
            }
        }
        graph
    }
}

fn index_nodes(mut nodes: Vec<Node>) -> Result<(Vec<Node>, HashMap<NodeId, usize>)> {
    nodes.sort_by_key(|n| n.id);

    let mut index = HashMap::with_capacity(nodes.len());
    for (i, node) in nodes.iter().enumerate() {
        if !node.position.is_finite() {
            return Err(CbtcError::input(format!(
                "node {} has a non-finite position",
                node.id
            )));
        }
        if !(node.radius.is_finite() && node.radius > 0.0) {
            return Err(CbtcError::input(format!(
                "node {} has invalid radius {}",
                node.id, node.radius
            )));
        }
        if index.insert(node.id, i).is_some() {
            return Err(CbtcError::input(format!("duplicate node id {}", node.id)));
        }
    }
    Ok((nodes, index))
}

fn bearing_matches(supplied: f64, actual: f64) -> bool {
    if !supplied.is_finite() {
        return false;
    }
    let d = normalize_angle(supplied - actual);
    let d = if d > PI { TAU - d } else { d };
    d <= DISTANCE_TOLERANCE
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(radius: f64) -> Vec<Node> {
        [(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]
            .iter()
            .enumerate()
            .map(|(i, &(x, y))| Node::new(i as NodeId, Position::new(x, y), radius))
            .collect()
    }

    #[test]
    fn test_from_nodes_builds_sorted_candidates() {
        let net = Network::from_nodes(square(1.5)).unwrap();
        assert_eq!(net.node_count(), 4);
        assert_eq!(net.candidate_edge_count(), 12);
        let targets: Vec<NodeId> = net.candidates(0).iter().map(|e| e.target).collect();
        assert_eq!(targets, vec![1, 3, 2]);
    }

    #[test]
    fn test_candidate_graph_mirrors_candidates() {
        let net = Network::from_nodes(square(1.5)).unwrap();
        let graph = net.candidate_graph();
        assert_eq!(graph.node_count(), 4);
        assert_eq!(graph.edge_count(), 12);
        assert!(petgraph::algo::has_path_connecting(
            &graph,
            NodeIndex::new(0),
            NodeIndex::new(2),
            None
        ));
    }

    #[test]
    fn test_small_radius_excludes_diagonals() {
        let net = Network::from_nodes(square(1.2)).unwrap();
        assert_eq!(net.candidate_edge_count(), 8);
        assert!(net.candidate(0, 2).is_none());
    }

    #[test]
    fn test_duplicate_node_id_is_rejected() {
        let mut nodes = square(1.5);
        nodes[1].id = 0;
        assert!(matches!(
            Network::from_nodes(nodes),
            Err(CbtcError::InputInconsistency(_))
        ));
    }

    #[test]
    fn test_from_parts_rejects_unknown_node() {
        let edge = CandidateEdge {
            source: 0,
            target: 9,
            distance: 1.0,
            bearing: 0.0,
        };
        let err = Network::from_parts(square(1.5), vec![edge]).unwrap_err();
        assert!(matches!(err, CbtcError::InputInconsistency(_)));
    }

    #[test]
    fn test_from_parts_rejects_wrong_distance() {
        let edge = CandidateEdge {
            source: 0,
            target: 1,
            distance: 1.1,
            bearing: 0.0,
        };
        assert!(Network::from_parts(square(1.5), vec![edge]).is_err());
    }

    #[test]
    fn test_from_parts_rejects_out_of_range_edge() {
        let edge = CandidateEdge {
            source: 0,
            target: 2,
            distance: 2f64.sqrt(),
            bearing: PI / 4.0,
        };
        assert!(Network::from_parts(square(1.2), vec![edge]).is_err());
    }

    #[test]
    fn test_from_parts_accepts_consistent_edges() {
        let full = Network::from_nodes(square(1.5)).unwrap();
        let edges: Vec<CandidateEdge> = full.candidate_edges().copied().collect();
        let rebuilt = Network::from_parts(square(1.5), edges).unwrap();
        assert_eq!(rebuilt.candidate_edge_count(), 12);
        assert_eq!(rebuilt.candidates(2), full.candidates(2));
    }

    #[test]
    fn test_coincident_nodes_are_accepted() {
        let nodes = vec![
            Node::new(0, Position::new(1.0, 1.0), 2.0),
            Node::new(1, Position::new(1.0, 1.0), 2.0),
        ];
        let net = Network::from_nodes(nodes).unwrap();
        let e = net.candidate(0, 1).unwrap();
        assert_eq!(e.distance, 0.0);
        assert_eq!(e.bearing, 0.0);
    }
}
