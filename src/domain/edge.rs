use crate::domain::node::{Node, NodeId};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Directed candidate link from `source` to `target`.
///
/// Only exists when `distance <= source.radius`. Generated once, read-only thereafter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CandidateEdge {
    pub source: NodeId,
    pub target: NodeId,
    pub distance: f64,
    /// Bearing from source to target, radians in [0, 2π)
    pub bearing: f64,
}

impl CandidateEdge {
    /// Derive the edge from two nodes. Returns `None` when `target` is out of range.
    pub fn between(source: &Node, target: &Node) -> Option<Self> {
        if source.id == target.id || !source.can_reach(target) {
            return None;
        }
        Some(Self {
            source: source.id,
            target: target.id,
            distance: source.distance_to(target),
            bearing: source.position.bearing_to(&target.position),
        })
    }

    /// Selection order: nearest first, lower target id on ties.
    pub fn selection_order(&self, other: &Self) -> Ordering {
        self.distance
            .total_cmp(&other.distance)
            .then_with(|| self.target.cmp(&other.target))
    }

    /// Transmission cost of this link under a path-loss exponent
    pub fn power(&self, path_loss_exponent: f64) -> f64 {
        self.distance.powf(path_loss_exponent)
    }
}

/// Sort a candidate list into selection order
pub fn sort_candidates(candidates: &mut [CandidateEdge]) {
    candidates.sort_by(CandidateEdge::selection_order);
}
