use crate::domain::coverage::ConeCoverageEvaluator;
use crate::domain::edge::CandidateEdge;
use crate::domain::topology::{CoverageStatus, SelectedEdgeSet};

/// Shrink-back optimizer - drops far neighbors that contribute nothing to coverage
pub struct ShrinkBackOptimizer {
    evaluator: ConeCoverageEvaluator,
}

impl ShrinkBackOptimizer {
    pub fn new(alpha: f64) -> Self {
        Self {
            evaluator: ConeCoverageEvaluator::new(alpha),
        }
    }

    /// Repeatedly try to remove the farthest edge, stopping at the first one coverage needs.
    ///
    /// A covered node must stay covered. A boundary node must keep its covered
    /// direction set intact, so the removed edge's cone has to lie inside the
    /// cones of the remaining neighbors.
    pub fn prune(&self, mut selection: SelectedEdgeSet) -> SelectedEdgeSet {
        if selection.status() == CoverageStatus::Isolated {
            return selection;
        }

        while let Some(farthest) = selection.pop_farthest() {
            if self.can_drop(selection.status(), &farthest, &selection.angles()) {
                continue;
            }
            selection.restore(farthest);
            break;
        }
        selection
    }

    /// Whether removing `edge` keeps the node's coverage, given the remaining bearings.
    pub fn can_drop(&self, status: CoverageStatus, edge: &CandidateEdge, remaining: &[f64]) -> bool {
        match status {
            CoverageStatus::Covered => self.evaluator.is_covered(remaining),
            CoverageStatus::Exhausted => self.evaluator.cone_is_redundant(edge.bearing, remaining),
            CoverageStatus::Isolated => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::builder::TopologyBuilder;
    use crate::domain::config::PowerSchedule;
    use crate::domain::network::Network;
    use crate::domain::node::{Node, NodeId, Position};
    use std::f64::consts::PI;

    const TWO_PI_3: f64 = 2.0 * PI / 3.0;

    fn network(points: &[(f64, f64)], radius: f64) -> Network {
        let nodes = points
            .iter()
            .enumerate()
            .map(|(i, &(x, y))| Node::new(i as NodeId, Position::new(x, y), radius))
            .collect();
        Network::from_nodes(nodes).unwrap()
    }

    fn built(net: &Network, id: NodeId, schedule: PowerSchedule) -> SelectedEdgeSet {
        TopologyBuilder::new(TWO_PI_3, schedule).build(net.node(id).unwrap(), net.candidates(id))
    }

    #[test]
    fn test_square_corner_drops_diagonal() {
        let net = network(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)], 1.5);
        let sel = built(&net, 0, PowerSchedule::Incremental);
        assert_eq!(sel.len(), 3);
        assert_eq!(sel.status(), CoverageStatus::Exhausted);

        let pruned = ShrinkBackOptimizer::new(TWO_PI_3).prune(sel);
        let mut targets: Vec<NodeId> = pruned.targets().collect();
        targets.sort();
        assert_eq!(targets, vec![1, 3]);
    }

    #[test]
    fn test_covered_node_sheds_redundant_batch_members() {
        // One geometric round admits all five neighbors; the far fifth one is redundant
        let net = network(
            &[(0.0, 0.0), (1.0, 0.0), (0.0, 1.1), (-1.2, 0.0), (0.0, -1.3), (1.4, 0.1)],
            5.0,
        );
        let sel = built(
            &net,
            0,
            PowerSchedule::Geometric {
                initial_power: 2.0,
                growth_factor: 1.5,
            },
        );
        assert_eq!(sel.status(), CoverageStatus::Covered);
        assert_eq!(sel.len(), 5);

        let pruned = ShrinkBackOptimizer::new(TWO_PI_3).prune(sel);
        assert_eq!(pruned.len(), 4);
        assert!(!pruned.contains(5));
        assert_eq!(pruned.status(), CoverageStatus::Covered);
    }

    #[test]
    fn test_incremental_covered_selection_is_already_minimal() {
        let net = network(
            &[(0.0, 0.0), (1.0, 0.0), (0.0, 1.1), (-1.2, 0.0), (0.0, -1.3)],
            5.0,
        );
        let sel = built(&net, 0, PowerSchedule::Incremental);
        let before = sel.len();
        let pruned = ShrinkBackOptimizer::new(TWO_PI_3).prune(sel);
        assert_eq!(pruned.len(), before);
    }

    #[test]
    fn test_single_neighbor_is_kept() {
        let net = network(&[(0.0, 0.0), (1.0, 0.0)], 2.0);
        let pruned = ShrinkBackOptimizer::new(TWO_PI_3).prune(built(&net, 0, PowerSchedule::Incremental));
        assert_eq!(pruned.len(), 1);
    }

    #[test]
    fn test_isolated_node_is_untouched() {
        let net = network(&[(0.0, 0.0), (5.0, 0.0)], 1.0);
        let pruned = ShrinkBackOptimizer::new(TWO_PI_3).prune(built(&net, 0, PowerSchedule::Incremental));
        assert!(pruned.is_empty());
        assert_eq!(pruned.status(), CoverageStatus::Isolated);
    }
}
