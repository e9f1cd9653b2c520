use crate::domain::config::PowerSchedule;
use crate::domain::coverage::{ConeCoverageEvaluator, Coverage};
use crate::domain::edge::CandidateEdge;
use crate::domain::node::Node;
use crate::domain::topology::{CoverageStatus, SelectedEdgeSet};

/// State of the per-node greedy scan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildState {
    /// More candidates may be admitted
    Scanning,
    /// Coverage reached; terminal
    Covered,
    /// Candidates ran out before coverage; terminal
    Exhausted,
}

/// Cursor over a node's candidate list
struct Scan {
    next: usize,
    power: f64,
}

/// Topology builder - greedy nearest-first edge selection per node
pub struct TopologyBuilder {
    evaluator: ConeCoverageEvaluator,
    schedule: PowerSchedule,
}

impl TopologyBuilder {
    pub fn new(alpha: f64, schedule: PowerSchedule) -> Self {
        Self {
            evaluator: ConeCoverageEvaluator::new(alpha),
            schedule,
        }
    }

    /// Select the smallest prefix of `candidates` (in selection order) that covers
    /// `node`, or all of them when coverage is unreachable.
    ///
    /// Under a geometric power schedule the prefix grows in whole power rounds.
    pub fn build(&self, node: &Node, candidates: &[CandidateEdge]) -> SelectedEdgeSet {
        let mut selection = SelectedEdgeSet::new(node.id);
        if candidates.is_empty() {
            selection.set_status(CoverageStatus::Isolated);
            return selection;
        }

        let mut scan = Scan {
            next: 0,
            power: match self.schedule {
                PowerSchedule::Incremental => node.radius,
                PowerSchedule::Geometric { initial_power, .. } => initial_power.min(node.radius),
            },
        };

        let mut state = BuildState::Scanning;
        while state == BuildState::Scanning {
            state = self.step(node, candidates, &mut selection, &mut scan);
        }

        selection.set_status(match state {
            BuildState::Covered => CoverageStatus::Covered,
            _ => CoverageStatus::Exhausted,
        });
        selection
    }

    /// Admit the next batch of candidates and re-evaluate coverage.
    fn step(
        &self,
        node: &Node,
        candidates: &[CandidateEdge],
        selection: &mut SelectedEdgeSet,
        scan: &mut Scan,
    ) -> BuildState {
        if scan.next >= candidates.len() {
            return BuildState::Exhausted;
        }

        let end = self.batch_end(node, candidates, scan);
        for edge in &candidates[scan.next..end] {
            selection.push(*edge);
        }
        scan.next = end;

        match self
            .evaluator
            .evaluate(&selection.angles(), candidates.len() - scan.next)
        {
            Coverage::Covered => BuildState::Covered,
            Coverage::Exempt => BuildState::Exhausted,
            Coverage::Uncovered => BuildState::Scanning,
        }
    }

    /// Exclusive end of the next batch; always admits at least one candidate
    fn batch_end(&self, node: &Node, candidates: &[CandidateEdge], scan: &mut Scan) -> usize {
        let len = candidates.len();
        match self.schedule {
            PowerSchedule::Incremental => scan.next + 1,
            PowerSchedule::Geometric { growth_factor, .. } => {
                let within = |power: f64| candidates.partition_point(|e| e.distance <= power);

                // Skip power levels that reach nobody new
                let mut end = within(scan.power);
                while end <= scan.next && scan.power < node.radius {
                    scan.power = (scan.power * growth_factor).min(node.radius);
                    end = within(scan.power);
                }
                scan.power = (scan.power * growth_factor).min(node.radius);

                end.max(scan.next + 1).min(len)
            }
        }
    }
}
