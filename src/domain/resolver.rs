use crate::domain::config::AsymmetricMode;
use crate::domain::network::Network;
use crate::domain::node::NodeId;
use crate::domain::shrink::ShrinkBackOptimizer;
use crate::domain::topology::{SelectedEdgeSet, Topology};
use serde::{Deserialize, Serialize};

/// Why an asymmetric edge survived resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExceptionReason {
    /// Dropping the edge would shrink the source's coverage
    CoverageDependent,
    /// The target cannot reach back, so the reverse link was not added
    ReverseUnreachable,
}

/// An asymmetric edge the resolver could not reconcile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolverException {
    pub source: NodeId,
    pub target: NodeId,
    pub reason: ExceptionReason,
}

/// Final topology plus the edges that stayed one-sided
#[derive(Debug, Clone, Default)]
pub struct Resolution {
    pub topology: Topology,
    pub exceptions: Vec<ResolverException>,
}

/// Reconciles per-node selections into a final topology.
///
/// Runs only once every node's selection is final; asymmetry is always judged
/// against the frozen input, never against partially resolved output.
pub struct AsymmetricEdgeResolver {
    mode: AsymmetricMode,
    optimizer: ShrinkBackOptimizer,
}

impl AsymmetricEdgeResolver {
    pub fn new(mode: AsymmetricMode, alpha: f64) -> Self {
        Self {
            mode,
            optimizer: ShrinkBackOptimizer::new(alpha),
        }
    }

    pub fn resolve(&self, selections: &[SelectedEdgeSet], network: &Network) -> Resolution {
        let frozen = Topology::from_selections(selections);
        match self.mode {
            AsymmetricMode::Directed => Resolution {
                topology: frozen,
                exceptions: Vec::new(),
            },
            AsymmetricMode::UnionSymmetrize => symmetrize(frozen, network),
            AsymmetricMode::DropAsymmetric => self.drop_asymmetric(selections, &frozen),
        }
    }

    /// Remove one-sided edges farthest first, re-checking coverage after every drop.
    fn drop_asymmetric(&self, selections: &[SelectedEdgeSet], frozen: &Topology) -> Resolution {
        let mut topology = Topology::new();
        let mut exceptions = Vec::new();

        for selection in selections {
            let u = selection.node();
            let mut kept = selection.clone();

            let one_sided: Vec<NodeId> = selection
                .edges()
                .iter()
                .rev()
                .map(|e| e.target)
                .filter(|&v| !frozen.has_edge(v, u))
                .collect();

            for v in one_sided {
                let Some(edge) = kept.remove_target(v) else {
                    continue;
                };
                if !self
                    .optimizer
                    .can_drop(kept.status(), &edge, &kept.angles())
                {
                    kept.restore(edge);
                    exceptions.push(ResolverException {
                        source: u,
                        target: v,
                        reason: ExceptionReason::CoverageDependent,
                    });
                }
            }

            topology.add_node(u);
            for v in kept.targets() {
                topology.add_edge(u, v);
            }
        }

        Resolution {
            topology,
            exceptions,
        }
    }
}

/// Add the reverse of every one-sided edge the target can physically transmit.
fn symmetrize(frozen: Topology, network: &Network) -> Resolution {
    let mut topology = frozen.clone();
    let mut exceptions = Vec::new();

    for (u, v) in frozen.asymmetric_edges() {
        if network.candidate(v, u).is_some() {
            topology.add_edge(v, u);
        } else {
            exceptions.push(ResolverException {
                source: u,
                target: v,
                reason: ExceptionReason::ReverseUnreachable,
            });
        }
    }

    Resolution {
        topology,
        exceptions,
    }
}
