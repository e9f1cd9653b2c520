use crate::domain::error::{CbtcError, Result};
use crate::domain::node::{NodeId, Position};
use crate::domain::topology::Topology;
use petgraph::unionfind::UnionFind;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Structural and power metrics of one topology
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    pub node_count: usize,
    pub is_connected: bool,
    pub component_count: usize,
    pub largest_component: usize,
    /// Mean neighbor-set size (out-degree)
    pub avg_degree: f64,
    pub max_degree: usize,
    /// Directed edge count
    pub edge_count: usize,
    pub asymmetric_edge_count: usize,
    /// Σ distance^exponent over directed edges
    pub power_cost: f64,
    /// Mean distance to each node's farthest neighbor
    pub avg_radius: f64,
    pub max_radius: f64,
}

/// Power of a controlled topology against the uncontrolled baseline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PowerComparison {
    pub baseline_power: f64,
    pub topology_power: f64,
    pub savings: f64,
    /// Savings as a fraction of the baseline, 0 when the baseline is empty
    pub savings_ratio: f64,
}

/// Connectivity analyzer - read-only metrics over a topology
pub struct ConnectivityAnalyzer {
    path_loss_exponent: f64,
}

impl ConnectivityAnalyzer {
    pub fn new(path_loss_exponent: f64) -> Self {
        Self { path_loss_exponent }
    }

    /// Compute metrics, treating every link as undirected for connectivity.
    pub fn analyze(
        &self,
        topology: &Topology,
        positions: &BTreeMap<NodeId, Position>,
    ) -> Result<Metrics> {
        let ids: Vec<NodeId> = topology.node_ids().collect();
        let slot: HashMap<NodeId, usize> = ids.iter().enumerate().map(|(i, &id)| (id, i)).collect();

        let position = |id: NodeId| {
            positions.get(&id).ok_or_else(|| {
                CbtcError::input(format!("topology node {id} has no known position"))
            })
        };

        let mut components = UnionFind::<usize>::new(ids.len());
        let mut power_cost = 0.0;
        let mut radii = vec![0.0f64; ids.len()];

        for (u, v) in topology.edges() {
            let (Some(&a), Some(&b)) = (slot.get(&u), slot.get(&v)) else {
                continue;
            };
            let distance = position(u)?.distance_to(position(v)?);
            power_cost += distance.powf(self.path_loss_exponent);
            radii[a] = radii[a].max(distance);
            components.union(a, b);
        }

        let mut sizes: HashMap<usize, usize> = HashMap::new();
        for label in components.into_labeling() {
            *sizes.entry(label).or_default() += 1;
        }

        let degrees: Vec<usize> = ids
            .iter()
            .map(|&id| topology.neighbors(id).map_or(0, |n| n.len()))
            .collect();
        let node_count = ids.len();
        let edge_count = topology.edge_count();
        let mean = |total: f64| {
            if node_count == 0 {
                0.0
            } else {
                total / node_count as f64
            }
        };

        Ok(Metrics {
            node_count,
            is_connected: sizes.len() == 1,
            component_count: sizes.len(),
            largest_component: sizes.values().copied().max().unwrap_or(0),
            avg_degree: mean(edge_count as f64),
            max_degree: degrees.iter().copied().max().unwrap_or(0),
            edge_count,
            asymmetric_edge_count: topology.asymmetric_edges().count(),
            power_cost,
            avg_radius: mean(radii.iter().sum()),
            max_radius: radii.iter().copied().fold(0.0, f64::max),
        })
    }

    pub fn compare(&self, topology: &Metrics, baseline: &Metrics) -> PowerComparison {
        let savings = baseline.power_cost - topology.power_cost;
        PowerComparison {
            baseline_power: baseline.power_cost,
            topology_power: topology.power_cost,
            savings,
            savings_ratio: if baseline.power_cost > 0.0 {
                savings / baseline.power_cost
            } else {
                0.0
            },
        }
    }
}
