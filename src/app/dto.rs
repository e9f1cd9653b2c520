use crate::adapters::generator::Layout;
use crate::domain::analyzer::{Metrics, PowerComparison};
use crate::domain::config::{AsymmetricMode, SimulationConfig};
use crate::domain::node::NodeId;
use crate::domain::resolver::ResolverException;
use crate::domain::topology::CoverageStatus;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Input for a simulation or a scenario comparison
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SimulateRequest {
    #[serde(default)]
    pub config: SimulationConfig,
    /// Explicit placement; a seeded uniform scatter is used when absent
    #[serde(default)]
    pub layout: Option<Layout>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeDto {
    pub source: NodeId,
    pub target: NodeId,
    pub distance: f64,
    /// Transmission cost under the configured path-loss exponent
    pub power: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeReport {
    pub id: NodeId,
    pub x: f64,
    pub y: f64,
    pub status: CoverageStatus,
    pub candidate_count: usize,
    /// Selection size straight after the greedy build
    pub built_count: usize,
    /// Selection size after shrink-back (equal to `built_count` when disabled)
    pub pruned_count: usize,
    /// Neighbor count in the final topology
    pub final_count: usize,
    /// Distance to the farthest final neighbor
    pub radius: f64,
    /// Widest angular gap between pruned selections, radians
    pub max_gap: f64,
}

/// Directed edge totals after each pipeline stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageCounts {
    pub candidate_edges: usize,
    pub built_edges: usize,
    pub pruned_edges: usize,
    pub final_edges: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationReport {
    pub config: SimulationConfig,
    pub stages: StageCounts,
    pub metrics: Metrics,
    pub full_metrics: Metrics,
    pub power: PowerComparison,
    /// Nodes that ran out of candidates before reaching coverage
    pub uncovered_nodes: Vec<NodeId>,
    /// Nodes with no candidate at all
    pub isolated_nodes: Vec<NodeId>,
    pub exceptions: Vec<ResolverException>,
    pub nodes: Vec<NodeReport>,
    pub edges: Vec<EdgeDto>,
    pub full_graph_edges: Vec<EdgeDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioResult {
    pub label: String,
    /// `None` for the uncontrolled baseline
    pub cone_angle: Option<f64>,
    pub shrink_back: bool,
    pub asymmetric_mode: Option<AsymmetricMode>,
    pub metrics: Metrics,
    pub power: PowerComparison,
    pub edges: Vec<EdgeDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonReport {
    pub node_count: usize,
    pub candidate_edges: usize,
    pub scenarios: Vec<ScenarioResult>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorBody {
    pub error: String,
}
