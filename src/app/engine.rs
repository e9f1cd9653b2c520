use crate::adapters::generator::{FixedLayoutGenerator, Layout, UniformScatterGenerator};
use crate::app::dto::*;
use crate::app::scenario::Scenario;
use crate::domain::analyzer::{ConnectivityAnalyzer, Metrics, PowerComparison};
use crate::domain::builder::TopologyBuilder;
use crate::domain::config::SimulationConfig;
use crate::domain::coverage::{ConeCoverageEvaluator, max_gap};
use crate::domain::network::Network;
use crate::domain::node::NodeId;
use crate::domain::ports::NetworkGenerator;
use crate::domain::resolver::{AsymmetricEdgeResolver, Resolution};
use crate::domain::shrink::ShrinkBackOptimizer;
use crate::domain::topology::{CoverageStatus, SelectedEdgeSet, Topology};
use anyhow::{Context as _, Result};
use rayon::prelude::*;
use tracing::{debug, info, warn};

/// Every intermediate product of one pipeline run
#[derive(Debug, Clone)]
pub struct SimulationOutcome {
    /// Greedy selections, in node-id order
    pub built: Vec<SelectedEdgeSet>,
    /// Selections after shrink-back; identical to `built` when it is disabled
    pub pruned: Vec<SelectedEdgeSet>,
    pub resolution: Resolution,
    pub metrics: Metrics,
    pub baseline: Metrics,
    pub comparison: PowerComparison,
}

impl SimulationOutcome {
    pub fn topology(&self) -> &Topology {
        &self.resolution.topology
    }
}

/// Runs the CBTC pipeline for one validated configuration.
#[derive(Debug, Clone)]
pub struct SimulationEngine {
    config: SimulationConfig,
}

impl SimulationEngine {
    pub fn new(config: SimulationConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn generate(&self, generator: &dyn NetworkGenerator) -> Result<Network> {
        let network = generator
            .generate(&self.config)
            .context("Failed to generate network")?;
        debug!(
            nodes = network.node_count(),
            candidates = network.candidate_edge_count(),
            "network generated"
        );
        Ok(network)
    }

    /// Build, optionally prune, resolve and analyze.
    ///
    /// Per-node work runs in parallel; the resolver only sees the complete set
    /// of selections.
    pub fn run(&self, network: &Network) -> Result<SimulationOutcome> {
        let alpha = self.config.cone_angle;
        let builder = TopologyBuilder::new(alpha, self.config.power_schedule);
        let optimizer = ShrinkBackOptimizer::new(alpha);

        let selections: Vec<(SelectedEdgeSet, SelectedEdgeSet)> = network
            .nodes()
            .par_iter()
            .map(|node| {
                let selection = builder.build(node, network.candidates(node.id));
                debug!(
                    node = node.id,
                    selected = selection.len(),
                    status = ?selection.status(),
                    "node built"
                );
                let pruned = if self.config.shrink_back {
                    let pruned = optimizer.prune(selection.clone());
                    if pruned.len() < selection.len() {
                        debug!(
                            node = node.id,
                            before = selection.len(),
                            after = pruned.len(),
                            "node pruned"
                        );
                    }
                    pruned
                } else {
                    selection.clone()
                };
                (selection, pruned)
            })
            .collect();
        let (built, pruned): (Vec<_>, Vec<_>) = selections.into_iter().unzip();

        let evaluator = ConeCoverageEvaluator::new(alpha);
        for selection in pruned
            .iter()
            .filter(|s| s.status() == CoverageStatus::Exhausted)
        {
            if !evaluator.is_covered(&selection.angles()) {
                warn!(
                    node = selection.node(),
                    neighbors = selection.len(),
                    "node exhausted its candidates without reaching coverage"
                );
            }
        }

        let resolution =
            AsymmetricEdgeResolver::new(self.config.asymmetric_mode, alpha).resolve(&pruned, network);
        for exception in &resolution.exceptions {
            warn!(
                source = exception.source,
                target = exception.target,
                reason = ?exception.reason,
                "asymmetric edge kept"
            );
        }

        let analyzer = ConnectivityAnalyzer::new(self.config.path_loss_exponent);
        let positions = network.positions();
        let metrics = analyzer
            .analyze(&resolution.topology, &positions)
            .context("Failed to analyze final topology")?;
        let baseline = analyzer
            .analyze(&network.full_topology(), &positions)
            .context("Failed to analyze full graph")?;
        let comparison = analyzer.compare(&metrics, &baseline);

        info!(
            nodes = metrics.node_count,
            edges = metrics.edge_count,
            connected = metrics.is_connected,
            components = metrics.component_count,
            savings_ratio = comparison.savings_ratio,
            "simulation complete"
        );

        Ok(SimulationOutcome {
            built,
            pruned,
            resolution,
            metrics,
            baseline,
            comparison,
        })
    }

    /// Run and flatten the outcome into a serializable report.
    pub fn report(&self, network: &Network) -> Result<SimulationReport> {
        let outcome = self.run(network)?;
        let topology = outcome.topology();
        let exponent = self.config.path_loss_exponent;

        let nodes = outcome
            .built
            .iter()
            .zip(&outcome.pruned)
            .filter_map(|(built, pruned)| {
                let node = network.node(built.node())?;
                let final_targets: Vec<NodeId> = topology
                    .neighbors(node.id)
                    .map(|n| n.iter().copied().collect())
                    .unwrap_or_default();
                let radius = final_targets
                    .iter()
                    .filter_map(|&v| network.candidate(node.id, v))
                    .map(|e| e.distance)
                    .fold(0.0, f64::max);
                Some(NodeReport {
                    id: node.id,
                    x: node.position.x,
                    y: node.position.y,
                    status: pruned.status(),
                    candidate_count: network.candidates(node.id).len(),
                    built_count: built.len(),
                    pruned_count: pruned.len(),
                    final_count: final_targets.len(),
                    radius,
                    max_gap: max_gap(&pruned.angles()),
                })
            })
            .collect();

        let ids_with = |status: CoverageStatus| {
            outcome
                .pruned
                .iter()
                .filter(|s| s.status() == status)
                .map(|s| s.node())
                .collect::<Vec<_>>()
        };

        Ok(SimulationReport {
            config: self.config.clone(),
            stages: StageCounts {
                candidate_edges: network.candidate_edge_count(),
                built_edges: outcome.built.iter().map(SelectedEdgeSet::len).sum(),
                pruned_edges: outcome.pruned.iter().map(SelectedEdgeSet::len).sum(),
                final_edges: topology.edge_count(),
            },
            metrics: outcome.metrics.clone(),
            full_metrics: outcome.baseline.clone(),
            power: outcome.comparison.clone(),
            uncovered_nodes: ids_with(CoverageStatus::Exhausted),
            isolated_nodes: ids_with(CoverageStatus::Isolated),
            exceptions: outcome.resolution.exceptions.clone(),
            nodes,
            edges: edge_dtos(network, topology, exponent),
            full_graph_edges: edge_dtos(network, &network.full_topology(), exponent),
        })
    }

    /// Run every scenario against the same network.
    pub fn compare(&self, network: &Network, scenarios: &[Scenario]) -> Result<ComparisonReport> {
        let analyzer = ConnectivityAnalyzer::new(self.config.path_loss_exponent);
        let full = network.full_topology();
        let baseline = analyzer.analyze(&full, &network.positions())?;

        let mut results = Vec::with_capacity(scenarios.len());
        for scenario in scenarios {
            let result = match scenario.apply(&self.config) {
                None => ScenarioResult {
                    label: scenario.label.clone(),
                    cone_angle: None,
                    shrink_back: false,
                    asymmetric_mode: None,
                    metrics: baseline.clone(),
                    power: analyzer.compare(&baseline, &baseline),
                    edges: edge_dtos(network, &full, self.config.path_loss_exponent),
                },
                Some(config) => {
                    let engine = Self::new(config)
                        .with_context(|| format!("Invalid scenario: {}", scenario.label))?;
                    let outcome = engine.run(network)?;
                    ScenarioResult {
                        label: scenario.label.clone(),
                        cone_angle: Some(engine.config.cone_angle),
                        shrink_back: engine.config.shrink_back,
                        asymmetric_mode: Some(engine.config.asymmetric_mode),
                        edges: edge_dtos(
                            network,
                            outcome.topology(),
                            engine.config.path_loss_exponent,
                        ),
                        metrics: outcome.metrics,
                        power: outcome.comparison,
                    }
                }
            };
            info!(
                scenario = %result.label,
                edges = result.metrics.edge_count,
                connected = result.metrics.is_connected,
                "scenario complete"
            );
            results.push(result);
        }

        Ok(ComparisonReport {
            node_count: network.node_count(),
            candidate_edges: network.candidate_edge_count(),
            scenarios: results,
        })
    }

    /// Generate the request's network and report on it.
    pub fn simulate(request: SimulateRequest) -> Result<SimulationReport> {
        let engine = Self::new(request.config)?;
        let network = engine.generate(&*generator_for(request.layout))?;
        engine.report(&network)
    }

    /// Generate the request's network and run the paper suite on it.
    pub fn compare_suite(request: SimulateRequest) -> Result<ComparisonReport> {
        let engine = Self::new(request.config)?;
        let network = engine.generate(&*generator_for(request.layout))?;
        engine.compare(&network, &Scenario::paper_suite())
    }
}

/// Fixed placement when a layout is given, seeded scatter otherwise.
pub fn generator_for(layout: Option<Layout>) -> Box<dyn NetworkGenerator> {
    match layout {
        Some(layout) => Box::new(FixedLayoutGenerator::new(layout)),
        None => Box::new(UniformScatterGenerator::new()),
    }
}

fn edge_dtos(network: &Network, topology: &Topology, path_loss_exponent: f64) -> Vec<EdgeDto> {
    topology
        .edges()
        .filter_map(|(u, v)| network.candidate(u, v))
        .map(|e| EdgeDto {
            source: e.source,
            target: e.target,
            distance: e.distance,
            power: e.power(path_loss_exponent),
        })
        .collect()
}
