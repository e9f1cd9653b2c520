use crate::domain::config::SimulationConfig;
use crate::domain::error::CbtcError;
use crate::domain::network::Network;
use crate::domain::node::{Node, NodeId, Position};
use crate::domain::ports::NetworkGenerator;
use anyhow::Result;
use serde::{Deserialize, Serialize};

/// One node of an explicit layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutNode {
    pub id: NodeId,
    pub x: f64,
    pub y: f64,
    /// Falls back to the configured transmission radius
    #[serde(default)]
    pub radius: Option<f64>,
}

/// Explicit node placement, e.g. loaded from a layout file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    pub nodes: Vec<LayoutNode>,
}

impl Layout {
    pub fn from_points(points: &[(f64, f64)]) -> Self {
        Self {
            nodes: points
                .iter()
                .enumerate()
                .map(|(i, &(x, y))| LayoutNode {
                    id: i as NodeId,
                    x,
                    y,
                    radius: None,
                })
                .collect(),
        }
    }
}

/// Generator that replays a fixed layout; `node_count` and `random_seed` are ignored
pub struct FixedLayoutGenerator {
    layout: Layout,
}

impl FixedLayoutGenerator {
    pub fn new(layout: Layout) -> Self {
        Self { layout }
    }
}

impl NetworkGenerator for FixedLayoutGenerator {
    fn generate(&self, config: &SimulationConfig) -> Result<Network> {
        if self.layout.nodes.len() < 2 {
            return Err(CbtcError::config(format!(
                "a layout needs at least 2 nodes, got {}",
                self.layout.nodes.len()
            ))
            .into());
        }

        let nodes = self
            .layout
            .nodes
            .iter()
            .map(|n| {
                Node::new(
                    n.id,
                    Position::new(n.x, n.y),
                    n.radius.unwrap_or(config.transmission_radius),
                )
            })
            .collect();

        Ok(Network::from_nodes(nodes)?)
    }
}
