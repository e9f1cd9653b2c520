//! Node layouts shared by the integration tests.
#![allow(dead_code)]

use cbtc_sim::adapters::generator::{Layout, LayoutNode};
use cbtc_sim::domain::config::SimulationConfig;
use cbtc_sim::domain::network::Network;
use cbtc_sim::domain::node::{Node, NodeId, Position};
use std::f64::consts::PI;

pub const TWO_PI_3: f64 = 2.0 * PI / 3.0;
pub const FIVE_PI_6: f64 = 5.0 * PI / 6.0;

/// Unit square; with radius 1.5 every corner reaches the other three.
pub fn square_layout() -> Layout {
    Layout::from_points(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)])
}

pub fn pair_layout() -> Layout {
    Layout::from_points(&[(0.0, 0.0), (1.0, 0.0)])
}

/// Two clusters too far apart to ever link
pub fn split_layout() -> Layout {
    Layout::from_points(&[(0.0, 0.0), (1.0, 0.0), (0.5, 1.0), (50.0, 50.0), (51.0, 50.0)])
}

/// Layout with per-node radii
pub fn layout_with_radii(nodes: &[(f64, f64, f64)]) -> Layout {
    Layout {
        nodes: nodes
            .iter()
            .enumerate()
            .map(|(i, &(x, y, r))| LayoutNode {
                id: i as NodeId,
                x,
                y,
                radius: Some(r),
            })
            .collect(),
    }
}

pub fn config(node_count: usize, radius: f64) -> SimulationConfig {
    SimulationConfig {
        node_count,
        transmission_radius: radius,
        ..SimulationConfig::default()
    }
}

pub fn network(points: &[(f64, f64)], radius: f64) -> Network {
    let nodes = points
        .iter()
        .enumerate()
        .map(|(i, &(x, y))| Node::new(i as NodeId, Position::new(x, y), radius))
        .collect();
    Network::from_nodes(nodes).unwrap()
}
