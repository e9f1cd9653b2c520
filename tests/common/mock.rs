//! Mock implementations for integration tests.
#![allow(dead_code)]

use anyhow::Result;
use cbtc_sim::domain::config::SimulationConfig;
use cbtc_sim::domain::edge::CandidateEdge;
use cbtc_sim::domain::network::Network;
use cbtc_sim::domain::node::Node;
use cbtc_sim::domain::ports::NetworkGenerator;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Generator that hands out caller-supplied nodes and candidate edges.
pub struct MockGenerator {
    nodes: Vec<Node>,
    edges: Option<Vec<CandidateEdge>>,
    calls: AtomicUsize,
}

impl MockGenerator {
    /// Candidates derived from positions and radii
    pub fn from_nodes(nodes: Vec<Node>) -> Self {
        Self {
            nodes,
            edges: None,
            calls: AtomicUsize::new(0),
        }
    }

    /// Candidates supplied verbatim, validated by the network
    pub fn with_edges(nodes: Vec<Node>, edges: Vec<CandidateEdge>) -> Self {
        Self {
            nodes,
            edges: Some(edges),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl NetworkGenerator for MockGenerator {
    fn generate(&self, _config: &SimulationConfig) -> Result<Network> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let network = match &self.edges {
            Some(edges) => Network::from_parts(self.nodes.clone(), edges.clone())?,
            None => Network::from_nodes(self.nodes.clone())?,
        };
        Ok(network)
    }
}
