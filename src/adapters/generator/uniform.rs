use crate::domain::config::SimulationConfig;
use crate::domain::network::Network;
use crate::domain::node::{Node, NodeId, Position};
use crate::domain::ports::NetworkGenerator;
use anyhow::Result;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Uniform random scatter over the square [0, area_size)²
///
/// Every node gets the configured transmission radius. The same seed always
/// yields the same placement.
pub struct UniformScatterGenerator;

impl Default for UniformScatterGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl UniformScatterGenerator {
    pub fn new() -> Self {
        Self
    }
}

impl NetworkGenerator for UniformScatterGenerator {
    fn generate(&self, config: &SimulationConfig) -> Result<Network> {
        config.validate()?;

        let mut rng = StdRng::seed_from_u64(config.random_seed);
        let nodes = (0..config.node_count)
            .map(|i| {
                let x = rng.gen_range(0.0..config.area_size);
                let y = rng.gen_range(0.0..config.area_size);
                Node::new(i as NodeId, Position::new(x, y), config.transmission_radius)
            })
            .collect();

        Ok(Network::from_nodes(nodes)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(seed: u64) -> SimulationConfig {
        SimulationConfig {
            node_count: 25,
            random_seed: seed,
            ..Default::default()
        }
    }

    #[test]
    fn test_same_seed_same_network() {
        let a = UniformScatterGenerator::new().generate(&config(7)).unwrap();
        let b = UniformScatterGenerator::new().generate(&config(7)).unwrap();
        assert_eq!(a.nodes(), b.nodes());
        assert_eq!(a.candidate_edge_count(), b.candidate_edge_count());
    }

    #[test]
    fn test_different_seed_different_placement() {
        let a = UniformScatterGenerator::new().generate(&config(1)).unwrap();
        let b = UniformScatterGenerator::new().generate(&config(2)).unwrap();
        assert_ne!(a.nodes(), b.nodes());
    }

    #[test]
    fn test_nodes_stay_inside_area() {
        let c = config(3);
        let net = UniformScatterGenerator::new().generate(&c).unwrap();
        assert_eq!(net.node_count(), 25);
        for n in net.nodes() {
            assert!((0.0..c.area_size).contains(&n.position.x));
            assert!((0.0..c.area_size).contains(&n.position.y));
            assert_eq!(n.radius, c.transmission_radius);
        }
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let c = SimulationConfig {
            node_count: 1,
            ..Default::default()
        };
        assert!(UniformScatterGenerator::new().generate(&c).is_err());
    }
}
