use crate::domain::config::SimulationConfig;
use crate::domain::network::Network;
use anyhow::Result;

/// Node placement port (implemented by adapters)
///
/// Implementations must be deterministic for a given configuration so that a
/// whole simulation can be reproduced from its `random_seed`.
pub trait NetworkGenerator: Send + Sync {
    fn generate(&self, config: &SimulationConfig) -> Result<Network>;
}
