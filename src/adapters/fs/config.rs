use crate::domain::config::SimulationConfig;
use anyhow::{Context, Result};
use std::path::Path;

/// Reads a JSON simulation config; missing fields take their defaults.
pub struct ConfigFileReader;

impl Default for ConfigFileReader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigFileReader {
    pub fn new() -> Self {
        Self
    }

    pub fn read(&self, path: &Path) -> Result<SimulationConfig> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config JSON: {}", path.display()))
    }
}
