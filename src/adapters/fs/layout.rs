use crate::adapters::generator::Layout;
use anyhow::{Context, Result};
use std::path::Path;

/// File system reader for JSON layout files
pub struct LayoutFileReader;

impl Default for LayoutFileReader {
    fn default() -> Self {
        Self::new()
    }
}

impl LayoutFileReader {
    pub fn new() -> Self {
        Self
    }

    pub fn read(&self, path: &Path) -> Result<Layout> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read layout file: {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse layout JSON: {}", path.display()))
    }
}
