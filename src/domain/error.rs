//! Error types for the CBTC domain.

use thiserror::Error;

/// Result type for domain operations.
pub type Result<T> = std::result::Result<T, CbtcError>;

/// Errors raised before the pipeline starts.
///
/// Uncovered nodes and disconnected topologies are not errors; they are reported
/// through metrics.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CbtcError {
    /// A configuration value is outside its allowed domain.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Nodes and candidate edges disagree with each other.
    #[error("input inconsistency: {0}")]
    InputInconsistency(String),
}

impl CbtcError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::InvalidConfiguration(msg.into())
    }

    pub fn input(msg: impl Into<String>) -> Self {
        Self::InputInconsistency(msg.into())
    }
}
