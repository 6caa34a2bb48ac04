//! Error types for scenario loading and simulation ticks.

use thiserror::Error;

use crate::simulation::states::BodyId;

/// Errors surfaced by the simulation core.
#[derive(Debug, Error)]
pub enum SimError {
    /// A physical constant or runtime setting is out of range.
    #[error("Invalid configuration: {field} = {value} ({reason})")]
    Configuration {
        field: &'static str,
        value: f64,
        reason: &'static str,
    },

    /// A body reached a mass, radius or position the physics cannot use.
    #[error("Degenerate body {id:?}: mass = {mass}, radius = {radius}")]
    DegenerateState { id: BodyId, mass: f64, radius: f64 },

    /// Scenario file could not be read.
    #[error("Failed to read scenario: {0}")]
    Io(#[from] std::io::Error),

    /// Scenario file is not valid YAML or misses a field.
    #[error("Failed to parse scenario: {0}")]
    Parse(#[from] serde_yaml::Error),
}

/// Result type for simulation operations.
pub type SimResult<T> = std::result::Result<T, SimError>;
