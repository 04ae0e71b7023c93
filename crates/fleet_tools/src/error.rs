//! Error type for the tools crate.

use std::path::PathBuf;

use fleet_core::error::FleetError;
use thiserror::Error;

/// Result type alias using [`ToolError`].
pub type Result<T> = std::result::Result<T, ToolError>;

/// Errors raised while loading scenarios or writing reports.
#[derive(Debug, Error)]
pub enum ToolError {
    /// Scenario file does not exist.
    #[error("Scenario file not found: {0}")]
    ScenarioNotFound(PathBuf),

    /// Failed to read or write a file.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Scenario file could not be parsed.
    #[error("Failed to parse scenario: {0}")]
    Parse(#[from] ron::error::SpannedError),

    /// Report could not be encoded.
    #[error("Failed to encode report: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration or chart data was rejected by the engine.
    #[error(transparent)]
    Fleet(#[from] FleetError),

    /// Command-line argument could not be understood.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}
