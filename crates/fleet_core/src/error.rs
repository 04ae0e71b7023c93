//! Error types for fleet AI configuration and data loading.
//!
//! Tactical queries never fail; only IO and configuration do.

use thiserror::Error;

/// Result type alias using [`FleetError`].
pub type Result<T> = std::result::Result<T, FleetError>;

/// Top-level error type for `fleet_core`.
#[derive(Debug, Error)]
pub enum FleetError {
    /// Configuration file does not exist.
    #[error("Config file not found: {0}")]
    ConfigNotFound(String),

    /// Failed to read a data file.
    #[error("Failed to read data file: {0}")]
    Io(#[from] std::io::Error),

    /// Data file could not be parsed.
    #[error("Failed to parse data file: {0}")]
    Parse(#[from] ron::error::SpannedError),

    /// A configuration value is out of range.
    #[error("Invalid config field '{field}': {reason}")]
    InvalidConfig {
        /// Name of the offending field.
        field: &'static str,
        /// Why the value was rejected.
        reason: String,
    },
}
