//! Error types for the health configuration layer
//!
//! Health operations themselves never fail; out-of-range values are clamped.

use thiserror::Error;

/// Health configuration errors
#[derive(Debug, Error)]
pub enum HealthError {
    /// Configuration holds a value that cannot be clamped meaningfully
    #[error("Invalid health configuration: {0}")]
    InvalidConfig(String),

    /// Configuration could not be parsed
    #[error("Failed to parse health configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Result type for health configuration
pub type Result<T> = std::result::Result<T, HealthError>;
