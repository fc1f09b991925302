//! Error types for envrisk

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EnvRiskError {
    // Location errors
    #[error("Cannot extract coordinates: {reason}")]
    CoordinateExtraction { reason: String },

    #[error("Cannot project a heatmap from an empty batch of assessments")]
    EmptyBatch,

    // Input errors
    #[error("Invalid feature collection: {reason}")]
    InvalidFeatureCollection { reason: String },

    // Configuration errors
    #[error("Invalid configuration value for {key}: {reason}")]
    ConfigInvalid { key: String, reason: String },

    // Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl EnvRiskError {
    pub fn coordinates(reason: impl Into<String>) -> Self {
        Self::CoordinateExtraction { reason: reason.into() }
    }
}

pub type Result<T> = std::result::Result<T, EnvRiskError>;
