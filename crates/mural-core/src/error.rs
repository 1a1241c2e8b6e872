//! Error types for Mural

use thiserror::Error;

/// The main error type for Mural operations
#[derive(Debug, Error)]
pub enum MuralError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Manifest error: {0}")]
    ManifestError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Generation error: {0}")]
    GenerationError(String),

    #[error("Asset error: {0}")]
    AssetError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Result type alias for Mural operations
pub type Result<T> = std::result::Result<T, MuralError>;

impl From<serde_json::Error> for MuralError {
    fn from(err: serde_json::Error) -> Self {
        MuralError::ParseError(err.to_string())
    }
}

impl From<toml::de::Error> for MuralError {
    fn from(err: toml::de::Error) -> Self {
        MuralError::ParseError(err.to_string())
    }
}
