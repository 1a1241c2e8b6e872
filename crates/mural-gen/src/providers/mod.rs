//! Provider registry
//!
//! Maps provider names to concrete implementations.

pub mod mock;
pub mod zimage;

use crate::config::MuralConfig;
use crate::provider::ImageProvider;
use mural_core::{MuralError, Result};

/// Create a provider by name with configuration and a model identifier
pub fn create_provider(
    name: &str,
    config: &MuralConfig,
    model: &str,
) -> Result<Box<dyn ImageProvider>> {
    match name {
        "mock" => Ok(Box::new(mock::MockProvider::new())),
        "zimage" => Ok(Box::new(zimage::ZImageProvider::from_config(config, model)?)),
        _ => Err(MuralError::GenerationError(format!(
            "Unknown provider '{}'. Available: mock, zimage",
            name
        ))),
    }
}

/// List all available provider names
pub fn available_providers() -> Vec<&'static str> {
    vec!["mock", "zimage"]
}
