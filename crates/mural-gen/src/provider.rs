//! Generation provider trait and request types

use image::DynamicImage;
use mural_core::Result;
use serde::{Deserialize, Serialize};

/// A fully resolved request handed to a provider.
///
/// Dimensions are already grid-aligned and the seed is concrete by the time
/// a request reaches a provider; sentinel handling belongs to the driver.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateRequest {
    pub prompt: String,
    pub negative_prompt: String,
    pub width: u32,
    pub height: u32,
    pub steps: u32,
    pub cfg: f32,
    pub seed: u32,
}

/// Status returned by a provider health check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderStatus {
    Available,
    Unavailable(String),
    NoApiKey,
}

/// Trait implemented by each image backend (ZImage, Mock).
///
/// One instance is constructed per run and reused across all jobs; it is
/// expensive to construct and cheap to reuse.
pub trait ImageProvider: Send {
    /// Provider name (e.g. "zimage", "mock")
    fn name(&self) -> &str;

    /// Check if the provider is usable (API key set, service reachable)
    fn health_check(&self) -> Result<ProviderStatus>;

    /// Generate one image synchronously (blocks until complete)
    fn generate(&self, request: &GenerateRequest) -> Result<DynamicImage>;
}
