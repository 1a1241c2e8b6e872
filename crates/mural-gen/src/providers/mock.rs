//! Mock provider for testing
//!
//! Produces a deterministic solid-color image from the request without any
//! network calls, so the driver and CLI can be exercised end-to-end.

use crate::provider::{GenerateRequest, ImageProvider, ProviderStatus};
use image::DynamicImage;
use mural_core::{MuralError, Result};

/// A mock provider that renders placeholder images locally
#[derive(Default)]
pub struct MockProvider;

impl MockProvider {
    pub fn new() -> Self {
        Self
    }
}

impl ImageProvider for MockProvider {
    fn name(&self) -> &str {
        "mock"
    }

    fn health_check(&self) -> Result<ProviderStatus> {
        Ok(ProviderStatus::Available)
    }

    fn generate(&self, request: &GenerateRequest) -> Result<DynamicImage> {
        // Fill color derived from the prompt and seed so identical requests
        // render identically and distinct prompts are visually distinct
        let hash_val = request
            .prompt
            .bytes()
            .fold(request.seed, |acc, b| acc.wrapping_mul(31).wrapping_add(b as u32));
        let r = ((hash_val >> 16) & 0xFF) as u8;
        let g = ((hash_val >> 8) & 0xFF) as u8;
        let b = (hash_val & 0xFF) as u8;

        let mut img_data = Vec::with_capacity((request.width * request.height * 4) as usize);
        for _ in 0..(request.width * request.height) {
            img_data.extend_from_slice(&[r, g, b, 255]);
        }

        let img = image::RgbaImage::from_raw(request.width, request.height, img_data)
            .ok_or_else(|| {
                MuralError::GenerationError("Failed to create image buffer".to_string())
            })?;

        Ok(DynamicImage::ImageRgba8(img))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(prompt: &str, seed: u32) -> GenerateRequest {
        GenerateRequest {
            prompt: prompt.to_string(),
            negative_prompt: String::new(),
            width: 64,
            height: 48,
            steps: 9,
            cfg: 0.0,
            seed,
        }
    }

    #[test]
    fn test_mock_provider_health() {
        let provider = MockProvider::new();
        assert_eq!(provider.health_check().unwrap(), ProviderStatus::Available);
    }

    #[test]
    fn test_mock_generate_dimensions() {
        let provider = MockProvider::new();
        let img = provider.generate(&request("red brick wall", 1)).unwrap();
        assert_eq!(img.width(), 64);
        assert_eq!(img.height(), 48);
    }

    #[test]
    fn test_mock_generate_deterministic() {
        let provider = MockProvider::new();
        let a = provider.generate(&request("same", 7)).unwrap();
        let b = provider.generate(&request("same", 7)).unwrap();
        assert_eq!(a.as_bytes(), b.as_bytes());
    }

    #[test]
    fn test_mock_generate_varies_with_seed() {
        let provider = MockProvider::new();
        let a = provider.generate(&request("same", 1)).unwrap();
        let b = provider.generate(&request("same", 2)).unwrap();
        assert_ne!(a.as_bytes(), b.as_bytes());
    }
}
