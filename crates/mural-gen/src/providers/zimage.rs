//! Z-Image generation provider
//!
//! Dispatches prompts to a hosted Z-Image diffusion endpoint. Turbo-class
//! models are fast (~10s) so `generate()` blocks synchronously.

use crate::config::MuralConfig;
use crate::provider::{GenerateRequest, ImageProvider, ProviderStatus};
use image::DynamicImage;
use mural_core::{MuralError, Result};
use std::time::Duration;

const DEFAULT_ZIMAGE_URL: &str = "https://queue.fal.run/fal-ai/z-image/turbo";
const REQUEST_TIMEOUT_SECS: u64 = 60;
const MAX_RETRIES: usize = 3;
const RETRY_BASE_DELAY_MS: u64 = 500;

/// Z-Image provider for hosted diffusion inference
#[derive(Debug)]
pub struct ZImageProvider {
    api_key: String,
    api_url: String,
    model: String,
}

impl ZImageProvider {
    /// Create a new ZImageProvider from config
    pub fn from_config(config: &MuralConfig, model: &str) -> Result<Self> {
        let api_key = config
            .api_key("zimage")
            .ok_or_else(|| {
                MuralError::GenerationError(
                    "ZImage API key not configured. Set MURAL_ZIMAGE_API_KEY or add to .mural/config.toml".to_string(),
                )
            })?
            .to_string();

        let api_url = config
            .api_url("zimage")
            .unwrap_or(DEFAULT_ZIMAGE_URL)
            .to_string();

        Ok(Self {
            api_key,
            api_url,
            model: model.to_string(),
        })
    }

    /// Submit a request and wait for the response payload
    fn submit_and_wait(&self, request: &GenerateRequest) -> Result<serde_json::Value> {
        let payload = serde_json::json!({
            "prompt": request.prompt,
            "negative_prompt": request.negative_prompt,
            "image_size": {
                "width": request.width,
                "height": request.height
            },
            "num_inference_steps": request.steps,
            "guidance_scale": request.cfg,
            "seed": request.seed,
            "model": self.model,
            "num_images": 1,
            "enable_safety_checker": false
        });

        self.post_json_with_retry(&payload)
    }

    fn post_json_with_retry(&self, payload: &serde_json::Value) -> Result<serde_json::Value> {
        for attempt in 0..MAX_RETRIES {
            let agent = build_agent();
            let response = agent
                .post(&self.api_url)
                .header("Authorization", &format!("Key {}", self.api_key))
                .header("Content-Type", "application/json")
                .send_json(payload);

            match response {
                Ok(mut ok) => {
                    return ok.body_mut().read_json().map_err(|e| {
                        MuralError::GenerationError(format!(
                            "Failed to parse ZImage response: {}",
                            e
                        ))
                    });
                }
                Err(e) => {
                    if attempt + 1 < MAX_RETRIES && is_retryable_error(&e) {
                        sleep_backoff(attempt);
                        continue;
                    }
                    return Err(MuralError::GenerationError(format!(
                        "ZImage API request failed: {}",
                        e
                    )));
                }
            }
        }

        Err(MuralError::GenerationError(
            "ZImage API request failed after retries".to_string(),
        ))
    }

    fn download_bytes_with_retry(&self, url: &str) -> Result<Vec<u8>> {
        for attempt in 0..MAX_RETRIES {
            let agent = build_agent();
            let response = agent.get(url).call();

            match response {
                Ok(ok) => {
                    let mut reader = ok.into_body().into_reader();
                    let mut bytes = Vec::new();
                    std::io::Read::read_to_end(&mut reader, &mut bytes).map_err(|e| {
                        MuralError::GenerationError(format!("Failed to read image data: {}", e))
                    })?;
                    return Ok(bytes);
                }
                Err(e) => {
                    if attempt + 1 < MAX_RETRIES && is_retryable_error(&e) {
                        sleep_backoff(attempt);
                        continue;
                    }
                    return Err(MuralError::GenerationError(format!(
                        "Failed to download image: {}",
                        e
                    )));
                }
            }
        }

        Err(MuralError::GenerationError(
            "Image download failed after retries".to_string(),
        ))
    }
}

fn build_agent() -> ureq::Agent {
    let config = ureq::Agent::config_builder()
        .timeout_global(Some(Duration::from_secs(REQUEST_TIMEOUT_SECS)))
        .build();
    config.into()
}

fn is_retryable_error(e: &ureq::Error) -> bool {
    match e {
        ureq::Error::Timeout(_)
        | ureq::Error::Io(_)
        | ureq::Error::ConnectionFailed
        | ureq::Error::HostNotFound => true,
        ureq::Error::StatusCode(code) => matches!(code, 429 | 500 | 502 | 503 | 504),
        _ => false,
    }
}

fn sleep_backoff(attempt: usize) {
    let delay_ms = RETRY_BASE_DELAY_MS.saturating_mul(1u64 << attempt);
    std::thread::sleep(Duration::from_millis(delay_ms));
}

impl ImageProvider for ZImageProvider {
    fn name(&self) -> &str {
        "zimage"
    }

    fn health_check(&self) -> Result<ProviderStatus> {
        if self.api_key.is_empty() {
            return Ok(ProviderStatus::NoApiKey);
        }
        Ok(ProviderStatus::Available)
    }

    fn generate(&self, request: &GenerateRequest) -> Result<DynamicImage> {
        let response = self.submit_and_wait(request)?;

        let image_url = response
            .get("images")
            .and_then(|imgs| imgs.as_array())
            .and_then(|arr| arr.first())
            .and_then(|img| img.get("url"))
            .and_then(|u| u.as_str())
            .ok_or_else(|| {
                MuralError::GenerationError(format!(
                    "Unexpected ZImage response format: {}",
                    serde_json::to_string_pretty(&response).unwrap_or_default()
                ))
            })?;

        let bytes = self.download_bytes_with_retry(image_url)?;
        image::load_from_memory(&bytes).map_err(|e| {
            MuralError::GenerationError(format!("Failed to decode image: {}", e))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MuralConfig;
    use std::collections::HashMap;

    fn config_with_key(key: Option<&str>) -> MuralConfig {
        let mut providers = HashMap::new();
        if let Some(key) = key {
            providers.insert(
                "zimage".to_string(),
                crate::config::ProviderConfig {
                    api_key: Some(key.to_string()),
                    api_url: None,
                    enabled: true,
                },
            );
        }
        MuralConfig {
            providers,
            generation: Default::default(),
        }
    }

    #[test]
    fn test_from_config_requires_api_key() {
        let err = ZImageProvider::from_config(&config_with_key(None), "Tongyi-MAI/Z-Image-Turbo")
            .unwrap_err();
        assert!(matches!(err, MuralError::GenerationError(_)));
    }

    #[test]
    fn test_from_config_with_key() {
        let provider =
            ZImageProvider::from_config(&config_with_key(Some("zk-test")), "Tongyi-MAI/Z-Image-Turbo")
                .unwrap();
        assert_eq!(provider.name(), "zimage");
        assert_eq!(provider.api_url, DEFAULT_ZIMAGE_URL);
        assert_eq!(provider.health_check().unwrap(), ProviderStatus::Available);
    }
}
