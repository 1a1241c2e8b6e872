//! Layered configuration system
//!
//! Config is loaded with three layers of precedence (highest wins):
//! 1. Environment variables: `MURAL_{PROVIDER}_API_KEY`
//! 2. Project-local: `.mural/config.toml`
//! 3. Global: `~/.mural/config.toml`

use mural_core::{MuralError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Provider-specific configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProviderConfig {
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub api_url: Option<String>,
    #[serde(default = "default_true")]
    pub enabled: bool,
}

fn default_true() -> bool {
    true
}

/// Generation defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationConfig {
    #[serde(default = "default_provider_name")]
    pub default_provider: String,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            default_provider: default_provider_name(),
        }
    }
}

fn default_provider_name() -> String {
    "zimage".to_string()
}

/// Top-level config file structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MuralConfigFile {
    #[serde(default)]
    pub providers: HashMap<String, ProviderConfig>,
    #[serde(default)]
    pub generation: GenerationConfig,
}

/// Resolved configuration with environment variable overrides applied
#[derive(Debug, Clone, Default)]
pub struct MuralConfig {
    pub providers: HashMap<String, ProviderConfig>,
    pub generation: GenerationConfig,
}

impl MuralConfig {
    /// Load config with layered precedence: global < project < env vars
    pub fn load() -> Result<Self> {
        let mut config = MuralConfigFile::default();

        // Layer 1: Global config (~/.mural/config.toml)
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                let global = Self::load_file(&global_path)?;
                Self::merge_into(&mut config, global);
            }
        }

        // Layer 2: Project-local config (.mural/config.toml)
        let local_path = PathBuf::from(".mural/config.toml");
        if local_path.exists() {
            let local = Self::load_file(&local_path)?;
            Self::merge_into(&mut config, local);
        }

        // Layer 3: Environment variable overrides
        Self::apply_env_overrides(&mut config);

        Ok(MuralConfig {
            providers: config.providers,
            generation: config.generation,
        })
    }

    /// Load config from a specific file path only (for testing)
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let mut config = Self::load_file(path)?;
        Self::apply_env_overrides(&mut config);
        Ok(MuralConfig {
            providers: config.providers,
            generation: config.generation,
        })
    }

    /// Get API key for a provider
    pub fn api_key(&self, provider_name: &str) -> Option<&str> {
        self.providers
            .get(provider_name)
            .and_then(|p| p.api_key.as_deref())
    }

    /// Get API URL for a provider (or its default)
    pub fn api_url(&self, provider_name: &str) -> Option<&str> {
        self.providers
            .get(provider_name)
            .and_then(|p| p.api_url.as_deref())
    }

    /// Check if a provider is enabled
    pub fn is_enabled(&self, provider_name: &str) -> bool {
        self.providers
            .get(provider_name)
            .map(|p| p.enabled)
            .unwrap_or(true)
    }

    /// Get the default provider name
    pub fn default_provider(&self) -> &str {
        &self.generation.default_provider
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".mural").join("config.toml"))
    }

    fn load_file(path: &Path) -> Result<MuralConfigFile> {
        let content = std::fs::read_to_string(path)?;
        let config: MuralConfigFile = toml::from_str(&content).map_err(|e| {
            MuralError::ParseError(format!("Failed to parse config {}: {}", path.display(), e))
        })?;
        Ok(config)
    }

    fn merge_into(base: &mut MuralConfigFile, overlay: MuralConfigFile) {
        for (name, provider) in overlay.providers {
            let entry = base.providers.entry(name).or_default();
            if provider.api_key.is_some() {
                entry.api_key = provider.api_key;
            }
            if provider.api_url.is_some() {
                entry.api_url = provider.api_url;
            }
            entry.enabled = provider.enabled;
        }

        if overlay.generation.default_provider != default_provider_name() {
            base.generation.default_provider = overlay.generation.default_provider;
        }
    }

    fn apply_env_overrides(config: &mut MuralConfigFile) {
        let provider_names = ["zimage"];
        for name in &provider_names {
            let env_key = format!("MURAL_{}_API_KEY", name.to_uppercase());
            if let Ok(key) = std::env::var(&env_key) {
                let entry = config.providers.entry(name.to_string()).or_default();
                entry.api_key = Some(key);
            }
        }
    }
}
