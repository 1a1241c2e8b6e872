//! Prompt manifest parsing
//!
//! The manifest is a JSON document enumerating requested assets: either a
//! top-level object exposing an `image_prompts` array, or a bare array of
//! entries. Entry field names follow the wire schema exactly.

use mural_core::{MuralError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One requested asset from the manifest.
///
/// Everything is optional on the wire; per-field overrides fall back to the
/// CLI-level defaults when absent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PromptEntry {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, rename = "Prompt")]
    pub prompt: Option<String>,
    #[serde(default, rename = "NegativePrompt")]
    pub negative_prompt: Option<String>,
    #[serde(default, rename = "Width")]
    pub width: Option<u32>,
    #[serde(default, rename = "Height")]
    pub height: Option<u32>,
    #[serde(default, rename = "Seed")]
    pub seed: Option<i64>,
    #[serde(default, rename = "Steps")]
    pub steps: Option<u32>,
    #[serde(default, rename = "CFG")]
    pub cfg: Option<f32>,
}

impl PromptEntry {
    /// Resolve the prompt text: first non-empty of `Prompt`, `description`,
    /// `title`. `None` means the entry is unusable and must be skipped.
    pub fn prompt_text(&self) -> Option<&str> {
        [
            self.prompt.as_deref(),
            self.description.as_deref(),
            self.title.as_deref(),
        ]
        .into_iter()
        .flatten()
        .find(|s| !s.is_empty())
    }

    /// Label used in diagnostics: the id when present, else the title,
    /// else a placeholder.
    pub fn label(&self) -> &str {
        self.id
            .as_deref()
            .or(self.title.as_deref())
            .unwrap_or("<unnamed>")
    }
}

/// Accepted top-level manifest shapes
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ManifestFile {
    Wrapped {
        #[serde(default)]
        image_prompts: Vec<PromptEntry>,
    },
    Bare(Vec<PromptEntry>),
}

/// A parsed prompt manifest
#[derive(Debug, Clone)]
pub struct PromptManifest {
    pub entries: Vec<PromptEntry>,
}

impl PromptManifest {
    /// Load a manifest from a JSON file.
    ///
    /// A missing file or malformed JSON fails the whole batch; there is no
    /// partial manifest processing.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(MuralError::ManifestError(format!(
                "File not found: {}",
                path.display()
            )));
        }

        let content = std::fs::read_to_string(path)?;
        let file: ManifestFile = serde_json::from_str(&content).map_err(|e| {
            MuralError::ParseError(format!("Failed to parse manifest {}: {}", path.display(), e))
        })?;

        let entries = match file {
            ManifestFile::Wrapped { image_prompts } => image_prompts,
            ManifestFile::Bare(entries) => entries,
        };

        Ok(Self { entries })
    }

    /// Logical identifiers in manifest order, for reconciliation.
    /// Entries without an id carry nothing to reconcile and are omitted.
    pub fn ids(&self) -> Vec<String> {
        self.entries.iter().filter_map(|e| e.id.clone()).collect()
    }
}
