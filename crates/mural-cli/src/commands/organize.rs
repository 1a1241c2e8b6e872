//! Organize command
//!
//! Reconciles the fixed project layout: staged files in `backgrounds/`,
//! identifiers from `assets/graphics_batch.json`, canonical store at
//! `assets/textures/`.

use anyhow::Result;
use mural_asset::PrefixMatcher;
use mural_gen::manifest::PromptManifest;
use std::path::Path;

const SOURCE_DIR: &str = "backgrounds";
const MANIFEST_PATH: &str = "assets/graphics_batch.json";
const DEST_DIR: &str = "assets/textures";

pub fn run() -> Result<()> {
    let manifest = PromptManifest::load(Path::new(MANIFEST_PATH))?;
    let ids = manifest.ids();

    mural_asset::reconcile(
        &ids,
        Path::new(SOURCE_DIR),
        Path::new(DEST_DIR),
        &PrefixMatcher,
    )?;

    Ok(())
}
