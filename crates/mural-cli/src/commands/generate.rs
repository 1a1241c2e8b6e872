//! Generate command
//!
//! Builds the job queue from an ad-hoc prompt or a JSON manifest, then
//! dispatches it sequentially against the selected provider.

use anyhow::Result;
use mural_core::MuralError;
use mural_gen::job::{self, GenerationDefaults, Seed};
use mural_gen::manifest::PromptManifest;
use mural_gen::provider::ProviderStatus;
use mural_gen::{driver, providers, MuralConfig};
use std::path::Path;

pub struct GenerateArgs {
    pub prompt: Option<String>,
    pub manifest: Option<String>,
    pub width: u32,
    pub height: u32,
    pub negative_prompt: String,
    pub output: String,
    pub steps: u32,
    pub cfg: f32,
    pub seed: i64,
    pub model: String,
    pub provider: Option<String>,
    pub staging_dir: String,
    pub delay_seconds: u64,
}

pub fn run(args: GenerateArgs) -> Result<()> {
    let defaults = GenerationDefaults {
        width: args.width,
        height: args.height,
        negative_prompt: args.negative_prompt.clone(),
        steps: args.steps,
        cfg: args.cfg,
        seed: Seed::from_raw(args.seed),
    };

    let jobs = if let Some(prompt) = &args.prompt {
        vec![job::build_single(prompt, &defaults, Path::new(&args.output))]
    } else if let Some(manifest_path) = &args.manifest {
        let manifest = PromptManifest::load(Path::new(manifest_path))?;
        job::build_batch(&manifest, &defaults, Path::new(&args.staging_dir))
    } else {
        println!("Please provide --prompt or --manifest");
        return Err(MuralError::ConfigError("no input mode selected".to_string()).into());
    };

    let config = MuralConfig::load()?;
    let provider_name = args
        .provider
        .clone()
        .unwrap_or_else(|| config.default_provider().to_string());

    println!("Loading provider '{}' (model: {})...", provider_name, args.model);
    let provider = providers::create_provider(&provider_name, &config, &args.model)?;
    match provider.health_check()? {
        ProviderStatus::Available => {}
        ProviderStatus::NoApiKey => {
            return Err(MuralError::GenerationError(format!(
                "Provider '{}' has no API key configured",
                provider_name
            ))
            .into());
        }
        ProviderStatus::Unavailable(reason) => {
            return Err(MuralError::GenerationError(format!(
                "Provider '{}' unavailable: {}",
                provider_name, reason
            ))
            .into());
        }
    }

    driver::run_queue(provider.as_ref(), &jobs, args.delay_seconds)?;
    Ok(())
}
