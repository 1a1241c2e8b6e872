//! Mural CLI - batch image generation and canonical asset reconciliation

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{generate, organize};

#[derive(Parser)]
#[command(name = "mural")]
#[command(about = "Batch image generation and canonical asset reconciliation", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate images from an ad-hoc prompt or a JSON manifest
    Generate {
        /// Single prompt to generate
        #[arg(long, conflicts_with = "manifest")]
        prompt: Option<String>,

        /// Path to a JSON manifest of prompts
        #[arg(long)]
        manifest: Option<String>,

        /// Image width
        #[arg(long, default_value_t = 1024)]
        width: u32,

        /// Image height
        #[arg(long, default_value_t = 1024)]
        height: u32,

        /// Negative prompt
        #[arg(long, default_value = mural_gen::DEFAULT_NEGATIVE_PROMPT)]
        negative_prompt: String,

        /// Output path for a single ad-hoc generation
        #[arg(long, default_value = "generated_image.png")]
        output: String,

        /// Inference steps
        #[arg(long, default_value_t = 9)]
        steps: u32,

        /// Guidance scale
        #[arg(long, default_value_t = 0.0)]
        cfg: f32,

        /// Random seed (-1 for random)
        #[arg(long, default_value_t = -1, allow_negative_numbers = true)]
        seed: i64,

        /// Model identifier passed to the provider
        #[arg(long, default_value = "Tongyi-MAI/Z-Image-Turbo")]
        model: String,

        /// Provider to use (zimage, mock); defaults from config
        #[arg(long)]
        provider: Option<String>,

        /// Staging directory for batch output
        #[arg(long, default_value = "backgrounds")]
        staging_dir: String,

        /// Delay between generations in seconds
        #[arg(long, default_value_t = 0)]
        delay_seconds: u64,
    },

    /// Promote staged files into the canonical asset store
    Organize,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            prompt,
            manifest,
            width,
            height,
            negative_prompt,
            output,
            steps,
            cfg,
            seed,
            model,
            provider,
            staging_dir,
            delay_seconds,
        } => generate::run(generate::GenerateArgs {
            prompt,
            manifest,
            width,
            height,
            negative_prompt,
            output,
            steps,
            cfg,
            seed,
            model,
            provider,
            staging_dir,
            delay_seconds,
        }),
        Commands::Organize => organize::run(),
    }
}
