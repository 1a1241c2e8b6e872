//! Sequential generation driver
//!
//! Consumes a job queue strictly in order, one job at a time. The backend
//! is assumed to hold one exclusive compute device, so the inter-job delay
//! is a rate limit, not a concurrency primitive.

use crate::dims;
use crate::job::JobDescriptor;
use crate::provider::{GenerateRequest, ImageProvider};
use image::DynamicImage;
use mural_core::{ContentHash, MuralError, Result};
use std::path::Path;
use std::time::Duration;

/// Dispatch the queue against the provider, returning the number of
/// completed jobs.
///
/// Per job: dimensions are grid-normalized and validated, a `Random` seed
/// is resolved here (never at build time), the decoded image is persisted
/// to the job's output path, and the configured delay is applied between
/// jobs only. A job failure aborts the whole run.
pub fn run_queue(
    provider: &dyn ImageProvider,
    jobs: &[JobDescriptor],
    delay_secs: u64,
) -> Result<usize> {
    println!("Found {} prompts to process.", jobs.len());

    for (i, job) in jobs.iter().enumerate() {
        println!("\nProcessing {}/{}", i + 1, jobs.len());

        let (width, height) = dims::normalize(job.width, job.height);
        if width == 0 || height == 0 {
            return Err(MuralError::ValidationError(format!(
                "Degenerate dimensions {}x{} for {}",
                width,
                height,
                job.output_path.display()
            )));
        }

        let seed = job.seed.resolve();

        let preview: String = job.prompt.chars().take(50).collect();
        println!("Generating: {}...", preview);
        println!(
            "Size: {}x{}, Seed: {}, Steps: {}, CFG: {}",
            width, height, seed, job.steps, job.cfg
        );

        let request = GenerateRequest {
            prompt: job.prompt.clone(),
            negative_prompt: job.negative_prompt.clone(),
            width,
            height,
            steps: job.steps,
            cfg: job.cfg,
            seed,
        };

        let image = provider.generate(&request)?;
        persist_image(&image, &job.output_path)?;

        match ContentHash::from_file(&job.output_path) {
            Ok(hash) => println!(
                "Saved to {} ({})",
                job.output_path.display(),
                hash.to_prefixed_hex()
            ),
            Err(_) => println!("Saved to {}", job.output_path.display()),
        }

        if i + 1 < jobs.len() && delay_secs > 0 {
            std::thread::sleep(Duration::from_secs(delay_secs));
        }
    }

    Ok(jobs.len())
}

/// Persist a decoded image as PNG through a temp file in the destination
/// directory; the final path only ever holds a complete file.
fn persist_image(image: &DynamicImage, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let tmp = path.with_extension("png.tmp");
    if let Err(e) = image.save_with_format(&tmp, image::ImageFormat::Png) {
        std::fs::remove_file(&tmp).ok();
        return Err(MuralError::GenerationError(format!(
            "Failed to save PNG: {}",
            e
        )));
    }
    if let Err(e) = std::fs::rename(&tmp, path) {
        std::fs::remove_file(&tmp).ok();
        return Err(e.into());
    }

    Ok(())
}
