//! Job building
//!
//! Merges CLI-level defaults with per-entry manifest overrides into
//! fully resolved, self-contained job descriptors.

use crate::keyword;
use crate::manifest::PromptManifest;
use rand::Rng;
use std::path::{Path, PathBuf};

/// Negative prompt applied when neither the CLI nor the entry supplies one
pub const DEFAULT_NEGATIVE_PROMPT: &str = "bad hands, blurry, low quality";

/// Seed selection for a generation job.
///
/// `Random` defers resolution to dispatch time, so a queue built once and
/// dispatched repeatedly never reuses a value baked in at build time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Seed {
    Fixed(u32),
    Random,
}

impl Seed {
    /// Map the wire convention onto the tagged form: -1 means random,
    /// anything else is a fixed seed.
    pub fn from_raw(raw: i64) -> Self {
        if raw == -1 {
            Seed::Random
        } else {
            Seed::Fixed(raw as u32)
        }
    }

    /// Resolve to a concrete value, drawing a fresh uniform value in
    /// [0, 2^32) for `Random`. Called by the driver at dispatch time.
    pub fn resolve(self) -> u32 {
        match self {
            Seed::Fixed(value) => value,
            Seed::Random => rand::rng().random::<u32>(),
        }
    }
}

/// CLI-level defaults, merged under per-entry overrides by the builder.
/// Entry overrides always win.
#[derive(Debug, Clone)]
pub struct GenerationDefaults {
    pub width: u32,
    pub height: u32,
    pub negative_prompt: String,
    pub steps: u32,
    pub cfg: f32,
    pub seed: Seed,
}

impl Default for GenerationDefaults {
    fn default() -> Self {
        Self {
            width: 1024,
            height: 1024,
            negative_prompt: DEFAULT_NEGATIVE_PROMPT.to_string(),
            steps: 9,
            cfg: 0.0,
            seed: Seed::Random,
        }
    }
}

/// One fully resolved unit of generation work.
///
/// Immutable once enqueued; consumed exactly once by the driver. Width and
/// height are the requested values; grid normalization happens at dispatch.
#[derive(Debug, Clone)]
pub struct JobDescriptor {
    pub prompt: String,
    pub negative_prompt: String,
    pub width: u32,
    pub height: u32,
    pub steps: u32,
    pub cfg: f32,
    pub seed: Seed,
    pub output_path: PathBuf,
}

/// Build the single-job queue for an ad-hoc prompt.
/// The caller's output path is used verbatim.
pub fn build_single(
    prompt: &str,
    defaults: &GenerationDefaults,
    output_path: &Path,
) -> JobDescriptor {
    JobDescriptor {
        prompt: prompt.to_string(),
        negative_prompt: defaults.negative_prompt.clone(),
        width: defaults.width,
        height: defaults.height,
        steps: defaults.steps,
        cfg: defaults.cfg,
        seed: defaults.seed,
        output_path: output_path.to_path_buf(),
    }
}

/// Build the job queue for a manifest.
///
/// Entries without usable prompt text are skipped with a warning; the batch
/// continues. Staged filenames are
/// `{id_}{keyword}_{w}x{h}_{timestamp}.png` under `staging_dir`, with a
/// minute-granularity timestamp taken once per entry at build time.
pub fn build_batch(
    manifest: &PromptManifest,
    defaults: &GenerationDefaults,
    staging_dir: &Path,
) -> Vec<JobDescriptor> {
    let mut jobs = Vec::new();

    for entry in &manifest.entries {
        let Some(prompt) = entry.prompt_text() else {
            println!(
                "Warning: Skipping entry '{}': no usable prompt text",
                entry.label()
            );
            continue;
        };

        let width = entry.width.unwrap_or(defaults.width);
        let height = entry.height.unwrap_or(defaults.height);

        let keyword = keyword::synthesize(entry);
        let id_prefix = entry
            .id
            .as_deref()
            .filter(|id| !id.is_empty())
            .map(|id| format!("{}_", id))
            .unwrap_or_default();
        let filename = format!(
            "{}{}_{}x{}_{}.png",
            id_prefix,
            keyword,
            width,
            height,
            compact_timestamp()
        );

        jobs.push(JobDescriptor {
            prompt: prompt.to_string(),
            negative_prompt: entry
                .negative_prompt
                .clone()
                .unwrap_or_else(|| defaults.negative_prompt.clone()),
            width,
            height,
            steps: entry.steps.unwrap_or(defaults.steps),
            cfg: entry.cfg.unwrap_or(defaults.cfg),
            seed: entry.seed.map(Seed::from_raw).unwrap_or(defaults.seed),
            output_path: staging_dir.join(filename),
        });
    }

    jobs
}

/// Compact UTC timestamp (`YYYYmmdd-HHMM`) for staged filenames.
/// Minute granularity; collisions across entries built in the same tick
/// are an accepted limitation.
fn compact_timestamp() -> String {
    let dur = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default();
    let secs = dur.as_secs();
    let days = secs / 86400;
    let time_secs = secs % 86400;
    let hours = time_secs / 3600;
    let mins = (time_secs % 3600) / 60;

    let mut y = 1970i64;
    let mut remaining_days = days as i64;
    loop {
        let days_in_year = if y % 4 == 0 && (y % 100 != 0 || y % 400 == 0) {
            366
        } else {
            365
        };
        if remaining_days < days_in_year {
            break;
        }
        remaining_days -= days_in_year;
        y += 1;
    }
    let leap = y % 4 == 0 && (y % 100 != 0 || y % 400 == 0);
    let month_days = [
        31,
        if leap { 29 } else { 28 },
        31,
        30,
        31,
        30,
        31,
        31,
        30,
        31,
        30,
        31,
    ];
    let mut m = 0usize;
    for (i, &md) in month_days.iter().enumerate() {
        if remaining_days < md as i64 {
            m = i;
            break;
        }
        remaining_days -= md as i64;
    }

    format!(
        "{:04}{:02}{:02}-{:02}{:02}",
        y,
        m + 1,
        remaining_days + 1,
        hours,
        mins
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifest::PromptEntry;

    fn manifest_of(entries: Vec<PromptEntry>) -> PromptManifest {
        PromptManifest { entries }
    }

    #[test]
    fn test_seed_from_raw() {
        assert_eq!(Seed::from_raw(-1), Seed::Random);
        assert_eq!(Seed::from_raw(0), Seed::Fixed(0));
        assert_eq!(Seed::from_raw(42), Seed::Fixed(42));
    }

    #[test]
    fn test_fixed_seed_passes_through() {
        assert_eq!(Seed::Fixed(7).resolve(), 7);
        assert_eq!(Seed::Fixed(u32::MAX).resolve(), u32::MAX);
    }

    #[test]
    fn test_random_seed_resolves_fresh() {
        // Resolution draws a u32, so the [0, 2^32) invariant holds by type;
        // check that repeated draws are not stuck on one value.
        let draws: std::collections::HashSet<u32> =
            (0..8).map(|_| Seed::Random.resolve()).collect();
        assert!(draws.len() > 1);
    }

    #[test]
    fn test_build_single_uses_path_verbatim() {
        let defaults = GenerationDefaults::default();
        let job = build_single("a quiet alley", &defaults, Path::new("out/alley.png"));
        assert_eq!(job.prompt, "a quiet alley");
        assert_eq!(job.output_path, PathBuf::from("out/alley.png"));
        assert_eq!(job.width, 1024);
        assert_eq!(job.negative_prompt, DEFAULT_NEGATIVE_PROMPT);
    }

    #[test]
    fn test_overrides_win_over_defaults() {
        let defaults = GenerationDefaults::default();
        let manifest = manifest_of(vec![PromptEntry {
            id: Some("plaza".to_string()),
            prompt: Some("sunlit plaza".to_string()),
            negative_prompt: Some("people".to_string()),
            width: Some(512),
            height: Some(768),
            seed: Some(7),
            steps: Some(20),
            cfg: Some(3.5),
            ..Default::default()
        }]);

        let jobs = build_batch(&manifest, &defaults, Path::new("backgrounds"));
        assert_eq!(jobs.len(), 1);
        let job = &jobs[0];
        assert_eq!(job.width, 512);
        assert_eq!(job.height, 768);
        assert_eq!(job.negative_prompt, "people");
        assert_eq!(job.steps, 20);
        assert_eq!(job.cfg, 3.5);
        assert_eq!(job.seed, Seed::Fixed(7));
    }

    #[test]
    fn test_defaults_fill_missing_fields() {
        let defaults = GenerationDefaults {
            width: 640,
            height: 480,
            steps: 12,
            ..Default::default()
        };
        let manifest = manifest_of(vec![PromptEntry {
            prompt: Some("harbor at dusk".to_string()),
            ..Default::default()
        }]);

        let jobs = build_batch(&manifest, &defaults, Path::new("backgrounds"));
        let job = &jobs[0];
        assert_eq!(job.width, 640);
        assert_eq!(job.height, 480);
        assert_eq!(job.steps, 12);
        assert_eq!(job.seed, Seed::Random);
        assert_eq!(job.negative_prompt, DEFAULT_NEGATIVE_PROMPT);
    }

    #[test]
    fn test_entry_without_prompt_text_is_skipped() {
        let defaults = GenerationDefaults::default();
        let manifest = manifest_of(vec![
            PromptEntry::default(),
            PromptEntry {
                prompt: Some("kept".to_string()),
                ..Default::default()
            },
        ]);

        let jobs = build_batch(&manifest, &defaults, Path::new("backgrounds"));
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].prompt, "kept");
    }

    #[test]
    fn test_staged_filename_shape() {
        let defaults = GenerationDefaults::default();
        let manifest = manifest_of(vec![PromptEntry {
            id: Some("tenant_student".to_string()),
            title: Some("Tenant Student".to_string()),
            width: Some(512),
            height: Some(512),
            ..Default::default()
        }]);

        let jobs = build_batch(&manifest, &defaults, Path::new("backgrounds"));
        let name = jobs[0].output_path.file_name().unwrap().to_str().unwrap();
        assert!(name.starts_with("tenant_student_tenant_student_512x512_"));
        assert!(name.ends_with(".png"));
        assert_eq!(jobs[0].output_path.parent(), Some(Path::new("backgrounds")));
    }

    #[test]
    fn test_filename_without_id_has_no_prefix() {
        let defaults = GenerationDefaults::default();
        let manifest = manifest_of(vec![PromptEntry {
            tags: vec!["Hero".to_string(), "City".to_string()],
            prompt: Some("hero shot".to_string()),
            ..Default::default()
        }]);

        let jobs = build_batch(&manifest, &defaults, Path::new("backgrounds"));
        let name = jobs[0].output_path.file_name().unwrap().to_str().unwrap();
        assert!(name.starts_with("hero_city_1024x1024_"));
    }

    #[test]
    fn test_compact_timestamp_shape() {
        let ts = compact_timestamp();
        assert_eq!(ts.len(), 13); // YYYYmmdd-HHMM
        assert_eq!(ts.as_bytes()[8], b'-');
        assert!(ts.chars().filter(|c| *c != '-').all(|c| c.is_ascii_digit()));
    }
}
