//! Copy-based promotion into the canonical asset store
//!
//! For each logical identifier, a staged file is selected by the match
//! strategy and copied to `{dest_dir}/{id}.png`. The staged file survives,
//! so re-running against unchanged inputs is idempotent.

use crate::matcher::MatchStrategy;
use mural_core::Result;
use std::path::Path;

/// Outcome of a reconciliation pass
#[derive(Debug)]
pub struct ReconcileReport {
    /// Canonical assets placed (created or overwritten)
    pub placed: usize,
    /// Identifiers with no staged candidate, in manifest order
    pub unmatched: Vec<String>,
}

/// Reconcile manifest identifiers against a staging directory.
///
/// `dest_dir` is created if absent. The staging directory is listed once;
/// identifiers are processed in manifest order. An identifier with no
/// candidate is reported and skipped; the pass continues.
pub fn reconcile(
    ids: &[String],
    source_dir: &Path,
    dest_dir: &Path,
    strategy: &dyn MatchStrategy,
) -> Result<ReconcileReport> {
    if !dest_dir.exists() {
        std::fs::create_dir_all(dest_dir)?;
        println!("Created directory: {}", dest_dir.display());
    }

    let files = list_staged(source_dir)?;
    println!("Found {} files in source directory.", files.len());

    let mut placed = 0;
    let mut unmatched = Vec::new();

    for id in ids {
        let Some(candidate) = strategy.select(id, &files) else {
            println!("WARNING: No file found for ID: {}", id);
            unmatched.push(id.clone());
            continue;
        };

        let dest_filename = format!("{}.png", id);
        promote(&source_dir.join(candidate), &dest_dir.join(&dest_filename))?;
        println!("Copied: {} -> {}", candidate, dest_filename);
        placed += 1;
    }

    println!("Successfully organized {} assets.", placed);
    Ok(ReconcileReport { placed, unmatched })
}

/// List staged filenames in directory order. Only the filename text is
/// trusted; no metadata is read.
fn list_staged(dir: &Path) -> Result<Vec<String>> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        if entry.file_type()?.is_file() {
            files.push(entry.file_name().to_string_lossy().into_owned());
        }
    }
    Ok(files)
}

/// Copy through a temp file in the destination directory, then rename over
/// the canonical path; an existing canonical file is overwritten.
fn promote(src: &Path, dest: &Path) -> Result<()> {
    let tmp = dest.with_extension("png.tmp");
    if let Err(e) = std::fs::copy(src, &tmp) {
        std::fs::remove_file(&tmp).ok();
        return Err(e.into());
    }
    if let Err(e) = std::fs::rename(&tmp, dest) {
        std::fs::remove_file(&tmp).ok();
        return Err(e.into());
    }
    Ok(())
}
