//! Dimension normalization
//!
//! Generation backends require dimensions aligned to a 16-pixel grid;
//! requested values are rounded down to the nearest multiple.

/// Grid granularity imposed by the generation backends
pub const DIMENSION_GRID: u32 = 16;

/// Round `width` and `height` down to the nearest multiple of the grid.
///
/// Emits a warning when a value was adjusted. Inputs below the grid size
/// normalize to 0; rejecting those is the driver's job.
pub fn normalize(width: u32, height: u32) -> (u32, u32) {
    let w = (width / DIMENSION_GRID) * DIMENSION_GRID;
    let h = (height / DIMENSION_GRID) * DIMENSION_GRID;

    if w != width || h != height {
        println!(
            "Warning: Adjusted dimensions from {}x{} to {}x{} (must be divisible by {})",
            width, height, w, h, DIMENSION_GRID
        );
    }

    (w, h)
}
