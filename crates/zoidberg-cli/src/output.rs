//! Image export.
//!
//! PNG output maps hit heights linearly onto gray levels 16..=255 and leaves
//! misses black. JSON output is an array of rows with `null` for misses.

use anyhow::{bail, Context, Result};
use image::{GrayImage, Luma};
use std::fs;
use std::path::Path;
use zoidberg_raytrace::Image;

/// Darkest gray used for a hit, keeping hits distinct from misses.
const HIT_FLOOR: f64 = 16.0;

/// Write `image` in the format implied by the file extension.
pub fn write(image: &Image, path: &Path) -> Result<()> {
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    match ext.to_lowercase().as_str() {
        "png" => to_gray(image)
            .save(path)
            .with_context(|| format!("failed to write {}", path.display())),
        "json" => fs::write(path, to_json(image)?)
            .with_context(|| format!("failed to write {}", path.display())),
        _ => bail!("Unknown output format: {}", ext),
    }
}

/// Grayscale rendering of the height image.
pub fn to_gray(image: &Image) -> GrayImage {
    let (lo, hi) = image.height_range().unwrap_or((0.0, 0.0));
    let span = hi - lo;
    GrayImage::from_fn(image.width() as u32, image.height() as u32, |x, y| {
        let level = match image.get(x as usize, y as usize) {
            None => 0.0,
            Some(_) if span <= 0.0 => 255.0,
            Some(h) => HIT_FLOOR + (255.0 - HIT_FLOOR) * (h - lo) / span,
        };
        Luma([level.round().clamp(0.0, 255.0) as u8])
    })
}

/// JSON rows with `null` for misses.
pub fn to_json(image: &Image) -> Result<String> {
    let rows: Vec<&[Option<f64>]> = image.rows().collect();
    Ok(serde_json::to_string(&rows)?)
}
