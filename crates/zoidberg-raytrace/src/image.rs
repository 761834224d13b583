//! Rendered image of per-pixel surface heights.

use serde::{Deserialize, Serialize};

/// Row-major grid of per-pixel results.
///
/// A pixel holds the height of the first surface hit, or `None` when its
/// ray missed the surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Image {
    width: usize,
    height: usize,
    pixels: Vec<Option<f64>>,
}

impl Image {
    /// Wrap row-major pixels.
    ///
    /// # Panics
    ///
    /// Panics if `pixels.len() != width * height`.
    pub fn new(width: usize, height: usize, pixels: Vec<Option<f64>>) -> Self {
        assert_eq!(pixels.len(), width * height, "pixel count does not match image size");
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// All pixels, row-major.
    pub fn pixels(&self) -> &[Option<f64>] {
        &self.pixels
    }

    /// Pixel at column `x`, row `y` (row 0 is the top of the view).
    pub fn get(&self, x: usize, y: usize) -> Option<f64> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels[y * self.width + x]
    }

    /// Iterate over rows from top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Option<f64>]> {
        self.pixels.chunks(self.width)
    }

    /// Number of pixels whose ray hit the surface.
    pub fn hit_count(&self) -> usize {
        self.pixels.iter().filter(|p| p.is_some()).count()
    }

    /// Lowest and highest hit height, or `None` if nothing was hit.
    pub fn height_range(&self) -> Option<(f64, f64)> {
        self.pixels.iter().flatten().fold(None, |acc, &h| match acc {
            None => Some((h, h)),
            Some((lo, hi)) => Some((lo.min(h), hi.max(h))),
        })
    }

    /// Rows with misses encoded as NaN.
    pub fn to_nan_rows(&self) -> Vec<Vec<f64>> {
        self.rows()
            .map(|row| row.iter().map(|p| p.unwrap_or(f64::NAN)).collect())
            .collect()
    }
}
