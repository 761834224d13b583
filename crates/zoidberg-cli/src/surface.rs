//! Heightfield loading.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use zoidberg_raytrace::Heightfield;

/// Parse a JSON array of rows into a heightfield.
pub fn parse(json: &str) -> Result<Heightfield> {
    let rows: Vec<Vec<f64>> = serde_json::from_str(json).context("expected a JSON array of rows")?;
    Ok(Heightfield::from_rows(&rows)?)
}

/// Load a heightfield from a JSON file.
pub fn load(path: &Path) -> Result<Heightfield> {
    let json =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    parse(&json).with_context(|| format!("invalid surface in {}", path.display()))
}
