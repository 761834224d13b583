//! Scene configuration: camera placement and render settings.
//!
//! Values come from three layers, highest priority first: command-line
//! flags, an optional TOML scene file, and defaults derived from the surface
//! (camera centered in front of the south edge, looking north and up).

use anyhow::{Context, Result};
use clap::Args;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use zoidberg_math::{Point3, Vec3};
use zoidberg_raytrace::{Camera, Heightfield, RenderSettings};

const DEFAULT_DIRECTION: [f64; 3] = [0.0, 1.0, 0.5];
const DEFAULT_APERTURE: f64 = 1.2;
const DEFAULT_WIDTH: usize = 80;
const DEFAULT_HEIGHT: usize = 120;

/// Camera section of a scene file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CameraConfig {
    /// Eye position.
    pub origin: Option<[f64; 3]>,
    /// Central view direction.
    pub direction: Option<[f64; 3]>,
    /// Field of view in radians.
    pub aperture: Option<f64>,
}

/// A TOML scene file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SceneConfig {
    /// Camera placement.
    pub camera: CameraConfig,
    /// Image size, dispatch and march settings.
    pub render: Option<RenderSettings>,
}

/// Command-line overrides for the scene.
#[derive(Debug, Clone, Default, Args)]
pub struct ViewOverrides {
    /// Camera position as x,y,z
    #[arg(long, value_parser = parse_vec3, allow_hyphen_values = true)]
    pub origin: Option<[f64; 3]>,
    /// View direction as x,y,z
    #[arg(long, value_parser = parse_vec3, allow_hyphen_values = true)]
    pub direction: Option<[f64; 3]>,
    /// Field of view in radians
    #[arg(long)]
    pub aperture: Option<f64>,
    /// Image width in pixels
    #[arg(long)]
    pub width: Option<usize>,
    /// Image height in pixels
    #[arg(long)]
    pub height: Option<usize>,
    /// Trace pixels on a single thread
    #[arg(long)]
    pub sequential: bool,
}

impl SceneConfig {
    /// Parse a scene from TOML text.
    pub fn parse(text: &str) -> Result<Self> {
        toml::from_str(text).context("invalid scene file")
    }

    /// Load a scene file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("in {}", path.display()))
    }

    /// Combine the scene with command-line overrides for `field`.
    pub fn resolve(&self, field: &Heightfield, view: &ViewOverrides) -> (Camera, RenderSettings) {
        let (w, h) = field.footprint();
        let origin = view
            .origin
            .or(self.camera.origin)
            .unwrap_or([w / 2.0, -2.0 * h, 0.0]);
        let direction = view
            .direction
            .or(self.camera.direction)
            .unwrap_or(DEFAULT_DIRECTION);
        let aperture = view
            .aperture
            .or(self.camera.aperture)
            .unwrap_or(DEFAULT_APERTURE);

        let mut settings = self.render.unwrap_or(RenderSettings {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            ..RenderSettings::default()
        });
        if let Some(width) = view.width {
            settings.width = width;
        }
        if let Some(height) = view.height {
            settings.height = height;
        }
        if view.sequential {
            settings.parallel = false;
        }

        let camera = Camera::new(Point3::from(origin), Vec3::from(direction), aperture);
        (camera, settings)
    }
}

/// Parse `x,y,z`.
fn parse_vec3(s: &str) -> Result<[f64; 3], String> {
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    let [x, y, z] = parts.as_slice() else {
        return Err(format!("expected x,y,z but got '{s}'"));
    };
    let num = |v: &str| v.parse::<f64>().map_err(|e| format!("'{v}': {e}"));
    Ok([num(*x)?, num(*y)?, num(*z)?])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_vec3() {
        assert_eq!(parse_vec3("1, -2.5,3"), Ok([1.0, -2.5, 3.0]));
        assert!(parse_vec3("1,2").is_err());
        assert!(parse_vec3("1,2,x").is_err());
    }

    #[test]
    fn test_defaults_follow_surface() {
        let field = Heightfield::paraboloid(100).unwrap();
        let (camera, settings) = SceneConfig::default().resolve(&field, &ViewOverrides::default());
        assert_eq!(camera.origin, Point3::new(50.0, -200.0, 0.0));
        assert_eq!(camera.direction, Vec3::new(0.0, 1.0, 0.5));
        assert_eq!(camera.aperture, 1.2);
        assert_eq!((settings.width, settings.height), (80, 120));
        assert!(settings.parallel);
    }

    #[test]
    fn test_file_then_flags() {
        let scene = SceneConfig::parse(
            r#"
            [camera]
            origin = [1.0, 2.0, 3.0]
            aperture = 0.8

            [render]
            width = 32
            height = 24

            [render.trace]
            min_step = 0.05
            "#,
        )
        .unwrap();
        let field = Heightfield::paraboloid(10).unwrap();

        let (camera, settings) = scene.resolve(&field, &ViewOverrides::default());
        assert_eq!(camera.origin, Point3::new(1.0, 2.0, 3.0));
        assert_eq!(camera.aperture, 0.8);
        assert_eq!((settings.width, settings.height), (32, 24));
        assert_eq!(settings.trace.min_step, 0.05);

        let view = ViewOverrides {
            aperture: Some(0.3),
            width: Some(8),
            sequential: true,
            ..ViewOverrides::default()
        };
        let (camera, settings) = scene.resolve(&field, &view);
        assert_eq!(camera.aperture, 0.3);
        assert_eq!((settings.width, settings.height), (8, 24));
        assert!(!settings.parallel);
    }

    #[test]
    fn test_rejects_unknown_keys() {
        assert!(SceneConfig::parse("[camera]\nzoom = 2.0\n").is_err());
    }
}
