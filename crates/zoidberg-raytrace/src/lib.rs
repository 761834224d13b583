#![warn(missing_docs)]

//! Heightfield ray tracing for zoidberg.
//!
//! A heightfield is a regular grid of elevation samples. Every unit cell is
//! triangulated into four triangles around its center, and each camera ray
//! is marched across those triangles until it strikes the surface or leaves
//! the grid.
//!
//! # Architecture
//!
//! - [`intersect`] - Semi-line vs segment (2D) and triangle (3D) tests
//! - [`Heightfield`] - The grid and its implicit triangulation
//! - [`entry`] - First crossing into the grid footprint
//! - [`march`] - The triangle-to-triangle ray march
//! - [`camera`] - Per-pixel ray generation and image assembly
//! - [`observe`] - Optional instrumentation hooks for the march
//!
//! # Example
//!
//! ```
//! use zoidberg_raytrace::{render, Camera, Heightfield, RenderSettings};
//! use zoidberg_math::{Point3, Vec3};
//!
//! let field = Heightfield::paraboloid(40).unwrap();
//! let camera = Camera::new(Point3::new(20.0, -80.0, 0.0), Vec3::new(0.0, 1.0, 0.5), 1.2);
//! let settings = RenderSettings { width: 16, height: 24, ..RenderSettings::default() };
//!
//! let image = render(&camera, &field, &settings).unwrap();
//! assert_eq!(image.pixels().len(), 16 * 24);
//! ```

pub mod camera;
pub mod entry;
pub mod error;
mod heightfield;
pub mod image;
pub mod intersect;
pub mod march;
pub mod observe;
mod ray;

pub use camera::{render, render_view, Camera};
pub use error::{Result, TraceError};
pub use heightfield::{enclosing_triangle_vertices, Cell, GridTriangle, Heightfield};
pub use image::Image;
pub use march::{trace, trace_hit, trace_with, MarchState, MarchStep, Marcher};
pub use ray::Ray;

use serde::{Deserialize, Serialize};
use zoidberg_math::Tolerance;

/// Ray march parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TraceSettings {
    /// Numerical thresholds for the intersection tests.
    pub tolerance: Tolerance,
    /// Length of a forced step, in grid units along the projected direction.
    pub min_step: f64,
    /// Iteration cap. `None` derives one from the grid size.
    pub max_steps: Option<usize>,
}

impl Default for TraceSettings {
    fn default() -> Self {
        Self {
            tolerance: Tolerance::DEFAULT,
            min_step: 0.01,
            max_steps: None,
        }
    }
}

impl TraceSettings {
    /// Validate settings.
    pub fn validate(&self) -> Result<()> {
        if !(self.min_step > 0.0 && self.min_step < 1.0) {
            return Err(TraceError::InvalidSettings(
                "min_step must be between 0 and 1 grid unit".into(),
            ));
        }
        if !(self.tolerance.singular >= 0.0 && self.tolerance.singular.is_finite()) {
            return Err(TraceError::InvalidSettings(
                "tolerance.singular must be a finite non-negative value".into(),
            ));
        }
        if !(self.tolerance.advance >= 0.0 && self.tolerance.advance < self.min_step) {
            return Err(TraceError::InvalidSettings(
                "tolerance.advance must be non-negative and below min_step".into(),
            ));
        }
        if self.max_steps == Some(0) {
            return Err(TraceError::InvalidSettings(
                "max_steps must be positive".into(),
            ));
        }
        Ok(())
    }

    /// Iteration cap for marching over `field`.
    ///
    /// A straight line crosses at most `w + h` cells and three triangles per
    /// cell, so the default leaves generous room for forced steps.
    pub fn step_limit(&self, field: &Heightfield) -> usize {
        self.max_steps
            .unwrap_or(16 * (field.width() + field.height()) + 64)
    }
}

/// Image and dispatch parameters for [`render`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    /// Output width in pixels.
    pub width: usize,
    /// Output height in pixels.
    pub height: usize,
    /// Trace pixels on the rayon thread pool.
    pub parallel: bool,
    /// Per-ray march parameters.
    pub trace: TraceSettings,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            width: 160,
            height: 90,
            parallel: true,
            trace: TraceSettings::default(),
        }
    }
}

impl RenderSettings {
    /// Validate settings.
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(TraceError::InvalidSettings(format!(
                "image size must be positive, got {}x{}",
                self.width, self.height
            )));
        }
        self.trace.validate()
    }
}
