//! Pinhole camera with a sine-warped angular field of view.
//!
//! Pixel rays are the central direction plus an additive `(x, 0, y)`
//! offset, where the offsets are the sines of evenly spaced angles across
//! the aperture. The offset is added to the direction vector, not applied
//! as a rotation.

use rayon::prelude::*;
use std::f64::consts::PI;
use zoidberg_math::{Point3, Vec3};

use crate::error::{Result, TraceError};
use crate::image::Image;
use crate::march::trace_with;
use crate::observe::{LogObserver, NoopObserver};
use crate::{Heightfield, Ray, RenderSettings, TraceSettings};

/// Camera position, central view direction and field of view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    /// Eye position.
    pub origin: Point3,
    /// Central view direction (any non-zero length).
    pub direction: Vec3,
    /// Field of view in radians along the longer image axis.
    pub aperture: f64,
}

impl Camera {
    /// Create a camera.
    pub fn new(origin: Point3, direction: Vec3, aperture: f64) -> Self {
        Self {
            origin,
            direction,
            aperture,
        }
    }

    /// Check the camera describes a usable view.
    pub fn validate(&self) -> Result<()> {
        if !self.origin.coords.iter().all(|c| c.is_finite()) {
            return Err(TraceError::NonFinite("camera origin"));
        }
        if !self.direction.iter().all(|c| c.is_finite()) {
            return Err(TraceError::NonFinite("camera direction"));
        }
        if self.direction.norm_squared() == 0.0 {
            return Err(TraceError::ZeroDirection);
        }
        if !(self.aperture > 0.0 && self.aperture < PI) {
            return Err(TraceError::InvalidSettings(format!(
                "aperture must be in (0, pi) radians, got {}",
                self.aperture
            )));
        }
        Ok(())
    }

    /// Horizontal and vertical apertures for a `width × height` image.
    ///
    /// The longer axis gets the full aperture, the other is scaled by the
    /// aspect ratio.
    pub fn apertures(&self, width: usize, height: usize) -> (f64, f64) {
        let (w, h) = (width as f64, height as f64);
        if width > height {
            (self.aperture, self.aperture * h / w)
        } else {
            (self.aperture * w / h, self.aperture)
        }
    }

    /// Per-column and per-row direction offsets.
    ///
    /// Columns run left to right, rows top to bottom.
    pub fn offsets(&self, width: usize, height: usize) -> (Vec<f64>, Vec<f64>) {
        let (a_h, a_v) = self.apertures(width, height);
        let horizontal = linspace(-a_h / 2.0, a_h / 2.0, width)
            .map(f64::sin)
            .collect();
        let vertical = linspace(a_v / 2.0, -a_v / 2.0, height)
            .map(f64::sin)
            .collect();
        (horizontal, vertical)
    }

    /// One ray per pixel, row-major.
    pub fn rays(&self, width: usize, height: usize) -> Vec<Ray> {
        let (horizontal, vertical) = self.offsets(width, height);
        vertical
            .iter()
            .flat_map(|&y| {
                horizontal
                    .iter()
                    .map(move |&x| Ray::new(self.origin, self.direction + Vec3::new(x, 0.0, y)))
            })
            .collect()
    }
}

/// `n` evenly spaced values from `start` to `stop` inclusive.
fn linspace(start: f64, stop: f64, n: usize) -> impl Iterator<Item = f64> {
    let step = if n > 1 {
        (stop - start) / (n - 1) as f64
    } else {
        0.0
    };
    (0..n).map(move |i| start + step * i as f64)
}

/// Render `field` as seen from `camera`.
///
/// Inputs are validated here; individual rays that miss produce `None`
/// pixels rather than errors.
pub fn render(camera: &Camera, field: &Heightfield, settings: &RenderSettings) -> Result<Image> {
    camera.validate()?;
    settings.validate()?;

    let rays = camera.rays(settings.width, settings.height);
    let trace = &settings.trace;
    let verbose = log::log_enabled!(log::Level::Trace);

    let pixels: Vec<Option<f64>> = if settings.parallel {
        rays.par_iter().map(|ray| trace_pixel(ray, field, trace, verbose)).collect()
    } else {
        rays.iter().map(|ray| trace_pixel(ray, field, trace, verbose)).collect()
    };

    let image = Image::new(settings.width, settings.height, pixels);
    log::debug!(
        "rendered {}x{} view of {}x{} surface: {} hits",
        image.width(),
        image.height(),
        field.width(),
        field.height(),
        image.hit_count()
    );
    Ok(image)
}

/// Render with the camera parameters passed directly.
pub fn render_view(
    origin: Point3,
    direction: Vec3,
    field: &Heightfield,
    aperture: f64,
    width: usize,
    height: usize,
) -> Result<Image> {
    let settings = RenderSettings {
        width,
        height,
        ..RenderSettings::default()
    };
    render(&Camera::new(origin, direction, aperture), field, &settings)
}

fn trace_pixel(
    ray: &Ray,
    field: &Heightfield,
    settings: &TraceSettings,
    verbose: bool,
) -> Option<f64> {
    let hit = if verbose {
        trace_with(ray, field, settings, &mut LogObserver)
    } else {
        trace_with(ray, field, settings, &mut NoopObserver)
    };
    hit.map(|p| p.z)
}
