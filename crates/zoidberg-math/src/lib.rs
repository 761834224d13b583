#![warn(missing_docs)]

//! Math types for the zoidberg heightfield renderer.
//!
//! Thin wrappers around nalgebra providing the point and vector types used
//! by the tracer, tolerance constants, and closed-form 2×2 / 3×3 solvers.

use nalgebra::{Vector2, Vector3};
use serde::{Deserialize, Serialize};

mod solve;

pub use solve::{solve2, solve3};

/// A point in 3D space.
pub type Point3 = nalgebra::Point3<f64>;

/// A vector in 3D space.
pub type Vec3 = Vector3<f64>;

/// A point in the 2D grid plane.
pub type Point2 = nalgebra::Point2<f64>;

/// A vector in 2D space.
pub type Vec2 = Vector2<f64>;

/// Inclusive range check `lo <= x <= hi`.
///
/// NaN is never in range.
#[inline]
pub fn between(lo: f64, x: f64, hi: f64) -> bool {
    lo <= x && x <= hi
}

/// Numerical thresholds used by the intersection tests and the ray march.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tolerance {
    /// Relative determinant threshold.
    ///
    /// A system is singular when `|det|` does not exceed this value times
    /// the product of the column norms, so the test measures the angle
    /// between columns and not their length.
    pub singular: f64,
    /// Smallest edge-crossing parameter the march accepts as progress.
    pub advance: f64,
}

impl Tolerance {
    /// Default thresholds (`1e-12` relative determinant, `1e-10` advance).
    pub const DEFAULT: Self = Self {
        singular: 1e-12,
        advance: 1e-10,
    };

    /// Check whether a determinant is singular given its column scale.
    #[inline]
    pub fn is_singular(&self, det: f64, scale: f64) -> bool {
        // Written as a negated comparison so NaN determinants count as singular.
        !(det.abs() > self.singular * scale)
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self::DEFAULT
    }
}
