//! Ray representation.

use zoidberg_math::{Point2, Point3, Vec2, Vec3};

/// A semi-line in 3D space defined by origin and direction.
///
/// The direction is kept as given. Every ray parameter `k` in this crate is
/// a multiple of this vector, so scaling the direction rescales `k` without
/// changing which of two hits comes first.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    /// Origin point of the ray.
    pub origin: Point3,
    /// Direction of the ray (not normalized).
    pub direction: Vec3,
}

impl Ray {
    /// Create a new ray from origin and direction.
    pub fn new(origin: Point3, direction: Vec3) -> Self {
        Self { origin, direction }
    }

    /// Evaluate the ray at parameter `k`: `origin + k * direction`.
    #[inline]
    pub fn at(&self, k: f64) -> Point3 {
        self.origin + k * self.direction
    }

    /// Origin projected onto the grid plane.
    #[inline]
    pub fn origin_2d(&self) -> Point2 {
        self.origin.xy()
    }

    /// Direction projected onto the grid plane.
    #[inline]
    pub fn direction_2d(&self) -> Vec2 {
        self.direction.xy()
    }
}
