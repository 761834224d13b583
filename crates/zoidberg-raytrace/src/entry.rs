//! Where a ray first crosses into the rectangular footprint of the grid.

use zoidberg_math::{Point2, Point3, Tolerance};

use crate::intersect::intersect_segment_2d;
use crate::Ray;

/// Ray parameter of the first crossing into `[0, extent.0] × [0, extent.1]`.
///
/// The four sides are tested in the order south, west, north, east and the
/// smallest parameter wins. A ray whose origin already lies inside the closed
/// rectangle enters at `k = 0`. Returns `None` if the ray's projection never
/// reaches the rectangle.
pub fn entry_parameter(ray: &Ray, extent: (f64, f64), tol: &Tolerance) -> Option<f64> {
    let (w, h) = extent;
    let o = ray.origin_2d();
    if (0.0..=w).contains(&o.x) && (0.0..=h).contains(&o.y) {
        return Some(0.0);
    }

    let d = ray.direction_2d();
    let p00 = Point2::new(0.0, 0.0);
    let p01 = Point2::new(0.0, h);
    let p10 = Point2::new(w, 0.0);
    let p11 = Point2::new(w, h);
    let sides = [(p00, p10), (p00, p01), (p01, p11), (p10, p11)];

    sides
        .iter()
        .filter_map(|(a, b)| intersect_segment_2d(&o, &d, a, b, tol))
        .min_by(f64::total_cmp)
}

/// 3D point where the ray first enters the rectangle, see [`entry_parameter`].
pub fn first_entry_point(ray: &Ray, extent: (f64, f64), tol: &Tolerance) -> Option<Point3> {
    entry_parameter(ray, extent, tol).map(|k| ray.at(k))
}
