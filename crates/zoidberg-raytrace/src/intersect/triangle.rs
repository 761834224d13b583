//! Semi-line vs triangle in 3D.

use zoidberg_math::{between, solve3, Point3, Tolerance, Vec3};

/// Intersect the semi-line `origin + k * direction` with triangle `(p0, p1, p2)`.
///
/// Solves `-k * direction + l * (p1 - p0) + m * (p2 - p0) = origin - p0`.
/// Returns `k` when `k >= 0` and the barycentric-style coordinates satisfy
/// `l, m, l + m` all in `[0, 1]`. A ray parallel to the triangle's plane
/// returns `None`.
pub fn intersect_triangle_3d(
    origin: &Point3,
    direction: &Vec3,
    p0: &Point3,
    p1: &Point3,
    p2: &Point3,
    tol: &Tolerance,
) -> Option<f64> {
    let (k, l, m) = solve3(&-direction, &(p1 - p0), &(p2 - p0), &(origin - p0), tol)?;
    let in_triangle = between(0.0, l, 1.0) && between(0.0, m, 1.0) && between(0.0, l + m, 1.0);
    (k >= 0.0 && in_triangle).then_some(k)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const TOL: Tolerance = Tolerance::DEFAULT;

    fn vertical_triangle() -> (Point3, Point3, Point3) {
        (
            Point3::new(0.0, 1.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(1.0, 1.0, 1.0),
        )
    }

    #[test]
    fn test_vertical_triangle_hit() {
        let (p0, p1, p2) = vertical_triangle();
        let o = Point3::new(0.5, 0.5, 0.0);
        let d = Vec3::new(0.0, 1.0, 1.0);
        assert_eq!(intersect_triangle_3d(&o, &d, &p0, &p1, &p2, &TOL), Some(0.5));
    }

    #[test]
    fn test_vertical_triangle_outside() {
        // k would be 0.5 but the point lands above the hypotenuse.
        let (p0, p1, p2) = vertical_triangle();
        let o = Point3::new(0.5, 0.5, 0.0);
        let d = Vec3::new(0.0, 1.0, 3.0);
        assert_eq!(intersect_triangle_3d(&o, &d, &p0, &p1, &p2, &TOL), None);
    }

    #[test]
    fn test_behind_origin() {
        let (p0, p1, p2) = vertical_triangle();
        let o = Point3::new(0.5, 0.5, 0.0);
        let d = Vec3::new(0.0, -1.0, -1.0);
        assert_eq!(intersect_triangle_3d(&o, &d, &p0, &p1, &p2, &TOL), None);
    }

    #[test]
    fn test_parallel_to_plane() {
        let (p0, p1, p2) = vertical_triangle();
        let o = Point3::new(0.5, 0.5, 0.0);
        let d = Vec3::new(1.0, 0.0, 0.5);
        assert_eq!(intersect_triangle_3d(&o, &d, &p0, &p1, &p2, &TOL), None);
    }

    #[test]
    fn test_horizontal_triangle_from_above() {
        let p0 = Point3::new(0.0, 0.0, 2.0);
        let p1 = Point3::new(4.0, 0.0, 2.0);
        let p2 = Point3::new(0.0, 4.0, 2.0);
        let o = Point3::new(1.0, 1.0, 10.0);
        let d = Vec3::new(0.0, 0.0, -2.0);
        let k = intersect_triangle_3d(&o, &d, &p0, &p1, &p2, &TOL).unwrap();
        assert_relative_eq!(k, 4.0, epsilon = 1e-12);
    }

    #[test]
    fn test_vertex_and_edge_are_inclusive() {
        let p0 = Point3::new(0.0, 0.0, 0.0);
        let p1 = Point3::new(1.0, 0.0, 0.0);
        let p2 = Point3::new(0.0, 1.0, 0.0);
        let down = Vec3::new(0.0, 0.0, -1.0);
        assert_eq!(
            intersect_triangle_3d(&Point3::new(1.0, 0.0, 1.0), &down, &p0, &p1, &p2, &TOL),
            Some(1.0)
        );
        assert_eq!(
            intersect_triangle_3d(&Point3::new(0.5, 0.5, 1.0), &down, &p0, &p1, &p2, &TOL),
            Some(1.0)
        );
        assert_eq!(
            intersect_triangle_3d(&Point3::new(0.6, 0.6, 1.0), &down, &p0, &p1, &p2, &TOL),
            None
        );
    }

    #[test]
    fn test_origin_on_triangle() {
        let p0 = Point3::new(0.0, 0.0, 0.0);
        let p1 = Point3::new(1.0, 0.0, 0.0);
        let p2 = Point3::new(0.0, 1.0, 0.0);
        let o = Point3::new(0.25, 0.25, 0.0);
        let d = Vec3::new(0.0, 0.0, 1.0);
        assert_eq!(intersect_triangle_3d(&o, &d, &p0, &p1, &p2, &TOL), Some(0.0));
    }
}
