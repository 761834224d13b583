//! Semi-line vs line segment in the grid plane.

use zoidberg_math::{between, solve2, Point2, Tolerance, Vec2};

/// Intersect the semi-line `origin + k * direction` with the segment `[p0, p1]`.
///
/// Solves `k * direction + l * (p0 - p1) = p0 - origin`. Returns `k` when
/// `k >= 0` and `0 <= l <= 1`, both bounds inclusive. Parallel and collinear
/// configurations have no unique solution and return `None`.
pub fn intersect_segment_2d(
    origin: &Point2,
    direction: &Vec2,
    p0: &Point2,
    p1: &Point2,
    tol: &Tolerance,
) -> Option<f64> {
    let (k, l) = solve2(direction, &(p0 - p1), &(p0 - origin), tol)?;
    (k >= 0.0 && between(0.0, l, 1.0)).then_some(k)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: Tolerance = Tolerance::DEFAULT;

    fn up() -> Vec2 {
        Vec2::new(0.0, 1.0)
    }

    fn right() -> Vec2 {
        Vec2::new(1.0, 0.0)
    }

    #[test]
    fn test_horizontal_segment() {
        let origin = Point2::origin();
        let p0 = Point2::new(-1.0, 1.0);
        let p1 = p0 + 2.0 * right();

        // Perpendicular
        assert_eq!(intersect_segment_2d(&origin, &up(), &p0, &p1, &TOL), Some(1.0));
        // Same, origin one unit lower
        assert_eq!(
            intersect_segment_2d(&(origin - up()), &up(), &p0, &p1, &TOL),
            Some(2.0)
        );
        // Reaches the right-hand end point
        assert_eq!(
            intersect_segment_2d(&origin, &(up() + right()), &p0, &p1, &TOL),
            Some(1.0)
        );
        // Pointing away
        assert_eq!(intersect_segment_2d(&origin, &-up(), &p0, &p1, &TOL), None);
        // Parallel
        assert_eq!(intersect_segment_2d(&origin, &right(), &p0, &p1, &TOL), None);
        // Passes to the right of the segment
        assert_eq!(
            intersect_segment_2d(&origin, &(up() + 2.0 * right()), &p0, &p1, &TOL),
            None
        );
    }

    #[test]
    fn test_vertical_segment() {
        let origin = Point2::origin();
        let p0 = Point2::new(1.0, 1.0);
        let p1 = p0 - 2.0 * up();

        assert_eq!(intersect_segment_2d(&origin, &right(), &p0, &p1, &TOL), Some(1.0));
        // Upper end point
        assert_eq!(
            intersect_segment_2d(&origin, &(up() + right()), &p0, &p1, &TOL),
            Some(1.0)
        );
        assert_eq!(intersect_segment_2d(&origin, &up(), &p0, &p1, &TOL), None);
        // Passes above
        assert_eq!(
            intersect_segment_2d(&origin, &(2.0 * up() + right()), &p0, &p1, &TOL),
            None
        );
    }

    #[test]
    fn test_diagonal_segment() {
        let origin = Point2::origin();
        let p0 = Point2::new(0.0, 2.0);
        let p1 = p0 - 2.0 * up() + 2.0 * right();

        assert_eq!(
            intersect_segment_2d(&origin, &(up() + right()), &p0, &p1, &TOL),
            Some(1.0)
        );
        // Upper-left end point
        assert_eq!(intersect_segment_2d(&origin, &up(), &p0, &p1, &TOL), Some(2.0));
        // Lower-right end point
        assert_eq!(intersect_segment_2d(&origin, &right(), &p0, &p1, &TOL), Some(2.0));
        // Parallel
        assert_eq!(
            intersect_segment_2d(&origin, &(up() - right()), &p0, &p1, &TOL),
            None
        );
        // Passes left of the segment
        assert_eq!(
            intersect_segment_2d(&origin, &(2.0 * up() - right()), &p0, &p1, &TOL),
            None
        );
        // Passes below
        assert_eq!(
            intersect_segment_2d(&origin, &(2.0 * right() - up()), &p0, &p1, &TOL),
            None
        );
    }

    #[test]
    fn test_perpendicular_distance() {
        // Segment on the x axis, origin straight below at distance d.
        let p0 = Point2::new(-3.0, 0.0);
        let p1 = Point2::new(5.0, 0.0);
        for d in [0.5, 1.0, 2.0, 7.0, 64.0] {
            let origin = Point2::new(1.0, -d);
            assert_eq!(intersect_segment_2d(&origin, &up(), &p0, &p1, &TOL), Some(d));
        }
    }

    #[test]
    fn test_origin_on_segment() {
        let p0 = Point2::new(-1.0, 0.0);
        let p1 = Point2::new(1.0, 0.0);
        assert_eq!(
            intersect_segment_2d(&Point2::origin(), &up(), &p0, &p1, &TOL),
            Some(0.0)
        );
    }

    #[test]
    fn test_collinear_is_miss() {
        let p0 = Point2::new(1.0, 0.0);
        let p1 = Point2::new(2.0, 0.0);
        assert_eq!(
            intersect_segment_2d(&Point2::origin(), &right(), &p0, &p1, &TOL),
            None
        );
    }

    #[test]
    fn test_zero_direction_is_miss() {
        let p0 = Point2::new(-1.0, 1.0);
        let p1 = Point2::new(1.0, 1.0);
        assert_eq!(
            intersect_segment_2d(&Point2::origin(), &Vec2::zeros(), &p0, &p1, &TOL),
            None
        );
    }
}
