//! Closed-form Cramer's-rule solvers for column systems.

use crate::{Tolerance, Vec2, Vec3};

/// Solve `x * a0 + y * a1 = b` for `(x, y)`.
///
/// Returns `None` when the columns are parallel (or one of them vanishes)
/// according to `tol`.
#[inline]
pub fn solve2(a0: &Vec2, a1: &Vec2, b: &Vec2, tol: &Tolerance) -> Option<(f64, f64)> {
    let det = a0.x * a1.y - a0.y * a1.x;
    if tol.is_singular(det, a0.norm() * a1.norm()) {
        return None;
    }

    let x = (b.x * a1.y - b.y * a1.x) / det;
    let y = (a0.x * b.y - a0.y * b.x) / det;
    Some((x, y))
}

/// Solve `x * a0 + y * a1 + z * a2 = b` for `(x, y, z)`.
///
/// Returns `None` when the three columns are coplanar according to `tol`.
#[inline]
pub fn solve3(
    a0: &Vec3,
    a1: &Vec3,
    a2: &Vec3,
    b: &Vec3,
    tol: &Tolerance,
) -> Option<(f64, f64, f64)> {
    let a1_x_a2 = a1.cross(a2);
    let det = a0.dot(&a1_x_a2);
    if tol.is_singular(det, a0.norm() * a1.norm() * a2.norm()) {
        return None;
    }

    let x = b.dot(&a1_x_a2) / det;
    let y = a0.dot(&b.cross(a2)) / det;
    let z = a0.dot(&a1.cross(b)) / det;
    Some((x, y, z))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_solve2_identity() {
        let tol = Tolerance::DEFAULT;
        let (x, y) = solve2(&Vec2::x(), &Vec2::y(), &Vec2::new(3.0, -4.0), &tol).unwrap();
        assert_eq!(x, 3.0);
        assert_eq!(y, -4.0);
    }

    #[test]
    fn test_solve2_general() {
        let tol = Tolerance::DEFAULT;
        let a0 = Vec2::new(2.0, 1.0);
        let a1 = Vec2::new(-1.0, 3.0);
        let b = 1.5 * a0 - 0.25 * a1;
        let (x, y) = solve2(&a0, &a1, &b, &tol).unwrap();
        assert_relative_eq!(x, 1.5, epsilon = 1e-12);
        assert_relative_eq!(y, -0.25, epsilon = 1e-12);
    }

    #[test]
    fn test_solve2_parallel() {
        let tol = Tolerance::DEFAULT;
        let a0 = Vec2::new(1.0, 2.0);
        assert!(solve2(&a0, &(a0 * -3.0), &Vec2::new(1.0, 0.0), &tol).is_none());
        assert!(solve2(&a0, &Vec2::zeros(), &Vec2::new(1.0, 0.0), &tol).is_none());
    }

    #[test]
    fn test_solve3_general() {
        let tol = Tolerance::DEFAULT;
        let a0 = Vec3::new(1.0, 0.5, -2.0);
        let a1 = Vec3::new(0.0, 2.0, 1.0);
        let a2 = Vec3::new(-1.0, 1.0, 1.0);
        let b = 0.5 * a0 + 2.0 * a1 - 1.0 * a2;
        let (x, y, z) = solve3(&a0, &a1, &a2, &b, &tol).unwrap();
        assert_relative_eq!(x, 0.5, epsilon = 1e-12);
        assert_relative_eq!(y, 2.0, epsilon = 1e-12);
        assert_relative_eq!(z, -1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_solve3_coplanar() {
        let tol = Tolerance::DEFAULT;
        let a0 = Vec3::new(1.0, 0.0, 0.0);
        let a1 = Vec3::new(0.0, 1.0, 0.0);
        let a2 = Vec3::new(1.0, 1.0, 0.0);
        assert!(solve3(&a0, &a1, &a2, &Vec3::new(0.0, 0.0, 1.0), &tol).is_none());
    }
}
