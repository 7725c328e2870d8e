//! Floating-point orientation and incircle predicates.
//!
//! The incircle test carries a relative tolerance so that cocircular
//! configurations (a square split by either diagonal) are treated as already
//! Delaunay. Without it, rounding noise can make two flips undo each other.

use mesh_types::Point2;

/// Relative threshold applied to the incircle determinant.
pub const INCIRCLE_TOLERANCE: f64 = 1.0e-12;

/// Twice the signed area of `abc`; positive when `abc` is counter-clockwise.
#[inline]
#[must_use]
pub fn orient2d(a: Point2<f64>, b: Point2<f64>, c: Point2<f64>) -> f64 {
    let (acx, acy) = (a.x - c.x, a.y - c.y);
    let (bcx, bcy) = (b.x - c.x, b.y - c.y);
    acx.mul_add(bcy, -(acy * bcx))
}

/// Incircle determinant and its permanent (sum of absolute terms).
///
/// The determinant is positive when `d` lies inside the circle through the
/// counter-clockwise triangle `abc`.
#[must_use]
pub fn incircle(
    a: Point2<f64>,
    b: Point2<f64>,
    c: Point2<f64>,
    d: Point2<f64>,
) -> (f64, f64) {
    let (adx, ady) = (a.x - d.x, a.y - d.y);
    let (bdx, bdy) = (b.x - d.x, b.y - d.y);
    let (cdx, cdy) = (c.x - d.x, c.y - d.y);

    let alift = adx.mul_add(adx, ady * ady);
    let blift = bdx.mul_add(bdx, bdy * bdy);
    let clift = cdx.mul_add(cdx, cdy * cdy);

    let bc = bdx.mul_add(cdy, -(cdx * bdy));
    let ca = cdx.mul_add(ady, -(adx * cdy));
    let ab = adx.mul_add(bdy, -(bdx * ady));

    let det = clift.mul_add(ab, alift.mul_add(bc, blift * ca));

    let permanent = ((bdx * cdy).abs() + (cdx * bdy).abs()) * alift
        + ((cdx * ady).abs() + (adx * cdy).abs()) * blift
        + ((adx * bdy).abs() + (bdx * ady).abs()) * clift;

    (det, permanent)
}

/// Whether `d` lies strictly inside the circumcircle of `abc`, for either winding.
///
/// Degenerate `abc` never contains anything.
#[must_use]
pub fn in_circumcircle(
    a: Point2<f64>,
    b: Point2<f64>,
    c: Point2<f64>,
    d: Point2<f64>,
) -> bool {
    let orientation = orient2d(a, b, c);
    if orientation == 0.0 {
        return false;
    }
    let (det, permanent) = if orientation > 0.0 {
        incircle(a, b, c, d)
    } else {
        incircle(b, a, c, d)
    };
    det > INCIRCLE_TOLERANCE * permanent
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64) -> Point2<f64> {
        Point2::new(x, y)
    }

    #[test]
    fn orientation_sign() {
        assert!(orient2d(p(0.0, 0.0), p(1.0, 0.0), p(0.0, 1.0)) > 0.0);
        assert!(orient2d(p(0.0, 0.0), p(0.0, 1.0), p(1.0, 0.0)) < 0.0);
        assert!(orient2d(p(0.0, 0.0), p(1.0, 1.0), p(2.0, 2.0)).abs() < 1e-15);
    }

    #[test]
    fn point_inside_and_outside() {
        let (a, b, c) = (p(0.0, 0.0), p(2.0, 0.0), p(0.0, 2.0));
        assert!(in_circumcircle(a, b, c, p(1.0, 1.0)));
        assert!(!in_circumcircle(a, b, c, p(3.0, 3.0)));
        // Same answers for the clockwise triangle
        assert!(in_circumcircle(a, c, b, p(1.0, 1.0)));
        assert!(!in_circumcircle(a, c, b, p(3.0, 3.0)));
    }

    #[test]
    fn cocircular_is_not_inside() {
        // Corners of a square all lie on one circle
        let (a, b, c, d) = (p(0.0, 0.0), p(1.0, 0.0), p(1.0, 1.0), p(0.0, 1.0));
        assert!(!in_circumcircle(a, b, c, d));
        assert!(!in_circumcircle(a, c, d, b));
    }

    #[test]
    fn degenerate_triangle_contains_nothing() {
        let (a, b, c) = (p(0.0, 0.0), p(1.0, 0.0), p(2.0, 0.0));
        assert!(!in_circumcircle(a, b, c, p(1.0, 0.1)));
    }
}
