//! Triangle type for planar geometric calculations.

use nalgebra::Point2;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Winding of a triangle, taken from the sign of its signed area.
///
/// A zero signed area is its own class: a cell that collapses to a segment has
/// neither winding, and relaxation treats that as a change of orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Orientation {
    /// Positive signed area.
    CounterClockwise,
    /// Negative signed area.
    Clockwise,
    /// Exactly zero signed area.
    Degenerate,
}

impl Orientation {
    /// Classify a signed area.
    ///
    /// NaN areas classify as [`Orientation::Degenerate`].
    ///
    /// # Example
    ///
    /// ```
    /// use mesh_types::Orientation;
    ///
    /// assert_eq!(Orientation::of_signed_area(0.5), Orientation::CounterClockwise);
    /// assert_eq!(Orientation::of_signed_area(-2.0), Orientation::Clockwise);
    /// assert_eq!(Orientation::of_signed_area(0.0), Orientation::Degenerate);
    /// ```
    #[inline]
    #[must_use]
    pub fn of_signed_area(area: f64) -> Self {
        if area > 0.0 {
            Self::CounterClockwise
        } else if area < 0.0 {
            Self::Clockwise
        } else {
            Self::Degenerate
        }
    }
}

/// A triangle with concrete planar vertex positions.
///
/// This is a utility type for geometric calculations. It stores the actual
/// vertex positions rather than indices.
///
/// # Example
///
/// ```
/// use mesh_types::{Triangle2, Point2};
///
/// let tri = Triangle2::new(
///     Point2::new(0.0, 0.0),
///     Point2::new(1.0, 0.0),
///     Point2::new(0.0, 1.0),
/// );
///
/// // Area of a right triangle with legs 1 and 1
/// assert!((tri.area() - 0.5).abs() < 1e-10);
/// assert!(tri.signed_area() > 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Triangle2 {
    /// First vertex.
    pub v0: Point2<f64>,
    /// Second vertex.
    pub v1: Point2<f64>,
    /// Third vertex.
    pub v2: Point2<f64>,
}

impl Triangle2 {
    /// Create a new triangle from three points.
    #[inline]
    #[must_use]
    pub const fn new(v0: Point2<f64>, v1: Point2<f64>, v2: Point2<f64>) -> Self {
        Self { v0, v1, v2 }
    }

    /// Create a triangle from coordinate arrays.
    ///
    /// # Example
    ///
    /// ```
    /// use mesh_types::Triangle2;
    ///
    /// let tri = Triangle2::from_arrays([0.0, 0.0], [1.0, 0.0], [0.0, 1.0]);
    /// assert!((tri.area() - 0.5).abs() < 1e-12);
    /// ```
    #[inline]
    #[must_use]
    #[allow(clippy::missing_const_for_fn)] // Point2::new is not const in nalgebra
    pub fn from_arrays(v0: [f64; 2], v1: [f64; 2], v2: [f64; 2]) -> Self {
        Self {
            v0: Point2::new(v0[0], v0[1]),
            v1: Point2::new(v1[0], v1[1]),
            v2: Point2::new(v2[0], v2[1]),
        }
    }

    /// Twice the signed area: the 2-D cross product of the two edges at `v0`.
    #[inline]
    #[must_use]
    pub fn doubled_signed_area(&self) -> f64 {
        let e1 = self.v1 - self.v0;
        let e2 = self.v2 - self.v0;
        e1.x.mul_add(e2.y, -(e1.y * e2.x))
    }

    /// Signed area; positive for counter-clockwise winding.
    #[inline]
    #[must_use]
    pub fn signed_area(&self) -> f64 {
        self.doubled_signed_area() * 0.5
    }

    /// Unsigned area.
    #[inline]
    #[must_use]
    pub fn area(&self) -> f64 {
        self.signed_area().abs()
    }

    /// Winding of the triangle.
    #[inline]
    #[must_use]
    pub fn orientation(&self) -> Orientation {
        Orientation::of_signed_area(self.doubled_signed_area())
    }

    /// Compute the centroid (barycenter).
    ///
    /// # Example
    ///
    /// ```
    /// use mesh_types::{Triangle2, Point2};
    ///
    /// let tri = Triangle2::new(
    ///     Point2::new(0.0, 0.0),
    ///     Point2::new(3.0, 0.0),
    ///     Point2::new(0.0, 3.0),
    /// );
    /// let c = tri.centroid();
    /// assert!((c.x - 1.0).abs() < 1e-10);
    /// assert!((c.y - 1.0).abs() < 1e-10);
    /// ```
    #[inline]
    #[must_use]
    pub fn centroid(&self) -> Point2<f64> {
        Point2::new(
            (self.v0.x + self.v1.x + self.v2.x) / 3.0,
            (self.v0.y + self.v1.y + self.v2.y) / 3.0,
        )
    }

    /// Compute the circumcenter.
    ///
    /// Returns `None` for degenerate (collinear) triangles.
    ///
    /// # Example
    ///
    /// ```
    /// use mesh_types::{Triangle2, Point2};
    ///
    /// let tri = Triangle2::new(
    ///     Point2::new(0.0, 0.0),
    ///     Point2::new(2.0, 0.0),
    ///     Point2::new(0.0, 2.0),
    /// );
    /// let cc = tri.circumcenter().unwrap();
    /// assert!((cc.x - 1.0).abs() < 1e-12);
    /// assert!((cc.y - 1.0).abs() < 1e-12);
    /// ```
    #[must_use]
    pub fn circumcenter(&self) -> Option<Point2<f64>> {
        let b = self.v1 - self.v0;
        let c = self.v2 - self.v0;
        let d = 2.0 * b.x.mul_add(c.y, -(b.y * c.x));
        if d == 0.0 || !d.is_finite() {
            return None;
        }

        let b2 = b.norm_squared();
        let c2 = c.norm_squared();
        let ux = c.y.mul_add(b2, -(b.y * c2)) / d;
        let uy = b.x.mul_add(c2, -(c.x * b2)) / d;
        Some(Point2::new(self.v0.x + ux, self.v0.y + uy))
    }

    /// Circumradius; `f64::INFINITY` for degenerate triangles.
    #[must_use]
    pub fn circumradius(&self) -> f64 {
        self.circumcenter()
            .map_or(f64::INFINITY, |cc| (self.v0 - cc).norm())
    }

    /// Inradius: twice the area over the perimeter.
    #[must_use]
    pub fn inradius(&self) -> f64 {
        let perimeter: f64 = self.edge_lengths().iter().sum();
        if perimeter <= 0.0 {
            return 0.0;
        }
        2.0 * self.area() / perimeter
    }

    /// Normalized radius ratio `2 r / R`.
    ///
    /// 1 for an equilateral triangle, approaching 0 as the triangle degenerates.
    ///
    /// # Example
    ///
    /// ```
    /// use mesh_types::{Triangle2, Point2};
    ///
    /// let h = 3.0_f64.sqrt() / 2.0;
    /// let tri = Triangle2::new(
    ///     Point2::new(0.0, 0.0),
    ///     Point2::new(1.0, 0.0),
    ///     Point2::new(0.5, h),
    /// );
    /// assert!((tri.quality() - 1.0).abs() < 1e-12);
    /// ```
    #[must_use]
    pub fn quality(&self) -> f64 {
        let r_circ = self.circumradius();
        if !r_circ.is_finite() || r_circ <= 0.0 {
            return 0.0;
        }
        2.0 * self.inradius() / r_circ
    }

    /// Compute the lengths of the three edges.
    ///
    /// Returns `[len01, len12, len20]` where `lenXY` is the distance from vX to vY.
    #[inline]
    #[must_use]
    pub fn edge_lengths(&self) -> [f64; 3] {
        [
            (self.v1 - self.v0).norm(),
            (self.v2 - self.v1).norm(),
            (self.v0 - self.v2).norm(),
        ]
    }

    /// Interior angles in radians at `v0`, `v1` and `v2`.
    ///
    /// Degenerate corners (a zero-length edge) report an angle of zero.
    #[must_use]
    pub fn angles(&self) -> [f64; 3] {
        [
            corner_angle(self.v0, self.v1, self.v2),
            corner_angle(self.v1, self.v2, self.v0),
            corner_angle(self.v2, self.v0, self.v1),
        ]
    }
}

/// Angle at `apex` between the edges towards `a` and `b`.
fn corner_angle(apex: Point2<f64>, a: Point2<f64>, b: Point2<f64>) -> f64 {
    let ea = a - apex;
    let eb = b - apex;
    let len = ea.norm() * eb.norm();
    if !len.is_normal() {
        return 0.0;
    }
    (ea.dot(&eb) / len).clamp(-1.0, 1.0).acos()
}
