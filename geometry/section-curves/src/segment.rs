//! Single cubic Bézier segments.

use nalgebra::{Point3, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Relative tolerance for the adaptive arclength integrator.
const ARC_LENGTH_TOLERANCE: f64 = 1e-10;

/// Recursion limit for the adaptive arclength integrator.
const ARC_LENGTH_MAX_DEPTH: usize = 20;

/// A cubic Bézier segment defined by 4 control points.
///
/// The segment passes through `p0` and `p3`; `p1` and `p2` are the outgoing
/// and incoming handles.
///
/// # Equation
///
/// ```text
/// B(u) = (1-u)³P₀ + 3(1-u)²uP₁ + 3(1-u)u²P₂ + u³P₃
/// ```
///
/// # Example
///
/// ```
/// use section_curves::CubicSegment;
/// use nalgebra::Point3;
///
/// let segment = CubicSegment::new(
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(1.0, 2.0, 0.0),
///     Point3::new(3.0, 2.0, 0.0),
///     Point3::new(4.0, 0.0, 0.0),
/// );
///
/// assert_eq!(segment.point_at(0.0), segment.p0);
/// assert_eq!(segment.point_at(1.0), segment.p3);
/// assert!(segment.arc_length() > 4.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CubicSegment {
    /// Start point.
    pub p0: Point3<f64>,
    /// Outgoing handle of the start point.
    pub p1: Point3<f64>,
    /// Incoming handle of the end point.
    pub p2: Point3<f64>,
    /// End point.
    pub p3: Point3<f64>,
}

impl CubicSegment {
    /// Create a new cubic segment.
    #[must_use]
    pub const fn new(p0: Point3<f64>, p1: Point3<f64>, p2: Point3<f64>, p3: Point3<f64>) -> Self {
        Self { p0, p1, p2, p3 }
    }

    /// Create a straight segment from `start` to `end` with handles at the thirds.
    ///
    /// The resulting segment has uniform speed, so its local parameter is
    /// already proportional to arclength.
    #[must_use]
    pub fn line(start: Point3<f64>, end: Point3<f64>) -> Self {
        let d = end - start;
        Self::new(start, start + d / 3.0, start + d * (2.0 / 3.0), end)
    }

    /// Get the control points as an array.
    #[must_use]
    pub fn control_points(&self) -> [Point3<f64>; 4] {
        [self.p0, self.p1, self.p2, self.p3]
    }

    /// Evaluate the segment at local parameter `u`, clamped to [0, 1].
    #[must_use]
    pub fn point_at(&self, u: f64) -> Point3<f64> {
        let u = u.clamp(0.0, 1.0);
        let s = 1.0 - u;
        let s2 = s * s;
        let u2 = u * u;

        Point3::from(
            self.p0.coords * (s2 * s)
                + self.p1.coords * (3.0 * s2 * u)
                + self.p2.coords * (3.0 * s * u2)
                + self.p3.coords * (u2 * u),
        )
    }

    /// First derivative with respect to the local parameter.
    #[must_use]
    pub fn derivative_at(&self, u: f64) -> Vector3<f64> {
        let u = u.clamp(0.0, 1.0);
        let s = 1.0 - u;

        // B'(u) = 3(1-u)²(P₁-P₀) + 6(1-u)u(P₂-P₁) + 3u²(P₃-P₂)
        (self.p1 - self.p0) * (3.0 * s * s)
            + (self.p2 - self.p1) * (6.0 * s * u)
            + (self.p3 - self.p2) * (3.0 * u * u)
    }

    /// Total length of the control polygon, an upper bound on the arclength.
    #[must_use]
    pub fn control_polygon_length(&self) -> f64 {
        (self.p1 - self.p0).norm() + (self.p2 - self.p1).norm() + (self.p3 - self.p2).norm()
    }

    /// Arclength of the segment.
    ///
    /// Integrates `|B'(u)|` over [0, 1] with adaptive Simpson quadrature.
    #[must_use]
    pub fn arc_length(&self) -> f64 {
        let whole = self.simpson(0.0, 1.0);
        self.adaptive_simpson(0.0, 1.0, ARC_LENGTH_TOLERANCE, whole, ARC_LENGTH_MAX_DEPTH)
    }

    fn simpson(&self, a: f64, b: f64) -> f64 {
        let mid = (a + b) / 2.0;
        let h = (b - a) / 6.0;

        let fa = self.derivative_at(a).norm();
        let fm = self.derivative_at(mid).norm();
        let fb = self.derivative_at(b).norm();

        h * (fa + 4.0 * fm + fb)
    }

    fn adaptive_simpson(&self, a: f64, b: f64, tolerance: f64, whole: f64, depth: usize) -> f64 {
        let mid = (a + b) / 2.0;
        let left = self.simpson(a, mid);
        let right = self.simpson(mid, b);
        let combined = left + right;

        if depth == 0 || (combined - whole).abs() < 15.0 * tolerance {
            combined + (combined - whole) / 15.0
        } else {
            let half_tol = tolerance / 2.0;
            self.adaptive_simpson(a, mid, half_tol, left, depth - 1)
                + self.adaptive_simpson(mid, b, half_tol, right, depth - 1)
        }
    }
}
