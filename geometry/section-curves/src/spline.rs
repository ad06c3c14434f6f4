//! Host-style spline data and its conversion to composite curves.
//!
//! Curve objects in a scene are a set of splines, each a list of control
//! points with left and right handles, placed at a world location. Only the
//! Bézier spline with the most control points takes part in sampling.

use nalgebra::{Point3, Vector3};

use crate::{CompositeCurve, CubicSegment, CurveError, PlacedCurve, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A Bézier control point with its two handles.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BezierPoint {
    /// The point the curve passes through.
    pub co: Point3<f64>,
    /// Handle controlling the incoming direction.
    pub handle_left: Point3<f64>,
    /// Handle controlling the outgoing direction.
    pub handle_right: Point3<f64>,
}

impl BezierPoint {
    /// Create a control point with explicit handles.
    #[must_use]
    pub const fn new(co: Point3<f64>, handle_left: Point3<f64>, handle_right: Point3<f64>) -> Self {
        Self {
            co,
            handle_left,
            handle_right,
        }
    }

    /// Create a control point whose handles coincide with the point ("vector" handles).
    #[must_use]
    pub const fn sharp(co: Point3<f64>) -> Self {
        Self::new(co, co, co)
    }
}

/// Spline type as reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SplineKind {
    /// Cubic Bézier spline with handles.
    #[default]
    Bezier,
    /// Polyline spline.
    Poly,
    /// NURBS spline.
    Nurbs,
}

/// One spline of a curve object.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Spline {
    /// Spline type.
    pub kind: SplineKind,
    /// Control points in order.
    pub points: Vec<BezierPoint>,
}

impl Spline {
    /// Create a Bézier spline from control points.
    #[must_use]
    pub fn bezier(points: Vec<BezierPoint>) -> Self {
        Self {
            kind: SplineKind::Bezier,
            points,
        }
    }

    /// Create a Bézier spline through `points` with straight segments.
    ///
    /// Each handle sits a third of the way toward the neighbouring point, so
    /// every segment is a straight line traversed at constant speed. End
    /// handles mirror the single inner handle.
    ///
    /// # Example
    ///
    /// ```
    /// use section_curves::{CompositeCurve, Point3, Spline};
    ///
    /// let spline = Spline::polyline(&[Point3::origin(), Point3::new(3.0, 0.0, 0.0)]);
    /// let curve = CompositeCurve::new(spline.segments())?;
    /// assert!((curve.sample(0.25)?.x - 0.75).abs() < 1e-12);
    /// # Ok::<(), section_curves::CurveError>(())
    /// ```
    #[must_use]
    pub fn polyline(points: &[Point3<f64>]) -> Self {
        let n = points.len();
        let bezier_points = points
            .iter()
            .enumerate()
            .map(|(i, &co)| {
                let toward_prev = (i > 0).then(|| (points[i - 1] - co) / 3.0);
                let toward_next = (i + 1 < n).then(|| (points[i + 1] - co) / 3.0);
                let (left, right) = match (toward_prev, toward_next) {
                    (Some(l), Some(r)) => (l, r),
                    (Some(l), None) => (l, -l),
                    (None, Some(r)) => (-r, r),
                    (None, None) => (Vector3::zeros(), Vector3::zeros()),
                };
                BezierPoint::new(co, co + left, co + right)
            })
            .collect();
        Self::bezier(bezier_points)
    }

    /// Cubic segments between consecutive control points.
    ///
    /// Segment `i` runs `(co[i], handle_right[i], handle_left[i+1], co[i+1])`.
    #[must_use]
    pub fn segments(&self) -> Vec<CubicSegment> {
        self.points
            .windows(2)
            .map(|w| CubicSegment::new(w[0].co, w[0].handle_right, w[1].handle_left, w[1].co))
            .collect()
    }
}

impl CompositeCurve {
    /// Build a composite curve from consecutive Bézier control points.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::InsufficientPoints`] for fewer than 2 points and
    /// [`CurveError::DegenerateCurve`] if any resulting segment has zero length.
    pub fn from_bezier_points(points: &[BezierPoint]) -> Result<Self> {
        if points.len() < 2 {
            return Err(CurveError::insufficient_points(2, points.len()));
        }
        let spline = Spline::bezier(points.to_vec());
        Self::new(spline.segments())
    }
}

/// A named curve object: splines plus a world-space location.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CurveObject {
    /// Object name, unique within its source.
    pub name: String,
    /// Splines of the curve data.
    pub splines: Vec<Spline>,
    /// World-space translation of the object.
    pub location: Vector3<f64>,
}

impl CurveObject {
    /// Create a curve object at the origin.
    #[must_use]
    pub fn new(name: impl Into<String>, splines: Vec<Spline>) -> Self {
        Self {
            name: name.into(),
            splines,
            location: Vector3::zeros(),
        }
    }

    /// Set the world location.
    #[must_use]
    pub fn with_location(mut self, location: Vector3<f64>) -> Self {
        self.location = location;
        self
    }

    /// The Bézier spline with the most control points.
    ///
    /// Non-Bézier splines are ignored; the first spline wins ties.
    #[must_use]
    pub fn primary_spline(&self) -> Option<&Spline> {
        self.splines
            .iter()
            .filter(|s| s.kind == SplineKind::Bezier)
            .fold(None, |best: Option<&Spline>, s| match best {
                Some(b) if b.points.len() >= s.points.len() => Some(b),
                _ => Some(s),
            })
    }

    /// Composite curve over the primary spline, in object-local space.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::InsufficientPoints`] if there is no Bézier spline
    /// with at least 2 control points, or [`CurveError::DegenerateCurve`] for
    /// zero-length segments.
    pub fn composite(&self) -> Result<CompositeCurve> {
        let points = self.primary_spline().map_or(&[][..], |s| &s.points[..]);
        CompositeCurve::from_bezier_points(points)
    }

    /// The primary spline placed at the object's world location.
    ///
    /// # Errors
    ///
    /// See [`Self::composite`].
    pub fn placed(&self) -> Result<PlacedCurve> {
        Ok(PlacedCurve::new(self.composite()?, self.location))
    }
}
