//! Curve handles: a sampling function plus a world-space offset.

use nalgebra::{Point3, Vector3};

use crate::{CompositeCurve, CurveError, Result};

/// Most points [`PlacedCurve::resample_by_length`] will produce.
pub const MAX_RESAMPLE_POINTS: usize = 1 << 24;

/// A curve as seen by the intersection solver and grid builder.
///
/// A handle maps `t ∈ [0, 1]` to a point in the curve's local space and
/// carries a translation that places it in world space. The world-space
/// sample is always `sample(t) + offset()`.
pub trait CurveHandle {
    /// Evaluate the curve in local space at `t ∈ [0, 1]`.
    ///
    /// # Errors
    ///
    /// Implementations return [`CurveError::ParameterOutOfRange`] for `t`
    /// outside [0, 1] and may report any other sampling failure.
    fn sample(&self, t: f64) -> Result<Point3<f64>>;

    /// Translation from local to world space.
    fn offset(&self) -> Vector3<f64>;

    /// Evaluate the curve in world space.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`Self::sample`].
    fn sample_world(&self, t: f64) -> Result<Point3<f64>> {
        Ok(self.sample(t)? + self.offset())
    }

    /// Sample `n` world-space points at `t = i / (n - 1)`.
    ///
    /// `n` is raised to at least 2.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`Self::sample`].
    fn sample_uniform(&self, n: usize) -> Result<Vec<Point3<f64>>> {
        let n = n.max(2);
        (0..n)
            .map(|i| self.sample_world(i as f64 / (n - 1) as f64))
            .collect()
    }
}

impl<H: CurveHandle + ?Sized> CurveHandle for &H {
    fn sample(&self, t: f64) -> Result<Point3<f64>> {
        (**self).sample(t)
    }

    fn offset(&self) -> Vector3<f64> {
        (**self).offset()
    }
}

/// A composite curve placed in world space.
///
/// # Example
///
/// ```
/// use section_curves::{CompositeCurve, CubicSegment, CurveHandle, PlacedCurve};
/// use nalgebra::{Point3, Vector3};
///
/// let curve = CompositeCurve::new(vec![CubicSegment::line(
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(1.0, 0.0, 0.0),
/// )])?;
/// let placed = PlacedCurve::new(curve, Vector3::new(0.0, 0.0, 2.0));
///
/// assert_eq!(placed.sample_world(0.0)?, Point3::new(0.0, 0.0, 2.0));
/// # Ok::<(), section_curves::CurveError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedCurve {
    curve: CompositeCurve,
    offset: Vector3<f64>,
}

impl PlacedCurve {
    /// Place a composite curve at the given offset.
    #[must_use]
    pub const fn new(curve: CompositeCurve, offset: Vector3<f64>) -> Self {
        Self { curve, offset }
    }

    /// Place a composite curve at the origin.
    #[must_use]
    pub fn at_origin(curve: CompositeCurve) -> Self {
        Self::new(curve, Vector3::zeros())
    }

    /// The underlying composite curve.
    #[must_use]
    pub const fn curve(&self) -> &CompositeCurve {
        &self.curve
    }

    /// Resample into world-space points spaced roughly `spacing` apart along the curve.
    ///
    /// The point count is `floor(total_length / spacing) + 1` (at least 2),
    /// spread evenly so that both end points are included.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::InvalidSpacing`] if `spacing` is not positive and
    /// finite, or so fine that more than [`MAX_RESAMPLE_POINTS`] points would
    /// be needed.
    pub fn resample_by_length(&self, spacing: f64) -> Result<Vec<Point3<f64>>> {
        if !spacing.is_finite() || spacing <= 0.0 {
            return Err(CurveError::InvalidSpacing(spacing));
        }

        let intervals = (self.curve.total_length() / spacing).floor();
        if intervals >= MAX_RESAMPLE_POINTS as f64 {
            return Err(CurveError::InvalidSpacing(spacing));
        }

        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let count = intervals as usize + 1;
        self.sample_uniform(count)
    }
}

impl CurveHandle for PlacedCurve {
    fn sample(&self, t: f64) -> Result<Point3<f64>> {
        self.curve.sample(t)
    }

    fn offset(&self) -> Vector3<f64> {
        self.offset
    }
}

/// A curve given by a closure, for analytic curves and tests.
///
/// # Example
///
/// ```
/// use section_curves::{CurveHandle, ParametricCurve};
/// use nalgebra::{Point3, Vector3};
///
/// let diagonal = ParametricCurve::new(|t| Point3::new(t, t, 0.0));
/// assert_eq!(diagonal.sample_world(0.5)?, Point3::new(0.5, 0.5, 0.0));
/// # Ok::<(), section_curves::CurveError>(())
/// ```
#[derive(Clone)]
pub struct ParametricCurve<F> {
    function: F,
    offset: Vector3<f64>,
}

impl<F> ParametricCurve<F>
where
    F: Fn(f64) -> Point3<f64>,
{
    /// Wrap a closure as a curve at the origin.
    #[must_use]
    pub fn new(function: F) -> Self {
        Self {
            function,
            offset: Vector3::zeros(),
        }
    }

    /// Set the world-space offset.
    #[must_use]
    pub fn with_offset(mut self, offset: Vector3<f64>) -> Self {
        self.offset = offset;
        self
    }
}

impl<F> CurveHandle for ParametricCurve<F>
where
    F: Fn(f64) -> Point3<f64>,
{
    fn sample(&self, t: f64) -> Result<Point3<f64>> {
        if !(0.0..=1.0).contains(&t) {
            return Err(CurveError::ParameterOutOfRange(t));
        }
        Ok((self.function)(t))
    }

    fn offset(&self) -> Vector3<f64> {
        self.offset
    }
}

impl<F> std::fmt::Debug for ParametricCurve<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParametricCurve")
            .field("offset", &self.offset)
            .finish_non_exhaustive()
    }
}
