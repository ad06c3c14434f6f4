//! Composite curves sampled by normalized arclength.

use nalgebra::Point3;

use crate::{CubicSegment, CurveError, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Segments shorter than this are treated as zero-length.
const MIN_SEGMENT_LENGTH: f64 = 1e-12;

/// An ordered chain of cubic Bézier segments, parameterized by arclength fraction.
///
/// Every segment carries its precomputed arclength. Sampling at `t` walks the
/// segments until the accumulated length reaches `t * total_length`, so equal
/// steps in `t` cover equal distance *between* segments (within a segment the
/// local Bézier parameter is used directly).
///
/// Segments are expected to be contiguous (`p3` of one equals `p0` of the
/// next) but this is not enforced; only the per-segment lengths matter.
///
/// # Example
///
/// ```
/// use section_curves::{CompositeCurve, CubicSegment};
/// use nalgebra::Point3;
///
/// let curve = CompositeCurve::new(vec![
///     CubicSegment::line(Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 0.0, 0.0)),
///     CubicSegment::line(Point3::new(1.0, 0.0, 0.0), Point3::new(1.0, 3.0, 0.0)),
/// ])?;
///
/// // A quarter of the way along lands at the corner
/// let corner = curve.sample(0.25)?;
/// assert!((corner - Point3::new(1.0, 0.0, 0.0)).norm() < 1e-9);
/// # Ok::<(), section_curves::CurveError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(try_from = "Vec<CubicSegment>", into = "Vec<CubicSegment>")
)]
pub struct CompositeCurve {
    segments: Vec<CubicSegment>,
    lengths: Vec<f64>,
    total_length: f64,
}

impl CompositeCurve {
    /// Build a composite curve, measuring each segment.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::DegenerateCurve`] if there are no segments or if
    /// any segment has zero (or non-finite) length.
    pub fn new(segments: Vec<CubicSegment>) -> Result<Self> {
        if segments.is_empty() {
            return Err(CurveError::degenerate("composite curve has no segments"));
        }

        let mut lengths = Vec::with_capacity(segments.len());
        let mut total_length = 0.0;
        for (index, segment) in segments.iter().enumerate() {
            let length = segment.arc_length();
            if !length.is_finite() || length < MIN_SEGMENT_LENGTH {
                return Err(CurveError::degenerate(format!(
                    "segment {index} has length {length}"
                )));
            }
            total_length += length;
            lengths.push(length);
        }

        Ok(Self {
            segments,
            lengths,
            total_length,
        })
    }

    /// Number of segments.
    #[must_use]
    pub fn num_segments(&self) -> usize {
        self.segments.len()
    }

    /// All segments in order.
    #[must_use]
    pub fn segments(&self) -> &[CubicSegment] {
        &self.segments
    }

    /// Arclength of each segment, in segment order.
    #[must_use]
    pub fn segment_lengths(&self) -> &[f64] {
        &self.lengths
    }

    /// Total arclength (sum of segment lengths).
    #[must_use]
    pub fn total_length(&self) -> f64 {
        self.total_length
    }

    /// Start point of the first segment.
    #[must_use]
    pub fn start(&self) -> Point3<f64> {
        self.segments.first().map_or_else(Point3::origin, |s| s.p0)
    }

    /// End point of the last segment.
    #[must_use]
    pub fn end(&self) -> Point3<f64> {
        self.segments.last().map_or_else(Point3::origin, |s| s.p3)
    }

    /// All control points of all segments, in order.
    pub fn control_points(&self) -> impl Iterator<Item = Point3<f64>> + '_ {
        self.segments.iter().flat_map(CubicSegment::control_points)
    }

    /// Evaluate the curve at arclength fraction `t ∈ [0, 1]`.
    ///
    /// `t == 1.0` always returns the end point of the last segment, as does
    /// any `t` whose target length is never reached because of accumulated
    /// floating-point error.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::ParameterOutOfRange`] if `t` is outside [0, 1]
    /// or NaN.
    pub fn sample(&self, t: f64) -> Result<Point3<f64>> {
        if !(0.0..=1.0).contains(&t) {
            return Err(CurveError::ParameterOutOfRange(t));
        }
        if t == 1.0 {
            return Ok(self.end());
        }

        let target = t * self.total_length;
        let mut accumulated = 0.0;

        for (segment, &length) in self.segments.iter().zip(&self.lengths) {
            if accumulated + length >= target {
                let local_t = ((target - accumulated) / length).clamp(0.0, 1.0);
                return Ok(segment.point_at(local_t));
            }
            accumulated += length;
        }

        Ok(self.end())
    }

    /// Sample `n` points at uniform arclength fractions, including both ends.
    ///
    /// `n` is raised to at least 2.
    #[must_use]
    pub fn sample_uniform(&self, n: usize) -> Vec<Point3<f64>> {
        let n = n.max(2);
        (0..n)
            .map(|i| {
                let t = i as f64 / (n - 1) as f64;
                // t stays within [0, 1], so sampling cannot fail
                self.sample(t).unwrap_or_else(|_| self.end())
            })
            .collect()
    }
}

impl TryFrom<Vec<CubicSegment>> for CompositeCurve {
    type Error = CurveError;

    fn try_from(segments: Vec<CubicSegment>) -> Result<Self> {
        Self::new(segments)
    }
}

impl From<CompositeCurve> for Vec<CubicSegment> {
    fn from(curve: CompositeCurve) -> Self {
        curve.segments
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn two_segment_curve() -> CompositeCurve {
        CompositeCurve::new(vec![
            CubicSegment::new(
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 1.0, 0.0),
                Point3::new(2.0, 1.0, 0.0),
                Point3::new(3.0, 0.0, 0.0),
            ),
            CubicSegment::new(
                Point3::new(3.0, 0.0, 0.0),
                Point3::new(4.0, -1.0, 0.5),
                Point3::new(5.0, -1.0, 0.5),
                Point3::new(6.0, 0.0, 1.0),
            ),
        ])
        .unwrap()
    }

    #[test]
    fn test_endpoints_exact() {
        let curve = two_segment_curve();
        assert_eq!(curve.sample(0.0).unwrap(), curve.segments()[0].p0);
        assert_eq!(curve.sample(1.0).unwrap(), curve.segments()[1].p3);
    }

    #[test]
    fn test_total_length_is_sum() {
        let curve = two_segment_curve();
        let sum: f64 = curve.segment_lengths().iter().sum();
        assert_relative_eq!(curve.total_length(), sum, epsilon = 1e-12);
        assert_eq!(curve.num_segments(), 2);
    }

    #[test]
    fn test_out_of_range_parameter() {
        let curve = two_segment_curve();
        assert!(curve.sample(-0.01).unwrap_err().is_parameter_out_of_range());
        assert!(curve.sample(1.01).unwrap_err().is_parameter_out_of_range());
        assert!(curve.sample(f64::NAN).unwrap_err().is_parameter_out_of_range());
    }

    #[test]
    fn test_no_segments_is_degenerate() {
        let err = CompositeCurve::new(Vec::new()).unwrap_err();
        assert!(err.is_degenerate());
    }

    #[test]
    fn test_zero_length_segment_is_degenerate() {
        let p = Point3::new(2.0, 0.0, 0.0);
        let err = CompositeCurve::new(vec![
            CubicSegment::line(Point3::origin(), p),
            CubicSegment::new(p, p, p, p),
        ])
        .unwrap_err();
        assert!(matches!(err, CurveError::DegenerateCurve { reason } if reason.contains("segment 1")));
    }

    #[test]
    fn test_arclength_between_segments() {
        // Lengths 1 and 3: t = 0.25 is exactly the joint
        let curve = CompositeCurve::new(vec![
            CubicSegment::line(Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 0.0, 0.0)),
            CubicSegment::line(Point3::new(1.0, 0.0, 0.0), Point3::new(1.0, 3.0, 0.0)),
        ])
        .unwrap();

        let p = curve.sample(0.25).unwrap();
        assert_relative_eq!(p.coords, Point3::new(1.0, 0.0, 0.0).coords, epsilon = 1e-9);

        let p = curve.sample(0.625).unwrap();
        assert_relative_eq!(p.coords, Point3::new(1.0, 1.5, 0.0).coords, epsilon = 1e-9);
    }

    #[test]
    fn test_sample_uniform() {
        let curve = two_segment_curve();
        let samples = curve.sample_uniform(25);
        assert_eq!(samples.len(), 25);
        assert_eq!(samples[0], curve.start());
        assert_eq!(samples[24], curve.end());
        assert_eq!(curve.sample_uniform(0).len(), 2);
    }

    #[test]
    fn test_control_points_iterates_all_segments() {
        let curve = two_segment_curve();
        assert_eq!(curve.control_points().count(), 8);
    }

    #[test]
    fn test_try_from_segments_validates() {
        assert!(CompositeCurve::try_from(Vec::new()).unwrap_err().is_degenerate());

        let curve = two_segment_curve();
        let rebuilt = CompositeCurve::try_from(Vec::from(curve.clone())).unwrap();
        assert_eq!(rebuilt, curve);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_deserialize_goes_through_validation() {
        let err = serde_json::from_str::<CompositeCurve>("[]").unwrap_err();
        assert!(err.to_string().contains("no segments"));

        // Raw field layout is not accepted either
        let fields = r#"{"segments":[],"lengths":[],"total_length":0.0}"#;
        assert!(serde_json::from_str::<CompositeCurve>(fields).is_err());

        let p = "[1.0,1.0,1.0]";
        let collapsed = format!(r#"[{{"p0":{p},"p1":{p},"p2":{p},"p3":{p}}}]"#);
        let err = serde_json::from_str::<CompositeCurve>(&collapsed).unwrap_err();
        assert!(err.to_string().contains("segment 0"));

        let curve = two_segment_curve();
        let json = serde_json::to_string(&curve).unwrap();
        let back: CompositeCurve = serde_json::from_str(&json).unwrap();
        assert_eq!(back, curve);
        assert_relative_eq!(back.total_length(), curve.total_length(), epsilon = 1e-12);
    }
}
