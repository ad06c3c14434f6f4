//! Similarity transform that maps one reference segment onto another.
//!
//! Given a source segment `B -> Y` and a target segment `A -> Z`, the rebase
//! is the rotation + uniform scale + translation taking `B` to `A` and `Y`
//! to `Z`. The rotation is the minimal one turning `Y - B` into `Z - A`,
//! built with Rodrigues' formula.

use nalgebra::{Matrix3, Matrix4, Point3, Vector3};

use crate::error::{ReferenceSegment, SectionError, SectionResult};

/// `1 + cos(angle)` at or below which the two directions count as opposed.
const OPPOSED_EPSILON: f64 = 1e-12;

/// A rotation + uniform scale + translation, `x ↦ M·x + t` with `M = s·R`.
///
/// # Example
///
/// ```
/// use mesh_from_sections::Rebase;
/// use nalgebra::Point3;
///
/// let b = Point3::new(0.0, 0.0, 0.0);
/// let y = Point3::new(0.0, 1.0, 0.0);
/// let a = Point3::new(0.0, 0.0, 0.0);
/// let z = Point3::new(0.0, 0.0, 2.0);
///
/// let rebase = Rebase::new(b, y, a, z)?;
/// let p = rebase.apply(&Point3::new(0.0, -1.0, 0.0));
///
/// assert!((p - Point3::new(0.0, 0.0, -2.0)).norm() < 1e-12);
/// # Ok::<(), mesh_from_sections::SectionError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rebase {
    rotation: Matrix3<f64>,
    scale: f64,
    translation: Vector3<f64>,
}

impl Rebase {
    /// Compute the transform mapping `b -> a` and `y -> z`.
    ///
    /// # Errors
    ///
    /// - [`SectionError::DegenerateSegment`] if `b == y` or `a == z`
    /// - [`SectionError::DegenerateRotation`] if `y - b` and `z - a` point in
    ///   opposite directions
    pub fn new(
        b: Point3<f64>,
        y: Point3<f64>,
        a: Point3<f64>,
        z: Point3<f64>,
    ) -> SectionResult<Self> {
        let v1 = y - b;
        let v2 = z - a;
        let l1 = checked_length(&v1, ReferenceSegment::Source)?;
        let l2 = checked_length(&v2, ReferenceSegment::Target)?;

        let u1 = v1 / l1;
        let u2 = v2 / l2;

        let rotation = rotation_between_units(&u1, &u2)?;
        let scale = l2 / l1;
        let translation = a.coords - rotation * b.coords * scale;

        Ok(Self {
            rotation,
            scale,
            translation,
        })
    }

    /// The rotation `R`.
    #[must_use]
    pub const fn rotation(&self) -> &Matrix3<f64> {
        &self.rotation
    }

    /// The uniform scale `s = |Z - A| / |Y - B|`.
    #[must_use]
    pub const fn scale(&self) -> f64 {
        self.scale
    }

    /// The combined linear part `M = s·R`.
    #[must_use]
    pub fn matrix(&self) -> Matrix3<f64> {
        self.rotation * self.scale
    }

    /// The translation `t = A - M·B`.
    #[must_use]
    pub const fn translation(&self) -> &Vector3<f64> {
        &self.translation
    }

    /// The transform as a 4x4 homogeneous affine matrix.
    #[must_use]
    pub fn to_homogeneous(&self) -> Matrix4<f64> {
        let mut h = self.matrix().to_homogeneous();
        h.fixed_view_mut::<3, 1>(0, 3).copy_from(&self.translation);
        h
    }

    /// Apply the transform to a single point.
    #[must_use]
    pub fn apply(&self, point: &Point3<f64>) -> Point3<f64> {
        Point3::from(self.rotation * point.coords * self.scale + self.translation)
    }

    /// Apply the transform to every point.
    #[must_use]
    pub fn apply_all(&self, points: &[Point3<f64>]) -> Vec<Point3<f64>> {
        points.iter().map(|p| self.apply(p)).collect()
    }
}

/// Realign `points` by the transform that maps `b -> a` and `y -> z`.
///
/// # Errors
///
/// See [`Rebase::new`].
pub fn rebase(
    b: Point3<f64>,
    y: Point3<f64>,
    a: Point3<f64>,
    z: Point3<f64>,
    points: &[Point3<f64>],
) -> SectionResult<Vec<Point3<f64>>> {
    Ok(Rebase::new(b, y, a, z)?.apply_all(points))
}

fn checked_length(v: &Vector3<f64>, which: ReferenceSegment) -> SectionResult<f64> {
    let length = v.norm();
    if length.is_finite() && length > 0.0 {
        Ok(length)
    } else {
        Err(SectionError::DegenerateSegment { which, length })
    }
}

/// Rodrigues rotation taking unit vector `u1` onto unit vector `u2`.
///
/// With `v = u1 × u2`, `c = u1 · u2` and `K = [v]×`, the rotation is
/// `I + K + K²·(1 - c)/|v|²`. Since `|v|² = (1 - c)(1 + c)` the last factor is
/// evaluated as `1 / (1 + c)`, which stays finite as the directions coincide
/// (where `K` vanishes and `R = I`). Opposed directions leave the axis
/// undefined.
fn rotation_between_units(u1: &Vector3<f64>, u2: &Vector3<f64>) -> SectionResult<Matrix3<f64>> {
    let v = u1.cross(u2);
    let c = u1.dot(u2);

    if 1.0 + c <= OPPOSED_EPSILON {
        return Err(SectionError::DegenerateRotation { dot: c });
    }

    let k = v.cross_matrix();
    Ok(Matrix3::identity() + k + k * k / (1.0 + c))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn assert_points_eq(actual: &[Point3<f64>], expected: &[Point3<f64>]) {
        assert_eq!(actual.len(), expected.len());
        for (a, e) in actual.iter().zip(expected) {
            assert_relative_eq!(a.coords, e.coords, epsilon = 1e-10);
        }
    }

    #[test]
    fn test_maps_reference_segment() {
        let b = Point3::new(1.0, 2.0, 3.0);
        let y = Point3::new(2.0, 0.5, 4.0);
        let a = Point3::new(-3.0, 0.0, 1.0);
        let z = Point3::new(-1.0, 2.0, -1.0);

        let mapped = rebase(b, y, a, z, &[b, y]).unwrap();
        assert_points_eq(&mapped, &[a, z]);
    }

    #[test]
    fn test_rotation_is_orthonormal() {
        let rebase = Rebase::new(
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 2.0, 2.0),
            Point3::new(5.0, 5.0, 5.0),
            Point3::new(5.0, 2.0, 9.0),
        )
        .unwrap();

        let r = rebase.rotation();
        assert_relative_eq!(r.transpose() * r, Matrix3::identity(), epsilon = 1e-12);
        assert_relative_eq!(r.determinant(), 1.0, epsilon = 1e-12);
        assert_relative_eq!(rebase.scale(), 5.0 / 3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_quarter_turn_example() {
        // y-axis onto z-axis with scale 2
        let rebase = Rebase::new(
            Point3::origin(),
            Point3::new(0.0, 1.0, 0.0),
            Point3::origin(),
            Point3::new(0.0, 0.0, 2.0),
        )
        .unwrap();

        let p = rebase.apply(&Point3::new(0.0, -1.0, 0.0));
        assert_relative_eq!(p.coords, Vector3::new(0.0, 0.0, -2.0), epsilon = 1e-12);

        // Points off the axis rotate about x
        let p = rebase.apply(&Point3::new(1.0, 0.0, 1.0));
        assert_relative_eq!(p.coords, Vector3::new(2.0, -2.0, 0.0), epsilon = 1e-12);
    }

    #[test]
    fn test_coincident_directions_are_scale_and_translation() {
        let b = Point3::new(0.0, 0.0, 0.0);
        let y = Point3::new(0.0, 1.0, 0.0);
        let a = Point3::new(3.0, 1.0, 0.0);
        let z = Point3::new(3.0, 4.0, 0.0);

        let rebase = Rebase::new(b, y, a, z).unwrap();
        assert_eq!(*rebase.rotation(), Matrix3::identity());
        assert_relative_eq!(rebase.scale(), 3.0);

        let mapped = rebase.apply_all(&[b, Point3::new(0.0, 0.5, 0.0), y]);
        assert_points_eq(&mapped, &[a, Point3::new(3.0, 2.5, 0.0), z]);
    }

    #[test]
    fn test_identical_segments_are_identity() {
        let b = Point3::new(0.5, 0.0, 0.0);
        let y = Point3::new(0.5, 1.0, 0.0);

        let p = Point3::new(0.5, 0.25, 0.0);
        let mapped = rebase(b, y, b, y, &[p]).unwrap();
        assert_eq!(mapped[0], p);
    }

    #[test]
    fn test_opposed_directions_fail() {
        let err = Rebase::new(
            Point3::origin(),
            Point3::new(1.0, 0.0, 0.0),
            Point3::origin(),
            Point3::new(-2.0, 0.0, 0.0),
        )
        .unwrap_err();
        assert!(matches!(err, SectionError::DegenerateRotation { dot } if dot < -0.999));
    }

    #[test]
    fn test_nearly_coincident_directions_stay_finite() {
        let rebase = Rebase::new(
            Point3::origin(),
            Point3::new(1.0, 0.0, 0.0),
            Point3::origin(),
            Point3::new(1.0, 1e-9, 0.0),
        )
        .unwrap();
        assert!(rebase.matrix().iter().all(|v| v.is_finite()));
        let p = rebase.apply(&Point3::new(1.0, 0.0, 0.0));
        assert_relative_eq!(p.coords, Vector3::new(1.0, 1e-9, 0.0), epsilon = 1e-12);
    }

    #[test]
    fn test_zero_length_segments_fail() {
        let p = Point3::new(1.0, 1.0, 1.0);
        let q = Point3::new(2.0, 1.0, 1.0);

        let err = Rebase::new(p, p, p, q).unwrap_err();
        assert!(matches!(
            err,
            SectionError::DegenerateSegment { which: ReferenceSegment::Source, .. }
        ));

        let err = Rebase::new(p, q, q, q).unwrap_err();
        assert!(matches!(
            err,
            SectionError::DegenerateSegment { which: ReferenceSegment::Target, .. }
        ));
    }

    #[test]
    fn test_homogeneous_matches_apply() {
        let rebase = Rebase::new(
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 2.0, 1.0),
            Point3::new(0.0, 0.0, 4.0),
            Point3::new(-1.0, 1.0, 4.5),
        )
        .unwrap();

        let p = Point3::new(0.3, -0.7, 2.0);
        let h = rebase.to_homogeneous() * p.to_homogeneous();
        assert_relative_eq!(h.xyz(), rebase.apply(&p).coords, epsilon = 1e-12);
        assert_relative_eq!(h.w, 1.0);
    }
}
