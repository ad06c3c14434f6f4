//! Scalar and point interpolation helpers.

use nalgebra::Point3;

/// Linear interpolation between two scalars.
///
/// `lerp(a, b, 0.0) == a` and `lerp(a, b, 1.0) == b`.
#[inline]
#[must_use]
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    if t == 1.0 {
        return b;
    }
    a + (b - a) * t
}

/// Linear interpolation between two points.
///
/// Evaluated as `a * (1 - t) + b * t`, so both endpoints are reproduced
/// exactly.
#[inline]
#[must_use]
pub fn lerp_point(a: Point3<f64>, b: Point3<f64>, t: f64) -> Point3<f64> {
    Point3::from(a.coords * (1.0 - t) + b.coords * t)
}

/// Inverse of [`lerp`]: the parameter `t` at which `value` lies between `a` and `b`.
///
/// Returns `None` when `a == b`.
///
/// # Example
///
/// ```
/// use section_curves::{inverse_lerp, lerp};
///
/// let t = inverse_lerp(2.0, 6.0, lerp(2.0, 6.0, 0.25)).unwrap();
/// assert!((t - 0.25).abs() < 1e-12);
/// assert!(inverse_lerp(1.0, 1.0, 1.0).is_none());
/// ```
#[inline]
#[must_use]
pub fn inverse_lerp(a: f64, b: f64, value: f64) -> Option<f64> {
    let span = b - a;
    if span == 0.0 {
        None
    } else {
        Some((value - a) / span)
    }
}

/// Wrap an index into `[0, len)`, treating negative values as counting from the end.
///
/// Returns `None` when `len` is zero.
#[inline]
#[must_use]
pub fn wrap(index: isize, len: usize) -> Option<usize> {
    let len = isize::try_from(len).ok().filter(|&l| l > 0)?;
    usize::try_from(index.rem_euclid(len)).ok()
}
