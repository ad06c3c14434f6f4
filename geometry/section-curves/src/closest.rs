//! Closest pair between two sampled point sets.

use nalgebra::Point3;

/// Closest pair found by [`closest_pair`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClosestPair {
    /// Index into the first point set.
    pub index_a: usize,
    /// Index into the second point set.
    pub index_b: usize,
    /// Distance between the two points.
    pub distance: f64,
}

/// Find the closest pair of points between two point sets by exhaustive search.
///
/// Typically used on curves resampled with
/// [`PlacedCurve::resample_by_length`](crate::PlacedCurve::resample_by_length)
/// to get a coarse intersection estimate. The first pair wins ties.
///
/// Returns `None` if either set is empty.
///
/// # Example
///
/// ```
/// use section_curves::closest_pair;
/// use nalgebra::Point3;
///
/// let a = [Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 0.0, 0.0)];
/// let b = [Point3::new(5.0, 0.0, 0.0), Point3::new(1.0, 0.5, 0.0)];
///
/// let pair = closest_pair(&a, &b).unwrap();
/// assert_eq!((pair.index_a, pair.index_b), (1, 1));
/// assert!((pair.distance - 0.5).abs() < 1e-12);
/// ```
#[must_use]
pub fn closest_pair(a: &[Point3<f64>], b: &[Point3<f64>]) -> Option<ClosestPair> {
    let mut best: Option<(usize, usize, f64)> = None;

    for (i, pa) in a.iter().enumerate() {
        for (j, pb) in b.iter().enumerate() {
            let d2 = (pb - pa).norm_squared();
            if best.map_or(true, |(_, _, best_d2)| d2 < best_d2) {
                best = Some((i, j, d2));
            }
        }
    }

    best.map(|(index_a, index_b, d2)| ClosestPair {
        index_a,
        index_b,
        distance: d2.sqrt(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_empty_sets() {
        let a = [Point3::origin()];
        assert!(closest_pair(&a, &[]).is_none());
        assert!(closest_pair(&[], &a).is_none());
    }

    #[test]
    fn test_first_pair_wins_ties() {
        let a = [Point3::new(0.0, 0.0, 0.0), Point3::new(2.0, 0.0, 0.0)];
        let b = [Point3::new(1.0, 0.0, 0.0)];

        let pair = closest_pair(&a, &b).unwrap();
        assert_eq!(pair.index_a, 0);
        assert_relative_eq!(pair.distance, 1.0);
    }

    #[test]
    fn test_coincident_points() {
        let a = [Point3::new(3.0, 1.0, 0.0), Point3::new(0.5, 0.5, 0.5)];
        let b = [Point3::new(9.0, 9.0, 9.0), Point3::new(0.5, 0.5, 0.5)];

        let pair = closest_pair(&a, &b).unwrap();
        assert_eq!((pair.index_a, pair.index_b), (1, 1));
        assert_eq!(pair.distance, 0.0);
    }
}
