//! Point grids filling a four-curve section.
//!
//! A section is bounded by `left`, `right`, `top` and `bottom` curves. The
//! grid builder:
//!
//! 1. intersects each side curve with the top and bottom curves to find the
//!    parameter range of every boundary inside the section,
//! 2. for each column, blends the left and right curves linearly,
//! 3. rebases the blended column so its ends land on the bottom and top
//!    curves at that column's parameter.
//!
//! Points come out x-outer, y-inner: point `(i, j)` sits at `i * resolution + j`.

use nalgebra::Point3;
use section_curves::{
    CurveHandle, IntersectParams, Intersection, intersect, lerp, lerp_point,
};
use tracing::debug;

use crate::error::{SectionError, SectionResult};
use crate::faces::DEFAULT_RESOLUTION;
use crate::rebase::Rebase;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Parameters for [`build_grid`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GridParams {
    /// Points per side. Must be at least 2.
    pub resolution: usize,

    /// Solver settings for the corner intersections.
    pub intersect: IntersectParams,
}

impl Default for GridParams {
    fn default() -> Self {
        Self {
            resolution: DEFAULT_RESOLUTION,
            intersect: IntersectParams::default(),
        }
    }
}

impl GridParams {
    /// Create params with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of points per side.
    #[must_use]
    pub const fn with_resolution(mut self, resolution: usize) -> Self {
        self.resolution = resolution;
        self
    }

    /// Set the intersection solver parameters.
    #[must_use]
    pub fn with_intersect(mut self, intersect: IntersectParams) -> Self {
        self.intersect = intersect;
        self
    }

    /// Number of points in one grid.
    #[must_use]
    pub const fn points_per_grid(&self) -> usize {
        self.resolution * self.resolution
    }

    fn validate(&self) -> SectionResult<()> {
        if self.resolution < 2 {
            return Err(SectionError::InvalidResolution(self.resolution));
        }
        Ok(())
    }
}

/// Four curves bounding a section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurveSection<H> {
    /// Curve along the left side, running bottom to top.
    pub left: H,
    /// Curve along the right side, running bottom to top.
    pub right: H,
    /// Curve along the top, running left to right.
    pub top: H,
    /// Curve along the bottom, running left to right.
    pub bottom: H,
}

impl<H> CurveSection<H> {
    /// Create a section from its four boundary curves.
    pub const fn new(left: H, right: H, top: H, bottom: H) -> Self {
        Self {
            left,
            right,
            top,
            bottom,
        }
    }

    /// Borrow every boundary curve.
    pub const fn borrowed(&self) -> CurveSection<&H> {
        CurveSection {
            left: &self.left,
            right: &self.right,
            top: &self.top,
            bottom: &self.bottom,
        }
    }
}

/// The four corner intersections of a section.
///
/// Each intersection is `(t, s)` with `t` on the side curve (left or right)
/// and `s` on the top or bottom curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SectionCorners {
    /// `left × bottom`: gives `(left_start, bottom_start)`.
    pub left_bottom: Intersection,
    /// `right × bottom`: gives `(right_start, bottom_end)`.
    pub right_bottom: Intersection,
    /// `right × top`: gives `(right_end, top_end)`.
    pub right_top: Intersection,
    /// `left × top`: gives `(left_end, top_start)`.
    pub left_top: Intersection,
}

impl SectionCorners {
    /// Parameter range `(start, end)` on the left curve.
    #[must_use]
    pub const fn left_range(&self) -> (f64, f64) {
        (self.left_bottom.t, self.left_top.t)
    }

    /// Parameter range `(start, end)` on the right curve.
    #[must_use]
    pub const fn right_range(&self) -> (f64, f64) {
        (self.right_bottom.t, self.right_top.t)
    }

    /// Parameter range `(start, end)` on the bottom curve.
    #[must_use]
    pub const fn bottom_range(&self) -> (f64, f64) {
        (self.left_bottom.s, self.right_bottom.s)
    }

    /// Parameter range `(start, end)` on the top curve.
    #[must_use]
    pub const fn top_range(&self) -> (f64, f64) {
        (self.left_top.s, self.right_top.s)
    }

    /// Largest squared gap over the four corners.
    #[must_use]
    pub fn max_distance_squared(&self) -> f64 {
        [
            self.left_bottom.distance_squared,
            self.right_bottom.distance_squared,
            self.right_top.distance_squared,
            self.left_top.distance_squared,
        ]
        .into_iter()
        .fold(0.0, f64::max)
    }
}

/// Intersect the side curves of a section with its top and bottom curves.
///
/// # Errors
///
/// Propagates solver and sampling errors as [`SectionError::Curve`].
pub fn section_corners<H: CurveHandle>(
    section: &CurveSection<H>,
    params: &GridParams,
) -> SectionResult<SectionCorners> {
    let p = &params.intersect;
    Ok(SectionCorners {
        left_bottom: intersect(&section.left, &section.bottom, p)?,
        right_bottom: intersect(&section.right, &section.bottom, p)?,
        right_top: intersect(&section.right, &section.top, p)?,
        left_top: intersect(&section.left, &section.top, p)?,
    })
}

/// Build the `resolution × resolution` point grid filling a section.
///
/// # Errors
///
/// - [`SectionError::InvalidResolution`] if `params.resolution < 2`
/// - [`SectionError::Curve`] if an intersection or sample fails
/// - [`SectionError::DegenerateSegment`] / [`SectionError::DegenerateRotation`]
///   if a column cannot be rebased
///
/// # Example
///
/// ```
/// use mesh_from_sections::{build_grid, CurveSection, GridParams};
/// use section_curves::{lerp_point, ParametricCurve};
/// use nalgebra::Point3;
///
/// let line = |a: Point3<f64>, b: Point3<f64>| ParametricCurve::new(move |t| lerp_point(a, b, t));
///
/// let section = CurveSection::new(
///     line(Point3::new(0.0, 0.0, 0.0), Point3::new(0.0, 1.0, 0.0)),
///     line(Point3::new(1.0, 0.0, 0.0), Point3::new(1.0, 1.0, 0.0)),
///     line(Point3::new(0.0, 1.0, 0.0), Point3::new(1.0, 1.0, 0.0)),
///     line(Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 0.0, 0.0)),
/// );
///
/// let grid = build_grid(&section, &GridParams::default().with_resolution(3))?;
/// assert_eq!(grid.len(), 9);
/// assert!((grid[4] - Point3::new(0.5, 0.5, 0.0)).norm() < 1e-6);
/// # Ok::<(), mesh_from_sections::SectionError>(())
/// ```
pub fn build_grid<H: CurveHandle>(
    section: &CurveSection<H>,
    params: &GridParams,
) -> SectionResult<Vec<Point3<f64>>> {
    params.validate()?;

    let corners = section_corners(section, params)?;
    let (left_start, left_end) = corners.left_range();
    let (right_start, right_end) = corners.right_range();
    let (bottom_start, bottom_end) = corners.bottom_range();
    let (top_start, top_end) = corners.top_range();

    debug!(
        left = ?(left_start, left_end),
        right = ?(right_start, right_end),
        bottom = ?(bottom_start, bottom_end),
        top = ?(top_start, top_end),
        max_gap_squared = corners.max_distance_squared(),
        "Section corners"
    );

    let res = params.resolution;
    let last = (res - 1) as f64;
    let mut grid = Vec::with_capacity(params.points_per_grid());
    let mut column = Vec::with_capacity(res);

    for x_vert in 0..res {
        let x_t = x_vert as f64 / last;
        let bottom_pos = section
            .bottom
            .sample_world(param_between(bottom_start, bottom_end, x_t))?;
        let top_pos = section
            .top
            .sample_world(param_between(top_start, top_end, x_t))?;

        column.clear();
        for y_vert in 0..res {
            let y_t = y_vert as f64 / last;
            let left_pos = section
                .left
                .sample_world(param_between(left_start, left_end, y_t))?;
            let right_pos = section
                .right
                .sample_world(param_between(right_start, right_end, y_t))?;
            column.push(lerp_point(left_pos, right_pos, x_t));
        }

        let rebase = Rebase::new(column[0], column[res - 1], bottom_pos, top_pos)?;
        grid.extend(column.iter().map(|p| rebase.apply(p)));
    }

    Ok(grid)
}

/// Interpolate between two solver parameters, kept inside the unit interval.
fn param_between(start: f64, end: f64, t: f64) -> f64 {
    lerp(start, end, t).clamp(0.0, 1.0)
}
