//! Curve-curve intersection by bounded local minimization.
//!
//! The intersection of two curves `a` and `b` is sought as the minimizer of
//!
//! ```text
//! f(t, s) = |a(t) + offset_a - b(s) - offset_b|²      (t, s) ∈ [0, 1]²
//! ```
//!
//! using a box-projected Levenberg-Marquardt iteration on the residual
//! `a(t) - b(s)`, with a finite-difference Jacobian. The search is local:
//! it starts from a fixed seed and returns wherever it ends up, whether or
//! not the curves actually meet there.

use nalgebra::{Matrix2, Matrix3x2, Vector2, Vector3};
use tracing::{debug, warn};

use crate::{CurveError, CurveHandle, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Smallest damping factor used by the solver.
const MIN_DAMPING: f64 = 1e-15;

/// Damping factor at which the solver gives up on finding a descent step.
const MAX_DAMPING: f64 = 1e12;

/// Floor for the diagonal scaling of the normal equations.
const MIN_DIAGONAL: f64 = 1e-18;

/// Parameters for [`intersect`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct IntersectParams {
    /// Starting `(t, s)`. Clamped into the unit box.
    pub seed: (f64, f64),

    /// Maximum number of outer iterations.
    pub max_iterations: usize,

    /// Squared distance at which the curves are considered to meet.
    ///
    /// The default of `1e-24` corresponds to a world-space gap of `1e-12`.
    pub tolerance: f64,

    /// Parameter step length below which the search stops.
    pub step_tolerance: f64,

    /// Finite-difference step for the Jacobian. Must lie in `(0, 0.5)`.
    pub fd_step: f64,

    /// Initial Levenberg-Marquardt damping. Must be finite and non-negative.
    pub initial_damping: f64,

    /// Squared distance above which a non-meeting result is logged.
    pub gap_warning: f64,
}

impl Default for IntersectParams {
    fn default() -> Self {
        Self {
            seed: (0.5, 0.5),
            max_iterations: 200,
            tolerance: 1e-24,
            step_tolerance: 1e-12,
            fd_step: 1e-7,
            initial_damping: 1e-3,
            gap_warning: 1e-6,
        }
    }
}

impl IntersectParams {
    /// Create parameters with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the starting parameters.
    #[must_use]
    pub const fn with_seed(mut self, t: f64, s: f64) -> Self {
        self.seed = (t, s);
        self
    }

    /// Set the iteration limit.
    #[must_use]
    pub const fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Set the squared-distance convergence tolerance.
    #[must_use]
    pub const fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Set the minimum parameter step.
    #[must_use]
    pub const fn with_step_tolerance(mut self, step_tolerance: f64) -> Self {
        self.step_tolerance = step_tolerance;
        self
    }

    /// Set the finite-difference step.
    #[must_use]
    pub const fn with_fd_step(mut self, fd_step: f64) -> Self {
        self.fd_step = fd_step;
        self
    }

    /// Set the initial Levenberg-Marquardt damping.
    #[must_use]
    pub const fn with_initial_damping(mut self, initial_damping: f64) -> Self {
        self.initial_damping = initial_damping;
        self
    }

    /// Set the squared distance above which results are logged as not meeting.
    #[must_use]
    pub const fn with_gap_warning(mut self, gap_warning: f64) -> Self {
        self.gap_warning = gap_warning;
        self
    }

    /// Check the parameters the solver cannot recover from.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::InvalidParams`] if `fd_step` is not in `(0, 0.5)`
    /// or `initial_damping` is negative or non-finite.
    pub fn validate(&self) -> Result<()> {
        if self.fd_step.is_nan() || self.fd_step <= 0.0 || self.fd_step >= 0.5 {
            return Err(CurveError::invalid_params(format!(
                "fd_step {} is outside (0, 0.5)",
                self.fd_step
            )));
        }
        if !self.initial_damping.is_finite() || self.initial_damping < 0.0 {
            return Err(CurveError::invalid_params(format!(
                "initial_damping {} must be finite and non-negative",
                self.initial_damping
            )));
        }
        Ok(())
    }
}

/// Result of [`intersect`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Intersection {
    /// Parameter on the first curve.
    pub t: f64,
    /// Parameter on the second curve.
    pub s: f64,
    /// Squared world-space distance between the two sampled points.
    pub distance_squared: f64,
    /// Outer iterations performed.
    pub iterations: usize,
    /// Whether the solver stopped on a tolerance rather than the iteration
    /// limit or a failed line search. Informational only.
    pub converged: bool,
}

impl Intersection {
    /// World-space distance between the two sampled points.
    #[must_use]
    pub fn distance(&self) -> f64 {
        self.distance_squared.sqrt()
    }

    /// The parameter pair `(t, s)`.
    #[must_use]
    pub const fn params(&self) -> (f64, f64) {
        (self.t, self.s)
    }
}

/// Find the parameters `(t, s)` where curve `a` comes closest to curve `b`.
///
/// The returned point is the solver's terminal iterate. No check is made that
/// the curves actually meet there; inspect [`Intersection::distance_squared`]
/// if that matters.
///
/// # Errors
///
/// - [`CurveError::InvalidParams`] if `params` fails [`IntersectParams::validate`]
/// - [`CurveError::Optimization`] if the objective becomes non-finite
/// - any error returned by sampling either curve
///
/// # Example
///
/// ```
/// use section_curves::{intersect, CurveHandle, IntersectParams, ParametricCurve};
/// use nalgebra::Point3;
///
/// let a = ParametricCurve::new(|t| Point3::new(t, t, 0.0));
/// let b = ParametricCurve::new(|s| Point3::new(s, 1.0 - s, 0.0));
///
/// let hit = intersect(&a, &b, &IntersectParams::default())?;
/// assert!(hit.distance_squared < 1e-12);
/// assert!((hit.t - 0.5).abs() < 1e-6);
/// # Ok::<(), section_curves::CurveError>(())
/// ```
pub fn intersect<A, B>(a: &A, b: &B, params: &IntersectParams) -> Result<Intersection>
where
    A: CurveHandle + ?Sized,
    B: CurveHandle + ?Sized,
{
    params.validate()?;
    let problem = Problem { a, b, params };

    let mut x = Vector2::new(
        params.seed.0.clamp(0.0, 1.0),
        params.seed.1.clamp(0.0, 1.0),
    );
    let mut r = problem.residual(x)?;
    let mut f = problem.objective(&r)?;
    let mut damping = params.initial_damping.max(MIN_DAMPING);
    let mut converged = false;
    let mut iterations = 0;

    while iterations < params.max_iterations {
        if f <= params.tolerance {
            converged = true;
            break;
        }
        iterations += 1;

        let jacobian = problem.jacobian(x, &r)?;
        let jtj = jacobian.transpose() * jacobian;
        let gradient = jacobian.transpose() * r;

        let mut accepted = None;
        while damping <= MAX_DAMPING {
            let scaled = jtj
                + Matrix2::from_diagonal(&Vector2::new(
                    jtj[(0, 0)].max(MIN_DIAGONAL),
                    jtj[(1, 1)].max(MIN_DIAGONAL),
                )) * damping;

            let Some(inverse) = scaled.try_inverse() else {
                damping *= 10.0;
                continue;
            };

            let candidate = project(x - inverse * gradient);
            let step = (candidate - x).norm();
            if step < params.step_tolerance {
                break;
            }

            let candidate_r = problem.residual(candidate)?;
            let candidate_f = problem.objective(&candidate_r)?;
            if candidate_f < f {
                accepted = Some((candidate, candidate_r, candidate_f));
                damping = (damping / 10.0).max(MIN_DAMPING);
                break;
            }
            damping *= 10.0;
        }

        match accepted {
            Some((candidate, candidate_r, candidate_f)) => {
                x = candidate;
                r = candidate_r;
                f = candidate_f;
            }
            None => {
                // No descent direction left: a boundary or interior local minimum
                converged = damping <= MAX_DAMPING;
                break;
            }
        }
    }

    if f <= params.tolerance {
        converged = true;
    }

    let result = Intersection {
        t: x.x,
        s: x.y,
        distance_squared: f,
        iterations,
        converged,
    };

    debug!(
        "Intersection at t={:.6}, s={:.6}: distance²={:.3e} after {} iterations (converged: {})",
        result.t, result.s, result.distance_squared, result.iterations, result.converged
    );
    if f > params.gap_warning {
        warn!(
            "Curves do not meet: closest approach distance {:.6} at t={:.6}, s={:.6}",
            result.distance(),
            result.t,
            result.s
        );
    }

    Ok(result)
}

/// [`intersect`] with [`IntersectParams::default`].
///
/// # Errors
///
/// See [`intersect`].
pub fn intersect_default<A, B>(a: &A, b: &B) -> Result<Intersection>
where
    A: CurveHandle + ?Sized,
    B: CurveHandle + ?Sized,
{
    intersect(a, b, &IntersectParams::default())
}

struct Problem<'a, A: ?Sized, B: ?Sized> {
    a: &'a A,
    b: &'a B,
    params: &'a IntersectParams,
}

impl<A, B> Problem<'_, A, B>
where
    A: CurveHandle + ?Sized,
    B: CurveHandle + ?Sized,
{
    fn residual(&self, x: Vector2<f64>) -> Result<Vector3<f64>> {
        Ok(self.a.sample_world(x.x)? - self.b.sample_world(x.y)?)
    }

    fn objective(&self, r: &Vector3<f64>) -> Result<f64> {
        let f = r.norm_squared();
        if f.is_finite() {
            Ok(f)
        } else {
            Err(CurveError::optimization(format!(
                "objective is non-finite ({f}) for residual {r:?}"
            )))
        }
    }

    /// Forward differences, switching to backward ones at the upper bound.
    fn jacobian(&self, x: Vector2<f64>, r: &Vector3<f64>) -> Result<Matrix3x2<f64>> {
        let h = self.params.fd_step;
        let mut jacobian = Matrix3x2::zeros();

        for axis in 0..2 {
            let forward = x[axis] + h <= 1.0;
            let mut shifted = x;
            shifted[axis] = if forward { x[axis] + h } else { x[axis] - h };

            let shifted_r = self.residual(shifted)?;
            let column = if forward {
                (shifted_r - r) / h
            } else {
                (r - shifted_r) / h
            };
            jacobian.set_column(axis, &column);
        }

        Ok(jacobian)
    }
}

fn project(x: Vector2<f64>) -> Vector2<f64> {
    x.map(|v| v.clamp(0.0, 1.0))
}
