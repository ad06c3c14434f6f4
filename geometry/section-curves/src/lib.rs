//! Composite Bézier curves and curve-curve intersection.
//!
//! This crate is the curve half of the section-meshing pipeline:
//!
//! - [`CubicSegment`] - A single cubic Bézier segment with arclength
//! - [`CompositeCurve`] - Segments chained end to end, sampled by arclength fraction
//! - [`CurveObject`] / [`Spline`] / [`BezierPoint`] - Host-style curve data
//! - [`CurveHandle`] - "A function `t ↦ point` plus a world offset"
//! - [`intersect`] - Bounded local search for where two curves meet
//!
//! # Example
//!
//! ```
//! use section_curves::{
//!     intersect_default, CompositeCurve, CubicSegment, CurveHandle, PlacedCurve,
//! };
//! use nalgebra::{Point3, Vector3};
//!
//! let rail = PlacedCurve::at_origin(CompositeCurve::new(vec![CubicSegment::line(
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(1.0, 1.0, 0.0),
//! )])?);
//! let cross = PlacedCurve::new(
//!     CompositeCurve::new(vec![CubicSegment::line(
//!         Point3::new(0.0, 1.0, 0.0),
//!         Point3::new(1.0, 0.0, 0.0),
//!     )])?,
//!     Vector3::zeros(),
//! );
//!
//! let hit = intersect_default(&rail, &cross)?;
//! let p = rail.sample_world(hit.t)?;
//! assert!((p - Point3::new(0.5, 0.5, 0.0)).norm() < 1e-6);
//! # Ok::<(), section_curves::CurveError>(())
//! ```
//!
//! # Parameterization
//!
//! All curves are parameterized over `t ∈ [0, 1]`. Out-of-range parameters
//! are errors, never clamped silently.
//!
//! # Feature Flags
//!
//! - `serde`: Enable serialization/deserialization for value types and params

#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![allow(
    clippy::many_single_char_names,
    clippy::similar_names,
    clippy::cast_precision_loss,
    clippy::float_cmp,
    clippy::module_name_repetitions,
    clippy::suboptimal_flops
)]

mod closest;
mod composite;
mod error;
mod handle;
mod intersect;
mod primitives;
mod segment;
mod spline;

pub use closest::{ClosestPair, closest_pair};
pub use composite::CompositeCurve;
pub use error::CurveError;
pub use handle::{CurveHandle, MAX_RESAMPLE_POINTS, ParametricCurve, PlacedCurve};
pub use intersect::{IntersectParams, Intersection, intersect, intersect_default};
pub use primitives::{inverse_lerp, lerp, lerp_point, wrap};
pub use segment::CubicSegment;
pub use spline::{BezierPoint, CurveObject, Spline, SplineKind};

// Re-export nalgebra types for convenience
pub use nalgebra::{Point3, Vector3};

/// Result type for curve operations.
pub type Result<T> = std::result::Result<T, CurveError>;
