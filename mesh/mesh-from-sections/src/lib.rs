//! Fill four-curve sections with quad grids and assemble them into meshes.
//!
//! A *curve section* is a region bounded by four curves: left, right, top
//! and bottom. This crate turns a list of sections into a single quad mesh:
//!
//! - [`build_grid`] - Blend the side curves and rebase each column onto the
//!   top and bottom curves
//! - [`Rebase`] - The rotation + uniform scale + translation behind that
//!   realignment
//! - [`quad_faces`] - Face indices for a structured grid
//! - [`build_mesh`] / [`MeshBuilder`] - Append grids and faces section by section
//! - [`run_sections`] - Resolve named curves, build, and publish to a [`MeshSink`]
//!
//! # Quick Start
//!
//! ```
//! use mesh_from_sections::{build_mesh, CurveSection, MeshParams};
//! use section_curves::{CompositeCurve, CubicSegment, PlacedCurve, Point3};
//!
//! let line = |a, b| -> PlacedCurve {
//!     PlacedCurve::at_origin(CompositeCurve::new(vec![CubicSegment::line(a, b)]).unwrap())
//! };
//!
//! let section = CurveSection::new(
//!     line(Point3::new(0.0, 0.0, 0.0), Point3::new(0.0, 1.0, 0.0)),
//!     line(Point3::new(1.0, 0.0, 0.0), Point3::new(1.0, 1.0, 0.0)),
//!     line(Point3::new(0.0, 1.0, 0.0), Point3::new(1.0, 1.0, 0.0)),
//!     line(Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 0.0, 0.0)),
//! );
//!
//! let report = build_mesh(&[section], &MeshParams::default()).unwrap();
//! assert_eq!(report.mesh.vertex_count(), 225);
//! assert_eq!(report.mesh.face_count(), 196);
//! ```
//!
//! # Grid Layout
//!
//! Grids are stored x-outer, y-inner: the outer index walks from the left curve
//! to the right curve, the inner index from the bottom curve to the top.
//! Faces are wound `[tl, tr, br, bl]` in that index space.
//!
//! # Logging
//!
//! Progress is reported through `tracing`. No subscriber is installed.
//!
//! # Feature Flags
//!
//! - `serde`: Enable serialization/deserialization for params and meshes

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

mod accumulate;
mod error;
mod faces;
mod grid;
mod quad_mesh;
mod rebase;
mod sink;
mod source;

pub use accumulate::{
    FailurePolicy, MeshBuildReport, MeshBuilder, MeshParams, SkippedSection, build_mesh,
};
pub use error::{ReferenceSegment, SectionError, SectionResult};
pub use faces::{DEFAULT_RESOLUTION, faces_for_15x15, quad_faces};
pub use grid::{CurveSection, GridParams, SectionCorners, build_grid, section_corners};
pub use quad_mesh::QuadMesh;
pub use rebase::{Rebase, rebase};
pub use sink::{MeshSink, MeshStore, run_sections};
pub use source::{CurveLibrary, CurveSource, SectionSpec};
