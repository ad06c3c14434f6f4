//! Error types for section meshing.

use section_curves::CurveError;
use thiserror::Error;

/// Result type for section meshing operations.
pub type SectionResult<T> = Result<T, SectionError>;

/// Which reference segment of a rebase was degenerate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceSegment {
    /// The source segment `B -> Y`.
    Source,
    /// The target segment `A -> Z`.
    Target,
}

impl std::fmt::Display for ReferenceSegment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Source => f.write_str("source"),
            Self::Target => f.write_str("target"),
        }
    }
}

/// Errors that can occur while building section grids and meshes.
#[derive(Debug, Error)]
pub enum SectionError {
    /// Sampling or intersecting a boundary curve failed.
    #[error(transparent)]
    Curve(#[from] CurveError),

    /// A rebase reference segment has zero (or non-finite) length.
    #[error("degenerate {which} reference segment: length {length}")]
    DegenerateSegment {
        /// The degenerate segment.
        which: ReferenceSegment,
        /// Its length.
        length: f64,
    },

    /// Source and target directions are anti-parallel, so the rotation axis is undefined.
    #[error("degenerate rotation: reference directions are opposed (dot = {dot})")]
    DegenerateRotation {
        /// Dot product of the two unit directions.
        dot: f64,
    },

    /// Grid resolution must be at least 2.
    #[error("invalid grid resolution: {0} (must be >= 2)")]
    InvalidResolution(usize),

    /// Vertex buffer grew past what `u32` face indices can address.
    #[error("vertex index {0} does not fit in a u32 face index")]
    IndexOverflow(usize),

    /// A curve named by a section is not present in the curve source.
    #[error("unknown curve: {0}")]
    UnknownCurve(String),

    /// Mesh names must be non-empty.
    #[error("mesh name must not be empty")]
    InvalidMeshName,
}

impl SectionError {
    /// Check if this error came from curve sampling or intersection.
    #[must_use]
    pub fn is_curve(&self) -> bool {
        matches!(self, Self::Curve(_))
    }

    /// Check if this is a degenerate rebase (segment or rotation).
    #[must_use]
    pub fn is_degenerate_rebase(&self) -> bool {
        matches!(
            self,
            Self::DegenerateSegment { .. } | Self::DegenerateRotation { .. }
        )
    }
}
