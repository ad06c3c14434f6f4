//! Error types for curve sampling and intersection.

use thiserror::Error;

/// Errors that can occur while sampling or intersecting curves.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CurveError {
    /// Parameter is outside the valid range [0, 1].
    #[error("parameter {0} is outside valid range [0, 1]")]
    ParameterOutOfRange(f64),

    /// Degenerate curve (no segments, zero-length segment).
    #[error("degenerate curve: {reason}")]
    DegenerateCurve {
        /// Description of the degeneracy.
        reason: String,
    },

    /// Insufficient control points to define the curve.
    #[error("insufficient points: need at least {required}, got {actual}")]
    InsufficientPoints {
        /// Minimum required points.
        required: usize,
        /// Actual number of points provided.
        actual: usize,
    },

    /// Resampling spacing must be positive and finite.
    #[error("invalid sample spacing: {0} (must be positive)")]
    InvalidSpacing(f64),

    /// Intersection solver parameters are out of range.
    #[error("invalid solver parameters: {reason}")]
    InvalidParams {
        /// Which parameter was rejected.
        reason: String,
    },

    /// The intersection solver hit a non-finite objective.
    #[error("optimization failed: {reason}")]
    Optimization {
        /// Description of the failure.
        reason: String,
    },
}

impl CurveError {
    /// Create a degenerate curve error.
    #[must_use]
    pub fn degenerate(reason: impl Into<String>) -> Self {
        Self::DegenerateCurve {
            reason: reason.into(),
        }
    }

    /// Create an insufficient points error.
    #[must_use]
    pub fn insufficient_points(required: usize, actual: usize) -> Self {
        Self::InsufficientPoints { required, actual }
    }

    /// Create an invalid solver parameters error.
    #[must_use]
    pub fn invalid_params(reason: impl Into<String>) -> Self {
        Self::InvalidParams {
            reason: reason.into(),
        }
    }

    /// Create an optimization error.
    #[must_use]
    pub fn optimization(reason: impl Into<String>) -> Self {
        Self::Optimization {
            reason: reason.into(),
        }
    }

    /// Check if this is a parameter out of range error.
    #[must_use]
    pub fn is_parameter_out_of_range(&self) -> bool {
        matches!(self, Self::ParameterOutOfRange(_))
    }

    /// Check if this is a degenerate curve error.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        matches!(self, Self::DegenerateCurve { .. })
    }

    /// Check if this is an invalid solver parameters error.
    #[must_use]
    pub fn is_invalid_params(&self) -> bool {
        matches!(self, Self::InvalidParams { .. })
    }

    /// Check if this is an optimization error.
    #[must_use]
    pub fn is_optimization(&self) -> bool {
        matches!(self, Self::Optimization { .. })
    }
}
