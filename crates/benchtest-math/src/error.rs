//! Error types for spline fitting and curve interpolation.

use thiserror::Error;

/// A specialized Result type for fitting and interpolation.
pub type MathResult<T> = Result<T, MathError>;

/// Errors that can occur while fitting or evaluating splines.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MathError {
    /// Spline degree outside `[1, 5]` or too high for the number of samples.
    #[error("Invalid spline degree {degree}: {reason}")]
    InvalidDegree {
        /// The requested degree.
        degree: usize,
        /// Why the degree cannot be used.
        reason: String,
    },

    /// A curve's samples cannot be fitted.
    #[error("Inconsistent curve {index}: {reason}")]
    InconsistentCurve {
        /// Position of the offending curve in the input (0 for a lone curve).
        index: usize,
        /// Description of the inconsistency.
        reason: String,
    },

    /// Not enough curves for the requested fit.
    #[error("Insufficient curves: need at least {required}, got {actual}")]
    InsufficientCurves {
        /// Minimum required curves.
        required: usize,
        /// Actual number of curves.
        actual: usize,
    },

    /// Collocation matrix is singular.
    #[error("Singular matrix: cannot solve for spline coefficients")]
    SingularMatrix,

    /// Invalid input parameter.
    #[error("Invalid input: {reason}")]
    InvalidInput {
        /// Description of the invalid input.
        reason: String,
    },
}

impl MathError {
    /// Creates an invalid degree error.
    #[must_use]
    pub fn invalid_degree(degree: usize, reason: impl Into<String>) -> Self {
        Self::InvalidDegree {
            degree,
            reason: reason.into(),
        }
    }

    /// Creates an inconsistent curve error.
    #[must_use]
    pub fn inconsistent_curve(index: usize, reason: impl Into<String>) -> Self {
        Self::InconsistentCurve {
            index,
            reason: reason.into(),
        }
    }

    /// Creates an insufficient curves error.
    #[must_use]
    pub fn insufficient_curves(required: usize, actual: usize) -> Self {
        Self::InsufficientCurves { required, actual }
    }

    /// Creates an invalid input error.
    #[must_use]
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }

    /// Re-labels an [`MathError::InconsistentCurve`] with the curve's position.
    #[must_use]
    pub(crate) fn at_curve(self, index: usize) -> Self {
        match self {
            Self::InconsistentCurve { reason, .. } => Self::InconsistentCurve { index, reason },
            other => other,
        }
    }
}
