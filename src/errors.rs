//! Plane-fit failure reporting

use crate::float_types::Real;

/// Why a requested plane fit did not produce a plane.
///
/// These never surface to the user directly; the accumulator degrades any
/// fit failure to an undefined plane and dependent operations no-op.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PlaneFitError {
    /// Fewer than three points were supplied.
    #[error("plane fit requires at least 3 points, got {0}")]
    TooFewPoints(usize),
    /// The points are coincident or collinear within `tolerance`, so every
    /// plane through them fits equally well.
    #[error("points are degenerate (coincident or collinear) within tolerance {tolerance}")]
    Degenerate {
        /// Relative eigenvalue tolerance in effect when the fit failed.
        tolerance: Real,
    },
}
