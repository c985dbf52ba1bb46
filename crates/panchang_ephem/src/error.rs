//! Error types for ephemeris providers.

use panchang_time::TimeError;

/// Errors from ephemeris queries.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[non_exhaustive]
pub enum EphemerisError {
    /// Epoch is non-finite or outside the provider's validity range.
    #[error("epoch JD {0} is outside the supported range")]
    InvalidEpoch(f64),
    /// Invalid geographic location parameter.
    #[error("invalid location: {0}")]
    InvalidLocation(&'static str),
    /// Iterative algorithm did not converge.
    #[error("no convergence: {0}")]
    NoConvergence(&'static str),
    #[error("time error: {0}")]
    Time(#[from] TimeError),
}
