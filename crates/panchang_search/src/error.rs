//! Error types for the search crate.

use panchang_ephem::EphemerisError;
use panchang_time::TimeError;

use crate::sankranti_types::BisectionDebug;

/// Errors from boundary, sankranti and scan searches.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[non_exhaustive]
pub enum SearchError {
    /// No sign change could be established for a sankranti bracket, even
    /// after seam correction and the bounded expansions.
    #[error("no bracket for sign {sign} in {year} (fa = {:.6}, fb = {:.6})", debug.fa, debug.fb)]
    NoBracket {
        sign: u8,
        year: i32,
        debug: BisectionDebug,
    },
    /// A stepping search ran out of steps before the target was crossed.
    #[error("no convergence: {what}")]
    NoConvergence { what: &'static str },
    /// Search parameters are out of range.
    #[error("invalid config: {0}")]
    InvalidConfig(&'static str),
    #[error("ephemeris error: {0}")]
    Ephemeris(#[from] EphemerisError),
    #[error("time error: {0}")]
    Time(#[from] TimeError),
}

impl SearchError {
    pub(crate) fn no_convergence(what: &'static str) -> Self {
        Self::NoConvergence { what }
    }
}
