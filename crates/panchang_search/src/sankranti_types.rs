//! Types for sankranti (solar sign ingress) search.

use panchang_base::Rashi;
use panchang_time::Instant;
use serde::{Deserialize, Serialize};

/// Configuration for the sankranti root-finder.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SankrantiConfig {
    /// Bisection stops once the bracket is at most this wide, in seconds.
    pub tol_sec: f64,
    /// Maximum bisection iterations (default 80).
    pub max_iter: u32,
    /// Days added to each side of a bracket that shows no sign change.
    pub expand_days: f64,
    /// Maximum number of bracket expansions (default 3).
    pub max_expansions: u32,
}

impl Default for SankrantiConfig {
    fn default() -> Self {
        Self {
            tol_sec: 1.0,
            max_iter: 80,
            expand_days: 3.0,
            max_expansions: 3,
        }
    }
}

impl SankrantiConfig {
    pub fn validate(&self) -> Result<(), &'static str> {
        if !(self.tol_sec.is_finite() && self.tol_sec > 0.0) {
            return Err("tol_sec must be positive");
        }
        if self.max_iter == 0 {
            return Err("max_iter must be at least 1");
        }
        if !(self.expand_days.is_finite() && self.expand_days >= 0.0) {
            return Err("expand_days must be non-negative");
        }
        Ok(())
    }
}

/// Diagnostic record of a bracketed bisection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BisectionDebug {
    /// Function value at the final lower bracket end (degrees).
    pub fa: f64,
    /// Function value at the final upper bracket end (degrees, seam-unwrapped).
    pub fb: f64,
    /// Bisection iterations performed, or expansions tried on failure.
    pub iterations: u32,
    /// Bracket the bisection started from.
    pub bracket: (Instant, Instant),
}

/// A solar sign ingress.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SankrantiEvent {
    /// 0-based sidereal sign index (0 = Mesha).
    pub sign_index: u8,
    pub rashi: Rashi,
    /// Instant the sidereal Sun reaches `sign_index · 30°`.
    pub instant: Instant,
    /// Civil year of `instant` in the zone the search ran for.
    pub local_year: i32,
    /// Sidereal Sun longitude at `instant`, degrees.
    pub sidereal_longitude_deg: f64,
    pub debug: BisectionDebug,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(SankrantiConfig::default().validate().is_ok());
    }

    #[test]
    fn rejects_zero_tolerance() {
        let cfg = SankrantiConfig {
            tol_sec: 0.0,
            ..SankrantiConfig::default()
        };
        assert!(cfg.validate().is_err());
    }
}
