//! Time and angle utilities for the panchang engine.
//!
//! This crate provides:
//! - Julian Day ↔ Gregorian calendar conversions
//! - `UtcTime` civil tuples and the `Instant` time axis (Julian Day, UT)
//! - DST-aware local-time construction via [`TimeZoneSpec`]
//! - Degree normalization helpers for seam-safe longitude arithmetic

pub mod angle;
pub mod error;
pub mod instant;
pub mod julian;
pub mod utc_time;
pub mod zone;

pub use angle::{angular_difference, normalize_360, normalize_pm180, unwrap_near};
pub use error::TimeError;
pub use instant::Instant;
pub use julian::{
    J2000_JD, MINUTES_PER_DAY, SECONDS_PER_DAY, UNIX_EPOCH_JD, calendar_to_jd, jd_to_calendar,
};
pub use utc_time::UtcTime;
pub use zone::TimeZoneSpec;

/// Convert a Julian Day (UT) to Julian centuries since J2000.0.
pub fn jd_to_centuries(jd: f64) -> f64 {
    (jd - J2000_JD) / 36_525.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centuries_zero_at_j2000() {
        assert_eq!(jd_to_centuries(J2000_JD), 0.0);
    }

    #[test]
    fn centuries_roundtrip() {
        let jd = 2_460_000.5;
        let t = jd_to_centuries(jd);
        assert!((t * 36_525.0 + J2000_JD - jd).abs() < 1e-9);
    }
}
