//! Continuous time values on the UT Julian-Day axis.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::TimeError;
use crate::julian::{MINUTES_PER_DAY, SECONDS_PER_DAY, UNIX_EPOCH_JD};
use crate::utc_time::UtcTime;

/// A point in time, held as a Julian Day in UT.
///
/// Always finite: construction from NaN or infinity is rejected, so
/// arithmetic on an `Instant` never has to re-check.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(into = "f64", try_from = "f64")]
pub struct Instant {
    jd_ut: f64,
}

impl Instant {
    /// Create an instant from a Julian Day (UT).
    pub fn from_jd_ut(jd_ut: f64) -> Result<Self, TimeError> {
        if jd_ut.is_finite() {
            Ok(Self { jd_ut })
        } else {
            Err(TimeError::InvalidInstant(jd_ut))
        }
    }

    /// Create an instant from a validated UTC civil tuple.
    pub fn from_utc(utc: &UtcTime) -> Result<Self, TimeError> {
        utc.validate()?;
        Self::from_jd_ut(utc.to_jd())
    }

    /// Create an instant from a chrono UTC timestamp.
    pub fn from_datetime(dt: &DateTime<Utc>) -> Self {
        let secs = dt.timestamp() as f64 + f64::from(dt.timestamp_subsec_nanos()) * 1e-9;
        Self {
            jd_ut: UNIX_EPOCH_JD + secs / SECONDS_PER_DAY,
        }
    }

    /// Julian Day (UT).
    pub fn jd_ut(self) -> f64 {
        self.jd_ut
    }

    /// UTC calendar tuple.
    pub fn to_utc(self) -> UtcTime {
        UtcTime::from_jd(self.jd_ut)
    }

    /// Chrono UTC timestamp, rounded to the millisecond.
    pub fn to_datetime(self) -> Result<DateTime<Utc>, TimeError> {
        let millis = ((self.jd_ut - UNIX_EPOCH_JD) * SECONDS_PER_DAY * 1000.0).round();
        if millis.abs() > i64::MAX as f64 {
            return Err(TimeError::OutOfRange(self.jd_ut));
        }
        DateTime::from_timestamp_millis(millis as i64).ok_or(TimeError::OutOfRange(self.jd_ut))
    }

    pub fn add_days(self, days: f64) -> Self {
        Self {
            jd_ut: self.jd_ut + days,
        }
    }

    pub fn add_minutes(self, minutes: f64) -> Self {
        self.add_days(minutes / MINUTES_PER_DAY)
    }

    pub fn add_seconds(self, seconds: f64) -> Self {
        self.add_days(seconds / SECONDS_PER_DAY)
    }

    /// Signed seconds from `earlier` to `self`.
    pub fn seconds_since(self, earlier: Instant) -> f64 {
        (self.jd_ut - earlier.jd_ut) * SECONDS_PER_DAY
    }

    /// Midpoint between two instants.
    pub fn midpoint(self, other: Instant) -> Self {
        Self {
            jd_ut: 0.5 * (self.jd_ut + other.jd_ut),
        }
    }

    /// Total order on the underlying Julian Day.
    pub fn total_cmp(&self, other: &Instant) -> std::cmp::Ordering {
        self.jd_ut.total_cmp(&other.jd_ut)
    }
}

impl TryFrom<f64> for Instant {
    type Error = TimeError;

    fn try_from(jd_ut: f64) -> Result<Self, Self::Error> {
        Self::from_jd_ut(jd_ut)
    }
}

impl From<Instant> for f64 {
    fn from(instant: Instant) -> Self {
        instant.jd_ut
    }
}

impl std::fmt::Display for Instant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.to_utc().fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::julian::J2000_JD;
    use chrono::TimeZone;

    #[test]
    fn rejects_nan_and_infinity() {
        assert!(matches!(
            Instant::from_jd_ut(f64::NAN),
            Err(TimeError::InvalidInstant(_))
        ));
        assert!(Instant::from_jd_ut(f64::INFINITY).is_err());
    }

    #[test]
    fn deserialize_rejects_non_finite() {
        let ok: Instant = serde_json::from_str("2451545.0").unwrap();
        assert_eq!(ok.jd_ut(), J2000_JD);
        assert_eq!(serde_json::to_string(&ok).unwrap(), "2451545.0");

        #[derive(serde::Deserialize)]
        struct Stamped {
            at: Instant,
        }
        let err = toml::from_str::<Stamped>("at = nan").err().unwrap();
        assert!(err.to_string().contains("not finite"), "{err}");
    }

    #[test]
    fn datetime_roundtrip() {
        let dt = Utc.with_ymd_and_hms(2025, 1, 14, 3, 30, 0).single().unwrap();
        let instant = Instant::from_datetime(&dt);
        assert_eq!(instant.to_datetime().unwrap(), dt);
    }

    #[test]
    fn unix_epoch_is_known_jd() {
        let dt = Utc.with_ymd_and_hms(1970, 1, 1, 0, 0, 0).single().unwrap();
        assert_eq!(Instant::from_datetime(&dt).jd_ut(), UNIX_EPOCH_JD);
    }

    #[test]
    fn minute_arithmetic() {
        let a = Instant::from_jd_ut(2_460_000.5).unwrap();
        let b = a.add_minutes(90.0);
        assert!((b.seconds_since(a) - 5400.0).abs() < 1e-4);
    }

    #[test]
    fn from_utc_validates() {
        assert!(Instant::from_utc(&UtcTime::new(2025, 13, 1, 0, 0, 0.0)).is_err());
        let i = Instant::from_utc(&UtcTime::new(2000, 1, 1, 12, 0, 0.0)).unwrap();
        assert_eq!(i.jd_ut(), 2_451_545.0);
    }

    #[test]
    fn ordering_follows_jd() {
        let a = Instant::from_jd_ut(10.0).unwrap();
        let b = Instant::from_jd_ut(11.0).unwrap();
        assert!(a < b);
        assert_eq!(a.total_cmp(&b), std::cmp::Ordering::Less);
        assert!((a.midpoint(b).jd_ut() - 10.5).abs() < 1e-12);
    }
}
