//! UTC calendar date/time with sub-second precision.
//!
//! `UtcTime` is the civil tuple the engine converts Julian Days to and from.
//! It carries no zone: local wall-clock values go through
//! [`TimeZoneSpec`](crate::TimeZoneSpec).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::TimeError;
use crate::julian::{SECONDS_PER_DAY, calendar_to_jd, jd_to_calendar};

const MILLIS_PER_DAY: i64 = 86_400_000;

/// UTC calendar date with sub-second precision.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UtcTime {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub second: f64,
}

impl UtcTime {
    pub fn new(year: i32, month: u32, day: u32, hour: u32, minute: u32, second: f64) -> Self {
        Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
        }
    }

    /// Check that the fields name a real Gregorian date and time of day.
    pub fn validate(&self) -> Result<(), TimeError> {
        if NaiveDate::from_ymd_opt(self.year, self.month, self.day).is_none() {
            return Err(TimeError::InvalidCivil(format!(
                "{:04}-{:02}-{:02} is not a calendar date",
                self.year, self.month, self.day
            )));
        }
        if self.hour > 23 || self.minute > 59 || !(0.0..60.0).contains(&self.second) {
            return Err(TimeError::InvalidCivil(format!(
                "{:02}:{:02}:{} is not a time of day",
                self.hour, self.minute, self.second
            )));
        }
        Ok(())
    }

    /// Day of month with the time of day as a fraction.
    pub fn day_fraction(&self) -> f64 {
        self.day as f64
            + self.hour as f64 / 24.0
            + self.minute as f64 / 1440.0
            + self.second / SECONDS_PER_DAY
    }

    /// Convert to a Julian Day (UT).
    pub fn to_jd(&self) -> f64 {
        calendar_to_jd(self.year, self.month, self.day_fraction())
    }

    /// Convert a Julian Day (UT) back to a UTC calendar tuple.
    ///
    /// The time of day is rounded to the millisecond before it is split, so
    /// an instant a few ulps short of a whole minute lands on that minute.
    pub fn from_jd(jd: f64) -> Self {
        let (mut year, mut month, day_frac) = jd_to_calendar(jd);
        let mut day = day_frac.floor() as u32;
        let mut millis = (day_frac.fract() * MILLIS_PER_DAY as f64).round() as i64;
        if millis >= MILLIS_PER_DAY {
            // rounded up to midnight: take the date from mid next day
            let (y, m, d) = jd_to_calendar(jd + 0.5);
            (year, month, day) = (y, m, d.floor() as u32);
            millis -= MILLIS_PER_DAY;
        }
        let hour = (millis / 3_600_000) as u32;
        let minute = (millis / 60_000 % 60) as u32;
        let second = (millis % 60_000) as f64 / 1e3;
        Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
        }
    }

    /// Calendar date part.
    pub fn date(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, self.day)
    }
}

impl std::fmt::Display for UtcTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let whole = self.second as u32;
        let frac = self.second - whole as f64;
        if frac.abs() < 1e-9 {
            write!(
                f,
                "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}Z",
                self.year, self.month, self.day, self.hour, self.minute, whole
            )
        } else {
            write!(
                f,
                "{:04}-{:02}-{:02}T{:02}:{:02}:{:09.6}Z",
                self.year, self.month, self.day, self.hour, self.minute, self.second
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_constructor() {
        let t = UtcTime::new(2024, 3, 20, 12, 30, 45.5);
        assert_eq!(t.year, 2024);
        assert_eq!(t.month, 3);
        assert_eq!(t.day, 20);
        assert_eq!(t.hour, 12);
        assert_eq!(t.minute, 30);
        assert!((t.second - 45.5).abs() < 1e-12);
    }

    #[test]
    fn jd_roundtrip_within_a_second() {
        let t = UtcTime::new(2025, 1, 14, 3, 25, 17.25);
        let back = UtcTime::from_jd(t.to_jd());
        assert_eq!((back.year, back.month, back.day), (2025, 1, 14));
        assert_eq!((back.hour, back.minute), (3, 25));
        assert!((back.second - 17.25).abs() < 1e-3, "second = {}", back.second);
    }

    #[test]
    fn whole_quarter_hours_survive_the_roundtrip() {
        for q in 0..96u32 {
            let t = UtcTime::new(2024, 7, 1, q / 4, (q % 4) * 15, 0.0);
            let back = UtcTime::from_jd(t.to_jd());
            assert_eq!(
                (back.day, back.hour, back.minute),
                (1, q / 4, (q % 4) * 15),
                "{back}"
            );
            assert_eq!(back.second, 0.0, "{back}");
        }
    }

    #[test]
    fn rounding_carries_into_the_next_day() {
        let midnight = UtcTime::new(2024, 12, 31, 0, 0, 0.0).to_jd() + 1.0;
        let just_before = f64::from_bits(midnight.to_bits() - 1);
        let back = UtcTime::from_jd(just_before);
        assert_eq!((back.year, back.month, back.day), (2025, 1, 1));
        assert_eq!((back.hour, back.minute, back.second), (0, 0, 0.0));
    }

    #[test]
    fn rejects_invalid_date() {
        let t = UtcTime::new(2023, 2, 29, 0, 0, 0.0);
        assert!(matches!(t.validate(), Err(TimeError::InvalidCivil(_))));
    }

    #[test]
    fn rejects_invalid_time() {
        let t = UtcTime::new(2024, 2, 29, 24, 0, 0.0);
        assert!(t.validate().is_err());
        let t = UtcTime::new(2024, 2, 29, 23, 59, 60.0);
        assert!(t.validate().is_err());
    }

    #[test]
    fn display_whole_seconds() {
        let t = UtcTime::new(2024, 1, 15, 0, 0, 0.0);
        assert_eq!(t.to_string(), "2024-01-15T00:00:00Z");
    }

    #[test]
    fn display_fractional_seconds() {
        let t = UtcTime::new(2024, 1, 15, 12, 30, 45.123);
        let s = t.to_string();
        assert!(s.contains("12:30:"), "got: {s}");
    }
}
