//! Julian Day ↔ Gregorian calendar conversions.
//!
//! Standard algorithm from Meeus, _Astronomical Algorithms_ ch. 7, applied
//! as the proleptic Gregorian calendar in both directions (the calendar
//! chrono uses). The day argument carries the time of day as a fraction, so
//! `15.5` is noon on the 15th.

/// Julian Day of the J2000.0 epoch (2000-01-01 12:00 TT).
pub const J2000_JD: f64 = 2_451_545.0;

/// Julian Day of the Unix epoch (1970-01-01 00:00 UTC).
pub const UNIX_EPOCH_JD: f64 = 2_440_587.5;

/// SI seconds in one day.
pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// Minutes in one day.
pub const MINUTES_PER_DAY: f64 = 1_440.0;

/// Convert a Gregorian calendar date to a Julian Day.
///
/// `day` may carry a fractional part for the time of day.
pub fn calendar_to_jd(year: i32, month: u32, day: f64) -> f64 {
    let (y, m) = if month <= 2 {
        (year as f64 - 1.0, month as f64 + 12.0)
    } else {
        (year as f64, month as f64)
    };
    let a = (y / 100.0).floor();
    let b = 2.0 - a + (a / 4.0).floor();
    (365.25 * (y + 4716.0)).floor() + (30.6001 * (m + 1.0)).floor() + day + b - 1524.5
}

/// Convert a Julian Day to `(year, month, day_with_fraction)`.
///
/// Dates before 1582-10-15 stay proleptic Gregorian, so this is the exact
/// inverse of [`calendar_to_jd`].
pub fn jd_to_calendar(jd: f64) -> (i32, u32, f64) {
    let shifted = jd + 0.5;
    let z = shifted.floor();
    let f = shifted - z;
    let alpha = ((z - 1_867_216.25) / 36_524.25).floor();
    let a = z + 1.0 + alpha - (alpha / 4.0).floor();
    let b = a + 1524.0;
    let c = ((b - 122.1) / 365.25).floor();
    let d = (365.25 * c).floor();
    let e = ((b - d) / 30.6001).floor();

    let day = b - d - (30.6001 * e).floor() + f;
    let month = if e < 14.0 { e - 1.0 } else { e - 13.0 };
    let year = if month > 2.0 { c - 4716.0 } else { c - 4715.0 };
    (year as i32, month as u32, day)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn j2000_epoch() {
        assert_eq!(calendar_to_jd(2000, 1, 1.5), J2000_JD);
    }

    #[test]
    fn unix_epoch() {
        assert_eq!(calendar_to_jd(1970, 1, 1.0), UNIX_EPOCH_JD);
    }

    #[test]
    fn meeus_example_7a() {
        // Sputnik launch, 1957 Oct 4.81
        let jd = calendar_to_jd(1957, 10, 4.81);
        assert!((jd - 2_436_116.31).abs() < 1e-9, "jd = {jd}");
    }

    #[test]
    fn january_and_february_use_previous_year() {
        let jd = calendar_to_jd(2024, 2, 29.0);
        let (y, m, d) = jd_to_calendar(jd);
        assert_eq!((y, m), (2024, 2));
        assert!((d - 29.0).abs() < 1e-9);
    }

    #[test]
    fn inverse_meeus_example_7c() {
        let (y, m, d) = jd_to_calendar(2_436_116.31);
        assert_eq!((y, m), (1957, 10));
        assert!((d - 4.81).abs() < 1e-6, "day = {d}");
    }

    #[test]
    fn inverse_noon_fraction() {
        let (y, m, d) = jd_to_calendar(J2000_JD);
        assert_eq!((y, m), (2000, 1));
        assert!((d - 1.5).abs() < 1e-12);
    }

    #[test]
    fn pre_reform_dates_are_proleptic_gregorian() {
        // the Julian calendar names this day 1000-01-01
        let (y, m, d) = jd_to_calendar(2_086_308.0);
        assert_eq!((y, m), (1000, 1));
        assert!((d - 6.5).abs() < 1e-9, "day = {d}");
        assert_eq!(calendar_to_jd(y, m, d), 2_086_308.0);
    }

    #[test]
    fn first_gregorian_year() {
        assert_eq!(calendar_to_jd(1, 1, 1.0), 1_721_425.5);
        let (y, m, d) = jd_to_calendar(1_721_424.0);
        assert_eq!(calendar_to_jd(y, m, d), 1_721_424.0);
    }

    #[test]
    fn year_end_rollover() {
        let jd = calendar_to_jd(2024, 12, 31.999);
        let (y, m, _) = jd_to_calendar(jd + 0.002);
        assert_eq!((y, m), (2025, 1));
    }
}
