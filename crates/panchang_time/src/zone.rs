//! Explicit timezone resolution for local wall-clock values.
//!
//! A zone is either a fixed UTC offset or an IANA zone. IANA offsets are
//! always resolved at the date in question, so a festival in July gets the
//! summer offset even when computed in January.

use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime, Offset};
use chrono_tz::Tz;

use crate::error::TimeError;
use crate::instant::Instant;
use crate::julian::{MINUTES_PER_DAY, calendar_to_jd};
use crate::utc_time::UtcTime;

/// Timezone used to interpret and produce civil dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeZoneSpec {
    /// Fixed offset east of UTC, in minutes.
    Offset { minutes: i32 },
    /// IANA zone; offset looked up per instant.
    Iana(Tz),
}

impl TimeZoneSpec {
    pub const UTC: TimeZoneSpec = TimeZoneSpec::Offset { minutes: 0 };

    /// Fixed offset east of UTC.
    pub fn fixed(minutes: i32) -> Self {
        Self::Offset { minutes }
    }

    /// IANA zone by name, e.g. `Asia/Calcutta`.
    pub fn iana(name: &str) -> Result<Self, TimeError> {
        name.parse::<Tz>()
            .map(Self::Iana)
            .map_err(|_| TimeError::UnknownZone(name.to_string()))
    }

    /// UTC offset in minutes in effect at `instant`.
    ///
    /// For IANA zones the instant is rendered in the zone and the offset read
    /// back from the result.
    pub fn offset_minutes_at(&self, instant: Instant) -> Result<i32, TimeError> {
        match self {
            Self::Offset { minutes } => Ok(*minutes),
            Self::Iana(tz) => {
                let local = instant.to_datetime()?.with_timezone(tz);
                Ok(local.offset().fix().local_minus_utc() / 60)
            }
        }
    }

    /// UTC instant of the given local wall-clock fields.
    ///
    /// For IANA zones the wall clock is first read as if it were UTC to get a
    /// sample offset, then the offset is re-checked at the corrected guess.
    /// In a spring-forward gap this yields the post-transition reading; in a
    /// fall-back overlap, the earlier of the two.
    pub fn local_instant(
        &self,
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: f64,
    ) -> Result<Instant, TimeError> {
        let wall = UtcTime::new(year, month, day, hour, minute, second);
        wall.validate()?;
        let wall_jd = calendar_to_jd(year, month, wall.day_fraction());

        match self {
            Self::Offset { minutes } => {
                Instant::from_jd_ut(wall_jd - f64::from(*minutes) / MINUTES_PER_DAY)
            }
            Self::Iana(_) => {
                let sample = Instant::from_jd_ut(wall_jd)?;
                let first = self.offset_minutes_at(sample)?;
                let guess = Instant::from_jd_ut(wall_jd - f64::from(first) / MINUTES_PER_DAY)?;
                let second_offset = self.offset_minutes_at(guess)?;
                if second_offset == first {
                    Ok(guess)
                } else {
                    let corrected =
                        Instant::from_jd_ut(wall_jd - f64::from(second_offset) / MINUTES_PER_DAY)?;
                    // In a gap neither reading round-trips; keep the shifted guess.
                    if self.offset_minutes_at(corrected)? == second_offset {
                        Ok(corrected)
                    } else {
                        Ok(guess)
                    }
                }
            }
        }
    }

    /// Local wall-clock time of `instant`.
    pub fn local_datetime(&self, instant: Instant) -> Result<NaiveDateTime, TimeError> {
        let offset = self.offset_minutes_at(instant)?;
        let shifted = instant.add_minutes(f64::from(offset));
        Ok(shifted.to_datetime()?.naive_utc())
    }

    /// Local civil date of `instant`.
    pub fn local_date(&self, instant: Instant) -> Result<NaiveDate, TimeError> {
        Ok(self.local_datetime(instant)?.date())
    }

    /// Instant of local midnight starting `date`.
    pub fn day_start(&self, date: NaiveDate) -> Result<Instant, TimeError> {
        use chrono::Datelike;
        self.local_instant(date.year(), date.month(), date.day(), 0, 0, 0.0)
    }

    /// Half-open `[start, end)` instants covering local civil `date`.
    pub fn day_bounds(&self, date: NaiveDate) -> Result<(Instant, Instant), TimeError> {
        let start = self.day_start(date)?;
        let next = date
            .succ_opt()
            .ok_or_else(|| TimeError::InvalidCivil(format!("no day after {date}")))?;
        Ok((start, self.day_start(next)?))
    }
}

impl Default for TimeZoneSpec {
    fn default() -> Self {
        Self::UTC
    }
}

/// Parse `±HH:MM`, `±HHMM` or `±HH`.
fn parse_clock_offset(s: &str) -> Option<i32> {
    let (sign, rest) = match s.as_bytes().first()? {
        b'+' => (1, &s[1..]),
        b'-' => (-1, &s[1..]),
        _ => return None,
    };
    let digits: String = rest.chars().filter(|c| *c != ':').collect();
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let (hh, mm) = match digits.len() {
        1 | 2 => (digits.parse::<i32>().ok()?, 0),
        4 => (digits[..2].parse::<i32>().ok()?, digits[2..].parse::<i32>().ok()?),
        _ => return None,
    };
    if hh > 14 || mm > 59 {
        return None;
    }
    Some(sign * (hh * 60 + mm))
}

impl FromStr for TimeZoneSpec {
    type Err = TimeError;

    /// Accepts `UTC`/`Z`, `±HH:MM`, signed minutes (`330`), or an IANA name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("utc") || s == "Z" {
            return Ok(Self::UTC);
        }
        if s.contains(':') || ((s.starts_with('+') || s.starts_with('-')) && s.len() <= 5) {
            if let Some(minutes) = parse_clock_offset(s) {
                return Ok(Self::fixed(minutes));
            }
        }
        if let Ok(minutes) = s.parse::<i32>() {
            if minutes.abs() <= 14 * 60 {
                return Ok(Self::fixed(minutes));
            }
            return Err(TimeError::UnknownZone(s.to_string()));
        }
        Self::iana(s)
    }
}

impl std::fmt::Display for TimeZoneSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Offset { minutes } => {
                let sign = if *minutes < 0 { '-' } else { '+' };
                let abs = minutes.abs();
                write!(f, "{sign}{:02}:{:02}", abs / 60, abs % 60)
            }
            Self::Iana(tz) => write!(f, "{}", tz.name()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    #[test]
    fn fixed_offset_shifts_wall_clock() {
        let ist = TimeZoneSpec::fixed(330);
        let i = ist.local_instant(2025, 1, 14, 5, 30, 0.0).unwrap();
        let utc = i.to_utc();
        assert_eq!((utc.day, utc.hour, utc.minute), (14, 0, 0));
    }

    #[test]
    fn parse_forms() {
        assert_eq!("UTC".parse::<TimeZoneSpec>().unwrap(), TimeZoneSpec::UTC);
        assert_eq!("+05:30".parse::<TimeZoneSpec>().unwrap(), TimeZoneSpec::fixed(330));
        assert_eq!("-0400".parse::<TimeZoneSpec>().unwrap(), TimeZoneSpec::fixed(-240));
        assert_eq!("330".parse::<TimeZoneSpec>().unwrap(), TimeZoneSpec::fixed(330));
        assert!(matches!(
            "Asia/Calcutta".parse::<TimeZoneSpec>().unwrap(),
            TimeZoneSpec::Iana(_)
        ));
        assert!(matches!(
            "Mars/Olympus".parse::<TimeZoneSpec>(),
            Err(TimeError::UnknownZone(_))
        ));
    }

    #[test]
    fn display_offsets() {
        assert_eq!(TimeZoneSpec::fixed(330).to_string(), "+05:30");
        assert_eq!(TimeZoneSpec::fixed(-150).to_string(), "-02:30");
    }

    #[test]
    fn local_date_crosses_midnight() {
        let ist = TimeZoneSpec::fixed(330);
        // 20:00 UTC on Jan 13 is 01:30 IST on Jan 14
        let i = Instant::from_utc(&UtcTime::new(2025, 1, 13, 20, 0, 0.0)).unwrap();
        let dt = ist.local_datetime(i).unwrap();
        assert_eq!(dt.date(), NaiveDate::from_ymd_opt(2025, 1, 14).unwrap());
        assert_eq!((dt.hour(), dt.minute()), (1, 30));
    }

    #[test]
    fn day_bounds_are_one_day_apart_without_dst() {
        let ist = TimeZoneSpec::fixed(330);
        let d = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        let (a, b) = ist.day_bounds(d).unwrap();
        assert!((b.seconds_since(a) - 86_400.0).abs() < 1e-3);
    }
}
