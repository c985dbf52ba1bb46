//! Uniform-motion ephemeris.
//!
//! Sun and Moon advance at constant mean rates from an epoch, the ayanamsha
//! is constant, and the Sun rises and sets at fixed hours after the start of
//! each civil day. Every boundary is therefore known in closed form, which
//! makes this provider the reference for deterministic tests and benches.

use panchang_time::{Instant, J2000_JD, normalize_360};

use crate::error::EphemerisError;
use crate::provider::Ephemeris;
use crate::riseset_types::{GeoLocation, RiseSetEvent, RiseSetResult};

/// Mean tropical-year solar motion, deg/day.
pub const SUN_MEAN_RATE: f64 = 360.0 / 365.2422;

/// Mean tropical-month lunar motion, deg/day.
pub const MOON_MEAN_RATE: f64 = 360.0 / 27.321_582;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearEphemeris {
    /// Epoch (JD UT) at which the longitudes below hold.
    pub epoch_jd: f64,
    /// Tropical Sun longitude at the epoch, degrees.
    pub sun_at_epoch_deg: f64,
    /// Tropical Moon longitude at the epoch, degrees.
    pub moon_at_epoch_deg: f64,
    pub sun_rate_deg_per_day: f64,
    pub moon_rate_deg_per_day: f64,
    /// Constant ayanamsha, degrees.
    pub ayanamsa_deg: f64,
    /// Sunrise, hours after the civil day start.
    pub sunrise_hours: f64,
    /// Sunset, hours after the civil day start.
    pub sunset_hours: f64,
}

impl Default for LinearEphemeris {
    /// J2000.0 mean longitudes with a Lahiri-like ayanamsha.
    fn default() -> Self {
        Self {
            epoch_jd: J2000_JD,
            sun_at_epoch_deg: 280.46646,
            moon_at_epoch_deg: 218.31645,
            sun_rate_deg_per_day: SUN_MEAN_RATE,
            moon_rate_deg_per_day: MOON_MEAN_RATE,
            ayanamsa_deg: 23.853,
            sunrise_hours: 6.0,
            sunset_hours: 18.0,
        }
    }
}

impl LinearEphemeris {
    /// Provider with a new moon at `jd` and the Sun at tropical `sun_deg`.
    pub fn with_new_moon_at(jd: f64, sun_deg: f64) -> Self {
        Self {
            epoch_jd: jd,
            sun_at_epoch_deg: sun_deg,
            moon_at_epoch_deg: sun_deg,
            ..Self::default()
        }
    }

    pub fn with_ayanamsa(mut self, ayanamsa_deg: f64) -> Self {
        self.ayanamsa_deg = ayanamsa_deg;
        self
    }

    pub fn with_day_hours(mut self, sunrise_hours: f64, sunset_hours: f64) -> Self {
        self.sunrise_hours = sunrise_hours;
        self.sunset_hours = sunset_hours;
        self
    }

    /// Elongation rate, deg/day.
    pub fn synodic_rate(&self) -> f64 {
        self.moon_rate_deg_per_day - self.sun_rate_deg_per_day
    }

    /// Exact JD at which the elongation next reaches `target_deg` at or after `jd`.
    pub fn next_elongation(&self, jd: f64, target_deg: f64) -> f64 {
        let e = self.elongation_unchecked(jd);
        let ahead = normalize_360(target_deg - e);
        jd + ahead / self.synodic_rate()
    }

    fn elongation_unchecked(&self, jd: f64) -> f64 {
        normalize_360(
            self.moon_at_epoch_deg - self.sun_at_epoch_deg
                + self.synodic_rate() * (jd - self.epoch_jd),
        )
    }

    fn check(jd: f64) -> Result<f64, EphemerisError> {
        if jd.is_finite() {
            Ok(jd)
        } else {
            Err(EphemerisError::InvalidEpoch(jd))
        }
    }
}

impl Ephemeris for LinearEphemeris {
    fn sun_longitude(&self, jd_ut: f64) -> Result<f64, EphemerisError> {
        let jd = Self::check(jd_ut)?;
        Ok(normalize_360(
            self.sun_at_epoch_deg + self.sun_rate_deg_per_day * (jd - self.epoch_jd),
        ))
    }

    fn moon_longitude(&self, jd_ut: f64) -> Result<f64, EphemerisError> {
        let jd = Self::check(jd_ut)?;
        Ok(normalize_360(
            self.moon_at_epoch_deg + self.moon_rate_deg_per_day * (jd - self.epoch_jd),
        ))
    }

    fn ayanamsa(&self, jd_ut: f64) -> Result<f64, EphemerisError> {
        Self::check(jd_ut)?;
        Ok(self.ayanamsa_deg)
    }

    /// Sun events at the configured hours; the Moon rises and sets later each
    /// day by the fraction of a turn the elongation has advanced.
    fn rise_set(
        &self,
        event: RiseSetEvent,
        day_start: Instant,
        location: &GeoLocation,
    ) -> Result<RiseSetResult, EphemerisError> {
        location.validate()?;
        let jd0 = Self::check(day_start.jd_ut())?;
        let lag = self.elongation_unchecked(jd0) / 360.0;
        let offset_days = match event {
            RiseSetEvent::Sunrise => self.sunrise_hours / 24.0,
            RiseSetEvent::Sunset => self.sunset_hours / 24.0,
            RiseSetEvent::Moonrise => (self.sunrise_hours / 24.0 + lag).fract(),
            RiseSetEvent::Moonset => (self.sunset_hours / 24.0 + lag).fract(),
        };
        Ok(RiseSetResult::Event {
            instant: day_start.add_days(offset_days),
            event,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loc() -> GeoLocation {
        GeoLocation::new(17.385, 78.4867, 0.0)
    }

    #[test]
    fn new_moon_has_zero_elongation() {
        let eph = LinearEphemeris::with_new_moon_at(2_460_000.5, 100.0);
        assert!(eph.elongation(2_460_000.5).unwrap().abs() < 1e-12);
    }

    #[test]
    fn synodic_month_length() {
        let eph = LinearEphemeris::default();
        let month = 360.0 / eph.synodic_rate();
        assert!((month - 29.5306).abs() < 0.001, "month = {month}");
    }

    #[test]
    fn next_elongation_is_exact() {
        let eph = LinearEphemeris::with_new_moon_at(2_460_000.5, 100.0);
        let jd = eph.next_elongation(2_460_000.5, 12.0);
        // one ulp of a modern JD is ~6e-9 deg of elongation
        let err = (eph.elongation(jd).unwrap() - 12.0).abs();
        assert!(err < 1e-7, "err = {err}");
        assert!((jd - 2_460_000.5 - 12.0 / eph.synodic_rate()).abs() < 1e-8);
    }

    #[test]
    fn sunrise_and_sunset_at_fixed_hours() {
        let eph = LinearEphemeris::default();
        let day = Instant::from_jd_ut(2_460_000.5).unwrap();
        let rise = eph.sunrise(day, &loc()).unwrap().unwrap();
        let set = eph.sunset(day, &loc()).unwrap().unwrap();
        assert!((rise.seconds_since(day) - 6.0 * 3600.0).abs() < 1e-3);
        assert!((set.seconds_since(day) - 18.0 * 3600.0).abs() < 1e-3);
    }

    #[test]
    fn moonrise_follows_sunrise_at_new_moon() {
        let eph = LinearEphemeris::with_new_moon_at(2_460_000.5, 100.0);
        let day = Instant::from_jd_ut(2_460_000.5).unwrap();
        let rise = eph.moonrise(day, &loc()).unwrap().unwrap();
        assert!((rise.seconds_since(day) - 6.0 * 3600.0).abs() < 1e-3);
    }

    #[test]
    fn sidereal_longitude_subtracts_constant() {
        let eph = LinearEphemeris::with_new_moon_at(2_460_000.5, 10.0).with_ayanamsa(24.0);
        let sid = eph.sun_sidereal_longitude(2_460_000.5).unwrap();
        assert!((sid - 346.0).abs() < 1e-9);
    }
}
