//! The ephemeris contract consumed by the search and festival layers.

use panchang_base::{elongation, sidereal_longitude};
use panchang_time::Instant;

use crate::error::EphemerisError;
use crate::riseset_types::{GeoLocation, RiseSetEvent, RiseSetResult};

/// Source of Sun/Moon longitudes, ayanamsha and rise/set instants.
///
/// Longitudes are apparent geocentric ecliptic longitudes in degrees
/// `[0, 360)` in the tropical frame; all epochs are Julian Days in UT.
/// Implementations hold no mutable state, so one provider can be shared
/// across worker threads.
pub trait Ephemeris: Send + Sync {
    fn sun_longitude(&self, jd_ut: f64) -> Result<f64, EphemerisError>;

    fn moon_longitude(&self, jd_ut: f64) -> Result<f64, EphemerisError>;

    /// Ayanamsha in degrees (positive, tropical minus sidereal).
    fn ayanamsa(&self, jd_ut: f64) -> Result<f64, EphemerisError>;

    /// First `event` in `[day_start, day_start + 1 day)` at `location`.
    ///
    /// `day_start` is normally local midnight of the civil day in question.
    fn rise_set(
        &self,
        event: RiseSetEvent,
        day_start: Instant,
        location: &GeoLocation,
    ) -> Result<RiseSetResult, EphemerisError>;

    fn sun_sidereal_longitude(&self, jd_ut: f64) -> Result<f64, EphemerisError> {
        Ok(sidereal_longitude(self.sun_longitude(jd_ut)?, self.ayanamsa(jd_ut)?))
    }

    fn moon_sidereal_longitude(&self, jd_ut: f64) -> Result<f64, EphemerisError> {
        Ok(sidereal_longitude(self.moon_longitude(jd_ut)?, self.ayanamsa(jd_ut)?))
    }

    /// Moon minus Sun longitude in [0, 360). Frame-independent.
    fn elongation(&self, jd_ut: f64) -> Result<f64, EphemerisError> {
        Ok(elongation(self.moon_longitude(jd_ut)?, self.sun_longitude(jd_ut)?))
    }

    /// Sidereal Sun + Moon longitude sum in [0, 360).
    fn sidereal_sum(&self, jd_ut: f64) -> Result<f64, EphemerisError> {
        let aya = self.ayanamsa(jd_ut)?;
        let sun = sidereal_longitude(self.sun_longitude(jd_ut)?, aya);
        let moon = sidereal_longitude(self.moon_longitude(jd_ut)?, aya);
        Ok(panchang_time::normalize_360(sun + moon))
    }

    fn sunrise(
        &self,
        day_start: Instant,
        location: &GeoLocation,
    ) -> Result<Option<Instant>, EphemerisError> {
        Ok(self.rise_set(RiseSetEvent::Sunrise, day_start, location)?.instant())
    }

    fn sunset(
        &self,
        day_start: Instant,
        location: &GeoLocation,
    ) -> Result<Option<Instant>, EphemerisError> {
        Ok(self.rise_set(RiseSetEvent::Sunset, day_start, location)?.instant())
    }

    fn moonrise(
        &self,
        day_start: Instant,
        location: &GeoLocation,
    ) -> Result<Option<Instant>, EphemerisError> {
        Ok(self.rise_set(RiseSetEvent::Moonrise, day_start, location)?.instant())
    }

    fn moonset(
        &self,
        day_start: Instant,
        location: &GeoLocation,
    ) -> Result<Option<Instant>, EphemerisError> {
        Ok(self.rise_set(RiseSetEvent::Moonset, day_start, location)?.instant())
    }
}

impl<E: Ephemeris + ?Sized> Ephemeris for &E {
    fn sun_longitude(&self, jd_ut: f64) -> Result<f64, EphemerisError> {
        (**self).sun_longitude(jd_ut)
    }

    fn moon_longitude(&self, jd_ut: f64) -> Result<f64, EphemerisError> {
        (**self).moon_longitude(jd_ut)
    }

    fn ayanamsa(&self, jd_ut: f64) -> Result<f64, EphemerisError> {
        (**self).ayanamsa(jd_ut)
    }

    fn rise_set(
        &self,
        event: RiseSetEvent,
        day_start: Instant,
        location: &GeoLocation,
    ) -> Result<RiseSetResult, EphemerisError> {
        (**self).rise_set(event, day_start, location)
    }
}
