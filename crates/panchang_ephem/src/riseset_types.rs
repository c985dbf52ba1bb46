//! Types for sunrise/sunset and moonrise/moonset calculations.

use std::f64::consts::PI;

use panchang_time::Instant;
use serde::{Deserialize, Serialize};

use crate::error::EphemerisError;

/// Mean Earth radius in meters (IAU nominal, for geometric dip).
const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Geographic location on Earth's surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoLocation {
    /// Geodetic latitude in degrees, north positive. Range: [-90, 90].
    pub latitude_deg: f64,
    /// Geodetic longitude in degrees, east positive. Range: [-180, 180].
    pub longitude_deg: f64,
    /// Altitude above mean sea level in meters.
    #[serde(default)]
    pub altitude_m: f64,
}

impl GeoLocation {
    pub fn new(latitude_deg: f64, longitude_deg: f64, altitude_m: f64) -> Self {
        Self {
            latitude_deg,
            longitude_deg,
            altitude_m,
        }
    }

    /// Reject non-finite or out-of-range coordinates.
    pub fn validate(&self) -> Result<(), EphemerisError> {
        if !self.latitude_deg.is_finite() || !(-90.0..=90.0).contains(&self.latitude_deg) {
            return Err(EphemerisError::InvalidLocation(
                "latitude must be within [-90, 90]",
            ));
        }
        if !self.longitude_deg.is_finite() || !(-180.0..=180.0).contains(&self.longitude_deg) {
            return Err(EphemerisError::InvalidLocation(
                "longitude must be within [-180, 180]",
            ));
        }
        if !self.altitude_m.is_finite() {
            return Err(EphemerisError::InvalidLocation("altitude must be finite"));
        }
        Ok(())
    }

    pub fn latitude_rad(&self) -> f64 {
        self.latitude_deg.to_radians()
    }

    pub fn longitude_rad(&self) -> f64 {
        self.longitude_deg.to_radians()
    }
}

/// Rise/set event types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiseSetEvent {
    /// Upper limb of the Sun at the apparent horizon.
    Sunrise,
    Sunset,
    /// Upper limb of the Moon at the apparent horizon, parallax included.
    Moonrise,
    Moonset,
}

impl RiseSetEvent {
    /// Whether this is a rising event.
    pub fn is_rising(self) -> bool {
        matches!(self, Self::Sunrise | Self::Moonrise)
    }

    pub fn is_lunar(self) -> bool {
        matches!(self, Self::Moonrise | Self::Moonset)
    }
}

/// Configurable parameters for rise/set computation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiseSetConfig {
    /// Atmospheric refraction at the horizon in arcminutes. Default: 34.0.
    pub refraction_arcmin: f64,
    /// Solar angular semi-diameter in arcminutes. Default: 16.0.
    pub semidiameter_arcmin: f64,
    /// Apply geometric dip for observer altitude: dip = sqrt(2h/R) radians.
    pub altitude_correction: bool,
}

impl Default for RiseSetConfig {
    fn default() -> Self {
        Self {
            refraction_arcmin: 34.0,
            semidiameter_arcmin: 16.0,
            altitude_correction: true,
        }
    }
}

impl RiseSetConfig {
    /// Geometric dip of the horizon in degrees for an observer at `altitude_m`.
    pub fn dip_deg(&self, altitude_m: f64) -> f64 {
        if self.altitude_correction && altitude_m > 0.0 {
            (2.0 * altitude_m / EARTH_RADIUS_M).sqrt() * (180.0 / PI)
        } else {
            0.0
        }
    }

    /// Total horizon depression for sunrise/sunset in degrees.
    ///
    /// `h0 = (refraction + semidiameter) / 60 + dip_deg`
    pub fn horizon_depression_deg(&self, altitude_m: f64) -> f64 {
        (self.refraction_arcmin + self.semidiameter_arcmin) / 60.0 + self.dip_deg(altitude_m)
    }

    /// Geocentric altitude of the body's centre at the event, in degrees.
    ///
    /// For the Moon, `parallax_deg` is the horizontal parallax; the
    /// `0.7275 * parallax` term folds in semidiameter and parallax together.
    pub fn target_altitude_deg(
        &self,
        event: RiseSetEvent,
        parallax_deg: f64,
        altitude_m: f64,
    ) -> f64 {
        if event.is_lunar() {
            0.7275 * parallax_deg - self.refraction_arcmin / 60.0 - self.dip_deg(altitude_m)
        } else {
            -self.horizon_depression_deg(altitude_m)
        }
    }
}

/// Result of a rise/set computation for one civil day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum RiseSetResult {
    /// Event occurs at the given instant.
    Event {
        instant: Instant,
        event: RiseSetEvent,
    },
    /// Body stays below the horizon all day.
    NeverRises,
    /// Body stays above the horizon all day.
    NeverSets,
    /// Body crosses the horizon, but not in the requested direction this day.
    NoEventThisDay,
}

impl RiseSetResult {
    pub fn instant(&self) -> Option<Instant> {
        match self {
            Self::Event { instant, .. } => Some(*instant),
            _ => None,
        }
    }
}
