//! Self-contained analytic ephemeris.
//!
//! Sun from the Meeus low-precision theory, Moon from the truncated
//! ELP-2000/82 series, ΔT from the Espenak–Meeus polynomials and a four-term
//! nutation model. Needs no kernel files; accuracy is about 0.01 deg for the
//! Sun and 0.003 deg for the Moon, i.e. boundary instants to within minutes.

pub mod delta_t;
pub mod moon;
pub mod nutation;
pub mod riseset;
pub mod sidereal;
pub mod sun;

use panchang_base::{AyanamshaSystem, ayanamsha_mean_deg, ayanamsha_true_deg};
use panchang_time::{Instant, J2000_JD, normalize_360};

use crate::error::EphemerisError;
use crate::provider::Ephemeris;
use crate::riseset_types::{GeoLocation, RiseSetConfig, RiseSetEvent, RiseSetResult};

use self::delta_t::jd_ut_to_tt;
use self::moon::{MoonPosition, moon_position};
use self::nutation::{mean_obliquity_deg, nutation};
use self::sidereal::{altitude_deg, ecliptic_to_equatorial, gmst_deg};
use self::sun::{SunPosition, sun_position};

/// Earliest supported epoch: 0001-01-01.
pub const MIN_JD: f64 = 1_721_423.5;

/// Latest supported epoch: 3000-01-01.
pub const MAX_JD: f64 = 2_816_787.5;

/// Analytic Sun/Moon ephemeris with a configurable ayanamsha.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnalyticEphemeris {
    ayanamsha: AyanamshaSystem,
    use_nutation: bool,
    riseset: RiseSetConfig,
}

impl Default for AnalyticEphemeris {
    fn default() -> Self {
        Self::new(AyanamshaSystem::Lahiri)
    }
}

impl AnalyticEphemeris {
    pub fn new(ayanamsha: AyanamshaSystem) -> Self {
        Self {
            ayanamsha,
            use_nutation: true,
            riseset: RiseSetConfig::default(),
        }
    }

    /// Whether true-equinox ayanamsha systems include nutation in longitude.
    pub fn with_nutation(mut self, use_nutation: bool) -> Self {
        self.use_nutation = use_nutation;
        self
    }

    pub fn with_riseset_config(mut self, riseset: RiseSetConfig) -> Self {
        self.riseset = riseset;
        self
    }

    pub fn ayanamsha_system(&self) -> AyanamshaSystem {
        self.ayanamsha
    }

    pub fn riseset_config(&self) -> &RiseSetConfig {
        &self.riseset
    }

    /// Julian centuries (TT) since J2000.0 for a UT epoch, range-checked.
    fn centuries_tt(jd_ut: f64) -> Result<f64, EphemerisError> {
        if !jd_ut.is_finite() || !(MIN_JD..=MAX_JD).contains(&jd_ut) {
            return Err(EphemerisError::InvalidEpoch(jd_ut));
        }
        Ok((jd_ut_to_tt(jd_ut) - J2000_JD) / 36_525.0)
    }

    /// Sun position at a UT epoch.
    pub fn sun_position_at(&self, jd_ut: f64) -> Result<SunPosition, EphemerisError> {
        Ok(sun_position(Self::centuries_tt(jd_ut)?))
    }

    /// Moon position at a UT epoch, longitude corrected for nutation.
    pub fn moon_position_at(&self, jd_ut: f64) -> Result<MoonPosition, EphemerisError> {
        let t = Self::centuries_tt(jd_ut)?;
        let mut pos = moon_position(t);
        pos.longitude_deg = normalize_360(pos.longitude_deg + nutation(t).delta_psi_arcsec / 3600.0);
        Ok(pos)
    }

    /// Altitude of the body above its event target altitude, degrees.
    fn altitude_above_target(
        &self,
        event: RiseSetEvent,
        jd_ut: f64,
        location: &GeoLocation,
    ) -> Result<f64, EphemerisError> {
        let t = Self::centuries_tt(jd_ut)?;
        let nut = nutation(t);
        let eps = mean_obliquity_deg(t) + nut.delta_eps_arcsec / 3600.0;
        // apparent sidereal time: equation of the equinoxes added to GMST
        let lst = gmst_deg(jd_ut)
            + nut.delta_psi_arcsec / 3600.0 * eps.to_radians().cos()
            + location.longitude_deg;

        let (lon, lat, parallax) = if event.is_lunar() {
            let m = moon_position(t);
            (
                m.longitude_deg + nut.delta_psi_arcsec / 3600.0,
                m.latitude_deg,
                m.parallax_deg(),
            )
        } else {
            (sun_position(t).apparent_longitude_deg, 0.0, 0.0)
        };

        let (ra, dec) = ecliptic_to_equatorial(lon, lat, eps);
        let h = altitude_deg(lst, ra, dec, location.latitude_rad());
        let h0 = self
            .riseset
            .target_altitude_deg(event, parallax, location.altitude_m);
        Ok(h - h0)
    }
}

impl Ephemeris for AnalyticEphemeris {
    fn sun_longitude(&self, jd_ut: f64) -> Result<f64, EphemerisError> {
        Ok(self.sun_position_at(jd_ut)?.apparent_longitude_deg)
    }

    fn moon_longitude(&self, jd_ut: f64) -> Result<f64, EphemerisError> {
        Ok(self.moon_position_at(jd_ut)?.longitude_deg)
    }

    fn ayanamsa(&self, jd_ut: f64) -> Result<f64, EphemerisError> {
        let t = Self::centuries_tt(jd_ut)?;
        if self.use_nutation {
            Ok(ayanamsha_true_deg(
                self.ayanamsha,
                t,
                nutation(t).delta_psi_arcsec,
            ))
        } else {
            Ok(ayanamsha_mean_deg(self.ayanamsha, t))
        }
    }

    fn rise_set(
        &self,
        event: RiseSetEvent,
        day_start: Instant,
        location: &GeoLocation,
    ) -> Result<RiseSetResult, EphemerisError> {
        location.validate()?;
        Self::centuries_tt(day_start.jd_ut())?;
        let h = |jd: f64| self.altitude_above_target(event, jd, location);
        let result = riseset::scan_rise_set(&h, event, day_start)?;
        if result.instant().is_none() {
            tracing::debug!(?event, %day_start, ?result, "no rise/set event in day window");
        }
        Ok(result)
    }
}
