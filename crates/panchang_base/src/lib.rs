//! Pure panchang classification from longitudes.
//!
//! This crate provides:
//! - Ayanamsha for the common sidereal reference systems
//! - Rashi, nakshatra (27-scheme with padas) and yoga lookup
//! - Tithi, paksha and karana from Moon-Sun elongation
//! - Amanta masa naming with adhika detection
//!
//! Nothing here touches an ephemeris; callers pass longitudes in degrees.

pub mod ayanamsha;
pub mod karana;
pub mod masa;
pub mod nakshatra;
pub mod rashi;
pub mod tithi;
pub mod yoga;

pub use ayanamsha::{
    AyanamshaSystem, ayanamsha_mean_deg, ayanamsha_true_deg, general_precession_longitude_deg,
};
pub use karana::{KARANA_SEGMENT_DEG, Karana, KaranaPosition, karana_from_elongation};
pub use masa::{ALL_MASAS, Masa, masa_for_lunation, masa_from_rashi_index};
pub use nakshatra::{
    ALL_NAKSHATRAS_27, NAKSHATRA_SPAN_27, Nakshatra, NakshatraInfo, PADA_SPAN,
    nakshatra_from_longitude,
};
pub use rashi::{
    ALL_RASHIS, Dms, RASHI_SPAN_DEG, Rashi, RashiInfo, deg_to_dms, dms_to_deg,
    rashi_from_longitude,
};
pub use tithi::{
    Paksha, TITHI_COUNT, TITHI_SEGMENT_DEG, Tithi, TithiPosition, tithi_from_elongation,
};
pub use yoga::{ALL_YOGAS, YOGA_SEGMENT_DEG, Yoga, YogaPosition, yoga_from_sum};

use panchang_time::normalize_360;

/// Sidereal longitude from a tropical longitude and an ayanamsha.
///
/// The ayanamsha is a positive westward offset, so it is subtracted.
pub fn sidereal_longitude(tropical_deg: f64, ayanamsha_deg: f64) -> f64 {
    normalize_360(tropical_deg - ayanamsha_deg)
}

/// Moon-Sun elongation in [0, 360). The ayanamsha cancels, so either frame works.
pub fn elongation(moon_deg: f64, sun_deg: f64) -> f64 {
    normalize_360(moon_deg - sun_deg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sidereal_subtracts_ayanamsha() {
        assert!((sidereal_longitude(280.5, 23.853) - 256.647).abs() < 1e-9);
        assert!((sidereal_longitude(10.0, 24.0) - 346.0).abs() < 1e-9);
    }

    #[test]
    fn elongation_wraps() {
        assert!((elongation(5.0, 355.0) - 10.0).abs() < 1e-12);
    }
}
