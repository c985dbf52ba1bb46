//! Types for panchang classification results.

use panchang_base::{Karana, Masa, Nakshatra, Paksha, Rashi, Tithi, Yoga};
use panchang_time::Instant;
use serde::Serialize;

/// Tithi (lunar day) classification result with start/end times.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TithiInfo {
    /// The tithi.
    pub tithi: Tithi,
    /// 0-based tithi index (0..29).
    pub tithi_index: u8,
    /// Paksha (Shukla or Krishna).
    pub paksha: Paksha,
    /// 1-based tithi number within the paksha (1-15).
    pub tithi_in_paksha: u8,
    /// Start of this tithi.
    pub start: Instant,
    /// End of this tithi.
    pub end: Instant,
}

/// Karana (half-tithi) classification result with start/end times.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct KaranaInfo {
    /// The karana name.
    pub karana: Karana,
    /// 0-based karana sequence index within the synodic month (0..59).
    pub karana_index: u8,
    pub start: Instant,
    pub end: Instant,
}

/// Yoga (luni-solar yoga) classification result with start/end times.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct YogaInfo {
    pub yoga: Yoga,
    /// 0-based yoga index (0..26).
    pub yoga_index: u8,
    pub start: Instant,
    pub end: Instant,
}

/// Moon's nakshatra classification result with start/end times.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PanchangNakshatraInfo {
    pub nakshatra: Nakshatra,
    /// 0-based nakshatra index (0=Ashwini .. 26=Revati).
    pub nakshatra_index: u8,
    /// Pada (quarter) within the nakshatra, 1-4.
    pub pada: u8,
    pub start: Instant,
    pub end: Instant,
}

/// Masa (lunar month) classification result.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MasaInfo {
    /// The masa (lunar month).
    pub masa: Masa,
    /// Whether this is an adhika (intercalary) month.
    pub adhika: bool,
    /// Start of the masa (previous new moon).
    pub start: Instant,
    /// End of the masa (next new moon).
    pub end: Instant,
}

/// Combined panchang for a single instant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PanchangInfo {
    /// Evaluation instant.
    pub instant: Instant,
    /// Sidereal Sun longitude, degrees.
    pub sun_sidereal_deg: f64,
    /// Sidereal Moon longitude, degrees.
    pub moon_sidereal_deg: f64,
    /// Sun's sidereal rashi.
    pub sun_rashi: Rashi,
    /// Moon's sidereal rashi.
    pub moon_rashi: Rashi,
    pub tithi: TithiInfo,
    pub karana: KaranaInfo,
    pub yoga: YogaInfo,
    pub nakshatra: PanchangNakshatraInfo,
    pub masa: MasaInfo,
}
