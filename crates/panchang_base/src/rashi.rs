//! Rashi (zodiac sign) and DMS (degrees-minutes-seconds) computation.
//!
//! The ecliptic circle is divided into 12 equal signs of 30 degrees each,
//! starting from Mesha (Aries) at 0 deg sidereal.

use panchang_time::normalize_360;
use serde::{Deserialize, Serialize};

/// Span of one rashi in degrees.
pub const RASHI_SPAN_DEG: f64 = 30.0;

/// The 12 rashis (zodiac signs) starting from Mesha (Aries).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rashi {
    Mesha,
    Vrishabha,
    Mithuna,
    Karka,
    Simha,
    Kanya,
    Tula,
    Vrischika,
    Dhanu,
    Makara,
    Kumbha,
    Meena,
}

/// All 12 rashis in order (0 = Mesha, 11 = Meena).
pub const ALL_RASHIS: [Rashi; 12] = [
    Rashi::Mesha,
    Rashi::Vrishabha,
    Rashi::Mithuna,
    Rashi::Karka,
    Rashi::Simha,
    Rashi::Kanya,
    Rashi::Tula,
    Rashi::Vrischika,
    Rashi::Dhanu,
    Rashi::Makara,
    Rashi::Kumbha,
    Rashi::Meena,
];

impl Rashi {
    /// Sanskrit name of the rashi.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Mesha => "Mesha",
            Self::Vrishabha => "Vrishabha",
            Self::Mithuna => "Mithuna",
            Self::Karka => "Karka",
            Self::Simha => "Simha",
            Self::Kanya => "Kanya",
            Self::Tula => "Tula",
            Self::Vrischika => "Vrischika",
            Self::Dhanu => "Dhanu",
            Self::Makara => "Makara",
            Self::Kumbha => "Kumbha",
            Self::Meena => "Meena",
        }
    }

    /// Western (English) name of the rashi.
    pub const fn western_name(self) -> &'static str {
        match self {
            Self::Mesha => "Aries",
            Self::Vrishabha => "Taurus",
            Self::Mithuna => "Gemini",
            Self::Karka => "Cancer",
            Self::Simha => "Leo",
            Self::Kanya => "Virgo",
            Self::Tula => "Libra",
            Self::Vrischika => "Scorpio",
            Self::Dhanu => "Sagittarius",
            Self::Makara => "Capricorn",
            Self::Kumbha => "Aquarius",
            Self::Meena => "Pisces",
        }
    }

    /// 0-based index (Mesha=0 .. Meena=11).
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Rashi for a 0-based index; `None` when `index > 11`.
    pub fn from_index(index: u8) -> Option<Self> {
        ALL_RASHIS.get(index as usize).copied()
    }

    /// Sidereal longitude where this rashi begins.
    pub fn start_deg(self) -> f64 {
        self.index() as f64 * RASHI_SPAN_DEG
    }

    pub const fn all() -> &'static [Rashi; 12] {
        &ALL_RASHIS
    }
}

/// Degrees-minutes-seconds representation of an angle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dms {
    pub degrees: u16,
    pub minutes: u8,
    pub seconds: f64,
}

/// Rashi position of a sidereal longitude.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RashiInfo {
    pub rashi: Rashi,
    /// 0-based rashi index (0 = Mesha).
    pub rashi_index: u8,
    /// Position within the rashi as DMS.
    pub dms: Dms,
    /// Decimal degrees within the rashi [0.0, 30.0).
    pub degrees_in_rashi: f64,
}

/// Convert decimal degrees to degrees-minutes-seconds.
///
/// Negative input is taken by absolute value.
pub fn deg_to_dms(deg: f64) -> Dms {
    let d = deg.abs();
    let degrees = d.floor() as u16;
    let remainder = (d - degrees as f64) * 60.0;
    let minutes = remainder.floor() as u8;
    let seconds = (remainder - minutes as f64) * 60.0;
    Dms {
        degrees,
        minutes,
        seconds,
    }
}

/// Convert DMS back to decimal degrees.
pub fn dms_to_deg(dms: &Dms) -> f64 {
    dms.degrees as f64 + dms.minutes as f64 / 60.0 + dms.seconds / 3600.0
}

/// Determine rashi from sidereal ecliptic longitude.
pub fn rashi_from_longitude(sidereal_lon_deg: f64) -> RashiInfo {
    let lon = normalize_360(sidereal_lon_deg);
    // Clamp to 11 in case of floating point edge
    let rashi_index = ((lon / RASHI_SPAN_DEG).floor() as u8).min(11);
    let degrees_in_rashi = lon - rashi_index as f64 * RASHI_SPAN_DEG;
    RashiInfo {
        rashi: ALL_RASHIS[rashi_index as usize],
        rashi_index,
        dms: deg_to_dms(degrees_in_rashi),
        degrees_in_rashi,
    }
}
