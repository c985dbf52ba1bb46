//! Tithi (lunar day) and paksha classification.
//!
//! The Moon-Sun elongation is split into 30 segments of 12 deg. Index 0 is
//! Shukla Pratipada, 14 is Purnima, 15 is Krishna Pratipada and 29 is
//! Amavasya.

use panchang_time::normalize_360;
use serde::{Deserialize, Serialize};

/// Elongation covered by one tithi.
pub const TITHI_SEGMENT_DEG: f64 = 12.0;

/// Number of tithis in a lunation.
pub const TITHI_COUNT: u8 = 30;

/// Lunar fortnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Paksha {
    /// Bright (waxing) fortnight, tithi index 0..=14.
    Shukla,
    /// Dark (waning) fortnight, tithi index 15..=29.
    Krishna,
}

impl Paksha {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Shukla => "Shukla",
            Self::Krishna => "Krishna",
        }
    }

    /// Paksha of a 0-based tithi index.
    pub const fn of_tithi_index(index: u8) -> Self {
        if index < 15 { Self::Shukla } else { Self::Krishna }
    }
}

/// Named tithi within a paksha.
///
/// The 15th tithi of the bright half is Purnima and of the dark half is
/// Amavasya; the other fourteen names repeat in both fortnights.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tithi {
    Pratipada,
    Dwitiya,
    Tritiya,
    Chaturthi,
    Panchami,
    Shashthi,
    Saptami,
    Ashtami,
    Navami,
    Dashami,
    Ekadashi,
    Dwadashi,
    Trayodashi,
    Chaturdashi,
    Purnima,
    Amavasya,
}

const PAKSHA_TITHIS: [Tithi; 14] = [
    Tithi::Pratipada,
    Tithi::Dwitiya,
    Tithi::Tritiya,
    Tithi::Chaturthi,
    Tithi::Panchami,
    Tithi::Shashthi,
    Tithi::Saptami,
    Tithi::Ashtami,
    Tithi::Navami,
    Tithi::Dashami,
    Tithi::Ekadashi,
    Tithi::Dwadashi,
    Tithi::Trayodashi,
    Tithi::Chaturdashi,
];

impl Tithi {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Pratipada => "Pratipada",
            Self::Dwitiya => "Dwitiya",
            Self::Tritiya => "Tritiya",
            Self::Chaturthi => "Chaturthi",
            Self::Panchami => "Panchami",
            Self::Shashthi => "Shashthi",
            Self::Saptami => "Saptami",
            Self::Ashtami => "Ashtami",
            Self::Navami => "Navami",
            Self::Dashami => "Dashami",
            Self::Ekadashi => "Ekadashi",
            Self::Dwadashi => "Dwadashi",
            Self::Trayodashi => "Trayodashi",
            Self::Chaturdashi => "Chaturdashi",
            Self::Purnima => "Purnima",
            Self::Amavasya => "Amavasya",
        }
    }

    /// Tithi name for a 0-based index in the lunation (0..=29).
    ///
    /// Returns `None` for indices outside the lunation.
    pub fn from_index(index: u8) -> Option<Self> {
        match index {
            14 => Some(Self::Purnima),
            29 => Some(Self::Amavasya),
            0..=13 => Some(PAKSHA_TITHIS[index as usize]),
            15..=28 => Some(PAKSHA_TITHIS[(index - 15) as usize]),
            _ => None,
        }
    }
}

/// Tithi position for a given elongation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TithiPosition {
    pub tithi: Tithi,
    /// 0-based tithi index (0..29).
    pub tithi_index: u8,
    pub paksha: Paksha,
    /// 1-based tithi number within the paksha (1-15).
    pub tithi_in_paksha: u8,
    /// Degrees of elongation elapsed within this tithi [0, 12).
    pub degrees_in_tithi: f64,
}

/// Classify a Moon-Sun elongation (degrees) into a tithi.
pub fn tithi_from_elongation(elongation_deg: f64) -> TithiPosition {
    let elong = normalize_360(elongation_deg);
    let tithi_index = ((elong / TITHI_SEGMENT_DEG).floor() as u8).min(TITHI_COUNT - 1);
    let degrees_in_tithi = elong - tithi_index as f64 * TITHI_SEGMENT_DEG;
    // index is clamped to 0..=29, which always has a name
    let tithi = Tithi::from_index(tithi_index).unwrap_or(Tithi::Amavasya);
    TithiPosition {
        tithi,
        tithi_index,
        paksha: Paksha::of_tithi_index(tithi_index),
        tithi_in_paksha: tithi_index % 15 + 1,
        degrees_in_tithi,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_moon_is_shukla_pratipada() {
        let p = tithi_from_elongation(0.0);
        assert_eq!(p.tithi, Tithi::Pratipada);
        assert_eq!(p.tithi_index, 0);
        assert_eq!(p.paksha, Paksha::Shukla);
        assert_eq!(p.tithi_in_paksha, 1);
    }

    #[test]
    fn purnima_and_amavasya() {
        let p = tithi_from_elongation(170.0);
        assert_eq!((p.tithi, p.tithi_index), (Tithi::Purnima, 14));
        let a = tithi_from_elongation(359.9);
        assert_eq!((a.tithi, a.tithi_index), (Tithi::Amavasya, 29));
        assert_eq!(a.paksha, Paksha::Krishna);
        assert_eq!(a.tithi_in_paksha, 15);
    }

    #[test]
    fn krishna_names_repeat() {
        let p = tithi_from_elongation(15.0 * 12.0 + 1.0);
        assert_eq!(p.tithi, Tithi::Pratipada);
        assert_eq!(p.paksha, Paksha::Krishna);
        assert_eq!(Tithi::from_index(25), Some(Tithi::Ekadashi));
        assert_eq!(Tithi::from_index(10), Some(Tithi::Ekadashi));
    }

    #[test]
    fn boundaries_are_left_closed() {
        for i in 0..30u8 {
            let p = tithi_from_elongation(i as f64 * 12.0);
            assert_eq!(p.tithi_index, i);
        }
    }

    #[test]
    fn wraps_negative_elongation() {
        let p = tithi_from_elongation(-6.0);
        assert_eq!(p.tithi_index, 29);
        assert!((p.degrees_in_tithi - 6.0).abs() < 1e-10);
    }

    #[test]
    fn index_out_of_range() {
        assert_eq!(Tithi::from_index(30), None);
    }
}
