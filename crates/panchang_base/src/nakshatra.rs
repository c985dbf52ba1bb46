//! Nakshatra (lunar mansion) computation, 27-fold scheme.
//!
//! The ecliptic circle is divided into 27 equal nakshatras of 13 deg 20'
//! each, and every nakshatra into 4 padas of 3 deg 20'.

use panchang_time::normalize_360;
use serde::{Deserialize, Serialize};

/// Span of one nakshatra: 360/27 = 13.3333... degrees.
pub const NAKSHATRA_SPAN_27: f64 = 360.0 / 27.0;

/// Span of one pada: 3.3333... degrees.
pub const PADA_SPAN: f64 = NAKSHATRA_SPAN_27 / 4.0;

/// The 27 nakshatras from Ashwini to Revati.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Nakshatra {
    Ashwini,
    Bharani,
    Krittika,
    Rohini,
    Mrigashira,
    Ardra,
    Punarvasu,
    Pushya,
    Ashlesha,
    Magha,
    PurvaPhalguni,
    UttaraPhalguni,
    Hasta,
    Chitra,
    Swati,
    Vishakha,
    Anuradha,
    Jyeshtha,
    Mula,
    PurvaAshadha,
    UttaraAshadha,
    Shravana,
    Dhanishtha,
    Shatabhisha,
    PurvaBhadrapada,
    UttaraBhadrapada,
    Revati,
}

/// All 27 nakshatras in order (0 = Ashwini, 26 = Revati).
pub const ALL_NAKSHATRAS_27: [Nakshatra; 27] = [
    Nakshatra::Ashwini,
    Nakshatra::Bharani,
    Nakshatra::Krittika,
    Nakshatra::Rohini,
    Nakshatra::Mrigashira,
    Nakshatra::Ardra,
    Nakshatra::Punarvasu,
    Nakshatra::Pushya,
    Nakshatra::Ashlesha,
    Nakshatra::Magha,
    Nakshatra::PurvaPhalguni,
    Nakshatra::UttaraPhalguni,
    Nakshatra::Hasta,
    Nakshatra::Chitra,
    Nakshatra::Swati,
    Nakshatra::Vishakha,
    Nakshatra::Anuradha,
    Nakshatra::Jyeshtha,
    Nakshatra::Mula,
    Nakshatra::PurvaAshadha,
    Nakshatra::UttaraAshadha,
    Nakshatra::Shravana,
    Nakshatra::Dhanishtha,
    Nakshatra::Shatabhisha,
    Nakshatra::PurvaBhadrapada,
    Nakshatra::UttaraBhadrapada,
    Nakshatra::Revati,
];

impl Nakshatra {
    /// Sanskrit name of the nakshatra.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Ashwini => "Ashwini",
            Self::Bharani => "Bharani",
            Self::Krittika => "Krittika",
            Self::Rohini => "Rohini",
            Self::Mrigashira => "Mrigashira",
            Self::Ardra => "Ardra",
            Self::Punarvasu => "Punarvasu",
            Self::Pushya => "Pushya",
            Self::Ashlesha => "Ashlesha",
            Self::Magha => "Magha",
            Self::PurvaPhalguni => "Purva Phalguni",
            Self::UttaraPhalguni => "Uttara Phalguni",
            Self::Hasta => "Hasta",
            Self::Chitra => "Chitra",
            Self::Swati => "Swati",
            Self::Vishakha => "Vishakha",
            Self::Anuradha => "Anuradha",
            Self::Jyeshtha => "Jyeshtha",
            Self::Mula => "Mula",
            Self::PurvaAshadha => "Purva Ashadha",
            Self::UttaraAshadha => "Uttara Ashadha",
            Self::Shravana => "Shravana",
            Self::Dhanishtha => "Dhanishtha",
            Self::Shatabhisha => "Shatabhisha",
            Self::PurvaBhadrapada => "Purva Bhadrapada",
            Self::UttaraBhadrapada => "Uttara Bhadrapada",
            Self::Revati => "Revati",
        }
    }

    /// 0-based index (Ashwini=0 .. Revati=26).
    pub const fn index(self) -> u8 {
        self as u8
    }

    pub fn from_index(index: u8) -> Option<Self> {
        ALL_NAKSHATRAS_27.get(index as usize).copied()
    }

    pub const fn all() -> &'static [Nakshatra; 27] {
        &ALL_NAKSHATRAS_27
    }
}

/// Result of 27-nakshatra lookup.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NakshatraInfo {
    pub nakshatra: Nakshatra,
    /// 0-based index (0 = Ashwini).
    pub nakshatra_index: u8,
    /// Pada (quarter) within the nakshatra, 1-4.
    pub pada: u8,
    /// Decimal degrees within the nakshatra [0.0, 13.333...).
    pub degrees_in_nakshatra: f64,
}

/// Determine nakshatra and pada from sidereal ecliptic longitude.
pub fn nakshatra_from_longitude(sidereal_lon_deg: f64) -> NakshatraInfo {
    let lon = normalize_360(sidereal_lon_deg);
    let nak_idx = ((lon / NAKSHATRA_SPAN_27).floor() as u8).min(26);
    let degrees_in_nakshatra = lon - nak_idx as f64 * NAKSHATRA_SPAN_27;
    let pada = ((degrees_in_nakshatra / PADA_SPAN).floor() as u8).min(3) + 1;
    NakshatraInfo {
        nakshatra: ALL_NAKSHATRAS_27[nak_idx as usize],
        nakshatra_index: nak_idx,
        pada,
        degrees_in_nakshatra,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indices_sequential() {
        for (i, n) in ALL_NAKSHATRAS_27.iter().enumerate() {
            assert_eq!(n.index() as usize, i);
        }
        assert_eq!(Nakshatra::from_index(27), None);
    }

    #[test]
    fn ashwini_first_pada() {
        let info = nakshatra_from_longitude(0.0);
        assert_eq!(info.nakshatra, Nakshatra::Ashwini);
        assert_eq!(info.pada, 1);
    }

    #[test]
    fn revati_last_pada() {
        let info = nakshatra_from_longitude(359.99);
        assert_eq!(info.nakshatra, Nakshatra::Revati);
        assert_eq!(info.pada, 4);
    }

    #[test]
    fn shravana_span() {
        // Shravana: 280 deg .. 293 deg 20'
        assert_eq!(nakshatra_from_longitude(280.5).nakshatra, Nakshatra::Shravana);
        assert_eq!(nakshatra_from_longitude(279.9).nakshatra, Nakshatra::UttaraAshadha);
    }

    #[test]
    fn pada_boundaries() {
        let base = 5.0 * NAKSHATRA_SPAN_27;
        for p in 0..4 {
            let info = nakshatra_from_longitude(base + p as f64 * PADA_SPAN + 0.01);
            assert_eq!(info.nakshatra, Nakshatra::Ardra);
            assert_eq!(info.pada, p + 1);
        }
    }
}
