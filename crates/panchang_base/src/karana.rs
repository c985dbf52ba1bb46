//! Karana: half-tithi, 60 segments of 6 deg elongation per lunation.
//!
//! Segment 0 (first half of Shukla Pratipada) is Kimstughna. Segments 1..=56
//! cycle through the seven movable karanas. The last three segments are
//! the fixed karanas Shakuni, Chatushpada and Naga.

use panchang_time::normalize_360;
use serde::{Deserialize, Serialize};

/// Elongation covered by one karana.
pub const KARANA_SEGMENT_DEG: f64 = 6.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Karana {
    Bava,
    Balava,
    Kaulava,
    Taitila,
    Garaja,
    Vanija,
    Vishti,
    Shakuni,
    Chatushpada,
    Naga,
    Kimstughna,
}

const MOVABLE: [Karana; 7] = [
    Karana::Bava,
    Karana::Balava,
    Karana::Kaulava,
    Karana::Taitila,
    Karana::Garaja,
    Karana::Vanija,
    Karana::Vishti,
];

impl Karana {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Bava => "Bava",
            Self::Balava => "Balava",
            Self::Kaulava => "Kaulava",
            Self::Taitila => "Taitila",
            Self::Garaja => "Garaja",
            Self::Vanija => "Vanija",
            Self::Vishti => "Vishti",
            Self::Shakuni => "Shakuni",
            Self::Chatushpada => "Chatushpada",
            Self::Naga => "Naga",
            Self::Kimstughna => "Kimstughna",
        }
    }

    /// Whether this karana occurs only once per lunation.
    pub const fn is_fixed(self) -> bool {
        matches!(
            self,
            Self::Shakuni | Self::Chatushpada | Self::Naga | Self::Kimstughna
        )
    }

    /// Karana for a 0-based sequence index within the lunation (0..=59).
    pub fn from_sequence_index(index: u8) -> Option<Self> {
        match index {
            0 => Some(Self::Kimstughna),
            1..=56 => Some(MOVABLE[((index - 1) % 7) as usize]),
            57 => Some(Self::Shakuni),
            58 => Some(Self::Chatushpada),
            59 => Some(Self::Naga),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KaranaPosition {
    pub karana: Karana,
    /// 0-based sequence index within the lunation (0..59).
    pub karana_index: u8,
    pub degrees_in_karana: f64,
}

/// Classify a Moon-Sun elongation (degrees) into a karana.
pub fn karana_from_elongation(elongation_deg: f64) -> KaranaPosition {
    let elong = normalize_360(elongation_deg);
    let karana_index = ((elong / KARANA_SEGMENT_DEG).floor() as u8).min(59);
    KaranaPosition {
        karana: Karana::from_sequence_index(karana_index).unwrap_or(Karana::Naga),
        karana_index,
        degrees_in_karana: elong - karana_index as f64 * KARANA_SEGMENT_DEG,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_karanas_at_lunation_edges() {
        assert_eq!(karana_from_elongation(1.0).karana, Karana::Kimstughna);
        assert_eq!(karana_from_elongation(343.0).karana, Karana::Shakuni);
        assert_eq!(karana_from_elongation(349.0).karana, Karana::Chatushpada);
        assert_eq!(karana_from_elongation(355.0).karana, Karana::Naga);
    }

    #[test]
    fn movable_cycle() {
        assert_eq!(karana_from_elongation(7.0).karana, Karana::Bava);
        assert_eq!(karana_from_elongation(43.0).karana, Karana::Vishti);
        assert_eq!(karana_from_elongation(49.0).karana, Karana::Bava);
        // segment 56 closes the eighth movable cycle
        assert_eq!(Karana::from_sequence_index(56), Some(Karana::Vishti));
    }

    #[test]
    fn fixed_flag() {
        assert!(Karana::Naga.is_fixed());
        assert!(!Karana::Vishti.is_fixed());
        assert_eq!(Karana::from_sequence_index(60), None);
    }
}
