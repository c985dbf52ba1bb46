//! Yoga: 27-fold division of the sidereal Sun + Moon longitude sum.

use panchang_time::normalize_360;
use serde::{Deserialize, Serialize};

/// Span of one yoga: 360/27 degrees of the sidereal sum.
pub const YOGA_SEGMENT_DEG: f64 = 360.0 / 27.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Yoga {
    Vishkambha,
    Priti,
    Ayushman,
    Saubhagya,
    Shobhana,
    Atiganda,
    Sukarma,
    Dhriti,
    Shula,
    Ganda,
    Vriddhi,
    Dhruva,
    Vyaghata,
    Harshana,
    Vajra,
    Siddhi,
    Vyatipata,
    Variyan,
    Parigha,
    Shiva,
    Siddha,
    Sadhya,
    Shubha,
    Shukla,
    Brahma,
    Indra,
    Vaidhriti,
}

pub const ALL_YOGAS: [Yoga; 27] = [
    Yoga::Vishkambha,
    Yoga::Priti,
    Yoga::Ayushman,
    Yoga::Saubhagya,
    Yoga::Shobhana,
    Yoga::Atiganda,
    Yoga::Sukarma,
    Yoga::Dhriti,
    Yoga::Shula,
    Yoga::Ganda,
    Yoga::Vriddhi,
    Yoga::Dhruva,
    Yoga::Vyaghata,
    Yoga::Harshana,
    Yoga::Vajra,
    Yoga::Siddhi,
    Yoga::Vyatipata,
    Yoga::Variyan,
    Yoga::Parigha,
    Yoga::Shiva,
    Yoga::Siddha,
    Yoga::Sadhya,
    Yoga::Shubha,
    Yoga::Shukla,
    Yoga::Brahma,
    Yoga::Indra,
    Yoga::Vaidhriti,
];

impl Yoga {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Vishkambha => "Vishkambha",
            Self::Priti => "Priti",
            Self::Ayushman => "Ayushman",
            Self::Saubhagya => "Saubhagya",
            Self::Shobhana => "Shobhana",
            Self::Atiganda => "Atiganda",
            Self::Sukarma => "Sukarma",
            Self::Dhriti => "Dhriti",
            Self::Shula => "Shula",
            Self::Ganda => "Ganda",
            Self::Vriddhi => "Vriddhi",
            Self::Dhruva => "Dhruva",
            Self::Vyaghata => "Vyaghata",
            Self::Harshana => "Harshana",
            Self::Vajra => "Vajra",
            Self::Siddhi => "Siddhi",
            Self::Vyatipata => "Vyatipata",
            Self::Variyan => "Variyan",
            Self::Parigha => "Parigha",
            Self::Shiva => "Shiva",
            Self::Siddha => "Siddha",
            Self::Sadhya => "Sadhya",
            Self::Shubha => "Shubha",
            Self::Shukla => "Shukla",
            Self::Brahma => "Brahma",
            Self::Indra => "Indra",
            Self::Vaidhriti => "Vaidhriti",
        }
    }

    pub const fn index(self) -> u8 {
        self as u8
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct YogaPosition {
    pub yoga: Yoga,
    /// 0-based yoga index (0..26).
    pub yoga_index: u8,
    pub degrees_in_yoga: f64,
}

/// Classify a sidereal Sun + Moon sum (degrees) into a yoga.
pub fn yoga_from_sum(sidereal_sum_deg: f64) -> YogaPosition {
    let sum = normalize_360(sidereal_sum_deg);
    let yoga_index = ((sum / YOGA_SEGMENT_DEG).floor() as u8).min(26);
    YogaPosition {
        yoga: ALL_YOGAS[yoga_index as usize],
        yoga_index,
        degrees_in_yoga: sum - yoga_index as f64 * YOGA_SEGMENT_DEG,
    }
}
