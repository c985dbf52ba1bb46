//! Masa (lunar month) naming, Amanta scheme.
//!
//! A lunation runs new moon to new moon and is named after the rashi the
//! Sun occupies at its closing new moon: Sun in Mesha gives Chaitra, Sun in
//! Vrishabha gives Vaishakha, and so on. When the Sun occupies the same
//! rashi at both bounding new moons the lunation is adhika (intercalary)
//! and borrows the name of the following month.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Masa {
    Chaitra,
    Vaishakha,
    Jyeshtha,
    Ashadha,
    Shravana,
    Bhadrapada,
    Ashvina,
    Kartika,
    Margashirsha,
    Pausha,
    Magha,
    Phalguna,
}

pub const ALL_MASAS: [Masa; 12] = [
    Masa::Chaitra,
    Masa::Vaishakha,
    Masa::Jyeshtha,
    Masa::Ashadha,
    Masa::Shravana,
    Masa::Bhadrapada,
    Masa::Ashvina,
    Masa::Kartika,
    Masa::Margashirsha,
    Masa::Pausha,
    Masa::Magha,
    Masa::Phalguna,
];

impl Masa {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Chaitra => "Chaitra",
            Self::Vaishakha => "Vaishakha",
            Self::Jyeshtha => "Jyeshtha",
            Self::Ashadha => "Ashadha",
            Self::Shravana => "Shravana",
            Self::Bhadrapada => "Bhadrapada",
            Self::Ashvina => "Ashvina",
            Self::Kartika => "Kartika",
            Self::Margashirsha => "Margashirsha",
            Self::Pausha => "Pausha",
            Self::Magha => "Magha",
            Self::Phalguna => "Phalguna",
        }
    }

    /// 0-based index (Chaitra=0 .. Phalguna=11).
    pub const fn index(self) -> u8 {
        self as u8
    }

    pub fn from_index(index: u8) -> Option<Self> {
        ALL_MASAS.get(index as usize).copied()
    }

    pub const fn all() -> &'static [Masa; 12] {
        &ALL_MASAS
    }
}

/// Masa named by the Sun's sidereal rashi index at the closing new moon.
pub fn masa_from_rashi_index(rashi_index: u8) -> Masa {
    ALL_MASAS[(rashi_index % 12) as usize]
}

/// Name a lunation from the Sun's rashi at its opening and closing new moons.
///
/// Returns the masa and whether it is adhika.
pub fn masa_for_lunation(rashi_at_prev_new_moon: u8, rashi_at_next_new_moon: u8) -> (Masa, bool) {
    if rashi_at_prev_new_moon != rashi_at_next_new_moon {
        (masa_from_rashi_index(rashi_at_next_new_moon), false)
    } else {
        // Sun stayed in one rashi: take the name of the following nija month
        (masa_from_rashi_index((rashi_at_prev_new_moon + 1) % 12), true)
    }
}
