//! Festival rule types.

use serde::{Deserialize, Serialize};

/// Which instant of the day decides a tithi festival's civil date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalculationBasis {
    /// Sunrise plus the configured offset (150 min by default).
    Sunrise,
    Sunset,
    /// Sunset plus the configured offset (90 min by default).
    Pradosha,
    Moonrise,
    /// Nishita muhurta of the night.
    Shivaratri,
    /// Start date, moved one day forward when the boundary begins after sunset.
    AfterSunrise,
}

/// How an occurrence was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalculationType {
    Sunrise,
    Sunset,
    Pradosha,
    Moonrise,
    Shivaratri,
    AfterSunrise,
    /// Anchored on a solar ingress instead of a tithi.
    Sankranti,
}

impl From<CalculationBasis> for CalculationType {
    fn from(basis: CalculationBasis) -> Self {
        match basis {
            CalculationBasis::Sunrise => Self::Sunrise,
            CalculationBasis::Sunset => Self::Sunset,
            CalculationBasis::Pradosha => Self::Pradosha,
            CalculationBasis::Moonrise => Self::Moonrise,
            CalculationBasis::Shivaratri => Self::Shivaratri,
            CalculationBasis::AfterSunrise => Self::AfterSunrise,
        }
    }
}

fn default_priority() -> u8 {
    5
}

/// A festival keyed on tithi and/or nakshatra, optionally restricted to one masa.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FestivalRule {
    /// Stable identifier, unique within a catalog.
    pub id: String,
    /// Localization key for the display name.
    pub name_key: String,
    /// 0-based tithi index (0 = Shukla Pratipada .. 29 = Amavasya).
    #[serde(default)]
    pub tithi: Option<u8>,
    /// 0-based masa index (0 = Chaitra); `None` matches every masa.
    #[serde(default)]
    pub masa: Option<u8>,
    /// 0-based nakshatra index (0 = Ashwini).
    #[serde(default)]
    pub nakshatra: Option<u8>,
    /// Match only adhika (`true`) or only nija (`false`) months.
    #[serde(default)]
    pub adhik_maasa: bool,
    pub basis: CalculationBasis,
    /// Lower sorts first among festivals on the same date.
    #[serde(default = "default_priority")]
    pub priority: u8,
}

/// A festival placed a fixed number of days from a sankranti.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SankrantiRule {
    pub id: String,
    pub name_key: String,
    /// 0-based sidereal sign index (0 = Mesha, 9 = Makara).
    pub sign: u8,
    /// Days from the sankranti's UTC civil date.
    #[serde(default)]
    pub offset_days: i32,
    #[serde(default = "default_priority")]
    pub priority: u8,
}

impl FestivalRule {
    pub fn validate(&self) -> Result<(), String> {
        if self.id.trim().is_empty() {
            return Err("id must not be empty".into());
        }
        if self.name_key.trim().is_empty() {
            return Err("name_key must not be empty".into());
        }
        if self.tithi.is_none() && self.nakshatra.is_none() {
            return Err("rule needs a tithi or a nakshatra".into());
        }
        if let Some(t) = self.tithi.filter(|t| *t >= 30) {
            return Err(format!("tithi {t} out of range 0..=29"));
        }
        if let Some(m) = self.masa.filter(|m| *m >= 12) {
            return Err(format!("masa {m} out of range 0..=11"));
        }
        if let Some(n) = self.nakshatra.filter(|n| *n >= 27) {
            return Err(format!("nakshatra {n} out of range 0..=26"));
        }
        Ok(())
    }
}

impl SankrantiRule {
    pub fn validate(&self) -> Result<(), String> {
        if self.id.trim().is_empty() {
            return Err("id must not be empty".into());
        }
        if self.name_key.trim().is_empty() {
            return Err("name_key must not be empty".into());
        }
        if self.sign >= 12 {
            return Err(format!("sign {} out of range 0..=11", self.sign));
        }
        if self.offset_days.abs() > 15 {
            return Err(format!("offset_days {} exceeds 15", self.offset_days));
        }
        Ok(())
    }
}
