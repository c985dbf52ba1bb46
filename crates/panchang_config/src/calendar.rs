//! `CalendarConfig`: one TOML document driving every engine component.
//!
//! ```toml
//! ayanamsha = "lahiri"
//! use_nutation = true
//!
//! [sankranti]
//! tol_sec = 1.0
//! max_iter = 80
//!
//! [scan]
//! step_days = 0.25
//!
//! [festival]
//! pradosha_offset_minutes = 90
//!
//! [location]
//! latitude = 17.385
//! longitude = 78.4867
//! timezone = "Asia/Calcutta"
//! ```
//!
//! Every field has a default, so an empty document is a valid config.

use std::path::Path;

use panchang_base::AyanamshaSystem;
use panchang_ephem::{AnalyticEphemeris, GeoLocation, RiseSetConfig};
use panchang_festival::FestivalConfig;
use panchang_search::{SankrantiConfig, ScanConfig};
use panchang_time::TimeZoneSpec;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Festival basis offsets and the moonrise fallback window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FestivalSection {
    pub sunrise_offset_minutes: f64,
    pub pradosha_offset_minutes: f64,
    pub moonrise_window_hours: f64,
}

impl Default for FestivalSection {
    fn default() -> Self {
        let d = FestivalConfig::default();
        Self {
            sunrise_offset_minutes: d.sunrise_offset_minutes,
            pradosha_offset_minutes: d.pradosha_offset_minutes,
            moonrise_window_hours: d.moonrise_window_hours,
        }
    }
}

/// Observer site used when the command line gives none.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LocationConfig {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub altitude_m: f64,
    /// IANA name or fixed offset (`+05:30`); UTC when omitted.
    #[serde(default)]
    pub timezone: Option<String>,
}

impl LocationConfig {
    pub fn geo_location(&self) -> Result<GeoLocation, ConfigError> {
        let loc = GeoLocation::new(self.latitude, self.longitude, self.altitude_m);
        loc.validate()?;
        Ok(loc)
    }

    pub fn zone(&self) -> Result<TimeZoneSpec, ConfigError> {
        match &self.timezone {
            Some(tz) => Ok(tz.parse::<TimeZoneSpec>()?),
            None => Ok(TimeZoneSpec::UTC),
        }
    }
}

fn default_true() -> bool {
    true
}

/// Top-level engine configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CalendarConfig {
    pub ayanamsha: AyanamshaSystem,
    #[serde(default = "default_true")]
    pub use_nutation: bool,
    pub sankranti: SankrantiConfig,
    pub scan: ScanConfig,
    pub festival: FestivalSection,
    pub riseset: RiseSetConfig,
    pub location: Option<LocationConfig>,
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            ayanamsha: AyanamshaSystem::default(),
            use_nutation: true,
            sankranti: SankrantiConfig::default(),
            scan: ScanConfig::default(),
            festival: FestivalSection::default(),
            riseset: RiseSetConfig::default(),
            location: None,
        }
    }
}

impl CalendarConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&text)?;
        tracing::debug!(path = %path.display(), ayanamsha = %config.ayanamsha, "config loaded");
        Ok(config)
    }

    /// `path` when given, the defaults otherwise.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(p) => Self::from_path(p),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.sankranti
            .validate()
            .map_err(|r| ConfigError::invalid("sankranti", r))?;
        self.scan
            .validate()
            .map_err(|r| ConfigError::invalid("scan", r))?;
        self.festival_config()
            .validate()
            .map_err(|e| ConfigError::invalid("festival", e.to_string()))?;
        let rs = &self.riseset;
        if !(rs.refraction_arcmin.is_finite() && rs.semidiameter_arcmin.is_finite()) {
            return Err(ConfigError::invalid("riseset", "arcminute values must be finite"));
        }
        if let Some(loc) = &self.location {
            loc.geo_location()?;
            loc.zone()?;
        }
        Ok(())
    }

    /// Analytic provider with this config's ayanamsha, nutation and rise/set settings.
    pub fn ephemeris(&self) -> AnalyticEphemeris {
        AnalyticEphemeris::new(self.ayanamsha)
            .with_nutation(self.use_nutation)
            .with_riseset_config(self.riseset)
    }

    pub fn sankranti_config(&self) -> SankrantiConfig {
        self.sankranti
    }

    pub fn scan_config(&self) -> ScanConfig {
        self.scan
    }

    pub fn festival_config(&self) -> FestivalConfig {
        FestivalConfig {
            sunrise_offset_minutes: self.festival.sunrise_offset_minutes,
            pradosha_offset_minutes: self.festival.pradosha_offset_minutes,
            moonrise_window_hours: self.festival.moonrise_window_hours,
            sankranti: self.sankranti,
            scan: self.scan,
        }
    }

    /// Configured observer site and zone, if a `[location]` section exists.
    pub fn site(&self) -> Result<Option<(GeoLocation, TimeZoneSpec)>, ConfigError> {
        self.location
            .as_ref()
            .map(|loc| -> Result<_, ConfigError> { Ok((loc.geo_location()?, loc.zone()?)) })
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_is_all_defaults() {
        let cfg = CalendarConfig::from_toml_str("").unwrap();
        assert_eq!(cfg, CalendarConfig::default());
        assert_eq!(cfg.ayanamsha, AyanamshaSystem::Lahiri);
        assert!(cfg.use_nutation);
        assert_eq!(cfg.sankranti.max_iter, 80);
        assert_eq!(cfg.scan.step_days, 0.25);
        assert_eq!(cfg.festival.sunrise_offset_minutes, 150.0);
        assert!(cfg.site().unwrap().is_none());
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let cfg = CalendarConfig::from_toml_str(
            r#"
            ayanamsha = "fagan_bradley"
            [sankranti]
            tol_sec = 0.5
            [festival]
            pradosha_offset_minutes = 96
            "#,
        )
        .unwrap();
        assert_eq!(cfg.ayanamsha, AyanamshaSystem::FaganBradley);
        assert_eq!(cfg.sankranti.tol_sec, 0.5);
        assert_eq!(cfg.sankranti.max_expansions, 3);
        let fc = cfg.festival_config();
        assert_eq!(fc.pradosha_offset_minutes, 96.0);
        assert_eq!(fc.sunrise_offset_minutes, 150.0);
        assert_eq!(fc.sankranti.tol_sec, 0.5);
    }

    #[test]
    fn unknown_key_is_rejected() {
        let err = CalendarConfig::from_toml_str("ayanamsa = \"lahiri\"").unwrap_err();
        assert!(matches!(err, ConfigError::Toml(_)));
    }

    #[test]
    fn invalid_section_values_are_reported() {
        let err = CalendarConfig::from_toml_str("[scan]\nstep_days = 0").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { section: "scan", .. }));
        let err = CalendarConfig::from_toml_str("[festival]\nmoonrise_window_hours = -2").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { section: "festival", .. }));
    }

    #[test]
    fn location_section_builds_site() {
        let cfg = CalendarConfig::from_toml_str(
            r#"
            [location]
            latitude = 17.385
            longitude = 78.4867
            timezone = "+05:30"
            "#,
        )
        .unwrap();
        let (loc, zone) = cfg.site().unwrap().unwrap();
        assert_eq!(loc.latitude_deg, 17.385);
        assert_eq!(loc.altitude_m, 0.0);
        assert_eq!(zone, TimeZoneSpec::fixed(330));
    }

    #[test]
    fn bad_location_is_rejected() {
        let err = CalendarConfig::from_toml_str("[location]\nlatitude = 91\nlongitude = 0")
            .unwrap_err();
        assert!(matches!(err, ConfigError::Location(_)));
        let err = CalendarConfig::from_toml_str(
            "[location]\nlatitude = 0\nlongitude = 0\ntimezone = \"Mars/Olympus\"",
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Time(_)));
    }

    #[test]
    fn ephemeris_builder_carries_settings() {
        let cfg = CalendarConfig::from_toml_str(
            "ayanamsha = \"kp\"\n[riseset]\nrefraction_arcmin = 35.0",
        )
        .unwrap();
        let eph = cfg.ephemeris();
        assert_eq!(eph.ayanamsha_system(), AyanamshaSystem::KP);
        assert_eq!(eph.riseset_config().refraction_arcmin, 35.0);
    }
}
