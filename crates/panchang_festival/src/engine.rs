//! Year resolution: every catalog rule against one year's tithi,
//! nakshatra and sankranti tables.

use chrono::TimeDelta;
use panchang_base::nakshatra_from_longitude;
use panchang_ephem::{Ephemeris, GeoLocation};
use panchang_search::{
    NakshatraTable, SankrantiConfig, SankrantiEvent, ScanConfig, TithiTable,
    moon_sidereal_longitude_at, sankrantis_for_calendar_year, scan_nakshatras, scan_tithis,
};
use panchang_time::{Instant, TimeZoneSpec};
use serde::{Deserialize, Serialize};

use crate::basis::{BasisResolution, resolve_basis};
use crate::catalog::FestivalCatalog;
use crate::day_events::DayEventTable;
use crate::error::FestivalError;
use crate::occurrence::{FestivalOccurrence, FestivalYear, finalize};
use crate::rule::{CalculationType, FestivalRule, SankrantiRule};

/// Tunables for festival resolution.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FestivalConfig {
    /// Minutes after sunrise a `sunrise` rule evaluates at (default 150).
    pub sunrise_offset_minutes: f64,
    /// Minutes after sunset a `pradosha` rule evaluates at (default 90).
    pub pradosha_offset_minutes: f64,
    /// How far from local noon an adjacent day's moonrise may be taken
    /// when the day itself has none (default 24 h).
    pub moonrise_window_hours: f64,
    pub sankranti: SankrantiConfig,
    pub scan: ScanConfig,
}

impl Default for FestivalConfig {
    fn default() -> Self {
        Self {
            sunrise_offset_minutes: 150.0,
            pradosha_offset_minutes: 90.0,
            moonrise_window_hours: 24.0,
            sankranti: SankrantiConfig::default(),
            scan: ScanConfig::default(),
        }
    }
}

impl FestivalConfig {
    pub fn validate(&self) -> Result<(), FestivalError> {
        let offsets = [self.sunrise_offset_minutes, self.pradosha_offset_minutes];
        if offsets.iter().any(|m| !m.is_finite() || m.abs() > 720.0) {
            return Err(FestivalError::InvalidConfig(
                "basis offsets must be finite and within 12 hours",
            ));
        }
        if !(self.moonrise_window_hours.is_finite() && self.moonrise_window_hours >= 0.0) {
            return Err(FestivalError::InvalidConfig(
                "moonrise_window_hours must be non-negative",
            ));
        }
        self.sankranti.validate().map_err(FestivalError::InvalidConfig)?;
        self.scan.validate().map_err(FestivalError::InvalidConfig)?;
        Ok(())
    }
}

/// A tithi or nakshatra occurrence a rule matched, before basis resolution.
#[derive(Debug, Clone, Copy)]
struct Candidate {
    start: Instant,
    masa_ino: u8,
    is_leap_month: bool,
}

/// Resolves a [`FestivalCatalog`] for one location and zone.
pub struct FestivalEngine<'a, E: Ephemeris + ?Sized> {
    eph: &'a E,
    catalog: &'a FestivalCatalog,
    location: GeoLocation,
    zone: TimeZoneSpec,
    config: FestivalConfig,
}

impl<'a, E: Ephemeris + ?Sized> FestivalEngine<'a, E> {
    pub fn new(
        eph: &'a E,
        catalog: &'a FestivalCatalog,
        location: GeoLocation,
        zone: TimeZoneSpec,
    ) -> Self {
        Self {
            eph,
            catalog,
            location,
            zone,
            config: FestivalConfig::default(),
        }
    }

    pub fn with_config(mut self, config: FestivalConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &FestivalConfig {
        &self.config
    }

    /// Rise/set memo for this engine's location, zone and moonrise window.
    pub fn day_table(&self) -> DayEventTable<'a, E> {
        DayEventTable::new(
            self.eph,
            self.location,
            self.zone,
            self.config.moonrise_window_hours,
        )
    }

    /// Festivals of the zone-local civil `year`.
    pub fn resolve_year(&self, year: i32) -> Result<FestivalYear, FestivalError> {
        let mut days = self.day_table();
        self.resolve_year_with(year, &mut days)
    }

    /// As [`resolve_year`](Self::resolve_year), sharing `days` across calls.
    pub fn resolve_year_with(
        &self,
        year: i32,
        days: &mut DayEventTable<'_, E>,
    ) -> Result<FestivalYear, FestivalError> {
        self.config.validate()?;
        self.location.validate()?;

        let tithis = scan_tithis(self.eph, year, &self.zone, &self.config.scan)?;
        let nakshatras = if self.catalog.uses_nakshatra() {
            Some(scan_nakshatras(self.eph, &tithis, &self.config.scan)?)
        } else {
            None
        };
        let sankrantis =
            sankrantis_for_calendar_year(self.eph, year, &self.zone, &self.config.sankranti);

        let mut occurrences = Vec::new();
        for (order, rule) in self.catalog.rules().iter().enumerate() {
            let candidates = candidates_for(rule, &tithis, nakshatras.as_ref());
            if candidates.is_empty() {
                tracing::debug!(rule = %rule.id, year, "no matching boundary in year");
                continue;
            }
            for candidate in candidates {
                match self.place(rule, order, candidate, days) {
                    Ok(Some(occ)) => occurrences.push(occ),
                    Ok(None) => {}
                    Err(err) => {
                        tracing::warn!(rule = %rule.id, start = %candidate.start, %err,
                            "skipping occurrence");
                    }
                }
            }
        }

        let base_order = self.catalog.rules().len();
        for (i, rule) in self.catalog.sankranti_rules().iter().enumerate() {
            for event in sankrantis.iter().filter(|e| e.sign_index == rule.sign) {
                match sankranti_occurrence(rule, base_order + i, event, &tithis) {
                    Ok(occ) => occurrences.push(occ),
                    Err(err) => {
                        tracing::warn!(rule = %rule.id, %err, "skipping sankranti occurrence");
                    }
                }
            }
        }

        finalize(&mut occurrences, year);
        tracing::info!(
            year,
            festivals = occurrences.len(),
            sankrantis = sankrantis.len(),
            "festival year resolved"
        );

        Ok(FestivalYear {
            year,
            occurrences,
            sankrantis,
            tithi_boundaries: tithis.rows().to_vec(),
        })
    }

    /// Resolve one candidate; `None` when a nakshatra condition fails.
    fn place(
        &self,
        rule: &FestivalRule,
        order: usize,
        candidate: Candidate,
        days: &mut DayEventTable<'_, E>,
    ) -> Result<Option<FestivalOccurrence>, FestivalError> {
        let BasisResolution {
            date,
            evaluation,
            muhurta_start,
            muhurta_end,
        } = resolve_basis(rule.basis, candidate.start, days, &self.config)?;

        // Tithi rules that also name a nakshatra need the Moon there at the
        // evaluation instant.
        if let (Some(_), Some(nakshatra)) = (rule.tithi, rule.nakshatra) {
            let at = evaluation.unwrap_or(candidate.start);
            let moon = moon_sidereal_longitude_at(self.eph, at.jd_ut())?;
            if nakshatra_from_longitude(moon).nakshatra_index != nakshatra {
                return Ok(None);
            }
        }

        Ok(Some(FestivalOccurrence {
            date,
            rule_id: rule.id.clone(),
            name_key: rule.name_key.clone(),
            calculation: CalculationType::from(rule.basis),
            priority: rule.priority,
            order,
            masa_ino: Some(candidate.masa_ino),
            is_leap_month: candidate.is_leap_month,
            evaluation,
            muhurta_start,
            muhurta_end,
        }))
    }
}

/// Masas a rule applies to: its own, or all twelve.
fn masas_of(rule: &FestivalRule) -> impl Iterator<Item = u8> {
    match rule.masa {
        Some(m) => m..m + 1,
        None => 0..12,
    }
}

fn candidates_for(
    rule: &FestivalRule,
    tithis: &TithiTable,
    nakshatras: Option<&NakshatraTable>,
) -> Vec<Candidate> {
    let mut out = Vec::new();
    match (rule.tithi, rule.nakshatra) {
        (Some(tithi), _) => {
            for masa in masas_of(rule) {
                out.extend(tithis.lookup(tithi, masa, rule.adhik_maasa).map(|r| Candidate {
                    start: r.start,
                    masa_ino: r.masa_ino,
                    is_leap_month: r.is_leap_month,
                }));
            }
        }
        (None, Some(nakshatra)) => {
            if let Some(table) = nakshatras {
                for masa in masas_of(rule) {
                    out.extend(table.lookup(nakshatra, masa, rule.adhik_maasa).map(|r| {
                        Candidate {
                            start: r.start,
                            masa_ino: r.masa_ino,
                            is_leap_month: r.is_leap_month,
                        }
                    }));
                }
            }
        }
        (None, None) => {}
    }
    out.sort_by(|a, b| a.start.total_cmp(&b.start));
    out
}

/// Place a sankranti rule `offset_days` from the ingress's UTC civil date.
fn sankranti_occurrence(
    rule: &SankrantiRule,
    order: usize,
    event: &SankrantiEvent,
    tithis: &TithiTable,
) -> Result<FestivalOccurrence, FestivalError> {
    let anchor = event.instant.to_datetime()?.date_naive();
    let date = anchor
        .checked_add_signed(TimeDelta::days(i64::from(rule.offset_days)))
        .ok_or_else(|| {
            panchang_time::TimeError::InvalidCivil(format!(
                "{anchor} {:+} days is out of range",
                rule.offset_days
            ))
        })?;
    let lunation = tithis.masa_at(event.instant);
    Ok(FestivalOccurrence {
        date,
        rule_id: rule.id.clone(),
        name_key: rule.name_key.clone(),
        calculation: CalculationType::Sankranti,
        priority: rule.priority,
        order,
        masa_ino: lunation.map(|l| l.masa_ino()),
        is_leap_month: lunation.is_some_and(|l| l.is_leap_month),
        evaluation: Some(event.instant),
        muhurta_start: None,
        muhurta_end: None,
    })
}
