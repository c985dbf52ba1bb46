//! Per-run table of sunrise, sunset and moonrise by civil date.
//!
//! Every festival resolved in one year asks for the rise/set instants of a
//! handful of dates, often the same ones. The table is owned by the caller
//! and memoizes per date, so nothing outlives a run.

use std::collections::HashMap;

use chrono::NaiveDate;
use panchang_ephem::{Ephemeris, GeoLocation};
use panchang_time::{Instant, TimeZoneSpec};

use crate::error::FestivalError;

/// Rise/set instants of one zone-local civil day.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DayEvents {
    pub date: NaiveDate,
    /// Local midnight opening `date`.
    pub day_start: Instant,
    pub sunrise: Option<Instant>,
    pub sunset: Option<Instant>,
    /// Sunrise of the following civil day; closes this day's night.
    pub next_sunrise: Option<Instant>,
    /// Moonrise of `date`, or of an adjacent day when `date` has none.
    pub moonrise: Option<Instant>,
}

/// Caller-owned memo of [`DayEvents`] for one location and zone.
pub struct DayEventTable<'a, E: Ephemeris + ?Sized> {
    eph: &'a E,
    location: GeoLocation,
    zone: TimeZoneSpec,
    moonrise_window_hours: f64,
    days: HashMap<NaiveDate, DayEvents>,
}

pub(crate) fn next_day(date: NaiveDate) -> Result<NaiveDate, FestivalError> {
    date.succ_opt()
        .ok_or_else(|| panchang_time::TimeError::InvalidCivil(format!("no day after {date}")).into())
}

fn prev_day(date: NaiveDate) -> Result<NaiveDate, FestivalError> {
    date.pred_opt()
        .ok_or_else(|| panchang_time::TimeError::InvalidCivil(format!("no day before {date}")).into())
}

impl<'a, E: Ephemeris + ?Sized> DayEventTable<'a, E> {
    pub fn new(
        eph: &'a E,
        location: GeoLocation,
        zone: TimeZoneSpec,
        moonrise_window_hours: f64,
    ) -> Self {
        Self {
            eph,
            location,
            zone,
            moonrise_window_hours,
            days: HashMap::new(),
        }
    }

    pub fn zone(&self) -> &TimeZoneSpec {
        &self.zone
    }

    pub fn location(&self) -> &GeoLocation {
        &self.location
    }

    /// Number of memoized dates.
    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Events of `date`, computing them on first use.
    pub fn get(&mut self, date: NaiveDate) -> Result<DayEvents, FestivalError> {
        if let Some(events) = self.days.get(&date) {
            return Ok(*events);
        }
        let events = self.compute(date)?;
        self.days.insert(date, events);
        Ok(events)
    }

    fn compute(&self, date: NaiveDate) -> Result<DayEvents, FestivalError> {
        let day_start = self.zone.day_start(date)?;
        let next_start = self.zone.day_start(next_day(date)?)?;
        Ok(DayEvents {
            date,
            day_start,
            sunrise: self.eph.sunrise(day_start, &self.location)?,
            sunset: self.eph.sunset(day_start, &self.location)?,
            next_sunrise: self.eph.sunrise(next_start, &self.location)?,
            moonrise: self.moonrise_with_fallback(date, day_start)?,
        })
    }

    /// Moonrise of `date`; when the Moon does not rise that day, the
    /// previous or next day's moonrise is taken if it lies within
    /// `moonrise_window_hours` of the day's local noon.
    fn moonrise_with_fallback(
        &self,
        date: NaiveDate,
        day_start: Instant,
    ) -> Result<Option<Instant>, FestivalError> {
        if let Some(rise) = self.eph.moonrise(day_start, &self.location)? {
            return Ok(Some(rise));
        }
        let noon = day_start.add_days(0.5);
        let window_sec = self.moonrise_window_hours * 3600.0;
        for neighbour in [prev_day(date)?, next_day(date)?] {
            let start = self.zone.day_start(neighbour)?;
            if let Some(rise) = self.eph.moonrise(start, &self.location)? {
                if rise.seconds_since(noon).abs() <= window_sec {
                    tracing::debug!(%date, %neighbour, "moonrise taken from adjacent day");
                    return Ok(Some(rise));
                }
            }
        }
        tracing::debug!(%date, "no moonrise within fallback window");
        Ok(None)
    }
}
