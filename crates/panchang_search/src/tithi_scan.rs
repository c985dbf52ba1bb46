//! Whole-year tithi boundary scan.
//!
//! The scan opens at the new moon preceding local January 1 and walks every
//! 12° elongation crossing up to the first new moon after the next local
//! January 1. Each lunation is named once from the Sun's rashi at its two
//! bounding new moons, and every tithi inherits that name.

use chrono::NaiveDate;
use panchang_base::{TITHI_COUNT, TITHI_SEGMENT_DEG};
use panchang_ephem::Ephemeris;
use panchang_time::{Instant, TimeZoneSpec};

use crate::error::SearchError;
use crate::lunar_phase::{next_new_moon, prev_new_moon};
use crate::panchang::{elongation_at, masa_for_new_moons};
use crate::scan_types::{KeyIndex, Lunation, ScanConfig, TithiBoundary};
use crate::search_util::{find_angle_boundary, seconds_to_days};

/// A year spans at most 14 lunations once the opening and closing months
/// are counted.
const MAX_LUNATIONS: usize = 16;

/// Tithi occurrences of one civil year, indexed for festival lookup.
#[derive(Debug, Clone)]
pub struct TithiTable {
    year: i32,
    year_start: Instant,
    year_end: Instant,
    lunations: Vec<Lunation>,
    rows: Vec<TithiBoundary>,
    index: KeyIndex,
}

impl TithiTable {
    pub fn year(&self) -> i32 {
        self.year
    }

    /// Zone-local `[Jan 1, next Jan 1)` the table covers.
    pub fn year_bounds(&self) -> (Instant, Instant) {
        (self.year_start, self.year_end)
    }

    /// Tithi occurrences overlapping the year, in time order.
    pub fn rows(&self) -> &[TithiBoundary] {
        &self.rows
    }

    /// Every lunation the scan walked, including the partial ones at the
    /// edges of the year.
    pub fn lunations(&self) -> &[Lunation] {
        &self.lunations
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Occurrences of `tithi_ino` in masa `masa_ino` with the given leap flag.
    pub fn lookup(
        &self,
        tithi_ino: u8,
        masa_ino: u8,
        is_leap_month: bool,
    ) -> impl Iterator<Item = &TithiBoundary> + '_ {
        self.index
            .get((tithi_ino, masa_ino, is_leap_month))
            .iter()
            .map(|&i| &self.rows[i])
    }

    /// Lunation containing `instant`, if the scan covered it.
    pub fn masa_at(&self, instant: Instant) -> Option<&Lunation> {
        let pos = self.lunations.partition_point(|l| l.end <= instant);
        self.lunations.get(pos).filter(|l| l.contains(instant))
    }

    /// Tithi occurrence containing `instant`, if within the year.
    pub fn tithi_at(&self, instant: Instant) -> Option<&TithiBoundary> {
        let pos = self.rows.partition_point(|r| r.end <= instant);
        self.rows
            .get(pos)
            .filter(|r| r.start <= instant && instant < r.end)
    }
}

/// Walk the new moons bracketing the zone-local civil year.
pub(crate) fn lunations_for_year<E: Ephemeris + ?Sized>(
    eph: &E,
    year_start: Instant,
    year_end: Instant,
) -> Result<Vec<Lunation>, SearchError> {
    let mut lunations = Vec::new();
    let mut open = prev_new_moon(eph, year_start)?;
    for _ in 0..MAX_LUNATIONS {
        let close = next_new_moon(eph, open.add_days(1.0))?;
        let masa = masa_for_new_moons(eph, open, close)?;
        lunations.push(Lunation {
            start: open,
            end: close,
            masa: masa.masa,
            is_leap_month: masa.adhika,
        });
        if close > year_end {
            return Ok(lunations);
        }
        open = close;
    }
    Err(SearchError::no_convergence("lunation walk did not reach year end"))
}

/// The 30 tithis of one lunation.
fn tithis_in_lunation<E: Ephemeris + ?Sized>(
    eph: &E,
    lunation: &Lunation,
    config: &ScanConfig,
) -> Result<Vec<TithiBoundary>, SearchError> {
    let elong = |t: f64| -> Result<f64, SearchError> { elongation_at(eph, t) };
    let convergence = seconds_to_days(config.tol_sec);

    let mut rows = Vec::with_capacity(usize::from(TITHI_COUNT));
    let mut cursor = lunation.start;
    for k in 1..TITHI_COUNT {
        let target = f64::from(k) * TITHI_SEGMENT_DEG;
        let jd = find_angle_boundary(
            &elong,
            cursor.jd_ut(),
            target,
            config.step_days,
            config.max_steps,
            convergence,
        )?
        .ok_or(SearchError::no_convergence("could not find tithi boundary"))?;
        let end = Instant::from_jd_ut(jd)?;
        rows.push(TithiBoundary {
            tithi_ino: k - 1,
            masa_ino: lunation.masa_ino(),
            is_leap_month: lunation.is_leap_month,
            start: cursor,
            end,
        });
        cursor = end;
    }
    rows.push(TithiBoundary {
        tithi_ino: TITHI_COUNT - 1,
        masa_ino: lunation.masa_ino(),
        is_leap_month: lunation.is_leap_month,
        start: cursor,
        end: lunation.end,
    });
    Ok(rows)
}

/// Zone-local `[Jan 1 year, Jan 1 year+1)`.
pub fn civil_year_bounds(year: i32, zone: &TimeZoneSpec) -> Result<(Instant, Instant), SearchError> {
    let jan1 = NaiveDate::from_ymd_opt(year, 1, 1)
        .ok_or(SearchError::InvalidConfig("year out of range"))?;
    let next_jan1 = NaiveDate::from_ymd_opt(year + 1, 1, 1)
        .ok_or(SearchError::InvalidConfig("year out of range"))?;
    Ok((zone.day_start(jan1)?, zone.day_start(next_jan1)?))
}

/// Scan every tithi overlapping the zone-local civil `year`.
pub fn scan_tithis<E: Ephemeris + ?Sized>(
    eph: &E,
    year: i32,
    zone: &TimeZoneSpec,
    config: &ScanConfig,
) -> Result<TithiTable, SearchError> {
    config.validate().map_err(SearchError::InvalidConfig)?;
    let (year_start, year_end) = civil_year_bounds(year, zone)?;
    let lunations = lunations_for_year(eph, year_start, year_end)?;

    let mut rows = Vec::with_capacity(lunations.len() * usize::from(TITHI_COUNT));
    for lunation in &lunations {
        rows.extend(
            tithis_in_lunation(eph, lunation, config)?
                .into_iter()
                .filter(|r| r.end > year_start && r.start < year_end),
        );
    }

    let index = KeyIndex::build(
        rows.iter()
            .map(|r| (r.tithi_ino, r.masa_ino, r.is_leap_month)),
    );
    tracing::info!(
        year,
        lunations = lunations.len(),
        tithis = rows.len(),
        "tithi scan complete"
    );

    Ok(TithiTable {
        year,
        year_start,
        year_end,
        lunations,
        rows,
        index,
    })
}
