//! Whole-year nakshatra boundary scan.
//!
//! Runs over the lunations a [`TithiTable`] already walked, so each
//! nakshatra carries the masa of the lunation it starts in.

use panchang_base::{NAKSHATRA_SPAN_27, nakshatra_from_longitude};
use panchang_ephem::Ephemeris;
use panchang_time::Instant;

use crate::error::SearchError;
use crate::panchang::moon_sidereal_longitude_at;
use crate::scan_types::{KeyIndex, NakshatraBoundary, ScanConfig};
use crate::search_util::{find_angle_boundary, seconds_to_days};
use crate::tithi_scan::TithiTable;

/// Nakshatra occurrences of one civil year, indexed for festival lookup.
#[derive(Debug, Clone)]
pub struct NakshatraTable {
    rows: Vec<NakshatraBoundary>,
    index: KeyIndex,
}

impl NakshatraTable {
    pub fn rows(&self) -> &[NakshatraBoundary] {
        &self.rows
    }

    pub fn lookup(
        &self,
        nakshatra_ino: u8,
        masa_ino: u8,
        is_leap_month: bool,
    ) -> impl Iterator<Item = &NakshatraBoundary> + '_ {
        self.index
            .get((nakshatra_ino, masa_ino, is_leap_month))
            .iter()
            .map(|&i| &self.rows[i])
    }

    /// Occurrences of `nakshatra_ino` in any masa.
    pub fn occurrences(&self, nakshatra_ino: u8) -> impl Iterator<Item = &NakshatraBoundary> + '_ {
        self.rows
            .iter()
            .filter(move |r| r.nakshatra_ino == nakshatra_ino)
    }

    /// Nakshatra occurrence containing `instant`, if within the scan.
    pub fn nakshatra_at(&self, instant: Instant) -> Option<&NakshatraBoundary> {
        let pos = self.rows.partition_point(|r| r.end <= instant);
        self.rows
            .get(pos)
            .filter(|r| r.start <= instant && instant < r.end)
    }
}

/// Scan every nakshatra overlapping the year of `tithis`.
pub fn scan_nakshatras<E: Ephemeris + ?Sized>(
    eph: &E,
    tithis: &TithiTable,
    config: &ScanConfig,
) -> Result<NakshatraTable, SearchError> {
    config.validate().map_err(SearchError::InvalidConfig)?;
    let (Some(first), Some(last)) = (tithis.lunations().first(), tithis.lunations().last()) else {
        return Ok(NakshatraTable {
            rows: Vec::new(),
            index: KeyIndex::default(),
        });
    };
    let (year_start, year_end) = tithis.year_bounds();
    let moon = |t: f64| -> Result<f64, SearchError> { moon_sidereal_longitude_at(eph, t) };
    let convergence = seconds_to_days(config.tol_sec);

    // Walk back to the start of the nakshatra in force at the opening new moon.
    let mut current = nakshatra_from_longitude(moon(first.start.jd_ut())?).nakshatra_index;
    let opening = find_angle_boundary(
        &moon,
        first.start.jd_ut(),
        f64::from(current) * NAKSHATRA_SPAN_27,
        -config.step_days,
        config.max_steps,
        convergence,
    )?
    .ok_or(SearchError::no_convergence("could not find opening nakshatra start"))?;
    let mut cursor = Instant::from_jd_ut(opening)?;
    let mut rows = Vec::new();
    // ~13.2 deg/day against 13.33 deg segments: about 27.3 rows per lunation.
    let max_rows = tithis.lunations().len() * 30;
    while cursor < last.end {
        if rows.len() > max_rows {
            return Err(SearchError::no_convergence("nakshatra walk did not terminate"));
        }
        let next = (current + 1) % 27;
        let jd = find_angle_boundary(
            &moon,
            cursor.jd_ut(),
            f64::from(next) * NAKSHATRA_SPAN_27,
            config.step_days,
            config.max_steps,
            convergence,
        )?
        .ok_or(SearchError::no_convergence("could not find nakshatra boundary"))?;
        let end = Instant::from_jd_ut(jd)?;

        let (masa_ino, is_leap_month) = tithis
            .masa_at(cursor)
            .map(|l| (l.masa_ino(), l.is_leap_month))
            .unwrap_or((first.masa_ino(), first.is_leap_month));
        if end > year_start && cursor < year_end {
            rows.push(NakshatraBoundary {
                nakshatra_ino: current,
                masa_ino,
                is_leap_month,
                start: cursor,
                end,
            });
        }
        cursor = end;
        current = next;
    }

    let index = KeyIndex::build(
        rows.iter()
            .map(|r| (r.nakshatra_ino, r.masa_ino, r.is_leap_month)),
    );
    tracing::info!(year = tithis.year(), nakshatras = rows.len(), "nakshatra scan complete");
    Ok(NakshatraTable { rows, index })
}
