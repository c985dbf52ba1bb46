//! Sankranti search: the instant the sidereal Sun enters a sign.
//!
//! Each sign is searched inside a calendar window that contains its ingress
//! around J2000, slid by whole days to follow the precession of the sidereal
//! signs against the Gregorian year. The residual
//! `normalize_pm180(sidereal_sun - 30·sign)` is bisected inside the window
//! after unwrapping it across the ±180° seam.

use chrono::Datelike;
use panchang_base::{ALL_RASHIS, RASHI_SPAN_DEG};
use panchang_ephem::Ephemeris;
use panchang_time::{Instant, TimeZoneSpec, normalize_pm180, unwrap_near};
use rayon::prelude::*;

use crate::error::SearchError;
use crate::panchang::sun_sidereal_longitude_at;
use crate::sankranti_types::{BisectionDebug, SankrantiConfig, SankrantiEvent};
use crate::search_util::{bisect_zero, find_angle_boundary, seconds_to_days};

/// Civil window `(start_month, start_day, end_month, end_day)` per sign,
/// valid for years near [`WINDOW_EPOCH_YEAR`].
///
/// Dhanu's window ends in January of the following year.
const SIGN_WINDOWS: [(u32, u32, u32, u32); 12] = [
    (4, 12, 5, 14),   // Mesha
    (5, 13, 6, 14),   // Vrishabha
    (6, 13, 7, 15),   // Mithuna
    (7, 14, 8, 15),   // Karka
    (8, 14, 9, 15),   // Simha
    (9, 14, 10, 16),  // Kanya
    (10, 15, 11, 15), // Tula
    (11, 13, 12, 15), // Vrischika
    (12, 13, 1, 14),  // Dhanu
    (1, 11, 2, 12),   // Makara
    (2, 10, 3, 13),   // Kumbha
    (3, 11, 4, 13),   // Meena
];

/// Year the fixed windows are centred on.
pub const WINDOW_EPOCH_YEAR: i32 = 2000;

/// Days per year a sidereal ingress drifts later in the Gregorian calendar:
/// general precession (50.29"/yr) over the Sun's mean motion (0.98565°/day).
const INGRESS_DRIFT_DAYS_PER_YEAR: f64 = 50.29 / 3600.0 / 0.985_647;

/// Whole-day slide applied to the windows of `year`.
pub fn window_shift_days(year: i32) -> f64 {
    (f64::from(year - WINDOW_EPOCH_YEAR) * INGRESS_DRIFT_DAYS_PER_YEAR).round()
}

fn check_sign(sign: u8) -> Result<(), SearchError> {
    if usize::from(sign) < ALL_RASHIS.len() {
        Ok(())
    } else {
        Err(SearchError::InvalidConfig("sign index must be 0..=11"))
    }
}

/// Initial search bracket for `sign` in civil `year`, as zone-local
/// midnights of the fixed window moved by [`window_shift_days`].
pub fn sankranti_bracket(
    sign: u8,
    year: i32,
    zone: &TimeZoneSpec,
) -> Result<(Instant, Instant), SearchError> {
    check_sign(sign)?;
    let (sm, sd, em, ed) = SIGN_WINDOWS[usize::from(sign)];
    let end_year = if em < sm { year + 1 } else { year };
    let shift = window_shift_days(year);
    let start = zone.local_instant(year, sm, sd, 0, 0, 0.0)?.add_days(shift);
    let end = zone.local_instant(end_year, em, ed, 0, 0, 0.0)?.add_days(shift);
    Ok((start, end))
}

/// Signed sidereal distance of the Sun from the start of `sign`, in (-180, 180].
fn ingress_residual<E: Ephemeris + ?Sized>(
    eph: &E,
    sign: u8,
    jd_ut: f64,
) -> Result<f64, SearchError> {
    let target = f64::from(sign) * RASHI_SPAN_DEG;
    Ok(normalize_pm180(sun_sidereal_longitude_at(eph, jd_ut)? - target))
}

/// Find the ingress of the sidereal Sun into `sign` within the window for
/// civil `year` in `zone`.
///
/// A bracket without a sign change is first seam-corrected (the upper value
/// is unwrapped to lie within 180° of the lower), then widened by
/// `expand_days` on both sides up to `max_expansions` times.
pub fn find_sankranti<E: Ephemeris + ?Sized>(
    eph: &E,
    sign: u8,
    year: i32,
    zone: &TimeZoneSpec,
    config: &SankrantiConfig,
) -> Result<SankrantiEvent, SearchError> {
    config.validate().map_err(SearchError::InvalidConfig)?;
    let (mut a, mut b) = sankranti_bracket(sign, year, zone)?;

    let mut expansions = 0;
    let (fa, fb) = loop {
        let fa = ingress_residual(eph, sign, a.jd_ut())?;
        let fb = unwrap_near(ingress_residual(eph, sign, b.jd_ut())?, fa);
        if fa * fb <= 0.0 {
            break (fa, fb);
        }
        if expansions >= config.max_expansions {
            return Err(SearchError::NoBracket {
                sign,
                year,
                debug: BisectionDebug {
                    fa,
                    fb,
                    iterations: expansions,
                    bracket: (a, b),
                },
            });
        }
        expansions += 1;
        a = a.add_days(-config.expand_days);
        b = b.add_days(config.expand_days);
        tracing::debug!(sign, year, expansions, %a, %b, "widening sankranti bracket");
    };

    let continuous = |t: f64| -> Result<f64, SearchError> {
        Ok(unwrap_near(ingress_residual(eph, sign, t)?, fa))
    };
    let (root_jd, iterations) = bisect_zero(
        a.jd_ut(),
        fa,
        b.jd_ut(),
        config.max_iter,
        seconds_to_days(config.tol_sec),
        &continuous,
    )?;

    let instant = Instant::from_jd_ut(root_jd)?;
    Ok(SankrantiEvent {
        sign_index: sign,
        rashi: ALL_RASHIS[usize::from(sign)],
        instant,
        local_year: zone.local_date(instant)?.year(),
        sidereal_longitude_deg: sun_sidereal_longitude_at(eph, root_jd)?,
        debug: BisectionDebug {
            fa,
            fb,
            iterations,
            bracket: (a, b),
        },
    })
}

/// All twelve ingresses whose zone-local civil year is `year`, in time order.
///
/// Every sign is tried against the windows of `year - 1`, `year` and
/// `year + 1`. A sign whose search fails is logged and left out; the other
/// signs are still returned.
pub fn sankrantis_for_calendar_year<E: Ephemeris + ?Sized>(
    eph: &E,
    year: i32,
    zone: &TimeZoneSpec,
    config: &SankrantiConfig,
) -> Vec<SankrantiEvent> {
    let per_sign: Vec<Option<SankrantiEvent>> = (0..ALL_RASHIS.len() as u8)
        .into_par_iter()
        .map(|sign| {
            let mut earliest: Option<SankrantiEvent> = None;
            for search_year in [year - 1, year, year + 1] {
                match find_sankranti(eph, sign, search_year, zone, config) {
                    Ok(ev) if ev.local_year == year => {
                        if earliest.is_none_or(|e| ev.instant < e.instant) {
                            earliest = Some(ev);
                        }
                    }
                    Ok(_) => {}
                    Err(err) => {
                        tracing::warn!(sign, search_year, %err, "sankranti search failed");
                    }
                }
            }
            earliest
        })
        .collect();

    let mut events: Vec<SankrantiEvent> = per_sign.into_iter().flatten().collect();
    events.sort_by(|x, y| x.instant.total_cmp(&y.instant));
    tracing::info!(year, found = events.len(), "sankranti year scan complete");
    events
}

/// Next ingress of the sidereal Sun into any sign after `from`.
///
/// Steps one day at a time (the Sun needs ~30 days per sign) and then
/// bisects to `tol_sec`.
pub fn next_sankranti<E: Ephemeris + ?Sized>(
    eph: &E,
    from: Instant,
    zone: &TimeZoneSpec,
    config: &SankrantiConfig,
) -> Result<SankrantiEvent, SearchError> {
    config.validate().map_err(SearchError::InvalidConfig)?;
    let sid = sun_sidereal_longitude_at(eph, from.jd_ut())?;
    let sign = ((sid / RASHI_SPAN_DEG).floor() as u8 + 1) % 12;
    let target = f64::from(sign) * RASHI_SPAN_DEG;

    let sun_fn = |t: f64| -> Result<f64, SearchError> { sun_sidereal_longitude_at(eph, t) };
    let root_jd = find_angle_boundary(
        &sun_fn,
        from.jd_ut(),
        target,
        1.0,
        40,
        seconds_to_days(config.tol_sec),
    )?
    .ok_or(SearchError::no_convergence("could not find next sankranti"))?;

    let instant = Instant::from_jd_ut(root_jd)?;
    let residual = ingress_residual(eph, sign, root_jd)?;
    Ok(SankrantiEvent {
        sign_index: sign,
        rashi: ALL_RASHIS[usize::from(sign)],
        instant,
        local_year: zone.local_date(instant)?.year(),
        sidereal_longitude_deg: sun_sidereal_longitude_at(eph, root_jd)?,
        debug: BisectionDebug {
            fa: residual,
            fb: residual,
            iterations: 0,
            bracket: (from, instant),
        },
    })
}
