//! Panchang classification: tithi, karana, yoga, nakshatra and masa.
//!
//! Each element is classified at the caller's instant and then bracketed by
//! an angular boundary search backward (start) and forward (end). The
//! functions are instant-pure: choosing sunrise, sunset or any other
//! evaluation moment is the caller's business.

use panchang_base::{
    KARANA_SEGMENT_DEG, NAKSHATRA_SPAN_27, TITHI_SEGMENT_DEG, YOGA_SEGMENT_DEG,
    karana_from_elongation, masa_for_lunation, nakshatra_from_longitude, rashi_from_longitude,
    tithi_from_elongation, yoga_from_sum,
};
use panchang_ephem::Ephemeris;
use panchang_time::Instant;

use crate::error::SearchError;
use crate::lunar_phase::{next_new_moon, prev_new_moon};
use crate::panchang_types::{
    KaranaInfo, MasaInfo, PanchangInfo, PanchangNakshatraInfo, TithiInfo, YogaInfo,
};
use crate::search_util::find_angle_boundary;

const BOUNDARY_CONVERGENCE_DAYS: f64 = 1e-7;

/// Moon-Sun elongation in [0, 360) at `jd_ut`.
pub fn elongation_at<E: Ephemeris + ?Sized>(eph: &E, jd_ut: f64) -> Result<f64, SearchError> {
    Ok(eph.elongation(jd_ut)?)
}

/// Sidereal Sun longitude in [0, 360) at `jd_ut`.
pub fn sun_sidereal_longitude_at<E: Ephemeris + ?Sized>(
    eph: &E,
    jd_ut: f64,
) -> Result<f64, SearchError> {
    Ok(eph.sun_sidereal_longitude(jd_ut)?)
}

/// Sidereal Moon longitude in [0, 360) at `jd_ut`.
pub fn moon_sidereal_longitude_at<E: Ephemeris + ?Sized>(
    eph: &E,
    jd_ut: f64,
) -> Result<f64, SearchError> {
    Ok(eph.moon_sidereal_longitude(jd_ut)?)
}

/// (Moon_sid + Sun_sid) mod 360 at `jd_ut`.
///
/// Ayanamsha does NOT cancel in the sum, so sidereal coords are needed.
pub fn sidereal_sum_at<E: Ephemeris + ?Sized>(eph: &E, jd_ut: f64) -> Result<f64, SearchError> {
    Ok(eph.sidereal_sum(jd_ut)?)
}

/// Sun's sidereal rashi index (0 = Mesha) at `jd_ut`.
pub fn sun_rashi_index_at<E: Ephemeris + ?Sized>(eph: &E, jd_ut: f64) -> Result<u8, SearchError> {
    Ok(rashi_from_longitude(sun_sidereal_longitude_at(eph, jd_ut)?).rashi_index)
}

/// Segment `[index·span, (index+1)·span)` of `f` containing `jd_ut`, as
/// `(start, end)` instants.
fn segment_bounds(
    f: &dyn Fn(f64) -> Result<f64, SearchError>,
    jd_ut: f64,
    index: u8,
    span_deg: f64,
    step: f64,
    max_steps: usize,
    (what_start, what_end): (&'static str, &'static str),
) -> Result<(Instant, Instant), SearchError> {
    let start_target = f64::from(index) * span_deg;
    let end_target = (f64::from(index) + 1.0) * span_deg;

    let start_jd = find_angle_boundary(
        f,
        jd_ut,
        start_target,
        -step,
        max_steps,
        BOUNDARY_CONVERGENCE_DAYS,
    )?
    .ok_or(SearchError::no_convergence(what_start))?;
    let end_jd = find_angle_boundary(
        f,
        jd_ut,
        end_target,
        step,
        max_steps,
        BOUNDARY_CONVERGENCE_DAYS,
    )?
    .ok_or(SearchError::no_convergence(what_end))?;

    Ok((Instant::from_jd_ut(start_jd)?, Instant::from_jd_ut(end_jd)?))
}

/// Determine the Tithi at `instant`.
pub fn tithi_for_instant<E: Ephemeris + ?Sized>(
    eph: &E,
    instant: Instant,
) -> Result<TithiInfo, SearchError> {
    let jd = instant.jd_ut();
    tithi_at(eph, jd, elongation_at(eph, jd)?)
}

/// Determine the Tithi from a pre-computed elongation.
///
/// Accepts the Moon-Sun elongation in degrees [0, 360) at `jd_ut`.
/// The provider is still needed for the start/end boundary searches.
pub fn tithi_at<E: Ephemeris + ?Sized>(
    eph: &E,
    jd_ut: f64,
    elongation_deg: f64,
) -> Result<TithiInfo, SearchError> {
    let pos = tithi_from_elongation(elongation_deg);

    // ~12 deg/day relative motion, a tithi lasts roughly a day.
    let elong_fn = |t: f64| -> Result<f64, SearchError> { elongation_at(eph, t) };
    let (start, end) = segment_bounds(
        &elong_fn,
        jd_ut,
        pos.tithi_index,
        TITHI_SEGMENT_DEG,
        0.25,
        20,
        ("could not find tithi start", "could not find tithi end"),
    )?;

    Ok(TithiInfo {
        tithi: pos.tithi,
        tithi_index: pos.tithi_index,
        paksha: pos.paksha,
        tithi_in_paksha: pos.tithi_in_paksha,
        start,
        end,
    })
}

/// Determine the Karana at `instant`.
pub fn karana_for_instant<E: Ephemeris + ?Sized>(
    eph: &E,
    instant: Instant,
) -> Result<KaranaInfo, SearchError> {
    let jd = instant.jd_ut();
    karana_at(eph, jd, elongation_at(eph, jd)?)
}

/// Determine the Karana from a pre-computed elongation.
pub fn karana_at<E: Ephemeris + ?Sized>(
    eph: &E,
    jd_ut: f64,
    elongation_deg: f64,
) -> Result<KaranaInfo, SearchError> {
    let pos = karana_from_elongation(elongation_deg);

    let elong_fn = |t: f64| -> Result<f64, SearchError> { elongation_at(eph, t) };
    let (start, end) = segment_bounds(
        &elong_fn,
        jd_ut,
        pos.karana_index,
        KARANA_SEGMENT_DEG,
        0.125,
        20,
        ("could not find karana start", "could not find karana end"),
    )?;

    Ok(KaranaInfo {
        karana: pos.karana,
        karana_index: pos.karana_index,
        start,
        end,
    })
}

/// Determine the Yoga at `instant`.
pub fn yoga_for_instant<E: Ephemeris + ?Sized>(
    eph: &E,
    instant: Instant,
) -> Result<YogaInfo, SearchError> {
    let jd = instant.jd_ut();
    yoga_at(eph, jd, sidereal_sum_at(eph, jd)?)
}

/// Determine the Yoga from a pre-computed sidereal sum.
pub fn yoga_at<E: Ephemeris + ?Sized>(
    eph: &E,
    jd_ut: f64,
    sidereal_sum_deg: f64,
) -> Result<YogaInfo, SearchError> {
    let pos = yoga_from_sum(sidereal_sum_deg);

    let sum_fn = |t: f64| -> Result<f64, SearchError> { sidereal_sum_at(eph, t) };
    let (start, end) = segment_bounds(
        &sum_fn,
        jd_ut,
        pos.yoga_index,
        YOGA_SEGMENT_DEG,
        0.25,
        20,
        ("could not find yoga start", "could not find yoga end"),
    )?;

    Ok(YogaInfo {
        yoga: pos.yoga,
        yoga_index: pos.yoga_index,
        start,
        end,
    })
}

/// Determine the Moon's nakshatra at `instant`.
pub fn nakshatra_for_instant<E: Ephemeris + ?Sized>(
    eph: &E,
    instant: Instant,
) -> Result<PanchangNakshatraInfo, SearchError> {
    let jd = instant.jd_ut();
    nakshatra_at(eph, jd, moon_sidereal_longitude_at(eph, jd)?)
}

/// Determine the Moon's nakshatra from a pre-computed sidereal longitude.
pub fn nakshatra_at<E: Ephemeris + ?Sized>(
    eph: &E,
    jd_ut: f64,
    moon_sidereal_deg: f64,
) -> Result<PanchangNakshatraInfo, SearchError> {
    let pos = nakshatra_from_longitude(moon_sidereal_deg);

    // Moon moves ~13.2 deg/day, so one nakshatra is about a day.
    let moon_fn = |t: f64| -> Result<f64, SearchError> { moon_sidereal_longitude_at(eph, t) };
    let (start, end) = segment_bounds(
        &moon_fn,
        jd_ut,
        pos.nakshatra_index,
        NAKSHATRA_SPAN_27,
        0.5,
        20,
        ("could not find nakshatra start", "could not find nakshatra end"),
    )?;

    Ok(PanchangNakshatraInfo {
        nakshatra: pos.nakshatra,
        nakshatra_index: pos.nakshatra_index,
        pada: pos.pada,
        start,
        end,
    })
}

/// Name the lunation bounded by two new moons.
pub fn masa_for_new_moons<E: Ephemeris + ?Sized>(
    eph: &E,
    opening: Instant,
    closing: Instant,
) -> Result<MasaInfo, SearchError> {
    let rashi_at_open = sun_rashi_index_at(eph, opening.jd_ut())?;
    let rashi_at_close = sun_rashi_index_at(eph, closing.jd_ut())?;
    let (masa, adhika) = masa_for_lunation(rashi_at_open, rashi_at_close);
    Ok(MasaInfo {
        masa,
        adhika,
        start: opening,
        end: closing,
    })
}

/// Determine the Masa (Amanta lunar month) containing `instant`.
///
/// The month is named after the rashi the Sun occupies at the *next* new
/// moon; if the Sun's rashi is unchanged between the bounding new moons the
/// month is adhika.
pub fn masa_at<E: Ephemeris + ?Sized>(eph: &E, instant: Instant) -> Result<MasaInfo, SearchError> {
    let prev_nm = prev_new_moon(eph, instant)?;
    // An instant sitting on a new moon opens the next month.
    let probe = if instant.jd_ut() > prev_nm.jd_ut() + 1.0 {
        instant
    } else {
        prev_nm.add_days(1.0)
    };
    let next_nm = next_new_moon(eph, probe)?;
    masa_for_new_moons(eph, prev_nm, next_nm)
}

/// All panchang elements at `instant`.
pub fn panchang_at<E: Ephemeris + ?Sized>(
    eph: &E,
    instant: Instant,
) -> Result<PanchangInfo, SearchError> {
    let jd = instant.jd_ut();
    let elong = elongation_at(eph, jd)?;
    let sun_sid = sun_sidereal_longitude_at(eph, jd)?;
    let moon_sid = moon_sidereal_longitude_at(eph, jd)?;
    let sum = panchang_time::normalize_360(sun_sid + moon_sid);

    Ok(PanchangInfo {
        instant,
        sun_sidereal_deg: sun_sid,
        moon_sidereal_deg: moon_sid,
        sun_rashi: rashi_from_longitude(sun_sid).rashi,
        moon_rashi: rashi_from_longitude(moon_sid).rashi,
        tithi: tithi_at(eph, jd, elong)?,
        karana: karana_at(eph, jd, elong)?,
        yoga: yoga_at(eph, jd, sum)?,
        nakshatra: nakshatra_at(eph, jd, moon_sid)?,
        masa: masa_at(eph, instant)?,
    })
}
