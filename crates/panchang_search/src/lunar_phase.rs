//! New and full moon search.
//!
//! A new moon is a zero of the Moon-Sun elongation, a full moon a crossing
//! of 180°. The elongation advances about 12.2°/day, so a half-day step
//! never skips a crossing and 62 steps always cover one synodic month.

use panchang_ephem::Ephemeris;
use panchang_time::Instant;

use crate::error::SearchError;
use crate::search_util::find_angle_boundary;

const PHASE_STEP_DAYS: f64 = 0.5;
const PHASE_MAX_STEPS: usize = 62;
/// ~0.01 s.
const PHASE_CONVERGENCE_DAYS: f64 = 1e-7;

/// Syzygy searched for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LunarPhase {
    /// Amavasya: elongation 0°.
    NewMoon,
    /// Purnima: elongation 180°.
    FullMoon,
}

impl LunarPhase {
    pub const fn elongation_deg(self) -> f64 {
        match self {
            Self::NewMoon => 0.0,
            Self::FullMoon => 180.0,
        }
    }
}

fn phase_search<E: Ephemeris + ?Sized>(
    eph: &E,
    phase: LunarPhase,
    from: Instant,
    step: f64,
) -> Result<Instant, SearchError> {
    let elong = |t: f64| -> Result<f64, SearchError> { Ok(eph.elongation(t)?) };
    let jd = find_angle_boundary(
        &elong,
        from.jd_ut(),
        phase.elongation_deg(),
        step,
        PHASE_MAX_STEPS,
        PHASE_CONVERGENCE_DAYS,
    )?
    .ok_or(SearchError::no_convergence(match phase {
        LunarPhase::NewMoon => "could not find new moon",
        LunarPhase::FullMoon => "could not find full moon",
    }))?;
    Ok(Instant::from_jd_ut(jd)?)
}

/// First `phase` at or after `from`.
pub fn next_lunar_phase<E: Ephemeris + ?Sized>(
    eph: &E,
    phase: LunarPhase,
    from: Instant,
) -> Result<Instant, SearchError> {
    phase_search(eph, phase, from, PHASE_STEP_DAYS)
}

/// Last `phase` at or before `from`.
pub fn prev_lunar_phase<E: Ephemeris + ?Sized>(
    eph: &E,
    phase: LunarPhase,
    from: Instant,
) -> Result<Instant, SearchError> {
    phase_search(eph, phase, from, -PHASE_STEP_DAYS)
}

pub fn next_new_moon<E: Ephemeris + ?Sized>(
    eph: &E,
    from: Instant,
) -> Result<Instant, SearchError> {
    next_lunar_phase(eph, LunarPhase::NewMoon, from)
}

pub fn prev_new_moon<E: Ephemeris + ?Sized>(
    eph: &E,
    from: Instant,
) -> Result<Instant, SearchError> {
    prev_lunar_phase(eph, LunarPhase::NewMoon, from)
}

pub fn next_full_moon<E: Ephemeris + ?Sized>(
    eph: &E,
    from: Instant,
) -> Result<Instant, SearchError> {
    next_lunar_phase(eph, LunarPhase::FullMoon, from)
}

pub fn prev_full_moon<E: Ephemeris + ?Sized>(
    eph: &E,
    from: Instant,
) -> Result<Instant, SearchError> {
    prev_lunar_phase(eph, LunarPhase::FullMoon, from)
}

/// New moons in `[start, end)`, in order.
pub fn new_moons_between<E: Ephemeris + ?Sized>(
    eph: &E,
    start: Instant,
    end: Instant,
) -> Result<Vec<Instant>, SearchError> {
    let mut out = Vec::new();
    let mut cursor = start;
    loop {
        let nm = next_new_moon(eph, cursor)?;
        if nm >= end {
            break;
        }
        out.push(nm);
        // Step past the root so the next search does not find it again.
        cursor = nm.add_days(1.0);
    }
    Ok(out)
}
