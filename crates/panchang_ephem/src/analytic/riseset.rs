//! Rise/set search by altitude scan.
//!
//! The body's altitude minus its target altitude is sampled across the civil
//! day in fixed steps; the first sign change in the requested direction is
//! then bisected down to about a second. Scanning, rather than solving
//! the hour-angle equation at noon, also finds moonrise on days when the
//! Moon rises after midnight and reports a missing event cleanly.

use panchang_time::{Instant, SECONDS_PER_DAY};

use crate::error::EphemerisError;
use crate::riseset_types::{RiseSetEvent, RiseSetResult};

/// Sampling step across the day.
const SCAN_STEP_DAYS: f64 = 1.0 / 48.0;

/// Bisection stops below this bracket width.
const TOLERANCE_DAYS: f64 = 1.0 / SECONDS_PER_DAY;

const MAX_BISECTIONS: usize = 40;

/// Find the first `event` crossing of `h(jd) = 0` in `[day_start, day_start + 1)`.
///
/// `h` returns the altitude above the event's target altitude, in degrees.
pub fn scan_rise_set(
    h: &dyn Fn(f64) -> Result<f64, EphemerisError>,
    event: RiseSetEvent,
    day_start: Instant,
) -> Result<RiseSetResult, EphemerisError> {
    let jd0 = day_start.jd_ut();
    let steps = (1.0 / SCAN_STEP_DAYS).round() as usize;
    let rising = event.is_rising();

    let mut t_prev = jd0;
    let mut h_prev = h(t_prev)?;
    let mut any_above = h_prev > 0.0;
    let mut any_below = h_prev <= 0.0;

    for i in 1..=steps {
        let t = jd0 + i as f64 * SCAN_STEP_DAYS;
        let h_cur = h(t)?;
        any_above |= h_cur > 0.0;
        any_below |= h_cur <= 0.0;

        let crossed = if rising {
            h_prev <= 0.0 && h_cur > 0.0
        } else {
            h_prev > 0.0 && h_cur <= 0.0
        };
        if crossed {
            let jd = bisect(h, t_prev, t, h_prev)?;
            // A crossing in the last step may land past the window end
            if jd >= jd0 + 1.0 {
                break;
            }
            return Ok(RiseSetResult::Event {
                instant: Instant::from_jd_ut(jd)?,
                event,
            });
        }
        t_prev = t;
        h_prev = h_cur;
    }

    Ok(match (any_above, any_below) {
        (false, _) => RiseSetResult::NeverRises,
        (_, false) => RiseSetResult::NeverSets,
        _ => RiseSetResult::NoEventThisDay,
    })
}

fn bisect(
    h: &dyn Fn(f64) -> Result<f64, EphemerisError>,
    mut a: f64,
    mut b: f64,
    mut fa: f64,
) -> Result<f64, EphemerisError> {
    for _ in 0..MAX_BISECTIONS {
        if b - a <= TOLERANCE_DAYS {
            return Ok(0.5 * (a + b));
        }
        let mid = 0.5 * (a + b);
        let fm = h(mid)?;
        if (fa <= 0.0) == (fm <= 0.0) {
            a = mid;
            fa = fm;
        } else {
            b = mid;
        }
    }
    Err(EphemerisError::NoConvergence("rise/set bisection"))
}
