//! Shared step-and-bisect machinery for angular boundary searches.

use panchang_time::normalize_pm180;

use crate::error::SearchError;

/// Bisect a bracketed zero crossing of `f` on `[t_a, t_b]`.
///
/// `f_a` is `f(t_a)`; the caller guarantees `f(t_a)` and `f(t_b)` differ in
/// sign. Stops after `max_iter` halvings or once the bracket is narrower
/// than `convergence_days`. Returns the midpoint and the iteration count.
pub(crate) fn bisect_zero<F>(
    mut t_a: f64,
    mut f_a: f64,
    mut t_b: f64,
    max_iter: u32,
    convergence_days: f64,
    f: &F,
) -> Result<(f64, u32), SearchError>
where
    F: Fn(f64) -> Result<f64, SearchError> + ?Sized,
{
    let mut iterations = 0;
    while iterations < max_iter && (t_b - t_a).abs() > convergence_days {
        let t_mid = 0.5 * (t_a + t_b);
        let f_mid = f(t_mid)?;
        iterations += 1;

        if f_a * f_mid <= 0.0 {
            t_b = t_mid;
        } else {
            t_a = t_mid;
            f_a = f_mid;
        }
    }
    Ok((0.5 * (t_a + t_b), iterations))
}

/// Step from `jd_start` by `step` days until `f` changes sign, then bisect.
///
/// `f` must be continuous except for a ±360° style wrap; a sign change
/// across a jump wider than 180° is a wrap, not a root, and is skipped.
/// A negative `step` searches backward. Returns `None` when no crossing is
/// found within `max_steps`.
pub(crate) fn find_zero_crossing(
    f: &dyn Fn(f64) -> Result<f64, SearchError>,
    jd_start: f64,
    step: f64,
    max_steps: usize,
    max_iter: u32,
    convergence_days: f64,
) -> Result<Option<f64>, SearchError> {
    let mut t_prev = jd_start;
    let mut f_prev = f(t_prev)?;
    if f_prev == 0.0 {
        return Ok(Some(t_prev));
    }

    for _ in 0..max_steps {
        let t_curr = t_prev + step;
        let f_curr = f(t_curr)?;

        if f_prev * f_curr <= 0.0 && (f_prev - f_curr).abs() < 180.0 {
            let (t_a, f_a, t_b) = if t_prev < t_curr {
                (t_prev, f_prev, t_curr)
            } else {
                (t_curr, f_curr, t_prev)
            };
            let (root, _) = bisect_zero(t_a, f_a, t_b, max_iter, convergence_days, f)?;
            return Ok(Some(root));
        }

        t_prev = t_curr;
        f_prev = f_curr;
    }

    Ok(None)
}

/// Find where the angular function `f` reaches `target_deg`.
///
/// Searches for a zero of `normalize_pm180(f(t) - target_deg)` from
/// `jd_start` in the direction of `step`.
pub(crate) fn find_angle_boundary(
    f: &dyn Fn(f64) -> Result<f64, SearchError>,
    jd_start: f64,
    target_deg: f64,
    step: f64,
    max_steps: usize,
    convergence_days: f64,
) -> Result<Option<f64>, SearchError> {
    let wrapped = |t: f64| -> Result<f64, SearchError> { Ok(normalize_pm180(f(t)? - target_deg)) };
    find_zero_crossing(&wrapped, jd_start, step, max_steps, 64, convergence_days)
}

/// Seconds expressed in days.
pub(crate) fn seconds_to_days(seconds: f64) -> f64 {
    seconds / panchang_time::SECONDS_PER_DAY
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bisect_linear_root() {
        let f = |t: f64| -> Result<f64, SearchError> { Ok(t - 3.25) };
        let (root, iters) = bisect_zero(0.0, -3.25, 10.0, 80, 1e-9, &f).unwrap();
        assert!((root - 3.25).abs() < 1e-8, "root = {root}");
        assert!(iters > 0 && iters <= 80);
    }

    #[test]
    fn bisect_respects_max_iter() {
        let f = |t: f64| -> Result<f64, SearchError> { Ok(t - 3.25) };
        let (_, iters) = bisect_zero(0.0, -3.25, 10.0, 5, 0.0, &f).unwrap();
        assert_eq!(iters, 5);
    }

    #[test]
    fn crossing_forward_and_backward() {
        let f = |t: f64| -> Result<f64, SearchError> { Ok(t - 1.3) };
        let fwd = find_zero_crossing(&f, 0.0, 0.25, 20, 60, 1e-10).unwrap().unwrap();
        assert!((fwd - 1.3).abs() < 1e-8);
        let back = find_zero_crossing(&f, 3.0, -0.25, 20, 60, 1e-10).unwrap().unwrap();
        assert!((back - 1.3).abs() < 1e-8);
    }

    #[test]
    fn crossing_none_when_out_of_steps() {
        let f = |t: f64| -> Result<f64, SearchError> { Ok(t - 100.0) };
        assert!(find_zero_crossing(&f, 0.0, 1.0, 10, 60, 1e-8).unwrap().is_none());
    }

    #[test]
    fn angle_boundary_ignores_wrap() {
        // Angle increasing 12 deg/day starting at 170: wraps through 180 at
        // the target-opposite point before reaching 0 (== 360).
        let f = |t: f64| -> Result<f64, SearchError> {
            Ok(panchang_time::normalize_360(170.0 + 12.0 * t))
        };
        let jd = find_angle_boundary(&f, 0.0, 0.0, 0.25, 200, 1e-9).unwrap().unwrap();
        assert!((jd - 190.0 / 12.0).abs() < 1e-6, "jd = {jd}");
    }

    #[test]
    fn angle_boundary_across_seam() {
        let f = |t: f64| -> Result<f64, SearchError> {
            Ok(panchang_time::normalize_360(350.0 + 12.0 * t))
        };
        let jd = find_angle_boundary(&f, 0.0, 0.0, 0.25, 20, 1e-9).unwrap().unwrap();
        assert!((jd - 10.0 / 12.0).abs() < 1e-6);
    }
}
