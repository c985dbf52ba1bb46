//! ΔT = TT − UT from the Espenak–Meeus piecewise polynomials.
//!
//! Valid to a few seconds from 1800 to 2150; outside that range the
//! long-term parabola of Morrison & Stephenson is used.

use panchang_time::J2000_JD;

/// Decimal year of a Julian Day (UT), good enough for ΔT lookup.
fn decimal_year(jd_ut: f64) -> f64 {
    2000.0 + (jd_ut - (J2000_JD - 0.5)) / 365.25
}

fn long_term(y: f64) -> f64 {
    let u = (y - 1820.0) / 100.0;
    -20.0 + 32.0 * u * u
}

/// ΔT in seconds at a decimal year.
pub fn delta_t_seconds_for_year(y: f64) -> f64 {
    if y < 1800.0 {
        long_term(y)
    } else if y < 1860.0 {
        let t = y - 1800.0;
        13.72 - 0.332447 * t + 0.0068612 * t.powi(2) + 0.0041116 * t.powi(3)
            - 0.00037436 * t.powi(4)
            + 0.0000121272 * t.powi(5)
            - 0.0000001699 * t.powi(6)
            + 0.000000000875 * t.powi(7)
    } else if y < 1900.0 {
        let t = y - 1860.0;
        7.62 + 0.5737 * t - 0.251754 * t.powi(2) + 0.01680668 * t.powi(3)
            - 0.0004473624 * t.powi(4)
            + t.powi(5) / 233_174.0
    } else if y < 1920.0 {
        let t = y - 1900.0;
        -2.79 + 1.494119 * t - 0.0598939 * t.powi(2) + 0.0061966 * t.powi(3)
            - 0.000197 * t.powi(4)
    } else if y < 1941.0 {
        let t = y - 1920.0;
        21.20 + 0.84493 * t - 0.076100 * t.powi(2) + 0.0020936 * t.powi(3)
    } else if y < 1961.0 {
        let t = y - 1950.0;
        29.07 + 0.407 * t - t.powi(2) / 233.0 + t.powi(3) / 2547.0
    } else if y < 1986.0 {
        let t = y - 1975.0;
        45.45 + 1.067 * t - t.powi(2) / 260.0 - t.powi(3) / 718.0
    } else if y < 2005.0 {
        let t = y - 2000.0;
        63.86 + 0.3345 * t - 0.060374 * t.powi(2)
            + 0.0017275 * t.powi(3)
            + 0.000651814 * t.powi(4)
            + 0.00002373599 * t.powi(5)
    } else if y < 2050.0 {
        let t = y - 2000.0;
        62.92 + 0.32217 * t + 0.005589 * t.powi(2)
    } else if y < 2150.0 {
        long_term(y) - 0.5628 * (2150.0 - y)
    } else {
        long_term(y)
    }
}

/// ΔT in seconds at a Julian Day (UT).
pub fn delta_t_seconds(jd_ut: f64) -> f64 {
    delta_t_seconds_for_year(decimal_year(jd_ut))
}

/// Julian Day (TT) for a Julian Day (UT).
pub fn jd_ut_to_tt(jd_ut: f64) -> f64 {
    jd_ut + delta_t_seconds(jd_ut) / 86_400.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn year_2000_near_64s() {
        let dt = delta_t_seconds_for_year(2000.0);
        assert!((dt - 63.86).abs() < 0.01, "dt = {dt}");
    }

    #[test]
    fn year_2025_near_72s() {
        let dt = delta_t_seconds_for_year(2025.0);
        assert!((dt - 74.5).abs() < 3.0, "dt = {dt}");
    }

    #[test]
    fn continuous_at_2050() {
        let a = delta_t_seconds_for_year(2049.999);
        let b = delta_t_seconds_for_year(2050.0);
        assert!((a - b).abs() < 1.0, "{a} vs {b}");
    }

    #[test]
    fn continuous_at_2150() {
        let a = delta_t_seconds_for_year(2149.999);
        let b = delta_t_seconds_for_year(2150.0);
        assert!((a - b).abs() < 0.01, "{a} vs {b}");
    }

    #[test]
    fn tt_is_ahead_of_ut() {
        let jd = 2_460_000.5;
        assert!(jd_ut_to_tt(jd) > jd);
    }
}
