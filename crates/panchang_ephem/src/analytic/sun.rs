//! Low-precision solar coordinates (Meeus, Astronomical Algorithms ch. 25).
//!
//! Geometric longitude accurate to about 0.01 deg, which puts sankranti
//! instants within a quarter hour.

use panchang_time::normalize_360;

use super::nutation::moon_node_longitude_deg;

/// Apparent geocentric position of the Sun.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SunPosition {
    /// True geometric longitude referred to the mean equinox of date, degrees.
    pub true_longitude_deg: f64,
    /// Apparent longitude (aberration and nutation applied), degrees.
    pub apparent_longitude_deg: f64,
    /// Earth-Sun distance in AU.
    pub distance_au: f64,
}

/// Sun position at `t` Julian centuries (TT) since J2000.0.
pub fn sun_position(t: f64) -> SunPosition {
    let l0 = 280.46646 + 36_000.76983 * t + 0.0003032 * t * t;
    let m = 357.52911 + 35_999.05029 * t - 0.0001537 * t * t;
    let e = 0.016708634 - 0.000042037 * t - 0.0000001267 * t * t;
    let m_rad = m.to_radians();

    let c = (1.914602 - 0.004817 * t - 0.000014 * t * t) * m_rad.sin()
        + (0.019993 - 0.000101 * t) * (2.0 * m_rad).sin()
        + 0.000289 * (3.0 * m_rad).sin();

    let true_longitude_deg = normalize_360(l0 + c);
    let nu = (m + c).to_radians();
    let distance_au = 1.000_001_018 * (1.0 - e * e) / (1.0 + e * nu.cos());

    let omega = moon_node_longitude_deg(t).to_radians();
    let apparent_longitude_deg = normalize_360(true_longitude_deg - 0.00569 - 0.00478 * omega.sin());

    SunPosition {
        true_longitude_deg,
        apparent_longitude_deg,
        distance_au,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn meeus_example_25a() {
        // 1992 October 13.0 TD: T = -0.072183436
        let p = sun_position(-0.072_183_436);
        assert!((p.true_longitude_deg - 199.90988).abs() < 1e-3, "{}", p.true_longitude_deg);
        assert!((p.apparent_longitude_deg - 199.90895).abs() < 1e-3);
        assert!((p.distance_au - 0.99766).abs() < 1e-4);
    }

    #[test]
    fn near_equinox_in_march() {
        // 2024 March 20 03:06 UTC equinox, T ~ 0.2421
        let t = (2_460_389.63 - 2_451_545.0) / 36_525.0;
        let lon = sun_position(t).apparent_longitude_deg;
        let off = if lon > 180.0 { lon - 360.0 } else { lon };
        assert!(off.abs() < 0.02, "lon = {lon}");
    }
}
