//! Low-precision nutation and obliquity (Meeus, Astronomical Algorithms ch. 22).
//!
//! Four-term nutation in longitude and obliquity, accurate to about 0.5"
//! in Δψ and 0.1" in Δε.

/// Nutation in longitude and obliquity, in arcseconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Nutation {
    pub delta_psi_arcsec: f64,
    pub delta_eps_arcsec: f64,
}

/// Longitude of the Moon's mean ascending node, degrees.
pub fn moon_node_longitude_deg(t: f64) -> f64 {
    125.04452 - 1934.136261 * t + 0.0020708 * t * t + t * t * t / 450_000.0
}

/// Nutation at `t` Julian centuries (TT) since J2000.0.
pub fn nutation(t: f64) -> Nutation {
    let omega = moon_node_longitude_deg(t).to_radians();
    let l_sun = (280.4665 + 36_000.7698 * t).to_radians();
    let l_moon = (218.3165 + 481_267.8813 * t).to_radians();

    let delta_psi_arcsec = -17.20 * omega.sin() - 1.32 * (2.0 * l_sun).sin()
        - 0.23 * (2.0 * l_moon).sin()
        + 0.21 * (2.0 * omega).sin();
    let delta_eps_arcsec = 9.20 * omega.cos() + 0.57 * (2.0 * l_sun).cos()
        + 0.10 * (2.0 * l_moon).cos()
        - 0.09 * (2.0 * omega).cos();

    Nutation {
        delta_psi_arcsec,
        delta_eps_arcsec,
    }
}

/// Mean obliquity of the ecliptic in degrees (Meeus 22.2).
pub fn mean_obliquity_deg(t: f64) -> f64 {
    let arcsec = 21.448 - 46.8150 * t - 0.00059 * t * t + 0.001813 * t * t * t;
    23.0 + 26.0 / 60.0 + arcsec / 3600.0
}

/// True obliquity (mean + Δε) in degrees.
pub fn true_obliquity_deg(t: f64) -> f64 {
    mean_obliquity_deg(t) + nutation(t).delta_eps_arcsec / 3600.0
}
