//! Lunar coordinates from the truncated ELP-2000/82 series
//! (Meeus, Astronomical Algorithms ch. 47).
//!
//! Longitude to about 10", latitude to about 4", which is well inside what
//! tithi and nakshatra boundaries need.

use panchang_time::normalize_360;

/// Geometric position of the Moon referred to the mean equinox of date.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoonPosition {
    pub longitude_deg: f64,
    pub latitude_deg: f64,
    /// Earth-Moon centre distance in km.
    pub distance_km: f64,
}

impl MoonPosition {
    /// Equatorial horizontal parallax in degrees.
    pub fn parallax_deg(&self) -> f64 {
        (6378.14 / self.distance_km).asin().to_degrees()
    }
}

/// Periodic terms for longitude and distance: D, M, M', F, Σl (1e-6 deg), Σr (1e-3 km).
#[rustfmt::skip]
const LON_DIST_TERMS: [(i8, i8, i8, i8, f64, f64); 60] = [
    (0, 0, 1, 0, 6_288_774.0, -20_905_355.0),
    (2, 0, -1, 0, 1_274_027.0, -3_699_111.0),
    (2, 0, 0, 0, 658_314.0, -2_955_968.0),
    (0, 0, 2, 0, 213_618.0, -569_925.0),
    (0, 1, 0, 0, -185_116.0, 48_888.0),
    (0, 0, 0, 2, -114_332.0, -3_149.0),
    (2, 0, -2, 0, 58_793.0, 246_158.0),
    (2, -1, -1, 0, 57_066.0, -152_138.0),
    (2, 0, 1, 0, 53_322.0, -170_733.0),
    (2, -1, 0, 0, 45_758.0, -204_586.0),
    (0, 1, -1, 0, -40_923.0, -129_620.0),
    (1, 0, 0, 0, -34_720.0, 108_743.0),
    (0, 1, 1, 0, -30_383.0, 104_755.0),
    (2, 0, 0, -2, 15_327.0, 10_321.0),
    (0, 0, 1, 2, -12_528.0, 0.0),
    (0, 0, 1, -2, 10_980.0, 79_661.0),
    (4, 0, -1, 0, 10_675.0, -34_782.0),
    (0, 0, 3, 0, 10_034.0, -23_210.0),
    (4, 0, -2, 0, 8_548.0, -21_636.0),
    (2, 1, -1, 0, -7_888.0, 24_208.0),
    (2, 1, 0, 0, -6_766.0, 30_824.0),
    (1, 0, -1, 0, -5_163.0, -8_379.0),
    (1, 1, 0, 0, 4_987.0, -16_675.0),
    (2, -1, 1, 0, 4_036.0, -12_831.0),
    (2, 0, 2, 0, 3_994.0, -10_445.0),
    (4, 0, 0, 0, 3_861.0, -11_650.0),
    (2, 0, -3, 0, 3_665.0, 14_403.0),
    (0, 1, -2, 0, -2_689.0, -7_003.0),
    (2, 0, -1, 2, -2_602.0, 0.0),
    (2, -1, -2, 0, 2_390.0, 10_056.0),
    (1, 0, 1, 0, -2_348.0, 6_322.0),
    (2, -2, 0, 0, 2_236.0, -9_884.0),
    (0, 1, 2, 0, -2_120.0, 5_751.0),
    (0, 2, 0, 0, -2_069.0, 0.0),
    (2, -2, -1, 0, 2_048.0, -4_950.0),
    (2, 0, 1, -2, -1_773.0, 4_130.0),
    (2, 0, 0, 2, -1_595.0, 0.0),
    (4, -1, -1, 0, 1_215.0, -3_958.0),
    (0, 0, 2, 2, -1_110.0, 0.0),
    (3, 0, -1, 0, -892.0, 3_258.0),
    (2, 1, 1, 0, -810.0, 2_616.0),
    (4, -1, -2, 0, 759.0, -1_897.0),
    (0, 2, -1, 0, -713.0, -2_117.0),
    (2, 2, -1, 0, -700.0, 2_354.0),
    (2, 1, -2, 0, 691.0, 0.0),
    (2, -1, 0, -2, 596.0, 0.0),
    (4, 0, 1, 0, 549.0, -1_423.0),
    (0, 0, 4, 0, 537.0, -1_117.0),
    (4, -1, 0, 0, 520.0, -1_571.0),
    (1, 0, -2, 0, -487.0, -1_739.0),
    (2, 1, 0, -2, -399.0, 0.0),
    (0, 0, 2, -2, -381.0, -4_421.0),
    (1, 1, 1, 0, 351.0, 0.0),
    (3, 0, -2, 0, -340.0, 0.0),
    (4, 0, -3, 0, 330.0, 0.0),
    (2, -1, 2, 0, 327.0, 0.0),
    (0, 2, 1, 0, -323.0, 1_165.0),
    (1, 1, -1, 0, 299.0, 0.0),
    (2, 0, 3, 0, 294.0, 0.0),
    (2, 0, -1, -2, 0.0, 8_752.0),
];

/// Periodic terms for latitude: D, M, M', F, Σb (1e-6 deg).
#[rustfmt::skip]
const LAT_TERMS: [(i8, i8, i8, i8, f64); 30] = [
    (0, 0, 0, 1, 5_128_122.0),
    (0, 0, 1, 1, 280_602.0),
    (0, 0, 1, -1, 277_693.0),
    (2, 0, 0, -1, 173_237.0),
    (2, 0, -1, 1, 55_413.0),
    (2, 0, -1, -1, 46_271.0),
    (2, 0, 0, 1, 32_573.0),
    (0, 0, 2, 1, 17_198.0),
    (2, 0, 1, -1, 9_266.0),
    (0, 0, 2, -1, 8_822.0),
    (2, -1, 0, -1, 8_216.0),
    (2, 0, -2, -1, 4_324.0),
    (2, 0, 1, 1, 4_200.0),
    (2, 1, 0, -1, -3_359.0),
    (2, -1, -1, 1, 2_463.0),
    (2, -1, 0, 1, 2_211.0),
    (2, -1, -1, -1, 2_065.0),
    (0, 1, -1, -1, -1_870.0),
    (4, 0, -1, -1, 1_828.0),
    (0, 1, 0, 1, -1_794.0),
    (0, 0, 0, 3, -1_749.0),
    (0, 1, -1, 1, -1_565.0),
    (1, 0, 0, 1, -1_491.0),
    (0, 1, 1, 1, -1_475.0),
    (0, 1, 1, -1, -1_410.0),
    (0, 1, 0, -1, -1_344.0),
    (1, 0, 0, -1, -1_335.0),
    (0, 0, 3, 1, 1_107.0),
    (4, 0, 0, -1, 1_021.0),
    (4, 0, -1, 1, 833.0),
];

/// Fundamental arguments in degrees.
struct Arguments {
    l_prime: f64,
    d: f64,
    m: f64,
    m_prime: f64,
    f: f64,
    e: f64,
}

fn arguments(t: f64) -> Arguments {
    let t2 = t * t;
    let t3 = t2 * t;
    let t4 = t3 * t;
    Arguments {
        l_prime: 218.3164477 + 481_267.88123421 * t - 0.0015786 * t2 + t3 / 538_841.0
            - t4 / 65_194_000.0,
        d: 297.8501921 + 445_267.1114034 * t - 0.0018819 * t2 + t3 / 545_868.0
            - t4 / 113_065_000.0,
        m: 357.5291092 + 35_999.0502909 * t - 0.0001536 * t2 + t3 / 24_490_000.0,
        m_prime: 134.9633964 + 477_198.8675055 * t + 0.0087414 * t2 + t3 / 69_699.0
            - t4 / 14_712_000.0,
        f: 93.2720950 + 483_202.0175233 * t - 0.0036539 * t2 - t3 / 3_526_000.0
            + t4 / 863_310_000.0,
        e: 1.0 - 0.002516 * t - 0.0000074 * t2,
    }
}

/// Eccentricity factor for a term with the given multiple of M.
fn e_factor(e: f64, m_mult: i8) -> f64 {
    match m_mult.abs() {
        1 => e,
        2 => e * e,
        _ => 1.0,
    }
}

/// Moon position at `t` Julian centuries (TT) since J2000.0.
pub fn moon_position(t: f64) -> MoonPosition {
    let a = arguments(t);
    let (d, m, mp, f) = (
        a.d.to_radians(),
        a.m.to_radians(),
        a.m_prime.to_radians(),
        a.f.to_radians(),
    );

    let mut sum_l = 0.0;
    let mut sum_r = 0.0;
    for &(cd, cm, cmp, cf, coef_l, coef_r) in &LON_DIST_TERMS {
        let arg = f64::from(cd) * d + f64::from(cm) * m + f64::from(cmp) * mp + f64::from(cf) * f;
        let ef = e_factor(a.e, cm);
        sum_l += coef_l * ef * arg.sin();
        sum_r += coef_r * ef * arg.cos();
    }

    let mut sum_b = 0.0;
    for &(cd, cm, cmp, cf, coef_b) in &LAT_TERMS {
        let arg = f64::from(cd) * d + f64::from(cm) * m + f64::from(cmp) * mp + f64::from(cf) * f;
        sum_b += coef_b * e_factor(a.e, cm) * arg.sin();
    }

    // Additive terms: Venus (A1), Jupiter (A2), Earth flattening (L' - F)
    let a1 = (119.75 + 131.849 * t).to_radians();
    let a2 = (53.09 + 479_264.290 * t).to_radians();
    let a3 = (313.45 + 481_266.484 * t).to_radians();
    let lp = a.l_prime.to_radians();

    sum_l += 3958.0 * a1.sin() + 1962.0 * (lp - f).sin() + 318.0 * a2.sin();
    sum_b += -2235.0 * lp.sin()
        + 382.0 * a3.sin()
        + 175.0 * (a1 - f).sin()
        + 175.0 * (a1 + f).sin()
        + 127.0 * (lp - mp).sin()
        - 115.0 * (lp + mp).sin();

    MoonPosition {
        longitude_deg: normalize_360(a.l_prime + sum_l / 1_000_000.0),
        latitude_deg: sum_b / 1_000_000.0,
        distance_km: 385_000.56 + sum_r / 1000.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn meeus_example_47a() {
        // 1992 April 12, 0h TD: T = -0.077221081451
        let p = moon_position(-0.077_221_081_451);
        // geometric lambda = 133.162655, beta = -3.229126, delta = 368409.7 km
        assert!((p.longitude_deg - 133.162_655).abs() < 1e-3, "lon = {}", p.longitude_deg);
        assert!((p.latitude_deg - (-3.229_126)).abs() < 1e-2, "lat = {}", p.latitude_deg);
        assert!((p.distance_km - 368_409.7).abs() < 5.0, "dist = {}", p.distance_km);
        assert!((p.parallax_deg() - 0.991_990).abs() < 1e-3);
    }

    #[test]
    fn distance_within_orbit_bounds() {
        for i in 0..60 {
            let p = moon_position(0.25 + i as f64 * 0.0005);
            assert!((356_000.0..407_000.0).contains(&p.distance_km), "{}", p.distance_km);
            assert!(p.latitude_deg.abs() < 5.4);
        }
    }
}
