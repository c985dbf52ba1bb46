//! Sidereal time and ecliptic-to-horizontal conversion.

use panchang_time::{J2000_JD, jd_to_centuries, normalize_360};

/// Greenwich mean sidereal time in degrees at a Julian Day (UT1 ~ UT), Meeus 12.4.
pub fn gmst_deg(jd_ut: f64) -> f64 {
    let t = jd_to_centuries(jd_ut);
    normalize_360(
        280.460_618_37 + 360.985_647_366_29 * (jd_ut - J2000_JD) + 0.000_387_933 * t * t
            - t * t * t / 38_710_000.0,
    )
}

/// Right ascension and declination in radians from ecliptic coordinates.
pub fn ecliptic_to_equatorial(lon_deg: f64, lat_deg: f64, obliquity_deg: f64) -> (f64, f64) {
    let (lon, lat, eps) = (
        lon_deg.to_radians(),
        lat_deg.to_radians(),
        obliquity_deg.to_radians(),
    );
    let ra = (lon.sin() * eps.cos() - lat.tan() * eps.sin()).atan2(lon.cos());
    let dec = (lat.sin() * eps.cos() + lat.cos() * eps.sin() * lon.sin()).asin();
    (ra, dec)
}

/// Geocentric altitude in degrees for an observer.
///
/// `lst_deg` is the local sidereal time; `ra`/`dec` are in radians.
pub fn altitude_deg(lst_deg: f64, ra: f64, dec: f64, latitude_rad: f64) -> f64 {
    let ha = lst_deg.to_radians() - ra;
    (latitude_rad.sin() * dec.sin() + latitude_rad.cos() * dec.cos() * ha.cos())
        .asin()
        .to_degrees()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn meeus_example_12a() {
        // 1987 April 10, 0h UT: GMST = 13h10m46.3668s = 197.693195 deg
        let g = gmst_deg(2_446_895.5);
        assert!((g - 197.693_195).abs() < 1e-4, "gmst = {g}");
    }

    #[test]
    fn equinox_point_maps_to_origin() {
        let (ra, dec) = ecliptic_to_equatorial(0.0, 0.0, 23.44);
        assert!(ra.abs() < 1e-12 && dec.abs() < 1e-12);
    }

    #[test]
    fn summer_solstice_declination() {
        let (_, dec) = ecliptic_to_equatorial(90.0, 0.0, 23.44);
        assert!((dec.to_degrees() - 23.44).abs() < 1e-9);
    }

    #[test]
    fn zenith_when_on_meridian_at_own_declination() {
        let lat = 20.0_f64.to_radians();
        let h = altitude_deg(45.0, 45.0_f64.to_radians(), lat, lat);
        assert!((h - 90.0).abs() < 1e-6);
    }
}
