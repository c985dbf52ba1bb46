//! Degree-domain angle helpers.
//!
//! Every longitude comparison in the engine goes through these so the
//! 0°/360° seam is handled in one place.

/// Normalize an angle to [0, 360) degrees.
pub fn normalize_360(deg: f64) -> f64 {
    let r = deg.rem_euclid(360.0);
    // rem_euclid rounds tiny negatives up to exactly 360.0
    if r >= 360.0 { 0.0 } else { r }
}

/// Normalize an angle to (-180, 180] degrees.
pub fn normalize_pm180(deg: f64) -> f64 {
    let r = normalize_360(deg);
    if r > 180.0 { r - 360.0 } else { r }
}

/// Shift `deg` by whole turns so it lies within 180° of `reference`.
///
/// Used to make a sampled angular function continuous across a bracket.
pub fn unwrap_near(deg: f64, reference: f64) -> f64 {
    reference + normalize_pm180(deg - reference)
}

/// Signed shortest angular distance from `from` to `to`, in (-180, 180].
pub fn angular_difference(from: f64, to: f64) -> f64 {
    normalize_pm180(to - from)
}
