//! Types for whole-year tithi and nakshatra scans.

use std::collections::HashMap;

use panchang_base::Masa;
use panchang_time::Instant;
use serde::{Deserialize, Serialize};

/// Stepping and refinement parameters for boundary scans.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Coarse step in days (default 0.25).
    pub step_days: f64,
    /// Steps allowed per boundary before giving up (default 40).
    pub max_steps: usize,
    /// Boundary refinement tolerance in seconds (default 1).
    pub tol_sec: f64,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            step_days: 0.25,
            max_steps: 40,
            tol_sec: 1.0,
        }
    }
}

impl ScanConfig {
    pub fn validate(&self) -> Result<(), &'static str> {
        if !(self.step_days.is_finite() && self.step_days > 0.0) {
            return Err("step_days must be positive");
        }
        if self.max_steps == 0 {
            return Err("max_steps must be at least 1");
        }
        if !(self.tol_sec.is_finite() && self.tol_sec > 0.0) {
            return Err("tol_sec must be positive");
        }
        Ok(())
    }
}

/// One new-moon-to-new-moon month.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Lunation {
    pub start: Instant,
    pub end: Instant,
    pub masa: Masa,
    pub is_leap_month: bool,
}

impl Lunation {
    pub fn masa_ino(&self) -> u8 {
        self.masa.index()
    }

    pub fn contains(&self, instant: Instant) -> bool {
        self.start <= instant && instant < self.end
    }
}

/// One tithi occurrence.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TithiBoundary {
    /// 0-based tithi index (0 = Shukla Pratipada .. 29 = Amavasya).
    pub tithi_ino: u8,
    /// Masa of the enclosing lunation (0 = Chaitra).
    pub masa_ino: u8,
    pub is_leap_month: bool,
    pub start: Instant,
    pub end: Instant,
}

/// One nakshatra occurrence.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NakshatraBoundary {
    /// 0-based nakshatra index (0 = Ashwini .. 26 = Revati).
    pub nakshatra_ino: u8,
    /// Masa of the lunation the occurrence starts in.
    pub masa_ino: u8,
    pub is_leap_month: bool,
    pub start: Instant,
    pub end: Instant,
}

/// `(element_ino, masa_ino, is_leap_month)` → row positions.
#[derive(Debug, Clone, Default)]
pub(crate) struct KeyIndex {
    map: HashMap<(u8, u8, bool), Vec<usize>>,
}

impl KeyIndex {
    pub(crate) fn build(keys: impl Iterator<Item = (u8, u8, bool)>) -> Self {
        let mut map: HashMap<(u8, u8, bool), Vec<usize>> = HashMap::new();
        for (row, key) in keys.enumerate() {
            map.entry(key).or_default().push(row);
        }
        Self { map }
    }

    pub(crate) fn get(&self, key: (u8, u8, bool)) -> &[usize] {
        self.map.get(&key).map(Vec::as_slice).unwrap_or(&[])
    }
}
