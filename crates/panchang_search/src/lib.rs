//! Time-domain searches over an [`Ephemeris`](panchang_ephem::Ephemeris).
//!
//! This crate provides:
//! - Tithi, karana, yoga, nakshatra and masa at an instant, with start/end
//! - New and full moon search
//! - Sankranti (solar sign ingress) root-finding with bounded bracketing
//! - Whole-year tithi and nakshatra boundary tables for festival lookup

pub mod error;
pub mod lunar_phase;
pub mod nakshatra_scan;
pub mod panchang;
pub mod panchang_types;
pub mod sankranti;
pub mod sankranti_types;
pub mod scan_types;
pub(crate) mod search_util;
pub mod tithi_scan;

pub use error::SearchError;
pub use lunar_phase::{
    LunarPhase, new_moons_between, next_full_moon, next_lunar_phase, next_new_moon,
    prev_full_moon, prev_lunar_phase, prev_new_moon,
};
pub use nakshatra_scan::{NakshatraTable, scan_nakshatras};
pub use panchang::{
    elongation_at, karana_at, karana_for_instant, masa_at, masa_for_new_moons,
    moon_sidereal_longitude_at, nakshatra_at, nakshatra_for_instant, panchang_at,
    sidereal_sum_at, sun_rashi_index_at, sun_sidereal_longitude_at, tithi_at, tithi_for_instant,
    yoga_at, yoga_for_instant,
};
pub use panchang_types::{
    KaranaInfo, MasaInfo, PanchangInfo, PanchangNakshatraInfo, TithiInfo, YogaInfo,
};
pub use sankranti::{
    find_sankranti, next_sankranti, sankranti_bracket, sankrantis_for_calendar_year,
};
pub use sankranti_types::{BisectionDebug, SankrantiConfig, SankrantiEvent};
pub use scan_types::{Lunation, NakshatraBoundary, ScanConfig, TithiBoundary};
pub use tithi_scan::{TithiTable, civil_year_bounds, scan_tithis};
