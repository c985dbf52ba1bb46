//! Whole-year tithi scans against known lunar months.

use chrono::{Datelike, NaiveDate};
use panchang_base::Masa;
use panchang_ephem::AnalyticEphemeris;
use panchang_search::{ScanConfig, masa_at, scan_nakshatras, scan_tithis};
use panchang_time::{Instant, TimeZoneSpec, UtcTime};

fn ist() -> TimeZoneSpec {
    TimeZoneSpec::iana("Asia/Calcutta").unwrap()
}

fn utc(y: i32, mo: u32, d: u32, h: u32) -> Instant {
    Instant::from_utc(&UtcTime::new(y, mo, d, h, 0, 0.0)).unwrap()
}

/// 2023 carried an adhika Shravana (Jul 18 - Aug 16, amanta).
#[test]
fn adhika_shravana_2023() {
    let eph = AnalyticEphemeris::default();
    let adhika = masa_at(&eph, utc(2023, 8, 1, 0)).unwrap();
    assert_eq!(adhika.masa, Masa::Shravana);
    assert!(adhika.adhika);

    let nija = masa_at(&eph, utc(2023, 8, 25, 0)).unwrap();
    assert_eq!(nija.masa, Masa::Shravana);
    assert!(!nija.adhika);
    assert!(adhika.end.seconds_since(nija.start).abs() < 1.0);
}

/// Leap-month filtering: the Shravana Purnima key selects exactly one
/// occurrence per leap flag in 2023.
#[test]
fn leap_flag_partitions_lookup() {
    let eph = AnalyticEphemeris::default();
    let table = scan_tithis(&eph, 2023, &ist(), &ScanConfig::default()).unwrap();
    let purnima = 14;
    let shravana = Masa::Shravana.index();

    let leap: Vec<_> = table.lookup(purnima, shravana, true).collect();
    let nija: Vec<_> = table.lookup(purnima, shravana, false).collect();
    assert_eq!(leap.len(), 1);
    assert_eq!(nija.len(), 1);
    assert!(leap[0].end <= nija[0].start);

    // Raksha Bandhan 2023 fell on Aug 30-31, in the nija month.
    let date = ist().local_date(nija[0].start).unwrap();
    assert_eq!((date.month(), date.day()), (8, 30));
}

#[test]
fn scan_2024_shape() {
    let eph = AnalyticEphemeris::default();
    let zone = ist();
    let table = scan_tithis(&eph, 2024, &zone, &ScanConfig::default()).unwrap();
    // 366 days / 0.984 days per tithi
    assert!(
        table.len() >= 370 && table.len() <= 375,
        "got {} tithis",
        table.len()
    );
    let (start, end) = table.year_bounds();
    assert_eq!(
        zone.local_date(start).unwrap(),
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    );
    assert_eq!(
        zone.local_date(end).unwrap(),
        NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()
    );
    // No adhika month in 2024.
    assert!(table.rows().iter().all(|r| !r.is_leap_month));
    for pair in table.rows().windows(2) {
        assert_eq!(pair[0].end, pair[1].start);
    }
}

/// Purnima of 2024-01-25 ends at the full moon, 17:54 UTC.
#[test]
fn purnima_end_matches_full_moon() {
    let eph = AnalyticEphemeris::default();
    let table = scan_tithis(&eph, 2024, &ist(), &ScanConfig::default()).unwrap();
    let row = table.tithi_at(utc(2024, 1, 25, 12)).unwrap();
    assert_eq!(row.tithi_ino, 14);
    let full_moon = Instant::from_utc(&UtcTime::new(2024, 1, 25, 17, 54, 0.0)).unwrap();
    let off_min = row.end.seconds_since(full_moon).abs() / 60.0;
    assert!(off_min < 20.0, "off by {off_min:.1} min");
}

#[test]
fn nakshatra_scan_covers_year() {
    let eph = AnalyticEphemeris::default();
    let cfg = ScanConfig::default();
    let tithis = scan_tithis(&eph, 2024, &ist(), &cfg).unwrap();
    let table = scan_nakshatras(&eph, &tithis, &cfg).unwrap();
    assert!(table.rows().len() >= 355 && table.rows().len() <= 370);
    for pair in table.rows().windows(2) {
        assert_eq!(pair[0].end, pair[1].start);
        assert_eq!((pair[0].nakshatra_ino + 1) % 27, pair[1].nakshatra_ino);
    }
}
