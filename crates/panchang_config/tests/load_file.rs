//! Loading configs from disk.

use std::path::PathBuf;

use panchang_config::{CalendarConfig, ConfigError};

fn scratch(name: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("panchang_config_{}_{name}", std::process::id()));
    std::fs::write(&path, contents).unwrap();
    path
}

#[test]
fn loads_file_from_disk() {
    let path = scratch(
        "full.toml",
        r#"
        ayanamsha = "true_lahiri"
        use_nutation = false

        [sankranti]
        tol_sec = 2.0
        max_iter = 60
        expand_days = 4.0
        max_expansions = 2

        [scan]
        step_days = 0.5
        max_steps = 30
        tol_sec = 2.0

        [festival]
        sunrise_offset_minutes = 144
        pradosha_offset_minutes = 96
        moonrise_window_hours = 12

        [riseset]
        refraction_arcmin = 34.5
        semidiameter_arcmin = 16.0
        altitude_correction = false

        [location]
        latitude = 12.97
        longitude = 77.59
        altitude_m = 920
        timezone = "Asia/Calcutta"
        "#,
    );
    let cfg = CalendarConfig::from_path(&path).unwrap();
    std::fs::remove_file(&path).ok();

    assert!(!cfg.use_nutation);
    assert_eq!(cfg.sankranti_config().max_expansions, 2);
    assert_eq!(cfg.scan_config().max_steps, 30);
    let fc = cfg.festival_config();
    assert_eq!(fc.moonrise_window_hours, 12.0);
    assert_eq!(fc.scan.step_days, 0.5);
    let (loc, zone) = cfg.site().unwrap().unwrap();
    assert_eq!(loc.altitude_m, 920.0);
    assert_eq!(zone.to_string(), "Asia/Calcutta");
}

#[test]
fn missing_file_is_io_error() {
    let err = CalendarConfig::from_path(std::path::Path::new("/nonexistent/panchang.toml"))
        .unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
}

#[test]
fn no_path_gives_defaults() {
    let cfg = CalendarConfig::load_or_default(None).unwrap();
    assert_eq!(cfg, CalendarConfig::default());
}
