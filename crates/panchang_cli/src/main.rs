use std::fmt::Display;
use std::path::{Path, PathBuf};

use chrono::{NaiveDateTime, Timelike};
use clap::{Parser, Subcommand};
use panchang_base::rashi_from_longitude;
use panchang_config::CalendarConfig;
use panchang_ephem::GeoLocation;
use panchang_festival::{FestivalCatalog, FestivalEngine};
use panchang_search::{
    find_sankranti, next_sankranti, panchang_at, sankrantis_for_calendar_year, scan_tithis,
};
use panchang_time::{Instant, TimeZoneSpec};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "panchang", about = "Panchang calendar CLI")]
struct Cli {
    /// TOML config file (defaults for every missing field)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Latitude in degrees (north positive); overrides [location]
    #[arg(long, global = true, allow_hyphen_values = true)]
    lat: Option<f64>,
    /// Longitude in degrees (east positive); overrides [location]
    #[arg(long, global = true, allow_hyphen_values = true)]
    lon: Option<f64>,
    /// Altitude in meters
    #[arg(long, global = true)]
    alt: Option<f64>,
    /// IANA zone, fixed offset (+05:30) or UTC; overrides [location]
    #[arg(long, global = true)]
    tz: Option<String>,
    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Tithi, nakshatra, yoga, karana and masa at a local date/time
    Panchang {
        /// Local wall-clock time (YYYY-MM-DDThh:mm[:ss])
        #[arg(long)]
        date: String,
    },
    /// Solar sign ingresses of a year, or the next one after a date
    Sankranti {
        /// Civil year in the chosen zone
        #[arg(long, conflicts_with = "after")]
        year: Option<i32>,
        /// Only this sign (0 = Mesha .. 11 = Meena)
        #[arg(long, requires = "year")]
        sign: Option<u8>,
        /// Next ingress after this local time (YYYY-MM-DDThh:mm[:ss])
        #[arg(long)]
        after: Option<String>,
    },
    /// Every tithi boundary of a year
    Tithis {
        #[arg(long)]
        year: i32,
        /// Only this tithi (0 = Shukla Pratipada .. 29 = Amavasya)
        #[arg(long)]
        tithi: Option<u8>,
    },
    /// Festivals of a year
    Festivals {
        #[arg(long)]
        year: i32,
        /// Catalog TOML used instead of the built-in one
        #[arg(long)]
        catalog: Option<PathBuf>,
        /// Catalog TOML merged into the built-in one
        #[arg(long, conflicts_with = "catalog")]
        extra_catalog: Option<PathBuf>,
    },
}

fn die(msg: impl Display) -> ! {
    eprintln!("{msg}");
    std::process::exit(1);
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn parse_local(s: &str) -> Result<NaiveDateTime, String> {
    let s = s.trim();
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M"))
        .map_err(|_| format!("expected YYYY-MM-DDThh:mm[:ss], got {s}"))
}

fn local_instant(zone: &TimeZoneSpec, s: &str) -> Instant {
    use chrono::Datelike;
    let dt = parse_local(s).unwrap_or_else(|e| die(e));
    zone.local_instant(
        dt.year(),
        dt.month(),
        dt.day(),
        dt.hour(),
        dt.minute(),
        f64::from(dt.second()),
    )
    .unwrap_or_else(|e| die(format!("Invalid local time: {e}")))
}

/// Command-line site values layered over the config's `[location]`.
fn resolve_site(
    cli: &Cli,
    config: &CalendarConfig,
) -> Result<(Option<GeoLocation>, TimeZoneSpec), String> {
    let base = config.location.as_ref();
    let lat = cli.lat.or(base.map(|l| l.latitude));
    let lon = cli.lon.or(base.map(|l| l.longitude));
    let alt = cli.alt.or(base.map(|l| l.altitude_m)).unwrap_or(0.0);
    let location = match (lat, lon) {
        (Some(lat), Some(lon)) => {
            let loc = GeoLocation::new(lat, lon, alt);
            loc.validate().map_err(|e| e.to_string())?;
            Some(loc)
        }
        (None, None) => None,
        _ => return Err("--lat and --lon must be given together".into()),
    };
    let zone = match cli.tz.as_deref().or(base.and_then(|l| l.timezone.as_deref())) {
        Some(tz) => tz.parse::<TimeZoneSpec>().map_err(|e| e.to_string())?,
        None => TimeZoneSpec::UTC,
    };
    Ok((location, zone))
}

fn print_json<T: Serialize + ?Sized>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(s) => println!("{s}"),
        Err(e) => die(format!("Failed to encode JSON: {e}")),
    }
}

fn fmt_local(zone: &TimeZoneSpec, instant: Instant) -> String {
    match zone.local_datetime(instant) {
        Ok(dt) => dt.format("%Y-%m-%d %H:%M:%S").to_string(),
        Err(_) => instant.to_string(),
    }
}

fn load_catalog(catalog: Option<&Path>, extra: Option<&Path>) -> FestivalCatalog {
    let mut base = match catalog {
        Some(p) => FestivalCatalog::from_path(p),
        None => FestivalCatalog::builtin(),
    }
    .unwrap_or_else(|e| die(format!("Failed to load catalog: {e}")));
    if let Some(p) = extra {
        let more = FestivalCatalog::from_path(p)
            .unwrap_or_else(|e| die(format!("Failed to load catalog: {e}")));
        base.extend(more)
            .unwrap_or_else(|e| die(format!("Failed to merge catalog: {e}")));
    }
    base
}

fn main() {
    init_tracing();
    let cli = Cli::parse();
    let config = CalendarConfig::load_or_default(cli.config.as_deref())
        .unwrap_or_else(|e| die(format!("Failed to load config: {e}")));
    let (location, zone) = resolve_site(&cli, &config).unwrap_or_else(|e| die(e));
    tracing::debug!(%zone, ?location, ayanamsha = %config.ayanamsha, "site resolved");
    let eph = config.ephemeris();

    match &cli.command {
        Commands::Panchang { date } => {
            let instant = local_instant(&zone, date);
            let p = panchang_at(&eph, instant).unwrap_or_else(|e| die(format!("Error: {e}")));
            if cli.json {
                print_json(&p);
                return;
            }
            println!("Panchang at {} ({zone})", fmt_local(&zone, instant));
            for (label, lon) in [("Sun", p.sun_sidereal_deg), ("Moon", p.moon_sidereal_deg)] {
                let info = rashi_from_longitude(lon);
                println!(
                    "  {label:<10} {} ({}) {} deg {} min {:.1} sec  [{lon:.4} deg sidereal]",
                    info.rashi.name(),
                    info.rashi.western_name(),
                    info.dms.degrees,
                    info.dms.minutes,
                    info.dms.seconds
                );
            }
            println!(
                "  Tithi:      {} {} (index {})  {} -> {}",
                p.tithi.paksha.name(),
                p.tithi.tithi.name(),
                p.tithi.tithi_index,
                fmt_local(&zone, p.tithi.start),
                fmt_local(&zone, p.tithi.end)
            );
            println!(
                "  Nakshatra:  {} pada {}  {} -> {}",
                p.nakshatra.nakshatra.name(),
                p.nakshatra.pada,
                fmt_local(&zone, p.nakshatra.start),
                fmt_local(&zone, p.nakshatra.end)
            );
            println!(
                "  Yoga:       {}  {} -> {}",
                p.yoga.yoga.name(),
                fmt_local(&zone, p.yoga.start),
                fmt_local(&zone, p.yoga.end)
            );
            println!(
                "  Karana:     {}  {} -> {}",
                p.karana.karana.name(),
                fmt_local(&zone, p.karana.start),
                fmt_local(&zone, p.karana.end)
            );
            println!(
                "  Masa:       {}{}  {} -> {}",
                if p.masa.adhika { "Adhika " } else { "" },
                p.masa.masa.name(),
                fmt_local(&zone, p.masa.start),
                fmt_local(&zone, p.masa.end)
            );
        }

        Commands::Sankranti { year, sign, after } => {
            let sk = config.sankranti_config();
            let events = match (year, after) {
                (Some(y), _) => match sign {
                    Some(s) => vec![
                        find_sankranti(&eph, *s, *y, &zone, &sk)
                            .unwrap_or_else(|e| die(format!("Error: {e}"))),
                    ],
                    None => sankrantis_for_calendar_year(&eph, *y, &zone, &sk),
                },
                (None, Some(a)) => {
                    let from = local_instant(&zone, a);
                    vec![
                        next_sankranti(&eph, from, &zone, &sk)
                            .unwrap_or_else(|e| die(format!("Error: {e}"))),
                    ]
                }
                (None, None) => die("Pass --year or --after"),
            };
            if cli.json {
                print_json(&events);
                return;
            }
            for ev in &events {
                println!(
                    "{:<10} {}  ({:.4} deg, {} iterations)",
                    ev.rashi.name(),
                    fmt_local(&zone, ev.instant),
                    ev.sidereal_longitude_deg,
                    ev.debug.iterations
                );
            }
        }

        Commands::Tithis { year, tithi } => {
            let table = scan_tithis(&eph, *year, &zone, &config.scan_config())
                .unwrap_or_else(|e| die(format!("Error: {e}")));
            let rows: Vec<_> = table
                .rows()
                .iter()
                .filter(|r| tithi.is_none_or(|t| r.tithi_ino == t))
                .collect();
            if cli.json {
                print_json(&rows);
                return;
            }
            for r in rows {
                println!(
                    "tithi {:>2}  masa {:>2}{}  {} -> {}",
                    r.tithi_ino,
                    r.masa_ino,
                    if r.is_leap_month { " (adhika)" } else { "" },
                    fmt_local(&zone, r.start),
                    fmt_local(&zone, r.end)
                );
            }
        }

        Commands::Festivals {
            year,
            catalog,
            extra_catalog,
        } => {
            let location = location
                .unwrap_or_else(|| die("Festivals need a location: pass --lat/--lon or set [location]"));
            let catalog = load_catalog(catalog.as_deref(), extra_catalog.as_deref());
            let result = FestivalEngine::new(&eph, &catalog, location, zone)
                .with_config(config.festival_config())
                .resolve_year(*year)
                .unwrap_or_else(|e| die(format!("Error: {e}")));
            if cli.json {
                print_json(&result);
                return;
            }
            for (date, occs) in result.by_date() {
                for occ in occs {
                    let at = occ
                        .evaluation
                        .map(|i| fmt_local(&zone, i))
                        .unwrap_or_else(|| "-".into());
                    println!(
                        "{date}  {:<24} p{}  {:?}  {at}",
                        occ.rule_id, occ.priority, occ.calculation
                    );
                }
            }
        }
    }
}
