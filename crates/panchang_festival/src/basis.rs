//! Calculation-basis resolution: from a tithi boundary start to a civil
//! display date and its evaluation instant.

use chrono::NaiveDate;
use panchang_ephem::Ephemeris;
use panchang_time::Instant;

use crate::day_events::{DayEventTable, next_day};
use crate::engine::FestivalConfig;
use crate::error::FestivalError;
use crate::rule::CalculationBasis;

/// Night muhurtas in one sunset-to-sunrise span.
pub const NIGHT_MUHURTAS: f64 = 30.0;

/// Where a boundary lands under one calculation basis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BasisResolution {
    /// Zone-local civil display date.
    pub date: NaiveDate,
    /// Instant the basis evaluates at; absent when rise/set data is missing.
    pub evaluation: Option<Instant>,
    pub muhurta_start: Option<Instant>,
    pub muhurta_end: Option<Instant>,
}

impl BasisResolution {
    fn at(date: NaiveDate, evaluation: Option<Instant>) -> Self {
        Self {
            date,
            evaluation,
            muhurta_start: None,
            muhurta_end: None,
        }
    }

    fn with_window(date: NaiveDate, evaluation: Instant, window: (Instant, Instant)) -> Self {
        Self {
            date,
            evaluation: Some(evaluation),
            muhurta_start: Some(window.0),
            muhurta_end: Some(window.1),
        }
    }
}

/// Nishita muhurta: the night (sunset to next sunrise) split into 30
/// muhurtas, taking the one that contains `sunset + night / 2`.
pub fn nishita_window(sunset: Instant, next_sunrise: Instant) -> (Instant, Instant) {
    let night_sec = next_sunrise.seconds_since(sunset);
    let muhurta_sec = night_sec / NIGHT_MUHURTAS;
    // Midnight lands on a division; the nudge keeps it in the later muhurta.
    let index = ((night_sec / 2.0) / muhurta_sec + 1e-9)
        .floor()
        .clamp(0.0, NIGHT_MUHURTAS - 1.0);
    let start = sunset.add_seconds(index * muhurta_sec);
    (start, start.add_seconds(muhurta_sec))
}

/// Resolve `basis` for a boundary starting at `boundary_start`.
pub fn resolve_basis<E: Ephemeris + ?Sized>(
    basis: CalculationBasis,
    boundary_start: Instant,
    days: &mut DayEventTable<'_, E>,
    config: &FestivalConfig,
) -> Result<BasisResolution, FestivalError> {
    let date = days.zone().local_date(boundary_start)?;
    let today = days.get(date)?;

    let resolution = match basis {
        CalculationBasis::Sunrise => match today.sunrise {
            Some(sunrise) => {
                let eval = sunrise.add_minutes(config.sunrise_offset_minutes);
                BasisResolution::with_window(date, eval, (sunrise, eval))
            }
            None => BasisResolution::at(date, None),
        },
        CalculationBasis::Sunset => BasisResolution::at(date, today.sunset),
        CalculationBasis::Pradosha => match today.sunset {
            Some(sunset) => {
                let eval = sunset.add_minutes(config.pradosha_offset_minutes);
                BasisResolution::with_window(date, eval, (sunset, eval))
            }
            None => BasisResolution::at(date, None),
        },
        CalculationBasis::Moonrise => match today.moonrise {
            Some(rise) if rise < boundary_start => {
                let next = next_day(date)?;
                BasisResolution::at(next, days.get(next)?.moonrise)
            }
            other => BasisResolution::at(date, other),
        },
        CalculationBasis::Shivaratri => match (today.sunset, today.next_sunrise) {
            (Some(sunset), Some(next_sunrise)) => {
                let window = nishita_window(sunset, next_sunrise);
                let display = if boundary_start < window.0 {
                    next_day(date)?
                } else {
                    date
                };
                BasisResolution::with_window(display, window.0, window)
            }
            _ => BasisResolution::at(date, None),
        },
        CalculationBasis::AfterSunrise => match today.sunset {
            Some(sunset) if boundary_start > sunset => {
                let next = next_day(date)?;
                BasisResolution::at(next, days.get(next)?.sunrise)
            }
            _ => BasisResolution::at(date, today.sunrise),
        },
    };
    Ok(resolution)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;
    use panchang_ephem::{GeoLocation, LinearEphemeris};
    use panchang_time::TimeZoneSpec;

    const IST: i32 = 330;

    fn fixture() -> (LinearEphemeris, TimeZoneSpec) {
        (
            LinearEphemeris::default().with_day_hours(6.0, 18.0),
            TimeZoneSpec::fixed(IST),
        )
    }

    fn local(zone: &TimeZoneSpec, d: u32, h: u32, m: u32) -> Instant {
        zone.local_instant(2025, 3, d, h, m, 0.0).unwrap()
    }

    fn table<'a>(eph: &'a LinearEphemeris, zone: TimeZoneSpec) -> DayEventTable<'a, LinearEphemeris> {
        DayEventTable::new(eph, GeoLocation::new(17.385, 78.4867, 0.0), zone, 24.0)
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, d).unwrap()
    }

    #[test]
    fn pradosha_is_sunset_plus_ninety_minutes() {
        let (eph, zone) = fixture();
        let mut days = table(&eph, zone);
        let start = local(&zone, 10, 9, 0);
        let r = resolve_basis(
            CalculationBasis::Pradosha,
            start,
            &mut days,
            &FestivalConfig::default(),
        )
        .unwrap();
        assert_eq!(r.date, day(10));
        let eval = zone.local_datetime(r.evaluation.unwrap()).unwrap();
        assert_eq!((eval.hour(), eval.minute()), (19, 30));
        assert_eq!(zone.local_date(r.evaluation.unwrap()).unwrap(), day(10));
        let sunset = zone.local_datetime(r.muhurta_start.unwrap()).unwrap();
        assert_eq!((sunset.hour(), sunset.minute()), (18, 0));
    }

    #[test]
    fn sunrise_evaluates_150_minutes_after_sunrise() {
        let (eph, zone) = fixture();
        let mut days = table(&eph, zone);
        let r = resolve_basis(
            CalculationBasis::Sunrise,
            local(&zone, 10, 3, 0),
            &mut days,
            &FestivalConfig::default(),
        )
        .unwrap();
        assert_eq!(r.date, day(10));
        let eval = zone.local_datetime(r.evaluation.unwrap()).unwrap();
        assert_eq!((eval.hour(), eval.minute()), (8, 30));
    }

    #[test]
    fn after_sunrise_shifts_past_sunset() {
        let (eph, zone) = fixture();
        let mut days = table(&eph, zone);
        let cfg = FestivalConfig::default();
        let late = resolve_basis(
            CalculationBasis::AfterSunrise,
            local(&zone, 10, 20, 15),
            &mut days,
            &cfg,
        )
        .unwrap();
        assert_eq!(late.date, day(11));
        let early = resolve_basis(
            CalculationBasis::AfterSunrise,
            local(&zone, 10, 14, 0),
            &mut days,
            &cfg,
        )
        .unwrap();
        assert_eq!(early.date, day(10));
    }

    #[test]
    fn sunset_basis_uses_same_day_sunset() {
        let (eph, zone) = fixture();
        let mut days = table(&eph, zone);
        let r = resolve_basis(
            CalculationBasis::Sunset,
            local(&zone, 10, 1, 0),
            &mut days,
            &FestivalConfig::default(),
        )
        .unwrap();
        let eval = zone.local_datetime(r.evaluation.unwrap()).unwrap();
        assert_eq!((eval.hour(), eval.minute()), (18, 0));
        assert!(r.muhurta_start.is_none());
    }

    #[test]
    fn moonrise_before_boundary_moves_to_next_day() {
        let (eph, zone) = fixture();
        let mut days = table(&eph, zone);
        let cfg = FestivalConfig::default();
        let rise = days.get(day(10)).unwrap().moonrise.unwrap();

        let after = resolve_basis(CalculationBasis::Moonrise, rise.add_minutes(30.0), &mut days, &cfg)
            .unwrap();
        assert_eq!(after.date, day(11));
        assert_eq!(after.evaluation, days.get(day(11)).unwrap().moonrise);

        let before =
            resolve_basis(CalculationBasis::Moonrise, rise.add_minutes(-30.0), &mut days, &cfg)
                .unwrap();
        assert_eq!(before.date, day(10));
        assert_eq!(before.evaluation, Some(rise));
    }

    #[test]
    fn nishita_window_opens_at_midnight() {
        let sunset = Instant::from_jd_ut(2_460_000.25).unwrap();
        let next_sunrise = sunset.add_days(0.5);
        let (a, b) = nishita_window(sunset, next_sunrise);
        assert!((b.seconds_since(a) - 43_200.0 / 30.0).abs() < 1e-3);
        assert!((a.seconds_since(sunset) - 21_600.0).abs() < 1e-3);
    }

    #[test]
    fn shivaratri_shift_follows_window_start() {
        // Night of the 10th: 17:00 to 06:00, nishita 23:30 to 23:56.
        let eph = LinearEphemeris::default().with_day_hours(6.0, 17.0);
        let zone = TimeZoneSpec::fixed(IST);
        let mut days = table(&eph, zone);
        let cfg = FestivalConfig::default();
        let before = resolve_basis(
            CalculationBasis::Shivaratri,
            local(&zone, 10, 12, 0),
            &mut days,
            &cfg,
        )
        .unwrap();
        assert_eq!(before.date, day(11));
        let w = zone.local_datetime(before.muhurta_start.unwrap()).unwrap();
        assert_eq!((w.hour(), w.minute()), (23, 30));
        let w_end = zone.local_datetime(before.muhurta_end.unwrap()).unwrap();
        assert_eq!((w_end.hour(), w_end.minute()), (23, 56));

        let inside = resolve_basis(
            CalculationBasis::Shivaratri,
            local(&zone, 10, 23, 45),
            &mut days,
            &cfg,
        )
        .unwrap();
        assert_eq!(inside.date, day(10));
        assert_eq!(inside.evaluation, inside.muhurta_start);
    }
}
