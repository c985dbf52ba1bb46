//! Resolved festival occurrences and the per-year result set.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use panchang_search::{SankrantiEvent, TithiBoundary};
use panchang_time::Instant;
use serde::Serialize;

use crate::rule::CalculationType;

/// One festival placed on one civil date.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FestivalOccurrence {
    /// Zone-local display date.
    pub date: NaiveDate,
    pub rule_id: String,
    pub name_key: String,
    pub calculation: CalculationType,
    pub priority: u8,
    /// Catalog position of the rule; breaks priority ties.
    pub order: usize,
    /// Masa of the lunation the occurrence falls in, when known.
    pub masa_ino: Option<u8>,
    pub is_leap_month: bool,
    pub evaluation: Option<Instant>,
    pub muhurta_start: Option<Instant>,
    pub muhurta_end: Option<Instant>,
}

impl FestivalOccurrence {
    fn sort_key(&self) -> (NaiveDate, u8, usize) {
        (self.date, self.priority, self.order)
    }
}

/// Festivals of one civil year with the events they were resolved from.
#[derive(Debug, Clone, Serialize)]
pub struct FestivalYear {
    pub year: i32,
    /// Sorted by date, then priority, then catalog order.
    pub occurrences: Vec<FestivalOccurrence>,
    pub sankrantis: Vec<SankrantiEvent>,
    pub tithi_boundaries: Vec<TithiBoundary>,
}

impl FestivalYear {
    /// Occurrences grouped by date, each group in priority order.
    pub fn by_date(&self) -> BTreeMap<NaiveDate, Vec<&FestivalOccurrence>> {
        let mut map: BTreeMap<NaiveDate, Vec<&FestivalOccurrence>> = BTreeMap::new();
        for occ in &self.occurrences {
            map.entry(occ.date).or_default().push(occ);
        }
        map
    }

    /// Occurrences on `date`.
    pub fn on(&self, date: NaiveDate) -> impl Iterator<Item = &FestivalOccurrence> + '_ {
        self.occurrences.iter().filter(move |o| o.date == date)
    }

    /// Occurrences of the rule `rule_id`.
    pub fn find<'a>(&'a self, rule_id: &'a str) -> impl Iterator<Item = &'a FestivalOccurrence> + 'a {
        self.occurrences.iter().filter(move |o| o.rule_id == rule_id)
    }
}

/// Keep `year`'s occurrences, drop repeated `(rule, date)` pairs, and sort.
pub(crate) fn finalize(occurrences: &mut Vec<FestivalOccurrence>, year: i32) {
    use chrono::Datelike;

    occurrences.retain(|o| o.date.year() == year);
    occurrences.sort_by(|a, b| {
        a.sort_key()
            .cmp(&b.sort_key())
            .then_with(|| a.rule_id.cmp(&b.rule_id))
    });
    occurrences.dedup_by(|b, a| a.rule_id == b.rule_id && a.date == b.date);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn occ(id: &str, date: (i32, u32, u32), priority: u8, order: usize) -> FestivalOccurrence {
        FestivalOccurrence {
            date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            rule_id: id.into(),
            name_key: format!("festival.{id}"),
            calculation: CalculationType::Sunrise,
            priority,
            order,
            masa_ino: None,
            is_leap_month: false,
            evaluation: None,
            muhurta_start: None,
            muhurta_end: None,
        }
    }

    #[test]
    fn finalize_sorts_filters_and_dedupes() {
        let mut v = vec![
            occ("purnima", (2025, 3, 14), 5, 20),
            occ("holika_dahan", (2025, 3, 14), 2, 9),
            occ("purnima", (2025, 3, 14), 5, 20),
            occ("amavasya", (2024, 12, 30), 5, 21),
            occ("ugadi", (2025, 3, 30), 1, 0),
        ];
        finalize(&mut v, 2025);
        let ids: Vec<_> = v.iter().map(|o| o.rule_id.as_str()).collect();
        assert_eq!(ids, ["holika_dahan", "purnima", "ugadi"]);
    }

    #[test]
    fn equal_priority_falls_back_to_catalog_order() {
        let mut v = vec![
            occ("b", (2025, 1, 1), 3, 7),
            occ("a", (2025, 1, 1), 3, 2),
        ];
        finalize(&mut v, 2025);
        assert_eq!(v[0].rule_id, "a");
    }

    #[test]
    fn by_date_groups() {
        let mut v = vec![
            occ("x", (2025, 1, 13), 1, 0),
            occ("y", (2025, 1, 14), 1, 1),
            occ("z", (2025, 1, 14), 2, 2),
        ];
        finalize(&mut v, 2025);
        let year = FestivalYear {
            year: 2025,
            occurrences: v,
            sankrantis: Vec::new(),
            tithi_boundaries: Vec::new(),
        };
        let grouped = year.by_date();
        assert_eq!(grouped.len(), 2);
        let d = NaiveDate::from_ymd_opt(2025, 1, 14).unwrap();
        assert_eq!(grouped[&d].len(), 2);
        assert_eq!(year.on(d).count(), 2);
        assert_eq!(year.find("x").count(), 1);
    }
}
