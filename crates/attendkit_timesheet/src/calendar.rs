//! Holiday lookups consulted by the day classifier.

use std::collections::BTreeSet;

use chrono::{Datelike, Days, NaiveDate};

/// Yearly holiday lookup.
pub trait HolidayCalendar {
    /// All holiday dates of `year`. Weekends are handled by the classifier.
    fn holidays(&self, year: i32) -> BTreeSet<NaiveDate>;
}

/// Calendar without holidays.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoHolidayCalendar;

impl HolidayCalendar for NoHolidayCalendar {
    fn holidays(&self, _year: i32) -> BTreeSet<NaiveDate> {
        BTreeSet::new()
    }
}

/// Explicit set of dates, filtered by year.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FixedHolidayCalendar {
    dates: BTreeSet<NaiveDate>,
}

impl FixedHolidayCalendar {
    /// Build from any date collection.
    pub fn new(dates: impl IntoIterator<Item = NaiveDate>) -> Self {
        Self {
            dates: dates.into_iter().collect(),
        }
    }
}

impl HolidayCalendar for FixedHolidayCalendar {
    fn holidays(&self, year: i32) -> BTreeSet<NaiveDate> {
        self.dates
            .iter()
            .copied()
            .filter(|date| date.year() == year)
            .collect()
    }
}

/// Italian national holidays.
///
/// Observed:
/// * Capodanno (Jan 1)
/// * Epifania (Jan 6)
/// * Pasqua (Easter Sunday)
/// * Lunedì dell'Angelo (Easter Monday)
/// * Festa della Liberazione (Apr 25)
/// * Festa del Lavoro (May 1)
/// * Festa della Repubblica (Jun 2)
/// * Ferragosto (Aug 15)
/// * San Francesco d'Assisi (Oct 4, from 2026)
/// * Ognissanti (Nov 1)
/// * Immacolata Concezione (Dec 8)
/// * Natale (Dec 25)
/// * Santo Stefano (Dec 26)
#[derive(Debug, Clone, Copy, Default)]
pub struct ItalianHolidayCalendar;

/// First year in which Oct 4 is a national holiday again.
const N_YEAR_SAN_FRANCESCO_FROM: i32 = 2026;

impl HolidayCalendar for ItalianHolidayCalendar {
    fn holidays(&self, year: i32) -> BTreeSet<NaiveDate> {
        let mut l_month_day = vec![
            (1, 1),
            (1, 6),
            (4, 25),
            (5, 1),
            (6, 2),
            (8, 15),
            (11, 1),
            (12, 8),
            (12, 25),
            (12, 26),
        ];
        if year >= N_YEAR_SAN_FRANCESCO_FROM {
            l_month_day.push((10, 4));
        }

        let mut set_dates: BTreeSet<NaiveDate> = l_month_day
            .into_iter()
            .filter_map(|(n_month, n_day)| NaiveDate::from_ymd_opt(year, n_month, n_day))
            .collect();

        if let Some(date_easter) = calculate_easter_sunday(year) {
            set_dates.insert(date_easter);
            if let Some(date_easter_monday) = date_easter.checked_add_days(Days::new(1)) {
                set_dates.insert(date_easter_monday);
            }
        }

        set_dates
    }
}

/// Gregorian Easter Sunday (anonymous computus). `None` for years before 1583.
pub fn calculate_easter_sunday(year: i32) -> Option<NaiveDate> {
    if year < 1583 {
        return None;
    }

    let a = year % 19;
    let b = year / 100;
    let c = year % 100;
    let d = b / 4;
    let e = b % 4;
    let f = (b + 8) / 25;
    let g = (b - f + 1) / 3;
    let h = (19 * a + b - d - g + 15) % 30;
    let i = c / 4;
    let k = c % 4;
    let l = (32 + 2 * e + 2 * i - h - k) % 7;
    let m = (a + 11 * h + 22 * l) / 451;
    let n_month = (h + l - 7 * m + 114) / 31;
    let n_day = (h + l - 7 * m + 114) % 31 + 1;

    NaiveDate::from_ymd_opt(year, n_month as u32, n_day as u32)
}
