//! Raw text fields to validated [`SpecAttendanceRequest`].
//!
//! Accepted formats:
//! - month: one of the locale month names, any case (`Gennaio`, `GENNAIO`);
//! - day lists: `1,5, 12` (each token an integer, no range check);
//! - permits: `13:10:00-11:30, 20:9:00-10:15` where the day is split off at
//!   the first `:` only.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveTime;
use tracing::debug;

use crate::conf::C_FMT_PERMIT_TIME;
use crate::spec::{
    SpecAttendanceFields, SpecAttendanceRequest, SpecLocale, SpecPermitWindow, ValidationError,
};

/// Validate raw fields for `year`.
///
/// Day lists and permits are checked before the month name; the first failure
/// is returned and no request is built.
pub fn parse_attendance_request(
    fields: &SpecAttendanceFields,
    year: i32,
    locale: &SpecLocale,
) -> Result<SpecAttendanceRequest, ValidationError> {
    let set_vacation_days = parse_day_list(&fields.vacation_days, "ferie")?;
    let set_sick_days = parse_day_list(&fields.sick_days, "malattia")?;
    let dict_permits = parse_permits(&fields.permits)?;
    let n_month = parse_month_name(&fields.month, locale)?;

    let first_name = validate_name(&fields.first_name, "nome")?;
    let last_name = validate_name(&fields.last_name, "cognome")?;

    debug!(
        month = n_month,
        year,
        n_vacation_days = set_vacation_days.len(),
        n_sick_days = set_sick_days.len(),
        n_permits = dict_permits.len(),
        "parsed attendance request"
    );

    Ok(SpecAttendanceRequest {
        first_name,
        last_name,
        month: n_month,
        year,
        vacation_days: set_vacation_days,
        sick_days: set_sick_days,
        permits: dict_permits,
    })
}

/// Resolve a localized month name to 1-12.
pub fn parse_month_name(raw: &str, locale: &SpecLocale) -> Result<u32, ValidationError> {
    let c_month = raw.trim().to_lowercase();
    if c_month.is_empty() {
        return Err(ValidationError::InvalidMonth(raw.to_string()));
    }

    locale
        .month_names
        .iter()
        .position(|c_name| c_name.to_lowercase() == c_month)
        .map(|n_idx| n_idx as u32 + 1)
        .ok_or_else(|| ValidationError::InvalidMonth(raw.to_string()))
}

/// Parse a comma-separated integer list.
///
/// Only the empty string yields an empty set; whitespace-only input is an
/// invalid token.
pub fn parse_day_list(raw: &str, field: &'static str) -> Result<BTreeSet<i64>, ValidationError> {
    if raw.is_empty() {
        return Ok(BTreeSet::new());
    }

    raw.split(',')
        .map(|c_token| {
            c_token
                .trim()
                .parse::<i64>()
                .map_err(|_| ValidationError::InvalidDayList {
                    field,
                    token: c_token.to_string(),
                })
        })
        .collect()
}

/// Parse comma-separated `day:HH:MM-HH:MM` permits.
///
/// All whitespace is removed first and empty tokens are skipped. A later token
/// for the same day replaces the earlier one.
pub fn parse_permits(raw: &str) -> Result<BTreeMap<i64, SpecPermitWindow>, ValidationError> {
    let c_compact: String = raw.chars().filter(|chr| !chr.is_whitespace()).collect();

    let mut dict_permits = BTreeMap::new();
    for c_token in c_compact.split(',') {
        if c_token.is_empty() {
            continue;
        }
        let (n_day, permit) = parse_permit_token(c_token)?;
        dict_permits.insert(n_day, permit);
    }
    Ok(dict_permits)
}

fn parse_permit_token(token: &str) -> Result<(i64, SpecPermitWindow), ValidationError> {
    let err_permit = |reason: &'static str| ValidationError::InvalidPermit {
        token: token.to_string(),
        reason,
    };

    let Some((c_day, c_range)) = token.split_once(':') else {
        return Err(err_permit("missing ':' after the day"));
    };
    let n_day = c_day
        .parse::<i64>()
        .map_err(|_| err_permit("day is not an integer"))?;

    let l_bounds: Vec<&str> = c_range.split('-').collect();
    let [c_start, c_end] = l_bounds.as_slice() else {
        return Err(err_permit("expected exactly one '-' between start and end"));
    };

    let time_start = parse_wall_clock_time(c_start).ok_or_else(|| err_permit("bad start time"))?;
    let time_end = parse_wall_clock_time(c_end).ok_or_else(|| err_permit("bad end time"))?;

    Ok((
        n_day,
        SpecPermitWindow {
            time_start,
            time_end,
            display_range: c_range.to_string(),
            duration_hours: calculate_duration_hours(time_start, time_end),
        },
    ))
}

fn parse_wall_clock_time(raw: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(raw, C_FMT_PERMIT_TIME).ok()
}

/// Time-of-day difference in hours; negative when `time_end < time_start`.
fn calculate_duration_hours(time_start: NaiveTime, time_end: NaiveTime) -> f64 {
    time_end.signed_duration_since(time_start).num_seconds() as f64 / 3600.0
}

fn validate_name(raw: &str, field: &'static str) -> Result<String, ValidationError> {
    let c_name = raw.trim();
    if c_name.is_empty() {
        return Err(ValidationError::InvalidName { field });
    }
    Ok(c_name.to_string())
}
