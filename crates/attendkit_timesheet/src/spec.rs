//! Shared timesheet specification models.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{NaiveDate, NaiveTime};

use crate::conf::{
    N_COLS_TIMESHEET, N_ROW_IDX_FIRST_DAY, derive_default_timesheet_options, derive_italian_locale,
};

////////////////////////////////////////////////////////////////////////////////
// #region LocaleAndOptions

/// Localized names and fixed labels used while building a sheet.
///
/// Passed explicitly instead of relying on a process-wide locale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecLocale {
    /// Month names, January first. Matched case-insensitively.
    pub month_names: [String; 12],
    /// Weekday names, Monday first.
    pub weekday_names: [String; 7],
    /// Column titles of the day table.
    pub column_titles: [String; N_COLS_TIMESHEET],
    /// Header label preceding the first name.
    pub label_first_name: String,
    /// Header label preceding the last name.
    pub label_last_name: String,
    /// Morning text of a vacation day.
    pub label_vacation: String,
    /// Morning text of a sick day.
    pub label_sick: String,
    /// Summary label for the vacation-day count.
    pub label_total_vacation: String,
    /// Summary label for the sick-day count.
    pub label_total_sick: String,
    /// Summary label for the total permit hours.
    pub label_total_permit_hours: String,
}

impl SpecLocale {
    /// Italian preset.
    pub fn italian() -> Self {
        derive_italian_locale()
    }
}

impl Default for SpecLocale {
    fn default() -> Self {
        Self::italian()
    }
}

/// Builder options that are not locale dependent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecTimesheetOptions {
    /// Morning text of working days.
    pub hours_morning: String,
    /// Afternoon text of working days.
    pub hours_afternoon: String,
    /// Padding added to the widest text of every column.
    pub width_cell_padding: usize,
}

impl Default for SpecTimesheetOptions {
    fn default() -> Self {
        derive_default_timesheet_options()
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region RequestModels

/// Raw text fields as submitted by a user.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SpecAttendanceFields {
    /// Employee first name.
    pub first_name: String,
    /// Employee last name.
    pub last_name: String,
    /// Localized month name, e.g. `gennaio`.
    pub month: String,
    /// Comma-separated vacation days, e.g. `1,5,12`.
    pub vacation_days: String,
    /// Comma-separated sick days.
    pub sick_days: String,
    /// Comma-separated `day:HH:MM-HH:MM` permits.
    pub permits: String,
}

/// Partial-day absence on one day.
#[derive(Debug, Clone, PartialEq)]
pub struct SpecPermitWindow {
    /// Permit start (wall clock).
    pub time_start: NaiveTime,
    /// Permit end (wall clock).
    pub time_end: NaiveTime,
    /// Range text as entered, e.g. `09:30-11:00`.
    pub display_range: String,
    /// `time_end - time_start` in hours. Negative when the end precedes the start.
    pub duration_hours: f64,
}

/// Validated attendance facts for one employee and one month.
#[derive(Debug, Clone, PartialEq)]
pub struct SpecAttendanceRequest {
    /// Employee first name.
    pub first_name: String,
    /// Employee last name.
    pub last_name: String,
    /// Target month, 1-12.
    pub month: u32,
    /// Target year.
    pub year: i32,
    /// Vacation days of month. Out-of-range values are kept and never rendered.
    pub vacation_days: BTreeSet<i64>,
    /// Sick days of month.
    pub sick_days: BTreeSet<i64>,
    /// Permits by day of month.
    pub permits: BTreeMap<i64, SpecPermitWindow>,
}

impl SpecAttendanceRequest {
    /// Sum of every permit duration, negative contributions included.
    pub fn calculate_total_permit_hours(&self) -> f64 {
        self.permits
            .values()
            .fold(0.0, |n_total, permit| n_total + permit.duration_hours)
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region DocumentModels

/// Mutually exclusive category of a rendered day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EnumDayStyle {
    /// Saturday, Sunday or national holiday.
    WeekendHoliday,
    /// Vacation day.
    Vacation,
    /// Sick leave.
    Sick,
    /// Working day with a partial absence.
    Permit,
    /// Plain working day.
    Normal,
}

impl EnumDayStyle {
    /// Every style, in classification priority order.
    pub const ALL: [EnumDayStyle; 5] = [
        EnumDayStyle::WeekendHoliday,
        EnumDayStyle::Vacation,
        EnumDayStyle::Sick,
        EnumDayStyle::Permit,
        EnumDayStyle::Normal,
    ];

    /// Whether the morning cell carries a bold fixed label.
    pub fn is_morning_bold(self) -> bool {
        matches!(self, EnumDayStyle::Vacation | EnumDayStyle::Sick)
    }
}

/// One rendered day of the month.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecDayRow {
    /// Calendar date.
    pub date: NaiveDate,
    /// `<weekday>, DD-MM-YYYY`.
    pub label: String,
    /// Morning cell text.
    pub morning_text: String,
    /// Afternoon cell text.
    pub afternoon_text: String,
    /// Permit cell text.
    pub permit_text: String,
    /// Day category.
    pub style: EnumDayStyle,
}

impl SpecDayRow {
    /// Cell texts in column order.
    pub fn cells(&self) -> [&str; N_COLS_TIMESHEET] {
        [
            &self.label,
            &self.morning_text,
            &self.afternoon_text,
            &self.permit_text,
        ]
    }
}

/// Value of a summary row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EnumSummaryValue {
    /// Number of days.
    Count(usize),
    /// Fractional hours.
    Hours(f64),
}

impl EnumSummaryValue {
    /// Numeric cell value.
    pub fn as_f64(&self) -> f64 {
        match self {
            Self::Count(n) => *n as f64,
            Self::Hours(h) => *h,
        }
    }

    /// Displayed text, used for width inference (`3`, `0.0`, `1.5`).
    pub fn to_text(&self) -> String {
        match self {
            Self::Count(n) => n.to_string(),
            Self::Hours(h) => format!("{h:?}"),
        }
    }
}

/// One labeled summary row.
#[derive(Debug, Clone, PartialEq)]
pub struct SpecSummaryRow {
    /// Row label.
    pub label: String,
    /// Row value.
    pub value: EnumSummaryValue,
}

/// Fully built sheet, ready for a sink.
#[derive(Debug, Clone, PartialEq)]
pub struct SpecSheetDocument {
    /// Sheet name (capitalized month name).
    pub sheet_name: String,
    /// Suggested download name, `<FirstName>_<Month><Year>.xlsx`.
    pub file_name: String,
    /// Name/value pairs of the first row.
    pub header_pairs: Vec<(String, String)>,
    /// Bold column titles.
    pub column_titles: Vec<String>,
    /// One row per calendar day, in date order.
    pub day_rows: Vec<SpecDayRow>,
    /// Vacation count, sick count, total permit hours.
    pub summary_rows: Vec<SpecSummaryRow>,
    /// Display width per column.
    pub widths_by_col: Vec<usize>,
}

impl SpecSheetDocument {
    /// Number of sheet rows: header, blank, titles, days, spacer, summary.
    pub fn height(&self) -> usize {
        self.row_idx_first_summary() + self.summary_rows.len()
    }

    /// Zero-based row of the first summary row.
    pub fn row_idx_first_summary(&self) -> usize {
        N_ROW_IDX_FIRST_DAY + self.day_rows.len() + 1
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region Errors

/// Coarse validation error category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnumValidationErrorKind {
    /// Unrecognized or empty month name.
    InvalidMonth,
    /// Malformed day list, permit or missing name.
    InvalidInput,
}

/// User-input validation failure. No document is built when one is returned.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// Month name not found in the locale table.
    #[error("Mese non valido: {0:?}. Per favore inserisci un mese in italiano (es. gennaio).")]
    InvalidMonth(String),
    /// Day list token is not an integer.
    #[error(
        "Formato giorni non valido nel campo {field}: {token:?}. Usare numeri separati da virgola (es. 1,5)."
    )]
    InvalidDayList {
        /// Field name.
        field: &'static str,
        /// Offending token.
        token: String,
    },
    /// Permit token does not match `day:HH:MM-HH:MM`.
    #[error(
        "Formato permessi non valido: {token:?} ({reason}). Usare giorno:HH:MM-HH:MM (es. 13:10:00-11:30)."
    )]
    InvalidPermit {
        /// Offending token.
        token: String,
        /// Short failure reason.
        reason: &'static str,
    },
    /// Required name field is empty.
    #[error("Campo obbligatorio mancante: {field}.")]
    InvalidName {
        /// Field name.
        field: &'static str,
    },
}

impl ValidationError {
    /// Category of this error.
    pub fn kind(&self) -> EnumValidationErrorKind {
        match self {
            Self::InvalidMonth(_) => EnumValidationErrorKind::InvalidMonth,
            Self::InvalidDayList { .. } | Self::InvalidPermit { .. } | Self::InvalidName { .. } => {
                EnumValidationErrorKind::InvalidInput
            }
        }
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
