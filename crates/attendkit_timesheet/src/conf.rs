//! Timesheet constants and default preset factories.

use crate::spec::{SpecLocale, SpecTimesheetOptions};

/// Number of columns in the day table (`day`, `morning`, `afternoon`, `permit`).
pub const N_COLS_TIMESHEET: usize = 4;
/// Padding added to the widest cell text of every column.
pub const N_WIDTH_CELL_PADDING_DEFAULT: usize = 2;

/// Zero-based row of the name/value header pairs.
pub const N_ROW_IDX_HEADER: usize = 0;
/// Zero-based row of the bold column titles (row 2 stays blank).
pub const N_ROW_IDX_COLUMN_TITLES: usize = 2;
/// Zero-based row of the first day of the month.
pub const N_ROW_IDX_FIRST_DAY: usize = 3;

/// Default morning working hours.
pub const C_HOURS_MORNING_DEFAULT: &str = "9:00 - 13:00";
/// Default afternoon working hours.
pub const C_HOURS_AFTERNOON_DEFAULT: &str = "14:00 - 18:00";

/// `strftime`-style pattern for the date part of a day label.
pub const C_FMT_DATE_LABEL: &str = "%d-%m-%Y";
/// `strftime`-style pattern for permit start/end times.
pub const C_FMT_PERMIT_TIME: &str = "%H:%M";

/// Characters replaced when a user value becomes part of a file name.
pub const TUP_FILE_NAME_ILLEGAL: [char; 9] = ['/', '\\', ':', '*', '?', '"', '<', '>', '|'];

/// Italian month names, January first.
pub const TUP_MONTHS_IT: [&str; 12] = [
    "gennaio",
    "febbraio",
    "marzo",
    "aprile",
    "maggio",
    "giugno",
    "luglio",
    "agosto",
    "settembre",
    "ottobre",
    "novembre",
    "dicembre",
];

/// Italian weekday names, Monday first.
pub const TUP_WEEKDAYS_IT: [&str; 7] = [
    "Lunedì",
    "Martedì",
    "Mercoledì",
    "Giovedì",
    "Venerdì",
    "Sabato",
    "Domenica",
];

/// Italian column titles of the day table.
pub const TUP_COLUMN_TITLES_IT: [&str; N_COLS_TIMESHEET] =
    ["Giorno", "Orario Mattina", "Orario Pomeriggio", "Permessi"];

/// Build the Italian locale table.
pub fn derive_italian_locale() -> SpecLocale {
    SpecLocale {
        month_names: TUP_MONTHS_IT.map(String::from),
        weekday_names: TUP_WEEKDAYS_IT.map(String::from),
        column_titles: TUP_COLUMN_TITLES_IT.map(String::from),
        label_first_name: "Nome".to_string(),
        label_last_name: "Cognome".to_string(),
        label_vacation: "FERIE".to_string(),
        label_sick: "MALATTIA".to_string(),
        label_total_vacation: "Totale Ferie".to_string(),
        label_total_sick: "Totale Malattia".to_string(),
        label_total_permit_hours: "Totale Ore Permesso".to_string(),
    }
}

/// Build default timesheet options.
pub fn derive_default_timesheet_options() -> SpecTimesheetOptions {
    SpecTimesheetOptions {
        hours_morning: C_HOURS_MORNING_DEFAULT.to_string(),
        hours_afternoon: C_HOURS_AFTERNOON_DEFAULT.to_string(),
        width_cell_padding: N_WIDTH_CELL_PADDING_DEFAULT,
    }
}
