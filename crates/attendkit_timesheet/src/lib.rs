//! `attendkit_timesheet` v1:
//! Monthly attendance timetable kernel.
//!
//! Module layout:
//! - `conf`     : constants and default presets (Italian locale, working hours)
//! - `spec`     : request/document models, options and validation errors
//! - `util`     : pure helper functions
//! - `parse`    : raw text fields -> validated request
//! - `calendar` : holiday lookups
//! - `sheet`    : day classifier and sheet document builder
pub mod calendar;
pub mod conf;
pub mod parse;
pub mod sheet;
pub mod spec;
pub mod util;

pub use calendar::{
    FixedHolidayCalendar, HolidayCalendar, ItalianHolidayCalendar, NoHolidayCalendar,
    calculate_easter_sunday,
};
pub use conf::{
    C_HOURS_AFTERNOON_DEFAULT, C_HOURS_MORNING_DEFAULT, N_COLS_TIMESHEET,
    N_WIDTH_CELL_PADDING_DEFAULT, derive_default_timesheet_options, derive_italian_locale,
};
pub use parse::{parse_attendance_request, parse_day_list, parse_month_name, parse_permits};
pub use sheet::{SheetSink, build_sheet_document, build_timesheet_from_fields, classify_day};
pub use spec::{
    EnumDayStyle, EnumSummaryValue, EnumValidationErrorKind, SpecAttendanceFields,
    SpecAttendanceRequest, SpecDayRow, SpecLocale, SpecPermitWindow, SpecSheetDocument,
    SpecSummaryRow, SpecTimesheetOptions, ValidationError,
};
pub use util::{calculate_days_in_month, capitalize_first, derive_file_name, is_leap_year};
