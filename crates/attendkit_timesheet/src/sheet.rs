//! Day classifier and sheet document builder.

use std::collections::BTreeSet;

use chrono::{Datelike, NaiveDate, Weekday};
use tracing::debug;

use crate::calendar::HolidayCalendar;
use crate::conf::C_FMT_DATE_LABEL;
use crate::parse::parse_attendance_request;
use crate::spec::{
    EnumDayStyle, EnumSummaryValue, SpecAttendanceFields, SpecAttendanceRequest, SpecDayRow,
    SpecLocale, SpecSheetDocument, SpecSummaryRow, SpecTimesheetOptions, ValidationError,
};
use crate::util::{calculate_days_in_month, capitalize_first, derive_file_name, plan_column_widths};

/// Destination for a built document (e.g. an XLSX encoder).
pub trait SheetSink {
    /// Sink-specific failure.
    type Error;

    /// Render one document.
    fn write_document(&mut self, document: &SpecSheetDocument) -> Result<(), Self::Error>;
}

/// Pick the single style of `date`; the first matching rule wins.
///
/// Order: weekend/holiday, vacation, sick, permit, normal.
pub fn classify_day(
    date: NaiveDate,
    request: &SpecAttendanceRequest,
    set_holidays: &BTreeSet<NaiveDate>,
) -> EnumDayStyle {
    let n_day = i64::from(date.day());

    if matches!(date.weekday(), Weekday::Sat | Weekday::Sun) || set_holidays.contains(&date) {
        EnumDayStyle::WeekendHoliday
    } else if request.vacation_days.contains(&n_day) {
        EnumDayStyle::Vacation
    } else if request.sick_days.contains(&n_day) {
        EnumDayStyle::Sick
    } else if request.permits.contains_key(&n_day) {
        EnumDayStyle::Permit
    } else {
        EnumDayStyle::Normal
    }
}

fn build_day_row(
    date: NaiveDate,
    style: EnumDayStyle,
    request: &SpecAttendanceRequest,
    locale: &SpecLocale,
    options: &SpecTimesheetOptions,
) -> SpecDayRow {
    let c_weekday = &locale.weekday_names[date.weekday().num_days_from_monday() as usize];
    let label = format!("{c_weekday}, {}", date.format(C_FMT_DATE_LABEL));

    let (morning_text, afternoon_text, permit_text) = match style {
        EnumDayStyle::WeekendHoliday => (String::new(), String::new(), String::new()),
        EnumDayStyle::Vacation => (locale.label_vacation.clone(), String::new(), String::new()),
        EnumDayStyle::Sick => (locale.label_sick.clone(), String::new(), String::new()),
        EnumDayStyle::Permit => (
            options.hours_morning.clone(),
            options.hours_afternoon.clone(),
            request
                .permits
                .get(&i64::from(date.day()))
                .map(|permit| permit.display_range.clone())
                .unwrap_or_default(),
        ),
        EnumDayStyle::Normal => (
            options.hours_morning.clone(),
            options.hours_afternoon.clone(),
            String::new(),
        ),
    };

    SpecDayRow {
        date,
        label,
        morning_text,
        afternoon_text,
        permit_text,
        style,
    }
}

/// Walk every day of the request month and assemble the sheet document.
///
/// Holidays come from `calendar` for the request year. Never fails: all input
/// problems are caught by the parser.
pub fn build_sheet_document(
    request: &SpecAttendanceRequest,
    calendar: &dyn HolidayCalendar,
    locale: &SpecLocale,
    options: &SpecTimesheetOptions,
) -> SpecSheetDocument {
    let set_holidays = calendar.holidays(request.year);
    let n_days = calculate_days_in_month(request.year, request.month);

    let day_rows: Vec<SpecDayRow> = (1..=n_days)
        .filter_map(|n_day| NaiveDate::from_ymd_opt(request.year, request.month, n_day))
        .map(|date| {
            let style = classify_day(date, request, &set_holidays);
            build_day_row(date, style, request, locale, options)
        })
        .collect();

    let summary_rows = vec![
        SpecSummaryRow {
            label: locale.label_total_vacation.clone(),
            value: EnumSummaryValue::Count(request.vacation_days.len()),
        },
        SpecSummaryRow {
            label: locale.label_total_sick.clone(),
            value: EnumSummaryValue::Count(request.sick_days.len()),
        },
        SpecSummaryRow {
            label: locale.label_total_permit_hours.clone(),
            value: EnumSummaryValue::Hours(request.calculate_total_permit_hours()),
        },
    ];

    let c_month_name = &locale.month_names[(request.month as usize).saturating_sub(1) % 12];
    let mut document = SpecSheetDocument {
        sheet_name: capitalize_first(c_month_name),
        file_name: derive_file_name(&request.first_name, c_month_name, request.year),
        header_pairs: vec![
            (locale.label_first_name.clone(), request.first_name.clone()),
            (locale.label_last_name.clone(), request.last_name.clone()),
        ],
        column_titles: locale.column_titles.to_vec(),
        day_rows,
        summary_rows,
        widths_by_col: vec![],
    };
    document.widths_by_col =
        plan_column_widths(&derive_text_grid(&document), options.width_cell_padding);

    debug!(
        sheet_name = %document.sheet_name,
        n_days = document.day_rows.len(),
        "built sheet document"
    );
    document
}

/// Parse raw fields and build the document in one step.
pub fn build_timesheet_from_fields(
    fields: &SpecAttendanceFields,
    year: i32,
    calendar: &dyn HolidayCalendar,
    locale: &SpecLocale,
    options: &SpecTimesheetOptions,
) -> Result<SpecSheetDocument, ValidationError> {
    let request = parse_attendance_request(fields, year, locale)?;
    Ok(build_sheet_document(&request, calendar, locale, options))
}

/// Text of every sheet row, in output order (blank rows are empty).
pub fn derive_text_grid(document: &SpecSheetDocument) -> Vec<Vec<String>> {
    let mut l_grid = Vec::with_capacity(document.height());

    l_grid.push(
        document
            .header_pairs
            .iter()
            .flat_map(|(c_label, c_value)| [c_label.clone(), c_value.clone()])
            .collect(),
    );
    l_grid.push(vec![]);
    l_grid.push(document.column_titles.clone());
    for row in &document.day_rows {
        l_grid.push(row.cells().iter().map(ToString::to_string).collect());
    }
    l_grid.push(vec![]);
    for row in &document.summary_rows {
        l_grid.push(vec![row.label.clone(), row.value.to_text()]);
    }

    l_grid
}
