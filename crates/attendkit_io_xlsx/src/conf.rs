//! XLSX constants and default preset factories.

use attendkit_timesheet::EnumDayStyle;

use crate::spec::{SpecCellFormat, SpecTimesheetFormats};

/// Excel sheet name maximum length.
pub const N_LEN_EXCEL_SHEET_NAME_MAX: usize = 31;
/// Characters not allowed in sheet names.
pub const TUP_EXCEL_ILLEGAL: [&str; 7] = ["*", ":", "?", "/", "\\", "[", "]"];
/// Maximum column width accepted by Excel.
pub const N_WIDTH_EXCEL_COLUMN_MAX: usize = 255;

/// Fill of the name values in the header row.
pub const C_COLOR_NAME_VALUE: &str = "#90EE90";
/// Fill of weekend and holiday rows.
pub const C_COLOR_WEEKEND_HOLIDAY: &str = "#FFCCCB";
/// Fill of vacation rows.
pub const C_COLOR_VACATION: &str = "#EEE8AA";
/// Fill of sick-leave rows.
pub const C_COLOR_SICK: &str = "#ADD8E6";
/// Fill of permit rows.
pub const C_COLOR_PERMIT: &str = "#E6E6FA";

/// Row fill color for `style`; `None` leaves the row unfilled.
pub fn derive_day_style_color(style: EnumDayStyle) -> Option<&'static str> {
    match style {
        EnumDayStyle::WeekendHoliday => Some(C_COLOR_WEEKEND_HOLIDAY),
        EnumDayStyle::Vacation => Some(C_COLOR_VACATION),
        EnumDayStyle::Sick => Some(C_COLOR_SICK),
        EnumDayStyle::Permit => Some(C_COLOR_PERMIT),
        EnumDayStyle::Normal => None,
    }
}

/// Build default timesheet format presets used by [`crate::writer::XlsxWriter`].
pub fn derive_default_timesheet_formats() -> SpecTimesheetFormats {
    let cfg_base_fmt_spec = SpecCellFormat {
        font_name: Some("Calibri".to_string()),
        font_size: Some(11),
        valign: Some("vcenter".to_string()),
        ..Default::default()
    };
    let cfg_bold = SpecCellFormat {
        bold: Some(true),
        ..Default::default()
    };

    let fmt_day = |style: EnumDayStyle| {
        cfg_base_fmt_spec.with_(SpecCellFormat {
            bg_color: derive_day_style_color(style).map(ToString::to_string),
            ..Default::default()
        })
    };

    SpecTimesheetFormats {
        text: cfg_base_fmt_spec.clone(),
        name_value: cfg_base_fmt_spec.with_(SpecCellFormat {
            bg_color: Some(C_COLOR_NAME_VALUE.to_string()),
            ..Default::default()
        }),
        column_title: cfg_base_fmt_spec.with_(cfg_bold.clone()),
        day_weekend_holiday: fmt_day(EnumDayStyle::WeekendHoliday),
        day_vacation: fmt_day(EnumDayStyle::Vacation),
        day_sick: fmt_day(EnumDayStyle::Sick),
        day_permit: fmt_day(EnumDayStyle::Permit),
        day_normal: fmt_day(EnumDayStyle::Normal),
        day_label_bold: cfg_bold,
        summary_count: cfg_base_fmt_spec.with_(SpecCellFormat {
            num_format: Some("0".to_string()),
            align: Some("left".to_string()),
            ..Default::default()
        }),
        summary_hours: cfg_base_fmt_spec.with_(SpecCellFormat {
            num_format: Some("0.0#".to_string()),
            align: Some("left".to_string()),
            ..Default::default()
        }),
    }
}
