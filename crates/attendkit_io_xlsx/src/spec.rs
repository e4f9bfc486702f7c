//! Shared XLSX specification models.

use attendkit_timesheet::EnumDayStyle;
use rust_xlsxwriter::XlsxError;

////////////////////////////////////////////////////////////////////////////////
// #region CellFormatSpecification

/// Backend-neutral cell format description.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct SpecCellFormat {
    /// Font family name.
    pub font_name: Option<String>,
    /// Font size in points.
    pub font_size: Option<i64>,
    /// Bold style.
    pub bold: Option<bool>,

    /// Horizontal alignment.
    pub align: Option<String>,
    /// Vertical alignment.
    pub valign: Option<String>,

    /// Number format code.
    pub num_format: Option<String>,
    /// Background fill color, `#RRGGBB`.
    pub bg_color: Option<String>,
}

impl SpecCellFormat {
    /// Return a new format by overlaying `patch` onto `self`.
    pub fn with_(&self, patch: SpecCellFormat) -> SpecCellFormat {
        self.merge(&patch)
    }

    /// Merge two formats with right-side non-`None` overwrite semantics.
    pub fn merge(&self, other: &SpecCellFormat) -> SpecCellFormat {
        SpecCellFormat {
            font_name: other.font_name.clone().or_else(|| self.font_name.clone()),
            font_size: other.font_size.or(self.font_size),
            bold: other.bold.or(self.bold),
            align: other.align.clone().or_else(|| self.align.clone()),
            valign: other.valign.clone().or_else(|| self.valign.clone()),
            num_format: other.num_format.clone().or_else(|| self.num_format.clone()),
            bg_color: other.bg_color.clone().or_else(|| self.bg_color.clone()),
        }
    }
}

/// Format presets for every cell role of a timesheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecTimesheetFormats {
    /// Plain text (header labels, summary labels).
    pub text: SpecCellFormat,
    /// Employee name values in the header row.
    pub name_value: SpecCellFormat,
    /// Column titles.
    pub column_title: SpecCellFormat,
    /// Weekend/holiday rows.
    pub day_weekend_holiday: SpecCellFormat,
    /// Vacation rows.
    pub day_vacation: SpecCellFormat,
    /// Sick rows.
    pub day_sick: SpecCellFormat,
    /// Permit rows.
    pub day_permit: SpecCellFormat,
    /// Normal rows.
    pub day_normal: SpecCellFormat,
    /// Patch applied to the morning cell of vacation/sick rows.
    pub day_label_bold: SpecCellFormat,
    /// Summary day counts.
    pub summary_count: SpecCellFormat,
    /// Summary hour totals.
    pub summary_hours: SpecCellFormat,
}

impl SpecTimesheetFormats {
    /// Row format for a day style.
    pub fn fmt_day(&self, style: EnumDayStyle) -> &SpecCellFormat {
        match style {
            EnumDayStyle::WeekendHoliday => &self.day_weekend_holiday,
            EnumDayStyle::Vacation => &self.day_vacation,
            EnumDayStyle::Sick => &self.day_sick,
            EnumDayStyle::Permit => &self.day_permit,
            EnumDayStyle::Normal => &self.day_normal,
        }
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region ReportSpecification

/// Per-write call report.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SpecXlsxReport {
    /// Actual sheet name in the workbook.
    pub sheet_name: String,
    /// Number of sheet rows written, blank rows included.
    pub n_rows: usize,
    /// Non-fatal warnings.
    pub warnings: Vec<String>,
}

impl SpecXlsxReport {
    /// Add a warning message.
    pub fn warn(&mut self, msg: impl AsRef<str>) {
        self.warnings.push(msg.as_ref().to_string());
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region Errors

/// XLSX sink failure.
#[derive(Debug, thiserror::Error)]
pub enum XlsxSinkError {
    /// Writer was already closed.
    #[error("Cannot write after close().")]
    Closed,
    /// Row or column index does not fit the Excel index type.
    #[error("{axis} index overflow: {value}")]
    IndexOverflow {
        /// `row` or `column`.
        axis: &'static str,
        /// Offending index.
        value: usize,
    },
    /// Backend error.
    #[error("xlsx write error: {0}")]
    Xlsx(#[from] XlsxError),
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
