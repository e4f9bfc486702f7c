//! `attendkit_io_xlsx` v1:
//! Rust-side XLSX sink for timesheet documents.
//!
//! Module layout:
//! - `conf`   : constants and default presets
//! - `spec`   : format specs, reports and sink errors
//! - `util`   : pure helper functions
//! - `writer` : `rust_xlsxwriter` backed writer kernel
pub mod conf;
pub mod spec;
pub mod util;
pub mod writer;

pub use conf::{
    N_LEN_EXCEL_SHEET_NAME_MAX, N_WIDTH_EXCEL_COLUMN_MAX, TUP_EXCEL_ILLEGAL,
    derive_day_style_color, derive_default_timesheet_formats,
};
pub use spec::{SpecCellFormat, SpecTimesheetFormats, SpecXlsxReport, XlsxSinkError};
pub use util::{create_sheet_identifier, sanitize_sheet_name};
pub use writer::{XlsxWriter, render_timesheet_xlsx};
