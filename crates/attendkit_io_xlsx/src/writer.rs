//! XLSX writer kernel that renders timesheet documents into a workbook.

use std::collections::BTreeSet;
use std::path::Path;

use attendkit_timesheet::conf::{N_ROW_IDX_COLUMN_TITLES, N_ROW_IDX_FIRST_DAY, N_ROW_IDX_HEADER};
use attendkit_timesheet::{EnumSummaryValue, SheetSink, SpecSheetDocument};
use rust_xlsxwriter::{Format, FormatAlign, Workbook, Worksheet};
use tracing::{debug, warn};

use crate::conf::{N_LEN_EXCEL_SHEET_NAME_MAX, N_WIDTH_EXCEL_COLUMN_MAX, derive_default_timesheet_formats};
use crate::spec::{SpecCellFormat, SpecTimesheetFormats, SpecXlsxReport, XlsxSinkError};
use crate::util::{create_sheet_identifier, sanitize_sheet_name};

/// Stateful workbook writer.
///
/// The workbook is buffered in memory until [`Self::close`] or
/// [`Self::save_to_buffer`] is called.
pub struct XlsxWriter {
    workbook: Workbook,
    formats: SpecTimesheetFormats,
    set_sheet_names_existing: BTreeSet<String>,
    l_reports: Vec<SpecXlsxReport>,
    if_closed: bool,
}

impl Default for XlsxWriter {
    fn default() -> Self {
        Self::new(derive_default_timesheet_formats())
    }
}

impl XlsxWriter {
    /// Create writer with format presets.
    pub fn new(formats: SpecTimesheetFormats) -> Self {
        Self {
            workbook: Workbook::new(),
            formats,
            set_sheet_names_existing: BTreeSet::new(),
            l_reports: Vec::new(),
            if_closed: false,
        }
    }

    /// Return immutable snapshot of per-sheet write reports.
    pub fn report(&self) -> Vec<SpecXlsxReport> {
        self.l_reports.clone()
    }

    /// Flush workbook to disk. Idempotent.
    pub fn close(&mut self, path_file_out: impl AsRef<Path>) -> Result<(), XlsxSinkError> {
        if self.if_closed {
            return Ok(());
        }
        self.workbook.save(path_file_out.as_ref())?;
        self.if_closed = true;
        Ok(())
    }

    /// Serialize the workbook to XLSX bytes without closing the writer.
    pub fn save_to_buffer(&mut self) -> Result<Vec<u8>, XlsxSinkError> {
        Ok(self.workbook.save_to_buffer()?)
    }

    /// Write one timesheet document as a new sheet.
    pub fn write_timesheet(&mut self, document: &SpecSheetDocument) -> Result<(), XlsxSinkError> {
        if self.if_closed {
            return Err(XlsxSinkError::Closed);
        }

        let mut report = SpecXlsxReport::default();

        let c_sheet_name_clean = sanitize_sheet_name(&document.sheet_name, "_");
        if c_sheet_name_clean != document.sheet_name {
            warn!(
                requested = %document.sheet_name,
                actual = %c_sheet_name_clean,
                "sheet name sanitized"
            );
            report.warn(format!(
                "Sheet name {:?} sanitized to {c_sheet_name_clean:?}.",
                document.sheet_name
            ));
        }
        let sheet_name_unique = self.derive_unique_sheet_name(&c_sheet_name_clean);

        let fmt_text = derive_rust_xlsx_format(&self.formats.text);
        let fmt_name_value = derive_rust_xlsx_format(&self.formats.name_value);
        let fmt_column_title = derive_rust_xlsx_format(&self.formats.column_title);
        let fmt_summary_count = derive_rust_xlsx_format(&self.formats.summary_count);
        let fmt_summary_hours = derive_rust_xlsx_format(&self.formats.summary_hours);

        let worksheet = self.workbook.add_worksheet();
        worksheet.set_name(&sheet_name_unique)?;

        for (n_idx_pair, (c_label, c_value)) in document.header_pairs.iter().enumerate() {
            write_text_cell(worksheet, N_ROW_IDX_HEADER, 2 * n_idx_pair, c_label, &fmt_text)?;
            write_text_cell(
                worksheet,
                N_ROW_IDX_HEADER,
                2 * n_idx_pair + 1,
                c_value,
                &fmt_name_value,
            )?;
        }

        for (n_idx_col, c_title) in document.column_titles.iter().enumerate() {
            write_text_cell(
                worksheet,
                N_ROW_IDX_COLUMN_TITLES,
                n_idx_col,
                c_title,
                &fmt_column_title,
            )?;
        }

        for (n_idx_day, row) in document.day_rows.iter().enumerate() {
            let fmt_row_spec = self.formats.fmt_day(row.style);
            let fmt_row = derive_rust_xlsx_format(fmt_row_spec);
            let fmt_morning = if row.style.is_morning_bold() {
                derive_rust_xlsx_format(&fmt_row_spec.merge(&self.formats.day_label_bold))
            } else {
                fmt_row.clone()
            };

            for (n_idx_col, c_text) in row.cells().iter().enumerate() {
                let fmt_cell = if n_idx_col == 1 { &fmt_morning } else { &fmt_row };
                write_text_cell(
                    worksheet,
                    N_ROW_IDX_FIRST_DAY + n_idx_day,
                    n_idx_col,
                    c_text,
                    fmt_cell,
                )?;
            }
        }

        let n_row_summary_start = document.row_idx_first_summary();
        for (n_idx_summary, row) in document.summary_rows.iter().enumerate() {
            let n_row = n_row_summary_start + n_idx_summary;
            write_text_cell(worksheet, n_row, 0, &row.label, &fmt_text)?;
            let fmt_value = match row.value {
                EnumSummaryValue::Count(_) => &fmt_summary_count,
                EnumSummaryValue::Hours(_) => &fmt_summary_hours,
            };
            worksheet.write_number_with_format(
                cast_row_num(n_row)?,
                cast_col_num(1)?,
                row.value.as_f64(),
                fmt_value,
            )?;
        }

        for (n_idx_col, n_width) in document.widths_by_col.iter().enumerate() {
            let n_width_final = usize::min(*n_width, N_WIDTH_EXCEL_COLUMN_MAX);
            worksheet.set_column_width(cast_col_num(n_idx_col)?, n_width_final as f64)?;
        }

        report.sheet_name = sheet_name_unique;
        report.n_rows = document.height();
        debug!(
            sheet_name = %report.sheet_name,
            n_rows = report.n_rows,
            "timesheet sheet written"
        );
        self.l_reports.push(report);
        Ok(())
    }

    fn derive_unique_sheet_name(&mut self, name: &str) -> String {
        if !self.set_sheet_names_existing.contains(name) {
            self.set_sheet_names_existing.insert(name.to_string());
            return name.to_string();
        }

        let base_name: String = name
            .chars()
            .take(usize::max(1, N_LEN_EXCEL_SHEET_NAME_MAX - 3))
            .collect();

        let mut n_idx = 2usize;
        loop {
            let candidate = create_sheet_identifier(&base_name, n_idx);
            if !self.set_sheet_names_existing.contains(&candidate) {
                self.set_sheet_names_existing.insert(candidate.clone());
                return candidate;
            }
            n_idx += 1;
        }
    }
}

impl SheetSink for XlsxWriter {
    type Error = XlsxSinkError;

    fn write_document(&mut self, document: &SpecSheetDocument) -> Result<(), Self::Error> {
        self.write_timesheet(document)
    }
}

/// Render a single document to XLSX bytes with default formats.
pub fn render_timesheet_xlsx(document: &SpecSheetDocument) -> Result<Vec<u8>, XlsxSinkError> {
    let mut writer = XlsxWriter::default();
    writer.write_timesheet(document)?;
    writer.save_to_buffer()
}

fn write_text_cell(
    worksheet: &mut Worksheet,
    row_idx: usize,
    col_idx: usize,
    text: &str,
    format: &Format,
) -> Result<(), XlsxSinkError> {
    if text.is_empty() {
        worksheet.write_blank(cast_row_num(row_idx)?, cast_col_num(col_idx)?, format)?;
    } else {
        worksheet.write_string_with_format(
            cast_row_num(row_idx)?,
            cast_col_num(col_idx)?,
            text,
            format,
        )?;
    }
    Ok(())
}

fn derive_rust_xlsx_format(spec: &SpecCellFormat) -> Format {
    let mut format = Format::new();

    if let Some(val) = &spec.font_name {
        format = format.set_font_name(val.as_str());
    }
    if let Some(val) = spec.font_size {
        format = format.set_font_size(val as f64);
    }
    if spec.bold.unwrap_or(false) {
        format = format.set_bold();
    }

    for val in [&spec.align, &spec.valign].into_iter().flatten() {
        if let Some(align) = derive_format_align(val) {
            format = format.set_align(align);
        }
    }

    if let Some(val) = &spec.num_format {
        format = format.set_num_format(val.as_str());
    }
    if let Some(val) = &spec.bg_color {
        format = format.set_background_color(val.as_str());
    }

    format
}

fn derive_format_align(align: &str) -> Option<FormatAlign> {
    match align.trim().to_ascii_lowercase().as_str() {
        "left" => Some(FormatAlign::Left),
        "vcenter" => Some(FormatAlign::VerticalCenter),
        _ => None,
    }
}

fn cast_row_num(value: usize) -> Result<u32, XlsxSinkError> {
    u32::try_from(value).map_err(|_| XlsxSinkError::IndexOverflow { axis: "row", value })
}

fn cast_col_num(value: usize) -> Result<u16, XlsxSinkError> {
    u16::try_from(value).map_err(|_| XlsxSinkError::IndexOverflow {
        axis: "column",
        value,
    })
}

#[cfg(test)]
mod tests {
    use std::io::{Cursor, Read};

    use attendkit_timesheet::{
        NoHolidayCalendar, SpecAttendanceFields, SpecLocale, SpecTimesheetOptions,
        build_timesheet_from_fields,
    };

    use super::*;

    fn document(month: &str, ferie: &str, permessi: &str) -> SpecSheetDocument {
        let fields = SpecAttendanceFields {
            first_name: "Mario".to_string(),
            last_name: "Rossi".to_string(),
            month: month.to_string(),
            vacation_days: ferie.to_string(),
            permits: permessi.to_string(),
            ..Default::default()
        };
        build_timesheet_from_fields(
            &fields,
            2025,
            &NoHolidayCalendar,
            &SpecLocale::italian(),
            &SpecTimesheetOptions::default(),
        )
        .expect("valid fields")
    }

    fn read_zip_entry(v_bytes: &[u8], name: &str) -> String {
        let mut archive = zip::ZipArchive::new(Cursor::new(v_bytes)).expect("xlsx is a zip");
        let mut entry = archive.by_name(name).expect("entry exists");
        let mut c_text = String::new();
        entry.read_to_string(&mut c_text).expect("utf-8 entry");
        c_text
    }

    fn find_section<'a>(c_xml: &'a str, tag: &str) -> &'a str {
        let n_start = c_xml.find(&format!("<{tag}")).expect("section start");
        let n_len = c_xml[n_start..]
            .find(&format!("</{tag}>"))
            .expect("section end");
        &c_xml[n_start..n_start + n_len]
    }

    fn read_attr(c_element: &str, name: &str) -> Option<String> {
        let c_element = format!(" {c_element}");
        let c_key = format!(" {name}=\"");
        let n_start = c_element.find(&c_key)? + c_key.len();
        let n_len = c_element[n_start..].find('"')?;
        Some(c_element[n_start..n_start + n_len].to_string())
    }

    fn read_cell_tag<'a>(c_sheet: &'a str, cell_ref: &str) -> &'a str {
        let c_key = format!("<c r=\"{cell_ref}\"");
        let n_start = c_sheet
            .find(&c_key)
            .unwrap_or_else(|| panic!("cell {cell_ref} missing"));
        let n_len = c_sheet[n_start..].find('>').expect("cell tag end");
        &c_sheet[n_start..n_start + n_len]
    }

    /// `(fill xml, is bold)` of the style applied to `cell_ref`.
    fn derive_cell_style(c_sheet: &str, c_styles: &str, cell_ref: &str) -> (String, bool) {
        let n_xf: usize = read_attr(read_cell_tag(c_sheet, cell_ref), "s")
            .map_or(0, |c_idx| c_idx.parse().expect("numeric style index"));

        let l_xfs: Vec<&str> = find_section(c_styles, "cellXfs")
            .split("<xf ")
            .skip(1)
            .collect();
        let l_fills: Vec<&str> = find_section(c_styles, "fills")
            .split("<fill>")
            .skip(1)
            .collect();
        let l_fonts: Vec<&str> = find_section(c_styles, "fonts")
            .split("<font>")
            .skip(1)
            .collect();

        let c_xf = l_xfs[n_xf];
        let n_fill: usize = read_attr(c_xf, "fillId").expect("fillId").parse().expect("fill idx");
        let n_font: usize = read_attr(c_xf, "fontId").expect("fontId").parse().expect("font idx");
        (l_fills[n_fill].to_string(), l_fonts[n_font].contains("<b/>"))
    }

    #[test]
    fn cells_carry_row_fills_and_bold_labels() {
        let fields = SpecAttendanceFields {
            first_name: "Mario".to_string(),
            last_name: "Rossi".to_string(),
            month: "gennaio".to_string(),
            vacation_days: "2".to_string(),
            sick_days: "3".to_string(),
            ..Default::default()
        };
        let doc = build_timesheet_from_fields(
            &fields,
            2025,
            &NoHolidayCalendar,
            &SpecLocale::italian(),
            &SpecTimesheetOptions::default(),
        )
        .expect("valid fields");
        let v_bytes = render_timesheet_xlsx(&doc).expect("render");
        let c_sheet = read_zip_entry(&v_bytes, "xl/worksheets/sheet1.xml");
        let c_styles = read_zip_entry(&v_bytes, "xl/styles.xml");
        let style = |cell_ref: &str| derive_cell_style(&c_sheet, &c_styles, cell_ref);

        // Header: only the name values are filled.
        assert!(!style("A1").0.contains("rgb="));
        assert!(style("B1").0.contains("90EE90"));
        assert!(!style("C1").0.contains("rgb="));
        assert!(style("D1").0.contains("90EE90"));
        assert!(style("A3").1);

        // 2025-01-04 (Saturday) is row 7: filled across, including blank cells.
        for c_col in ["A", "B", "C", "D"] {
            let (c_fill, if_bold) = style(&format!("{c_col}7"));
            assert!(c_fill.contains("FFCCCB"), "{c_col}7 -> {c_fill}");
            assert!(!if_bold);
        }

        // Vacation (row 5) and sick (row 6): fill everywhere, bold morning only.
        for (n_row, c_color) in [(5, "EEE8AA"), (6, "ADD8E6")] {
            for c_col in ["A", "B", "C", "D"] {
                let (c_fill, if_bold) = style(&format!("{c_col}{n_row}"));
                assert!(c_fill.contains(c_color), "{c_col}{n_row} -> {c_fill}");
                assert_eq!(if_bold, c_col == "B", "{c_col}{n_row}");
            }
        }

        // 2025-01-06 (Monday) is a normal working day.
        let (c_fill, if_bold) = style("B9");
        assert!(!c_fill.contains("rgb="));
        assert!(!if_bold);
    }

    #[test]
    fn column_widths_follow_document() {
        let doc = document("luglio", "", "1:09:00-10:00");
        let v_bytes = render_timesheet_xlsx(&doc).expect("render");
        let c_sheet = read_zip_entry(&v_bytes, "xl/worksheets/sheet1.xml");

        let mut n_cols_seen = 0;
        for c_col in find_section(&c_sheet, "cols").split("<col ").skip(1) {
            let n_min: usize = read_attr(c_col, "min").expect("min").parse().expect("min");
            let n_max: usize = read_attr(c_col, "max").expect("max").parse().expect("max");
            let n_width: f64 = read_attr(c_col, "width").expect("width").parse().expect("width");
            for n_col in n_min..=n_max {
                // Stored widths include the font padding of the character unit.
                let n_expected = doc.widths_by_col[n_col - 1] as f64;
                assert!(
                    n_width > n_expected && n_width < n_expected + 1.0,
                    "col {n_col}: {n_width} vs {n_expected}"
                );
                n_cols_seen += 1;
            }
        }
        assert_eq!(n_cols_seen, doc.widths_by_col.len());
    }

    #[test]
    fn empty_permits_write_zero_total() {
        let doc = document("giugno", "", "");
        let v_bytes = render_timesheet_xlsx(&doc).expect("render");
        let c_sheet = read_zip_entry(&v_bytes, "xl/worksheets/sheet1.xml");

        // 3 leading rows, 30 days, spacer, then the hours total is the third summary row.
        assert_eq!(doc.row_idx_first_summary() + 2, 36);
        let n_start = c_sheet.find("<c r=\"B37\"").expect("total cell");
        let n_len = c_sheet[n_start..].find("</c>").expect("cell end");
        assert!(c_sheet[n_start..n_start + n_len].ends_with("<v>0</v>"));
    }

    #[test]
    fn render_produces_single_named_sheet() {
        let v_bytes = render_timesheet_xlsx(&document("gennaio", "", "")).expect("render");
        assert!(v_bytes.starts_with(b"PK"));

        let c_workbook = read_zip_entry(&v_bytes, "xl/workbook.xml");
        assert!(c_workbook.contains(r#"name="Gennaio""#));
        assert_eq!(c_workbook.matches("<sheet ").count(), 1);
    }

    #[test]
    fn render_writes_labels_and_permit_ranges() {
        let v_bytes =
            render_timesheet_xlsx(&document("aprile", "1", "10:09:30-11:00")).expect("render");

        let c_strings = read_zip_entry(&v_bytes, "xl/sharedStrings.xml");
        for c_expected in [
            "Nome",
            "Mario",
            "Cognome",
            "Rossi",
            "Giorno",
            "Orario Pomeriggio",
            "FERIE",
            "09:30-11:00",
            "Totale Ore Permesso",
        ] {
            assert!(c_strings.contains(c_expected), "missing {c_expected:?}");
        }
        assert!(!c_strings.contains("MALATTIA"));
    }

    #[test]
    fn report_tracks_sheets_and_deduplicates_names() {
        let mut writer = XlsxWriter::default();
        let doc = document("marzo", "", "");
        writer.write_document(&doc).expect("first write");
        writer.write_document(&doc).expect("second write");

        let l_reports = writer.report();
        assert_eq!(l_reports.len(), 2);
        assert_eq!(l_reports[0].sheet_name, "Marzo");
        assert_eq!(l_reports[1].sheet_name, "Marzo__2");
        assert_eq!(l_reports[0].n_rows, 3 + 31 + 1 + 3);
        assert!(l_reports[0].warnings.is_empty());
    }

    #[test]
    fn sanitized_sheet_name_is_reported() {
        let mut doc = document("marzo", "", "");
        doc.sheet_name = "Mar/zo".to_string();
        let mut writer = XlsxWriter::default();
        writer.write_timesheet(&doc).expect("write");

        let l_reports = writer.report();
        assert_eq!(l_reports[0].sheet_name, "Mar_zo");
        assert_eq!(l_reports[0].warnings.len(), 1);
    }

    #[test]
    fn write_after_close_fails() {
        let path = std::env::temp_dir().join(format!(
            "attendkit_xlsx_test_{}.xlsx",
            std::process::id()
        ));
        let mut writer = XlsxWriter::default();
        writer
            .write_timesheet(&document("maggio", "", ""))
            .expect("write");
        writer.close(&path).expect("close");
        writer.close(&path).expect("close is idempotent");
        assert!(path.exists());

        let err = writer
            .write_timesheet(&document("maggio", "", ""))
            .unwrap_err();
        assert!(matches!(err, XlsxSinkError::Closed));
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn default_formats_fill_styled_rows_only() {
        use attendkit_timesheet::EnumDayStyle;

        let formats = derive_default_timesheet_formats();
        assert_eq!(
            formats.fmt_day(EnumDayStyle::WeekendHoliday).bg_color.as_deref(),
            Some("#FFCCCB")
        );
        assert_eq!(
            formats.fmt_day(EnumDayStyle::Permit).bg_color.as_deref(),
            Some("#E6E6FA")
        );
        assert_eq!(formats.fmt_day(EnumDayStyle::Normal).bg_color, None);
        assert_eq!(formats.column_title.bold, Some(true));
        assert_eq!(formats.name_value.bg_color.as_deref(), Some("#90EE90"));
    }
}
