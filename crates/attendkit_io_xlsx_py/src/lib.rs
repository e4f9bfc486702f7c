use attendkit_io_xlsx::{XlsxSinkError, XlsxWriter as RsXlsxWriter, render_timesheet_xlsx};
use attendkit_timesheet::{
    HolidayCalendar, ItalianHolidayCalendar, NoHolidayCalendar, SpecAttendanceFields,
    SpecSheetDocument, SpecTimesheetOptions, ValidationError, build_timesheet_from_fields,
    derive_italian_locale,
};
use chrono::Datelike;
use pyo3::exceptions::{PyRuntimeError, PyValueError};
use pyo3::prelude::*;
use pyo3::types::{PyBytes, PyDict, PyTuple};

const N_BRIDGE_ABI_VERSION: u64 = 1;
const C_BRIDGE_CONTRACT_VERSION: &str = "attendkit.xlsx.timesheet.v1";

#[pyclass(name = "XlsxWriter")]
struct PyXlsxWriter {
    #[pyo3(get)]
    file_out: String,
    inner: RsXlsxWriter,
}

#[pymethods]
impl PyXlsxWriter {
    #[new]
    fn new(file_out: String) -> Self {
        Self {
            file_out,
            inner: RsXlsxWriter::default(),
        }
    }

    fn __enter__(slf: PyRefMut<'_, Self>) -> PyRefMut<'_, Self> {
        slf
    }

    #[pyo3(signature = (_exc_type=None, _exc=None, _tb=None))]
    fn __exit__(
        &mut self,
        _exc_type: Option<&Bound<'_, PyAny>>,
        _exc: Option<&Bound<'_, PyAny>>,
        _tb: Option<&Bound<'_, PyAny>>,
    ) -> PyResult<()> {
        self.close()
    }

    fn close(&mut self) -> PyResult<()> {
        self.inner
            .close(&self.file_out)
            .map_err(convert_sink_error)
    }

    fn report(&self, py: Python<'_>) -> PyResult<Py<PyAny>> {
        let mut l_report_obj = Vec::new();
        for report in self.inner.report() {
            let dict_report = PyDict::new(py);
            dict_report.set_item("sheet_name", report.sheet_name)?;
            dict_report.set_item("n_rows", report.n_rows)?;
            dict_report.set_item("warnings", report.warnings)?;
            l_report_obj.push(dict_report.into_any().unbind());
        }
        let tup_report = PyTuple::new(py, l_report_obj)?;
        Ok(tup_report.into_any().unbind())
    }

    /// Append one monthly timesheet sheet; returns the suggested file name.
    #[pyo3(signature = (
        nome,
        cognome,
        mese,
        ferie = "",
        malattia = "",
        permessi = "",
        year = None,
        if_holidays = true
    ))]
    #[allow(clippy::too_many_arguments)]
    fn write_timesheet(
        &mut self,
        nome: &str,
        cognome: &str,
        mese: &str,
        ferie: &str,
        malattia: &str,
        permessi: &str,
        year: Option<i32>,
        if_holidays: bool,
    ) -> PyResult<String> {
        let fields = create_attendance_fields(nome, cognome, mese, ferie, malattia, permessi);
        let document = derive_document(&fields, year, if_holidays)?;
        self.inner
            .write_timesheet(&document)
            .map_err(convert_sink_error)?;
        Ok(document.file_name)
    }
}

/// Build one timesheet workbook in memory and return `(file_name, xlsx_bytes)`.
#[pyfunction]
#[pyo3(signature = (
    nome,
    cognome,
    mese,
    ferie = "",
    malattia = "",
    permessi = "",
    year = None,
    if_holidays = true
))]
#[allow(clippy::too_many_arguments)]
fn build_timesheet_xlsx(
    py: Python<'_>,
    nome: &str,
    cognome: &str,
    mese: &str,
    ferie: &str,
    malattia: &str,
    permessi: &str,
    year: Option<i32>,
    if_holidays: bool,
) -> PyResult<(String, Py<PyBytes>)> {
    let fields = create_attendance_fields(nome, cognome, mese, ferie, malattia, permessi);
    let document = derive_document(&fields, year, if_holidays)?;
    let v_bytes = render_timesheet_xlsx(&document).map_err(convert_sink_error)?;
    Ok((document.file_name, PyBytes::new(py, &v_bytes).unbind()))
}

fn create_attendance_fields(
    nome: &str,
    cognome: &str,
    mese: &str,
    ferie: &str,
    malattia: &str,
    permessi: &str,
) -> SpecAttendanceFields {
    SpecAttendanceFields {
        first_name: nome.to_string(),
        last_name: cognome.to_string(),
        month: mese.to_string(),
        vacation_days: ferie.to_string(),
        sick_days: malattia.to_string(),
        permits: permessi.to_string(),
    }
}

fn derive_document(
    fields: &SpecAttendanceFields,
    year: Option<i32>,
    if_holidays: bool,
) -> PyResult<SpecSheetDocument> {
    let n_year = year.unwrap_or_else(|| chrono::Local::now().year());
    let calendar: &dyn HolidayCalendar = if if_holidays {
        &ItalianHolidayCalendar
    } else {
        &NoHolidayCalendar
    };
    build_timesheet_from_fields(
        fields,
        n_year,
        calendar,
        &derive_italian_locale(),
        &SpecTimesheetOptions::default(),
    )
    .map_err(convert_validation_error)
}

fn convert_validation_error(err: ValidationError) -> PyErr {
    PyValueError::new_err(err.to_string())
}

fn convert_sink_error(err: XlsxSinkError) -> PyErr {
    PyRuntimeError::new_err(err.to_string())
}

#[pymodule]
fn _attendkit_io_xlsx_rs(module: &Bound<'_, PyModule>) -> PyResult<()> {
    module.add_class::<PyXlsxWriter>()?;
    module.add_function(wrap_pyfunction!(build_timesheet_xlsx, module)?)?;
    module.add("__bridge_abi__", N_BRIDGE_ABI_VERSION)?;
    module.add("__bridge_contract__", C_BRIDGE_CONTRACT_VERSION)?;
    Ok(())
}
