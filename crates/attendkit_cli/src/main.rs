//! attendkit CLI - monthly attendance timesheet generator

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use attendkit_io_xlsx::XlsxWriter;
use attendkit_timesheet::{
    HolidayCalendar, ItalianHolidayCalendar, NoHolidayCalendar, SpecAttendanceFields,
    SpecTimesheetOptions, ValidationError, build_timesheet_from_fields, derive_italian_locale,
};
use chrono::Datelike;
use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "attendkit")]
#[command(author, version, about = "Generate a monthly attendance timesheet (XLSX)")]
struct Cli {
    /// First name
    #[arg(long)]
    nome: String,

    /// Last name
    #[arg(long)]
    cognome: String,

    /// Italian month name (e.g. "gennaio")
    #[arg(long)]
    mese: String,

    /// Vacation days, comma separated (e.g. "3,4,5")
    #[arg(long, default_value = "")]
    ferie: String,

    /// Sick days, comma separated
    #[arg(long, default_value = "")]
    malattia: String,

    /// Permits as day:HH:MM-HH:MM, comma separated (e.g. "13:10:00-11:30")
    #[arg(long, default_value = "")]
    permessi: String,

    /// Calendar year (default: current year)
    #[arg(long)]
    year: Option<i32>,

    /// Output directory
    #[arg(short, long, default_value = ".")]
    out_dir: PathBuf,

    /// Ignore public holidays, only weekends are highlighted
    #[arg(long)]
    no_holidays: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(path) => {
            println!("{}", path.display());
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("Error: {err:#}");
            if err.downcast_ref::<ValidationError>().is_some() {
                ExitCode::from(2)
            } else {
                ExitCode::FAILURE
            }
        }
    }
}

fn init_tracing(if_verbose: bool) {
    let c_level_default = if if_verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(c_level_default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: &Cli) -> Result<PathBuf> {
    let n_year = cli.year.unwrap_or_else(|| chrono::Local::now().year());
    let fields = SpecAttendanceFields {
        first_name: cli.nome.clone(),
        last_name: cli.cognome.clone(),
        month: cli.mese.clone(),
        vacation_days: cli.ferie.clone(),
        sick_days: cli.malattia.clone(),
        permits: cli.permessi.clone(),
    };
    let calendar: &dyn HolidayCalendar = if cli.no_holidays {
        &NoHolidayCalendar
    } else {
        &ItalianHolidayCalendar
    };

    let document = build_timesheet_from_fields(
        &fields,
        n_year,
        calendar,
        &derive_italian_locale(),
        &SpecTimesheetOptions::default(),
    )?;
    debug!(n_days = document.day_rows.len(), "document built");

    let path_file_out = derive_output_path(&cli.out_dir, &document.file_name);
    let mut writer = XlsxWriter::default();
    writer.write_timesheet(&document)?;
    writer
        .close(&path_file_out)
        .with_context(|| format!("Failed to write '{}'", path_file_out.display()))?;

    info!(path = %path_file_out.display(), sheet = %document.sheet_name, "timesheet written");
    Ok(path_file_out)
}

fn derive_output_path(dir_out: &Path, file_name: &str) -> PathBuf {
    dir_out.join(file_name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn cli_parses_optional_lists() {
        let cli = Cli::try_parse_from([
            "attendkit",
            "--nome",
            "Mario",
            "--cognome",
            "Rossi",
            "--mese",
            "marzo",
            "--permessi",
            "13:10:00-11:30",
            "--year",
            "2025",
        ])
        .expect("valid args");
        assert_eq!(cli.ferie, "");
        assert_eq!(cli.permessi, "13:10:00-11:30");
        assert_eq!(cli.year, Some(2025));
        assert_eq!(cli.out_dir, PathBuf::from("."));
        assert!(!cli.no_holidays);
    }

    #[test]
    fn validation_failure_keeps_error_type() {
        let cli = Cli::try_parse_from([
            "attendkit", "--nome", "Mario", "--cognome", "Rossi", "--mese", "brumaio",
        ])
        .expect("valid args");
        let err = run(&cli).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ValidationError>(),
            Some(ValidationError::InvalidMonth(_))
        ));
    }

    #[test]
    fn run_writes_workbook_to_out_dir() {
        let dir_out = std::env::temp_dir().join(format!("attendkit_cli_{}", std::process::id()));
        std::fs::create_dir_all(&dir_out).expect("temp dir");
        let cli = Cli::try_parse_from([
            "attendkit",
            "--nome",
            "Mario",
            "--cognome",
            "Rossi",
            "--mese",
            "Febbraio",
            "--year",
            "2024",
            "--out-dir",
            dir_out.to_str().expect("utf-8 temp dir"),
        ])
        .expect("valid args");

        let path = run(&cli).expect("run");
        assert_eq!(path, dir_out.join("Mario_Febbraio2024.xlsx"));
        assert!(path.exists());
        let _ = std::fs::remove_dir_all(&dir_out);
    }

    #[test]
    fn run_keeps_output_inside_out_dir() {
        let dir_out =
            std::env::temp_dir().join(format!("attendkit_cli_sep_{}", std::process::id()));
        std::fs::create_dir_all(&dir_out).expect("temp dir");
        let cli = Cli::try_parse_from([
            "attendkit",
            "--nome",
            "../x",
            "--cognome",
            "Rossi",
            "--mese",
            "marzo",
            "--year",
            "2025",
            "--out-dir",
            dir_out.to_str().expect("utf-8 temp dir"),
        ])
        .expect("valid args");

        let path = run(&cli).expect("run");
        assert_eq!(path.parent(), Some(dir_out.as_path()));
        assert_eq!(
            path.file_name().and_then(|name| name.to_str()),
            Some(".._x_Marzo2025.xlsx")
        );
        let _ = std::fs::remove_dir_all(&dir_out);
    }
}
