use crate::core::clock::Clock;
use crate::core::directory::Directory;
use crate::core::ledger::Ledger;
use crate::core::report::build_report;
use crate::core::store::{PunchStore, RangeQuery};
use crate::errors::AppResult;
use crate::export::ReportFormat;
use crate::export::csv::write_csv;
use crate::export::fs_utils::ensure_writable;
use crate::export::json::write_json;
use crate::export::notify_export_success;
use crate::export::render::Report;
use crate::export::xlsx::export_xlsx;
use crate::ui::messages::{info, warning};
use std::fs::File;
use std::io::{self, BufWriter};
use std::path::Path;

/// High-level report export.
pub struct ReportLogic;

impl ReportLogic {
    /// Build the report for `query` and write it.
    ///
    /// - `file = None` streams CSV/JSON to stdout (XLSX needs a file)
    /// - `file = Some(path)`: absolute path, overwrite needs `force` or a
    ///   confirmation
    ///
    /// Returns the rendered report so callers can log what was exported.
    pub fn export<S, C>(
        ledger: &Ledger<S, C>,
        query: &RangeQuery,
        title: &str,
        format: &ReportFormat,
        file: Option<&str>,
        force: bool,
    ) -> AppResult<Report>
    where
        S: Directory + PunchStore,
        C: Clock,
    {
        let report = build_report(ledger, query, title)?;

        let Some(file) = file else {
            Self::write_stdout(&report, format)?;
            return Ok(report);
        };

        let path = Path::new(file);
        ensure_writable(path, force)?;

        if report.is_empty() {
            warning("No punches found for selected range.");
        }

        info(format!(
            "Exporting to {}: {}",
            format.as_str().to_uppercase(),
            path.display()
        ));

        match format {
            ReportFormat::Csv => write_csv(&report, BufWriter::new(File::create(path)?))?,
            ReportFormat::Json => write_json(&report, BufWriter::new(File::create(path)?))?,
            ReportFormat::Xlsx => export_xlsx(&report, path)?,
        }

        notify_export_success(&format.as_str().to_uppercase(), path);
        Ok(report)
    }

    fn write_stdout(report: &Report, format: &ReportFormat) -> AppResult<()> {
        let stdout = io::stdout().lock();
        match format {
            ReportFormat::Csv => write_csv(report, stdout),
            ReportFormat::Json => write_json(report, stdout),
            ReportFormat::Xlsx => Err(crate::errors::AppError::Export(
                "XLSX output needs --file".into(),
            )),
        }
    }
}
