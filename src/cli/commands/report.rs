use crate::cli::commands::open_ledger;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::store::RangeQuery;
use crate::db::directory::find_employee_by_code;
use crate::db::log::ttlog_quiet;
use crate::errors::{AppError, AppResult};
use crate::export::ReportLogic;
use crate::export::range::parse_range;

/// Handle the `report` command
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Report {
        format,
        file,
        range,
        employees,
        force,
    } = cmd
    else {
        return Ok(());
    };

    let dates = match range.as_deref() {
        Some(r) => parse_range(r)?,
        None => None,
    };

    let ledger = open_ledger(cfg)?;

    let employee_ids = if employees.is_empty() {
        None
    } else {
        let ids = ledger.with_store(|store| {
            employees
                .iter()
                .map(|code| {
                    find_employee_by_code(&store.conn, code)?
                        .map(|e| e.id)
                        .ok_or_else(|| AppError::NotFound(code.clone()))
                })
                .collect::<AppResult<Vec<i64>>>()
        })?;
        Some(ids)
    };

    let query = RangeQuery {
        employee_ids,
        dates,
    };

    let report = ReportLogic::export(
        &ledger,
        &query,
        &cfg.report_title,
        format,
        file.as_deref(),
        *force,
    )?;

    // stdout exports stay machine-readable, so only file exports are audited
    if let Some(path) = file.as_deref() {
        ledger.with_store(|store| {
            ttlog_quiet(
                &store.conn,
                "report",
                path,
                &format!(
                    "{} export, {} punch(es), range {}",
                    format.as_str(),
                    report.records().len(),
                    range.as_deref().unwrap_or("all")
                ),
            );
            Ok(())
        })?;
    }

    Ok(())
}
