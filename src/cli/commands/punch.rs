use crate::cli::commands::open_ledger;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::directory::{Directory, resolve_name};
use crate::core::ledger::PunchRequest;
use crate::db::log::ttlog_quiet;
use crate::errors::{AppError, AppResult};
use crate::models::action::PunchAction;
use crate::models::punch::PunchOverrides;
use crate::ui::messages::success;

/// Record one punch.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Punch {
        code,
        action,
        job,
        department,
        location,
        device,
        note,
    } = cmd
    {
        // malformed actions never reach the database
        PunchAction::parse(action)?;

        let ledger = open_ledger(cfg)?;

        let (department_id, location_id) = ledger.with_store(|store| {
            Ok((
                resolve_name(&store.departments_by_name()?, department.as_deref(), "department")?,
                resolve_name(&store.locations_by_name()?, location.as_deref(), "location")?,
            ))
        })?;

        let request = PunchRequest {
            code: code.clone(),
            action: action.clone(),
            job_number: job.clone(),
            overrides: PunchOverrides {
                location_id,
                department_id,
                device_label: device.clone().or_else(|| cfg.device_label.clone()),
                note: note.clone(),
            },
        };

        match ledger.submit_punch(&request) {
            Ok(receipt) => {
                let ev = &receipt.event;
                let job_info = match ev.job_number.as_deref() {
                    Some(j) if !j.is_empty() => format!(" (job {})", j),
                    _ => String::new(),
                };

                ledger.with_store(|store| {
                    ttlog_quiet(
                        &store.conn,
                        "punch",
                        code,
                        &format!(
                            "{} {}{} at {}",
                            receipt.employee_name,
                            ev.action.label(),
                            job_info,
                            ev.iso_timestamp()
                        ),
                    );
                    Ok(())
                })?;

                success(format!(
                    "Punch recorded: {} {}{} at {}",
                    receipt.employee_name,
                    ev.action.label(),
                    job_info,
                    ev.iso_timestamp()
                ));
                Ok(())
            }
            Err(e @ (AppError::DuplicatePunch { .. } | AppError::NotFound(_))) => {
                ledger.with_store(|store| {
                    ttlog_quiet(&store.conn, "punch_rejected", code, &e.to_string());
                    Ok(())
                })?;
                Err(e)
            }
            Err(e) => Err(e),
        }
    } else {
        Ok(())
    }
}
