use crate::cli::parser::{Commands, EmployeeCommands};
use crate::config::Config;
use crate::core::import::ImportLogic;
use crate::db::directory::{
    add_employee, list_departments, list_employees, list_locations, set_employee_active,
};
use crate::db::log::ttlog_quiet;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::models::employee::NewEmployee;
use crate::ui::messages::{info, success, warning};
use crate::utils::colors::{RESET, color_for_active};
use crate::utils::table::Table;
use std::collections::HashMap;

/// Handle `employee <add|list|deactivate|activate|import>`
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Employee { action } = cmd else {
        return Ok(());
    };

    let mut pool = DbPool::new(&cfg.database)?;

    match action {
        EmployeeCommands::Add {
            name,
            code,
            department,
            location,
        } => {
            let emp = add_employee(
                &pool,
                &NewEmployee {
                    name: name.clone(),
                    code: code.clone(),
                    department: department.clone(),
                    location: location.clone(),
                },
            )?;

            ttlog_quiet(
                &pool.conn,
                "employee_add",
                &emp.code,
                &format!("Added employee '{}' (id {})", emp.name, emp.id),
            );
            success(format!("Employee '{}' added with code {}", emp.name, emp.code));
        }

        EmployeeCommands::List { all } => {
            let employees = list_employees(&pool.conn, *all)?;
            if employees.is_empty() {
                warning("No employees registered.");
                return Ok(());
            }

            let departments: HashMap<i64, String> = list_departments(&pool.conn)?
                .into_iter()
                .map(|d| (d.id, d.name))
                .collect();
            let locations: HashMap<i64, String> = list_locations(&pool.conn)?
                .into_iter()
                .map(|l| (l.id, l.name))
                .collect();

            let mut table = Table::new(&["ID", "NAME", "CODE", "DEPARTMENT", "LOCATION", "ACTIVE"]);
            let mut active_flags = Vec::with_capacity(employees.len());
            for e in &employees {
                let lookup = |map: &HashMap<i64, String>, id: Option<i64>| {
                    id.and_then(|id| map.get(&id).cloned()).unwrap_or_default()
                };
                table.add_row(vec![
                    e.id.to_string(),
                    e.name.clone(),
                    e.code.clone(),
                    lookup(&departments, e.department_id),
                    lookup(&locations, e.location_id),
                    if e.active { "yes" } else { "no" }.to_string(),
                ]);
                active_flags.push(e.active);
            }

            // header + rule first, then one line per employee
            let rendered = table.render();
            let mut lines = rendered.lines();
            for line in lines.by_ref().take(2) {
                println!("{}", line);
            }
            for (line, active) in lines.zip(active_flags) {
                println!("{}{}{}", color_for_active(active), line, RESET);
            }
        }

        EmployeeCommands::Deactivate { code } => {
            let emp = set_employee_active(&pool.conn, code, false)?;
            ttlog_quiet(
                &pool.conn,
                "employee_deactivate",
                code,
                &format!("Deactivated '{}'", emp.name),
            );
            success(format!("Employee '{}' deactivated", emp.name));
        }

        EmployeeCommands::Activate { code } => {
            let emp = set_employee_active(&pool.conn, code, true)?;
            ttlog_quiet(
                &pool.conn,
                "employee_activate",
                code,
                &format!("Activated '{}'", emp.name),
            );
            success(format!("Employee '{}' activated", emp.name));
        }

        EmployeeCommands::Import { file } => {
            let summary = ImportLogic::import_file(&mut pool, file)?;

            for s in &summary.skipped {
                info(format!("Skipped: {}", s));
            }
            ttlog_quiet(
                &pool.conn,
                "employee_import",
                file,
                &format!(
                    "{} added, {} skipped",
                    summary.added.len(),
                    summary.skipped.len()
                ),
            );
            success(format!(
                "Imported {} employee(s), {} skipped",
                summary.added.len(),
                summary.skipped.len()
            ));
        }
    }

    Ok(())
}
