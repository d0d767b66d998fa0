use crate::cli::parser::Cli;
use crate::config::Config;
use crate::core::import::ImportLogic;
use crate::db::initialize::init_db;
use crate::db::log::{ttlog, ttlog_quiet};
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::{info, success, warning};
use std::path::Path;

/// Handle the `init` command
///
/// This initializes:
///  - the config directory and file (skipped in test mode)
///  - the SQLite database and all pending migrations
///  - default departments and locations
///  - the employee roster, when `employees_csv` points to an existing file
pub fn handle(cli: &Cli) -> AppResult<()> {
    let cfg = Config::init_all(cli.db.as_deref(), cli.test)?;

    println!("⚙️  Initializing punchclock…");
    if !cli.test {
        println!("📄 Config file : {}", Config::config_file().display());
    }
    println!("🗄️  Database   : {}", &cfg.database);

    let mut pool = DbPool::new(&cfg.database)?;
    init_db(&pool.conn, &cfg.default_departments, &cfg.default_locations)?;

    if let Err(e) = ttlog(
        &pool.conn,
        "init",
        "",
        &format!("Database initialized at {}", &cfg.database),
    ) {
        warning(format!("Failed to write internal log: {}", e));
    }

    if let Some(roster) = cfg.employees_csv.as_deref() {
        if Path::new(roster).is_file() {
            let summary = ImportLogic::import_file(&mut pool, roster)?;
            info(format!(
                "Roster {}: {} added, {} skipped",
                roster,
                summary.added.len(),
                summary.skipped.len()
            ));
            ttlog_quiet(
                &pool.conn,
                "employee_import",
                roster,
                &format!("{} added, {} skipped", summary.added.len(), summary.skipped.len()),
            );
        } else {
            warning(format!("Roster file not found, skipping import: {}", roster));
        }
    }

    success(format!("Database initialized at {}", &cfg.database));
    Ok(())
}
