use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::directory::{list_departments, list_locations};
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::utils::table::Table;

/// `departments` / `locations`: print the reference lists.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let pool = DbPool::new(&cfg.database)?;

    let rows: Vec<(i64, String)> = match cmd {
        Commands::Departments => list_departments(&pool.conn)?
            .into_iter()
            .map(|d| (d.id, d.name))
            .collect(),
        Commands::Locations => list_locations(&pool.conn)?
            .into_iter()
            .map(|l| (l.id, l.name))
            .collect(),
        _ => return Ok(()),
    };

    let mut table = Table::new(&["ID", "NAME"]);
    for (id, name) in rows {
        table.add_row(vec![id.to_string(), name]);
    }
    print!("{}", table.render());
    Ok(())
}
