use crate::db::migrate::{run_pending_migrations, seed_reference_data};
use crate::errors::AppResult;
use rusqlite::Connection;

/// Initialize the database.
/// Delegates all schema creation / upgrades to the migration engine, then
/// seeds departments and locations if their tables are empty.
pub fn init_db(conn: &Connection, departments: &[String], locations: &[String]) -> AppResult<()> {
    run_pending_migrations(conn)?;
    seed_reference_data(conn, departments, locations)?;
    Ok(())
}
