use crate::errors::{AppError, AppResult};
use crate::ui::messages::success;
use rusqlite::{Connection, params};

/// Schema versions, tracked through `PRAGMA user_version`.
///
/// Each entry is applied once, in order, inside its own transaction.
const MIGRATIONS: &[(&str, &str)] = &[
    (
        "create directory and punch ledger",
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS departments (
            id   INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL UNIQUE
        );

        CREATE TABLE IF NOT EXISTS locations (
            id   INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL UNIQUE
        );

        CREATE TABLE IF NOT EXISTS employees (
            id            INTEGER PRIMARY KEY AUTOINCREMENT,
            name          TEXT NOT NULL,
            department_id INTEGER REFERENCES departments(id),
            location_id   INTEGER REFERENCES locations(id),
            active        INTEGER NOT NULL DEFAULT 1,
            code          TEXT NOT NULL UNIQUE
        );

        CREATE TABLE IF NOT EXISTS punches (
            id            INTEGER PRIMARY KEY AUTOINCREMENT,
            employee_id   INTEGER NOT NULL REFERENCES employees(id),
            ts            TEXT NOT NULL,
            action        TEXT NOT NULL CHECK(action IN ('in','out','break_in','break_out')),
            job_number    TEXT,
            location_id   INTEGER REFERENCES locations(id),
            department_id INTEGER REFERENCES departments(id),
            device_label  TEXT,
            note          TEXT
        );

        CREATE INDEX IF NOT EXISTS idx_punches_employee_ts ON punches(employee_id, ts);
        "#,
    ),
    (
        "index punches by timestamp for range reports",
        "CREATE INDEX IF NOT EXISTS idx_punches_ts ON punches(ts);",
    ),
];

fn schema_version(conn: &Connection) -> rusqlite::Result<usize> {
    conn.query_row("PRAGMA user_version", [], |row| row.get::<_, i64>(0))
        .map(|v| v.max(0) as usize)
}

/// Public entry point: run all pending migrations.
///
/// Called by `db::initialize::init_db()`.
pub fn run_pending_migrations(conn: &Connection) -> AppResult<()> {
    let current = schema_version(conn)?;

    if current > MIGRATIONS.len() {
        return Err(AppError::Migration(format!(
            "database schema version {} is newer than this build ({})",
            current,
            MIGRATIONS.len()
        )));
    }

    for (idx, (label, sql)) in MIGRATIONS.iter().enumerate().skip(current) {
        let version = idx + 1;

        conn.execute_batch(&format!(
            "BEGIN;\n{sql}\nPRAGMA user_version = {version};\nCOMMIT;"
        ))
        .map_err(|e| {
            let _ = conn.execute_batch("ROLLBACK;");
            AppError::Migration(format!("v{version} ({label}): {e}"))
        })?;

        conn.execute(
            "INSERT INTO log (date, operation, target, message)
             VALUES (datetime('now'), 'migration_applied', ?1, ?2)",
            params![format!("v{version}"), label],
        )?;

        success(format!("Migration applied: v{} → {}", version, label));
    }

    Ok(())
}

/// Insert the default departments/locations into empty tables.
///
/// Tables that already hold rows are left untouched.
pub fn seed_reference_data(
    conn: &Connection,
    departments: &[String],
    locations: &[String],
) -> AppResult<()> {
    seed_table(conn, "departments", departments)?;
    seed_table(conn, "locations", locations)?;
    Ok(())
}

fn seed_table(conn: &Connection, table: &str, names: &[String]) -> AppResult<()> {
    let count: i64 = conn.query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| {
        row.get(0)
    })?;

    if count > 0 {
        return Ok(());
    }

    let mut stmt = conn.prepare(&format!("INSERT OR IGNORE INTO {table} (name) VALUES (?1)"))?;
    for name in names.iter().map(|n| n.trim()).filter(|n| !n.is_empty()) {
        stmt.execute([name])?;
    }

    success(format!("Seeded {} default {}.", names.len(), table));
    Ok(())
}
