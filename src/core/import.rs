//! Bulk employee registration from a CSV roster.
//!
//! Expected headers: `name, qr_code_value, department, location`. Rows with a
//! blank name or code, or whose code is already registered, are skipped.
//! Unknown department/location names leave the reference empty.

use crate::core::directory::Directory;
use crate::db::directory::find_employee_by_code;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use rusqlite::params;
use serde::Deserialize;
use std::io::Read;

#[derive(Debug, Deserialize)]
struct RosterRow {
    #[serde(default)]
    name: String,
    #[serde(default)]
    qr_code_value: String,
    #[serde(default)]
    department: Option<String>,
    #[serde(default)]
    location: Option<String>,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ImportSummary {
    pub added: Vec<String>,
    pub skipped: Vec<String>,
}

pub struct ImportLogic;

impl ImportLogic {
    pub fn import_file(pool: &mut DbPool, path: &str) -> AppResult<ImportSummary> {
        let file = std::fs::File::open(path)?;
        Self::import_reader(pool, file)
    }

    /// All inserts happen in one transaction: a malformed row aborts the
    /// whole import.
    pub fn import_reader<R: Read>(pool: &mut DbPool, reader: R) -> AppResult<ImportSummary> {
        let departments = pool.departments_by_name()?;
        let locations = pool.locations_by_name()?;

        let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
        let mut summary = ImportSummary::default();

        let tx = pool.conn.transaction()?;
        for result in rdr.deserialize::<RosterRow>() {
            let row = result?;

            if row.name.is_empty() || row.qr_code_value.is_empty() {
                summary.skipped.push(format!("{} / {}", row.name, row.qr_code_value));
                continue;
            }

            if find_employee_by_code(&tx, &row.qr_code_value)?.is_some() {
                summary.skipped.push(format!("{} / {}", row.name, row.qr_code_value));
                continue;
            }

            let department_id = row.department.as_deref().and_then(|d| departments.get(d));
            let location_id = row.location.as_deref().and_then(|l| locations.get(l));

            tx.execute(
                "INSERT INTO employees (name, department_id, location_id, active, code)
                 VALUES (?1, ?2, ?3, 1, ?4)",
                params![row.name, department_id, location_id, row.qr_code_value],
            )?;

            summary.added.push(format!("{} / {}", row.name, row.qr_code_value));
        }
        tx.commit()?;

        Ok(summary)
    }
}
