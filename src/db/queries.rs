//! Punch ledger queries and the SQLite `PunchStore`.

use crate::core::store::{PunchStore, RangeQuery};
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::action::PunchAction;
use crate::models::punch::{NewPunch, PunchEvent, PunchRecord, TIMESTAMP_FORMAT};
use chrono::NaiveDateTime;
use rusqlite::types::Type;
use rusqlite::{Connection, OptionalExtension, Result, Row, ToSql, params};

const PUNCH_COLUMNS: &str = "p.id, p.employee_id, p.ts, p.action, p.job_number, \
     p.location_id, p.department_id, p.device_label, p.note";

fn map_row(row: &Row) -> Result<PunchEvent> {
    let ts_str: String = row.get("ts")?;
    let timestamp = NaiveDateTime::parse_from_str(&ts_str, TIMESTAMP_FORMAT).map_err(|_| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            Type::Text,
            Box::new(AppError::InvalidTimestamp(ts_str.clone())),
        )
    })?;

    let action_str: String = row.get("action")?;
    let action = PunchAction::from_db_str(&action_str).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            Type::Text,
            Box::new(AppError::Validation(format!("invalid action: {}", action_str))),
        )
    })?;

    Ok(PunchEvent {
        id: row.get("id")?,
        employee_id: row.get("employee_id")?,
        timestamp,
        action,
        job_number: row.get("job_number")?,
        location_id: row.get("location_id")?,
        department_id: row.get("department_id")?,
        device_label: row.get("device_label")?,
        note: row.get("note")?,
    })
}

fn map_record(row: &Row) -> Result<PunchRecord> {
    Ok(PunchRecord {
        event: map_row(row)?,
        employee_name: row.get("employee_name")?,
        department: row.get("department_name")?,
        location: row.get("location_name")?,
    })
}

pub fn insert_punch(conn: &Connection, punch: &NewPunch) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO punches (employee_id, ts, action, job_number, location_id, department_id, device_label, note)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            punch.employee_id,
            punch.timestamp.format(TIMESTAMP_FORMAT).to_string(),
            punch.action.to_db_str(),
            punch.job_number,
            punch.location_id,
            punch.department_id,
            punch.device_label,
            punch.note,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Most recent punch of an employee (latest timestamp, then latest id).
pub fn load_last_punch(conn: &Connection, employee_id: i64) -> AppResult<Option<PunchEvent>> {
    let sql = format!(
        "SELECT {PUNCH_COLUMNS} FROM punches p
         WHERE p.employee_id = ?1
         ORDER BY p.ts DESC, p.id DESC
         LIMIT 1"
    );

    let last = conn.query_row(&sql, [employee_id], map_row).optional()?;
    Ok(last)
}

/// Load the report snapshot, ordered by employee name, employee id, timestamp, id.
pub fn load_punch_records(conn: &Connection, query: &RangeQuery) -> AppResult<Vec<PunchRecord>> {
    let mut clauses: Vec<String> = Vec::new();
    let mut values: Vec<Box<dyn ToSql>> = Vec::new();

    if let Some((start, end)) = query.dates {
        clauses.push("substr(p.ts, 1, 10) BETWEEN ? AND ?".to_string());
        values.push(Box::new(start.format("%Y-%m-%d").to_string()));
        values.push(Box::new(end.format("%Y-%m-%d").to_string()));
    }

    if let Some(ids) = &query.employee_ids {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let placeholders = vec!["?"; ids.len()].join(",");
        clauses.push(format!("p.employee_id IN ({placeholders})"));
        for id in ids {
            values.push(Box::new(*id));
        }
    }

    let where_sql = if clauses.is_empty() {
        String::new()
    } else {
        format!("WHERE {}", clauses.join(" AND "))
    };

    let sql = format!(
        "SELECT {PUNCH_COLUMNS},
                e.name AS employee_name,
                d.name AS department_name,
                l.name AS location_name
         FROM punches p
         JOIN employees e ON e.id = p.employee_id
         LEFT JOIN departments d ON d.id = p.department_id
         LEFT JOIN locations l ON l.id = p.location_id
         {where_sql}
         ORDER BY e.name ASC, e.id ASC, p.ts ASC, p.id ASC"
    );

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(
        rusqlite::params_from_iter(values.iter().map(|v| v.as_ref())),
        map_record,
    )?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

impl PunchStore for DbPool {
    fn last_event_for(&self, employee_id: i64) -> AppResult<Option<PunchEvent>> {
        load_last_punch(&self.conn, employee_id)
    }

    fn append_event(&mut self, punch: &NewPunch) -> AppResult<i64> {
        insert_punch(&self.conn, punch)
    }

    fn events_in_range(&self, query: &RangeQuery) -> AppResult<Vec<PunchRecord>> {
        load_punch_records(&self.conn, query)
    }

    /// `BEGIN IMMEDIATE` takes the write lock up front, so another process
    /// cannot slip an insert between our read and our write.
    fn atomically<T, F>(&mut self, f: F) -> AppResult<T>
    where
        Self: Sized,
        F: FnOnce(&mut Self) -> AppResult<T>,
    {
        self.conn.execute_batch("BEGIN IMMEDIATE;")?;

        let result = f(self).and_then(|value| {
            self.conn.execute_batch("COMMIT;")?;
            Ok(value)
        });

        // a busy COMMIT leaves the transaction open as well
        if result.is_err() && !self.conn.is_autocommit() {
            let _ = self.conn.execute_batch("ROLLBACK;");
        }

        result
    }
}
