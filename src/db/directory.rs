//! Employees, departments and locations stored in SQLite.

use crate::core::directory::{Directory, resolve_name};
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::employee::{Employee, NewEmployee};
use crate::models::reference::{Department, Location};
use rusqlite::{Connection, OptionalExtension, Result, Row, params};
use std::collections::BTreeMap;

const EMPLOYEE_COLUMNS: &str = "id, name, department_id, location_id, active, code";

fn map_employee(row: &Row) -> Result<Employee> {
    Ok(Employee {
        id: row.get("id")?,
        name: row.get("name")?,
        department_id: row.get("department_id")?,
        location_id: row.get("location_id")?,
        active: row.get::<_, i64>("active")? == 1,
        code: row.get("code")?,
    })
}

fn names_by_id(conn: &Connection, table: &str) -> Result<Vec<(i64, String)>> {
    let mut stmt = conn.prepare(&format!("SELECT id, name FROM {table} ORDER BY name ASC"))?;
    let rows = stmt.query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

fn by_name(conn: &Connection, table: &str) -> AppResult<BTreeMap<String, i64>> {
    Ok(names_by_id(conn, table)?
        .into_iter()
        .map(|(id, name)| (name, id))
        .collect())
}

pub fn list_departments(conn: &Connection) -> AppResult<Vec<Department>> {
    Ok(names_by_id(conn, "departments")?
        .into_iter()
        .map(|(id, name)| Department { id, name })
        .collect())
}

pub fn list_locations(conn: &Connection) -> AppResult<Vec<Location>> {
    Ok(names_by_id(conn, "locations")?
        .into_iter()
        .map(|(id, name)| Location { id, name })
        .collect())
}

/// Employee by code, active or not.
pub fn find_employee_by_code(conn: &Connection, code: &str) -> AppResult<Option<Employee>> {
    let sql = format!("SELECT {EMPLOYEE_COLUMNS} FROM employees WHERE code = ?1");
    Ok(conn.query_row(&sql, [code], map_employee).optional()?)
}

pub fn list_employees(conn: &Connection, include_inactive: bool) -> AppResult<Vec<Employee>> {
    let filter = if include_inactive { "" } else { "WHERE active = 1" };
    let sql = format!("SELECT {EMPLOYEE_COLUMNS} FROM employees {filter} ORDER BY name ASC, id ASC");

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map([], map_employee)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Register an employee. Department/location names must exist; the code
/// must not be taken by any employee, active or not.
pub fn add_employee(pool: &DbPool, new: &NewEmployee) -> AppResult<Employee> {
    let name = new.name.trim();
    let code = new.code.trim();

    if name.is_empty() || code.is_empty() {
        return Err(AppError::Validation(
            "employee name and code must not be empty".into(),
        ));
    }

    if find_employee_by_code(&pool.conn, code)?.is_some() {
        return Err(AppError::Validation(format!(
            "employee code '{}' is already in use",
            code
        )));
    }

    let department_id = resolve_name(
        &pool.departments_by_name()?,
        new.department.as_deref(),
        "department",
    )?;
    let location_id = resolve_name(
        &pool.locations_by_name()?,
        new.location.as_deref(),
        "location",
    )?;

    pool.conn.execute(
        "INSERT INTO employees (name, department_id, location_id, active, code)
         VALUES (?1, ?2, ?3, 1, ?4)",
        params![name, department_id, location_id, code],
    )?;

    Ok(Employee {
        id: pool.conn.last_insert_rowid(),
        name: name.to_string(),
        department_id,
        location_id,
        active: true,
        code: code.to_string(),
    })
}

/// Flip the active flag. Returns the updated employee.
pub fn set_employee_active(conn: &Connection, code: &str, active: bool) -> AppResult<Employee> {
    let changed = conn.execute(
        "UPDATE employees SET active = ?1 WHERE code = ?2",
        params![if active { 1 } else { 0 }, code],
    )?;

    if changed == 0 {
        return Err(AppError::NotFound(code.to_string()));
    }

    find_employee_by_code(conn, code)?.ok_or_else(|| AppError::NotFound(code.to_string()))
}

impl Directory for DbPool {
    fn resolve_active_employee(&self, code: &str) -> AppResult<Option<Employee>> {
        let sql = format!("SELECT {EMPLOYEE_COLUMNS} FROM employees WHERE code = ?1 AND active = 1");
        Ok(self.conn.query_row(&sql, [code], map_employee).optional()?)
    }

    fn departments_by_name(&self) -> AppResult<BTreeMap<String, i64>> {
        by_name(&self.conn, "departments")
    }

    fn locations_by_name(&self) -> AppResult<BTreeMap<String, i64>> {
        by_name(&self.conn, "locations")
    }
}
