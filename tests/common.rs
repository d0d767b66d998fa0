#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use chrono::NaiveDateTime;
use punchclock::core::clock::Clock;
use punchclock::core::ledger::{Ledger, PunchReceipt, PunchRequest};
use punchclock::db::directory::add_employee;
use punchclock::db::initialize::init_db;
use punchclock::db::pool::DbPool;
use punchclock::errors::AppResult;
use punchclock::models::action::PunchAction;
use punchclock::models::employee::{Employee, NewEmployee};
use punchclock::models::punch::{PunchEvent, PunchRecord, TIMESTAMP_FORMAT};
use punchclock::models::reference::{DEFAULT_DEPARTMENTS, DEFAULT_LOCATIONS};
use std::env;
use std::fs;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

pub fn pc() -> Command {
    cargo_bin_cmd!("punchclock")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_punchclock.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// Initialize a DB through the CLI and register two employees.
pub fn init_db_with_employees(db_path: &str) {
    pc().args(["--db", db_path, "--test", "init"])
        .assert()
        .success();

    pc().args([
        "--db",
        db_path,
        "employee",
        "add",
        "--name",
        "Alice Martin",
        "--code",
        "E001",
        "--department",
        "Assembly",
        "--location",
        "Main Shop",
    ])
    .assert()
    .success();

    pc().args([
        "--db", db_path, "employee", "add", "--name", "Bob Stone", "--code", "E002",
    ])
    .assert()
    .success();
}

pub fn ts(s: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(s, TIMESTAMP_FORMAT).expect("valid test timestamp")
}

/// Settable clock shared between a test and the ledger it drives.
#[derive(Clone)]
pub struct TestClock(Arc<Mutex<NaiveDateTime>>);

impl TestClock {
    pub fn at(s: &str) -> Self {
        Self(Arc::new(Mutex::new(ts(s))))
    }

    pub fn set(&self, s: &str) {
        *self.0.lock().expect("clock lock") = ts(s);
    }
}

impl Clock for TestClock {
    fn now(&self) -> NaiveDateTime {
        *self.0.lock().expect("clock lock")
    }
}

fn owned(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

/// In-memory database with schema and default reference data.
pub fn memory_pool() -> DbPool {
    let pool = DbPool::in_memory().expect("in-memory db");
    init_db(
        &pool.conn,
        &owned(&DEFAULT_DEPARTMENTS),
        &owned(&DEFAULT_LOCATIONS),
    )
    .expect("init db");
    pool
}

pub fn memory_ledger(clock: &TestClock) -> Ledger<DbPool, TestClock> {
    Ledger::with_clock(memory_pool(), clock.clone())
}

/// Ledger over a SQLite file; several may share one path like separate
/// processes would.
pub fn file_ledger(db_path: &str, clock: &TestClock) -> Ledger<DbPool, TestClock> {
    let pool = DbPool::new(db_path).expect("open db file");
    init_db(
        &pool.conn,
        &owned(&DEFAULT_DEPARTMENTS),
        &owned(&DEFAULT_LOCATIONS),
    )
    .expect("init db");
    Ledger::with_clock(pool, clock.clone())
}

pub fn register(
    ledger: &Ledger<DbPool, TestClock>,
    name: &str,
    code: &str,
    department: Option<&str>,
    location: Option<&str>,
) -> Employee {
    ledger
        .with_store(|pool| {
            add_employee(
                pool,
                &NewEmployee {
                    name: name.to_string(),
                    code: code.to_string(),
                    department: department.map(str::to_string),
                    location: location.map(str::to_string),
                },
            )
        })
        .expect("add employee")
}

/// Set the clock to `at`, then submit.
pub fn punch_at(
    ledger: &Ledger<DbPool, TestClock>,
    clock: &TestClock,
    code: &str,
    action: &str,
    job: Option<&str>,
    at: &str,
) -> AppResult<PunchReceipt> {
    clock.set(at);
    ledger.submit_punch(&PunchRequest {
        code: code.to_string(),
        action: action.to_string(),
        job_number: job.map(str::to_string),
        ..Default::default()
    })
}

/// Hand-built snapshot record for aggregation tests.
pub fn record(id: i64, employee_id: i64, name: &str, at: &str, action: PunchAction) -> PunchRecord {
    PunchRecord {
        event: PunchEvent {
            id,
            employee_id,
            timestamp: ts(at),
            action,
            job_number: None,
            location_id: None,
            department_id: None,
            device_label: None,
            note: None,
        },
        employee_name: name.to_string(),
        department: Some("Assembly".to_string()),
        location: Some("Main Shop".to_string()),
    }
}

/// in@09:00, out@12:00, break_in@12:00, break_out@12:30, in@12:30, out@17:00
pub fn full_day(employee_id: i64, name: &str, date: &str) -> Vec<PunchRecord> {
    use PunchAction::*;
    let base = employee_id * 100;
    [
        ("09:00:00", In),
        ("12:00:00", Out),
        ("12:00:00", BreakIn),
        ("12:30:00", BreakOut),
        ("12:30:00", In),
        ("17:00:00", Out),
    ]
    .into_iter()
    .enumerate()
    .map(|(i, (time, action))| {
        record(
            base + i as i64,
            employee_id,
            name,
            &format!("{date}T{time}"),
            action,
        )
    })
    .collect()
}
