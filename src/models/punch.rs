use super::action::PunchAction;
use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

/// ISO-8601 local timestamp, second precision (`2025-09-01T09:00:00`).
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// One immutable row of the punch ledger.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct PunchEvent {
    pub id: i64,                     // ⇔ punches.id (monotonic, breaks timestamp ties)
    pub employee_id: i64,            // ⇔ punches.employee_id
    pub timestamp: NaiveDateTime,    // ⇔ punches.ts (TEXT, TIMESTAMP_FORMAT)
    pub action: PunchAction,         // ⇔ punches.action
    pub job_number: Option<String>,  // ⇔ punches.job_number (M-number)
    pub location_id: Option<i64>,    // ⇔ punches.location_id
    pub department_id: Option<i64>,  // ⇔ punches.department_id
    pub device_label: Option<String>, // ⇔ punches.device_label
    pub note: Option<String>,        // ⇔ punches.note
}

impl PunchEvent {
    pub fn date(&self) -> NaiveDate {
        self.timestamp.date()
    }

    pub fn iso_timestamp(&self) -> String {
        self.timestamp.format(TIMESTAMP_FORMAT).to_string()
    }

    /// Job number with "absent" and "empty" folded together.
    pub fn job(&self) -> &str {
        self.job_number.as_deref().unwrap_or("")
    }
}

/// Caller-supplied fields that override what the employee record implies.
#[derive(Debug, Clone, Default)]
pub struct PunchOverrides {
    pub location_id: Option<i64>,
    pub department_id: Option<i64>,
    pub device_label: Option<String>,
    pub note: Option<String>,
}

/// A punch that passed validation and is about to be appended.
#[derive(Debug, Clone)]
pub struct NewPunch {
    pub employee_id: i64,
    pub timestamp: NaiveDateTime,
    pub action: PunchAction,
    pub job_number: Option<String>,
    pub location_id: Option<i64>,
    pub department_id: Option<i64>,
    pub device_label: Option<String>,
    pub note: Option<String>,
}

impl NewPunch {
    pub fn into_event(self, id: i64) -> PunchEvent {
        PunchEvent {
            id,
            employee_id: self.employee_id,
            timestamp: self.timestamp,
            action: self.action,
            job_number: self.job_number,
            location_id: self.location_id,
            department_id: self.department_id,
            device_label: self.device_label,
            note: self.note,
        }
    }
}

/// Read-side view: a punch joined with the names the report needs.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct PunchRecord {
    pub event: PunchEvent,
    pub employee_name: String,
    pub department: Option<String>,
    pub location: Option<String>,
}
