use serde::{Deserialize, Serialize};

/// A person who can punch the clock.
///
/// `code` is the value encoded in the employee's QR badge and is unique
/// across the directory. Employees are never deleted, only deactivated.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Employee {
    pub id: i64,
    pub name: String,
    pub department_id: Option<i64>,
    pub location_id: Option<i64>,
    pub active: bool,
    pub code: String,
}

/// Admin payload for registering an employee.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewEmployee {
    pub name: String,
    pub code: String,
    pub department: Option<String>,
    pub location: Option<String>,
}
