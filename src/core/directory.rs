//! Read-only reference-data lookups the ledger and importers depend on.

use crate::errors::{AppError, AppResult};
use crate::models::employee::Employee;
use std::collections::BTreeMap;

/// Resolves scanned codes and reference names.
///
/// Implementations are queried per request; nothing here is cached.
pub trait Directory {
    /// The active employee carrying `code`, if any.
    fn resolve_active_employee(&self, code: &str) -> AppResult<Option<Employee>>;

    fn departments_by_name(&self) -> AppResult<BTreeMap<String, i64>>;

    fn locations_by_name(&self) -> AppResult<BTreeMap<String, i64>>;
}

/// Resolve an optional reference name against a by-name map.
///
/// `kind` is only used for the error message ("department", "location").
pub fn resolve_name(
    map: &BTreeMap<String, i64>,
    name: Option<&str>,
    kind: &str,
) -> AppResult<Option<i64>> {
    match name.map(str::trim).filter(|n| !n.is_empty()) {
        None => Ok(None),
        Some(n) => map
            .get(n)
            .copied()
            .map(Some)
            .ok_or_else(|| AppError::Validation(format!("unknown {kind} '{n}'"))),
    }
}
