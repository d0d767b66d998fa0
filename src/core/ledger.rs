//! The punch ledger: the only write path for punch events.

use crate::core::clock::{Clock, SystemClock};
use crate::core::directory::Directory;
use crate::core::store::{PunchStore, RangeQuery};
use crate::errors::{AppError, AppResult};
use crate::models::action::PunchAction;
use crate::models::punch::{NewPunch, PunchEvent, PunchOverrides, PunchRecord};
use std::sync::{Mutex, MutexGuard};

/// Incoming scan as the calling layer sees it (action still unparsed).
#[derive(Debug, Clone, Default)]
pub struct PunchRequest {
    pub code: String,
    pub action: String,
    pub job_number: Option<String>,
    pub overrides: PunchOverrides,
}

/// Outcome of an accepted punch.
#[derive(Debug, Clone)]
pub struct PunchReceipt {
    pub employee_name: String,
    pub event: PunchEvent,
}

/// Owns the store and serializes "read last event → decide → append".
///
/// The store lives behind a single mutex, so within a process two scans can
/// never interleave between the duplicate check and the insert. The store's
/// `atomically` extends the same guarantee across processes.
pub struct Ledger<S, C = SystemClock> {
    store: Mutex<S>,
    clock: C,
}

impl<S> Ledger<S, SystemClock>
where
    S: Directory + PunchStore,
{
    pub fn new(store: S) -> Self {
        Self::with_clock(store, SystemClock)
    }
}

impl<S, C> Ledger<S, C>
where
    S: Directory + PunchStore,
    C: Clock,
{
    pub fn with_clock(store: S, clock: C) -> Self {
        Self {
            store: Mutex::new(store),
            clock,
        }
    }

    /// Accept or reject one scan.
    ///
    /// Errors: `Validation` for a malformed action (checked before any
    /// lookup), `NotFound` for an unknown or inactive code, `DuplicatePunch`
    /// when the employee's last event has the same action and job number.
    pub fn submit_punch(&self, req: &PunchRequest) -> AppResult<PunchReceipt> {
        let action = PunchAction::parse(&req.action)?;

        let mut guard = self.lock()?;
        guard.atomically(|store| {
            let employee = store
                .resolve_active_employee(&req.code)?
                .ok_or_else(|| AppError::NotFound(req.code.clone()))?;

            if let Some(last) = store.last_event_for(employee.id)?
                && is_duplicate(&last, action, req.job_number.as_deref())
            {
                return Err(AppError::DuplicatePunch {
                    action: action.label(),
                });
            }

            let punch = NewPunch {
                employee_id: employee.id,
                timestamp: self.clock.now(),
                action,
                job_number: req.job_number.clone(),
                location_id: req.overrides.location_id.or(employee.location_id),
                department_id: req.overrides.department_id.or(employee.department_id),
                device_label: req.overrides.device_label.clone(),
                note: req.overrides.note.clone(),
            };

            let id = store.append_event(&punch)?;

            Ok(PunchReceipt {
                employee_name: employee.name,
                event: punch.into_event(id),
            })
        })
    }

    /// Point-in-time copy of the ledger for reporting. The lock is released
    /// before the caller starts aggregating.
    pub fn snapshot(&self, query: &RangeQuery) -> AppResult<Vec<PunchRecord>> {
        self.lock()?.events_in_range(query)
    }

    /// Borrow the store for directory administration.
    pub fn with_store<T>(&self, f: impl FnOnce(&mut S) -> AppResult<T>) -> AppResult<T> {
        let mut guard = self.lock()?;
        f(&mut guard)
    }

    fn lock(&self) -> AppResult<MutexGuard<'_, S>> {
        self.store
            .lock()
            .map_err(|_| AppError::Other("ledger lock poisoned".into()))
    }
}

/// Same action and same job number (absent == empty) as the last event.
fn is_duplicate(last: &PunchEvent, action: PunchAction, job_number: Option<&str>) -> bool {
    last.action == action && last.job() == job_number.unwrap_or("")
}
