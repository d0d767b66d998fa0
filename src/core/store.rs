//! Persistence contract for the punch ledger.

use crate::errors::AppResult;
use crate::models::punch::{NewPunch, PunchEvent, PunchRecord};
use chrono::NaiveDate;

/// Filter for a ledger snapshot. `None` fields mean "no restriction".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RangeQuery {
    pub employee_ids: Option<Vec<i64>>,
    /// Inclusive calendar-date bounds on the punch timestamp.
    pub dates: Option<(NaiveDate, NaiveDate)>,
}

impl RangeQuery {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn between(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            employee_ids: None,
            dates: Some((start, end)),
        }
    }

    pub fn for_employees(mut self, ids: Vec<i64>) -> Self {
        self.employee_ids = Some(ids);
        self
    }
}

/// Append-only event store.
///
/// `events_in_range` must return records ordered by employee name, employee
/// id, timestamp and insertion id, which is the order the aggregator expects.
pub trait PunchStore {
    fn last_event_for(&self, employee_id: i64) -> AppResult<Option<PunchEvent>>;

    fn append_event(&mut self, punch: &NewPunch) -> AppResult<i64>;

    fn events_in_range(&self, query: &RangeQuery) -> AppResult<Vec<PunchRecord>>;

    /// Run `f` as one all-or-nothing unit. Stores that share state with other
    /// processes override this with a real transaction.
    fn atomically<T, F>(&mut self, f: F) -> AppResult<T>
    where
        Self: Sized,
        F: FnOnce(&mut Self) -> AppResult<T>,
    {
        f(self)
    }
}
