//! Attendance aggregation: rebuild work and break intervals from an ordered
//! punch snapshot.
//!
//! The scan is a small state machine per employee with a single open
//! interval slot. `in` and `break_in` both (re)open the slot, `out` and
//! `break_out` both close it; the closing action decides whether the elapsed
//! time counts as work or as a break. Breaks are never nested inside a work
//! interval and an unmatched opener does not survive a day change.
//!
//! Input must already be sorted by employee, then timestamp. Nothing here
//! fails: orphan closes simply produce no duration.

use crate::models::action::PunchAction;
use crate::models::punch::PunchRecord;
use chrono::{NaiveDate, NaiveDateTime};
use std::collections::VecDeque;
use std::slice;

/// Per-employee clock state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockState {
    Idle,
    Working { since: NaiveDateTime },
    OnBreak { since: NaiveDateTime },
}

impl ClockState {
    fn open_since(&self) -> Option<NaiveDateTime> {
        match *self {
            ClockState::Idle => None,
            ClockState::Working { since } | ClockState::OnBreak { since } => Some(since),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntervalKind {
    Work,
    Break,
}

/// A closed interval, emitted on the row of the closing punch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interval {
    pub kind: IntervalKind,
    pub seconds: i64,
}

/// Sum of work intervals for one employee on one calendar date.
#[derive(Debug, Clone, PartialEq)]
pub struct DayTotal {
    pub employee_id: i64,
    pub employee: String,
    pub date: NaiveDate,
    pub seconds: i64,
}

impl DayTotal {
    /// Worked hours rounded to two decimals.
    pub fn hours(&self) -> f64 {
        (self.seconds as f64 / 3600.0 * 100.0).round() / 100.0
    }
}

/// One output row of the aggregation.
#[derive(Debug, Clone, PartialEq)]
pub enum ReportRow<'a> {
    Punch {
        record: &'a PunchRecord,
        interval: Option<Interval>,
    },
    DayTotal(DayTotal),
    /// Blank line between groups.
    Separator,
}

/// Lazy aggregation over a borrowed snapshot. Call [`reconstruct`] again to
/// restart from the top.
pub struct Reconstruct<'a> {
    records: slice::Iter<'a, PunchRecord>,
    pending: VecDeque<ReportRow<'a>>,
    current: Option<&'a PunchRecord>,
    state: ClockState,
    day_seconds: i64,
}

pub fn reconstruct(records: &[PunchRecord]) -> Reconstruct<'_> {
    Reconstruct {
        records: records.iter(),
        pending: VecDeque::new(),
        current: None,
        state: ClockState::Idle,
        day_seconds: 0,
    }
}

/// Only the TOTAL rows of [`reconstruct`].
pub fn day_totals(records: &[PunchRecord]) -> Vec<DayTotal> {
    reconstruct(records)
        .filter_map(|row| match row {
            ReportRow::DayTotal(total) => Some(total),
            _ => None,
        })
        .collect()
}

impl<'a> Reconstruct<'a> {
    /// Queue the TOTAL for the day that just ended and reset the machine.
    fn close_day(&mut self, last: &PunchRecord) {
        self.pending.push_back(ReportRow::Separator);
        self.pending.push_back(ReportRow::DayTotal(DayTotal {
            employee_id: last.event.employee_id,
            employee: last.employee_name.clone(),
            date: last.event.date(),
            seconds: self.day_seconds,
        }));
        self.day_seconds = 0;
        self.state = ClockState::Idle;
    }

    fn apply(&mut self, record: &PunchRecord) -> Option<Interval> {
        let ts = record.event.timestamp;

        match record.event.action {
            PunchAction::In => {
                self.state = ClockState::Working { since: ts };
                None
            }
            PunchAction::BreakIn => {
                self.state = ClockState::OnBreak { since: ts };
                None
            }
            PunchAction::Out => {
                let since = self.state.open_since()?;
                self.state = ClockState::Idle;
                let seconds = (ts - since).num_seconds();
                self.day_seconds += seconds;
                Some(Interval {
                    kind: IntervalKind::Work,
                    seconds,
                })
            }
            PunchAction::BreakOut => {
                let since = self.state.open_since()?;
                self.state = ClockState::Idle;
                Some(Interval {
                    kind: IntervalKind::Break,
                    seconds: (ts - since).num_seconds(),
                })
            }
        }
    }
}

impl<'a> Iterator for Reconstruct<'a> {
    type Item = ReportRow<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(row) = self.pending.pop_front() {
                return Some(row);
            }

            let Some(record) = self.records.next() else {
                // flush the last open day exactly once
                let last = self.current.take()?;
                self.close_day(last);
                continue;
            };

            if let Some(prev) = self.current {
                if prev.event.employee_id != record.event.employee_id {
                    self.close_day(prev);
                    self.pending.push_back(ReportRow::Separator);
                } else if prev.event.date() != record.event.date() {
                    self.close_day(prev);
                }
            }

            let interval = self.apply(record);
            self.current = Some(record);
            self.pending.push_back(ReportRow::Punch { record, interval });
        }
    }
}
