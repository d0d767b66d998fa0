//! Attendance report rows.
//!
//! Layout:
//! - title block: blank row, `["", "", title, "", "", ""]`, blank row
//! - header row ([`HEADERS`])
//! - one row per punch, a blank row before every TOTAL row and before every
//!   change of employee
//!
//! A blank row is an empty `Vec`.

use crate::core::aggregator::{self, DayTotal, Interval, IntervalKind, ReportRow};
use crate::models::punch::PunchRecord;

pub const HEADERS: [&str; 8] = [
    "Employee",
    "Date",
    "Department",
    "Location",
    "Action",
    "M_Number",
    "Timestamp",
    "Duration",
];

pub type Row = Vec<String>;

/// A rendered-on-demand report over one ledger snapshot.
#[derive(Debug, Clone)]
pub struct Report {
    title: String,
    records: Vec<PunchRecord>,
}

impl Report {
    pub fn new(title: &str, records: Vec<PunchRecord>) -> Self {
        Self {
            title: title.to_string(),
            records,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn records(&self) -> &[PunchRecord] {
        &self.records
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Aggregated rows without the title block.
    pub fn entries(&self) -> aggregator::Reconstruct<'_> {
        aggregator::reconstruct(&self.records)
    }

    /// Every output row, title block included. Each call starts over.
    pub fn rows(&self) -> impl Iterator<Item = Row> + '_ {
        self.title_block()
            .into_iter()
            .chain(self.entries().map(|row| render_row(&row)))
    }

    fn title_block(&self) -> Vec<Row> {
        vec![
            Vec::new(),
            vec![
                String::new(),
                String::new(),
                self.title.clone(),
                String::new(),
                String::new(),
                String::new(),
            ],
            Vec::new(),
            HEADERS.iter().map(|h| h.to_string()).collect(),
        ]
    }
}

pub fn render_row(row: &ReportRow<'_>) -> Row {
    match row {
        ReportRow::Separator => Vec::new(),
        ReportRow::DayTotal(total) => total_row(total),
        ReportRow::Punch { record, interval } => punch_row(record, interval.as_ref()),
    }
}

fn punch_row(record: &PunchRecord, interval: Option<&Interval>) -> Row {
    let ev = &record.event;
    vec![
        record.employee_name.clone(),
        ev.date().format("%Y-%m-%d").to_string(),
        record.department.clone().unwrap_or_default(),
        record.location.clone().unwrap_or_default(),
        ev.action.label(),
        ev.job().to_string(),
        ev.timestamp.format("%Y-%m-%d %H:%M:%S").to_string(),
        interval.map(format_interval).unwrap_or_default(),
    ]
}

fn total_row(total: &DayTotal) -> Row {
    vec![
        total.employee.clone(),
        total.date.format("%Y-%m-%d").to_string(),
        String::new(),
        String::new(),
        "TOTAL".to_string(),
        String::new(),
        String::new(),
        format_hours(total.hours()),
    ]
}

/// `"3h 0m"`, or `"BREAK 0h 30m"` for break intervals.
pub fn format_interval(interval: &Interval) -> String {
    let hours = interval.seconds.div_euclid(3600);
    let minutes = interval.seconds.rem_euclid(3600) / 60;

    match interval.kind {
        IntervalKind::Work => format!("{}h {}m", hours, minutes),
        IntervalKind::Break => format!("BREAK {}h {}m", hours, minutes),
    }
}

/// `7.5h`, `8.0h`, `7.33h`: at least one decimal, at most two.
pub fn format_hours(hours: f64) -> String {
    if hours.fract() == 0.0 {
        format!("{:.1}h", hours)
    } else {
        format!("{}h", hours)
    }
}
