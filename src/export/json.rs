use crate::core::aggregator::ReportRow;
use crate::errors::AppResult;
use crate::export::render::{Report, format_hours, format_interval};
use serde::Serialize;
use std::io::Write;

/// One structured report entry. Separators carry no data and are dropped.
#[derive(Debug, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum JsonEntry {
    Punch {
        id: i64,
        employee: String,
        date: String,
        department: Option<String>,
        location: Option<String>,
        action: String,
        job_number: Option<String>,
        timestamp: String,
        device_label: Option<String>,
        note: Option<String>,
        duration: Option<String>,
        seconds: Option<i64>,
    },
    Total {
        employee: String,
        date: String,
        seconds: i64,
        hours: String,
    },
}

#[derive(Debug, Serialize)]
pub struct JsonReport {
    pub title: String,
    pub entries: Vec<JsonEntry>,
}

pub fn to_json_report(report: &Report) -> JsonReport {
    let entries = report
        .entries()
        .filter_map(|row| match row {
            ReportRow::Separator => None,
            ReportRow::Punch { record, interval } => Some(JsonEntry::Punch {
                id: record.event.id,
                employee: record.employee_name.clone(),
                date: record.event.date().to_string(),
                department: record.department.clone(),
                location: record.location.clone(),
                action: record.event.action.label(),
                job_number: record.event.job_number.clone(),
                timestamp: record.event.iso_timestamp(),
                device_label: record.event.device_label.clone(),
                note: record.event.note.clone(),
                duration: interval.as_ref().map(format_interval),
                seconds: interval.map(|i| i.seconds),
            }),
            ReportRow::DayTotal(total) => Some(JsonEntry::Total {
                hours: format_hours(total.hours()),
                employee: total.employee,
                date: total.date.to_string(),
                seconds: total.seconds,
            }),
        })
        .collect();

    JsonReport {
        title: report.title().to_string(),
        entries,
    }
}

/// Pretty-printed JSON.
pub fn write_json<W: Write>(report: &Report, mut out: W) -> AppResult<()> {
    serde_json::to_writer_pretty(&mut out, &to_json_report(report))?;
    out.write_all(b"\n")?;
    out.flush()?;
    Ok(())
}
