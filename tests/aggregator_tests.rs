mod common;

use common::{TestClock, full_day, memory_ledger, punch_at, record, register};
use punchclock::core::aggregator::{IntervalKind, ReportRow, day_totals, reconstruct};
use punchclock::core::store::RangeQuery;
use punchclock::models::action::PunchAction;

fn durations(rows: &[ReportRow<'_>]) -> Vec<Option<(IntervalKind, i64)>> {
    rows.iter()
        .filter_map(|row| match row {
            ReportRow::Punch { interval, .. } => Some(interval.map(|i| (i.kind, i.seconds))),
            _ => None,
        })
        .collect()
}

#[test]
fn test_full_day_excludes_break_from_total() {
    let records = full_day(1, "Alice", "2025-09-01");
    let rows: Vec<_> = reconstruct(&records).collect();

    assert_eq!(
        durations(&rows),
        vec![
            None,
            Some((IntervalKind::Work, 3 * 3600)),
            None,
            Some((IntervalKind::Break, 30 * 60)),
            None,
            Some((IntervalKind::Work, 4 * 3600 + 30 * 60)),
        ]
    );

    let totals = day_totals(&records);
    assert_eq!(totals.len(), 1);
    assert_eq!(totals[0].seconds, 27_000);
    assert_eq!(totals[0].hours(), 7.5);

    // separator, then the total, closes the day
    assert_eq!(rows[6], ReportRow::Separator);
    assert!(matches!(rows[7], ReportRow::DayTotal(_)));
    assert_eq!(rows.len(), 8);
}

#[test]
fn test_orphan_out_has_no_duration() {
    let records = vec![
        record(1, 1, "Alice", "2025-09-01T09:00:00", PunchAction::Out),
        record(2, 1, "Alice", "2025-09-01T10:00:00", PunchAction::BreakOut),
    ];

    let rows: Vec<_> = reconstruct(&records).collect();
    assert_eq!(durations(&rows), vec![None, None]);
    assert_eq!(day_totals(&records)[0].seconds, 0);
}

#[test]
fn test_break_in_replaces_open_work_interval() {
    // single open slot: the unmatched `in` is dropped by the break
    let records = vec![
        record(1, 1, "Alice", "2025-09-01T09:00:00", PunchAction::In),
        record(2, 1, "Alice", "2025-09-01T12:00:00", PunchAction::BreakIn),
        record(3, 1, "Alice", "2025-09-01T12:30:00", PunchAction::Out),
    ];

    let rows: Vec<_> = reconstruct(&records).collect();
    assert_eq!(
        durations(&rows),
        vec![None, None, Some((IntervalKind::Work, 30 * 60))]
    );
    assert_eq!(day_totals(&records)[0].seconds, 30 * 60);
}

#[test]
fn test_break_out_leaves_nothing_open() {
    let records = vec![
        record(1, 1, "Alice", "2025-09-01T12:00:00", PunchAction::BreakIn),
        record(2, 1, "Alice", "2025-09-01T12:30:00", PunchAction::BreakOut),
        record(3, 1, "Alice", "2025-09-01T17:00:00", PunchAction::Out),
    ];

    let rows: Vec<_> = reconstruct(&records).collect();
    assert_eq!(
        durations(&rows),
        vec![None, Some((IntervalKind::Break, 30 * 60)), None]
    );
    assert_eq!(day_totals(&records)[0].seconds, 0);
}

#[test]
fn test_open_interval_does_not_cross_midnight() {
    let records = vec![
        record(1, 1, "Alice", "2025-09-01T22:00:00", PunchAction::In),
        record(2, 1, "Alice", "2025-09-02T06:00:00", PunchAction::Out),
    ];

    let totals = day_totals(&records);
    assert_eq!(totals.len(), 2);
    assert_eq!(totals[0].date.to_string(), "2025-09-01");
    assert_eq!(totals[0].seconds, 0);
    assert_eq!(totals[1].date.to_string(), "2025-09-02");
    assert_eq!(totals[1].seconds, 0);
}

#[test]
fn test_one_total_per_employee_day() {
    let mut records = full_day(1, "Alice", "2025-09-01");
    records.extend(full_day(1, "Alice", "2025-09-02"));
    records.extend(full_day(2, "Bob", "2025-09-01"));

    let totals = day_totals(&records);
    let keys: Vec<(String, String)> = totals
        .iter()
        .map(|t| (t.employee.clone(), t.date.to_string()))
        .collect();

    assert_eq!(
        keys,
        [
            ("Alice".to_string(), "2025-09-01".to_string()),
            ("Alice".to_string(), "2025-09-02".to_string()),
            ("Bob".to_string(), "2025-09-01".to_string()),
        ]
    );
    assert!(totals.iter().all(|t| t.seconds == 27_000));
}

#[test]
fn test_employee_change_closes_previous_employee() {
    let records = vec![
        record(1, 1, "Alice", "2025-09-01T09:00:00", PunchAction::In),
        record(2, 2, "Bob", "2025-09-01T17:00:00", PunchAction::Out),
    ];

    let rows: Vec<_> = reconstruct(&records).collect();

    // Alice punch, separator, Alice total, separator, Bob punch, separator, Bob total
    assert_eq!(rows.len(), 7);
    assert!(matches!(&rows[2], ReportRow::DayTotal(t) if t.employee == "Alice" && t.seconds == 0));
    assert_eq!(rows[3], ReportRow::Separator);
    // Alice's open `in` never closes Bob's `out`
    assert!(matches!(&rows[4], ReportRow::Punch { interval: None, .. }));
}

#[test]
fn test_interleaved_employees_never_mix_intervals() {
    let clock = TestClock::at("2025-09-01T09:00:00");
    let ledger = memory_ledger(&clock);
    register(&ledger, "Alice", "E001", None, None);
    register(&ledger, "Bob", "E002", None, None);

    // storage order interleaves the two employees
    punch_at(&ledger, &clock, "E001", "in", None, "2025-09-01T09:00:00").unwrap();
    punch_at(&ledger, &clock, "E002", "in", None, "2025-09-01T10:00:00").unwrap();
    punch_at(&ledger, &clock, "E001", "out", None, "2025-09-01T11:00:00").unwrap();
    punch_at(&ledger, &clock, "E002", "out", None, "2025-09-01T18:00:00").unwrap();

    let snapshot = ledger.snapshot(&RangeQuery::all()).unwrap();
    let totals = day_totals(&snapshot);

    assert_eq!(totals.len(), 2);
    assert_eq!((totals[0].employee.as_str(), totals[0].seconds), ("Alice", 2 * 3600));
    assert_eq!((totals[1].employee.as_str(), totals[1].seconds), ("Bob", 8 * 3600));
}

#[test]
fn test_reaggregation_is_idempotent() {
    let mut records = full_day(1, "Alice", "2025-09-01");
    records.push(record(99, 1, "Alice", "2025-09-02T08:00:00", PunchAction::In));

    assert_eq!(day_totals(&records), day_totals(&records));

    let first: Vec<_> = reconstruct(&records).collect();
    let second: Vec<_> = reconstruct(&records).collect();
    assert_eq!(first, second);
}

#[test]
fn test_empty_snapshot_yields_nothing() {
    assert_eq!(reconstruct(&[]).count(), 0);
}
