//! Report assembly and the idempotency gate.

use crate::stats::ReportRow;
use chrono::NaiveDate;
use std::path::{Path, PathBuf};

/// Deterministic report file name for a log date.
pub fn report_name(date: NaiveDate) -> String {
    format!("report-{}.html", date.format("%Y.%m.%d"))
}

/// Full path of the report for `date` under `report_dir`.
pub fn report_path(date: NaiveDate, report_dir: &Path) -> PathBuf {
    report_dir.join(report_name(date))
}

/// True iff a report for this date already exists. A pure existence
/// check; content is never compared. When true the whole pipeline is
/// skipped.
pub fn report_exists(date: NaiveDate, report_dir: &Path) -> bool {
    report_path(date, report_dir).is_file()
}

/// Order rows by total time descending and cap the emitted count.
///
/// The sort is stable, so keys with equal `time_sum` keep their
/// first-encounter order. Truncation is a display limit only; every key
/// was already aggregated.
pub fn assemble(mut rows: Vec<ReportRow>, cap: usize) -> Vec<ReportRow> {
    rows.sort_by(|a, b| {
        b.time_sum
            .partial_cmp(&a.time_sum)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    rows.truncate(cap);
    rows
}
