//! Derived statistics and table/export shaping: the ordered date columns,
//! per-student counts and percentages, and the row layout the PDF/Word
//! exporters consume.

use std::collections::BTreeSet;

use chrono::{Duration, Local, NaiveDate};
use serde::Serialize;
use tracing::warn;

use crate::model::{AttendanceSession, AttendanceStudent};

pub const DATE_KEY_FORMAT: &str = "%Y-%m-%d";

/// Cell text used for a date a student has no record for.
pub const UNMARKED_CELL: &str = "-";

/// Engine-wide tunables. The column target used to be hardcoded (and
/// inconsistent) per call site; it is one parameter now.
#[derive(Debug, Clone, Copy)]
pub struct EngineConfig {
    pub column_target: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self { column_target: 6 }
    }
}

/// Per-student counts over the sparse record map. `marked` counts only
/// present/absent days; unmarked days do not exist in the map and a
/// defensive not-marked record would not count either.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceSummary {
    pub present_count: usize,
    pub absent_count: usize,
    pub marked_count: usize,
}

pub fn attendance_summary(student: &AttendanceStudent) -> AttendanceSummary {
    let mut summary = AttendanceSummary::default();
    for record in student.attendance.values() {
        if !record.status.is_marked() {
            continue;
        }
        summary.marked_count += 1;
        match record.status {
            crate::model::AttendanceStatus::Present => summary.present_count += 1,
            _ => summary.absent_count += 1,
        }
    }
    summary
}

/// `present / marked * 100` to one decimal place. Zero marked days yields
/// exactly "0.0", never NaN.
pub fn attendance_percentage(student: &AttendanceStudent) -> String {
    let summary = attendance_summary(student);
    if summary.marked_count == 0 {
        return "0.0".to_string();
    }
    let pct = summary.present_count as f64 / summary.marked_count as f64 * 100.0;
    format!("{:.1}", pct)
}

fn recorded_dates(session: &AttendanceSession) -> BTreeSet<NaiveDate> {
    let mut dates = BTreeSet::new();
    for student in &session.students {
        for key in student.attendance.keys() {
            match NaiveDate::parse_from_str(key, DATE_KEY_FORMAT) {
                Ok(d) => {
                    dates.insert(d);
                }
                Err(_) => warn!(date_key = key.as_str(), "ignoring unparseable date key"),
            }
        }
    }
    dates
}

fn columns_from_dates(dates: &BTreeSet<NaiveDate>, target: usize, seed: NaiveDate) -> Vec<NaiveDate> {
    let mut columns: Vec<NaiveDate> = dates.iter().copied().collect();
    let mut next = columns.last().map(|d| *d + Duration::days(1)).unwrap_or(seed);
    while columns.len() < target {
        columns.push(next);
        next = next + Duration::days(1);
    }
    columns
}

/// The ordered set of dateKeys to display or export: every distinct
/// recorded date ascending, padded with synthetic future dates (one day
/// apart, continuing from the last real date, or from today when there is
/// no history) until `target` columns exist. A session with more history
/// than `target` gets all of its real dates and no padding.
pub fn generate_attendance_columns(session: &AttendanceSession, target: usize) -> Vec<String> {
    let dates = recorded_dates(session);
    let seed = Local::now().date_naive();
    columns_from_dates(&dates, target, seed)
        .into_iter()
        .map(|d| d.format(DATE_KEY_FORMAT).to_string())
        .collect()
}

/// Present/absent/unmarked counts for a single date column, for the
/// list-view badges.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayTotals {
    pub present: usize,
    pub absent: usize,
    pub unmarked: usize,
}

pub fn session_totals(session: &AttendanceSession, date_key: &str) -> DayTotals {
    let mut totals = DayTotals::default();
    for student in &session.students {
        match student.attendance.get(date_key) {
            Some(r) if r.status == crate::model::AttendanceStatus::Present => totals.present += 1,
            Some(r) if r.status == crate::model::AttendanceStatus::Absent => totals.absent += 1,
            _ => totals.unmarked += 1,
        }
    }
    totals
}

/// Rows for the export collaborators, one per student in roster order:
/// `[index, name, registrationNumber, ...perColumnStatus, percentage]`.
/// Unmarked dates render as [`UNMARKED_CELL`].
pub fn export_rows(session: &AttendanceSession, columns: &[String]) -> Vec<Vec<String>> {
    session
        .students
        .iter()
        .enumerate()
        .map(|(i, student)| {
            let mut row = Vec::with_capacity(columns.len() + 4);
            row.push((i + 1).to_string());
            row.push(student.name.clone());
            row.push(student.registration_number.clone());
            for column in columns {
                let cell = student
                    .attendance
                    .get(column)
                    .map(|r| r.status.as_str().to_string())
                    .unwrap_or_else(|| UNMARKED_CELL.to_string());
                row.push(cell);
            }
            row.push(attendance_percentage(student));
            row
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AttendanceRecord, AttendanceStatus};
    use std::collections::BTreeMap;

    fn student(marks: &[(&str, AttendanceStatus)]) -> AttendanceStudent {
        let mut attendance = BTreeMap::new();
        for (date, status) in marks {
            attendance.insert(
                date.to_string(),
                AttendanceRecord {
                    status: *status,
                    time: None,
                },
            );
        }
        AttendanceStudent {
            id: "p1".to_string(),
            name: "Ada Obi".to_string(),
            registration_number: "CSC/21/001".to_string(),
            attendance,
        }
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, DATE_KEY_FORMAT).expect("date literal")
    }

    #[test]
    fn percentage_over_irregular_dates() {
        let s = student(&[
            ("2024-03-01", AttendanceStatus::Present),
            ("2024-03-04", AttendanceStatus::Absent),
            ("2024-03-11", AttendanceStatus::Present),
        ]);
        assert_eq!(attendance_percentage(&s), "66.7");
    }

    #[test]
    fn percentage_with_no_marked_dates_is_zero_string() {
        let s = student(&[]);
        assert_eq!(attendance_percentage(&s), "0.0");
    }

    #[test]
    fn defensive_not_marked_record_is_excluded_from_denominator() {
        let s = student(&[
            ("2024-03-01", AttendanceStatus::Present),
            ("2024-03-02", AttendanceStatus::NotMarked),
        ]);
        let summary = attendance_summary(&s);
        assert_eq!(summary.marked_count, 1);
        assert_eq!(attendance_percentage(&s), "100.0");
    }

    #[test]
    fn columns_pad_forward_from_last_real_date() {
        let dates: BTreeSet<NaiveDate> =
            [date("2024-03-01"), date("2024-03-05")].into_iter().collect();
        let columns = columns_from_dates(&dates, 4, date("2024-01-01"));
        assert_eq!(
            columns,
            vec![
                date("2024-03-01"),
                date("2024-03-05"),
                date("2024-03-06"),
                date("2024-03-07"),
            ]
        );
    }

    #[test]
    fn columns_seed_from_today_with_no_history() {
        let columns = columns_from_dates(&BTreeSet::new(), 3, date("2024-03-01"));
        assert_eq!(
            columns,
            vec![date("2024-03-01"), date("2024-03-02"), date("2024-03-03")]
        );
    }

    #[test]
    fn columns_never_truncate_real_history() {
        let dates: BTreeSet<NaiveDate> = (1..=9)
            .map(|d| date(&format!("2024-03-0{}", d)))
            .collect();
        let columns = columns_from_dates(&dates, 6, date("2024-01-01"));
        assert_eq!(columns.len(), 9);
    }
}
