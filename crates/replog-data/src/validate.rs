//! Record validation: schema check, gap check, forward-fill, typed parsing.
//!
//! `validate` is the only way a [`Record`] comes into existence; its output
//! is fully populated and correctly typed or it fails with one of the
//! schema / incomplete-data / parse errors.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use replog_core::error::{RepLogError, Result};
use replog_core::models::Record;
use tracing::warn;

use crate::workbook::RawTable;

/// The exact column set a sheet must carry.
pub const REQUIRED_COLUMNS: [&str; 5] = ["date", "time", "location", "exercise", "count"];

/// Columns that may contain gaps, resolved by forward-fill in row order.
const FFILL_COLUMNS: [&str; 3] = ["date", "location", "exercise"];

/// Columns that must be entirely nonempty.
const NONEMPTY_COLUMNS: [&str; 2] = ["time", "count"];

// ── Column check ──────────────────────────────────────────────────────────────

/// Verify the column set against [`REQUIRED_COLUMNS`].
///
/// Extraneous columns are recoverable and only logged; missing required
/// columns are fatal.
pub fn check_columns(table: &RawTable) -> Result<()> {
    let extraneous: Vec<&String> = table
        .columns()
        .iter()
        .filter(|name| !REQUIRED_COLUMNS.contains(&name.as_str()))
        .collect();
    if !extraneous.is_empty() {
        warn!(
            "Extraneous column(s) present: {}",
            extraneous
                .iter()
                .map(|s| format!("\"{}\"", s))
                .collect::<Vec<_>>()
                .join(", ")
        );
    }

    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|name| table.column_index(name).is_none())
        .map(|name| name.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(RepLogError::Schema { missing });
    }

    Ok(())
}

// ── Validation pipeline ───────────────────────────────────────────────────────

/// Validate and normalize a raw table into records.
///
/// 1. Column check ([`check_columns`]).
/// 2. `time` and `count` must be entirely nonempty.
/// 3. `date`, `location`, `exercise` are forward-filled top-to-bottom in
///    input row order. A gap in the first row has no fill source; the absent
///    value persists and fails the parse step below.
/// 4. Typed parsing: `date` as a calendar date, `time` as a timestamp (a
///    bare time of day combines with the row's date), `count` as a
///    non-negative integer.
///
/// Output preserves input row order. Row numbers in errors are 1-based data
/// rows (the header is row 0).
pub fn validate(table: &RawTable) -> Result<Vec<Record>> {
    check_columns(table)?;

    for column in NONEMPTY_COLUMNS {
        let idx = table
            .column_index(column)
            .expect("checked by check_columns");
        if table.rows().iter().any(|row| row[idx].is_none()) {
            return Err(RepLogError::IncompleteData {
                column: column.to_string(),
            });
        }
    }

    let mut rows: Vec<Vec<Option<String>>> = table.rows().to_vec();
    forward_fill(table, &mut rows);

    let date_idx = table.column_index("date").expect("checked");
    let time_idx = table.column_index("time").expect("checked");
    let location_idx = table.column_index("location").expect("checked");
    let exercise_idx = table.column_index("exercise").expect("checked");
    let count_idx = table.column_index("count").expect("checked");

    let mut records = Vec::with_capacity(rows.len());
    for (i, row) in rows.iter().enumerate() {
        let row_num = i + 1;
        let date = parse_date(row[date_idx].as_deref(), row_num)?;
        let time = parse_time(row[time_idx].as_deref(), date, row_num)?;
        let location = require_string(row[location_idx].as_deref(), "location", row_num)?;
        let exercise = require_string(row[exercise_idx].as_deref(), "exercise", row_num)?;
        let count = parse_count(row[count_idx].as_deref(), row_num)?;
        records.push(Record {
            date,
            time,
            location,
            exercise,
            count,
        });
    }

    Ok(records)
}

/// Forward-fill the gap-tolerant columns in place, top to bottom.
fn forward_fill(table: &RawTable, rows: &mut [Vec<Option<String>>]) {
    for column in FFILL_COLUMNS {
        let idx = table
            .column_index(column)
            .expect("checked by check_columns");
        let mut last: Option<String> = None;
        for row in rows.iter_mut() {
            match &row[idx] {
                Some(value) => last = Some(value.clone()),
                None => row[idx] = last.clone(),
            }
        }
    }
}

// ── Cell parsers ──────────────────────────────────────────────────────────────

/// Accepted calendar-date formats, tried in order.
const DATE_FMTS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y", "%d %b %Y", "%B %d, %Y"];

/// Accepted full-timestamp formats, tried in order.
const DATETIME_FMTS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

/// Accepted time-of-day formats; combined with the row's date.
const TIMEOFDAY_FMTS: &[&str] = &["%H:%M:%S", "%H:%M"];

fn parse_error(column: &str, row: usize, value: Option<&str>) -> RepLogError {
    RepLogError::Parse {
        column: column.to_string(),
        row,
        value: value.unwrap_or("").to_string(),
    }
}

fn parse_date(cell: Option<&str>, row: usize) -> Result<NaiveDate> {
    let value = cell.ok_or_else(|| parse_error("date", row, cell))?;

    for fmt in DATE_FMTS {
        if let Ok(date) = NaiveDate::parse_from_str(value, fmt) {
            return Ok(date);
        }
    }
    // A date cell may carry a full timestamp; keep the date part.
    for fmt in DATETIME_FMTS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, fmt) {
            return Ok(dt.date());
        }
    }

    Err(parse_error("date", row, cell))
}

fn parse_time(cell: Option<&str>, date: NaiveDate, row: usize) -> Result<NaiveDateTime> {
    let value = cell.ok_or_else(|| parse_error("time", row, cell))?;

    for fmt in DATETIME_FMTS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, fmt) {
            return Ok(dt);
        }
    }
    for fmt in TIMEOFDAY_FMTS {
        if let Ok(tod) = NaiveTime::parse_from_str(value, fmt) {
            return Ok(date.and_time(tod));
        }
    }

    Err(parse_error("time", row, cell))
}

fn require_string(cell: Option<&str>, column: &str, row: usize) -> Result<String> {
    cell.map(|s| s.to_string())
        .ok_or_else(|| parse_error(column, row, cell))
}

fn parse_count(cell: Option<&str>, row: usize) -> Result<u32> {
    let value = cell.ok_or_else(|| parse_error("count", row, cell))?;

    if let Ok(n) = value.parse::<i64>() {
        return u32::try_from(n).map_err(|_| parse_error("count", row, cell));
    }
    // Spreadsheet exports sometimes render integer cells as "12.0".
    if let Ok(f) = value.parse::<f64>() {
        if f.fract() == 0.0 && f >= 0.0 && f <= u32::MAX as f64 {
            return Ok(f as u32);
        }
    }

    Err(parse_error("count", row, cell))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workbook::RawTable;

    fn cell(s: &str) -> Option<String> {
        Some(s.to_string())
    }

    fn table(columns: &[&str], rows: Vec<Vec<Option<String>>>) -> RawTable {
        RawTable::new(columns.iter().map(|c| c.to_string()).collect(), rows)
    }

    fn full_table() -> RawTable {
        table(
            &["date", "time", "location", "exercise", "count"],
            vec![
                vec![
                    cell("2024-11-01"),
                    cell("2024-11-01 08:00:00"),
                    cell("home"),
                    cell("pushups"),
                    cell("10"),
                ],
                vec![None, cell("2024-11-01 08:05:00"), None, None, cell("8")],
                vec![
                    cell("2024-11-02"),
                    cell("2024-11-02 19:30:00"),
                    cell("gym"),
                    cell("squats"),
                    cell("20"),
                ],
            ],
        )
    }

    #[test]
    fn test_validate_row_count_preserved() {
        let records = validate(&full_table()).unwrap();
        assert_eq!(records.len(), 3);
    }

    #[test]
    fn test_forward_fill_inherits_preceding_values() {
        let records = validate(&full_table()).unwrap();
        assert_eq!(records[1].date, records[0].date);
        assert_eq!(records[1].location, "home");
        assert_eq!(records[1].exercise, "pushups");
        assert_eq!(records[1].count, 8);
        // The fill never reaches past an explicit value.
        assert_eq!(records[2].exercise, "squats");
    }

    #[test]
    fn test_missing_column_is_schema_error() {
        let t = table(
            &["date", "time", "location", "exercise"],
            vec![vec![
                cell("2024-11-01"),
                cell("2024-11-01 08:00:00"),
                cell("home"),
                cell("pushups"),
            ]],
        );
        let err = validate(&t).unwrap_err();
        assert!(matches!(
            err,
            RepLogError::Schema { ref missing } if missing == &["count".to_string()]
        ));
    }

    #[test]
    fn test_extraneous_column_only_warns() {
        let t = table(
            &["date", "time", "location", "exercise", "count", "mood"],
            vec![vec![
                cell("2024-11-01"),
                cell("2024-11-01 08:00:00"),
                cell("home"),
                cell("pushups"),
                cell("10"),
                cell("great"),
            ]],
        );
        let records = validate(&t).unwrap();
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn test_gap_in_count_is_incomplete_data() {
        let t = table(
            &["date", "time", "location", "exercise", "count"],
            vec![
                vec![
                    cell("2024-11-01"),
                    cell("2024-11-01 08:00:00"),
                    cell("home"),
                    cell("pushups"),
                    cell("10"),
                ],
                vec![
                    cell("2024-11-01"),
                    cell("2024-11-01 08:05:00"),
                    cell("home"),
                    cell("pushups"),
                    None,
                ],
            ],
        );
        let err = validate(&t).unwrap_err();
        assert!(matches!(
            err,
            RepLogError::IncompleteData { ref column } if column == "count"
        ));
    }

    #[test]
    fn test_gap_in_time_is_incomplete_data() {
        let t = table(
            &["date", "time", "location", "exercise", "count"],
            vec![vec![
                cell("2024-11-01"),
                None,
                cell("home"),
                cell("pushups"),
                cell("10"),
            ]],
        );
        let err = validate(&t).unwrap_err();
        assert!(matches!(
            err,
            RepLogError::IncompleteData { ref column } if column == "time"
        ));
    }

    #[test]
    fn test_first_row_gap_has_no_fill_source() {
        let t = table(
            &["date", "time", "location", "exercise", "count"],
            vec![vec![
                None,
                cell("2024-11-01 08:00:00"),
                cell("home"),
                cell("pushups"),
                cell("10"),
            ]],
        );
        let err = validate(&t).unwrap_err();
        assert!(matches!(
            err,
            RepLogError::Parse { ref column, row: 1, .. } if column == "date"
        ));
    }

    #[test]
    fn test_unparseable_date_is_parse_error() {
        let t = table(
            &["date", "time", "location", "exercise", "count"],
            vec![vec![
                cell("yesterday"),
                cell("2024-11-01 08:00:00"),
                cell("home"),
                cell("pushups"),
                cell("10"),
            ]],
        );
        let err = validate(&t).unwrap_err();
        assert!(matches!(
            err,
            RepLogError::Parse { ref column, ref value, .. }
                if column == "date" && value == "yesterday"
        ));
    }

    #[test]
    fn test_time_of_day_combines_with_row_date() {
        let t = table(
            &["date", "time", "location", "exercise", "count"],
            vec![vec![
                cell("2024-11-03"),
                cell("07:45"),
                cell("home"),
                cell("pushups"),
                cell("10"),
            ]],
        );
        let records = validate(&t).unwrap();
        assert_eq!(
            records[0].time,
            NaiveDate::from_ymd_opt(2024, 11, 3)
                .unwrap()
                .and_hms_opt(7, 45, 0)
                .unwrap()
        );
    }

    #[test]
    fn test_integer_valued_float_count_accepted() {
        let t = table(
            &["date", "time", "location", "exercise", "count"],
            vec![vec![
                cell("2024-11-01"),
                cell("2024-11-01 08:00:00"),
                cell("home"),
                cell("pushups"),
                cell("12.0"),
            ]],
        );
        let records = validate(&t).unwrap();
        assert_eq!(records[0].count, 12);
    }

    #[test]
    fn test_fractional_count_rejected() {
        let t = table(
            &["date", "time", "location", "exercise", "count"],
            vec![vec![
                cell("2024-11-01"),
                cell("2024-11-01 08:00:00"),
                cell("home"),
                cell("pushups"),
                cell("12.5"),
            ]],
        );
        assert!(matches!(
            validate(&t).unwrap_err(),
            RepLogError::Parse { ref column, .. } if column == "count"
        ));
    }

    #[test]
    fn test_negative_count_rejected() {
        let t = table(
            &["date", "time", "location", "exercise", "count"],
            vec![vec![
                cell("2024-11-01"),
                cell("2024-11-01 08:00:00"),
                cell("home"),
                cell("pushups"),
                cell("-3"),
            ]],
        );
        assert!(matches!(
            validate(&t).unwrap_err(),
            RepLogError::Parse { ref column, .. } if column == "count"
        ));
    }

    #[test]
    fn test_validate_idempotent_on_normalized_data() {
        let records = validate(&full_table()).unwrap();

        // Render the normalized records back into a fully-populated table.
        let rerendered = table(
            &["date", "time", "location", "exercise", "count"],
            records
                .iter()
                .map(|r| {
                    vec![
                        cell(&r.date.format("%Y-%m-%d").to_string()),
                        cell(&r.time.format("%Y-%m-%d %H:%M:%S").to_string()),
                        cell(&r.location),
                        cell(&r.exercise),
                        cell(&r.count.to_string()),
                    ]
                })
                .collect(),
        );

        let revalidated = validate(&rerendered).unwrap();
        assert_eq!(records, revalidated);
    }
}
