use chrono::{Datelike, NaiveDate};

use crate::error::{RepLogError, Result};

// ── Month names ───────────────────────────────────────────────────────────────

/// Full English month names, indexed by `month - 1`.
const MONTH_NAMES: &[&str] = &[
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Full English name for a 1-based month number.
///
/// # Panics
///
/// Panics if `month` is not in `1..=12`; month numbers reaching this function
/// have already been validated by clap or by `chrono`.
pub fn month_name(month: u32) -> &'static str {
    MONTH_NAMES[(month - 1) as usize]
}

/// Sheet identifier for `(year, month)` per the workbook convention,
/// e.g. `"2024-November"`.
pub fn sheet_name(year: i32, month: u32) -> String {
    format!("{}-{}", year, month_name(month))
}

// ── Calendar arithmetic ───────────────────────────────────────────────────────

/// Number of days in the given month, leap years included.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    let first = NaiveDate::from_ymd_opt(year, month, 1)
        .unwrap_or_else(|| panic!("invalid year/month: {}-{}", year, month));
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    }
    .expect("first of next month is always valid");
    (next - first).num_days() as u32
}

/// Resolve the day range for `(year, month)` relative to `today`.
///
/// Returns the day-of-month of `today` when the requested month is the
/// current one (a zero-filled future day is not yet void, it simply has not
/// happened) and the full month length otherwise. `today` is resolved once
/// by the caller so that everything downstream stays wall-clock free.
pub fn day_range_for(year: i32, month: u32, today: NaiveDate) -> u32 {
    if today.year() == year && today.month() == month {
        today.day()
    } else {
        days_in_month(year, month)
    }
}

/// All `(year, month)` pairs from `start` through `end`, inclusive.
///
/// Fails with [`RepLogError::InvalidMonthRange`] when `start` is after `end`.
pub fn month_range(start: (i32, u32), end: (i32, u32)) -> Result<Vec<(i32, u32)>> {
    let (start_year, start_month) = start;
    let (end_year, end_month) = end;

    if (start_year, start_month) > (end_year, end_month) {
        return Err(RepLogError::InvalidMonthRange {
            start_year,
            start_month,
            end_year,
            end_month,
        });
    }

    let mut months = Vec::new();
    let (mut year, mut month) = (start_year, start_month);
    loop {
        months.push((year, month));
        if (year, month) == (end_year, end_month) {
            break;
        }
        month += 1;
        if month > 12 {
            month = 1;
            year += 1;
        }
    }
    Ok(months)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_month_name() {
        assert_eq!(month_name(1), "January");
        assert_eq!(month_name(11), "November");
        assert_eq!(month_name(12), "December");
    }

    #[test]
    fn test_sheet_name_convention() {
        assert_eq!(sheet_name(2024, 11), "2024-November");
        assert_eq!(sheet_name(2025, 1), "2025-January");
    }

    #[test]
    fn test_days_in_month() {
        assert_eq!(days_in_month(2024, 11), 30);
        assert_eq!(days_in_month(2024, 12), 31);
        assert_eq!(days_in_month(2024, 2), 29); // leap year
        assert_eq!(days_in_month(2023, 2), 28);
    }

    #[test]
    fn test_day_range_for_current_month() {
        let today = NaiveDate::from_ymd_opt(2024, 11, 17).unwrap();
        assert_eq!(day_range_for(2024, 11, today), 17);
    }

    #[test]
    fn test_day_range_for_other_month() {
        let today = NaiveDate::from_ymd_opt(2024, 11, 17).unwrap();
        assert_eq!(day_range_for(2024, 10, today), 31);
        assert_eq!(day_range_for(2023, 11, today), 30);
    }

    #[test]
    fn test_month_range_single() {
        assert_eq!(
            month_range((2024, 5), (2024, 5)).unwrap(),
            vec![(2024, 5)]
        );
    }

    #[test]
    fn test_month_range_across_year_boundary() {
        assert_eq!(
            month_range((2024, 11), (2025, 2)).unwrap(),
            vec![(2024, 11), (2024, 12), (2025, 1), (2025, 2)]
        );
    }

    #[test]
    fn test_month_range_backwards_is_error() {
        let err = month_range((2025, 1), (2024, 12)).unwrap_err();
        assert!(matches!(err, RepLogError::InvalidMonthRange { .. }));
    }
}
