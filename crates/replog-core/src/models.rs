use chrono::{Datelike, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::{RepLogError, Result};

/// A single logged exercise set, fully validated and gap-filled.
///
/// Only the record validator constructs these; a `Record` in hand means all
/// five fields were present (or forward-filled) and correctly typed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Calendar day the set was performed.
    pub date: NaiveDate,
    /// Timestamp of the set; used for existence and month-integrity checks.
    pub time: NaiveDateTime,
    /// Where the set was performed.
    pub location: String,
    /// Exercise name. Identity is case-sensitive.
    pub exercise: String,
    /// Repetition count for the set.
    pub count: u32,
}

// ── MonthRecords ──────────────────────────────────────────────────────────────

/// A normalized record set guaranteed to lie within a single year and month.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthRecords {
    year: i32,
    month: u32,
    records: Vec<Record>,
}

impl MonthRecords {
    /// Wrap a normalized record set after verifying that every record's
    /// `date` and `time` fall inside `(year, month)`.
    ///
    /// A single deviating record rejects the whole set; this guards against
    /// misfiled data silently entering downstream aggregation.
    pub fn new(year: i32, month: u32, records: Vec<Record>) -> Result<Self> {
        for record in &records {
            if record.date.year() != year || record.date.month() != month {
                return Err(RepLogError::MonthMismatch {
                    column: "date".to_string(),
                    year,
                    month,
                });
            }
            let time_date = record.time.date();
            if time_date.year() != year || time_date.month() != month {
                return Err(RepLogError::MonthMismatch {
                    column: "time".to_string(),
                    year,
                    month,
                });
            }
        }
        Ok(Self {
            year,
            month,
            records,
        })
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// All records in original input order.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Records for one exercise (case-sensitive), preserving input order.
    ///
    /// Returns an empty vector when the exercise never appears; callers that
    /// treat that as fatal raise [`RepLogError::ExerciseNotFound`].
    pub fn records_for(&self, exercise: &str) -> Vec<&Record> {
        self.records
            .iter()
            .filter(|r| r.exercise == exercise)
            .collect()
    }

    /// Distinct exercise names present this month, sorted.
    pub fn exercises(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.records.iter().map(|r| r.exercise.as_str()).collect();
        names.sort_unstable();
        names.dedup();
        names
    }
}

// ── StratifiedSeries ──────────────────────────────────────────────────────────

/// The output of stratification: N rank-ordered layers, each covering every
/// day in `1..=day_range`.
///
/// Layer `n` holds, for each day, the (n+1)-th largest count logged that day,
/// or 0 when fewer than n+1 sets were done. All layers have identical length,
/// which is what lets a stacked chart align them by day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StratifiedSeries {
    day_range: u32,
    layers: Vec<Vec<u32>>,
}

impl StratifiedSeries {
    /// Construct from prebuilt layers.
    ///
    /// Panics in debug builds if any layer's length differs from `day_range`;
    /// the stratifier preallocates, so this cannot happen in practice.
    pub fn new(day_range: u32, layers: Vec<Vec<u32>>) -> Self {
        debug_assert!(layers.iter().all(|l| l.len() == day_range as usize));
        Self { day_range, layers }
    }

    pub fn day_range(&self) -> u32 {
        self.day_range
    }

    /// Number of layers (the maximum sets-per-day across the range).
    pub fn num_layers(&self) -> usize {
        self.layers.len()
    }

    /// All layers in rank order: layer 0 is each day's largest set.
    pub fn layers(&self) -> &[Vec<u32>] {
        &self.layers
    }

    /// Total count for the day at `day_index` (0-based), summed across layers.
    pub fn day_total(&self, day_index: usize) -> u64 {
        self.layers
            .iter()
            .map(|layer| u64::from(layer[day_index]))
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty() || self.day_range == 0
    }
}

// ── Summary / Projection ──────────────────────────────────────────────────────

/// Per-set statistics over all matching records in a month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetStats {
    /// Largest single set.
    pub max: u32,
    /// Mean reps per set.
    pub mean: f64,
    /// Median reps per set.
    pub median: f64,
}

/// Per-day statistics over daily totals.
///
/// The plain fields average over active days only; the `_with_void` variants
/// spread the same totals over the whole day range, counting void days as 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayStats {
    /// Largest daily total.
    pub max: u64,
    /// Mean daily total, active days only.
    pub mean: f64,
    /// Median daily total, active days only.
    pub median: f64,
    /// Mean daily total including void days.
    pub mean_with_void: f64,
    /// Median daily total including void days.
    pub median_with_void: f64,
}

/// Scalar summary statistics for one exercise in one month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    /// Exercise analyzed.
    pub exercise: String,
    pub year: i32,
    pub month: u32,
    /// Number of days the month is considered to span (full month, or
    /// day-of-month so far when the month is in progress).
    pub day_range: u32,
    /// Total reps across all sets.
    pub total: u64,
    /// Number of distinct days with at least one set.
    pub days_done: u32,
    pub per_set: SetStats,
    pub per_day: DayStats,
}

/// Goal-pace projection for an in-progress month.
///
/// The two paces differ only in whether today is treated as already passed
/// (`end_of_day`) or still open (`as_of_morning`); both are exposed since the
/// numerators and denominators legitimately differ by today's contribution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projection {
    pub exercise: String,
    pub year: i32,
    pub month: u32,
    /// Rep goal for the whole month.
    pub goal_total: u64,
    /// Reps logged so far this month.
    pub month_total: u64,
    /// Reps logged so far today.
    pub today_total: u64,
    /// Day of month the projection was computed on.
    pub current_day: u32,
    pub days_in_month: u32,
    /// Required daily pace assuming no further reps are logged today.
    /// `None` when no days remain after today.
    pub pace_end_of_day: Option<f64>,
    /// Required daily pace treating today as not yet contributed.
    /// `None` when the month has no open days left.
    pub pace_as_of_morning: Option<f64>,
}
