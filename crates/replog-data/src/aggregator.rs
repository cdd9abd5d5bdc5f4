//! Summary statistics, goal projections, and cumulative totals for one
//! exercise within one month.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use replog_core::calculations::{mean, median, PaceCalculator};
use replog_core::error::{RepLogError, Result};
use replog_core::models::{DayStats, MonthRecords, Projection, Record, SetStats, Summary};
use replog_core::time_utils;

/// Stateless helper that derives per-exercise statistics from a month of
/// records.
pub struct ExerciseAggregator;

impl ExerciseAggregator {
    /// Compute the scalar summary over `1..=day_range`.
    ///
    /// Per-day statistics are reported two ways: over active days only
    /// ("how hard did I go on days I trained") and over the whole day range
    /// with void days as 0 ("how am I doing relative to the full month").
    pub fn summarize(month: &MonthRecords, exercise: &str, day_range: u32) -> Result<Summary> {
        let records = Self::filtered(month, exercise)?;

        let counts: Vec<f64> = records.iter().map(|r| f64::from(r.count)).collect();
        let total: u64 = records.iter().map(|r| u64::from(r.count)).sum();

        let day_sums = Self::day_sums(&records);
        let days_done = day_sums.len() as u32;

        let per_set = SetStats {
            max: records.iter().map(|r| r.count).max().unwrap_or(0),
            mean: mean(&counts),
            median: median(&counts),
        };

        let active: Vec<f64> = day_sums.values().map(|&s| s as f64).collect();
        let with_void: Vec<f64> = (1..=day_range)
            .map(|day| day_sums.get(&day).copied().unwrap_or(0) as f64)
            .collect();

        let per_day = DayStats {
            max: day_sums.values().copied().max().unwrap_or(0),
            mean: mean(&active),
            median: median(&active),
            mean_with_void: mean(&with_void),
            median_with_void: median(&with_void),
        };

        Ok(Summary {
            exercise: exercise.to_string(),
            year: month.year(),
            month: month.month(),
            day_range,
            total,
            days_done,
            per_set,
            per_day,
        })
    }

    /// Total reps for `exercise` on one day of the month; 0 when none.
    pub fn day_total(month: &MonthRecords, exercise: &str, day: u32) -> u64 {
        month
            .records_for(exercise)
            .iter()
            .filter(|r| r.date.day() == day)
            .map(|r| u64::from(r.count))
            .sum()
    }

    /// Compute the goal-pace projection for an in-progress month.
    ///
    /// `today` must be the wall-clock date resolved once by the caller; only
    /// its day-of-month is used here.
    pub fn project(
        month: &MonthRecords,
        exercise: &str,
        goal_total: u64,
        today: NaiveDate,
    ) -> Result<Projection> {
        let records = Self::filtered(month, exercise)?;

        let current_day = today.day();
        let days_in_month = time_utils::days_in_month(month.year(), month.month());

        let month_total: u64 = records.iter().map(|r| u64::from(r.count)).sum();
        let today_total: u64 = records
            .iter()
            .filter(|r| r.date.day() == current_day)
            .map(|r| u64::from(r.count))
            .sum();

        Ok(Projection {
            exercise: exercise.to_string(),
            year: month.year(),
            month: month.month(),
            goal_total,
            month_total,
            today_total,
            current_day,
            days_in_month,
            pace_end_of_day: PaceCalculator::pace_end_of_day(
                goal_total,
                month_total,
                days_in_month,
                current_day,
            ),
            pace_as_of_morning: PaceCalculator::pace_as_of_morning(
                goal_total,
                month_total,
                today_total,
                days_in_month,
                current_day,
            ),
        })
    }

    /// Per-day running totals as `(day, cumulative_total)` pairs, covering
    /// active days only (line-chart input).
    pub fn cumulative_totals(month: &MonthRecords, exercise: &str) -> Result<Vec<(u32, u64)>> {
        let records = Self::filtered(month, exercise)?;
        let day_sums = Self::day_sums(&records);

        let mut running = 0u64;
        Ok(day_sums
            .into_iter()
            .map(|(day, sum)| {
                running += sum;
                (day, running)
            })
            .collect())
    }

    // ── Internal helpers ──────────────────────────────────────────────────────

    /// Records for `exercise`, or [`RepLogError::ExerciseNotFound`] when the
    /// month has none.
    fn filtered<'a>(month: &'a MonthRecords, exercise: &str) -> Result<Vec<&'a Record>> {
        let records = month.records_for(exercise);
        if records.is_empty() {
            return Err(RepLogError::ExerciseNotFound(exercise.to_string()));
        }
        Ok(records)
    }

    /// Group records by day of month and sum counts, keyed in day order.
    fn day_sums(records: &[&Record]) -> BTreeMap<u32, u64> {
        let mut sums: BTreeMap<u32, u64> = BTreeMap::new();
        for record in records {
            *sums.entry(record.date.day()).or_insert(0) += u64::from(record.count);
        }
        sums
    }
}
