//! Stratification: reshape ragged per-day sets into rank-ordered,
//! zero-padded layers.
//!
//! A month of records for one exercise has a variable number of sets per
//! day. Stacked charting needs N uniform series, where series n holds each
//! day's (n+1)-th largest count, or 0 when that day had fewer sets. The
//! zero-fill keeps every layer exactly `day_range` long so stack alignment
//! never breaks; a missing set simply renders with zero height.

use std::collections::BTreeMap;

use chrono::Datelike;
use replog_core::error::{RepLogError, Result};
use replog_core::models::{MonthRecords, StratifiedSeries};
use tracing::debug;

/// Stratify one exercise's records over `1..=day_range`.
///
/// Fails with [`RepLogError::ExerciseNotFound`] when the exercise never
/// appears in the month; this is checked before the day-range boundary, so
/// an unknown exercise errors even for an empty range. `day_range == 0`
/// yields an empty series.
pub fn stratify(
    month: &MonthRecords,
    exercise: &str,
    day_range: u32,
) -> Result<StratifiedSeries> {
    let records = month.records_for(exercise);
    if records.is_empty() {
        return Err(RepLogError::ExerciseNotFound(exercise.to_string()));
    }

    if day_range == 0 {
        return Ok(StratifiedSeries::new(0, Vec::new()));
    }

    // Bucket counts by day of month, preserving input order within each day.
    let mut buckets: BTreeMap<u32, Vec<u32>> = BTreeMap::new();
    for record in &records {
        buckets.entry(record.date.day()).or_default().push(record.count);
    }

    // Rank each day's sets by magnitude. Vec::sort_by is stable, so equal
    // counts keep their original relative order.
    for counts in buckets.values_mut() {
        counts.sort_by(|a, b| b.cmp(a));
    }

    let num_layers = buckets.values().map(Vec::len).max().unwrap_or(0);
    debug!(
        "Stratifying \"{}\": {} active days, {} layers over {} days",
        exercise,
        buckets.len(),
        num_layers,
        day_range
    );

    // Preallocate the full num_layers x day_range grid and fill by index;
    // every slot not written stays 0 (a void day, or a rank that day never
    // reached).
    let mut layers = vec![vec![0u32; day_range as usize]; num_layers];
    for (&day, counts) in &buckets {
        if day > day_range {
            continue;
        }
        for (rank, &count) in counts.iter().enumerate() {
            layers[rank][(day - 1) as usize] = count;
        }
    }

    Ok(StratifiedSeries::new(day_range, layers))
}
