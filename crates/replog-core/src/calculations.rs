//! Scalar statistics and goal-pace calculations.
//!
//! Pure numeric helpers shared by the aggregator and the report formatting;
//! nothing here touches the wall clock or any I/O.

// ── Basic statistics ──────────────────────────────────────────────────────────

/// Arithmetic mean of `values`. Returns 0.0 for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Median of `values` (average of the two middle elements for an even
/// count). Returns 0.0 for an empty slice.
pub fn median(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

/// Round to two decimal places, for display parity with the report surface.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

// ── PaceCalculator ────────────────────────────────────────────────────────────

/// Stateless collection of goal-pace calculations for an in-progress month.
pub struct PaceCalculator;

impl PaceCalculator {
    /// Required reps per remaining day assuming no further reps are logged
    /// today: `(goal - month_total) / (days_in_month - current_day)`.
    ///
    /// Returns `None` on the last day of the month (no days remain after
    /// today, so there is no daily pace to speak of).
    pub fn pace_end_of_day(
        goal_total: u64,
        month_total: u64,
        days_in_month: u32,
        current_day: u32,
    ) -> Option<f64> {
        let remaining_days = days_in_month as i64 - current_day as i64;
        if remaining_days <= 0 {
            return None;
        }
        let remaining_reps = goal_total as f64 - month_total as f64;
        Some(remaining_reps / remaining_days as f64)
    }

    /// Required reps per remaining day treating today as not yet contributed:
    /// `(goal - (month_total - today_total)) / (days_in_month - (current_day - 1))`.
    ///
    /// Today's reps are subtracted back out of the month total and today is
    /// counted among the remaining days. Returns `None` when even that
    /// denominator is not positive.
    pub fn pace_as_of_morning(
        goal_total: u64,
        month_total: u64,
        today_total: u64,
        days_in_month: u32,
        current_day: u32,
    ) -> Option<f64> {
        let open_days = days_in_month as i64 - (current_day as i64 - 1);
        if open_days <= 0 {
            return None;
        }
        let done_before_today = month_total as f64 - today_total as f64;
        let remaining_reps = goal_total as f64 - done_before_today;
        Some(remaining_reps / open_days as f64)
    }
}
