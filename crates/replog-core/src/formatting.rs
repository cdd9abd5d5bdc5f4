use crate::calculations::round2;
use crate::models::{Projection, Summary};
use crate::time_utils;

/// Format an integer rep count with thousands separators.
///
/// # Examples
///
/// ```
/// use replog_core::formatting::format_count;
///
/// assert_eq!(format_count(0), "0");
/// assert_eq!(format_count(999), "999");
/// assert_eq!(format_count(1234), "1,234");
/// assert_eq!(format_count(1234567), "1,234,567");
/// ```
pub fn format_count(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// Format a statistic rounded to two decimals, trimming a trailing `.0`
/// the way the original report did (`37.5` rather than `37.50`).
///
/// # Examples
///
/// ```
/// use replog_core::formatting::format_stat;
///
/// assert_eq!(format_stat(37.5), "37.5");
/// assert_eq!(format_stat(26.4678), "26.47");
/// assert_eq!(format_stat(14.0), "14");
/// ```
pub fn format_stat(value: f64) -> String {
    format!("{}", round2(value))
}

/// Header line for a report: `"PUSHUPS FOR 11/2024"`, with an
/// `" AS OF {day}/{month}/{year}"` suffix when the month is in progress.
fn report_header(exercise: &str, year: i32, month: u32, as_of_day: Option<u32>) -> String {
    match as_of_day {
        Some(day) => format!(
            "{} FOR {}/{} AS OF {}/{}/{}",
            exercise.to_uppercase(),
            month,
            year,
            day,
            month,
            year
        ),
        None => format!("{} FOR {}/{}", exercise.to_uppercase(), month, year),
    }
}

/// Build the monthly statistics report as printable text.
///
/// `as_of_day` carries the current day-of-month when the summary covers an
/// in-progress month, and `None` for a completed month; it only affects the
/// header.
pub fn stats_report(summary: &Summary, as_of_day: Option<u32>) -> String {
    let header = report_header(&summary.exercise, summary.year, summary.month, as_of_day);
    let mut out = String::new();
    out.push_str(&header);
    out.push('\n');
    out.push_str(&"-".repeat(header.len()));
    out.push('\n');

    out.push_str(&format!("Total: {}\n", format_count(summary.total)));
    out.push_str(&format!(
        "Days done: {} of {}\n",
        summary.days_done, summary.day_range
    ));

    out.push_str("Per set:\n");
    out.push_str(&format!("   max: {}\n", summary.per_set.max));
    out.push_str(&format!("   mean: {}\n", format_stat(summary.per_set.mean)));
    out.push_str(&format!(
        "   median: {}\n",
        format_stat(summary.per_set.median)
    ));

    out.push_str("Per day:\n");
    out.push_str(&format!("   max: {}\n", summary.per_day.max));
    out.push_str(&format!("   mean: {}\n", format_stat(summary.per_day.mean)));
    out.push_str(&format!(
        "   median: {}\n",
        format_stat(summary.per_day.median)
    ));
    out.push_str(&format!(
        "   mean, inc: {}\n",
        format_stat(summary.per_day.mean_with_void)
    ));
    out.push_str(&format!(
        "   median, inc: {}\n",
        format_stat(summary.per_day.median_with_void)
    ));

    out
}

/// Build the goal-pace projection report as printable text.
pub fn projection_report(projection: &Projection) -> String {
    let header = report_header(
        &projection.exercise,
        projection.year,
        projection.month,
        Some(projection.current_day),
    );
    let mut out = String::new();
    out.push_str(&header);
    out.push('\n');
    out.push_str(&"-".repeat(header.len()));
    out.push('\n');

    out.push_str(&format!(
        "So far today: {}\n",
        format_count(projection.today_total)
    ));
    out.push_str(&format!(
        "So far this month: {}\n",
        format_count(projection.month_total)
    ));

    out.push_str(&format!(
        "To reach {} by {}/{}:\n",
        format_count(projection.goal_total),
        projection.month,
        projection.days_in_month
    ));
    match projection.pace_as_of_morning {
        Some(pace) => out.push_str(&format!(
            "   As of this morning: {} per day\n",
            format_stat(pace)
        )),
        None => out.push_str("   As of this morning: n/a\n"),
    }
    match projection.pace_end_of_day {
        Some(pace) => out.push_str(&format!("   As of now: {} per day\n", format_stat(pace))),
        None => out.push_str("   As of now: n/a (last day of month)\n"),
    }

    out
}

/// Chart title for the stacked per-set view, e.g.
/// `"Pushups per day for November 2024"`.
pub fn stacked_chart_title(exercise: &str, year: i32, month: u32) -> String {
    format!(
        "{} per day for {} {}",
        capitalize(exercise),
        time_utils::month_name(month),
        year
    )
}

/// Chart title for the cumulative-total view over one or more months.
pub fn cumulative_chart_title(exercise: &str, months: &[(i32, u32)]) -> String {
    match months {
        [] => capitalize(exercise),
        [(year, month)] => format!(
            "{} for {} {}",
            capitalize(exercise),
            time_utils::month_name(*month),
            year
        ),
        [first, .., last] => format!(
            "{} (cum. total) for {}-{} through {}-{}",
            capitalize(exercise),
            first.0,
            first.1,
            last.0,
            last.1
        ),
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
