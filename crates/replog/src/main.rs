mod bootstrap;

use anyhow::{bail, Context, Result};
use chrono::{Datelike, Local, NaiveDate};

use replog_core::formatting;
use replog_core::settings::Settings;
use replog_core::time_utils;
use replog_data::aggregator::ExerciseAggregator;
use replog_data::loader::load_month;
use replog_data::stratify::stratify;
use replog_data::workbook::Workbook;
use replog_ui::app::ChartApp;
use replog_ui::chart::{ChartFigure, CumulativeData, MonthLine, StackedBarData};

fn main() -> Result<()> {
    let settings = Settings::load_with_last_used();

    bootstrap::ensure_directories()?;
    bootstrap::setup_logging(&settings.log_level)?;

    tracing::info!("replog v{} starting", env!("CARGO_PKG_VERSION"));

    // Resolve the wall clock exactly once; everything downstream takes dates
    // and day ranges as plain parameters.
    let today = Local::now().date_naive();
    let year = settings.year.unwrap_or_else(|| today.year());
    let month = settings.month.unwrap_or_else(|| today.month());

    let workbook_dir = settings
        .workbook
        .clone()
        .or_else(bootstrap::discover_workbook)
        .context("no workbook directory found; pass --workbook <dir>")?;
    let workbook = Workbook::open(&workbook_dir)?;
    tracing::debug!("Using workbook at {}", workbook_dir.display());

    let exercise = settings
        .exercise
        .as_deref()
        .context("no exercise selected; pass --exercise <name>")?;

    match settings.view.as_str() {
        "stats" => run_stats(&workbook, exercise, year, month, today),
        "project" => run_project(&workbook, &settings, exercise, year, month, today),
        "chart" => run_chart(&workbook, &settings, exercise, year, month, today),
        "cumsum" => run_cumsum(&workbook, &settings, exercise, year, month),
        unknown => bail!("unknown view: {}", unknown),
    }
}

/// Print the monthly statistics report to stdout.
fn run_stats(
    workbook: &Workbook,
    exercise: &str,
    year: i32,
    month: u32,
    today: NaiveDate,
) -> Result<()> {
    let records = load_month(workbook, year, month)?;
    let day_range = time_utils::day_range_for(year, month, today);
    let summary = ExerciseAggregator::summarize(&records, exercise, day_range)?;

    let as_of_day = in_progress_day(year, month, today);
    print!("{}", formatting::stats_report(&summary, as_of_day));
    Ok(())
}

/// Print the goal-pace projection report to stdout.
fn run_project(
    workbook: &Workbook,
    settings: &Settings,
    exercise: &str,
    year: i32,
    month: u32,
    today: NaiveDate,
) -> Result<()> {
    let goal = settings
        .goal
        .context("no goal set; pass --goal <total reps>")?;
    if in_progress_day(year, month, today).is_none() {
        bail!("the project view analyzes the current month; drop --year/--month");
    }

    let records = load_month(workbook, year, month)?;
    let projection = ExerciseAggregator::project(&records, exercise, goal, today)?;

    print!("{}", formatting::projection_report(&projection));
    Ok(())
}

/// Display the stacked per-set bar chart.
fn run_chart(
    workbook: &Workbook,
    settings: &Settings,
    exercise: &str,
    year: i32,
    month: u32,
    today: NaiveDate,
) -> Result<()> {
    let records = load_month(workbook, year, month)?;
    let day_range = time_utils::day_range_for(year, month, today);
    let series = stratify(&records, exercise, day_range)?;

    let title = formatting::stacked_chart_title(exercise, year, month);
    let figure = ChartFigure::StackedBars(StackedBarData::from_series(title, &series));

    ChartApp::new(&settings.theme).run(&figure)?;
    Ok(())
}

/// Display cumulative-total lines for one month or a range of months.
fn run_cumsum(
    workbook: &Workbook,
    settings: &Settings,
    exercise: &str,
    year: i32,
    month: u32,
) -> Result<()> {
    let months = resolve_cumsum_months(settings, year, month)?;

    let mut lines = Vec::with_capacity(months.len());
    for &(y, m) in &months {
        let records = load_month(workbook, y, m)?;
        let cumulative = ExerciseAggregator::cumulative_totals(&records, exercise)?;
        lines.push(MonthLine::new(y, m, &cumulative));
    }

    let title = formatting::cumulative_chart_title(exercise, &months);
    let figure = ChartFigure::CumulativeLines(CumulativeData::new(title, lines));

    ChartApp::new(&settings.theme).run(&figure)?;
    Ok(())
}

/// Months the cumsum view covers: either the single `--month` (or the
/// defaulted current month), or the inclusive `--start-month`/`--end-month`
/// range. The two selection styles cannot be combined.
fn resolve_cumsum_months(
    settings: &Settings,
    year: i32,
    month: u32,
) -> Result<Vec<(i32, u32)>> {
    let range = match (settings.start_month, settings.end_month) {
        (Some(start), Some(end)) => Some((start, end)),
        (None, None) => None,
        _ => bail!("--start-month and --end-month must be given together"),
    };

    match range {
        Some((start, end)) => {
            if settings.month.is_some() || settings.year.is_some() {
                bail!("--month cannot be used alongside --start-month and --end-month");
            }
            Ok(time_utils::month_range(start, end)?)
        }
        None => Ok(vec![(year, month)]),
    }
}

/// `Some(day_of_month)` when `(year, month)` is the month `today` falls in,
/// `None` for any completed (or future) month.
fn in_progress_day(year: i32, month: u32, today: NaiveDate) -> Option<u32> {
    (today.year() == year && today.month() == month).then(|| today.day())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_settings() -> Settings {
        use clap::Parser;
        Settings::parse_from(["replog"])
    }

    #[test]
    fn test_in_progress_day() {
        let today = NaiveDate::from_ymd_opt(2024, 11, 17).unwrap();
        assert_eq!(in_progress_day(2024, 11, today), Some(17));
        assert_eq!(in_progress_day(2024, 10, today), None);
        assert_eq!(in_progress_day(2023, 11, today), None);
    }

    #[test]
    fn test_resolve_cumsum_months_defaults_to_single_month() {
        let settings = base_settings();
        let months = resolve_cumsum_months(&settings, 2024, 11).unwrap();
        assert_eq!(months, vec![(2024, 11)]);
    }

    #[test]
    fn test_resolve_cumsum_months_range() {
        let mut settings = base_settings();
        settings.start_month = Some((2024, 10));
        settings.end_month = Some((2025, 1));
        let months = resolve_cumsum_months(&settings, 2024, 11).unwrap();
        assert_eq!(
            months,
            vec![(2024, 10), (2024, 11), (2024, 12), (2025, 1)]
        );
    }

    #[test]
    fn test_resolve_cumsum_months_half_range_rejected() {
        let mut settings = base_settings();
        settings.start_month = Some((2024, 10));
        assert!(resolve_cumsum_months(&settings, 2024, 11).is_err());
    }

    #[test]
    fn test_resolve_cumsum_months_month_and_range_conflict() {
        let mut settings = base_settings();
        settings.month = Some(11);
        settings.start_month = Some((2024, 10));
        settings.end_month = Some((2024, 12));
        assert!(resolve_cumsum_months(&settings, 2024, 11).is_err());
    }
}
