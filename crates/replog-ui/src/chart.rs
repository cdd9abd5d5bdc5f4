//! Chart data shaping and rendering.
//!
//! The data structs here are the boundary between the pipeline and the
//! terminal: the binary shapes [`StratifiedSeries`] / cumulative totals into
//! figures, and the render functions turn figures into ratatui widgets. The
//! pipeline never inspects rendering output.

use ratatui::{
    layout::Rect,
    symbols,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph},
    Frame,
};

use replog_core::models::StratifiedSeries;

use crate::themes::Theme;

// ── StackedBarData ────────────────────────────────────────────────────────────

/// Stacked per-set bars for one month of one exercise.
///
/// Stacking is precomputed as cumulative layer tops: entry `n` holds, for
/// each day, the running total through set rank n. Rendering paints the tops
/// back-to-front so each bar segment overdraws the taller one below it,
/// leaving every rank visible as a band of its own color.
#[derive(Debug, Clone)]
pub struct StackedBarData {
    /// Chart title.
    pub title: String,
    day_range: u32,
    layer_tops: Vec<Vec<(f64, f64)>>,
}

impl StackedBarData {
    /// Shape a stratified series into stacked-bar data.
    pub fn from_series(title: impl Into<String>, series: &StratifiedSeries) -> Self {
        let day_range = series.day_range();
        let mut running = vec![0u64; day_range as usize];
        let mut layer_tops = Vec::with_capacity(series.num_layers());

        for layer in series.layers() {
            for (day_idx, &count) in layer.iter().enumerate() {
                running[day_idx] += u64::from(count);
            }
            layer_tops.push(
                running
                    .iter()
                    .enumerate()
                    .map(|(day_idx, &top)| ((day_idx + 1) as f64, top as f64))
                    .collect(),
            );
        }

        Self {
            title: title.into(),
            day_range,
            layer_tops,
        }
    }

    pub fn day_range(&self) -> u32 {
        self.day_range
    }

    /// Cumulative tops per layer, in rank order.
    pub fn layer_tops(&self) -> &[Vec<(f64, f64)>] {
        &self.layer_tops
    }

    /// Tallest stacked bar in the figure.
    pub fn max_total(&self) -> f64 {
        self.layer_tops
            .last()
            .map(|tops| tops.iter().map(|&(_, y)| y).fold(0.0, f64::max))
            .unwrap_or(0.0)
    }

    pub fn is_empty(&self) -> bool {
        self.layer_tops.is_empty() || self.day_range == 0
    }
}

// ── CumulativeData ────────────────────────────────────────────────────────────

/// One month's running-total line.
#[derive(Debug, Clone)]
pub struct MonthLine {
    /// Legend label, e.g. `"2024-11"`.
    pub label: String,
    /// `(day, cumulative_total)` points over active days.
    pub points: Vec<(f64, f64)>,
}

impl MonthLine {
    /// Shape one month's cumulative day totals into a line.
    pub fn new(year: i32, month: u32, cumulative: &[(u32, u64)]) -> Self {
        Self {
            label: format!("{}-{}", year, month),
            points: cumulative
                .iter()
                .map(|&(day, total)| (f64::from(day), total as f64))
                .collect(),
        }
    }
}

/// Overlaid cumulative-total lines for one or more months.
#[derive(Debug, Clone)]
pub struct CumulativeData {
    /// Chart title.
    pub title: String,
    /// One line per month, in chronological order.
    pub lines: Vec<MonthLine>,
}

impl CumulativeData {
    pub fn new(title: impl Into<String>, lines: Vec<MonthLine>) -> Self {
        Self {
            title: title.into(),
            lines,
        }
    }

    /// Largest day index across all lines.
    pub fn max_day(&self) -> f64 {
        self.lines
            .iter()
            .flat_map(|line| line.points.iter().map(|&(x, _)| x))
            .fold(0.0, f64::max)
    }

    /// Largest cumulative total across all lines.
    pub fn max_total(&self) -> f64 {
        self.lines
            .iter()
            .flat_map(|line| line.points.iter().map(|&(_, y)| y))
            .fold(0.0, f64::max)
    }

    pub fn is_empty(&self) -> bool {
        self.lines.iter().all(|line| line.points.is_empty())
    }
}

// ── ChartFigure ───────────────────────────────────────────────────────────────

/// A renderable figure handed from the binary to the chart view.
#[derive(Debug, Clone)]
pub enum ChartFigure {
    StackedBars(StackedBarData),
    CumulativeLines(CumulativeData),
}

impl ChartFigure {
    pub fn title(&self) -> &str {
        match self {
            ChartFigure::StackedBars(data) => &data.title,
            ChartFigure::CumulativeLines(data) => &data.title,
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            ChartFigure::StackedBars(data) => data.is_empty(),
            ChartFigure::CumulativeLines(data) => data.is_empty(),
        }
    }
}

// ── Rendering ─────────────────────────────────────────────────────────────────

/// Render any figure into `area`.
pub fn render_figure(frame: &mut Frame, area: Rect, figure: &ChartFigure, theme: &Theme) {
    if figure.is_empty() {
        render_no_data(frame, area, figure.title(), theme);
        return;
    }
    match figure {
        ChartFigure::StackedBars(data) => render_stacked_bars(frame, area, data, theme),
        ChartFigure::CumulativeLines(data) => render_cumulative(frame, area, data, theme),
    }
}

/// Render the stacked per-set bar chart.
///
/// Layers are drawn from the total (outermost rank) down to rank 0; each
/// shorter bar overdraws the lower part of the previous one, so the band
/// left showing for rank n carries rank n's color.
pub fn render_stacked_bars(frame: &mut Frame, area: Rect, data: &StackedBarData, theme: &Theme) {
    let datasets: Vec<Dataset> = data
        .layer_tops()
        .iter()
        .enumerate()
        .rev()
        .map(|(rank, tops)| {
            Dataset::default()
                .name(format!("set {}", rank + 1))
                .marker(symbols::Marker::HalfBlock)
                .graph_type(GraphType::Bar)
                .style(ratatui::style::Style::default().fg(theme.series_color(rank)))
                .data(tops)
        })
        .collect();

    let x_max = f64::from(data.day_range().max(1));
    let y_max = data.max_total().max(1.0) * 1.1;

    let chart = Chart::new(datasets)
        .block(
            Block::default()
                .title(data.title.clone())
                .title_style(theme.title)
                .borders(Borders::ALL)
                .border_style(theme.border),
        )
        .x_axis(
            Axis::default()
                .style(theme.axis)
                .bounds([1.0, x_max])
                .labels(day_axis_labels(data.day_range())),
        )
        .y_axis(
            Axis::default()
                .style(theme.axis)
                .bounds([0.0, y_max])
                .labels(count_axis_labels(y_max)),
        );

    frame.render_widget(chart, area);
}

/// Render the overlaid cumulative-total lines, one per month.
pub fn render_cumulative(frame: &mut Frame, area: Rect, data: &CumulativeData, theme: &Theme) {
    let datasets: Vec<Dataset> = data
        .lines
        .iter()
        .enumerate()
        .map(|(i, line)| {
            Dataset::default()
                .name(line.label.clone())
                .marker(symbols::Marker::Braille)
                .graph_type(GraphType::Line)
                .style(ratatui::style::Style::default().fg(theme.series_color(i)))
                .data(&line.points)
        })
        .collect();

    let x_max = data.max_day().max(1.0);
    let y_max = data.max_total().max(1.0) * 1.1;

    let chart = Chart::new(datasets)
        .block(
            Block::default()
                .title(data.title.clone())
                .title_style(theme.title)
                .borders(Borders::ALL)
                .border_style(theme.border),
        )
        .x_axis(
            Axis::default()
                .style(theme.axis)
                .bounds([1.0, x_max])
                .labels(day_axis_labels(x_max as u32)),
        )
        .y_axis(
            Axis::default()
                .style(theme.axis)
                .bounds([0.0, y_max])
                .labels(count_axis_labels(y_max)),
        );

    frame.render_widget(chart, area);
}

/// Render a bordered "no data" placeholder.
pub fn render_no_data(frame: &mut Frame, area: Rect, title: &str, theme: &Theme) {
    let block = Block::default()
        .title(title.to_string())
        .title_style(theme.title)
        .borders(Borders::ALL)
        .border_style(theme.border);
    let paragraph = Paragraph::new("No data to display")
        .style(theme.dim)
        .block(block);
    frame.render_widget(paragraph, area);
}

fn day_axis_labels(day_range: u32) -> Vec<String> {
    let last = day_range.max(1);
    let mid = (1 + last) / 2;
    vec![1.to_string(), mid.to_string(), last.to_string()]
}

fn count_axis_labels(y_max: f64) -> Vec<String> {
    vec![
        "0".to_string(),
        format!("{}", (y_max / 2.0).round() as u64),
        format!("{}", y_max.round() as u64),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn sample_series() -> StratifiedSeries {
        // Day 1: 12+10+8, day 2: 5, day 3 void.
        StratifiedSeries::new(3, vec![vec![12, 5, 0], vec![10, 0, 0], vec![8, 0, 0]])
    }

    // ── Data shaping ──────────────────────────────────────────────────────────

    #[test]
    fn test_stacked_bar_layer_tops_cumulative() {
        let data = StackedBarData::from_series("Pushups", &sample_series());
        assert_eq!(data.layer_tops().len(), 3);
        assert_eq!(data.layer_tops()[0], vec![(1.0, 12.0), (2.0, 5.0), (3.0, 0.0)]);
        assert_eq!(data.layer_tops()[1], vec![(1.0, 22.0), (2.0, 5.0), (3.0, 0.0)]);
        assert_eq!(data.layer_tops()[2], vec![(1.0, 30.0), (2.0, 5.0), (3.0, 0.0)]);
    }

    #[test]
    fn test_stacked_bar_max_total() {
        let data = StackedBarData::from_series("Pushups", &sample_series());
        assert_eq!(data.max_total(), 30.0);
    }

    #[test]
    fn test_stacked_bar_empty_series() {
        let data = StackedBarData::from_series("Pushups", &StratifiedSeries::new(0, Vec::new()));
        assert!(data.is_empty());
        assert_eq!(data.max_total(), 0.0);
    }

    #[test]
    fn test_month_line_points() {
        let line = MonthLine::new(2024, 11, &[(1, 30), (2, 35), (4, 60)]);
        assert_eq!(line.label, "2024-11");
        assert_eq!(line.points, vec![(1.0, 30.0), (2.0, 35.0), (4.0, 60.0)]);
    }

    #[test]
    fn test_cumulative_data_bounds() {
        let data = CumulativeData::new(
            "Pushups",
            vec![
                MonthLine::new(2024, 10, &[(1, 10), (31, 200)]),
                MonthLine::new(2024, 11, &[(1, 25), (15, 150)]),
            ],
        );
        assert_eq!(data.max_day(), 31.0);
        assert_eq!(data.max_total(), 200.0);
        assert!(!data.is_empty());
    }

    // ── Render (does not panic) ───────────────────────────────────────────────

    #[test]
    fn test_render_stacked_bars_does_not_panic() {
        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        let theme = Theme::dark();
        let data = StackedBarData::from_series("Pushups per day for November 2024", &sample_series());

        terminal
            .draw(|frame| {
                let area = frame.area();
                render_stacked_bars(frame, area, &data, &theme);
            })
            .unwrap();
    }

    #[test]
    fn test_render_cumulative_does_not_panic() {
        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        let theme = Theme::light();
        let data = CumulativeData::new(
            "Pushups",
            vec![MonthLine::new(2024, 11, &[(1, 30), (2, 35), (4, 60)])],
        );

        terminal
            .draw(|frame| {
                let area = frame.area();
                render_cumulative(frame, area, &data, &theme);
            })
            .unwrap();
    }

    #[test]
    fn test_render_empty_figure_shows_placeholder() {
        let backend = TestBackend::new(40, 10);
        let mut terminal = Terminal::new(backend).unwrap();
        let theme = Theme::dark();
        let figure = ChartFigure::StackedBars(StackedBarData::from_series(
            "Pushups",
            &StratifiedSeries::new(0, Vec::new()),
        ));

        terminal
            .draw(|frame| {
                let area = frame.area();
                render_figure(frame, area, &figure, &theme);
            })
            .unwrap();
    }
}
