use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::Span,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, LegendPosition, Paragraph, Widget},
};

use crate::{
    session::SessionResult,
    time_series::{Metric, MetricsSnapshot},
};

const HORIZONTAL_MARGIN: u16 = 2;
const VERTICAL_MARGIN: u16 = 1;

/// Compute X (ticks) and Y (count) bounds for the results chart
pub fn compute_chart_params(history: &[MetricsSnapshot]) -> (f64, f64) {
    let last_tick = history.len().saturating_sub(1).max(1) as f64;
    let highest = history
        .iter()
        .flat_map(|s| Metric::ALL.into_iter().map(move |m| m.value(s)))
        .max()
        .unwrap_or(0)
        .max(1);
    (last_tick, highest as f64)
}

/// Format a simple numeric label consistently
pub fn format_label(val: f64) -> String {
    if (val - val.round()).abs() < f64::EPSILON {
        format!("{}", val.round())
    } else {
        format!("{val:.2}")
    }
}

fn metric_color(metric: Metric) -> Color {
    match metric {
        Metric::Score => Color::Magenta,
        Metric::Clicks => Color::Cyan,
        Metric::Misclicks => Color::Red,
        Metric::Timeouts => Color::Yellow,
    }
}

/// End-of-session chart of every metric over the session's ticks.
pub struct ResultsView<'a> {
    pub result: &'a SessionResult,
    pub history: &'a [MetricsSnapshot],
    /// Shown under the chart, e.g. where results were saved.
    pub status: Option<String>,
}

impl Widget for &ResultsView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let bold_style = Style::default().add_modifier(Modifier::BOLD);
        let italic_style = Style::default().add_modifier(Modifier::ITALIC);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .horizontal_margin(HORIZONTAL_MARGIN)
            .vertical_margin(VERTICAL_MARGIN)
            .constraints([
                Constraint::Min(1),    // chart
                Constraint::Length(1), // totals
                Constraint::Length(1), // status
                Constraint::Length(1), // legend
            ])
            .split(area);

        let (last_tick, highest) = compute_chart_params(self.history);
        let series: Vec<(Metric, Vec<(f64, f64)>)> = Metric::ALL
            .iter()
            .map(|m| (*m, m.series(self.history)))
            .collect();
        let datasets = series
            .iter()
            .map(|(metric, points)| {
                Dataset::default()
                    .name(metric.to_string())
                    .marker(Marker::Braille)
                    .graph_type(GraphType::Line)
                    .style(Style::default().fg(metric_color(*metric)))
                    .data(points)
            })
            .collect::<Vec<_>>();

        let axis_labels = |max: f64| {
            vec![
                Span::styled("0", bold_style),
                Span::styled(format_label(max / 2.0), bold_style),
                Span::styled(format_label(max), bold_style),
            ]
        };

        let chart = Chart::new(datasets)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(format!("Performance Metrics for {}", self.result.player_name)),
            )
            .legend_position(Some(LegendPosition::TopLeft))
            .hidden_legend_constraints((Constraint::Percentage(50), Constraint::Percentage(50)))
            .x_axis(
                Axis::default()
                    .title("tick")
                    .bounds([0.0, last_tick])
                    .labels(axis_labels(last_tick)),
            )
            .y_axis(
                Axis::default()
                    .title("count")
                    .bounds([0.0, highest])
                    .labels(axis_labels(highest)),
            );

        chart.render(chunks[0], buf);

        let totals = Paragraph::new(Span::styled(
            format!(
                "score {}   clicks {}   misclicks {}   timeouts {}",
                self.result.score, self.result.clicks, self.result.misclicks, self.result.timeouts
            ),
            bold_style,
        ))
        .alignment(Alignment::Center);
        totals.render(chunks[1], buf);

        if let Some(status) = &self.status {
            Paragraph::new(Span::styled(
                status.as_str(),
                Style::default().fg(Color::Cyan).patch(italic_style),
            ))
            .alignment(Alignment::Center)
            .render(chunks[2], buf);
        }

        Paragraph::new(Span::styled("(any key) to exit", italic_style)).render(chunks[3], buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(score: u32, clicks: u32, misclicks: u32, timeouts: u32) -> MetricsSnapshot {
        MetricsSnapshot {
            score,
            clicks,
            misclicks,
            timeouts,
        }
    }

    #[test]
    fn test_compute_chart_params_empty() {
        let (x, y) = compute_chart_params(&[]);
        assert_eq!(x, 1.0);
        assert_eq!(y, 1.0);
    }

    #[test]
    fn test_compute_chart_params_uses_highest_metric() {
        let history = [snapshot(1, 2, 0, 0), snapshot(0, 3, 1, 7), snapshot(0, 3, 1, 8)];
        let (x, y) = compute_chart_params(&history);
        assert_eq!(x, 2.0);
        assert_eq!(y, 8.0);
    }

    #[test]
    fn test_format_label() {
        assert_eq!(format_label(1.0), "1");
        assert_eq!(format_label(1.2345), "1.23");
    }

    #[test]
    fn results_view_renders_title_and_totals() {
        let result = SessionResult {
            player_name: "ada".into(),
            score: 3,
            clicks: 5,
            misclicks: 1,
            timeouts: 2,
        };
        let history: Vec<_> = (0..50).map(|i| snapshot(i / 10, i / 5, 0, i / 20)).collect();
        let view = ResultsView {
            result: &result,
            history: &history,
            status: Some("saved to ./ada_results.txt".into()),
        };
        let area = Rect::new(0, 0, 100, 30);
        let mut buffer = Buffer::empty(area);

        (&view).render(area, &mut buffer);

        let rendered = buffer
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect::<String>();
        assert!(rendered.contains("Performance Metrics for ada"));
        assert!(rendered.contains("clicks 5"));
        assert!(rendered.contains("saved to ./ada_results.txt"));
    }

    #[test]
    fn results_view_handles_small_areas() {
        let result = SessionResult {
            player_name: "x".into(),
            score: 0,
            clicks: 0,
            misclicks: 0,
            timeouts: 0,
        };
        let view = ResultsView {
            result: &result,
            history: &[],
            status: None,
        };
        let area = Rect::new(0, 0, 10, 4);
        let mut buffer = Buffer::empty(area);
        (&view).render(area, &mut buffer);
        assert_eq!(*buffer.area(), area);
    }
}
